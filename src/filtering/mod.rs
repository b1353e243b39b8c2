//! # Filtering, Sorting & Pagination
//!
//! Translates sanitized query parameters into parameterized SQL fragments.
//! Nothing here interpolates a request value into SQL text: values only ever
//! travel as bind variables, and column names only ever come from static
//! entity configuration.
//!
//! ## Query Parameter Examples
//!
//! ```text
//! // IN-list, pipe delimited
//! GET /v1/people_groups.json?continents=AFR|NAR
//!
//! // Range (BETWEEN) or exact value
//! GET /v1/people_groups.json?population=10000-50000
//! GET /v1/people_groups.json?jpscale=1|2
//!
//! // Y/N flags
//! GET /v1/people_groups.json?least_reached=y&window1040=n
//!
//! // Sorting and paging
//! GET /v1/countries.json?sort_field=population&sort_direction=desc&limit=20&page=2
//! ```

pub mod clauses;
pub mod pagination;
pub mod sanitize;
pub mod sort;

pub use clauses::{Clause, boolean_flag, content_presence, equals, in_list, range};
pub use pagination::{Page, apply_limit, parse_pagination};
pub use sanitize::clean;
pub use sort::{Ordering, SortDirection, parse_sorting};

//! Entity configurations and their finders.
//!
//! Each submodule owns one `static CONFIG` plus the finders that entity
//! supports. Finders take a sanitized [`ParameterSet`](crate::params::ParameterSet)
//! and return a [`PreparedQuery`](crate::query::PreparedQuery) or the first
//! [`ValidationError`](crate::validation::ValidationError).

use crate::generator::{EntityConfig, Rule};

pub mod continent;
pub mod country;
pub mod language;
pub mod people_group;
pub mod profile_text;
pub mod region;
pub mod resource;
pub mod total;

/// Continent codes as they appear in `ROG2`, lower-cased.
pub const CONTINENT_CODES: &[&str] = &["afr", "asi", "aus", "eur", "lam", "nar", "sop"];

pub(crate) const CONTINENT_RULES: &[Rule] =
    &[Rule::LengthEach(3), Rule::MembershipEach(CONTINENT_CODES)];
pub(crate) const COUNTRY_CODE_RULES: &[Rule] = &[Rule::LengthEach(2)];
pub(crate) const LANGUAGE_CODE_RULES: &[Rule] = &[Rule::LengthEach(3)];
pub(crate) const INTEGER_RULES: &[Rule] = &[Rule::IntegerEach];
pub(crate) const REGION_RULES: &[Rule] = &[Rule::IntRangeEach {
    min: 1,
    max: 12,
    except: &[],
}];
// 3 is no longer assigned to a religion
pub(crate) const RELIGION_RULES: &[Rule] = &[Rule::IntRangeEach {
    min: 1,
    max: 9,
    except: &[3],
}];
pub(crate) const JPSCALE_RULES: &[Rule] = &[Rule::IntRangeEach {
    min: 1,
    max: 5,
    except: &[],
}];
pub(crate) const BIBLE_STATUS_RULES: &[Rule] = &[Rule::IntRangeEach {
    min: 0,
    max: 5,
    except: &[],
}];

/// Every entity configuration served by the API.
pub static ALL: [&EntityConfig; 8] = [
    &people_group::CONFIG,
    &country::CONFIG,
    &language::CONFIG,
    &continent::CONFIG,
    &region::CONFIG,
    &total::CONFIG,
    &resource::CONFIG,
    &profile_text::CONFIG,
];

//! # jpapi
//!
//! Parameterized SQL generation for a read-only people-group reference API.
//!
//! Request parameters are sanitized into a [`ParameterSet`], checked by the
//! [`validation`] rules, and turned into a [`PreparedQuery`] by an entity's
//! finders. A prepared query carries `:name` placeholders and an ordered
//! [`BindMap`]; request values never reach the SQL text.
//!
//! ```rust
//! use jpapi::entities::people_group;
//! use jpapi::params::ParameterSet;
//!
//! let params = ParameterSet::from_pairs([("continents", "AFR|NAR"), ("least_reached", "y")]);
//! let query = people_group::find_all_with_filters(&params).unwrap();
//! assert!(query.sql().contains("WHERE ROG2 IN (:rog2_0, :rog2_1) AND LeastReached = :least_reached"));
//! ```

pub mod cache;
pub mod config;
pub mod database;
pub mod entities;
pub mod errors;
pub mod filtering;
pub mod generator;
pub mod params;
pub mod query;
pub mod routes;
pub mod validation;

pub use database::QueryExecutor;
pub use errors::ApiError;
pub use generator::{EntityConfig, QueryGenerator};
pub use params::{ParamValue, ParameterSet};
pub use query::{BindMap, BindValue, PreparedQuery};
pub use validation::ValidationError;

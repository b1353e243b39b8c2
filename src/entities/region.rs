use crate::generator::{EntityConfig, QueryGenerator};
use crate::params::ParameterSet;
use crate::query::PreparedQuery;
use crate::validation::{ValidationError, validators};

pub static CONFIG: EntityConfig = EntityConfig {
    resource: "Region",
    table: "jpregions",
    columns: &[
        "RegionCode",
        "RegionName",
        "NbrPGIC",
        "NbrLR",
        "SumRegion",
        "SumRegionLR",
    ],
    aliases: &[("SumRegion", "RegionPopulation")],
    derived: &[],
    default_order: "RegionCode",
    sortable: &[("name", "RegionName"), ("id", "RegionCode")],
    filters: &[],
    default_limit: 100,
};

/// One region by number, 1 through 12.
///
/// # Errors
///
/// `id` missing, not a whole number, or out of range.
pub fn find_by_id(params: &ParameterSet) -> Result<PreparedQuery, ValidationError> {
    let generator = QueryGenerator::new(&CONFIG, params);
    let id = generator.integer("id")?;
    validators::require_in_range("id", id, 1, 12, &[])?;
    generator.find_where(vec![generator.key_lookup("RegionCode", "id", id)])
}

/// Every region.
///
/// # Errors
///
/// An invalid sort request.
pub fn find_all(params: &ParameterSet) -> Result<PreparedQuery, ValidationError> {
    QueryGenerator::new(&CONFIG, params).find_where(Vec::new())
}

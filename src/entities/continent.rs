use super::CONTINENT_CODES;
use crate::generator::{EntityConfig, QueryGenerator};
use crate::params::ParameterSet;
use crate::query::PreparedQuery;
use crate::validation::{ValidationError, validators};

pub static CONFIG: EntityConfig = EntityConfig {
    resource: "Continent",
    table: "jpcontinents",
    columns: &[
        "ROG2",
        "Continent",
        "NbrPGIC",
        "NbrPGICLR",
        "NbrCountries",
        "SumContinent",
        "SumContinentLR",
        "PercentPGICLR",
        "PercentPopulationLR",
    ],
    aliases: &[
        ("SumContinent", "ContinentPopulation"),
        ("SumContinentLR", "ContinentPopulationLR"),
    ],
    derived: &[],
    default_order: "Continent",
    sortable: &[("name", "Continent"), ("id", "ROG2")],
    filters: &[],
    default_limit: 100,
};

/// One continent by its three letter code, e.g. `AFR`.
///
/// # Errors
///
/// `id` missing, not three characters, or not a known continent.
pub fn find_by_id(params: &ParameterSet) -> Result<PreparedQuery, ValidationError> {
    let generator = QueryGenerator::new(&CONFIG, params);
    let id = generator.text("id")?;
    validators::require_length("id", &id, 3)?;
    validators::require_membership("id", &id, CONTINENT_CODES)?;
    generator.find_where(vec![generator.key_lookup("ROG2", "id", id.as_str())])
}

/// Every continent.
///
/// # Errors
///
/// An invalid sort request.
pub fn find_all(params: &ParameterSet) -> Result<PreparedQuery, ValidationError> {
    QueryGenerator::new(&CONFIG, params).find_where(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::BindValue;

    #[test]
    fn test_find_by_id() {
        let params = ParameterSet::new().with("id", "AFR");
        let query = find_by_id(&params).unwrap();
        assert!(query.sql().starts_with("SELECT `ROG2`, `Continent`"));
        assert!(query.sql().contains("`SumContinent` AS ContinentPopulation"));
        assert!(query.sql().contains(" FROM jpcontinents WHERE ROG2 = :id ORDER BY Continent ASC"));
        assert_eq!(query.binds().get("id"), Some(&BindValue::from("AFR")));
    }

    #[test]
    fn test_find_by_id_rejects_unknown_continent() {
        let err = find_by_id(&ParameterSet::new().with("id", "XYZ")).unwrap_err();
        assert_eq!(err.field, "id");
        let err = find_by_id(&ParameterSet::new().with("id", "AF")).unwrap_err();
        assert_eq!(err.field, "id");
    }

    #[test]
    fn test_find_all_ignores_filters() {
        let params = ParameterSet::new().with("countries", "US");
        let query = find_all(&params).unwrap();
        assert!(!query.sql().contains("WHERE"));
    }
}

use crate::generator::{EntityConfig, QueryGenerator};
use crate::params::ParameterSet;
use crate::query::PreparedQuery;
use crate::validation::{ValidationError, validators};

/// Identifiers of the published global totals, lower-cased.
pub const TOTAL_IDS: &[&str] = &[
    "cntpeoplegroups",
    "cntpeoplegroupslr",
    "cntpeoplegroupsfrontier",
    "cntpeoplegroupsunengaged",
    "cntcountries",
    "cntcountrieslr",
    "cntlanguages",
    "cntlanguageslr",
    "cntpeopleingroups",
    "poppeoplegroupslr",
    "poppeoplegroupsfrontier",
    "percentpeoplegroupslr",
    "percentpopulationlr",
    "cnttranslationneeded",
];

pub static CONFIG: EntityConfig = EntityConfig {
    resource: "Total",
    table: "jptotals",
    columns: &["id", "Value", "RoundPrecision"],
    aliases: &[],
    derived: &[],
    default_order: "id",
    sortable: &[("id", "id")],
    filters: &[],
    default_limit: 100,
};

/// One global total by identifier, matched case-insensitively.
///
/// # Errors
///
/// `id` missing or not a known total.
pub fn find_by_id(params: &ParameterSet) -> Result<PreparedQuery, ValidationError> {
    let generator = QueryGenerator::new(&CONFIG, params);
    let id = generator.text("id")?.to_lowercase();
    validators::require_membership("id", &id, TOTAL_IDS)?;
    generator.find_where(vec![generator.key_lookup("id", "id", id.as_str())])
}

/// Every global total.
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
        let query = find_by_id(&ParameterSet::new().with("id", "CntPeopleGroups")).unwrap();
        assert_eq!(
            query.sql(),
            "SELECT `id`, `Value`, `RoundPrecision` FROM jptotals WHERE id = :id \
             ORDER BY id ASC LIMIT :starting, :limit"
        );
        assert_eq!(query.binds().get("id"), Some(&BindValue::from("cntpeoplegroups")));
    }

    #[test]
    fn test_find_by_id_rejects_unknown_total() {
        let err = find_by_id(&ParameterSet::new().with("id", "cntwidgets")).unwrap_err();
        assert_eq!(err.field, "id");
    }
}

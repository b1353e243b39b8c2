use crate::generator::{EntityConfig, QueryGenerator};
use crate::params::ParameterSet;
use crate::query::PreparedQuery;
use crate::validation::{ValidationError, validators};

/// Ministry resources attached to a language.
pub static CONFIG: EntityConfig = EntityConfig {
    resource: "Resource",
    table: "jpresources",
    columns: &["ROL3", "Category", "WebText", "URL", "DisplaySeq"],
    aliases: &[],
    derived: &[],
    default_order: "DisplaySeq",
    sortable: &[("category", "Category"), ("display_seq", "DisplaySeq")],
    filters: &[],
    default_limit: 250,
};

/// Resources for one language code.
///
/// # Errors
///
/// `id` missing or not three characters.
pub fn find_all_by_language_id(params: &ParameterSet) -> Result<PreparedQuery, ValidationError> {
    let generator = QueryGenerator::new(&CONFIG, params);
    let id = generator.text("id")?;
    validators::require_length("id", &id, 3)?;
    generator.find_where(vec![generator.key_lookup("ROL3", "id", id.as_str())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_all_by_language_id() {
        let query = find_all_by_language_id(&ParameterSet::new().with("id", "ENG")).unwrap();
        assert!(query.sql().contains(" FROM jpresources WHERE ROL3 = :id ORDER BY DisplaySeq ASC"));
        assert!(find_all_by_language_id(&ParameterSet::new().with("id", "EN")).is_err());
    }

    #[test]
    fn test_sort_by_display_seq() {
        let params =
            ParameterSet::from_pairs([("id", "eng"), ("sort_field", "display_seq"), ("sort_direction", "DESC")]);
        let query = find_all_by_language_id(&params).unwrap();
        assert!(query.sql().contains("ORDER BY DisplaySeq DESC LIMIT"));
    }
}

use super::{BIBLE_STATUS_RULES, COUNTRY_CODE_RULES, JPSCALE_RULES, LANGUAGE_CODE_RULES, RELIGION_RULES};
use crate::generator::{Derived, EntityConfig, FilterSpec, Part, QueryGenerator};
use crate::params::ParameterSet;
use crate::query::PreparedQuery;
use crate::validation::{ValidationError, validators};

pub static CONFIG: EntityConfig = EntityConfig {
    resource: "Language",
    table: "jplanguages",
    columns: &[
        "ROL3",
        "Language",
        "ROG3",
        "HubCountry",
        "WorldSpeakers",
        "BibleStatus",
        "TranslationNeedQuestionable",
        "BibleYear",
        "NTYear",
        "PortionsYear",
        "JF",
        "AudioRecordings",
        "FourLaws",
        "GodsStory",
        "NbrPGICs",
        "NbrCountries",
        "JPScale",
        "LeastReached",
        "RLG3",
        "PrimaryReligion",
        "PercentAdherents",
        "PercentEvangelical",
        "Status",
    ],
    aliases: &[("RLG3", "PrimaryReligionCode")],
    derived: &[
        Derived::ScaleText {
            column: "JPScale",
            alias: "JPScaleText",
        },
        Derived::Concat {
            parts: &[
                Part::Text("https://joshuaproject.net/languages/"),
                Part::Column("ROL3"),
            ],
            alias: "LanguageURL",
        },
    ],
    default_order: "Language",
    sortable: &[
        ("name", "Language"),
        ("world_speakers", "WorldSpeakers"),
        ("jpscale", "JPScale"),
        ("id", "ROL3"),
    ],
    filters: &[
        FilterSpec::in_list("ids", "ROL3", LANGUAGE_CODE_RULES),
        FilterSpec::in_list("countries", "ROG3", COUNTRY_CODE_RULES),
        FilterSpec::in_list("primary_religions", "RLG3", RELIGION_RULES),
        FilterSpec::in_list("jpscale", "JPScale", JPSCALE_RULES),
        FilterSpec::in_list("bible_status", "BibleStatus", BIBLE_STATUS_RULES),
        FilterSpec::range("world_speakers", "WorldSpeakers", "world_speakers"),
        FilterSpec::range("pc_adherent", "PercentAdherents", "pc_adherent"),
        FilterSpec::range("pc_evangelical", "PercentEvangelical", "pc_evangelical"),
        FilterSpec::flag("least_reached", "LeastReached", "least_reached"),
        FilterSpec::flag("has_jesus_film", "JF", "jf"),
        FilterSpec::flag("has_audio", "AudioRecordings", "audio"),
        FilterSpec::flag("has_four_laws", "FourLaws", "four_laws"),
        FilterSpec::flag("has_gods_story", "GodsStory", "gods_story"),
        FilterSpec::flag(
            "needs_translation_questionable",
            "TranslationNeedQuestionable",
            "translation_questionable",
        ),
        FilterSpec::presence("has_completed_bible", "BibleYear"),
        FilterSpec::presence("has_new_testament", "NTYear"),
        FilterSpec::presence("has_portions", "PortionsYear"),
    ],
    default_limit: 250,
};

/// One language by its three letter code.
///
/// # Errors
///
/// `id` missing or not three characters.
pub fn find_by_id(params: &ParameterSet) -> Result<PreparedQuery, ValidationError> {
    let generator = QueryGenerator::new(&CONFIG, params);
    let id = generator.text("id")?;
    validators::require_length("id", &id, 3)?;
    generator.find_where(vec![generator.key_lookup("ROL3", "id", id.as_str())])
}

/// Languages matching every filter present in `params`.
///
/// # Errors
///
/// The first invalid filter or sort parameter.
pub fn find_all_with_filters(params: &ParameterSet) -> Result<PreparedQuery, ValidationError> {
    QueryGenerator::new(&CONFIG, params).find_all_with_filters()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::BindValue;

    fn params(pairs: &[(&str, &str)]) -> ParameterSet {
        ParameterSet::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_find_by_id() {
        let query = find_by_id(&params(&[("id", "eng")])).unwrap();
        assert!(query.sql().contains(" FROM jplanguages WHERE ROL3 = :id ORDER BY Language ASC"));
        assert_eq!(query.binds().get("id"), Some(&BindValue::from("eng")));
        assert_eq!(find_by_id(&params(&[("id", "en")])).unwrap_err().field, "id");
    }

    #[test]
    fn test_presence_filters() {
        let query = find_all_with_filters(&params(&[
            ("has_new_testament", "y"),
            ("has_completed_bible", "N"),
        ]))
        .unwrap();
        assert!(query.sql().contains(" WHERE BibleYear IS NULL AND NTYear IS NOT NULL ORDER BY"));
        assert_eq!(query.binds().keys().collect::<Vec<_>>(), vec!["starting", "limit"]);
    }

    #[test]
    fn test_flag_and_range_filters() {
        let query = find_all_with_filters(&params(&[
            ("has_four_laws", "y"),
            ("world_speakers", "1000"),
        ]))
        .unwrap();
        assert!(query.sql().contains(
            " WHERE WorldSpeakers = :total_world_speakers AND FourLaws = :four_laws ORDER BY"
        ));
    }

    #[test]
    fn test_rejects_bad_country_code() {
        let err = find_all_with_filters(&params(&[("countries", "US|CAN")])).unwrap_err();
        assert_eq!(err.field, "countries");
    }

    #[test]
    fn test_sort_by_world_speakers() {
        let query = find_all_with_filters(&params(&[("sort_field", "world_speakers")])).unwrap();
        assert!(query.sql().contains("ORDER BY WorldSpeakers ASC LIMIT"));
    }
}

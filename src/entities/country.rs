use super::{CONTINENT_RULES, COUNTRY_CODE_RULES, JPSCALE_RULES, REGION_RULES, RELIGION_RULES};
use crate::generator::{Derived, EntityConfig, FilterSpec, Part, QueryGenerator};
use crate::params::ParameterSet;
use crate::query::PreparedQuery;
use crate::validation::{ValidationError, validators};

/// Countries. Columns not listed here are never selected.
pub static CONFIG: EntityConfig = EntityConfig {
    resource: "Country",
    table: "jpcountries",
    columns: &[
        "ROG3",
        "ROG2",
        "ISO3",
        "ISO2",
        "Ctry",
        "Continent",
        "RegionCode",
        "RegionName",
        "Capital",
        "Population",
        "PoplPeoplesLR",
        "CntPeoples",
        "CntPeoplesLR",
        "JPScaleCtry",
        "RLG3Primary",
        "ReligionPrimary",
        "PercentChristianity",
        "PercentEvangelical",
        "PercentBuddhism",
        "PercentEthnicReligions",
        "PercentHinduism",
        "PercentIslam",
        "PercentNonReligious",
        "PercentOtherSmall",
        "PercentUnknown",
        "PercentUrbanized",
        "LiteracyRate",
        "10_40Window",
        "ROL3OfficialLanguage",
        "OfficialLang",
        "ROL3PrimaryLanguage",
        "PrimaryLanguage",
    ],
    aliases: &[
        ("10_40Window", "Window1040"),
        ("RLG3Primary", "PrimaryReligionCode"),
    ],
    derived: &[
        Derived::ScaleText {
            column: "JPScaleCtry",
            alias: "JPScaleText",
        },
        Derived::Concat {
            parts: &[
                Part::Text("https://joshuaproject.net/countries/"),
                Part::Column("ROG3"),
            ],
            alias: "CountryURL",
        },
        Derived::Concat {
            parts: &[
                Part::Text("https://joshuaproject.net/images/scale"),
                Part::Column("JPScaleCtry"),
                Part::Text(".png"),
            ],
            alias: "JPScaleImageURL",
        },
    ],
    default_order: "Ctry",
    sortable: &[
        ("name", "Ctry"),
        ("population", "Population"),
        ("cnt_peoples", "CntPeoples"),
        ("cnt_peoples_lr", "CntPeoplesLR"),
        ("jpscale", "JPScaleCtry"),
        ("id", "ROG3"),
    ],
    filters: &[
        FilterSpec::in_list("ids", "ROG3", COUNTRY_CODE_RULES),
        FilterSpec::in_list("continents", "ROG2", CONTINENT_RULES),
        FilterSpec::in_list("regions", "RegionCode", REGION_RULES),
        FilterSpec::in_list("primary_religions", "RLG3Primary", RELIGION_RULES),
        FilterSpec::in_list("jpscale", "JPScaleCtry", JPSCALE_RULES),
        FilterSpec::range("population", "Population", "pop"),
        FilterSpec::range("cnt_peoples", "CntPeoples", "cnt_peoples"),
        FilterSpec::range("cnt_peoples_lr", "CntPeoplesLR", "cnt_peoples_lr"),
        FilterSpec::range("pc_christianity", "PercentChristianity", "pc_christianity"),
        FilterSpec::range("pc_evangelical", "PercentEvangelical", "pc_evangelical"),
        FilterSpec::range("pc_buddhist", "PercentBuddhism", "pc_buddhist"),
        FilterSpec::range("pc_ethnic_religion", "PercentEthnicReligions", "pc_ethnic_religion"),
        FilterSpec::range("pc_hindu", "PercentHinduism", "pc_hindu"),
        FilterSpec::range("pc_islam", "PercentIslam", "pc_islam"),
        FilterSpec::range("pc_non_religious", "PercentNonReligious", "pc_non_religious"),
        FilterSpec::range("pc_other_religion", "PercentOtherSmall", "pc_other_religion"),
        FilterSpec::range("pc_unknown", "PercentUnknown", "pc_unknown"),
        FilterSpec::flag("window1040", "10_40Window", "window_10_40"),
    ],
    default_limit: 100,
};

/// One country by its two letter code.
///
/// # Errors
///
/// `id` missing or not two characters.
pub fn find_by_id(params: &ParameterSet) -> Result<PreparedQuery, ValidationError> {
    let generator = QueryGenerator::new(&CONFIG, params);
    let id = generator.text("id")?;
    validators::require_length("id", &id, 2)?;
    generator.find_where(vec![generator.key_lookup("ROG3", "id", id.as_str())])
}

/// Countries matching every filter present in `params`.
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
        let query = find_by_id(&params(&[("id", "US")])).unwrap();
        assert!(query.sql().contains(" FROM jpcountries WHERE ROG3 = :id ORDER BY Ctry ASC"));
        assert_eq!(query.binds().get("id"), Some(&BindValue::from("US")));
    }

    #[test]
    fn test_find_by_id_checks_length() {
        assert_eq!(find_by_id(&params(&[("id", "USA")])).unwrap_err().field, "id");
        assert_eq!(find_by_id(&ParameterSet::new()).unwrap_err().field, "id");
    }

    #[test]
    fn test_find_all_with_filters() {
        let query = find_all_with_filters(&params(&[
            ("ids", "US|CA"),
            ("window1040", "y"),
            ("pc_christianity", "10-50.5"),
        ]))
        .unwrap();
        assert!(query.sql().contains(
            " WHERE ROG3 IN (:rog3_0, :rog3_1) \
             AND PercentChristianity BETWEEN :min_pc_christianity AND :max_pc_christianity \
             AND 10_40Window = :window_10_40 ORDER BY Ctry ASC"
        ));
        assert_eq!(query.binds().get("limit"), Some(&BindValue::Int(100)));
        assert_eq!(
            query.binds().get("max_pc_christianity"),
            Some(&BindValue::Float(50.5))
        );
    }

    #[test]
    fn test_select_list_renames_columns() {
        let select = CONFIG.select_list();
        assert!(select.contains("`RLG3Primary` AS PrimaryReligionCode"));
        assert!(select.contains("CONCAT('https://joshuaproject.net/countries/', `ROG3`) AS CountryURL"));
    }

    #[test]
    fn test_every_sortable_field_is_reachable() {
        for &(field, column) in CONFIG.sortable {
            let query = find_all_with_filters(&params(&[
                ("sort_field", field),
                ("sort_direction", "desc"),
            ]))
            .unwrap();
            assert!(query.sql().contains(&format!("ORDER BY {column} DESC")), "{field}");
        }
    }
}

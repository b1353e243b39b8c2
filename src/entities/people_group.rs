use super::{
    BIBLE_STATUS_RULES, CONTINENT_RULES, COUNTRY_CODE_RULES, INTEGER_RULES, JPSCALE_RULES,
    LANGUAGE_CODE_RULES, REGION_RULES, RELIGION_RULES,
};
use crate::filtering::Ordering;
use crate::generator::{Derived, EntityConfig, FilterSpec, Part, QueryGenerator};
use crate::params::ParameterSet;
use crate::query::PreparedQuery;
use crate::validation::{ValidationError, validators};

/// People groups, one row per people group per country.
pub static CONFIG: EntityConfig = EntityConfig {
    resource: "People group",
    table: "jppeoplegroups",
    columns: &[
        "PeopleID1",
        "PeopleID2",
        "PeopleID3",
        "ROP1",
        "ROP2",
        "ROP3",
        "ROG2",
        "ROG3",
        "Ctry",
        "Continent",
        "RegionCode",
        "RegionName",
        "PeopNameInCountry",
        "PeopNameAcrossCountries",
        "Population",
        "PopulationPercentUN",
        "Category",
        "ROL3",
        "PrimaryLanguageName",
        "RLG3",
        "PrimaryReligion",
        "PercentAdherents",
        "PercentEvangelical",
        "PercentBuddhism",
        "PercentEthnicReligions",
        "PercentHinduism",
        "PercentIslam",
        "PercentNonReligious",
        "PercentOtherSmall",
        "PercentUnknown",
        "PercentAnglican",
        "PercentIndependent",
        "PercentProtestant",
        "PercentOrthodox",
        "PercentRomanCatholic",
        "PercentOtherChristian",
        "JPScale",
        "LeastReached",
        "Frontier",
        "IndigenousCode",
        "Unengaged",
        "10_40Window",
        "BibleStatus",
        "JF",
        "AudioRecordings",
        "PhotoAddress",
        "Latitude",
        "Longitude",
        "LRofTheDayMonth",
        "LRofTheDayDay",
    ],
    aliases: &[
        ("10_40Window", "Window1040"),
        ("RLG3", "PrimaryReligionCode"),
        ("ROL3", "PrimaryLanguageCode"),
    ],
    derived: &[
        Derived::ScaleText {
            column: "JPScale",
            alias: "JPScaleText",
        },
        Derived::Concat {
            parts: &[
                Part::Text("https://joshuaproject.net/people_groups/"),
                Part::Column("PeopleID3"),
                Part::Text("/"),
                Part::Column("ROG3"),
            ],
            alias: "PeopleGroupURL",
        },
        Derived::Concat {
            parts: &[
                Part::Text("https://joshuaproject.net/assets/media/profiles/photos/"),
                Part::Column("PhotoAddress"),
            ],
            alias: "PeopleGroupPhotoURL",
        },
        Derived::Concat {
            parts: &[
                Part::Text("https://joshuaproject.net/images/scale"),
                Part::Column("JPScale"),
                Part::Text(".png"),
            ],
            alias: "JPScaleImageURL",
        },
    ],
    default_order: "PeopNameInCountry",
    sortable: &[
        ("name", "PeopNameInCountry"),
        ("country", "Ctry"),
        ("population", "Population"),
        ("jpscale", "JPScale"),
        ("id", "PeopleID3"),
    ],
    filters: &[
        FilterSpec::in_list("continents", "ROG2", CONTINENT_RULES),
        FilterSpec::in_list("countries", "ROG3", COUNTRY_CODE_RULES),
        FilterSpec::in_list("regions", "RegionCode", REGION_RULES),
        FilterSpec::in_list("languages", "ROL3", LANGUAGE_CODE_RULES),
        FilterSpec::in_list("people_id1", "PeopleID1", INTEGER_RULES),
        FilterSpec::in_list("people_id2", "PeopleID2", INTEGER_RULES),
        FilterSpec::in_list("people_id3", "PeopleID3", INTEGER_RULES),
        FilterSpec::in_list("rop1", "ROP1", &[]),
        FilterSpec::in_list("rop2", "ROP2", &[]),
        FilterSpec::in_list("rop3", "ROP3", INTEGER_RULES),
        FilterSpec::in_list("primary_religions", "RLG3", RELIGION_RULES),
        FilterSpec::in_list("jpscale", "JPScale", JPSCALE_RULES),
        FilterSpec::in_list("bible_status", "BibleStatus", BIBLE_STATUS_RULES),
        FilterSpec::range("population", "Population", "pop"),
        FilterSpec::range("pc_adherent", "PercentAdherents", "pc_adherent"),
        FilterSpec::range("pc_evangelical", "PercentEvangelical", "pc_evangelical"),
        FilterSpec::range("pc_buddhist", "PercentBuddhism", "pc_buddhist"),
        FilterSpec::range("pc_ethnic_religion", "PercentEthnicReligions", "pc_ethnic_religion"),
        FilterSpec::range("pc_hindu", "PercentHinduism", "pc_hindu"),
        FilterSpec::range("pc_islam", "PercentIslam", "pc_islam"),
        FilterSpec::range("pc_non_religious", "PercentNonReligious", "pc_non_religious"),
        FilterSpec::range("pc_other_religion", "PercentOtherSmall", "pc_other_religion"),
        FilterSpec::range("pc_unknown", "PercentUnknown", "pc_unknown"),
        FilterSpec::range("pc_anglican", "PercentAnglican", "pc_anglican"),
        FilterSpec::range("pc_independent", "PercentIndependent", "pc_independent"),
        FilterSpec::range("pc_protestant", "PercentProtestant", "pc_protestant"),
        FilterSpec::range("pc_orthodox", "PercentOrthodox", "pc_orthodox"),
        FilterSpec::range("pc_rcatholic", "PercentRomanCatholic", "pc_rcatholic"),
        FilterSpec::range("pc_other_christian", "PercentOtherChristian", "pc_other_christian"),
        FilterSpec::flag("indigenous", "IndigenousCode", "indigenous"),
        FilterSpec::flag("least_reached", "LeastReached", "least_reached"),
        FilterSpec::flag("unengaged", "Unengaged", "unengaged"),
        FilterSpec::flag("frontier", "Frontier", "frontier"),
        FilterSpec::flag("window1040", "10_40Window", "window_10_40"),
        FilterSpec::flag("has_jesus_film", "JF", "jf"),
        FilterSpec::flag("has_audio", "AudioRecordings", "audio"),
        FilterSpec::presence("has_photo", "PhotoAddress"),
    ],
    default_limit: 250,
};

/// Every country entry of one people group.
///
/// # Errors
///
/// `id` missing or not a whole number.
pub fn find_by_id(params: &ParameterSet) -> Result<PreparedQuery, ValidationError> {
    let generator = QueryGenerator::new(&CONFIG, params);
    let id = generator.integer("id")?;
    generator.find_where(vec![generator.key_lookup("PeopleID3", "id", id)])
}

/// One people group in one country.
///
/// # Errors
///
/// `id` or `country` missing, `id` not a whole number, or `country` not a
/// two letter code.
pub fn find_by_id_and_country(params: &ParameterSet) -> Result<PreparedQuery, ValidationError> {
    let generator = QueryGenerator::new(&CONFIG, params);
    generator.require(&["id", "country"])?;
    let id = generator.integer("id")?;
    let country = generator.text("country")?;
    validators::require_length("country", &country, 2)?;
    generator.find_where(vec![
        generator.key_lookup("PeopleID3", "id", id),
        generator.key_lookup("ROG3", "country", country.as_str()),
    ])
}

/// People groups matching every filter present in `params`.
///
/// # Errors
///
/// The first invalid filter or sort parameter.
pub fn find_all_with_filters(params: &ParameterSet) -> Result<PreparedQuery, ValidationError> {
    QueryGenerator::new(&CONFIG, params).find_all_with_filters()
}

/// The unreached people group featured on a calendar day.
///
/// # Errors
///
/// `month` or `day` missing, or outside 1-12 and 1-31.
pub fn daily_unreached(params: &ParameterSet) -> Result<PreparedQuery, ValidationError> {
    let generator = QueryGenerator::new(&CONFIG, params);
    generator.require(&["month", "day"])?;
    let month = generator.integer("month")?;
    validators::require_in_range("month", month, 1, 12, &[])?;
    let day = generator.integer("day")?;
    validators::require_in_range("day", day, 1, 31, &[])?;
    generator.find_where(vec![
        generator.key_lookup("LRofTheDayMonth", "month", month),
        generator.key_lookup("LRofTheDayDay", "day", day),
    ])
}

/// Countries one people group lives in.
///
/// # Errors
///
/// `id` missing or not a whole number.
pub fn find_country_list(params: &ParameterSet) -> Result<PreparedQuery, ValidationError> {
    let generator = QueryGenerator::new(&CONFIG, params);
    let id = generator.integer("id")?;
    Ok(generator
        .select_columns(&["ROG3", "Ctry"])
        .filter(generator.key_lookup("PeopleID3", "id", id))
        .order_by(Ordering::asc("Ctry"))
        .paginate(generator.limit()))
}

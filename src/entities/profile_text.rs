use crate::generator::{EntityConfig, QueryGenerator};
use crate::params::ParameterSet;
use crate::query::PreparedQuery;
use crate::validation::{ValidationError, validators};

/// Narrative profile sections for a people group in a country.
pub static CONFIG: EntityConfig = EntityConfig {
    resource: "Profile text",
    table: "jpprofiletext",
    columns: &[
        "ProfileID",
        "PeopleID3",
        "ROG3",
        "Format",
        "Summary",
        "Obstacles",
        "HowReach",
        "PrayForChurch",
        "PrayForPG",
        "Credits",
        "CreditsURL",
        "Copyright",
        "Permission",
    ],
    aliases: &[],
    derived: &[],
    default_order: "ProfileID",
    sortable: &[("id", "ProfileID")],
    filters: &[],
    default_limit: 100,
};

/// Every profile text of one people group in one country.
///
/// # Errors
///
/// `id` or `country` missing, `id` not a whole number, or `country` not a
/// two letter code.
pub fn find_all_by_id_and_country(
    params: &ParameterSet,
) -> Result<PreparedQuery, ValidationError> {
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

use crate::params::ParameterSet;
use crate::validation::ValidationError;

/// Query parameter naming the field to sort by.
pub const SORT_FIELD_PARAM: &str = "sort_field";
/// Query parameter naming the direction, `ASC` or `DESC`.
pub const SORT_DIRECTION_PARAM: &str = "sort_direction";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A resolved ORDER BY target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub column: &'static str,
    pub direction: SortDirection,
}

impl Ordering {
    #[must_use]
    pub fn asc(column: &'static str) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("ORDER BY {} {}", self.column, self.direction.as_sql())
    }
}

/// Convert a direction string, case-insensitively
fn parse_direction(direction: &str) -> Result<SortDirection, ValidationError> {
    match direction.to_uppercase().as_str() {
        "ASC" => Ok(SortDirection::Asc),
        "DESC" => Ok(SortDirection::Desc),
        _ => Err(ValidationError::new(
            SORT_DIRECTION_PARAM,
            "Sort direction must be ASC or DESC",
        )),
    }
}

/// Letters and digits only, lower-cased. Request values arrive with `_`
/// already stripped, so names compare in this form.
fn sort_key(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Find column by its public sort name
fn find_column(
    field: &str,
    sortable: &[(&'static str, &'static str)],
) -> Result<&'static str, ValidationError> {
    let wanted = sort_key(field);
    sortable
        .iter()
        .find(|(name, _)| sort_key(name) == wanted)
        .map(|(_, column)| *column)
        .ok_or_else(|| {
            ValidationError::new(SORT_FIELD_PARAM, format!("'{field}' is not a sortable field"))
        })
}

/// Resolve `sort_field`/`sort_direction` against an allow-list of
/// `(public name, column)` pairs.
///
/// Absent parameters fall back to `default_column` ascending.
///
/// # Errors
///
/// Returns a `ValidationError` for a field outside `sortable` or a direction
/// other than `ASC`/`DESC`.
pub fn parse_sorting(
    params: &ParameterSet,
    sortable: &[(&'static str, &'static str)],
    default_column: &'static str,
) -> Result<Ordering, ValidationError> {
    let direction = match params.text(SORT_DIRECTION_PARAM) {
        Some(direction) => parse_direction(&direction)?,
        None => SortDirection::Asc,
    };
    let column = match params.text(SORT_FIELD_PARAM) {
        Some(field) => find_column(&field, sortable)?,
        None => default_column,
    };
    Ok(Ordering { column, direction })
}

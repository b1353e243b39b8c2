use crate::query::{BindMap, BindValue};
use crate::validation::ValidationError;

/// One SQL condition and the values it binds.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub sql: String,
    pub binds: BindMap,
}

impl Clause {
    fn unbound(sql: String) -> Self {
        Self {
            sql,
            binds: BindMap::new(),
        }
    }
}

/// Placeholder stem for a column: lower-cased, identifier characters only.
fn placeholder_stem(column: &str) -> String {
    column
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_lowercase()
}

fn parse_number(column: &str, value: &str) -> Result<f64, ValidationError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::new(column, format!("'{value}' is not a number")))
}

/// `column = :placeholder`
pub fn equals(column: &str, placeholder: &str, value: impl Into<BindValue>) -> Clause {
    let mut binds = BindMap::new();
    binds.insert(placeholder, value);
    Clause {
        sql: format!("{column} = :{placeholder}"),
        binds,
    }
}

/// `column IN (:col_0, :col_1, ...)` from a `|` delimited value.
///
/// Placeholders and binds follow the order of the delimited parts.
pub fn in_list(value: &str, column: &str) -> Clause {
    let stem = placeholder_stem(column);
    let mut binds = BindMap::new();
    let mut placeholders = Vec::new();

    for (i, part) in value.split('|').enumerate() {
        let name = format!("{stem}_{i}");
        placeholders.push(format!(":{name}"));
        binds.insert(name, part);
    }

    Clause {
        sql: format!("{column} IN ({})", placeholders.join(", ")),
        binds,
    }
}

/// `min-max` becomes a BETWEEN, a bare number an equality.
///
/// # Errors
///
/// Fails when the minimum is not below the maximum, when there is more than
/// one `-`, or when a part is not a number.
pub fn range(value: &str, column: &str, suffix: &str) -> Result<Clause, ValidationError> {
    let parts: Vec<&str> = value.split('-').collect();
    match parts.as_slice() {
        [total] => {
            let total = parse_number(column, total)?;
            let mut binds = BindMap::new();
            binds.insert(format!("total_{suffix}"), total);
            Ok(Clause {
                sql: format!("{column} = :total_{suffix}"),
                binds,
            })
        }
        [min, max] => {
            let min = parse_number(column, min)?;
            let max = parse_number(column, max)?;
            if min >= max {
                return Err(ValidationError::new(
                    column,
                    "A dashed range has a minimum greater than or equal to its maximum",
                ));
            }
            let mut binds = BindMap::new();
            binds.insert(format!("min_{suffix}"), min);
            binds.insert(format!("max_{suffix}"), max);
            Ok(Clause {
                sql: format!("{column} BETWEEN :min_{suffix} AND :max_{suffix}"),
                binds,
            })
        }
        _ => Err(ValidationError::new(
            column,
            "A dashed range has too many values",
        )),
    }
}

/// `Y` matches the `'Y'` code; `N` matches null, blank or `'N'`.
///
/// The negative case binds nothing.
///
/// # Errors
///
/// Fails on anything other than `y`/`n` in either case.
pub fn boolean_flag(value: &str, column: &str, suffix: &str) -> Result<Clause, ValidationError> {
    match value.to_uppercase().as_str() {
        "Y" => Ok(equals(column, suffix, "Y")),
        "N" => Ok(Clause::unbound(format!(
            "({column} IS NULL OR {column} = '' OR {column} = 'N')"
        ))),
        _ => Err(ValidationError::new(column, "A boolean flag must be y or n")),
    }
}

/// `Y` requires content in `column`, `N` requires it to be missing.
///
/// # Errors
///
/// Fails on anything other than `y`/`n` in either case.
pub fn content_presence(value: &str, column: &str) -> Result<Clause, ValidationError> {
    match value.to_uppercase().as_str() {
        "Y" => Ok(Clause::unbound(format!("{column} IS NOT NULL"))),
        "N" => Ok(Clause::unbound(format!("{column} IS NULL"))),
        _ => Err(ValidationError::new(column, "A boolean flag must be y or n")),
    }
}

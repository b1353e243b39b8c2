use super::clauses::Clause;
use crate::params::ParameterSet;
use crate::query::BindMap;

/// Resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Rows skipped before the page starts.
    pub starting: i64,
    /// Rows per page.
    pub limit: i64,
}

fn positive(params: &ParameterSet, key: &str) -> Option<i64> {
    params
        .text(key)
        .and_then(|text| text.parse::<i64>().ok())
        .filter(|value| *value > 0)
}

/// Read `limit` and 1-based `page`, falling back to `default_limit` and page 1
/// when either is missing or not a positive integer.
#[must_use]
pub fn parse_pagination(params: &ParameterSet, default_limit: i64) -> Page {
    let limit = positive(params, "limit").unwrap_or(default_limit);
    let page = positive(params, "page").unwrap_or(1);
    Page {
        starting: (page - 1).saturating_mul(limit),
        limit,
    }
}

/// `LIMIT :starting, :limit` for the requested page. Always emitted.
#[must_use]
pub fn apply_limit(params: &ParameterSet, default_limit: i64) -> Clause {
    let page = parse_pagination(params, default_limit);
    let mut binds = BindMap::new();
    binds.insert("starting", page.starting);
    binds.insert("limit", page.limit);
    Clause {
        sql: "LIMIT :starting, :limit".to_string(),
        binds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::BindValue;

    #[test]
    fn test_defaults_when_absent() {
        let page = parse_pagination(&ParameterSet::new(), 250);
        assert_eq!(page, Page { starting: 0, limit: 250 });
    }

    #[test]
    fn test_offset_is_previous_pages() {
        let params = ParameterSet::from_pairs([("limit", "20"), ("page", "3")]);
        assert_eq!(parse_pagination(&params, 100), Page { starting: 40, limit: 20 });
    }

    #[test]
    fn test_first_page_starts_at_zero() {
        let params = ParameterSet::from_pairs([("limit", "10"), ("page", "1")]);
        assert_eq!(parse_pagination(&params, 100).starting, 0);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let params = ParameterSet::from_pairs([("limit", "0"), ("page", "abc")]);
        assert_eq!(parse_pagination(&params, 100), Page { starting: 0, limit: 100 });

        // "-5" survives sanitization but is not positive
        let params = ParameterSet::from_pairs([("limit", "-5"), ("page", "-2")]);
        assert_eq!(parse_pagination(&params, 100), Page { starting: 0, limit: 100 });
    }

    #[test]
    fn test_huge_page_saturates() {
        let params = ParameterSet::from_pairs([("limit", "250"), ("page", "9223372036854775807")]);
        assert_eq!(parse_pagination(&params, 100).starting, i64::MAX);
    }

    #[test]
    fn test_apply_limit_binds_starting_then_limit() {
        let clause = apply_limit(&ParameterSet::new(), 100);
        assert_eq!(clause.sql, "LIMIT :starting, :limit");
        let binds: Vec<_> = clause.binds.iter().collect();
        assert_eq!(
            binds,
            vec![
                ("starting", &BindValue::Int(0)),
                ("limit", &BindValue::Int(100)),
            ]
        );
    }
}

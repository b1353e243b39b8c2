use std::collections::BTreeMap;

use crate::filtering::sanitize::clean;

/// A single request parameter value.
///
/// Repeated query keys (`?countries=US&countries=CA`) and bracketed keys
/// (`?countries[]=US`) arrive as a `List`; everything else is `Single`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    List(Vec<String>),
}

impl ParamValue {
    fn sanitized(self) -> Self {
        match self {
            Self::Single(value) => Self::Single(clean(&value)),
            Self::List(values) => Self::List(values.iter().map(|value| clean(value)).collect()),
        }
    }

    /// The value as pipe-delimited text; lists are joined with `|`.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::Single(value) => value.clone(),
            Self::List(values) => values.join("|"),
        }
    }
}

/// Sanitized request parameters, keyed by parameter name.
///
/// The only ways to build one run every value through [`clean`], so code
/// reading a `ParameterSet` never sees characters outside `[A-Za-z0-9-|.]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect raw `(key, value)` query pairs, folding repeated keys and
    /// `key[]` keys into lists.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut values: BTreeMap<String, ParamValue> = BTreeMap::new();
        for (key, value) in pairs {
            let (key, is_list) = match key.as_ref().strip_suffix("[]") {
                Some(stripped) => (stripped, true),
                None => (key.as_ref(), false),
            };
            let value = clean(value.as_ref());
            let merged = match values.remove(key) {
                None if is_list => ParamValue::List(vec![value]),
                None => ParamValue::Single(value),
                Some(ParamValue::Single(previous)) => ParamValue::List(vec![previous, value]),
                Some(ParamValue::List(mut previous)) => {
                    previous.push(value);
                    ParamValue::List(previous)
                }
            };
            values.insert(key.to_string(), merged);
        }
        Self { values }
    }

    /// Set `key` to a sanitized single value, replacing any previous value.
    #[must_use]
    pub fn with(self, key: impl Into<String>, value: &str) -> Self {
        self.with_value(key, ParamValue::Single(value.to_string()))
    }

    /// Set `key` to a sanitized value, replacing any previous value.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: ParamValue) -> Self {
        self.values.insert(key.into(), value.sanitized());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Pipe-delimited text for `key`, or `None` when absent or empty.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .map(ParamValue::joined)
            .filter(|text| !text.is_empty())
    }

    /// Present and non-empty.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.text(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_sanitizes_values() {
        let params = ParameterSet::from_pairs([("continents", "AFR|<b>NAR</b>; DROP")]);
        assert_eq!(params.text("continents").as_deref(), Some("AFR|NARDROP"));
    }

    #[test]
    fn test_repeated_keys_become_lists() {
        let params = ParameterSet::from_pairs([("countries", "US"), ("countries", "C'A")]);
        assert_eq!(
            params.get("countries"),
            Some(&ParamValue::List(vec!["US".to_string(), "CA".to_string()]))
        );
        assert_eq!(params.text("countries").as_deref(), Some("US|CA"));
    }

    #[test]
    fn test_bracketed_keys_become_lists() {
        let params = ParameterSet::from_pairs([("languages[]", "eng")]);
        assert_eq!(
            params.get("languages"),
            Some(&ParamValue::List(vec!["eng".to_string()]))
        );
    }

    #[test]
    fn test_with_value_sanitizes_element_wise() {
        let params = ParameterSet::new().with_value(
            "rop3",
            ParamValue::List(vec!["1 2".to_string(), "<i>3</i>".to_string()]),
        );
        assert_eq!(
            params.get("rop3"),
            Some(&ParamValue::List(vec!["12".to_string(), "3".to_string()]))
        );
    }

    #[test]
    fn test_empty_values_are_absent() {
        let params = ParameterSet::from_pairs([("id", ""), ("day", "$$")])
            .with_value("regions", ParamValue::List(Vec::new()));
        assert!(!params.has("id"));
        assert!(!params.has("day"));
        assert!(!params.has("regions"));
        assert!(!params.has("month"));
    }
}

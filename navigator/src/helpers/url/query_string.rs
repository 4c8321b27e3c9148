//! Defines helper functions for the URL query string

use std::collections::HashMap;

use log::trace;

use crate::helpers::url::PercentDecoded;

/// Provides a mapping of keys from the URL query string to their supplied value.
pub type QueryStringMapping = HashMap<String, String>;

/// Splits a query string into pairs and provides a mapping of keys to values.
///
/// For keys which are represented more than once in the query string the last value wins.
///
/// Keys that are provided with no `=` at all are skipped, so `query` yields nothing while
/// `query=` maps `query` to the empty string, and `=x` maps the empty key to `x`. Pairs which
/// do not percent-decode to valid UTF-8 are skipped as well.
pub fn split(query: Option<&str>) -> QueryStringMapping {
    let mut query_string_mapping = QueryStringMapping::new();

    if let Some(query) = query {
        let pairs = query.split('&').filter_map(|pair| pair.split_once('='));

        for (k, v) in pairs {
            match (PercentDecoded::new(k), PercentDecoded::new(v)) {
                (Some(k), Some(v)) => {
                    query_string_mapping.insert(k.into_string(), v.into_string());
                }
                _ => trace!("skipping undecodable query pair: `{}={}`", k, v),
            }
        }
    }

    query_string_mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_pairs(qsm: &QueryStringMapping) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = qsm
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        pairs.sort();
        pairs
    }

    #[test]
    fn query_string_mapping_tests() {
        let qsm = split(Some("a=b&c=d&e=f"));
        assert_eq!(to_pairs(&qsm), vec![("a", "b"), ("c", "d"), ("e", "f")]);

        let qsm = split(Some("a=b&a=d&e=f"));
        assert_eq!(to_pairs(&qsm), vec![("a", "d"), ("e", "f")]);

        let qsm = split(Some("a&b"));
        assert!(qsm.is_empty());

        let qsm = split(Some("a=b=c&d=e"));
        assert_eq!(to_pairs(&qsm), vec![("a", "b=c"), ("d", "e")]);
    }

    #[test]
    fn empty_value_is_distinct_from_missing_value() {
        assert_eq!(to_pairs(&split(Some("query="))), vec![("query", "")]);
        assert!(split(Some("query")).is_empty());
        assert!(split(Some("")).is_empty());
        assert!(split(None).is_empty());
    }

    #[test]
    fn decodes_keys_and_values() {
        let qsm = split(Some("q=a%20b+c&na%6De=x"));
        assert_eq!(to_pairs(&qsm), vec![("name", "x"), ("q", "a b+c")]);
    }

    #[test]
    fn skips_bad_pairs() {
        let qsm = split(Some("bad=%ff&ok=1&%ff=v"));
        assert_eq!(to_pairs(&qsm), vec![("ok", "1")]);
    }

    #[test]
    fn empty_key_is_kept() {
        let qsm = split(Some("=x&query="));
        assert_eq!(to_pairs(&qsm), vec![("", "x"), ("query", "")]);
    }
}

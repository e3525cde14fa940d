use regex::Regex;

use crate::value::Value;

/// Key that refers to the candidate itself rather than one of its properties.
pub const SELF_KEY: &str = ".";

/// A predicate used by dynamic selectors such as `.(name=x)`.
///
/// Matching is total: a candidate of the wrong shape, or one missing the key,
/// simply does not match.
#[derive(Debug, Clone)]
pub enum Condition {
    /// `(key=expected)`
    Equal { key: String, expected: Value },

    /// `(key!=expected)`
    NotEqual { key: String, expected: Value },

    /// `(key=~pattern)`, only string values can match
    Matches { key: String, pattern: Regex },
}

impl Condition {
    pub fn equal(key: impl Into<String>, expected: impl Into<Value>) -> Self {
        Condition::Equal {
            key: key.into(),
            expected: expected.into(),
        }
    }

    pub fn not_equal(key: impl Into<String>, expected: impl Into<Value>) -> Self {
        Condition::NotEqual {
            key: key.into(),
            expected: expected.into(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Condition::Equal { key, .. }
            | Condition::NotEqual { key, .. }
            | Condition::Matches { key, .. } => key,
        }
    }

    /// Check the candidate against this condition.
    pub fn matches(&self, candidate: &Value) -> bool {
        let Some(found) = lookup(candidate, self.key()) else {
            return false;
        };
        match self {
            Condition::Equal { expected, .. } => found == expected,
            Condition::NotEqual { expected, .. } => found != expected,
            Condition::Matches { pattern, .. } => {
                found.as_str().is_some_and(|s| pattern.is_match(s))
            }
        }
    }
}

fn lookup<'a>(candidate: &'a Value, key: &str) -> Option<&'a Value> {
    if key == SELF_KEY {
        return Some(candidate);
    }
    candidate.as_object()?.get(key)
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Condition::Equal { key: a, expected: x },
                Condition::Equal { key: b, expected: y },
            )
            | (
                Condition::NotEqual { key: a, expected: x },
                Condition::NotEqual { key: b, expected: y },
            ) => a == b && x == y,
            (
                Condition::Matches { key: a, pattern: x },
                Condition::Matches { key: b, pattern: y },
            ) => a == b && x.as_str() == y.as_str(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equal_matches_property() {
        let cond = Condition::equal("name", "x");
        assert!(cond.matches(&Value::from(json!({"name": "x"}))));
        assert!(!cond.matches(&Value::from(json!({"name": "y"}))));
        assert!(!cond.matches(&Value::from(json!({"other": "x"}))));
    }

    #[test]
    fn test_wrong_shape_is_false() {
        let cond = Condition::equal("name", "x");
        assert!(!cond.matches(&Value::from(json!(["x"]))));
        assert!(!cond.matches(&Value::Integer(1)));
        assert!(!cond.matches(&Value::Null));
    }

    #[test]
    fn test_equal_does_not_coerce_numbers() {
        let cond = Condition::equal("age", Value::Integer(3));
        assert!(cond.matches(&Value::from(json!({"age": 3}))));
        assert!(!cond.matches(&Value::from(json!({"age": 3.0}))));
        assert!(!cond.matches(&Value::from(json!({"age": "3"}))));
    }

    #[test]
    fn test_self_key() {
        let cond = Condition::equal(SELF_KEY, "b");
        assert!(cond.matches(&Value::from("b")));
        assert!(!cond.matches(&Value::from("a")));
    }

    #[test]
    fn test_not_equal_requires_key() {
        let cond = Condition::not_equal("name", "x");
        assert!(cond.matches(&Value::from(json!({"name": "y"}))));
        assert!(!cond.matches(&Value::from(json!({"name": "x"}))));
        assert!(!cond.matches(&Value::from(json!({}))));
    }

    #[test]
    fn test_regex_only_matches_strings() {
        let cond = Condition::Matches {
            key: "id".into(),
            pattern: Regex::new("^a[0-9]+$").unwrap(),
        };
        assert!(cond.matches(&Value::from(json!({"id": "a12"}))));
        assert!(!cond.matches(&Value::from(json!({"id": "b12"}))));
        assert!(!cond.matches(&Value::from(json!({"id": 12}))));
    }
}

//! Hand-written structural validation of loaded route documents.
//!
//! The contract is fixed: a document must be a JSON array whose elements are
//! objects carrying a string `name1`, a string `name2` and a numeric `number`.
//! Additional keys are allowed. The check never panics and reports every
//! violation it finds; callers typically print the first one.

use serde_json::Value;
use thiserror::Error;

/// Required keys with their expected JSON types.
const REQUIRED: [(&str, &str); 3] = [("name1", "string"), ("name2", "string"), ("number", "number")];

/// One structural problem found in a candidate document.
///
/// The `Display` messages follow the wording of jsonschema diagnostics so
/// they stay recognizable to anyone used to that tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{found} is not of type 'array'")]
    NotAnArray { found: &'static str },

    #[error("element {index} is not of type 'object'")]
    NotAnObject { index: usize },

    #[error("'{key}' is a required property of element {index}")]
    MissingKey { index: usize, key: &'static str },

    #[error("'{key}' of element {index} is not of type '{expected}'")]
    WrongType {
        index: usize,
        key: &'static str,
        expected: &'static str,
    },
}

/// Check a JSON-decoded value against the route-list schema.
///
/// Returns `Ok(())` for a conformant document, otherwise every violation
/// found, in document order. The list is never empty on the `Err` path.
pub fn validate(candidate: &Value) -> Result<(), Vec<Violation>> {
    let items = match candidate.as_array() {
        Some(items) => items,
        None => {
            return Err(vec![Violation::NotAnArray {
                found: json_type(candidate),
            }]);
        }
    };

    let mut violations = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            violations.push(Violation::NotAnObject { index });
            continue;
        };
        for (key, expected) in REQUIRED {
            match object.get(key) {
                None => violations.push(Violation::MissingKey { index, key }),
                Some(value) if !type_matches(value, expected) => {
                    violations.push(Violation::WrongType {
                        index,
                        key,
                        expected,
                    });
                }
                Some(_) => {}
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn type_matches(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        _ => false,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conformant_array_validates() {
        let doc = json!([
            {"name1": "Москва", "name2": "Тверь", "number": 5},
            {"name1": "A", "name2": "B", "number": 2.5}
        ]);
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn test_empty_array_validates() {
        assert!(validate(&json!([])).is_ok());
    }

    #[test]
    fn test_extra_keys_are_allowed() {
        let doc = json!([{"name1": "A", "name2": "B", "number": 1, "color": "red"}]);
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn test_non_array_is_one_violation() {
        let violations = validate(&json!({"name1": "A"})).unwrap_err();
        assert_eq!(violations, vec![Violation::NotAnArray { found: "object" }]);
        assert_eq!(
            violations[0].to_string(),
            "object is not of type 'array'"
        );
    }

    #[test]
    fn test_missing_key_is_reported() {
        let doc = json!([{"name1": "A", "name2": "B"}]);
        let violations = validate(&doc).unwrap_err();
        assert_eq!(
            violations,
            vec![Violation::MissingKey {
                index: 0,
                key: "number"
            }]
        );
        assert_eq!(
            violations[0].to_string(),
            "'number' is a required property of element 0"
        );
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let doc = json!([{"name1": 1, "name2": "B", "number": 3}]);
        let violations = validate(&doc).unwrap_err();
        assert_eq!(
            violations,
            vec![Violation::WrongType {
                index: 0,
                key: "name1",
                expected: "string"
            }]
        );
    }

    #[test]
    fn test_non_object_element_is_reported() {
        let doc = json!(["not an object"]);
        let violations = validate(&doc).unwrap_err();
        assert_eq!(violations, vec![Violation::NotAnObject { index: 0 }]);
    }

    #[test]
    fn test_all_violations_are_collected_in_order() {
        let doc = json!([
            {"name1": "ok", "name2": "ok", "number": 1},
            {"name2": 2},
            "junk"
        ]);
        let violations = validate(&doc).unwrap_err();
        assert_eq!(
            violations,
            vec![
                Violation::MissingKey {
                    index: 1,
                    key: "name1"
                },
                Violation::WrongType {
                    index: 1,
                    key: "name2",
                    expected: "string"
                },
                Violation::MissingKey {
                    index: 1,
                    key: "number"
                },
                Violation::NotAnObject { index: 2 },
            ]
        );
    }
}

//! Dynamic value tree access
//!
//! Form values are an arbitrarily nested `serde_json::Value` record
//! addressed by parsed field paths. The engine is deliberately
//! shape-agnostic: forms never declare static structs for their values.

pub mod path;

use path::{FieldPath, Segment};
use serde_json::{Map, Value};

/// Resolve a field path against a value tree
///
/// Missing keys, out-of-range indices, and intermediate nodes of the
/// wrong kind all resolve to `None`.
pub fn get<'a>(root: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let mut node = root;
    for segment in path.segments() {
        node = match segment {
            Segment::Key(key) => node.as_object()?.get(key)?,
            Segment::Index(index) => node.as_array()?.get(*index)?,
        };
    }
    Some(node)
}

/// Deep-assign `new` at `path`, preserving all sibling paths
///
/// Missing intermediates are created: objects for key segments, arrays
/// for index segments (padded with null up to the target index). An
/// intermediate that exists but is not the container kind the path
/// requires is replaced by the needed container.
pub fn set(root: &mut Value, path: &FieldPath, new: Value) {
    set_segments(root, path.segments(), new);
}

fn set_segments(node: &mut Value, segments: &[Segment], new: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *node = new;
        return;
    };
    match head {
        Segment::Key(key) => {
            if !matches!(node, Value::Object(_)) {
                *node = Value::Object(Map::new());
            }
            if let Value::Object(map) = node {
                let child = map.entry(key.clone()).or_insert(Value::Null);
                set_segments(child, rest, new);
            }
        }
        Segment::Index(index) => {
            if !matches!(node, Value::Array(_)) {
                *node = Value::Array(Vec::new());
            }
            if let Value::Array(items) = node {
                while items.len() <= *index {
                    items.push(Value::Null);
                }
                set_segments(&mut items[*index], rest, new);
            }
        }
    }
}

/// Whether a field value counts as "not filled in"
///
/// Booleans are empty unless exactly true, numbers are empty at or
/// below zero, strings/arrays/objects are empty at length zero, and
/// null is always empty.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !*b,
        Value::Number(n) => n.as_f64().map_or(true, |v| v <= 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    mod get {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_top_level_key() {
            let values = json!({"mobile_number": "9999999999"});
            assert_eq!(
                get(&values, &parse("mobile_number")),
                Some(&json!("9999999999"))
            );
        }

        #[test]
        fn test_nested_key() {
            let values = json!({"address": {"city": "Pune"}});
            assert_eq!(get(&values, &parse("address.city")), Some(&json!("Pune")));
        }

        #[test]
        fn test_indexed_path() {
            let values = json!({"skills": [{"skill_id": 4}, {"skill_id": 9}]});
            assert_eq!(get(&values, &parse("skills[1].skill_id")), Some(&json!(9)));
        }

        #[test]
        fn test_missing_key_is_none() {
            let values = json!({"address": {}});
            assert_eq!(get(&values, &parse("address.city")), None);
        }

        #[test]
        fn test_index_out_of_range_is_none() {
            let values = json!({"skills": []});
            assert_eq!(get(&values, &parse("skills[0]")), None);
        }

        #[test]
        fn test_kind_mismatch_is_none() {
            // Indexing into an object, keying into a scalar
            let values = json!({"address": {"city": "Pune"}});
            assert_eq!(get(&values, &parse("address[0]")), None);
            assert_eq!(get(&values, &parse("address.city.name")), None);
        }
    }

    mod set {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_overwrites_existing_value() {
            let mut values = json!({"mobile_number": ""});
            set(&mut values, &parse("mobile_number"), json!("9999999999"));
            assert_eq!(values, json!({"mobile_number": "9999999999"}));
        }

        #[test]
        fn test_preserves_sibling_paths() {
            let mut values = json!({"address": {"city": "Pune", "state": "MH"}});
            set(&mut values, &parse("address.city"), json!("Mumbai"));
            assert_eq!(values, json!({"address": {"city": "Mumbai", "state": "MH"}}));
        }

        #[test]
        fn test_creates_missing_objects() {
            let mut values = json!({});
            set(&mut values, &parse("address.city"), json!("Pune"));
            assert_eq!(values, json!({"address": {"city": "Pune"}}));
        }

        #[test]
        fn test_creates_and_pads_arrays() {
            let mut values = json!({});
            set(&mut values, &parse("preferences[1].industry_id"), json!(7));
            assert_eq!(
                values,
                json!({"preferences": [null, {"industry_id": 7}]})
            );
        }

        #[test]
        fn test_extends_existing_array() {
            let mut values = json!({"skills": [{"skill_id": 1}]});
            set(&mut values, &parse("skills[2].skill_id"), json!(3));
            assert_eq!(
                values,
                json!({"skills": [{"skill_id": 1}, null, {"skill_id": 3}]})
            );
        }

        #[test]
        fn test_replaces_wrong_kind_intermediate() {
            let mut values = json!({"address": "unset"});
            set(&mut values, &parse("address.city"), json!("Pune"));
            assert_eq!(values, json!({"address": {"city": "Pune"}}));
        }

        #[test]
        fn test_adds_previously_absent_top_level_key() {
            let mut values = json!({"name": "a"});
            set(&mut values, &parse("email"), json!("a@b.co"));
            assert_eq!(values, json!({"name": "a", "email": "a@b.co"}));
        }
    }

    mod emptiness {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_boolean_only_true_is_non_empty() {
            assert!(is_empty_value(&json!(false)));
            assert!(!is_empty_value(&json!(true)));
        }

        #[test]
        fn test_numbers_at_or_below_zero_are_empty() {
            assert!(is_empty_value(&json!(0)));
            assert!(is_empty_value(&json!(-5)));
            assert!(is_empty_value(&json!(-0.5)));
            assert!(!is_empty_value(&json!(3)));
            assert!(!is_empty_value(&json!(0.5)));
        }

        #[test]
        fn test_strings() {
            assert!(is_empty_value(&json!("")));
            assert!(!is_empty_value(&json!("x")));
        }

        #[test]
        fn test_arrays_and_objects() {
            assert!(is_empty_value(&json!([])));
            assert!(!is_empty_value(&json!([1])));
            assert!(is_empty_value(&json!({})));
            assert!(!is_empty_value(&json!({"a": 1})));
        }

        #[test]
        fn test_null_is_empty() {
            assert!(is_empty_value(&Value::Null));
        }
    }
}

//! Flattening of nested JSON objects into single-level objects
//!
//! Nested object keys are joined with `.`. Array elements get an `ARRAY$<i>`
//! segment, and an empty array becomes a single `<key>.ARRAY: null` entry.
//! Empty nested objects produce no keys.

use serde_json::{Map, Value};

const ARRAY_TAG: &str = "ARRAY";

/// Flatten a JSON object so that every value is a scalar or null
pub fn flatten(data: &Map<String, Value>) -> Map<String, Value> {
    flatten_object("", data)
}

/// Flatten every object in a document.
///
/// A top-level array is flattened element by element, which is how resource
/// lists are emitted with `--flatten`. Scalars are returned unchanged.
pub fn flatten_document(document: &Value) -> Value {
    match document {
        Value::Object(map) => Value::Object(flatten(map)),
        Value::Array(items) => Value::Array(items.iter().map(flatten_document).collect()),
        other => other.clone(),
    }
}

fn flatten_object(root: &str, data: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in data {
        insert_flattened(&mut out, root, key, value);
    }
    out
}

fn flatten_array(root: &str, items: &[Value]) -> Map<String, Value> {
    let mut out = Map::new();
    if items.is_empty() {
        out.insert(key_of(root, ARRAY_TAG), Value::Null);
        return out;
    }

    for (i, item) in items.iter().enumerate() {
        let index_tag = format!("{ARRAY_TAG}${i}");
        insert_flattened(&mut out, root, &index_tag, item);
    }
    out
}

fn insert_flattened(out: &mut Map<String, Value>, root: &str, key: &str, value: &Value) {
    let children = match value {
        Value::Array(items) => flatten_array(key, items),
        Value::Object(map) => flatten_object(key, map),
        scalar => {
            out.insert(key_of(root, key), scalar.clone());
            return;
        }
    };
    for (child_key, child_value) in children {
        out.insert(key_of(root, &child_key), child_value);
    }
}

fn key_of(root: &str, current: &str) -> String {
    if root.is_empty() {
        current.to_string()
    } else {
        format!("{root}.{current}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_empty_object() {
        assert!(flatten(&Map::new()).is_empty());
    }

    #[test]
    fn test_nested_structure() {
        let input = object(json!({
            "field0": "value0",
            "field1": 123,
            "field2": null,
            "field3": [],
            "field4": [
                "value0",
                123,
                null,
                [],
                ["value0", 123, null, [], {"f0": "value0", "f1": 123}],
                {"fx": "value-x", "fy": 10}
            ],
            "filed5": {
                "child-field0": "value0",
                "child-field1": 123,
                "child-field2": null,
                "child-field3": [],
                "child-field4": [
                    "value0",
                    500,
                    null,
                    [],
                    ["child-value0", 1000, null]
                ],
                "child-field5": {
                    "child-field0": "value0",
                    "child-field1": 123,
                    "child-field2": null,
                    "child-field3": []
                }
            }
        }));

        let expected = object(json!({
            "field0": "value0",
            "field1": 123,
            "field2": null,
            "field3.ARRAY": null,

            "field4.ARRAY$0": "value0",
            "field4.ARRAY$1": 123,
            "field4.ARRAY$2": null,
            "field4.ARRAY$3.ARRAY": null,
            "field4.ARRAY$4.ARRAY$0": "value0",
            "field4.ARRAY$4.ARRAY$1": 123,
            "field4.ARRAY$4.ARRAY$2": null,
            "field4.ARRAY$4.ARRAY$3.ARRAY": null,
            "field4.ARRAY$4.ARRAY$4.f0": "value0",
            "field4.ARRAY$4.ARRAY$4.f1": 123,
            "field4.ARRAY$5.fx": "value-x",
            "field4.ARRAY$5.fy": 10,

            "filed5.child-field0": "value0",
            "filed5.child-field1": 123,
            "filed5.child-field2": null,
            "filed5.child-field3.ARRAY": null,

            "filed5.child-field4.ARRAY$0": "value0",
            "filed5.child-field4.ARRAY$1": 500,
            "filed5.child-field4.ARRAY$2": null,
            "filed5.child-field4.ARRAY$3.ARRAY": null,
            "filed5.child-field4.ARRAY$4.ARRAY$0": "child-value0",
            "filed5.child-field4.ARRAY$4.ARRAY$1": 1000,
            "filed5.child-field4.ARRAY$4.ARRAY$2": null,

            "filed5.child-field5.child-field0": "value0",
            "filed5.child-field5.child-field1": 123,
            "filed5.child-field5.child-field2": null,
            "filed5.child-field5.child-field3.ARRAY": null
        }));

        // Compare as sets of entries; key order is not part of the contract
        let actual = flatten(&input);
        assert_eq!(actual.len(), expected.len());
        for (key, value) in &expected {
            assert_eq!(actual.get(key), Some(value), "mismatch at {key}");
        }
    }

    #[test]
    fn test_empty_nested_object_vanishes() {
        let input = object(json!({"tags": {}, "id": "db-1"}));
        assert_eq!(flatten(&input), object(json!({"id": "db-1"})));
    }

    #[test]
    fn test_flatten_document_array() {
        let doc = json!([
            {"id": "a", "data": {"tags": {"env": "prod"}}},
            {"id": "b", "data": {"tags": {}}}
        ]);
        assert_eq!(
            flatten_document(&doc),
            json!([
                {"id": "a", "data.tags.env": "prod"},
                {"id": "b"}
            ])
        );
        assert_eq!(flatten_document(&json!(5)), json!(5));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_json() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                any::<i64>().prop_map(Value::from),
                "[a-z]{0,6}".prop_map(Value::String),
            ];
            leaf.prop_recursive(4, 32, 4, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                    prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                        .prop_map(|m| Value::Object(m.into_iter().collect())),
                ]
            })
        }

        proptest! {
            /// Flattened values are never containers
            #[test]
            fn flattened_values_are_scalars(
                map in prop::collection::btree_map("[a-z]{1,4}", arb_json(), 0..6),
            ) {
                let map: Map<String, Value> = map.into_iter().collect();
                for value in flatten(&map).values() {
                    prop_assert!(!value.is_array() && !value.is_object());
                }
            }

            /// Objects with only scalar values are unchanged
            #[test]
            fn scalar_objects_are_fixed_points(
                map in prop::collection::btree_map("[a-z]{1,4}", "[a-z]{0,6}", 0..6),
            ) {
                let map: Map<String, Value> =
                    map.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
                prop_assert_eq!(flatten(&map), map);
            }
        }
    }
}

// crates/sf86-mapper/src/flatten.rs

//! Reverse flattening: nested section state to a flat `{catalog id: value}` map.
//!
//! Repeated entries are walked in order without renumbering, since each
//! node's catalog id already encodes its position in the PDF. Absent optional
//! branches contribute nothing; the PDF writer leaves unset fields untouched.

use crate::node::{FieldNode, FieldNodeWithOptions};
use crate::types::{FieldRef, FieldValue};
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use log::debug;
use serde_json::Value;

/// Flat field updates keyed by catalog id, ready for a PDF writer.
pub type FlatFieldMap = BTreeMap<String, FieldValue>;

/// A nested structure of field nodes.
pub trait FieldTree {
    /// Appends the `id -> value` pair of every active leaf.
    fn flatten_into(&self, out: &mut FlatFieldMap);

    /// Visits every catalog field this tree is bound to, including inactive
    /// branches and unused entry slots.
    fn for_each_binding(&self, visit: &mut dyn FnMut(FieldRef<'_>));

    fn flatten(&self) -> FlatFieldMap {
        let mut out = FlatFieldMap::new();
        self.flatten_into(&mut out);
        out
    }

    /// The ids of every bound catalog field.
    fn bound_ids(&self) -> BTreeSet<String> {
        let mut ids = BTreeSet::new();
        self.for_each_binding(&mut |field| {
            ids.insert(field.id.to_string());
        });
        ids
    }
}

impl<T> FieldTree for FieldNode<T>
where
    T: Clone + Into<FieldValue>,
{
    fn flatten_into(&self, out: &mut FlatFieldMap) {
        out.insert(self.id.clone(), self.value.clone().into());
    }

    fn for_each_binding(&self, visit: &mut dyn FnMut(FieldRef<'_>)) {
        visit(self.field_ref());
    }
}

impl<T> FieldTree for FieldNodeWithOptions<T>
where
    T: Clone + Into<FieldValue>,
{
    fn flatten_into(&self, out: &mut FlatFieldMap) {
        self.node.flatten_into(out);
    }

    fn for_each_binding(&self, visit: &mut dyn FnMut(FieldRef<'_>)) {
        self.node.for_each_binding(visit);
    }
}

impl<T: FieldTree> FieldTree for Option<T> {
    fn flatten_into(&self, out: &mut FlatFieldMap) {
        if let Some(inner) = self {
            inner.flatten_into(out);
        }
    }

    fn for_each_binding(&self, visit: &mut dyn FnMut(FieldRef<'_>)) {
        if let Some(inner) = self {
            inner.for_each_binding(visit);
        }
    }
}

impl<T: FieldTree> FieldTree for Vec<T> {
    fn flatten_into(&self, out: &mut FlatFieldMap) {
        for item in self {
            item.flatten_into(out);
        }
    }

    fn for_each_binding(&self, visit: &mut dyn FnMut(FieldRef<'_>)) {
        for item in self {
            item.for_each_binding(visit);
        }
    }
}

/// Implements [`FieldTree`] for a record by delegating to the listed members
/// in order.
///
/// ```ignore
/// field_tree!(FullName { last_name, first_name, middle_name, suffix });
/// ```
#[macro_export]
macro_rules! field_tree {
    ($ty:ty { $($member:ident),* $(,)? }) => {
        impl $crate::FieldTree for $ty {
            fn flatten_into(&self, out: &mut $crate::FlatFieldMap) {
                $( $crate::FieldTree::flatten_into(&self.$member, out); )*
            }

            fn for_each_binding(&self, visit: &mut dyn FnMut($crate::FieldRef<'_>)) {
                $( $crate::FieldTree::for_each_binding(&self.$member, visit); )*
            }
        }
    };
}

/// Flattens an untyped JSON state tree.
///
/// Any object with a string `id` and a `value` key is a leaf. Other objects
/// and arrays are walked recursively. Leaves whose value is `null`, and
/// `null` branches, produce no entry. Numbers are written as text.
pub fn flatten_json(tree: &Value) -> FlatFieldMap {
    let mut out = FlatFieldMap::new();
    flatten_json_into(tree, &mut out);
    out
}

fn flatten_json_into(node: &Value, out: &mut FlatFieldMap) {
    match node {
        Value::Object(map) => {
            if let (Some(Value::String(id)), Some(value)) = (map.get("id"), map.get("value")) {
                match value {
                    Value::String(s) => {
                        out.insert(id.clone(), FieldValue::Text(s.clone()));
                    }
                    Value::Bool(b) => {
                        out.insert(id.clone(), FieldValue::Flag(*b));
                    }
                    Value::Number(n) => {
                        out.insert(id.clone(), FieldValue::Text(n.to_string()));
                    }
                    Value::Null => {}
                    Value::Array(_) | Value::Object(_) => {
                        debug!("Skipping field {} with a non-scalar value", id);
                    }
                }
                return;
            }
            for child in map.values() {
                flatten_json_into(child, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                flatten_json_into(item, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldDescriptor, FieldType, Rect};
    use alloc::vec;
    use serde_json::json;

    fn descriptor(id: &str, field_type: FieldType) -> FieldDescriptor {
        FieldDescriptor {
            id: id.to_string(),
            name: alloc::format!("form1[0].Test[0].Field[{}]", id),
            field_type,
            label: String::new(),
            rect: Rect::default(),
            page: None,
            options: Vec::new(),
        }
    }

    struct Address {
        street: FieldNode<String>,
        military: Option<FieldNode<bool>>,
    }
    field_tree!(Address { street, military });

    struct Person {
        name: FieldNode<String>,
        addresses: Vec<Address>,
    }
    field_tree!(Person { name, addresses });

    #[test]
    fn test_flatten_nested_records_and_vectors() {
        let person = Person {
            name: FieldNode::bind(&descriptor("1", FieldType::Text), "Smith".to_string()),
            addresses: vec![
                Address {
                    street: FieldNode::bind(&descriptor("2", FieldType::Text), "Main St".to_string()),
                    military: Some(FieldNode::bind(&descriptor("3", FieldType::Checkbox), true)),
                },
                Address {
                    street: FieldNode::bind(&descriptor("4", FieldType::Text), String::new()),
                    military: None,
                },
            ],
        };
        let flat = person.flatten();
        assert_eq!(flat.len(), 4);
        assert_eq!(flat["1"], FieldValue::from("Smith"));
        assert_eq!(flat["3"], FieldValue::Flag(true));
        assert_eq!(flat["4"], FieldValue::from(""));
        assert_eq!(person.bound_ids().len(), 4);
    }

    #[test]
    fn test_flatten_json_tree() {
        let tree = json!({
            "section12": {
                "school": {
                    "name": { "id": "100 0 R", "value": "State U", "label": "School" },
                    "graduated": { "id": "101 0 R", "value": true },
                    "year": { "id": "102 0 R", "value": 2004 },
                    "degrees": [
                        { "id": "103 0 R", "value": "BA" },
                        { "id": "104 0 R", "value": null }
                    ],
                    "apoFpoAddress": null
                }
            }
        });
        let flat = flatten_json(&tree);
        assert_eq!(flat.len(), 4);
        assert_eq!(flat["100 0 R"], FieldValue::from("State U"));
        assert_eq!(flat["101 0 R"], FieldValue::Flag(true));
        assert_eq!(flat["102 0 R"], FieldValue::from("2004"));
        assert_eq!(flat["103 0 R"], FieldValue::from("BA"));
        assert!(!flat.contains_key("104 0 R"));
    }
}

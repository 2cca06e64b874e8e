// crates/sf86-mapper/src/node.rs

use crate::types::{FieldDescriptor, FieldRef, FieldType, Rect};
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};
use serde::{Deserialize, Serialize};

/// A leaf value bound to one catalog field.
///
/// Created by forward resolution, owned by the section state that contains it
/// and mutated in place as the form is edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNode<T> {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub rect: Rect,
    pub value: T,
}

impl<T> FieldNode<T> {
    /// Binds `value` to the descriptor, copying its identity and layout.
    pub fn bind(descriptor: &FieldDescriptor, value: T) -> Self {
        Self {
            id: descriptor.id.clone(),
            name: descriptor.name.clone(),
            field_type: descriptor.field_type,
            label: descriptor.label.clone(),
            rect: descriptor.rect,
            value,
        }
    }

    pub fn field_ref(&self) -> FieldRef<'_> {
        FieldRef {
            id: &self.id,
            name: &self.name,
            field_type: self.field_type,
        }
    }
}

/// A field node for dropdown and radio fields, carrying the enumerated choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNodeWithOptions<T> {
    #[serde(flatten)]
    pub node: FieldNode<T>,
    pub options: Vec<String>,
}

impl<T> FieldNodeWithOptions<T> {
    pub fn bind(descriptor: &FieldDescriptor, value: T, options: Vec<String>) -> Self {
        Self {
            node: FieldNode::bind(descriptor, value),
            options,
        }
    }

    /// Whether `choice` is one of the enumerated options.
    pub fn has_option(&self, choice: &str) -> bool {
        self.options.iter().any(|o| o == choice)
    }
}

impl<T> Deref for FieldNodeWithOptions<T> {
    type Target = FieldNode<T>;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}

impl<T> DerefMut for FieldNodeWithOptions<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.node
    }
}

/// The identity of a catalog field without a value.
///
/// Used where the value lives in a richer structure than a single cell, such
/// as the endpoints of a [`DateRange`](crate::DateRange).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSlot {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
}

impl FieldSlot {
    pub fn bind(descriptor: &FieldDescriptor) -> Self {
        Self {
            id: descriptor.id.clone(),
            name: descriptor.name.clone(),
            field_type: descriptor.field_type,
            label: descriptor.label.clone(),
        }
    }

    pub fn field_ref(&self) -> FieldRef<'_> {
        FieldRef {
            id: &self.id,
            name: &self.name,
            field_type: self.field_type,
        }
    }
}

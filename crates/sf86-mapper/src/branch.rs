// crates/sf86-mapper/src/branch.rs

//! Optional sub-records and repeating entry groups.
//!
//! Both are resolved in full when the section is created, so a catalog drift
//! fails at construction instead of on the first edit. Only the active parts
//! are flattened.

use crate::error::MapperError;
use crate::flatten::{FieldTree, FlatFieldMap};
use crate::types::{FieldRef, SectionNumber};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// An optional sub-record, e.g. an APO/FPO address that only applies when a
/// radio answer selects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch<T> {
    template: T,
    active: Option<T>,
}

impl<T: Clone> Branch<T> {
    /// Creates an inactive branch from its pre-resolved default.
    pub fn new(template: T) -> Self {
        Self {
            template,
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Activates the branch with default values if it is not active yet.
    pub fn enable(&mut self) -> &mut T {
        self.active.get_or_insert_with(|| self.template.clone())
    }

    /// Deactivates the branch, discarding its values.
    pub fn disable(&mut self) {
        self.active = None;
    }

    pub fn set_active(&mut self, active: bool) {
        if active {
            self.enable();
        } else {
            self.disable();
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.active.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.active.as_mut()
    }

    /// Mutable access for an update addressed at `path`.
    ///
    /// # Errors
    /// `BranchInactive` when the branch is not active.
    pub fn active_mut(&mut self, section: SectionNumber, path: &str) -> Result<&mut T, MapperError> {
        self.active.as_mut().ok_or_else(|| MapperError::BranchInactive {
            section,
            path: path.into(),
        })
    }
}

impl<T: FieldTree> FieldTree for Branch<T> {
    fn flatten_into(&self, out: &mut FlatFieldMap) {
        self.active.flatten_into(out);
    }

    fn for_each_binding(&self, visit: &mut dyn FnMut(FieldRef<'_>)) {
        self.template.for_each_binding(visit);
    }
}

/// A repeating group (residences, other names, ...) backed by a fixed number
/// of catalog slots.
///
/// Entry `i` always uses slot `i`. Entries are added and removed at the end
/// only, so no entry is ever renumbered onto another slot's widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entries<T> {
    section: SectionNumber,
    slots: Vec<T>,
    entries: Vec<T>,
}

impl<T: Clone> Entries<T> {
    /// Creates the group with the first `initial` slots in use.
    pub fn new(section: SectionNumber, slots: Vec<T>, initial: usize) -> Self {
        let entries = slots.iter().take(initial).cloned().collect();
        Self {
            section,
            slots,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of catalog slots, the maximum number of entries.
    pub fn limit(&self) -> usize {
        self.slots.len()
    }

    /// Adds an entry in the next free slot.
    ///
    /// # Errors
    /// `EntryLimitExceeded` when every slot is in use.
    pub fn push(&mut self) -> Result<&mut T, MapperError> {
        let next = self.entries.len();
        let template = self
            .slots
            .get(next)
            .ok_or(MapperError::EntryLimitExceeded {
                section: self.section,
                limit: self.slots.len(),
            })?
            .clone();
        self.entries.push(template);
        Ok(&mut self.entries[next])
    }

    /// Removes the last entry, freeing its slot.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    /// Mutable access to an existing entry.
    ///
    /// # Errors
    /// `EntryIndexOutOfRange` when `index` does not address an entry.
    pub fn entry_mut(&mut self, index: usize) -> Result<&mut T, MapperError> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or(MapperError::EntryIndexOutOfRange {
                section: self.section,
                index,
                len,
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut()
    }
}

impl<T: FieldTree> FieldTree for Entries<T> {
    fn flatten_into(&self, out: &mut FlatFieldMap) {
        self.entries.flatten_into(out);
    }

    fn for_each_binding(&self, visit: &mut dyn FnMut(FieldRef<'_>)) {
        self.slots.for_each_binding(visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::FieldNode;
    use crate::types::{FieldDescriptor, FieldType, FieldValue, Rect};
    use alloc::string::{String, ToString};
    use alloc::vec;

    const S11: SectionNumber = SectionNumber::from_const(11);

    fn node(id: &str) -> FieldNode<String> {
        FieldNode::bind(
            &FieldDescriptor {
                id: id.to_string(),
                name: alloc::format!("form1[0].Section11[0].TextField11[{}]", id),
                field_type: FieldType::Text,
                label: String::new(),
                rect: Rect::default(),
                page: None,
                options: Vec::new(),
            },
            String::new(),
        )
    }

    #[test]
    fn test_inactive_branch_is_omitted() {
        let mut branch = Branch::new(node("7"));
        assert!(branch.flatten().is_empty());
        assert_eq!(branch.bound_ids().len(), 1);
        assert!(matches!(
            branch.active_mut(S11, "apoFpoAddress.street"),
            Err(MapperError::BranchInactive { .. })
        ));

        branch.enable().value = "PSC 1234".to_string();
        assert_eq!(branch.flatten()["7"], FieldValue::from("PSC 1234"));

        branch.disable();
        assert!(branch.flatten().is_empty());
        // Re-enabling starts from the defaults again.
        assert_eq!(branch.enable().value, "");
    }

    #[test]
    fn test_entries_fill_slots_in_order() {
        let mut entries = Entries::new(S11, vec![node("1"), node("2"), node("3")], 1);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.limit(), 3);

        entries.push().unwrap().value = "second".to_string();
        entries.push().unwrap();
        assert!(matches!(
            entries.push(),
            Err(MapperError::EntryLimitExceeded { limit: 3, .. })
        ));

        let flat = entries.flatten();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat["2"], FieldValue::from("second"));

        entries.pop();
        assert!(!entries.flatten().contains_key("3"));
        assert_eq!(entries.bound_ids().len(), 3);
    }

    #[test]
    fn test_entry_index_out_of_range() {
        let mut entries = Entries::new(S11, vec![node("1"), node("2")], 1);
        assert!(entries.entry_mut(0).is_ok());
        assert!(matches!(
            entries.entry_mut(1),
            Err(MapperError::EntryIndexOutOfRange { index: 1, len: 1, .. })
        ));
    }
}

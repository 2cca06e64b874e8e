// crates/sf86-mapper/src/catalog.rs

//! The read-only reference catalogs that anchor every field node to a PDF field.

use crate::error::MapperError;
use crate::log::{SectionLog, ctx_warn};
use crate::path::split_final_index;
use crate::types::{FieldDescriptor, FieldType, SectionNumber};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Bound;

/// The immutable list of field descriptors scraped from one section's PDF layout.
#[derive(Debug, Clone)]
pub struct SectionCatalog {
    section: SectionNumber,
    by_name: BTreeMap<String, FieldDescriptor>,
    name_by_id: BTreeMap<String, String>,
}

impl SectionCatalog {
    /// Builds a catalog from already-resolved descriptors.
    ///
    /// # Errors
    /// Returns `DuplicateField` or `DuplicateFieldId` if a name or id repeats.
    pub fn from_descriptors(
        section: SectionNumber,
        descriptors: impl IntoIterator<Item = FieldDescriptor>,
    ) -> Result<Self, MapperError> {
        let mut by_name = BTreeMap::new();
        let mut name_by_id = BTreeMap::new();

        for descriptor in descriptors {
            if by_name.contains_key(&descriptor.name) {
                return Err(MapperError::DuplicateField {
                    section,
                    name: descriptor.name,
                });
            }
            if name_by_id.contains_key(&descriptor.id) {
                return Err(MapperError::DuplicateFieldId {
                    section,
                    id: descriptor.id,
                });
            }
            name_by_id.insert(descriptor.id.clone(), descriptor.name.clone());
            by_name.insert(descriptor.name.clone(), descriptor);
        }

        Ok(Self {
            section,
            by_name,
            name_by_id,
        })
    }

    pub fn section(&self) -> SectionNumber {
        self.section
    }

    /// Looks up the descriptor whose name equals `name` exactly.
    ///
    /// # Errors
    /// Returns `FieldNotFound` naming the section, the attempted name and the
    /// bracket indices that do exist for the same path.
    pub fn lookup(&self, name: &str) -> Result<&FieldDescriptor, MapperError> {
        self.by_name.get(name).ok_or_else(|| {
            let valid_indices = self.sibling_indices(name);
            ctx_warn!(
                SectionLog::new(self.section, "catalog"),
                "Field not found: {} (valid indices: {:?})",
                name,
                valid_indices
            );
            MapperError::FieldNotFound {
                section: self.section,
                name: name.into(),
                valid_indices,
            }
        })
    }

    /// Non-failing variant of [`lookup`](Self::lookup).
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Looks up a descriptor by its catalog id.
    pub fn lookup_id(&self, id: &str) -> Result<&FieldDescriptor, MapperError> {
        self.name_by_id
            .get(id)
            .and_then(|name| self.by_name.get(name))
            .ok_or_else(|| MapperError::FieldIdNotFound {
                section: self.section,
                id: id.into(),
            })
    }

    /// Number of fields in the catalog.
    pub fn count_fields(&self) -> usize {
        self.by_name.len()
    }

    /// Fails with `FieldCountMismatch` unless the catalog holds exactly `expected` fields.
    pub fn expect_field_count(&self, expected: usize) -> Result<(), MapperError> {
        let actual = self.count_fields();
        if actual != expected {
            return Err(MapperError::FieldCountMismatch {
                section: self.section,
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Iterates over all descriptors in name order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.by_name.values()
    }

    pub fn fields_of_type(&self, field_type: FieldType) -> impl Iterator<Item = &FieldDescriptor> {
        self.iter().filter(move |d| d.field_type == field_type)
    }

    /// Returns the sorted bracket indices of every catalog field that shares
    /// `name`'s path up to its final index.
    ///
    /// For `form1[0].Sections1-6[0].TextField11[99]` this lists the indices of
    /// all `TextField11` widgets in that subform. Names without a final index
    /// yield an empty list.
    pub fn sibling_indices(&self, name: &str) -> Vec<u32> {
        let Some((prefix, _)) = split_final_index(name) else {
            return Vec::new();
        };
        let start = format!("{}[", prefix);

        let mut indices: Vec<u32> = self
            .by_name
            .range::<str, _>((Bound::Included(start.as_str()), Bound::Unbounded))
            .take_while(|(candidate, _)| candidate.starts_with(start.as_str()))
            .filter_map(|(candidate, _)| split_final_index(candidate))
            .filter(|(candidate_prefix, _)| *candidate_prefix == prefix)
            .map(|(_, index)| index)
            .collect();
        indices.sort_unstable();
        indices
    }
}

/// The explicitly constructed set of per-section catalogs injected into the mapper.
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    catalogs: BTreeMap<SectionNumber, SectionCatalog>,
}

impl CatalogSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a catalog, returning the one it replaces for the same section.
    pub fn insert(&mut self, catalog: SectionCatalog) -> Option<SectionCatalog> {
        self.catalogs.insert(catalog.section(), catalog)
    }

    pub fn get(&self, section: SectionNumber) -> Option<&SectionCatalog> {
        self.catalogs.get(&section)
    }

    /// Returns the catalog of `section` or `CatalogNotLoaded`.
    pub fn catalog(&self, section: SectionNumber) -> Result<&SectionCatalog, MapperError> {
        self.get(section)
            .ok_or(MapperError::CatalogNotLoaded { section })
    }

    /// Looks up `name` in the catalog of `section`.
    pub fn lookup(
        &self,
        section: SectionNumber,
        name: &str,
    ) -> Result<&FieldDescriptor, MapperError> {
        self.catalog(section)?.lookup(name)
    }

    pub fn count_fields(&self, section: SectionNumber) -> Result<usize, MapperError> {
        Ok(self.catalog(section)?.count_fields())
    }

    /// Sections with a loaded catalog, ascending.
    pub fn sections(&self) -> impl Iterator<Item = SectionNumber> + '_ {
        self.catalogs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

impl FromIterator<SectionCatalog> for CatalogSet {
    fn from_iter<I: IntoIterator<Item = SectionCatalog>>(iter: I) -> Self {
        let mut set = CatalogSet::new();
        for catalog in iter {
            set.insert(catalog);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rect;
    use alloc::string::ToString;
    use alloc::vec;

    const S1: SectionNumber = SectionNumber::from_const(1);

    fn descriptor(id: &str, name: &str, field_type: FieldType) -> FieldDescriptor {
        FieldDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            field_type,
            label: String::new(),
            rect: Rect::default(),
            page: None,
            options: Vec::new(),
        }
    }

    fn sample() -> SectionCatalog {
        SectionCatalog::from_descriptors(
            S1,
            vec![
                descriptor("10 0 R", "form1[0].Sections1-6[0].TextField11[0]", FieldType::Text),
                descriptor("11 0 R", "form1[0].Sections1-6[0].TextField11[1]", FieldType::Text),
                descriptor("12 0 R", "form1[0].Sections1-6[0].TextField11[2]", FieldType::Text),
                descriptor("13 0 R", "form1[0].Sections1-6[0].TextField11[2].sub[0]", FieldType::Text),
                descriptor("14 0 R", "form1[0].Sections1-6[0].TextField110[0]", FieldType::Text),
                descriptor("15 0 R", "form1[0].Sections1-6[0].suffix[0]", FieldType::Dropdown),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_exact_match() {
        let catalog = sample();
        let d = catalog.lookup("form1[0].Sections1-6[0].TextField11[1]").unwrap();
        assert_eq!(d.id, "11 0 R");
        assert_eq!(catalog.lookup_id("15 0 R").unwrap().name, "form1[0].Sections1-6[0].suffix[0]");
        assert!(catalog.lookup_id("99 0 R").is_err());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let catalog = sample();
        assert!(catalog.lookup("form1[0].sections1-6[0].textfield11[1]").is_err());
    }

    #[test]
    fn test_lookup_miss_lists_sibling_indices() {
        let catalog = sample();
        let err = catalog
            .lookup("form1[0].Sections1-6[0].TextField11[13]")
            .unwrap_err();
        match err {
            MapperError::FieldNotFound {
                section,
                name,
                valid_indices,
            } => {
                assert_eq!(section, S1);
                assert_eq!(name, "form1[0].Sections1-6[0].TextField11[13]");
                // TextField110 and the nested sub[0] widget are not siblings.
                assert_eq!(valid_indices, vec![0, 1, 2]);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_count_and_type_filters() {
        let catalog = sample();
        assert_eq!(catalog.count_fields(), 6);
        assert!(catalog.expect_field_count(6).is_ok());
        assert!(matches!(
            catalog.expect_field_count(7),
            Err(MapperError::FieldCountMismatch { expected: 7, actual: 6, .. })
        ));
        assert_eq!(catalog.fields_of_type(FieldType::Dropdown).count(), 1);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = SectionCatalog::from_descriptors(
            S1,
            vec![
                descriptor("10 0 R", "form1[0].a[0]", FieldType::Text),
                descriptor("10 0 R", "form1[0].a[1]", FieldType::Text),
            ],
        );
        assert!(matches!(result, Err(MapperError::DuplicateFieldId { .. })));
    }

    #[test]
    fn test_catalog_set_unknown_section() {
        let set: CatalogSet = vec![sample()].into_iter().collect();
        assert_eq!(set.count_fields(S1).unwrap(), 6);
        let s2 = SectionNumber::from_const(2);
        assert!(matches!(
            set.lookup(s2, "form1[0].a[0]"),
            Err(MapperError::CatalogNotLoaded { .. })
        ));
    }
}

// crates/sf86-sections/src/form.rs

//! The whole questionnaire as stored between sessions.

use crate::catalogs::BUNDLED_SECTIONS;
use crate::validation::{Validate, ValidationReport};
use crate::{
    Section1, Section2, Section3, Section4, Section5, Section7, Section8, Section9, Section11,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sf86_mapper::{
    CatalogSet, FieldTree, FlatFieldMap, MapperError, SectionNumber, SectionSchema,
    create_default, flatten_json,
};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// All section states of one applicant, keyed `section1` ... `section30`.
///
/// Modeled sections are typed and `None` until started. Every other section
/// is kept as the untyped JSON tree the UI produced for it. Stored forms are
/// checked on load: a top-level key must name a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredForm", into = "StoredForm")]
pub struct ApplicantFormValues {
    pub section1: Option<Section1>,
    pub section2: Option<Section2>,
    pub section3: Option<Section3>,
    pub section4: Option<Section4>,
    pub section5: Option<Section5>,
    pub section7: Option<Section7>,
    pub section8: Option<Section8>,
    pub section9: Option<Section9>,
    pub section11: Option<Section11>,
    placeholders: BTreeMap<SectionNumber, Value>,
}

/// The storage shape of [`ApplicantFormValues`].
#[derive(Default, Serialize, Deserialize)]
struct StoredForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section1: Option<Section1>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section2: Option<Section2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section3: Option<Section3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section4: Option<Section4>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section5: Option<Section5>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section7: Option<Section7>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section8: Option<Section8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section9: Option<Section9>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section11: Option<Section11>,
    #[serde(flatten)]
    placeholders: BTreeMap<String, Value>,
}

impl TryFrom<StoredForm> for ApplicantFormValues {
    type Error = MapperError;

    fn try_from(stored: StoredForm) -> Result<Self, Self::Error> {
        let mut form = ApplicantFormValues {
            section1: stored.section1,
            section2: stored.section2,
            section3: stored.section3,
            section4: stored.section4,
            section5: stored.section5,
            section7: stored.section7,
            section8: stored.section8,
            section9: stored.section9,
            section11: stored.section11,
            placeholders: BTreeMap::new(),
        };
        for (key, state) in stored.placeholders {
            let section =
                SectionNumber::from_key(&key).ok_or(MapperError::UnknownSectionKey { key })?;
            form.set_placeholder(section, state)?;
        }
        Ok(form)
    }
}

impl From<ApplicantFormValues> for StoredForm {
    fn from(form: ApplicantFormValues) -> Self {
        StoredForm {
            section1: form.section1,
            section2: form.section2,
            section3: form.section3,
            section4: form.section4,
            section5: form.section5,
            section7: form.section7,
            section8: form.section8,
            section9: form.section9,
            section11: form.section11,
            placeholders: form
                .placeholders
                .into_iter()
                .map(|(section, state)| (section.key(), state))
                .collect(),
        }
    }
}

impl ApplicantFormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts every modeled section with its default state.
    pub fn with_defaults(catalogs: &CatalogSet) -> sf86_mapper::Result<Self> {
        Ok(Self {
            section1: Some(create_default(catalogs)?),
            section2: Some(create_default(catalogs)?),
            section3: Some(create_default(catalogs)?),
            section4: Some(create_default(catalogs)?),
            section5: Some(create_default(catalogs)?),
            section7: Some(create_default(catalogs)?),
            section8: Some(create_default(catalogs)?),
            section9: Some(create_default(catalogs)?),
            section11: Some(create_default(catalogs)?),
            placeholders: BTreeMap::new(),
        })
    }

    pub fn is_typed(section: SectionNumber) -> bool {
        BUNDLED_SECTIONS.contains(&section)
    }

    pub fn placeholder(&self, section: SectionNumber) -> Option<&Value> {
        self.placeholders.get(&section)
    }

    /// Stores the untyped state of a section without a schema, returning the
    /// previous one.
    ///
    /// # Errors
    /// `TypedSection` for a section that has a typed schema.
    pub fn set_placeholder(
        &mut self,
        section: SectionNumber,
        state: Value,
    ) -> sf86_mapper::Result<Option<Value>> {
        if Self::is_typed(section) {
            return Err(MapperError::TypedSection { section });
        }
        Ok(self.placeholders.insert(section, state))
    }

    pub fn remove_placeholder(&mut self, section: SectionNumber) -> Option<Value> {
        self.placeholders.remove(&section)
    }

    fn typed_sections(&self) -> [(SectionNumber, Option<&dyn FieldTree>); 9] {
        fn tree<S: SectionSchema>(state: &Option<S>) -> (SectionNumber, Option<&dyn FieldTree>) {
            (S::SECTION, state.as_ref().map(|s| s as &dyn FieldTree))
        }
        [
            tree(&self.section1),
            tree(&self.section2),
            tree(&self.section3),
            tree(&self.section4),
            tree(&self.section5),
            tree(&self.section7),
            tree(&self.section8),
            tree(&self.section9),
            tree(&self.section11),
        ]
    }

    /// Flattens every started section into one `{catalog id: value}` map for
    /// the PDF writer.
    ///
    /// # Errors
    /// `DuplicateFlatId` when two sections write the same catalog id. No
    /// section value is ever replaced by another one.
    pub fn flatten_all(&self) -> sf86_mapper::Result<FlatFieldMap> {
        let mut out = FlatFieldMap::new();
        for (section, state) in self.typed_sections() {
            if let Some(state) = state {
                merge_section(&mut out, section, state.flatten())?;
            }
        }
        for (&section, state) in &self.placeholders {
            merge_section(&mut out, section, flatten_json(state))?;
        }
        debug!("Flattened form into {} PDF field values", out.len());
        Ok(out)
    }
}

fn merge_section(
    out: &mut FlatFieldMap,
    section: SectionNumber,
    flat: FlatFieldMap,
) -> sf86_mapper::Result<()> {
    for (id, value) in flat {
        match out.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(slot) => {
                warn!(
                    "{} writes field id {} already written by another section",
                    section,
                    slot.key()
                );
                return Err(MapperError::DuplicateFlatId {
                    section,
                    id: slot.key().clone(),
                });
            }
        }
    }
    Ok(())
}

impl Validate for ApplicantFormValues {
    fn validate_into(&self, report: &mut ValidationReport) {
        self.section1.validate_into(report);
        self.section2.validate_into(report);
        self.section3.validate_into(report);
        self.section4.validate_into(report);
        self.section5.validate_into(report);
        self.section7.validate_into(report);
        self.section8.validate_into(report);
        self.section9.validate_into(report);
        self.section11.validate_into(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sf86_mapper::FieldValue;

    const S13: SectionNumber = SectionNumber::from_const(13);

    #[test]
    fn test_placeholder_sections_are_flattened() {
        let mut form = ApplicantFormValues::new();
        form.set_placeholder(
            S13,
            json!({ "employer": { "id": "12000 0 R", "value": "ACME" }, "gap": null }),
        )
        .unwrap();
        let flat = form.flatten_all().unwrap();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat["12000 0 R"], FieldValue::from("ACME"));
        assert!(form.placeholder(S13).is_some());
    }

    #[test]
    fn test_typed_section_rejects_placeholder() {
        let mut form = ApplicantFormValues::new();
        let err = form
            .set_placeholder(SectionNumber::from_const(8), json!({}))
            .unwrap_err();
        assert!(matches!(err, MapperError::TypedSection { .. }));
    }

    #[test]
    fn test_placeholders_never_share_ids() {
        let mut form = ApplicantFormValues::new();
        form.set_placeholder(S13, json!({ "employer": { "id": "12000 0 R", "value": "ACME" } }))
            .unwrap();
        form.set_placeholder(
            SectionNumber::from_const(14),
            json!({ "branch": { "id": "12000 0 R", "value": "Navy" } }),
        )
        .unwrap();

        let err = form.flatten_all().unwrap_err();
        assert!(matches!(
            err,
            MapperError::DuplicateFlatId { section, ref id }
                if section == SectionNumber::from_const(14) && id == "12000 0 R"
        ));
    }
}

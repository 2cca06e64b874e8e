// crates/sf86-mapper/src/model.rs

//! Internal `serde` data structures that map directly to the reference
//! catalog JSON produced by the PDF inspection step.
//!
//! These structs are deliberately permissive (every attribute defaults) so
//! that a missing attribute surfaces as a precise `MapperError` from the
//! resolver instead of an opaque deserializer message. They are not intended
//! for direct public use.

use alloc::string::String;
use alloc::vec::Vec;
use serde::Deserialize;

/// The root object of a `section-<N>.json` file.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogFile {
    #[serde(default)]
    pub metadata: Option<CatalogMetadata>,

    #[serde(default)]
    pub fields: Vec<CatalogField>,
}

/// Optional header block written by the inspection step.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CatalogMetadata {
    #[serde(default)]
    pub section_id: Option<u8>,

    #[serde(default)]
    pub section_name: Option<String>,

    #[serde(default)]
    pub total_fields: Option<usize>,
}

/// One field row as it appears in the JSON file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CatalogField {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub field_type: String,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub page: Option<u32>,

    #[serde(default)]
    pub rect: Option<CatalogRect>,

    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CatalogRect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

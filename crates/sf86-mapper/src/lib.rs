// crates/sf86-mapper/src/lib.rs

#![cfg_attr(not(feature = "std"), no_std)]
#![doc = "Maps SF-86 PDF form fields between their flat catalog namespace and"]
#![doc = "nested, typed section state."]
#![doc = ""]
#![doc = "This `no_std + alloc` library provides:"]
#![doc = "- `load_catalog_from_str`: parsing a section's reference field catalog."]
#![doc = "- `FieldMapper`: exact forward resolution from field name to field node."]
#![doc = "- `FieldTree`: reverse flattening from section state to `{id: value}`."]
#![doc = "- `SectionSchema`: the contract section schemas implement."]

extern crate alloc;

// --- Crate Modules ---

mod audit;
mod branch;
mod catalog;
#[cfg(feature = "std")]
mod config;
mod date;
mod error;
mod flatten;
mod log;
mod mapper;
mod model;
mod node;
mod parser;
mod path;
mod schema;
mod types;

// --- Public API Re-exports ---

pub use audit::{CoverageReport, FieldDistribution, TypeCoverage, field_distribution};
pub use branch::{Branch, Entries};
pub use catalog::{CatalogSet, SectionCatalog};
#[cfg(feature = "std")]
pub use config::{CatalogConfig, load_catalog_file};
pub use date::{
    DateBound, DateField, DatePart, DateRange, DateRangeNames, DateRangeSlots, KnownDate,
    RangePart,
};
pub use error::MapperError;
pub use flatten::{FieldTree, FlatFieldMap, flatten_json};
pub use crate::log::{LogMetadata, SectionLog};
pub use mapper::{FieldMapper, SectionMapper};
pub use node::{FieldNode, FieldNodeWithOptions, FieldSlot};
pub use parser::load_catalog_from_str;
pub use path::{FieldPath, PathSegment, split_final_index};
pub use schema::{
    FieldCell, FieldUpdate, ParseFieldKeyError, SectionSchema, create_default, flatten_fields,
    set_field, update_field,
};
pub use types::{
    FieldDescriptor, FieldRef, FieldType, FieldValue, Rect, SECTION_COUNT, SectionNumber,
    SectionNumberError,
};

/// Result type of every structural operation of the mapping core.
pub type Result<T> = core::result::Result<T, MapperError>;

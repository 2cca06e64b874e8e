// crates/sf86-mapper/src/error.rs

use crate::types::SectionNumber;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Structural errors raised while loading catalogs, resolving fields or
/// updating section state.
///
/// All of these indicate a code or data defect and are propagated, never
/// defaulted. Content problems in user-entered values are reported as data
/// by the validation layer instead.
#[derive(Debug)]
pub enum MapperError {
    /// An error from the underlying `serde_json` deserializer.
    CatalogParsing(serde_json::Error),

    /// An error while reading a catalog file.
    #[cfg(feature = "std")]
    Io(std::io::Error),

    /// No catalog was loaded for the requested section.
    CatalogNotLoaded { section: SectionNumber },

    /// The catalog file declares a different section than the one requested.
    SectionMismatch {
        expected: SectionNumber,
        found: u8,
    },

    /// Catalog lookup miss. `valid_indices` lists the bracket indices that do
    /// exist for the same field path, to aid debugging.
    FieldNotFound {
        section: SectionNumber,
        name: String,
        valid_indices: Vec<u32>,
    },

    /// Reverse lookup miss on a catalog id.
    FieldIdNotFound { section: SectionNumber, id: String },

    /// The number of fields in the catalog differs from the expected total.
    FieldCountMismatch {
        section: SectionNumber,
        expected: usize,
        actual: usize,
    },

    /// Two catalog rows share the same field name.
    DuplicateField { section: SectionNumber, name: String },

    /// Two catalog rows share the same id.
    DuplicateFieldId { section: SectionNumber, id: String },

    /// A required attribute of a catalog row was missing or empty.
    MissingAttribute {
        section: SectionNumber,
        row: usize,
        attribute: &'static str,
    },

    /// A catalog row carried a type tag that is not a known widget type.
    UnknownFieldType { name: String, tag: String },

    /// A field name does not follow the dotted/bracketed path grammar.
    MalformedFieldName { name: String, reason: &'static str },

    /// An update path does not name a field of the section schema.
    UnknownFieldPath { section: SectionNumber, path: String },

    /// The update value kind does not fit the target field.
    ValueTypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// An update targeted a field inside an optional branch that is not active.
    BranchInactive { section: SectionNumber, path: String },

    /// An update index does not address an existing entry.
    EntryIndexOutOfRange {
        section: SectionNumber,
        index: usize,
        len: usize,
    },

    /// All catalog-backed entry slots of a repeating group are in use.
    EntryLimitExceeded { section: SectionNumber, limit: usize },

    /// Untyped placeholder data was supplied for a section that has a typed
    /// schema.
    TypedSection { section: SectionNumber },

    /// A stored form key is not `section1` ... `section30`.
    UnknownSectionKey { key: String },

    /// Two sections of one form flatten onto the same catalog id. `section`
    /// is the one that came second.
    DuplicateFlatId { section: SectionNumber, id: String },
}

impl From<serde_json::Error> for MapperError {
    fn from(e: serde_json::Error) -> Self {
        MapperError::CatalogParsing(e)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for MapperError {
    fn from(e: std::io::Error) -> Self {
        MapperError::Io(e)
    }
}

impl fmt::Display for MapperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapperError::CatalogParsing(e) => write!(f, "Catalog parsing error: {}", e),
            #[cfg(feature = "std")]
            MapperError::Io(e) => write!(f, "Catalog I/O error: {}", e),
            MapperError::CatalogNotLoaded { section } => {
                write!(f, "No reference catalog loaded for {}", section)
            }
            MapperError::SectionMismatch { expected, found } => write!(
                f,
                "Catalog declares section {} but was loaded as {}",
                found, expected
            ),
            MapperError::FieldNotFound {
                section,
                name,
                valid_indices,
            } => {
                write!(f, "Field not found in {}: {}", section, name)?;
                if !valid_indices.is_empty() {
                    write!(f, " (valid indices: {:?})", valid_indices)?;
                }
                Ok(())
            }
            MapperError::FieldIdNotFound { section, id } => {
                write!(f, "Field id not found in {}: {}", section, id)
            }
            MapperError::FieldCountMismatch {
                section,
                expected,
                actual,
            } => write!(
                f,
                "Field count mismatch for {}: expected {} fields but the catalog has {}",
                section, expected, actual
            ),
            MapperError::DuplicateField { section, name } => {
                write!(f, "Duplicate field name in {}: {}", section, name)
            }
            MapperError::DuplicateFieldId { section, id } => {
                write!(f, "Duplicate field id in {}: {}", section, id)
            }
            MapperError::MissingAttribute {
                section,
                row,
                attribute,
            } => write!(
                f,
                "Missing required attribute '{}' on row {} of {}",
                attribute, row, section
            ),
            MapperError::UnknownFieldType { name, tag } => {
                write!(f, "Unknown field type '{}' for field {}", tag, name)
            }
            MapperError::MalformedFieldName { name, reason } => {
                write!(f, "Malformed field name '{}': {}", name, reason)
            }
            MapperError::UnknownFieldPath { section, path } => {
                write!(f, "Unknown field path for {}: {}", section, path)
            }
            MapperError::ValueTypeMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "Value type mismatch for {}: expected {} value but got {}",
                name, expected, found
            ),
            MapperError::BranchInactive { section, path } => write!(
                f,
                "Field {} of {} belongs to an inactive branch",
                path, section
            ),
            MapperError::EntryIndexOutOfRange {
                section,
                index,
                len,
            } => write!(
                f,
                "Entry index {} out of range for {} ({} entries)",
                index, section, len
            ),
            MapperError::EntryLimitExceeded { section, limit } => write!(
                f,
                "All {} entry slots of {} are in use",
                limit, section
            ),
            MapperError::TypedSection { section } => write!(
                f,
                "{} has a typed schema and cannot be stored as a placeholder",
                section
            ),
            MapperError::UnknownSectionKey { key } => {
                write!(f, "'{}' is not a section key", key)
            }
            MapperError::DuplicateFlatId { section, id } => write!(
                f,
                "Field id {} of {} was already written by another section",
                id, section
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MapperError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapperError::CatalogParsing(e) => Some(e),
            MapperError::Io(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MapperError;
    use crate::types::SectionNumber;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u8>("not json").unwrap_err();
        let err: MapperError = json_err.into();
        assert!(matches!(err, MapperError::CatalogParsing(_)));
    }

    #[test]
    fn test_field_not_found_display_names_section_and_field() {
        let err = MapperError::FieldNotFound {
            section: SectionNumber::from_const(7),
            name: "form1[0].NotARealField[0]".to_string(),
            valid_indices: vec![],
        };
        let msg = err.to_string();
        assert!(msg.contains("section 7"));
        assert!(msg.contains("form1[0].NotARealField[0]"));
        assert!(!msg.contains("valid indices"));
    }

    #[test]
    fn test_field_not_found_display_lists_indices() {
        let err = MapperError::FieldNotFound {
            section: SectionNumber::from_const(1),
            name: "form1[0].Sections1-6[0].TextField11[9]".to_string(),
            valid_indices: vec![0, 1, 2],
        };
        assert!(err.to_string().ends_with("(valid indices: [0, 1, 2])"));
    }

    #[test]
    fn test_duplicate_flat_id_display() {
        let err = MapperError::DuplicateFlatId {
            section: SectionNumber::from_const(13),
            id: "9449 0 R".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("9449 0 R"));
        assert!(msg.contains("section 13"));
    }
}

// crates/sf86-mapper/src/parser.rs

use crate::catalog::SectionCatalog;
use crate::error::MapperError;
use crate::log::{SectionLog, ctx_debug, ctx_info};
use crate::model::{self, CatalogField};
use crate::path::FieldPath;
use crate::types::{FieldDescriptor, FieldType, Rect, SectionNumber};
use alloc::string::String;
use alloc::vec::Vec;

/// Parses a reference catalog JSON string for one section.
///
/// # Arguments
/// * `section` - The section the catalog belongs to.
/// * `json` - The full contents of a `section-<N>.json` file.
///
/// # Errors
/// Returns a `MapperError` if the JSON is malformed, a row lacks its `id` or
/// `name`, a type tag is unknown, a name is not a valid field path, names or
/// ids repeat, or the declared `totalFields` disagrees with the rows.
pub fn load_catalog_from_str(
    section: SectionNumber,
    json: &str,
) -> Result<SectionCatalog, MapperError> {
    // 1. Deserialize the raw JSON into the internal model.
    let file: model::CatalogFile = serde_json::from_str(json)?;
    let ctx = SectionLog::new(section, "catalog");

    // 2. Cross-check the header block, when present.
    if let Some(metadata) = &file.metadata {
        if let Some(found) = metadata.section_id {
            if found != section.get() {
                return Err(MapperError::SectionMismatch {
                    expected: section,
                    found,
                });
            }
        }
        if let Some(expected) = metadata.total_fields {
            if expected != file.fields.len() {
                return Err(MapperError::FieldCountMismatch {
                    section,
                    expected,
                    actual: file.fields.len(),
                });
            }
        }
        if let Some(name) = &metadata.section_name {
            ctx_debug!(ctx, "Loading catalog '{}'", name);
        }
    }

    // 3. Resolve every row into a public descriptor.
    let descriptors = file
        .fields
        .into_iter()
        .enumerate()
        .map(|(row, field)| resolve_field(section, row, field))
        .collect::<Result<Vec<_>, _>>()?;

    let catalog = SectionCatalog::from_descriptors(section, descriptors)?;
    ctx_info!(ctx, "Loaded {} fields", catalog.count_fields());
    Ok(catalog)
}

/// Resolves one raw catalog row into a `FieldDescriptor`.
fn resolve_field(
    section: SectionNumber,
    row: usize,
    field: CatalogField,
) -> Result<FieldDescriptor, MapperError> {
    let id = required(section, row, "id", field.id)?;
    let name = required(section, row, "name", field.name)?;

    // Names are validated once here so later path handling can rely on them.
    FieldPath::parse(&name)?;

    let field_type =
        FieldType::from_tag(&field.field_type).ok_or_else(|| MapperError::UnknownFieldType {
            name: name.clone(),
            tag: field.field_type.clone(),
        })?;

    let rect = field
        .rect
        .map(|r| Rect {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        })
        .unwrap_or_default();

    Ok(FieldDescriptor {
        id,
        name,
        field_type,
        label: field.label.unwrap_or_default(),
        rect,
        page: field.page,
        options: field.options,
    })
}

fn required(
    section: SectionNumber,
    row: usize,
    attribute: &'static str,
    value: String,
) -> Result<String, MapperError> {
    if value.trim().is_empty() {
        return Err(MapperError::MissingAttribute {
            section,
            row,
            attribute,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const S1: SectionNumber = SectionNumber::from_const(1);

    #[test]
    fn test_load_minimal_catalog() {
        let json = r#"{
            "metadata": { "sectionId": 1, "sectionName": "Full Name", "totalFields": 2 },
            "fields": [
                { "id": "9449 0 R", "name": "form1[0].Sections1-6[0].TextField11[0]",
                  "type": "PDFTextField", "label": "Last name", "page": 5,
                  "rect": { "x": 36.0, "y": 700.5, "width": 180.0, "height": 14.0 } },
                { "id": "9446 0 R", "name": "form1[0].Sections1-6[0].suffix[0]",
                  "type": "PDFDropdown", "options": ["Jr", "Sr"] }
            ]
        }"#;
        let catalog = load_catalog_from_str(S1, json).unwrap();
        assert_eq!(catalog.count_fields(), 2);

        let last = catalog.lookup("form1[0].Sections1-6[0].TextField11[0]").unwrap();
        assert_eq!(last.id, "9449 0 R");
        assert_eq!(last.field_type, FieldType::Text);
        assert_eq!(last.label, "Last name");
        assert_eq!(last.page, Some(5));
        assert_eq!(last.rect.height, 14.0);

        let suffix = catalog.lookup_id("9446 0 R").unwrap();
        assert_eq!(suffix.field_type, FieldType::Dropdown);
        assert_eq!(suffix.options, ["Jr", "Sr"]);
        assert_eq!(suffix.label, "");
    }

    #[test]
    fn test_malformed_json() {
        let result = load_catalog_from_str(S1, r#"{ "fields": [ { "id": "#);
        assert!(matches!(result, Err(MapperError::CatalogParsing(_))));
    }

    #[test]
    fn test_missing_id_is_reported_with_row() {
        let json = r#"{ "fields": [
            { "id": "1 0 R", "name": "form1[0].a[0]", "type": "text" },
            { "name": "form1[0].a[1]", "type": "text" }
        ] }"#;
        let result = load_catalog_from_str(S1, json);
        assert!(matches!(
            result,
            Err(MapperError::MissingAttribute { row: 1, attribute: "id", .. })
        ));
    }

    #[test]
    fn test_unknown_type_tag() {
        let json = r#"{ "fields": [ { "id": "1 0 R", "name": "form1[0].sig[0]", "type": "PDFSignature" } ] }"#;
        let result = load_catalog_from_str(S1, json);
        assert!(matches!(result, Err(MapperError::UnknownFieldType { .. })));
    }

    #[test]
    fn test_declared_total_mismatch() {
        let json = r#"{ "metadata": { "totalFields": 3 },
            "fields": [ { "id": "1 0 R", "name": "form1[0].a[0]", "type": "text" } ] }"#;
        let result = load_catalog_from_str(S1, json);
        assert!(matches!(
            result,
            Err(MapperError::FieldCountMismatch { expected: 3, actual: 1, .. })
        ));
    }

    #[test]
    fn test_section_mismatch() {
        let json = r#"{ "metadata": { "sectionId": 2 }, "fields": [] }"#;
        let result = load_catalog_from_str(S1, json);
        assert!(matches!(result, Err(MapperError::SectionMismatch { found: 2, .. })));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let json = r#"{ "fields": [
            { "id": "1 0 R", "name": "form1[0].a[0]", "type": "text" },
            { "id": "2 0 R", "name": "form1[0].a[0]", "type": "text" }
        ] }"#;
        let result = load_catalog_from_str(S1, json);
        assert!(matches!(result, Err(MapperError::DuplicateField { .. })));
    }
}

//! Integration tests focused on error handling and edge cases.
//!
//! These tests ensure catalog loading reports structural defects as precise
//! errors, without panicking.

use sf86_mapper::{MapperError, SectionNumber, load_catalog_from_str};

const S5: SectionNumber = SectionNumber::from_const(5);

#[test]
fn test_empty_document_is_an_empty_catalog() {
    let catalog = load_catalog_from_str(S5, "{}").unwrap();
    assert_eq!(catalog.count_fields(), 0);
}

#[test]
fn test_not_json() {
    let result = load_catalog_from_str(S5, "<fields/>");
    assert!(matches!(result, Err(MapperError::CatalogParsing(_))));
}

#[test]
fn test_duplicate_name() {
    let json = r#"{ "fields": [
        { "id": "1 0 R", "name": "form1[0].Section5[0].TextField11[0]", "type": "text" },
        { "id": "2 0 R", "name": "form1[0].Section5[0].TextField11[0]", "type": "text" }
    ] }"#;
    match load_catalog_from_str(S5, json) {
        Err(MapperError::DuplicateField { section, name }) => {
            assert_eq!(section, S5);
            assert_eq!(name, "form1[0].Section5[0].TextField11[0]");
        }
        other => panic!("expected DuplicateField, got {:?}", other),
    }
}

#[test]
fn test_blank_name() {
    let json = r#"{ "fields": [ { "id": "1 0 R", "name": "  ", "type": "text" } ] }"#;
    assert!(matches!(
        load_catalog_from_str(S5, json),
        Err(MapperError::MissingAttribute { row: 0, attribute: "name", .. })
    ));
}

#[test]
fn test_malformed_names() {
    for name in [
        "form1[0]..TextField11[0]",
        "form1[0].TextField11[x]",
        "form1[0].TextField11[0",
        r"form1[0].TextField11\",
    ] {
        let json = serde_json::json!({
            "fields": [ { "id": "1 0 R", "name": name, "type": "text" } ]
        })
        .to_string();
        let result = load_catalog_from_str(S5, &json);
        assert!(
            matches!(result, Err(MapperError::MalformedFieldName { .. })),
            "{} was accepted",
            name
        );
    }
}

#[test]
fn test_wrong_value_types_in_row() {
    let json = r#"{ "fields": [ { "id": 12, "name": "form1[0].a[0]", "type": "text" } ] }"#;
    assert!(matches!(
        load_catalog_from_str(S5, json),
        Err(MapperError::CatalogParsing(_))
    ));
}

#[test]
fn test_section_numbers_are_bounded() {
    assert!(SectionNumber::try_from(0u8).is_err());
    assert!(SectionNumber::try_from(31u8).is_err());
    assert_eq!(SectionNumber::try_from(30u8).unwrap().key(), "section30");
}

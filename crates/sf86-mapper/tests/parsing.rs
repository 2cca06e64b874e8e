// crates/sf86-mapper/tests/parsing.rs

use sf86_mapper::{
    CatalogSet, CoverageReport, DateField, FieldMapper, FieldPath, FieldTree, FieldType,
    FieldValue, MapperError, SectionNumber, field_distribution, field_tree, load_catalog_from_str,
};
use std::fs;
use std::path::PathBuf;

const S9: SectionNumber = SectionNumber::from_const(9);

/// Helper function to load a test file from the `tests/data/` directory.
fn load_test_file(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);

    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test file {:?}: {}", path, e))
}

fn catalogs() -> CatalogSet {
    let _ = env_logger::builder().is_test(true).try_init();
    let json = load_test_file("section-9.json");
    let catalog = load_catalog_from_str(S9, &json).expect("Failed to parse section 9 catalog");
    [catalog].into_iter().collect()
}

#[test]
fn test_load_catalog_with_escaped_names() {
    let set = catalogs();
    let catalog = set.get(S9).unwrap();
    assert_eq!(catalog.count_fields(), 8);

    // The escaped periods are part of the exact name.
    let cert = catalog
        .lookup(r"form1[0].Section9\.1-9\.4[0].TextField11[0]")
        .unwrap();
    assert_eq!(cert.id, "9620 0 R");
    assert_eq!(cert.page, Some(6));
    assert!(catalog.lookup("form1[0].Section9.1-9.4[0].TextField11[0]").is_err());

    let path = FieldPath::parse(&cert.name).unwrap();
    assert_eq!(path.subform().unwrap().name, "Section9.1-9.4");
    assert_eq!(path.to_string(), cert.name);

    let status = catalog.lookup_id("9626 0 R").unwrap();
    assert_eq!(status.field_type, FieldType::Radio);
    assert_eq!(status.options.len(), 4);
}

/// Every catalog name resolves to a node carrying the catalog id and the
/// given value.
#[test]
fn test_forward_resolution_for_every_catalog_field() {
    let set = catalogs();
    let mapper = FieldMapper::new(&set);
    for descriptor in set.get(S9).unwrap().iter() {
        let node = mapper
            .resolve(S9, &descriptor.name, "probe".to_string())
            .unwrap();
        assert_eq!(node.id, descriptor.id);
        assert_eq!(node.value, "probe");
    }
}

#[test]
fn test_not_found_names_section_field_and_siblings() {
    let set = catalogs();
    let mapper = FieldMapper::new(&set);

    let err = mapper
        .resolve(S9, "form1[0].NotARealField[0]", String::new())
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("section 9"), "{}", msg);
    assert!(msg.contains("form1[0].NotARealField[0]"), "{}", msg);

    match mapper.resolve(S9, r"form1[0].Section9\.1-9\.4[0].TextField11[7]", false) {
        Err(MapperError::FieldNotFound { valid_indices, .. }) => {
            assert_eq!(valid_indices, vec![0, 1, 2, 3]);
        }
        other => panic!("expected FieldNotFound, got {:?}", other),
    }
}

struct Naturalization {
    status: sf86_mapper::FieldNodeWithOptions<String>,
    certificate: sf86_mapper::FieldNode<String>,
    issued: DateField,
}
field_tree!(Naturalization { status, certificate, issued });

#[test]
fn test_flatten_and_coverage_of_partial_schema() {
    let set = catalogs();
    let mapper = FieldMapper::new(&set).section(S9).unwrap();
    let mut state = Naturalization {
        status: mapper
            .resolve_with_options("form1[0].Sections7-9[0].RadioButtonList[1]", "1".into(), vec![])
            .unwrap(),
        certificate: mapper
            .text(r"form1[0].Section9\.1-9\.4[0].TextField11[0]")
            .unwrap(),
        issued: mapper
            .date(
                r"form1[0].Section9\.1-9\.4[0].From_Datefield_Name_2[0]",
                r"form1[0].Section9\.1-9\.4[0].#field[2]",
            )
            .unwrap(),
    };
    assert_eq!(state.status.options, ["1", "2", "3", "4"]);

    state.certificate.value = "A1234567".into();
    state.issued.estimated.value = true;

    let flat = state.flatten();
    assert_eq!(flat.len(), 4);
    assert_eq!(flat["9620 0 R"], FieldValue::from("A1234567"));
    assert_eq!(flat["9615 0 R"], FieldValue::Flag(true));
    assert_eq!(
        serde_json::to_value(&flat).unwrap(),
        serde_json::json!({
            "9626 0 R": "1",
            "9620 0 R": "A1234567",
            "9616 0 R": "",
            "9615 0 R": true
        })
    );

    let report = CoverageReport::build(set.get(S9).unwrap(), &state);
    assert_eq!(report.total, 8);
    assert_eq!(report.bound, 4);
    assert_eq!(report.unbound.len(), 4);
    assert!(report.dangling.is_empty());

    let distribution = field_distribution(set.get(S9).unwrap());
    assert_eq!(distribution.by_subform["Section9.1-9.4"], 7);
    assert_eq!(distribution.by_widget["TextField11"], 4);
}

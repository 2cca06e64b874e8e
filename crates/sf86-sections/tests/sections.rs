// crates/sf86-sections/tests/sections.rs

use serde_json::Value;
use sf86_mapper::{
    CatalogSet, CoverageReport, FieldMapper, FieldTree, FieldUpdate, FieldValue, MapperError,
    SectionNumber, SectionSchema, load_catalog_from_str,
};
use sf86_sections::{
    BUNDLED_SECTIONS, Section1, Section2, Section3, Section4, Section5, Section7, Section8,
    Section9, Section11, Validate, section1, section5, section9, section11,
};
use std::fmt::Debug;

fn catalogs() -> CatalogSet {
    let _ = env_logger::builder().is_test(true).try_init();
    sf86_sections::bundled().expect("bundled catalogs must load")
}

/// Checks the properties every section schema must have against its catalog.
fn check_schema<S>(catalogs: &CatalogSet)
where
    S: SectionSchema + Validate + PartialEq + Debug,
{
    let state = sf86_mapper::create_default::<S>(catalogs).unwrap();
    let catalog = catalogs.catalog(S::SECTION).unwrap();
    assert_eq!(catalog.count_fields(), S::EXPECTED_FIELD_COUNT);

    // Building twice from the same catalog gives the same state.
    let again = sf86_mapper::create_default::<S>(catalogs).unwrap();
    assert_eq!(state, again);

    // Every flattened key is a catalog id of this section, and resolving the
    // catalog name behind it with the flattened value gives back the same pair.
    let flat = sf86_mapper::flatten_fields(&state);
    assert!(!flat.is_empty());
    let mapper = FieldMapper::new(catalogs);
    for (id, value) in &flat {
        let descriptor = catalog
            .lookup_id(id)
            .unwrap_or_else(|_| panic!("{} is not in {}", id, S::SECTION));
        let node = mapper
            .resolve(S::SECTION, &descriptor.name, value.clone())
            .unwrap();
        assert_eq!(&node.id, id);
        assert_eq!(&node.value, value);
        let single = node.flatten();
        assert_eq!(single.len(), 1);
        assert_eq!(single.get(id), Some(value));
    }
    assert_eq!(sf86_mapper::flatten_fields(&state), flat);

    let coverage = CoverageReport::build(catalog, &state);
    assert!(
        coverage.is_complete(),
        "{}: unbound {:?}, dangling {:?}",
        S::SECTION,
        coverage.unbound,
        coverage.dangling
    );
    assert_eq!(coverage.bound, S::EXPECTED_FIELD_COUNT);

    let report = state.validate();
    assert!(report.is_valid(), "{}: {:?}", S::SECTION, report.errors);
}

#[test]
fn test_every_schema_matches_its_catalog() {
    let catalogs = catalogs();
    check_schema::<Section1>(&catalogs);
    check_schema::<Section2>(&catalogs);
    check_schema::<Section3>(&catalogs);
    check_schema::<Section4>(&catalogs);
    check_schema::<Section5>(&catalogs);
    check_schema::<Section7>(&catalogs);
    check_schema::<Section8>(&catalogs);
    check_schema::<Section9>(&catalogs);
    check_schema::<Section11>(&catalogs);
}

#[test]
fn test_every_catalog_name_resolves_to_its_id() {
    let catalogs = catalogs();
    let mapper = FieldMapper::new(&catalogs);
    for section in BUNDLED_SECTIONS {
        for descriptor in catalogs.catalog(section).unwrap().iter() {
            let node = mapper
                .resolve(section, &descriptor.name, String::new())
                .unwrap();
            assert_eq!(node.id, descriptor.id);
            assert_eq!(node.name, descriptor.name);
        }
    }
}

#[test]
fn test_not_found_names_section_and_field() {
    let catalogs = catalogs();
    let mapper = FieldMapper::new(&catalogs);
    let err = mapper
        .resolve(
            SectionNumber::from_const(7),
            "form1[0].NotARealField[0]",
            String::new(),
        )
        .unwrap_err();
    assert!(matches!(&err, MapperError::FieldNotFound { name, .. } if name == "form1[0].NotARealField[0]"));
    let message = err.to_string();
    assert!(message.contains("section 7"));
    assert!(message.contains("form1[0].NotARealField[0]"));
}

#[test]
fn test_missing_catalog_is_reported() {
    let err = section1::create_default(&CatalogSet::new()).unwrap_err();
    assert!(matches!(err, MapperError::CatalogNotLoaded { .. }));
}

#[test]
fn test_catalog_drift_fails_field_count() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut doc: Value =
        serde_json::from_str(include_str!("../references/section-1.json")).unwrap();
    // Drop the header too, or the loader itself rejects the row count.
    doc.as_object_mut().unwrap().remove("metadata");
    doc["fields"].as_array_mut().unwrap().pop();
    let section = SectionNumber::from_const(1);
    let catalog = load_catalog_from_str(section, &doc.to_string()).unwrap();
    let catalogs: CatalogSet = [catalog].into_iter().collect();

    let err = section1::create_default(&catalogs).unwrap_err();
    assert!(matches!(
        err,
        MapperError::FieldCountMismatch { expected: 4, actual: 3, .. }
    ));
}

#[test]
fn test_last_name_reaches_pdf_id() {
    let catalogs = catalogs();
    let mut state = section1::create_default(&catalogs).unwrap();
    section1::update_field(&mut state, FieldUpdate::new("section1.lastName", "Smith")).unwrap();

    let flat = section1::flatten_fields(&state);
    assert_eq!(flat["9449 0 R"], FieldValue::from("Smith"));
}

#[test]
fn test_rejected_updates_leave_state_unchanged() {
    let catalogs = catalogs();
    let mut state = section1::create_default(&catalogs).unwrap();
    let before = state.clone();

    let err = section1::update_field(&mut state, FieldUpdate::new("lastName", true)).unwrap_err();
    assert!(matches!(err, MapperError::ValueTypeMismatch { .. }));
    let err =
        section1::update_field(&mut state, FieldUpdate::new("section1.nickname", "J")).unwrap_err();
    assert!(matches!(err, MapperError::UnknownFieldPath { .. }));
    assert_eq!(state, before);
}

#[test]
fn test_updates_are_idempotent() {
    let catalogs = catalogs();
    let mut state = section11::create_default(&catalogs).unwrap();
    let update = FieldUpdate::new("residences.address.city", "Reston");
    section11::update_field(&mut state, update.clone()).unwrap();
    let once = section11::flatten_fields(&state);
    section11::update_field(&mut state, update).unwrap();
    assert_eq!(section11::flatten_fields(&state), once);
}

#[test]
fn test_apo_fpo_address_is_omitted_until_selected() {
    let catalogs = catalogs();
    let mut state = section11::create_default(&catalogs).unwrap();
    let apo_ids = ["9807 0 R", "9806 0 R", "9805 0 R", "9804 0 R"];

    let flat = section11::flatten_fields(&state);
    assert!(apo_ids.iter().all(|id| !flat.contains_key(*id)));
    // The template is still bound, so coverage sees it.
    assert!(apo_ids.iter().all(|id| state.bound_ids().contains(*id)));

    section11::update_field(&mut state, FieldUpdate::new("residences.isApoFpo", "YES")).unwrap();
    let flat = section11::flatten_fields(&state);
    assert!(apo_ids.iter().all(|id| flat.contains_key(*id)));
}

#[test]
fn test_present_residence_writes_present_only() {
    let catalogs = catalogs();
    let mut state = section11::create_default(&catalogs).unwrap();
    section11::update_field(&mut state, FieldUpdate::new("residences.fromDate", "03/2018"))
        .unwrap();
    section11::update_field(&mut state, FieldUpdate::new("residences.toDate", "04/2019"))
        .unwrap();
    section11::update_field(&mut state, FieldUpdate::new("residences.present", true)).unwrap();

    let flat = section11::flatten_fields(&state);
    assert_eq!(flat["9820 0 R"], FieldValue::from("03/2018"));
    assert_eq!(flat["9816 0 R"], FieldValue::Flag(true));
    assert!(!flat.contains_key("9818 0 R"));
    assert!(!flat.contains_key("9817 0 R"));
}

#[test]
fn test_entry_limits_fail_loud() {
    let catalogs = catalogs();

    let mut residences = section11::create_default(&catalogs).unwrap();
    for expected in 1..4 {
        assert_eq!(section11::add_entry(&mut residences).unwrap(), expected);
    }
    let err = section11::add_entry(&mut residences).unwrap_err();
    assert!(matches!(err, MapperError::EntryLimitExceeded { limit: 4, .. }));

    let mut other_names = section5::create_default(&catalogs).unwrap();
    let err = section5::update_field(
        &mut other_names,
        FieldUpdate::new("otherNames.lastName", "Doe").at(0),
    )
    .unwrap_err();
    assert!(matches!(err, MapperError::EntryIndexOutOfRange { index: 0, len: 0, .. }));
}

#[test]
fn test_branch_values_are_discarded_on_switch() {
    let catalogs = catalogs();
    let mut state = section9::create_default(&catalogs).unwrap();
    section9::update_field(&mut state, FieldUpdate::new("status", "DERIVED")).unwrap();
    section9::update_field(&mut state, FieldUpdate::new("derived.basisOther", true)).unwrap();
    section9::update_field(&mut state, FieldUpdate::new("status", "NOT_US")).unwrap();
    section9::update_field(&mut state, FieldUpdate::new("status", "DERIVED")).unwrap();

    let derived = state.derived.get().unwrap();
    assert!(!derived.basis_other.value);
}

#[test]
fn test_validation_reports_soft_issues() {
    let catalogs = catalogs();
    let mut state = section11::create_default(&catalogs).unwrap();
    section11::update_field(&mut state, FieldUpdate::new("residences.fromDate", "2018-03"))
        .unwrap();
    section11::update_field(&mut state, FieldUpdate::new("residences.toEstimated", true))
        .unwrap();
    section11::update_field(&mut state, FieldUpdate::new("residences.address.country", "Mars"))
        .unwrap();

    let report = state.validate();
    let error_ids: Vec<_> = report.errors.iter().map(|i| i.field_id.as_str()).collect();
    assert_eq!(error_ids, ["9820 0 R", "9809 0 R"]);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].field_id, "9817 0 R");
}

// crates/sf86-sections/examples/fill_form.rs
//! Fills a few sections of the questionnaire and prints the flat
//! `{catalog id: value}` map a PDF writer would consume.
//!
//! Run from the workspace root:
//!     cargo run -p sf86-sections --example fill_form [reference_dir]
//!
//! Without an argument the catalogs compiled into the crate are used.

use log::{info, warn};
use sf86_mapper::{CatalogConfig, CatalogSet, CoverageReport, FieldUpdate, SectionSchema};
use sf86_sections::{
    ApplicantFormValues, Section11, Validate, section1, section5, section9, section11,
};
use std::{env, error::Error};

fn load_catalogs() -> Result<CatalogSet, Box<dyn Error>> {
    match env::args().nth(1) {
        Some(dir) => Ok(CatalogSet::load_dir(&CatalogConfig::new(dir))?),
        None => Ok(sf86_sections::bundled()?),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let catalogs = load_catalogs()?;
    let mut form = ApplicantFormValues::with_defaults(&catalogs)?;

    if let Some(name) = form.section1.as_mut() {
        section1::update_field(name, FieldUpdate::new("section1.lastName", "Smith"))?;
        section1::update_field(name, FieldUpdate::new("section1.firstName", "Jane"))?;
    }

    if let Some(other_names) = form.section5.as_mut() {
        section5::update_field(other_names, FieldUpdate::new("hasOtherNames", "YES"))?;
        section5::update_field(other_names, FieldUpdate::new("otherNames.lastName", "Doe"))?;
        section5::update_field(other_names, FieldUpdate::new("otherNames.fromDate", "06/2001"))?;
        section5::update_field(other_names, FieldUpdate::new("otherNames.toDate", "09/2010"))?;
        section5::update_field(
            other_names,
            FieldUpdate::new("otherNames.isMaidenName", "YES"),
        )?;
    }

    if let Some(citizenship) = form.section9.as_mut() {
        section9::update_field(citizenship, FieldUpdate::new("status", "US_BORN"))?;
    }

    if let Some(residences) = form.section11.as_mut() {
        section11::update_field(residences, FieldUpdate::new("residences.fromDate", "10/2010"))?;
        section11::update_field(residences, FieldUpdate::new("residences.present", true))?;
        section11::update_field(
            residences,
            FieldUpdate::new("residences.address.city", "Norfolk"),
        )?;
        section11::update_field(residences, FieldUpdate::new("residences.isApoFpo", "YES"))?;
        section11::update_field(residences, FieldUpdate::new("residences.apoFpo.type", "FPO"))?;
        section11::update_field(
            residences,
            FieldUpdate::new("residences.apoFpo.stateCode", "AE"),
        )?;

        let catalog = catalogs.catalog(Section11::SECTION)?;
        let coverage = CoverageReport::build(catalog, &*residences);
        info!(
            "Section 11 schema covers {} of {} catalog fields",
            coverage.bound, coverage.total
        );
    }

    let report = form.validate();
    for issue in report.errors.iter().chain(&report.warnings) {
        warn!("{} ({}): {}", issue.field_name, issue.field_id, issue.message);
    }

    let flat = form.flatten_all()?;
    info!("Writing {} PDF field values", flat.len());
    println!("{}", serde_json::to_string_pretty(&flat)?);
    Ok(())
}

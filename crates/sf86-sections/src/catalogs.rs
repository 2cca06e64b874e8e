// crates/sf86-sections/src/catalogs.rs

//! The reference catalogs the section schemas were written against.

use log::info;
use sf86_mapper::{CatalogConfig, CatalogSet, MapperError, SectionNumber, load_catalog_from_str};

/// Sections with a bundled catalog and a typed schema.
pub const BUNDLED_SECTIONS: [SectionNumber; 9] = [
    SectionNumber::from_const(1),
    SectionNumber::from_const(2),
    SectionNumber::from_const(3),
    SectionNumber::from_const(4),
    SectionNumber::from_const(5),
    SectionNumber::from_const(7),
    SectionNumber::from_const(8),
    SectionNumber::from_const(9),
    SectionNumber::from_const(11),
];

const BUNDLED_JSON: [&str; 9] = [
    include_str!("../references/section-1.json"),
    include_str!("../references/section-2.json"),
    include_str!("../references/section-3.json"),
    include_str!("../references/section-4.json"),
    include_str!("../references/section-5.json"),
    include_str!("../references/section-7.json"),
    include_str!("../references/section-8.json"),
    include_str!("../references/section-9.json"),
    include_str!("../references/section-11.json"),
];

/// Parses the catalogs compiled into the crate.
pub fn bundled() -> Result<CatalogSet, MapperError> {
    let set = BUNDLED_SECTIONS
        .iter()
        .zip(BUNDLED_JSON)
        .map(|(section, json)| load_catalog_from_str(*section, json))
        .collect::<Result<CatalogSet, _>>()?;
    info!("Loaded {} bundled section catalogs", set.len());
    Ok(set)
}

/// Points a [`CatalogConfig`] at the crate's `references/` directory, the
/// on-disk source of the bundled catalogs.
pub fn reference_config() -> CatalogConfig {
    CatalogConfig::new(concat!(env!("CARGO_MANIFEST_DIR"), "/references"))
}

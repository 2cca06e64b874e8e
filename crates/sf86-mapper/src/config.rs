// crates/sf86-mapper/src/config.rs

//! Loading reference catalogs from a directory of `section-<N>.json` files.

use crate::catalog::{CatalogSet, SectionCatalog};
use crate::error::MapperError;
use crate::parser::load_catalog_from_str;
use crate::types::SectionNumber;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the reference catalogs live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub reference_dir: PathBuf,
    /// File name prefix, followed by the section number and `.json`.
    pub file_prefix: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            reference_dir: PathBuf::from("references"),
            file_prefix: "section-".into(),
        }
    }
}

impl CatalogConfig {
    pub fn new(reference_dir: impl Into<PathBuf>) -> Self {
        Self {
            reference_dir: reference_dir.into(),
            ..Self::default()
        }
    }

    /// The catalog file path of `section`.
    pub fn path_for(&self, section: SectionNumber) -> PathBuf {
        self.reference_dir
            .join(format!("{}{}.json", self.file_prefix, section.get()))
    }
}

/// Reads and parses a single catalog file.
pub fn load_catalog_file(
    section: SectionNumber,
    path: &Path,
) -> Result<SectionCatalog, MapperError> {
    let json = fs::read_to_string(path)?;
    load_catalog_from_str(section, &json)
}

impl CatalogSet {
    /// Loads every `section-<N>.json` present in the configured directory.
    ///
    /// Sections without a file are skipped, a missing directory yields an
    /// empty set. Any file that exists but fails to parse is an error.
    pub fn load_dir(config: &CatalogConfig) -> Result<Self, MapperError> {
        let mut set = CatalogSet::new();
        for section in SectionNumber::all() {
            let path = config.path_for(section);
            if !path.is_file() {
                debug!("No catalog for {} at {}", section, path.display());
                continue;
            }
            set.insert(load_catalog_file(section, &path)?);
        }
        info!(
            "Loaded {} section catalogs from {}",
            set.len(),
            config.reference_dir.display()
        );
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = CatalogConfig::default();
        assert_eq!(
            config.path_for(SectionNumber::from_const(11)),
            PathBuf::from("references/section-11.json")
        );
        let custom = CatalogConfig::new("/tmp/refs");
        assert_eq!(custom.file_prefix, "section-");
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let config = CatalogConfig::new("this/directory/does/not/exist");
        let set = CatalogSet::load_dir(&config).unwrap();
        assert!(set.is_empty());
    }
}

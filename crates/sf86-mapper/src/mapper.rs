// crates/sf86-mapper/src/mapper.rs

//! Forward resolution: `(section, field name, default)` to a populated field node.
//!
//! Matching is exact. PDF field names encode page positions in their bracket
//! indices, so any heuristic substitution would silently bind a value to the
//! wrong widget. Every miss is an error.

use crate::catalog::{CatalogSet, SectionCatalog};
use crate::date::{DateField, DateRange, DateRangeNames};
use crate::error::MapperError;
use crate::log::{SectionLog, ctx_trace};
use crate::node::{FieldNode, FieldNodeWithOptions, FieldSlot};
use crate::types::{FieldDescriptor, SectionNumber};
use alloc::string::String;
use alloc::vec::Vec;

/// Resolves field nodes against an injected set of catalogs.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapper<'a> {
    catalogs: &'a CatalogSet,
}

impl<'a> FieldMapper<'a> {
    pub fn new(catalogs: &'a CatalogSet) -> Self {
        Self { catalogs }
    }

    /// Looks up `name` in `section` and binds `default` to it.
    ///
    /// # Errors
    /// `CatalogNotLoaded` if the section has no catalog, `FieldNotFound` if the
    /// name does not match a catalog entry exactly.
    pub fn resolve<T>(
        &self,
        section: SectionNumber,
        name: &str,
        default: T,
    ) -> Result<FieldNode<T>, MapperError> {
        self.section(section)?.resolve(name, default)
    }

    /// Like [`resolve`](Self::resolve), also attaching the option list.
    ///
    /// An empty `options` falls back to the options recorded in the catalog.
    pub fn resolve_with_options<T>(
        &self,
        section: SectionNumber,
        name: &str,
        default: T,
        options: Vec<String>,
    ) -> Result<FieldNodeWithOptions<T>, MapperError> {
        self.section(section)?
            .resolve_with_options(name, default, options)
    }

    /// Returns a mapper bound to one section's catalog.
    pub fn section(&self, section: SectionNumber) -> Result<SectionMapper<'a>, MapperError> {
        Ok(SectionMapper::new(self.catalogs.catalog(section)?))
    }
}

/// A mapper bound to a single section catalog, used by section schema builders.
#[derive(Debug, Clone, Copy)]
pub struct SectionMapper<'a> {
    catalog: &'a SectionCatalog,
}

impl<'a> SectionMapper<'a> {
    pub fn new(catalog: &'a SectionCatalog) -> Self {
        Self { catalog }
    }

    pub fn section(&self) -> SectionNumber {
        self.catalog.section()
    }

    pub fn catalog(&self) -> &'a SectionCatalog {
        self.catalog
    }

    fn descriptor(&self, name: &str) -> Result<&'a FieldDescriptor, MapperError> {
        let descriptor = self.catalog.lookup(name)?;
        ctx_trace!(
            SectionLog::new(self.section(), "mapper"),
            "Resolved {} -> {}",
            name,
            descriptor.id
        );
        Ok(descriptor)
    }

    pub fn resolve<T>(&self, name: &str, default: T) -> Result<FieldNode<T>, MapperError> {
        Ok(FieldNode::bind(self.descriptor(name)?, default))
    }

    pub fn resolve_with_options<T>(
        &self,
        name: &str,
        default: T,
        options: Vec<String>,
    ) -> Result<FieldNodeWithOptions<T>, MapperError> {
        let descriptor = self.descriptor(name)?;
        let options = if options.is_empty() {
            descriptor.options.clone()
        } else {
            options
        };
        Ok(FieldNodeWithOptions::bind(descriptor, default, options))
    }

    /// A text node with an empty default.
    pub fn text(&self, name: &str) -> Result<FieldNode<String>, MapperError> {
        self.resolve(name, String::new())
    }

    /// A checkbox node, unchecked by default.
    pub fn flag(&self, name: &str) -> Result<FieldNode<bool>, MapperError> {
        self.resolve(name, false)
    }

    /// A dropdown or radio node with a literal default and option list.
    pub fn choice(
        &self,
        name: &str,
        default: &str,
        options: &[&str],
    ) -> Result<FieldNodeWithOptions<String>, MapperError> {
        self.resolve_with_options(
            name,
            default.into(),
            options.iter().map(|&o| String::from(o)).collect(),
        )
    }

    pub fn slot(&self, name: &str) -> Result<FieldSlot, MapperError> {
        Ok(FieldSlot::bind(self.descriptor(name)?))
    }

    /// A single date with its "estimated" checkbox, both empty.
    pub fn date(&self, date: &str, estimated: &str) -> Result<DateField, MapperError> {
        Ok(DateField {
            date: self.text(date)?,
            estimated: self.flag(estimated)?,
        })
    }

    /// A from/to date range with estimate and present checkboxes, all empty.
    pub fn date_range(&self, names: &DateRangeNames) -> Result<DateRange, MapperError> {
        DateRange::resolve(self, names)
    }
}

// crates/sf86-mapper/src/audit.rs

//! Coverage of a section catalog by a section schema.
//!
//! Used to find catalog fields no schema binds and bindings whose id is not
//! (or no longer) in the catalog.

use crate::catalog::SectionCatalog;
use crate::flatten::FieldTree;
use crate::log::{SectionLog, ctx_info, ctx_warn};
use crate::path::FieldPath;
use crate::types::{FieldType, SectionNumber};
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeCoverage {
    pub total: usize,
    pub bound: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    pub section: SectionNumber,
    /// Fields in the catalog.
    pub total: usize,
    /// Catalog fields bound by the schema.
    pub bound: usize,
    /// Names of catalog fields the schema never binds.
    pub unbound: Vec<String>,
    /// Bound ids that do not match a catalog entry of the same name.
    pub dangling: Vec<String>,
    pub by_type: BTreeMap<FieldType, TypeCoverage>,
}

impl CoverageReport {
    pub fn build(catalog: &SectionCatalog, tree: &impl FieldTree) -> Self {
        let mut bound_ids = BTreeSet::new();
        let mut dangling = Vec::new();
        tree.for_each_binding(&mut |field| match catalog.lookup_id(field.id) {
            Ok(descriptor) if descriptor.name == field.name => {
                bound_ids.insert(field.id.to_string());
            }
            _ => dangling.push(field.id.to_string()),
        });

        let mut unbound = Vec::new();
        let mut by_type: BTreeMap<FieldType, TypeCoverage> = BTreeMap::new();
        for descriptor in catalog.iter() {
            let coverage = by_type.entry(descriptor.field_type).or_default();
            coverage.total += 1;
            if bound_ids.contains(&descriptor.id) {
                coverage.bound += 1;
            } else {
                unbound.push(descriptor.name.clone());
            }
        }

        let report = Self {
            section: catalog.section(),
            total: catalog.count_fields(),
            bound: bound_ids.len(),
            unbound,
            dangling,
            by_type,
        };

        let ctx = SectionLog::new(report.section, "audit");
        ctx_info!(ctx, "Schema binds {} of {} catalog fields", report.bound, report.total);
        if !report.dangling.is_empty() {
            ctx_warn!(ctx, "{} bindings point outside the catalog", report.dangling.len());
        }
        report
    }

    pub fn is_complete(&self) -> bool {
        self.unbound.is_empty() && self.dangling.is_empty()
    }
}

/// Field counts of a catalog grouped by subform and by widget base name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldDistribution {
    pub by_subform: BTreeMap<String, usize>,
    pub by_widget: BTreeMap<String, usize>,
}

pub fn field_distribution(catalog: &SectionCatalog) -> FieldDistribution {
    let mut distribution = FieldDistribution::default();
    for descriptor in catalog.iter() {
        // Catalogs built directly from descriptors skip name validation.
        let Ok(path) = FieldPath::parse(&descriptor.name) else {
            continue;
        };
        let subform = path.subform().map(|s| s.name.clone()).unwrap_or_default();
        *distribution.by_subform.entry(subform).or_default() += 1;
        *distribution
            .by_widget
            .entry(path.widget().name.clone())
            .or_default() += 1;
    }
    distribution
}

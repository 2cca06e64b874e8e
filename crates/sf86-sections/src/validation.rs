// crates/sf86-sections/src/validation.rs

//! Soft content checks on user-entered values.
//!
//! Unlike mapping errors these never fail an operation. They are collected
//! into a [`ValidationReport`] for the UI to show next to the fields, so a
//! partially filled form can always be saved.

use crate::common::PersonName;
use chrono::NaiveDate;
use serde::Serialize;
use sf86_mapper::{
    Branch, DateBound, DateField, DateRange, Entries, FieldNodeWithOptions, FieldRef, KnownDate,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub field_id: String,
    pub field_name: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&mut self, field: FieldRef<'_>, message: impl Into<String>) {
        self.errors.push(issue(field, message.into()));
    }

    pub fn warning(&mut self, field: FieldRef<'_>, message: impl Into<String>) {
        self.warnings.push(issue(field, message.into()));
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

fn issue(field: FieldRef<'_>, message: String) -> ValidationIssue {
    ValidationIssue {
        field_id: field.id.to_string(),
        field_name: field.name.to_string(),
        message,
    }
}

/// Content checks of a section or sub-record.
pub trait Validate {
    fn validate_into(&self, report: &mut ValidationReport);

    fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        self.validate_into(&mut report);
        report
    }
}

/// Parses a form date, `MM/DD/YYYY` or `MM/YYYY` (taken as the first of the
/// month). Returns `None` for anything else.
pub fn parse_form_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let parts: Vec<&str> = text.split('/').collect();
    let year = parts.last()?;
    if year.len() != 4 || parts.iter().any(|p| p.is_empty() || p.len() > 4) {
        return None;
    }
    match parts.len() {
        3 => NaiveDate::parse_from_str(text, "%m/%d/%Y").ok(),
        2 => NaiveDate::parse_from_str(&format!("{}/01", text), "%m/%Y/%d").ok(),
        _ => None,
    }
}

/// Checks one date value: format of a non-empty date, and an "estimated"
/// flag set on an empty one. Returns the parsed date when valid.
fn check_date(
    report: &mut ValidationReport,
    value: &KnownDate,
    date: FieldRef<'_>,
    estimated: FieldRef<'_>,
) -> Option<NaiveDate> {
    if value.date.trim().is_empty() {
        if value.estimated {
            report.warning(estimated, "Marked as estimated but no date was entered");
        }
        return None;
    }
    let parsed = parse_form_date(&value.date);
    if parsed.is_none() {
        report.error(
            date,
            format!("'{}' is not a date in MM/YYYY or MM/DD/YYYY format", value.date),
        );
    }
    parsed
}

/// Reports `later` when it precedes `earlier`.
fn check_order(
    report: &mut ValidationReport,
    earlier: Option<NaiveDate>,
    later: Option<NaiveDate>,
    field: FieldRef<'_>,
    message: &str,
) {
    if let (Some(earlier), Some(later)) = (earlier, later) {
        if later < earlier {
            report.error(field, message);
        }
    }
}

/// Checks two dates that must be in chronological order, e.g. a passport's
/// issue and expiration dates.
pub fn check_date_pair(report: &mut ValidationReport, earlier: &DateField, later: &DateField) {
    let first = check_date(
        report,
        &earlier.value(),
        earlier.date.field_ref(),
        earlier.estimated.field_ref(),
    );
    let second = check_date(
        report,
        &later.value(),
        later.date.field_ref(),
        later.estimated.field_ref(),
    );
    check_order(
        report,
        first,
        second,
        later.date.field_ref(),
        "Date is earlier than the date it must follow",
    );
}

impl Validate for FieldNodeWithOptions<String> {
    fn validate_into(&self, report: &mut ValidationReport) {
        if !self.value.is_empty() && !self.options.is_empty() && !self.has_option(&self.value) {
            report.error(
                self.field_ref(),
                format!("'{}' is not one of the allowed options", self.value),
            );
        }
    }
}

impl Validate for DateField {
    fn validate_into(&self, report: &mut ValidationReport) {
        check_date(
            report,
            &self.value(),
            self.date.field_ref(),
            self.estimated.field_ref(),
        );
    }
}

impl Validate for DateRange {
    fn validate_into(&self, report: &mut ValidationReport) {
        let slots = self.slots();
        let from = check_date(
            report,
            &self.from,
            slots.from_date.field_ref(),
            slots.from_estimated.field_ref(),
        );
        if let DateBound::Known(to) = &self.to {
            let to = check_date(
                report,
                to,
                slots.to_date.field_ref(),
                slots.to_estimated.field_ref(),
            );
            check_order(
                report,
                from,
                to,
                slots.to_date.field_ref(),
                "The to-date is earlier than the from-date",
            );
        }
    }
}

impl Validate for PersonName {
    fn validate_into(&self, report: &mut ValidationReport) {
        self.suffix.validate_into(report);
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate_into(&self, report: &mut ValidationReport) {
        if let Some(inner) = self {
            inner.validate_into(report);
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate_into(&self, report: &mut ValidationReport) {
        for item in self {
            item.validate_into(report);
        }
    }
}

impl<T: Validate + Clone> Validate for Branch<T> {
    fn validate_into(&self, report: &mut ValidationReport) {
        if let Some(active) = self.get() {
            active.validate_into(report);
        }
    }
}

impl<T: Validate + Clone> Validate for Entries<T> {
    fn validate_into(&self, report: &mut ValidationReport) {
        for entry in self.iter() {
            entry.validate_into(report);
        }
    }
}

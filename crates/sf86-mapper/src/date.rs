// crates/sf86-mapper/src/date.rs

//! Dates with an "estimated" companion and date ranges that may end at "present".
//!
//! The PDF spreads one date range over five widgets: from date, from estimated,
//! to date, to estimated and a "present" checkbox. Here the value side is a
//! single tagged variant per endpoint, so a range that runs to the present
//! cannot also carry a to-date.

use crate::error::MapperError;
use crate::flatten::{FieldTree, FlatFieldMap};
use crate::mapper::SectionMapper;
use crate::node::{FieldNode, FieldSlot};
use crate::types::{FieldRef, FieldValue};
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// A date as entered on the form plus its "estimated" flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownDate {
    pub date: String,
    pub estimated: bool,
}

impl KnownDate {
    pub fn new(date: impl Into<String>, estimated: bool) -> Self {
        Self {
            date: date.into(),
            estimated,
        }
    }
}

/// The end of a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DateBound {
    Known(KnownDate),
    Present,
}

impl Default for DateBound {
    fn default() -> Self {
        DateBound::Known(KnownDate::default())
    }
}

impl DateBound {
    pub fn is_present(&self) -> bool {
        matches!(self, DateBound::Present)
    }

    pub fn known(&self) -> Option<&KnownDate> {
        match self {
            DateBound::Known(date) => Some(date),
            DateBound::Present => None,
        }
    }
}

/// Which widget of a single date an update addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Date,
    Estimated,
}

/// A single date bound to its date text field and "estimated" checkbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateField {
    pub date: FieldNode<String>,
    pub estimated: FieldNode<bool>,
}

impl DateField {
    pub fn value(&self) -> KnownDate {
        KnownDate::new(self.date.value.clone(), self.estimated.value)
    }

    pub fn set(&mut self, value: KnownDate) {
        self.date.value = value.date;
        self.estimated.value = value.estimated;
    }

    pub(crate) fn assign(&mut self, part: DatePart, value: FieldValue) -> Result<(), MapperError> {
        match part {
            DatePart::Date => self.date.value = expect_text(&self.date.name, value)?,
            DatePart::Estimated => self.estimated.value = expect_flag(&self.estimated.name, value)?,
        }
        Ok(())
    }
}

impl FieldTree for DateField {
    fn flatten_into(&self, out: &mut FlatFieldMap) {
        self.date.flatten_into(out);
        self.estimated.flatten_into(out);
    }

    fn for_each_binding(&self, visit: &mut dyn FnMut(FieldRef<'_>)) {
        self.date.for_each_binding(visit);
        self.estimated.for_each_binding(visit);
    }
}

/// The catalog names of the five widgets behind one date range.
#[derive(Debug, Clone, Copy)]
pub struct DateRangeNames {
    pub from_date: &'static str,
    pub from_estimated: &'static str,
    pub to_date: &'static str,
    pub to_estimated: &'static str,
    pub present: &'static str,
}

/// The catalog slots of the five widgets behind one date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRangeSlots {
    pub from_date: FieldSlot,
    pub from_estimated: FieldSlot,
    pub to_date: FieldSlot,
    pub to_estimated: FieldSlot,
    pub present: FieldSlot,
}

/// Which widget of a date range an update addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePart {
    FromDate,
    FromEstimated,
    ToDate,
    ToEstimated,
    Present,
}

/// A from/to date range bound to its five catalog widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    slots: DateRangeSlots,
    pub from: KnownDate,
    pub to: DateBound,
}

impl DateRange {
    /// Resolves all five widgets, with empty dates and no flags set.
    pub fn resolve(mapper: &SectionMapper<'_>, names: &DateRangeNames) -> Result<Self, MapperError> {
        Ok(Self {
            slots: DateRangeSlots {
                from_date: mapper.slot(names.from_date)?,
                from_estimated: mapper.slot(names.from_estimated)?,
                to_date: mapper.slot(names.to_date)?,
                to_estimated: mapper.slot(names.to_estimated)?,
                present: mapper.slot(names.present)?,
            },
            from: KnownDate::default(),
            to: DateBound::default(),
        })
    }

    pub fn slots(&self) -> &DateRangeSlots {
        &self.slots
    }

    /// Marks the range as running to the present, dropping any to-date.
    pub fn set_present(&mut self) {
        self.to = DateBound::Present;
    }

    /// Applies a single-widget update.
    ///
    /// Checking "present" turns the end into `Present`; unchecking it or
    /// writing a to-date turns it back into a known (possibly empty) date.
    pub(crate) fn assign(&mut self, part: RangePart, value: FieldValue) -> Result<(), MapperError> {
        match part {
            RangePart::FromDate => {
                self.from.date = expect_text(&self.slots.from_date.name, value)?;
            }
            RangePart::FromEstimated => {
                self.from.estimated = expect_flag(&self.slots.from_estimated.name, value)?;
            }
            RangePart::ToDate => {
                let date = expect_text(&self.slots.to_date.name, value)?;
                match &mut self.to {
                    DateBound::Known(known) => known.date = date,
                    DateBound::Present => self.to = DateBound::Known(KnownDate::new(date, false)),
                }
            }
            RangePart::ToEstimated => {
                let estimated = expect_flag(&self.slots.to_estimated.name, value)?;
                match &mut self.to {
                    DateBound::Known(known) => known.estimated = estimated,
                    DateBound::Present => {
                        self.to = DateBound::Known(KnownDate::new(String::new(), estimated))
                    }
                }
            }
            RangePart::Present => {
                let present = expect_flag(&self.slots.present.name, value)?;
                if present {
                    self.to = DateBound::Present;
                } else if self.to.is_present() {
                    self.to = DateBound::default();
                }
            }
        }
        Ok(())
    }
}

impl FieldTree for DateRange {
    fn flatten_into(&self, out: &mut FlatFieldMap) {
        let slots = &self.slots;
        out.insert(slots.from_date.id.clone(), FieldValue::Text(self.from.date.clone()));
        out.insert(slots.from_estimated.id.clone(), FieldValue::Flag(self.from.estimated));
        match &self.to {
            DateBound::Known(to) => {
                out.insert(slots.to_date.id.clone(), FieldValue::Text(to.date.clone()));
                out.insert(slots.to_estimated.id.clone(), FieldValue::Flag(to.estimated));
                out.insert(slots.present.id.clone(), FieldValue::Flag(false));
            }
            DateBound::Present => {
                out.insert(slots.present.id.clone(), FieldValue::Flag(true));
            }
        }
    }

    fn for_each_binding(&self, visit: &mut dyn FnMut(FieldRef<'_>)) {
        let slots = &self.slots;
        for slot in [
            &slots.from_date,
            &slots.from_estimated,
            &slots.to_date,
            &slots.to_estimated,
            &slots.present,
        ] {
            visit(slot.field_ref());
        }
    }
}

pub(crate) fn expect_text(name: &str, value: FieldValue) -> Result<String, MapperError> {
    match value {
        FieldValue::Text(text) => Ok(text),
        other => Err(MapperError::ValueTypeMismatch {
            name: name.into(),
            expected: "text",
            found: other.kind(),
        }),
    }
}

pub(crate) fn expect_flag(name: &str, value: FieldValue) -> Result<bool, MapperError> {
    match value {
        FieldValue::Flag(flag) => Ok(flag),
        other => Err(MapperError::ValueTypeMismatch {
            name: name.into(),
            expected: "flag",
            found: other.kind(),
        }),
    }
}

// crates/sf86-sections/src/section5.rs

//! Section 5: other names used.
//!
//! The PDF has room for four other names. Entries are only flattened while
//! "hasOtherNames" is answered YES.

use crate::common::{NO, NameFields, NamePart, PersonName, YES, is_yes, yes_no};
use crate::validation::{Validate, ValidationReport};
use log::debug;
use serde::{Deserialize, Serialize};
use sf86_mapper::{
    DateRange, DateRangeNames, Entries, FieldCell, FieldNode, FieldNodeWithOptions, MapperError,
    RangePart, SectionMapper, SectionNumber, SectionSchema, field_keys, field_tree,
};

macro_rules! s5 {
    ($tail:literal) => {
        concat!("form1[0].Sections1-6[0].section5[0].", $tail)
    };
}

pub const HAS_OTHER_NAMES: &str = s5!("RadioButtonList[0]");

/// Catalog names of the widgets of one other-name entry.
#[derive(Debug, Clone, Copy)]
pub struct OtherNameFields {
    pub name: NameFields,
    pub period: DateRangeNames,
    pub reason_changed: &'static str,
    pub is_maiden_name: &'static str,
}

macro_rules! other_name_slot {
    (
        $last:literal, $first:literal, $middle:literal, $suffix:literal,
        $from:literal, $from_est:literal, $to:literal, $to_est:literal, $present:literal,
        $reason:literal, $maiden:literal
    ) => {
        OtherNameFields {
            name: NameFields {
                last: s5!($last),
                first: s5!($first),
                middle: s5!($middle),
                suffix: s5!($suffix),
            },
            period: DateRangeNames {
                from_date: s5!($from),
                from_estimated: s5!($from_est),
                to_date: s5!($to),
                to_estimated: s5!($to_est),
                present: s5!($present),
            },
            reason_changed: s5!($reason),
            is_maiden_name: s5!($maiden),
        }
    };
}

pub const OTHER_NAME_SLOTS: [OtherNameFields; 4] = [
    other_name_slot!(
        "TextField11[0]", "TextField11[1]", "TextField11[2]", "suffix[0]",
        "From_Datefield_Name_2[0]", "#field[0]", "From_Datefield_Name_2[1]", "#field[1]", "#field[2]",
        "TextField11[3]", "RadioButtonList[1]"
    ),
    other_name_slot!(
        "TextField11[4]", "TextField11[5]", "TextField11[6]", "suffix[1]",
        "From_Datefield_Name_2[2]", "#field[5]", "From_Datefield_Name_2[3]", "#field[6]", "#field[7]",
        "TextField11[7]", "RadioButtonList[2]"
    ),
    other_name_slot!(
        "TextField11[8]", "TextField11[9]", "TextField11[10]", "suffix[2]",
        "From_Datefield_Name_2[4]", "#field[10]", "From_Datefield_Name_2[5]", "#field[11]", "#field[12]",
        "TextField11[11]", "RadioButtonList[3]"
    ),
    other_name_slot!(
        "TextField11[12]", "TextField11[13]", "TextField11[14]", "suffix[3]",
        "From_Datefield_Name_2[6]", "#field[15]", "From_Datefield_Name_2[7]", "#field[16]", "#field[17]",
        "TextField11[15]", "RadioButtonList[4]"
    ),
];

field_keys! {
    pub enum Section5Field {
        HasOtherNames => "hasOtherNames",
        LastName => "otherNames.lastName",
        FirstName => "otherNames.firstName",
        MiddleName => "otherNames.middleName",
        Suffix => "otherNames.suffix",
        FromDate => "otherNames.fromDate",
        FromEstimated => "otherNames.fromEstimated",
        ToDate => "otherNames.toDate",
        ToEstimated => "otherNames.toEstimated",
        Present => "otherNames.present",
        ReasonChanged => "otherNames.reasonChanged",
        IsMaidenName => "otherNames.isMaidenName",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherName {
    pub name: PersonName,
    pub period: DateRange,
    pub reason_changed: FieldNode<String>,
    pub is_maiden_name: FieldNodeWithOptions<String>,
}
field_tree!(OtherName {
    name,
    period,
    reason_changed,
    is_maiden_name
});

impl OtherName {
    pub fn resolve(mapper: &SectionMapper<'_>, names: &OtherNameFields) -> Result<Self, MapperError> {
        Ok(Self {
            name: PersonName::resolve(mapper, &names.name)?,
            period: mapper.date_range(&names.period)?,
            reason_changed: mapper.text(names.reason_changed)?,
            is_maiden_name: yes_no(mapper, names.is_maiden_name)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section5 {
    pub has_other_names: FieldNodeWithOptions<String>,
    pub other_names: Entries<OtherName>,
}
field_tree!(Section5 {
    has_other_names,
    other_names
});

impl SectionSchema for Section5 {
    const SECTION: SectionNumber = SectionNumber::from_const(5);
    const EXPECTED_FIELD_COUNT: usize = 45;
    type Field = Section5Field;

    fn create_default(mapper: &SectionMapper<'_>) -> Result<Self, MapperError> {
        let slots = OTHER_NAME_SLOTS
            .iter()
            .map(|names| OtherName::resolve(mapper, names))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            has_other_names: yes_no(mapper, HAS_OTHER_NAMES)?,
            other_names: Entries::new(Self::SECTION, slots, 0),
        })
    }

    fn field_mut(
        &mut self,
        field: Section5Field,
        index: Option<usize>,
    ) -> Result<FieldCell<'_>, MapperError> {
        use Section5Field as F;

        Ok(match field {
            F::HasOtherNames => FieldCell::Choice(&mut self.has_other_names),
            _ => {
                let entry = self.other_names.entry_mut(index.unwrap_or(0))?;
                match field {
                    F::LastName => entry.name.cell(NamePart::Last),
                    F::FirstName => entry.name.cell(NamePart::First),
                    F::MiddleName => entry.name.cell(NamePart::Middle),
                    F::Suffix => entry.name.cell(NamePart::Suffix),
                    F::FromDate => FieldCell::Range(&mut entry.period, RangePart::FromDate),
                    F::FromEstimated => {
                        FieldCell::Range(&mut entry.period, RangePart::FromEstimated)
                    }
                    F::ToDate => FieldCell::Range(&mut entry.period, RangePart::ToDate),
                    F::ToEstimated => FieldCell::Range(&mut entry.period, RangePart::ToEstimated),
                    F::Present => FieldCell::Range(&mut entry.period, RangePart::Present),
                    F::ReasonChanged => FieldCell::Text(&mut entry.reason_changed),
                    _ => FieldCell::Choice(&mut entry.is_maiden_name),
                }
            }
        })
    }

    fn after_update(
        &mut self,
        field: Section5Field,
        _index: Option<usize>,
    ) -> Result<(), MapperError> {
        if field != Section5Field::HasOtherNames {
            return Ok(());
        }
        if !is_yes(&self.has_other_names) {
            self.other_names.clear();
        } else if self.other_names.is_empty() {
            self.other_names.push()?;
        }
        Ok(())
    }
}

/// Adds an other-name entry, answering "hasOtherNames" with YES. Returns the
/// index of the new entry.
///
/// # Errors
/// `EntryLimitExceeded` when all four entries are in use.
pub fn add_entry(state: &mut Section5) -> sf86_mapper::Result<usize> {
    state.other_names.push()?;
    state.has_other_names.value = YES.into();
    debug!("Section 5 now has {} other names", state.other_names.len());
    Ok(state.other_names.len() - 1)
}

/// Removes the last other-name entry. Removing the only entry answers
/// "hasOtherNames" with NO again.
pub fn remove_entry(state: &mut Section5) -> Option<OtherName> {
    let removed = state.other_names.pop();
    if state.other_names.is_empty() {
        state.has_other_names.value = NO.into();
    }
    removed
}

impl Validate for OtherName {
    fn validate_into(&self, report: &mut ValidationReport) {
        if self.name.last_name.value.trim().is_empty() {
            report.warning(self.name.last_name.field_ref(), "Other name has no last name");
        }
        self.name.validate_into(report);
        self.period.validate_into(report);
        self.is_maiden_name.validate_into(report);
    }
}

impl Validate for Section5 {
    fn validate_into(&self, report: &mut ValidationReport) {
        self.has_other_names.validate_into(report);
        if is_yes(&self.has_other_names) && self.other_names.is_empty() {
            report.warning(
                self.has_other_names.field_ref(),
                "Answered YES but no other name was entered",
            );
        }
        self.other_names.validate_into(report);
    }
}

section_api!(Section5);

// crates/sf86-sections/src/section4.rs

//! Section 4: U.S. Social Security Number.
//!
//! The number is entered once but printed in the page header of three later
//! pages, so every update is copied to those mirror widgets.

use crate::validation::{Validate, ValidationReport};
use serde::{Deserialize, Serialize};
use sf86_mapper::{
    FieldCell, FieldNode, MapperError, SectionMapper, SectionNumber, SectionSchema, field_keys,
    field_tree,
};

pub const SSN: &str = "form1[0].Sections1-6[0].SSN[0]";
pub const NOT_APPLICABLE: &str = "form1[0].Sections1-6[0].CheckBox1[0]";
pub const SSN_MIRRORS: [&str; 3] = [
    "form1[0].Sections1-6[0].SSN[1]",
    "form1[0].Sections7-9[0].SSN[0]",
    r"form1[0].Section9\.1-9\.4[0].SSN[0]",
];

field_keys! {
    pub enum Section4Field {
        Ssn => "ssn",
        NotApplicable => "notApplicable",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section4 {
    pub ssn: FieldNode<String>,
    pub not_applicable: FieldNode<bool>,
    pub mirrors: Vec<FieldNode<String>>,
}
field_tree!(Section4 {
    ssn,
    not_applicable,
    mirrors
});

impl Section4 {
    fn sync_mirrors(&mut self) {
        let value = if self.not_applicable.value {
            String::new()
        } else {
            self.ssn.value.clone()
        };
        for mirror in &mut self.mirrors {
            mirror.value.clone_from(&value);
        }
    }
}

impl SectionSchema for Section4 {
    const SECTION: SectionNumber = SectionNumber::from_const(4);
    const EXPECTED_FIELD_COUNT: usize = 5;
    type Field = Section4Field;

    fn create_default(mapper: &SectionMapper<'_>) -> Result<Self, MapperError> {
        Ok(Self {
            ssn: mapper.text(SSN)?,
            not_applicable: mapper.flag(NOT_APPLICABLE)?,
            mirrors: SSN_MIRRORS
                .iter()
                .map(|name| mapper.text(name))
                .collect::<Result<_, _>>()?,
        })
    }

    fn field_mut(
        &mut self,
        field: Section4Field,
        _index: Option<usize>,
    ) -> Result<FieldCell<'_>, MapperError> {
        Ok(match field {
            Section4Field::Ssn => FieldCell::Text(&mut self.ssn),
            Section4Field::NotApplicable => FieldCell::Flag(&mut self.not_applicable),
        })
    }

    fn after_update(
        &mut self,
        _field: Section4Field,
        _index: Option<usize>,
    ) -> Result<(), MapperError> {
        self.sync_mirrors();
        Ok(())
    }
}

/// Accepts `123456789` and `123-45-6789`.
fn is_valid_ssn(text: &str) -> bool {
    let digits: String = text.chars().filter(|c| *c != '-').collect();
    let dashes_ok = !text.contains('-')
        || (text.len() == 11 && text.as_bytes()[3] == b'-' && text.as_bytes()[6] == b'-');
    digits.len() == 9 && digits.chars().all(|c| c.is_ascii_digit()) && dashes_ok
}

impl Validate for Section4 {
    fn validate_into(&self, report: &mut ValidationReport) {
        let ssn = self.ssn.value.trim();
        if self.not_applicable.value {
            if !ssn.is_empty() {
                report.warning(
                    self.ssn.field_ref(),
                    "A number was entered but the section is marked not applicable",
                );
            }
        } else if ssn.is_empty() {
            report.warning(self.ssn.field_ref(), "No Social Security Number entered");
        } else if !is_valid_ssn(ssn) {
            report.error(self.ssn.field_ref(), "A Social Security Number has 9 digits");
        }
    }
}

section_api!(Section4);

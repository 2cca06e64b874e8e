// crates/sf86-sections/src/section1.rs

//! Section 1: full name.

use crate::common::{NameFields, NamePart, PersonName};
use crate::validation::{Validate, ValidationReport};
use serde::{Deserialize, Serialize};
use sf86_mapper::{
    FieldCell, MapperError, SectionMapper, SectionNumber, SectionSchema, field_keys, field_tree,
};

pub const LAST_NAME: &str = "form1[0].Sections1-6[0].TextField11[0]";
pub const FIRST_NAME: &str = "form1[0].Sections1-6[0].TextField11[1]";
pub const MIDDLE_NAME: &str = "form1[0].Sections1-6[0].TextField11[2]";
pub const SUFFIX: &str = "form1[0].Sections1-6[0].suffix[0]";

const NAME: NameFields = NameFields {
    last: LAST_NAME,
    first: FIRST_NAME,
    middle: MIDDLE_NAME,
    suffix: SUFFIX,
};

field_keys! {
    pub enum Section1Field {
        LastName => "lastName",
        FirstName => "firstName",
        MiddleName => "middleName",
        Suffix => "suffix",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section1 {
    #[serde(flatten)]
    pub name: PersonName,
}

field_tree!(Section1 { name });

impl SectionSchema for Section1 {
    const SECTION: SectionNumber = SectionNumber::from_const(1);
    const EXPECTED_FIELD_COUNT: usize = 4;
    type Field = Section1Field;

    fn create_default(mapper: &SectionMapper<'_>) -> Result<Self, MapperError> {
        Ok(Self {
            name: PersonName::resolve(mapper, &NAME)?,
        })
    }

    fn field_mut(
        &mut self,
        field: Section1Field,
        _index: Option<usize>,
    ) -> Result<FieldCell<'_>, MapperError> {
        let part = match field {
            Section1Field::LastName => NamePart::Last,
            Section1Field::FirstName => NamePart::First,
            Section1Field::MiddleName => NamePart::Middle,
            Section1Field::Suffix => NamePart::Suffix,
        };
        Ok(self.name.cell(part))
    }
}

impl Validate for Section1 {
    fn validate_into(&self, report: &mut ValidationReport) {
        self.name.validate_into(report);
    }
}

section_api!(Section1);

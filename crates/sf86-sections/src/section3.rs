// crates/sf86-sections/src/section3.rs

//! Section 3: place of birth.

use crate::common::dropdown;
use crate::validation::{Validate, ValidationReport};
use serde::{Deserialize, Serialize};
use sf86_mapper::{
    FieldCell, FieldNode, FieldNodeWithOptions, MapperError, SectionMapper, SectionNumber,
    SectionSchema, field_keys, field_tree,
};

pub const CITY: &str = "form1[0].Sections1-6[0].TextField11[3]";
pub const COUNTY: &str = "form1[0].Sections1-6[0].TextField11[4]";
pub const STATE: &str = "form1[0].Sections1-6[0].School6_State[0]";
pub const COUNTRY: &str = "form1[0].Sections1-6[0].DropDownList1[0]";

pub const DEFAULT_COUNTRY: &str = "United States";

field_keys! {
    pub enum Section3Field {
        City => "city",
        County => "county",
        State => "state",
        Country => "country",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section3 {
    pub city: FieldNode<String>,
    pub county: FieldNode<String>,
    pub state: FieldNodeWithOptions<String>,
    pub country: FieldNodeWithOptions<String>,
}
field_tree!(Section3 {
    city,
    county,
    state,
    country
});

impl SectionSchema for Section3 {
    const SECTION: SectionNumber = SectionNumber::from_const(3);
    const EXPECTED_FIELD_COUNT: usize = 4;
    type Field = Section3Field;

    fn create_default(mapper: &SectionMapper<'_>) -> Result<Self, MapperError> {
        let mut country = dropdown(mapper, COUNTRY)?;
        country.value = DEFAULT_COUNTRY.into();
        Ok(Self {
            city: mapper.text(CITY)?,
            county: mapper.text(COUNTY)?,
            state: dropdown(mapper, STATE)?,
            country,
        })
    }

    fn field_mut(
        &mut self,
        field: Section3Field,
        _index: Option<usize>,
    ) -> Result<FieldCell<'_>, MapperError> {
        Ok(match field {
            Section3Field::City => FieldCell::Text(&mut self.city),
            Section3Field::County => FieldCell::Text(&mut self.county),
            Section3Field::State => FieldCell::Choice(&mut self.state),
            Section3Field::Country => FieldCell::Choice(&mut self.country),
        })
    }
}

impl Validate for Section3 {
    fn validate_into(&self, report: &mut ValidationReport) {
        self.state.validate_into(report);
        self.country.validate_into(report);
    }
}

section_api!(Section3);

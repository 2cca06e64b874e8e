// crates/sf86-sections/src/section2.rs

//! Section 2: date of birth.

use crate::validation::{Validate, ValidationReport};
use serde::{Deserialize, Serialize};
use sf86_mapper::{
    DateField, DatePart, FieldCell, MapperError, SectionMapper, SectionNumber, SectionSchema,
    field_keys, field_tree,
};

pub const DATE: &str = "form1[0].Sections1-6[0].From_Datefield_Name_2[0]";
pub const ESTIMATED: &str = "form1[0].Sections1-6[0].#field[18]";

field_keys! {
    pub enum Section2Field {
        Date => "date",
        IsEstimated => "isEstimated",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section2 {
    pub date_of_birth: DateField,
}
field_tree!(Section2 { date_of_birth });

impl SectionSchema for Section2 {
    const SECTION: SectionNumber = SectionNumber::from_const(2);
    const EXPECTED_FIELD_COUNT: usize = 2;
    type Field = Section2Field;

    fn create_default(mapper: &SectionMapper<'_>) -> Result<Self, MapperError> {
        Ok(Self {
            date_of_birth: mapper.date(DATE, ESTIMATED)?,
        })
    }

    fn field_mut(
        &mut self,
        field: Section2Field,
        _index: Option<usize>,
    ) -> Result<FieldCell<'_>, MapperError> {
        let part = match field {
            Section2Field::Date => DatePart::Date,
            Section2Field::IsEstimated => DatePart::Estimated,
        };
        Ok(FieldCell::Date(&mut self.date_of_birth, part))
    }
}

impl Validate for Section2 {
    fn validate_into(&self, report: &mut ValidationReport) {
        self.date_of_birth.validate_into(report);
    }
}

section_api!(Section2);

#[cfg(test)]
mod tests {
    use super::*;
    use sf86_mapper::{FieldUpdate, FieldValue};

    #[test]
    fn test_date_of_birth_round_trip() {
        let catalogs = crate::bundled().unwrap();
        let mut state = create_default(&catalogs).unwrap();
        update_field(&mut state, FieldUpdate::new("date", "04/12/1985")).unwrap();
        update_field(&mut state, FieldUpdate::new("isEstimated", true)).unwrap();

        let flat = flatten_fields(&state);
        assert_eq!(flat["9432 0 R"], FieldValue::from("04/12/1985"));
        assert_eq!(flat["9431 0 R"], FieldValue::Flag(true));
        assert!(state.validate().is_valid());
    }

    #[test]
    fn test_bad_date_is_a_soft_error() {
        let catalogs = crate::bundled().unwrap();
        let mut state = create_default(&catalogs).unwrap();
        update_field(&mut state, FieldUpdate::new("date", "1985-04-12")).unwrap();

        let report = state.validate();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field_id, "9432 0 R");
    }
}

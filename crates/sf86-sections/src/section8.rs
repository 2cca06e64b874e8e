// crates/sf86-sections/src/section8.rs

//! Section 8: U.S. passport.
//!
//! The passport record only exists while "hasPassport" is answered YES.

use crate::common::{NameFields, NamePart, PersonName, is_yes, yes_no};
use crate::validation::{Validate, ValidationReport, check_date_pair};
use serde::{Deserialize, Serialize};
use sf86_mapper::{
    Branch, DateField, DatePart, FieldCell, FieldNode, FieldNodeWithOptions, MapperError,
    SectionMapper, SectionNumber, SectionSchema, field_keys, field_tree,
};

pub const HAS_PASSPORT: &str = "form1[0].Sections7-9[0].RadioButtonList[0]";
pub const NUMBER: &str = "form1[0].Sections7-9[0].TextField11[0]";
pub const ISSUE_DATE: &str = "form1[0].Sections7-9[0].From_Datefield_Name_2[0]";
pub const ISSUE_ESTIMATED: &str = "form1[0].Sections7-9[0].#field[17]";
pub const EXPIRATION_DATE: &str = "form1[0].Sections7-9[0].To_Datefield_Name_2[0]";
pub const EXPIRATION_ESTIMATED: &str = "form1[0].Sections7-9[0].#field[18]";

const NAME: NameFields = NameFields {
    last: "form1[0].Sections7-9[0].TextField11[1]",
    first: "form1[0].Sections7-9[0].TextField11[2]",
    middle: "form1[0].Sections7-9[0].TextField11[19]",
    suffix: "form1[0].Sections7-9[0].suffix[0]",
};

field_keys! {
    pub enum Section8Field {
        HasPassport => "hasPassport",
        Number => "passport.number",
        LastName => "passport.lastName",
        FirstName => "passport.firstName",
        MiddleName => "passport.middleName",
        Suffix => "passport.suffix",
        IssueDate => "passport.issueDate",
        IssueEstimated => "passport.issueEstimated",
        ExpirationDate => "passport.expirationDate",
        ExpirationEstimated => "passport.expirationEstimated",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passport {
    pub number: FieldNode<String>,
    pub name: PersonName,
    pub issued: DateField,
    pub expires: DateField,
}
field_tree!(Passport {
    number,
    name,
    issued,
    expires
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section8 {
    pub has_passport: FieldNodeWithOptions<String>,
    pub passport: Branch<Passport>,
}
field_tree!(Section8 {
    has_passport,
    passport
});

impl SectionSchema for Section8 {
    const SECTION: SectionNumber = SectionNumber::from_const(8);
    const EXPECTED_FIELD_COUNT: usize = 10;
    type Field = Section8Field;

    fn create_default(mapper: &SectionMapper<'_>) -> Result<Self, MapperError> {
        let passport = Passport {
            number: mapper.text(NUMBER)?,
            name: PersonName::resolve(mapper, &NAME)?,
            issued: mapper.date(ISSUE_DATE, ISSUE_ESTIMATED)?,
            expires: mapper.date(EXPIRATION_DATE, EXPIRATION_ESTIMATED)?,
        };
        Ok(Self {
            has_passport: yes_no(mapper, HAS_PASSPORT)?,
            passport: Branch::new(passport),
        })
    }

    fn field_mut(
        &mut self,
        field: Section8Field,
        _index: Option<usize>,
    ) -> Result<FieldCell<'_>, MapperError> {
        use Section8Field as F;

        if field == F::HasPassport {
            return Ok(FieldCell::Choice(&mut self.has_passport));
        }
        let passport = self.passport.active_mut(Self::SECTION, field.path())?;
        Ok(match field {
            F::HasPassport => FieldCell::Choice(&mut self.has_passport),
            F::Number => FieldCell::Text(&mut passport.number),
            F::LastName => passport.name.cell(NamePart::Last),
            F::FirstName => passport.name.cell(NamePart::First),
            F::MiddleName => passport.name.cell(NamePart::Middle),
            F::Suffix => passport.name.cell(NamePart::Suffix),
            F::IssueDate => FieldCell::Date(&mut passport.issued, DatePart::Date),
            F::IssueEstimated => FieldCell::Date(&mut passport.issued, DatePart::Estimated),
            F::ExpirationDate => FieldCell::Date(&mut passport.expires, DatePart::Date),
            F::ExpirationEstimated => FieldCell::Date(&mut passport.expires, DatePart::Estimated),
        })
    }

    fn after_update(
        &mut self,
        field: Section8Field,
        _index: Option<usize>,
    ) -> Result<(), MapperError> {
        if field == Section8Field::HasPassport {
            self.passport.set_active(is_yes(&self.has_passport));
        }
        Ok(())
    }
}

impl Validate for Section8 {
    fn validate_into(&self, report: &mut ValidationReport) {
        self.has_passport.validate_into(report);
        if let Some(passport) = self.passport.get() {
            if passport.number.value.trim().is_empty() {
                report.warning(passport.number.field_ref(), "Passport number is missing");
            }
            passport.name.validate_into(report);
            check_date_pair(report, &passport.issued, &passport.expires);
        }
    }
}

section_api!(Section8);

#[cfg(test)]
mod tests {
    use super::*;
    use sf86_mapper::{FieldTree, FieldUpdate, FieldValue};

    #[test]
    fn test_passport_is_gated_by_radio() {
        let catalogs = crate::bundled().unwrap();
        let mut state = create_default(&catalogs).unwrap();
        assert_eq!(flatten_fields(&state).len(), 1);
        assert_eq!(state.bound_ids().len(), 10);

        let err = update_field(&mut state, FieldUpdate::new("passport.number", "X1")).unwrap_err();
        assert!(matches!(err, MapperError::BranchInactive { .. }));

        update_field(&mut state, FieldUpdate::new("hasPassport", "YES")).unwrap();
        update_field(&mut state, FieldUpdate::new("passport.number", "X1")).unwrap();
        let flat = flatten_fields(&state);
        assert_eq!(flat.len(), 10);
        assert_eq!(flat["9579 0 R"], FieldValue::from("X1"));

        update_field(&mut state, FieldUpdate::new("hasPassport", "NO")).unwrap();
        assert_eq!(flatten_fields(&state).len(), 1);
    }

    #[test]
    fn test_expiration_before_issue_is_reported() {
        let catalogs = crate::bundled().unwrap();
        let mut state = create_default(&catalogs).unwrap();
        update_field(&mut state, FieldUpdate::new("hasPassport", "YES")).unwrap();
        update_field(&mut state, FieldUpdate::new("passport.number", "X1")).unwrap();
        update_field(&mut state, FieldUpdate::new("passport.issueDate", "05/2020")).unwrap();
        update_field(&mut state, FieldUpdate::new("passport.expirationDate", "05/2010")).unwrap();

        let report = state.validate();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field_id, "9572 0 R");
    }
}

// crates/sf86-sections/src/section7.rs

//! Section 7: contact information.

use crate::validation::{Validate, ValidationReport};
use serde::{Deserialize, Serialize};
use sf86_mapper::{
    FieldCell, FieldNode, MapperError, SectionMapper, SectionNumber, SectionSchema, field_keys,
    field_tree,
};

pub const HOME_EMAIL: &str = "form1[0].Sections7-9[0].TextField11[13]";
pub const WORK_EMAIL: &str = "form1[0].Sections7-9[0].TextField11[14]";

/// Catalog names of the widgets of one telephone number.
#[derive(Debug, Clone, Copy)]
pub struct PhoneFields {
    pub number: &'static str,
    pub extension: &'static str,
    pub international: &'static str,
    pub day: &'static str,
    pub night: &'static str,
}

pub const HOME_PHONE: PhoneFields = PhoneFields {
    number: "form1[0].Sections7-9[0].p3-t68[0]",
    extension: "form1[0].Sections7-9[0].TextField11[15]",
    international: "form1[0].Sections7-9[0].#field[0]",
    day: "form1[0].Sections7-9[0].#field[1]",
    night: "form1[0].Sections7-9[0].#field[2]",
};

pub const WORK_PHONE: PhoneFields = PhoneFields {
    number: "form1[0].Sections7-9[0].p3-t68[1]",
    extension: "form1[0].Sections7-9[0].TextField11[16]",
    international: "form1[0].Sections7-9[0].#field[4]",
    day: "form1[0].Sections7-9[0].#field[5]",
    night: "form1[0].Sections7-9[0].#field[6]",
};

pub const MOBILE_PHONE: PhoneFields = PhoneFields {
    number: "form1[0].Sections7-9[0].p3-t68[2]",
    extension: "form1[0].Sections7-9[0].TextField11[17]",
    international: "form1[0].Sections7-9[0].#field[8]",
    day: "form1[0].Sections7-9[0].#field[9]",
    night: "form1[0].Sections7-9[0].#field[10]",
};

field_keys! {
    pub enum Section7Field {
        HomeEmail => "homeEmail",
        WorkEmail => "workEmail",
        HomeNumber => "homePhone.number",
        HomeExtension => "homePhone.extension",
        HomeInternational => "homePhone.isInternationalOrDsn",
        HomeDay => "homePhone.day",
        HomeNight => "homePhone.night",
        WorkNumber => "workPhone.number",
        WorkExtension => "workPhone.extension",
        WorkInternational => "workPhone.isInternationalOrDsn",
        WorkDay => "workPhone.day",
        WorkNight => "workPhone.night",
        MobileNumber => "mobilePhone.number",
        MobileExtension => "mobilePhone.extension",
        MobileInternational => "mobilePhone.isInternationalOrDsn",
        MobileDay => "mobilePhone.day",
        MobileNight => "mobilePhone.night",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhonePart {
    Number,
    Extension,
    International,
    Day,
    Night,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    pub number: FieldNode<String>,
    pub extension: FieldNode<String>,
    pub is_international_or_dsn: FieldNode<bool>,
    /// Best reached during the day.
    pub day: FieldNode<bool>,
    pub night: FieldNode<bool>,
}
field_tree!(Phone {
    number,
    extension,
    is_international_or_dsn,
    day,
    night
});

impl Phone {
    pub fn resolve(mapper: &SectionMapper<'_>, names: &PhoneFields) -> Result<Self, MapperError> {
        Ok(Self {
            number: mapper.text(names.number)?,
            extension: mapper.text(names.extension)?,
            is_international_or_dsn: mapper.flag(names.international)?,
            day: mapper.flag(names.day)?,
            night: mapper.flag(names.night)?,
        })
    }

    fn cell(&mut self, part: PhonePart) -> FieldCell<'_> {
        match part {
            PhonePart::Number => FieldCell::Text(&mut self.number),
            PhonePart::Extension => FieldCell::Text(&mut self.extension),
            PhonePart::International => FieldCell::Flag(&mut self.is_international_or_dsn),
            PhonePart::Day => FieldCell::Flag(&mut self.day),
            PhonePart::Night => FieldCell::Flag(&mut self.night),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section7 {
    pub home_email: FieldNode<String>,
    pub work_email: FieldNode<String>,
    pub home_phone: Phone,
    pub work_phone: Phone,
    pub mobile_phone: Phone,
}
field_tree!(Section7 {
    home_email,
    work_email,
    home_phone,
    work_phone,
    mobile_phone
});

impl SectionSchema for Section7 {
    const SECTION: SectionNumber = SectionNumber::from_const(7);
    const EXPECTED_FIELD_COUNT: usize = 17;
    type Field = Section7Field;

    fn create_default(mapper: &SectionMapper<'_>) -> Result<Self, MapperError> {
        Ok(Self {
            home_email: mapper.text(HOME_EMAIL)?,
            work_email: mapper.text(WORK_EMAIL)?,
            home_phone: Phone::resolve(mapper, &HOME_PHONE)?,
            work_phone: Phone::resolve(mapper, &WORK_PHONE)?,
            mobile_phone: Phone::resolve(mapper, &MOBILE_PHONE)?,
        })
    }

    fn field_mut(
        &mut self,
        field: Section7Field,
        _index: Option<usize>,
    ) -> Result<FieldCell<'_>, MapperError> {
        use PhonePart::*;
        use Section7Field as F;

        let (phone, part) = match field {
            F::HomeEmail => return Ok(FieldCell::Text(&mut self.home_email)),
            F::WorkEmail => return Ok(FieldCell::Text(&mut self.work_email)),
            F::HomeNumber => (&mut self.home_phone, Number),
            F::HomeExtension => (&mut self.home_phone, Extension),
            F::HomeInternational => (&mut self.home_phone, International),
            F::HomeDay => (&mut self.home_phone, Day),
            F::HomeNight => (&mut self.home_phone, Night),
            F::WorkNumber => (&mut self.work_phone, Number),
            F::WorkExtension => (&mut self.work_phone, Extension),
            F::WorkInternational => (&mut self.work_phone, International),
            F::WorkDay => (&mut self.work_phone, Day),
            F::WorkNight => (&mut self.work_phone, Night),
            F::MobileNumber => (&mut self.mobile_phone, Number),
            F::MobileExtension => (&mut self.mobile_phone, Extension),
            F::MobileInternational => (&mut self.mobile_phone, International),
            F::MobileDay => (&mut self.mobile_phone, Day),
            F::MobileNight => (&mut self.mobile_phone, Night),
        };
        Ok(phone.cell(part))
    }
}

fn check_email(report: &mut ValidationReport, email: &FieldNode<String>) {
    let value = email.value.trim();
    if value.is_empty() {
        return;
    }
    let well_formed = value
        .split_once('@')
        .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
    if !well_formed {
        report.error(email.field_ref(), format!("'{}' is not an email address", value));
    }
}

impl Validate for Phone {
    fn validate_into(&self, report: &mut ValidationReport) {
        let number = self.number.value.trim();
        if number.is_empty() {
            if !self.extension.value.trim().is_empty() {
                report.warning(self.extension.field_ref(), "Extension without a phone number");
            }
            return;
        }
        let digits = number.chars().filter(char::is_ascii_digit).count();
        // International and DSN numbers follow no fixed length.
        if !self.is_international_or_dsn.value && digits != 10 {
            report.error(
                self.number.field_ref(),
                "A domestic phone number has 10 digits",
            );
        }
    }
}

impl Validate for Section7 {
    fn validate_into(&self, report: &mut ValidationReport) {
        check_email(report, &self.home_email);
        check_email(report, &self.work_email);
        self.home_phone.validate_into(report);
        self.work_phone.validate_into(report);
        self.mobile_phone.validate_into(report);
    }
}

section_api!(Section7);

#[cfg(test)]
mod tests {
    use super::*;
    use sf86_mapper::{FieldUpdate, FieldValue};

    #[test]
    fn test_every_key_reaches_a_distinct_widget() {
        let catalogs = crate::bundled().unwrap();
        let mut state = create_default(&catalogs).unwrap();
        for (i, key) in Section7Field::ALL.iter().enumerate() {
            let value = match key {
                Section7Field::HomeEmail | Section7Field::WorkEmail => FieldValue::from("a@b.c"),
                _ if key.path().ends_with("number") || key.path().ends_with("extension") => {
                    FieldValue::from(format!("{i}"))
                }
                _ => FieldValue::Flag(true),
            };
            update_field(&mut state, FieldUpdate::new(key.path(), value)).unwrap();
        }

        let flat = flatten_fields(&state);
        assert_eq!(flat.len(), 17);
        assert_eq!(flat["9558 0 R"], FieldValue::from("2"));
        assert_eq!(flat["9544 0 R"], FieldValue::Flag(true));
    }

    #[test]
    fn test_contact_validation() {
        let catalogs = crate::bundled().unwrap();
        let mut state = create_default(&catalogs).unwrap();
        update_field(&mut state, FieldUpdate::new("homeEmail", "jane.example.com")).unwrap();
        update_field(&mut state, FieldUpdate::new("mobilePhone.number", "555-0100")).unwrap();
        update_field(&mut state, FieldUpdate::new("workPhone.number", "+44 20 7946 0000"))
            .unwrap();
        update_field(
            &mut state,
            FieldUpdate::new("workPhone.isInternationalOrDsn", true),
        )
        .unwrap();

        let report = state.validate();
        let ids: Vec<_> = report.errors.iter().map(|e| e.field_id.as_str()).collect();
        assert_eq!(ids, ["9560 0 R", "9548 0 R"]);
    }
}

// crates/sf86-sections/src/section9.rs

//! Section 9: citizenship.
//!
//! The status radio selects at most one of four follow-up records (9.1 to
//! 9.4). Only the selected record is flattened; a U.S.-born applicant has
//! none.

use crate::common::{NameFields, NamePart, PersonName, dropdown, is_yes, yes_no};
use crate::validation::{Validate, ValidationReport, check_date_pair};
use serde::{Deserialize, Serialize};
use sf86_mapper::{
    Branch, DateField, DatePart, FieldCell, FieldNode, FieldNodeWithOptions, MapperError,
    SectionMapper, SectionNumber, SectionSchema, field_keys, field_tree,
};
use std::fmt;

macro_rules! s79 {
    ($tail:literal) => {
        concat!("form1[0].Sections7-9[0].", $tail)
    };
}

macro_rules! n9 {
    ($tail:literal) => {
        concat!(r"form1[0].Section9\.1-9\.4[0].", $tail)
    };
}

pub const STATUS: &str = s79!("RadioButtonList[1]");

/// The answer of the citizenship status radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CitizenshipStatus {
    /// U.S. citizen or national by birth in the U.S. or its territories.
    UsBorn,
    /// Born abroad to U.S. parents (9.1).
    UsParents,
    /// Naturalized citizen (9.2).
    Naturalized,
    /// Derived citizenship (9.3).
    Derived,
    /// Not a U.S. citizen (9.4).
    NotUsCitizen,
}

impl CitizenshipStatus {
    pub const ALL: [CitizenshipStatus; 5] = [
        CitizenshipStatus::UsBorn,
        CitizenshipStatus::UsParents,
        CitizenshipStatus::Naturalized,
        CitizenshipStatus::Derived,
        CitizenshipStatus::NotUsCitizen,
    ];

    /// The radio export value.
    pub fn as_option(self) -> &'static str {
        match self {
            CitizenshipStatus::UsBorn => "US_BORN",
            CitizenshipStatus::UsParents => "US_PARENTS",
            CitizenshipStatus::Naturalized => "NATURALIZED",
            CitizenshipStatus::Derived => "DERIVED",
            CitizenshipStatus::NotUsCitizen => "NOT_US",
        }
    }

    pub fn from_option(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_option() == value)
    }
}

impl fmt::Display for CitizenshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_option())
    }
}

field_keys! {
    pub enum Section9Field {
        Status => "status",

        BornDocumentType => "bornToUsParents.documentType",
        BornOtherExplanation => "bornToUsParents.otherExplanation",
        BornDocumentNumber => "bornToUsParents.documentNumber",
        BornIssueDate => "bornToUsParents.issueDate",
        BornIssueEstimated => "bornToUsParents.issueEstimated",
        BornIssueCity => "bornToUsParents.issueCity",
        BornIssueState => "bornToUsParents.issueState",
        BornIssueCountry => "bornToUsParents.issueCountry",
        BornDocumentLastName => "bornToUsParents.nameOnDocument.lastName",
        BornDocumentFirstName => "bornToUsParents.nameOnDocument.firstName",
        BornDocumentMiddleName => "bornToUsParents.nameOnDocument.middleName",
        BornDocumentSuffix => "bornToUsParents.nameOnDocument.suffix",
        BornOnMilitaryInstallation => "bornToUsParents.bornOnMilitaryInstallation",
        BornMilitaryBaseName => "bornToUsParents.militaryBaseName",
        BornCertificateNumber => "bornToUsParents.certificateNumber",
        BornCertificateIssueDate => "bornToUsParents.certificateIssueDate",
        BornCertificateIssueEstimated => "bornToUsParents.certificateIssueEstimated",
        BornCertificateLastName => "bornToUsParents.nameOnCertificate.lastName",
        BornCertificateFirstName => "bornToUsParents.nameOnCertificate.firstName",
        BornCertificateMiddleName => "bornToUsParents.nameOnCertificate.middleName",
        BornCertificateSuffix => "bornToUsParents.nameOnCertificate.suffix",

        NaturalizedCertificateNumber => "naturalized.certificateNumber",
        NaturalizedLastName => "naturalized.nameOnCertificate.lastName",
        NaturalizedFirstName => "naturalized.nameOnCertificate.firstName",
        NaturalizedMiddleName => "naturalized.nameOnCertificate.middleName",
        NaturalizedSuffix => "naturalized.nameOnCertificate.suffix",
        NaturalizedCourtStreet => "naturalized.court.street",
        NaturalizedCourtCity => "naturalized.court.city",
        NaturalizedCourtState => "naturalized.court.state",
        NaturalizedCourtZip => "naturalized.court.zipCode",
        NaturalizedCourtName => "naturalized.court.name",
        NaturalizedCertificateIssueDate => "naturalized.certificateIssueDate",
        NaturalizedCertificateIssueEstimated => "naturalized.certificateIssueEstimated",
        NaturalizedOtherExplanation => "naturalized.otherExplanation",
        NaturalizedEntryDate => "naturalized.entryDate",
        NaturalizedEntryEstimated => "naturalized.entryEstimated",
        NaturalizedEntryCity => "naturalized.entryCity",
        NaturalizedEntryState => "naturalized.entryState",
        NaturalizedPriorCitizenship => "naturalized.priorCitizenship",
        NaturalizedHasAlienRegistration => "naturalized.hasAlienRegistration",

        DerivedAlienRegistrationNumber => "derived.alienRegistrationNumber",
        DerivedPermanentResidentCardNumber => "derived.permanentResidentCardNumber",
        DerivedCertificateOfCitizenshipNumber => "derived.certificateOfCitizenshipNumber",
        DerivedLastName => "derived.nameOnDocument.lastName",
        DerivedFirstName => "derived.nameOnDocument.firstName",
        DerivedMiddleName => "derived.nameOnDocument.middleName",
        DerivedSuffix => "derived.nameOnDocument.suffix",
        DerivedOtherExplanation => "derived.otherExplanation",
        DerivedDocumentIssueDate => "derived.documentIssueDate",
        DerivedDocumentIssueEstimated => "derived.documentIssueEstimated",
        DerivedBasisOperationOfLaw => "derived.basisOperationOfLaw",
        DerivedBasisOther => "derived.basisOther",

        NotUsResidenceStatus => "notUsCitizen.residenceStatus",
        NotUsEntryDate => "notUsCitizen.entryDate",
        NotUsEntryEstimated => "notUsCitizen.entryEstimated",
        NotUsEntryState => "notUsCitizen.entryState",
        NotUsHasAlienRegistration => "notUsCitizen.hasAlienRegistration",
        NotUsAlienRegistrationNumber => "notUsCitizen.alienRegistrationNumber",
        NotUsDocumentNumber => "notUsCitizen.documentNumber",
        NotUsDocumentIssueDate => "notUsCitizen.documentIssueDate",
        NotUsDocumentIssueEstimated => "notUsCitizen.documentIssueEstimated",
        NotUsDocumentExpirationDate => "notUsCitizen.documentExpirationDate",
        NotUsDocumentExpirationEstimated => "notUsCitizen.documentExpirationEstimated",
        NotUsLastName => "notUsCitizen.nameOnDocument.lastName",
        NotUsFirstName => "notUsCitizen.nameOnDocument.firstName",
        NotUsMiddleName => "notUsCitizen.nameOnDocument.middleName",
        NotUsSuffix => "notUsCitizen.nameOnDocument.suffix",
        NotUsExplanation => "notUsCitizen.explanation",
    }
}

impl Section9Field {
    /// The status whose follow-up record holds this field, `None` for the
    /// status radio itself.
    pub fn status(self) -> Option<CitizenshipStatus> {
        match self.path().split_once('.')?.0 {
            "bornToUsParents" => Some(CitizenshipStatus::UsParents),
            "naturalized" => Some(CitizenshipStatus::Naturalized),
            "derived" => Some(CitizenshipStatus::Derived),
            "notUsCitizen" => Some(CitizenshipStatus::NotUsCitizen),
            _ => None,
        }
    }
}

/// A key routed to a record it does not belong to.
fn foreign_key(field: Section9Field) -> MapperError {
    MapperError::UnknownFieldPath {
        section: Section9::SECTION,
        path: field.path().into(),
    }
}

// --- 9.1 Born to U.S. parents ---

pub const DOCUMENT_TYPE_OTHER: &str = "OTHER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BornToUsParents {
    pub document_type: FieldNodeWithOptions<String>,
    pub other_explanation: FieldNode<String>,
    pub document_number: FieldNode<String>,
    pub document_issued: DateField,
    pub issue_city: FieldNode<String>,
    pub issue_state: FieldNodeWithOptions<String>,
    pub issue_country: FieldNodeWithOptions<String>,
    pub name_on_document: PersonName,
    pub born_on_military_installation: FieldNodeWithOptions<String>,
    pub military_base_name: FieldNode<String>,
    pub certificate_number: FieldNode<String>,
    pub certificate_issued: DateField,
    pub name_on_certificate: PersonName,
}
field_tree!(BornToUsParents {
    document_type,
    other_explanation,
    document_number,
    document_issued,
    issue_city,
    issue_state,
    issue_country,
    name_on_document,
    born_on_military_installation,
    military_base_name,
    certificate_number,
    certificate_issued,
    name_on_certificate
});

impl BornToUsParents {
    fn resolve(mapper: &SectionMapper<'_>) -> Result<Self, MapperError> {
        Ok(Self {
            document_type: dropdown(mapper, s79!("RadioButtonList[3]"))?,
            other_explanation: mapper.text(s79!("TextField11[3]"))?,
            document_number: mapper.text(s79!("TextField11[4]"))?,
            document_issued: mapper.date(s79!("From_Datefield_Name_2[1]"), s79!("#field[25]"))?,
            issue_city: mapper.text(s79!("TextField11[5]"))?,
            issue_state: dropdown(mapper, s79!("School6_State[0]"))?,
            issue_country: dropdown(mapper, s79!("DropDownList12[0]"))?,
            name_on_document: PersonName::resolve(
                mapper,
                &NameFields {
                    last: s79!("TextField11[7]"),
                    first: s79!("TextField11[8]"),
                    middle: s79!("TextField11[6]"),
                    suffix: s79!("suffix[1]"),
                },
            )?,
            born_on_military_installation: yes_no(mapper, s79!("RadioButtonList[2]"))?,
            military_base_name: mapper.text(s79!("TextField11[18]"))?,
            certificate_number: mapper.text(s79!("TextField11[12]"))?,
            certificate_issued: mapper
                .date(s79!("From_Datefield_Name_2[2]"), s79!("#field[28]"))?,
            name_on_certificate: PersonName::resolve(
                mapper,
                &NameFields {
                    last: s79!("TextField11[10]"),
                    first: s79!("TextField11[11]"),
                    middle: s79!("TextField11[9]"),
                    suffix: s79!("suffix[2]"),
                },
            )?,
        })
    }

    fn cell(&mut self, field: Section9Field) -> Result<FieldCell<'_>, MapperError> {
        use Section9Field as F;
        Ok(match field {
            F::BornDocumentType => FieldCell::Choice(&mut self.document_type),
            F::BornOtherExplanation => FieldCell::Text(&mut self.other_explanation),
            F::BornDocumentNumber => FieldCell::Text(&mut self.document_number),
            F::BornIssueDate => FieldCell::Date(&mut self.document_issued, DatePart::Date),
            F::BornIssueEstimated => FieldCell::Date(&mut self.document_issued, DatePart::Estimated),
            F::BornIssueCity => FieldCell::Text(&mut self.issue_city),
            F::BornIssueState => FieldCell::Choice(&mut self.issue_state),
            F::BornIssueCountry => FieldCell::Choice(&mut self.issue_country),
            F::BornDocumentLastName => self.name_on_document.cell(NamePart::Last),
            F::BornDocumentFirstName => self.name_on_document.cell(NamePart::First),
            F::BornDocumentMiddleName => self.name_on_document.cell(NamePart::Middle),
            F::BornDocumentSuffix => self.name_on_document.cell(NamePart::Suffix),
            F::BornOnMilitaryInstallation => {
                FieldCell::Choice(&mut self.born_on_military_installation)
            }
            F::BornMilitaryBaseName => FieldCell::Text(&mut self.military_base_name),
            F::BornCertificateNumber => FieldCell::Text(&mut self.certificate_number),
            F::BornCertificateIssueDate => {
                FieldCell::Date(&mut self.certificate_issued, DatePart::Date)
            }
            F::BornCertificateIssueEstimated => {
                FieldCell::Date(&mut self.certificate_issued, DatePart::Estimated)
            }
            F::BornCertificateLastName => self.name_on_certificate.cell(NamePart::Last),
            F::BornCertificateFirstName => self.name_on_certificate.cell(NamePart::First),
            F::BornCertificateMiddleName => self.name_on_certificate.cell(NamePart::Middle),
            F::BornCertificateSuffix => self.name_on_certificate.cell(NamePart::Suffix),
            other => return Err(foreign_key(other)),
        })
    }
}

impl Validate for BornToUsParents {
    fn validate_into(&self, report: &mut ValidationReport) {
        self.document_type.validate_into(report);
        if self.document_type.value == DOCUMENT_TYPE_OTHER
            && self.other_explanation.value.trim().is_empty()
        {
            report.warning(
                self.other_explanation.field_ref(),
                "Explain the type of document provided",
            );
        }
        self.document_issued.validate_into(report);
        self.issue_state.validate_into(report);
        self.issue_country.validate_into(report);
        self.name_on_document.validate_into(report);
        self.born_on_military_installation.validate_into(report);
        if is_yes(&self.born_on_military_installation)
            && self.military_base_name.value.trim().is_empty()
        {
            report.warning(
                self.military_base_name.field_ref(),
                "Name the military installation",
            );
        }
        self.certificate_issued.validate_into(report);
        self.name_on_certificate.validate_into(report);
    }
}

// --- 9.2 Naturalized ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtAddress {
    pub street: FieldNode<String>,
    pub city: FieldNode<String>,
    pub state: FieldNodeWithOptions<String>,
    pub zip_code: FieldNode<String>,
    pub name: FieldNode<String>,
}
field_tree!(CourtAddress {
    street,
    city,
    state,
    zip_code,
    name
});

pub const PRIOR_CITIZENSHIP: [&str; 4] = [
    n9!("DropDownList15[0]"),
    n9!("DropDownList15[1]"),
    n9!("DropDownList15[2]"),
    n9!("DropDownList15[3]"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Naturalized {
    pub certificate_number: FieldNode<String>,
    pub name_on_certificate: PersonName,
    pub court: CourtAddress,
    pub certificate_issued: DateField,
    pub other_explanation: FieldNode<String>,
    pub entry_date: DateField,
    pub entry_city: FieldNode<String>,
    pub entry_state: FieldNodeWithOptions<String>,
    /// Countries of citizenship before naturalization.
    pub prior_citizenship: Vec<FieldNodeWithOptions<String>>,
    pub has_alien_registration: FieldNodeWithOptions<String>,
}
field_tree!(Naturalized {
    certificate_number,
    name_on_certificate,
    court,
    certificate_issued,
    other_explanation,
    entry_date,
    entry_city,
    entry_state,
    prior_citizenship,
    has_alien_registration
});

impl Naturalized {
    fn resolve(mapper: &SectionMapper<'_>) -> Result<Self, MapperError> {
        Ok(Self {
            certificate_number: mapper.text(n9!("TextField11[6]"))?,
            name_on_certificate: PersonName::resolve(
                mapper,
                &NameFields {
                    last: n9!("TextField11[2]"),
                    first: n9!("TextField11[3]"),
                    middle: n9!("TextField11[1]"),
                    suffix: n9!("suffix[0]"),
                },
            )?,
            court: CourtAddress {
                street: mapper.text(n9!("TextField11[4]"))?,
                city: mapper.text(n9!("TextField11[0]"))?,
                state: dropdown(mapper, n9!("School6_State[0]"))?,
                zip_code: mapper.text(n9!("TextField11[5]"))?,
                name: mapper.text(n9!("TextField11[15]"))?,
            },
            certificate_issued: mapper.date(n9!("From_Datefield_Name_2[0]"), n9!("#field[10]"))?,
            other_explanation: mapper.text(n9!("TextField11[7]"))?,
            entry_date: mapper.date(n9!("From_Datefield_Name_2[4]"), n9!("#field[32]"))?,
            entry_city: mapper.text(n9!("TextField11[16]"))?,
            entry_state: dropdown(mapper, n9!("School6_State[1]"))?,
            prior_citizenship: PRIOR_CITIZENSHIP
                .iter()
                .map(|name| dropdown(mapper, name))
                .collect::<Result<_, _>>()?,
            has_alien_registration: yes_no(mapper, n9!("RadioButtonList[1]"))?,
        })
    }

    fn cell(
        &mut self,
        field: Section9Field,
        index: Option<usize>,
    ) -> Result<FieldCell<'_>, MapperError> {
        use Section9Field as F;
        Ok(match field {
            F::NaturalizedCertificateNumber => FieldCell::Text(&mut self.certificate_number),
            F::NaturalizedLastName => self.name_on_certificate.cell(NamePart::Last),
            F::NaturalizedFirstName => self.name_on_certificate.cell(NamePart::First),
            F::NaturalizedMiddleName => self.name_on_certificate.cell(NamePart::Middle),
            F::NaturalizedSuffix => self.name_on_certificate.cell(NamePart::Suffix),
            F::NaturalizedCourtStreet => FieldCell::Text(&mut self.court.street),
            F::NaturalizedCourtCity => FieldCell::Text(&mut self.court.city),
            F::NaturalizedCourtState => FieldCell::Choice(&mut self.court.state),
            F::NaturalizedCourtZip => FieldCell::Text(&mut self.court.zip_code),
            F::NaturalizedCourtName => FieldCell::Text(&mut self.court.name),
            F::NaturalizedCertificateIssueDate => {
                FieldCell::Date(&mut self.certificate_issued, DatePart::Date)
            }
            F::NaturalizedCertificateIssueEstimated => {
                FieldCell::Date(&mut self.certificate_issued, DatePart::Estimated)
            }
            F::NaturalizedOtherExplanation => FieldCell::Text(&mut self.other_explanation),
            F::NaturalizedEntryDate => FieldCell::Date(&mut self.entry_date, DatePart::Date),
            F::NaturalizedEntryEstimated => {
                FieldCell::Date(&mut self.entry_date, DatePart::Estimated)
            }
            F::NaturalizedEntryCity => FieldCell::Text(&mut self.entry_city),
            F::NaturalizedEntryState => FieldCell::Choice(&mut self.entry_state),
            F::NaturalizedPriorCitizenship => {
                let index = index.unwrap_or(0);
                let len = self.prior_citizenship.len();
                let country = self.prior_citizenship.get_mut(index).ok_or(
                    MapperError::EntryIndexOutOfRange {
                        section: Section9::SECTION,
                        index,
                        len,
                    },
                )?;
                FieldCell::Choice(country)
            }
            F::NaturalizedHasAlienRegistration => {
                FieldCell::Choice(&mut self.has_alien_registration)
            }
            other => return Err(foreign_key(other)),
        })
    }
}

impl Validate for Naturalized {
    fn validate_into(&self, report: &mut ValidationReport) {
        if self.certificate_number.value.trim().is_empty() {
            report.warning(
                self.certificate_number.field_ref(),
                "Naturalization certificate number is missing",
            );
        }
        self.name_on_certificate.validate_into(report);
        self.court.state.validate_into(report);
        check_date_pair(report, &self.entry_date, &self.certificate_issued);
        self.entry_state.validate_into(report);
        self.prior_citizenship.validate_into(report);
        self.has_alien_registration.validate_into(report);
    }
}

// --- 9.3 Derived ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Derived {
    pub alien_registration_number: FieldNode<String>,
    pub permanent_resident_card_number: FieldNode<String>,
    pub certificate_of_citizenship_number: FieldNode<String>,
    pub name_on_document: PersonName,
    pub other_explanation: FieldNode<String>,
    pub document_issued: DateField,
    pub basis_operation_of_law: FieldNode<bool>,
    pub basis_other: FieldNode<bool>,
}
field_tree!(Derived {
    alien_registration_number,
    permanent_resident_card_number,
    certificate_of_citizenship_number,
    name_on_document,
    other_explanation,
    document_issued,
    basis_operation_of_law,
    basis_other
});

impl Derived {
    fn resolve(mapper: &SectionMapper<'_>) -> Result<Self, MapperError> {
        Ok(Self {
            alien_registration_number: mapper.text(n9!("TextField11[17]"))?,
            permanent_resident_card_number: mapper.text(n9!("TextField11[18]"))?,
            certificate_of_citizenship_number: mapper.text(n9!("TextField11[19]"))?,
            name_on_document: PersonName::resolve(
                mapper,
                &NameFields {
                    last: n9!("TextField11[22]"),
                    first: n9!("TextField11[20]"),
                    middle: n9!("TextField11[21]"),
                    suffix: n9!("suffix[2]"),
                },
            )?,
            other_explanation: mapper.text(n9!("TextField11[23]"))?,
            document_issued: mapper.date(n9!("From_Datefield_Name_2[5]"), n9!("#field[50]"))?,
            basis_operation_of_law: mapper.flag(n9!("#field[28]"))?,
            basis_other: mapper.flag(n9!("#field[27]"))?,
        })
    }

    fn cell(&mut self, field: Section9Field) -> Result<FieldCell<'_>, MapperError> {
        use Section9Field as F;
        Ok(match field {
            F::DerivedAlienRegistrationNumber => {
                FieldCell::Text(&mut self.alien_registration_number)
            }
            F::DerivedPermanentResidentCardNumber => {
                FieldCell::Text(&mut self.permanent_resident_card_number)
            }
            F::DerivedCertificateOfCitizenshipNumber => {
                FieldCell::Text(&mut self.certificate_of_citizenship_number)
            }
            F::DerivedLastName => self.name_on_document.cell(NamePart::Last),
            F::DerivedFirstName => self.name_on_document.cell(NamePart::First),
            F::DerivedMiddleName => self.name_on_document.cell(NamePart::Middle),
            F::DerivedSuffix => self.name_on_document.cell(NamePart::Suffix),
            F::DerivedOtherExplanation => FieldCell::Text(&mut self.other_explanation),
            F::DerivedDocumentIssueDate => {
                FieldCell::Date(&mut self.document_issued, DatePart::Date)
            }
            F::DerivedDocumentIssueEstimated => {
                FieldCell::Date(&mut self.document_issued, DatePart::Estimated)
            }
            F::DerivedBasisOperationOfLaw => FieldCell::Flag(&mut self.basis_operation_of_law),
            F::DerivedBasisOther => FieldCell::Flag(&mut self.basis_other),
            other => return Err(foreign_key(other)),
        })
    }
}

impl Validate for Derived {
    fn validate_into(&self, report: &mut ValidationReport) {
        let numbers = [
            &self.alien_registration_number,
            &self.permanent_resident_card_number,
            &self.certificate_of_citizenship_number,
        ];
        if numbers.iter().all(|node| node.value.trim().is_empty()) {
            report.warning(
                self.certificate_of_citizenship_number.field_ref(),
                "Provide at least one document number",
            );
        }
        self.name_on_document.validate_into(report);
        self.document_issued.validate_into(report);
        if self.basis_other.value && self.other_explanation.value.trim().is_empty() {
            report.warning(
                self.other_explanation.field_ref(),
                "Explain how citizenship was derived",
            );
        }
    }
}

// --- 9.4 Not a U.S. citizen ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotUsCitizen {
    pub residence_status: FieldNode<String>,
    pub entry_date: DateField,
    pub entry_state: FieldNodeWithOptions<String>,
    pub has_alien_registration: FieldNodeWithOptions<String>,
    pub alien_registration_number: FieldNode<String>,
    pub document_number: FieldNode<String>,
    pub document_issued: DateField,
    pub document_expires: DateField,
    pub name_on_document: PersonName,
    pub explanation: FieldNode<String>,
}
field_tree!(NotUsCitizen {
    residence_status,
    entry_date,
    entry_state,
    has_alien_registration,
    alien_registration_number,
    document_number,
    document_issued,
    document_expires,
    name_on_document,
    explanation
});

impl NotUsCitizen {
    fn resolve(mapper: &SectionMapper<'_>) -> Result<Self, MapperError> {
        Ok(Self {
            residence_status: mapper.text(n9!("TextField11[8]"))?,
            entry_date: mapper.date(n9!("From_Datefield_Name_2[1]"), n9!("#field[15]"))?,
            entry_state: dropdown(mapper, n9!("School6_State[2]"))?,
            has_alien_registration: yes_no(mapper, n9!("RadioButtonList[0]"))?,
            alien_registration_number: mapper.text(n9!("TextField11[9]"))?,
            document_number: mapper.text(n9!("TextField11[13]"))?,
            document_issued: mapper.date(n9!("From_Datefield_Name_2[2]"), n9!("#field[18]"))?,
            document_expires: mapper.date(n9!("From_Datefield_Name_2[3]"), n9!("#field[26]"))?,
            name_on_document: PersonName::resolve(
                mapper,
                &NameFields {
                    last: n9!("TextField11[11]"),
                    first: n9!("TextField11[12]"),
                    middle: n9!("TextField11[10]"),
                    suffix: n9!("suffix[1]"),
                },
            )?,
            explanation: mapper.text(n9!("TextField11[14]"))?,
        })
    }

    fn cell(&mut self, field: Section9Field) -> Result<FieldCell<'_>, MapperError> {
        use Section9Field as F;
        Ok(match field {
            F::NotUsResidenceStatus => FieldCell::Text(&mut self.residence_status),
            F::NotUsEntryDate => FieldCell::Date(&mut self.entry_date, DatePart::Date),
            F::NotUsEntryEstimated => FieldCell::Date(&mut self.entry_date, DatePart::Estimated),
            F::NotUsEntryState => FieldCell::Choice(&mut self.entry_state),
            F::NotUsHasAlienRegistration => FieldCell::Choice(&mut self.has_alien_registration),
            F::NotUsAlienRegistrationNumber => {
                FieldCell::Text(&mut self.alien_registration_number)
            }
            F::NotUsDocumentNumber => FieldCell::Text(&mut self.document_number),
            F::NotUsDocumentIssueDate => FieldCell::Date(&mut self.document_issued, DatePart::Date),
            F::NotUsDocumentIssueEstimated => {
                FieldCell::Date(&mut self.document_issued, DatePart::Estimated)
            }
            F::NotUsDocumentExpirationDate => {
                FieldCell::Date(&mut self.document_expires, DatePart::Date)
            }
            F::NotUsDocumentExpirationEstimated => {
                FieldCell::Date(&mut self.document_expires, DatePart::Estimated)
            }
            F::NotUsLastName => self.name_on_document.cell(NamePart::Last),
            F::NotUsFirstName => self.name_on_document.cell(NamePart::First),
            F::NotUsMiddleName => self.name_on_document.cell(NamePart::Middle),
            F::NotUsSuffix => self.name_on_document.cell(NamePart::Suffix),
            F::NotUsExplanation => FieldCell::Text(&mut self.explanation),
            other => return Err(foreign_key(other)),
        })
    }
}

impl Validate for NotUsCitizen {
    fn validate_into(&self, report: &mut ValidationReport) {
        self.entry_date.validate_into(report);
        self.entry_state.validate_into(report);
        self.has_alien_registration.validate_into(report);
        if is_yes(&self.has_alien_registration)
            && self.alien_registration_number.value.trim().is_empty()
        {
            report.warning(
                self.alien_registration_number.field_ref(),
                "Alien registration number is missing",
            );
        }
        check_date_pair(report, &self.document_issued, &self.document_expires);
        self.name_on_document.validate_into(report);
    }
}

// --- Section state ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section9 {
    pub status: FieldNodeWithOptions<String>,
    pub born_to_us_parents: Branch<BornToUsParents>,
    pub naturalized: Branch<Naturalized>,
    pub derived: Branch<Derived>,
    pub not_us_citizen: Branch<NotUsCitizen>,
}
field_tree!(Section9 {
    status,
    born_to_us_parents,
    naturalized,
    derived,
    not_us_citizen
});

impl Section9 {
    /// The parsed status answer, `None` while unanswered or unrecognized.
    pub fn citizenship_status(&self) -> Option<CitizenshipStatus> {
        CitizenshipStatus::from_option(&self.status.value)
    }

    fn sync_branches(&mut self) {
        let status = self.citizenship_status();
        self.born_to_us_parents
            .set_active(status == Some(CitizenshipStatus::UsParents));
        self.naturalized
            .set_active(status == Some(CitizenshipStatus::Naturalized));
        self.derived.set_active(status == Some(CitizenshipStatus::Derived));
        self.not_us_citizen
            .set_active(status == Some(CitizenshipStatus::NotUsCitizen));
    }
}

impl SectionSchema for Section9 {
    const SECTION: SectionNumber = SectionNumber::from_const(9);
    const EXPECTED_FIELD_COUNT: usize = 72;
    type Field = Section9Field;

    fn create_default(mapper: &SectionMapper<'_>) -> Result<Self, MapperError> {
        Ok(Self {
            status: dropdown(mapper, STATUS)?,
            born_to_us_parents: Branch::new(BornToUsParents::resolve(mapper)?),
            naturalized: Branch::new(Naturalized::resolve(mapper)?),
            derived: Branch::new(Derived::resolve(mapper)?),
            not_us_citizen: Branch::new(NotUsCitizen::resolve(mapper)?),
        })
    }

    fn field_mut(
        &mut self,
        field: Section9Field,
        index: Option<usize>,
    ) -> Result<FieldCell<'_>, MapperError> {
        let path = field.path();
        match field.status() {
            None => Ok(FieldCell::Choice(&mut self.status)),
            Some(CitizenshipStatus::UsParents) => self
                .born_to_us_parents
                .active_mut(Self::SECTION, path)?
                .cell(field),
            Some(CitizenshipStatus::Naturalized) => self
                .naturalized
                .active_mut(Self::SECTION, path)?
                .cell(field, index),
            Some(CitizenshipStatus::Derived) => {
                self.derived.active_mut(Self::SECTION, path)?.cell(field)
            }
            Some(CitizenshipStatus::NotUsCitizen) => self
                .not_us_citizen
                .active_mut(Self::SECTION, path)?
                .cell(field),
            Some(CitizenshipStatus::UsBorn) => Err(foreign_key(field)),
        }
    }

    fn after_update(
        &mut self,
        field: Section9Field,
        _index: Option<usize>,
    ) -> Result<(), MapperError> {
        if field == Section9Field::Status {
            self.sync_branches();
        }
        Ok(())
    }
}

impl Validate for Section9 {
    fn validate_into(&self, report: &mut ValidationReport) {
        if self.status.value.is_empty() {
            report.warning(self.status.field_ref(), "Citizenship status not answered");
        }
        self.status.validate_into(report);
        self.born_to_us_parents.validate_into(report);
        self.naturalized.validate_into(report);
        self.derived.validate_into(report);
        self.not_us_citizen.validate_into(report);
    }
}

section_api!(Section9);

// crates/sf86-sections/src/section11.rs

//! Section 11: where you have lived.
//!
//! Each of the four residence entries lives on its own subform
//! (`Section11`, `Section11-2`, ...) with identical widget names. An entry's
//! APO/FPO address is only flattened while its "isApoFpo" radio is YES.

use crate::common::{dropdown, is_yes, yes_no};
use crate::validation::{Validate, ValidationReport};
use log::debug;
use serde::{Deserialize, Serialize};
use sf86_mapper::{
    Branch, DateRange, DateRangeNames, Entries, FieldCell, FieldNode, FieldNodeWithOptions,
    MapperError, RangePart, SectionMapper, SectionNumber, SectionSchema, field_keys, field_tree,
};

pub const RESIDENCE_TYPE_OTHER: &str = "OTHER";

/// Catalog names of the widgets of one residence entry.
#[derive(Debug, Clone, Copy)]
pub struct ResidenceFields {
    pub period: DateRangeNames,
    pub residence_type: &'static str,
    pub residence_type_other: &'static str,
    pub street: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub zip_code: &'static str,
    pub country: &'static str,
    pub is_apo_fpo: &'static str,
    pub apo_street: &'static str,
    pub apo_type: &'static str,
    pub apo_state_code: &'static str,
    pub apo_zip_code: &'static str,
    pub contact_last_name: &'static str,
    pub contact_first_name: &'static str,
    pub contact_phone: &'static str,
}

macro_rules! residence_slot {
    ($subform:literal) => {
        ResidenceFields {
            period: DateRangeNames {
                from_date: concat!($subform, ".From_Datefield_Name_2[0]"),
                from_estimated: concat!($subform, ".#field[15]"),
                to_date: concat!($subform, ".From_Datefield_Name_2[1]"),
                to_estimated: concat!($subform, ".#field[18]"),
                present: concat!($subform, ".#field[17]"),
            },
            residence_type: concat!($subform, ".RadioButtonList[0]"),
            residence_type_other: concat!($subform, ".TextField11[12]"),
            street: concat!($subform, ".TextField11[3]"),
            city: concat!($subform, ".TextField11[4]"),
            state: concat!($subform, ".School6_State[0]"),
            zip_code: concat!($subform, ".TextField11[5]"),
            country: concat!($subform, ".DropDownList5[0]"),
            is_apo_fpo: concat!($subform, ".RadioButtonList[1]"),
            apo_street: concat!($subform, ".TextField11[13]"),
            apo_type: concat!($subform, ".DropDownList20[0]"),
            apo_state_code: concat!($subform, ".DropDownList6[0]"),
            apo_zip_code: concat!($subform, ".TextField11[14]"),
            contact_last_name: concat!($subform, ".TextField11[0]"),
            contact_first_name: concat!($subform, ".TextField11[1]"),
            contact_phone: concat!($subform, ".p3-t68[0]"),
        }
    };
}

pub const RESIDENCE_SLOTS: [ResidenceFields; 4] = [
    residence_slot!("form1[0].Section11[0]"),
    residence_slot!("form1[0].Section11-2[0]"),
    residence_slot!("form1[0].Section11-3[0]"),
    residence_slot!("form1[0].Section11-4[0]"),
];

field_keys! {
    pub enum Section11Field {
        FromDate => "residences.fromDate",
        FromEstimated => "residences.fromEstimated",
        ToDate => "residences.toDate",
        ToEstimated => "residences.toEstimated",
        Present => "residences.present",
        ResidenceType => "residences.residenceType",
        ResidenceTypeOther => "residences.residenceTypeOther",
        Street => "residences.address.street",
        City => "residences.address.city",
        State => "residences.address.state",
        ZipCode => "residences.address.zipCode",
        Country => "residences.address.country",
        IsApoFpo => "residences.isApoFpo",
        ApoStreet => "residences.apoFpo.street",
        ApoType => "residences.apoFpo.type",
        ApoStateCode => "residences.apoFpo.stateCode",
        ApoZipCode => "residences.apoFpo.zipCode",
        ContactLastName => "residences.contact.lastName",
        ContactFirstName => "residences.contact.firstName",
        ContactPhone => "residences.contact.phone",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: FieldNode<String>,
    pub city: FieldNode<String>,
    pub state: FieldNodeWithOptions<String>,
    pub zip_code: FieldNode<String>,
    pub country: FieldNodeWithOptions<String>,
}
field_tree!(Address {
    street,
    city,
    state,
    zip_code,
    country
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApoFpoAddress {
    pub street: FieldNode<String>,
    /// APO, FPO or DPO.
    pub apo_type: FieldNodeWithOptions<String>,
    /// AA, AE or AP.
    pub state_code: FieldNodeWithOptions<String>,
    pub zip_code: FieldNode<String>,
}
field_tree!(ApoFpoAddress {
    street,
    apo_type,
    state_code,
    zip_code
});

/// Someone who knew the applicant at this address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub last_name: FieldNode<String>,
    pub first_name: FieldNode<String>,
    pub phone: FieldNode<String>,
}
field_tree!(Contact {
    last_name,
    first_name,
    phone
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Residence {
    pub period: DateRange,
    pub residence_type: FieldNodeWithOptions<String>,
    pub residence_type_other: FieldNode<String>,
    pub address: Address,
    pub is_apo_fpo: FieldNodeWithOptions<String>,
    pub apo_fpo_address: Branch<ApoFpoAddress>,
    pub contact: Contact,
}
field_tree!(Residence {
    period,
    residence_type,
    residence_type_other,
    address,
    is_apo_fpo,
    apo_fpo_address,
    contact
});

impl Residence {
    pub fn resolve(mapper: &SectionMapper<'_>, names: &ResidenceFields) -> Result<Self, MapperError> {
        let apo_fpo = ApoFpoAddress {
            street: mapper.text(names.apo_street)?,
            apo_type: dropdown(mapper, names.apo_type)?,
            state_code: dropdown(mapper, names.apo_state_code)?,
            zip_code: mapper.text(names.apo_zip_code)?,
        };
        Ok(Self {
            period: mapper.date_range(&names.period)?,
            residence_type: dropdown(mapper, names.residence_type)?,
            residence_type_other: mapper.text(names.residence_type_other)?,
            address: Address {
                street: mapper.text(names.street)?,
                city: mapper.text(names.city)?,
                state: dropdown(mapper, names.state)?,
                zip_code: mapper.text(names.zip_code)?,
                country: dropdown(mapper, names.country)?,
            },
            is_apo_fpo: yes_no(mapper, names.is_apo_fpo)?,
            apo_fpo_address: Branch::new(apo_fpo),
            contact: Contact {
                last_name: mapper.text(names.contact_last_name)?,
                first_name: mapper.text(names.contact_first_name)?,
                phone: mapper.text(names.contact_phone)?,
            },
        })
    }

    fn cell(&mut self, field: Section11Field) -> Result<FieldCell<'_>, MapperError> {
        use Section11Field as F;

        Ok(match field {
            F::FromDate => FieldCell::Range(&mut self.period, RangePart::FromDate),
            F::FromEstimated => FieldCell::Range(&mut self.period, RangePart::FromEstimated),
            F::ToDate => FieldCell::Range(&mut self.period, RangePart::ToDate),
            F::ToEstimated => FieldCell::Range(&mut self.period, RangePart::ToEstimated),
            F::Present => FieldCell::Range(&mut self.period, RangePart::Present),
            F::ResidenceType => FieldCell::Choice(&mut self.residence_type),
            F::ResidenceTypeOther => FieldCell::Text(&mut self.residence_type_other),
            F::Street => FieldCell::Text(&mut self.address.street),
            F::City => FieldCell::Text(&mut self.address.city),
            F::State => FieldCell::Choice(&mut self.address.state),
            F::ZipCode => FieldCell::Text(&mut self.address.zip_code),
            F::Country => FieldCell::Choice(&mut self.address.country),
            F::IsApoFpo => FieldCell::Choice(&mut self.is_apo_fpo),
            F::ApoStreet | F::ApoType | F::ApoStateCode | F::ApoZipCode => {
                let apo = self
                    .apo_fpo_address
                    .active_mut(Section11::SECTION, field.path())?;
                match field {
                    F::ApoStreet => FieldCell::Text(&mut apo.street),
                    F::ApoType => FieldCell::Choice(&mut apo.apo_type),
                    F::ApoStateCode => FieldCell::Choice(&mut apo.state_code),
                    _ => FieldCell::Text(&mut apo.zip_code),
                }
            }
            F::ContactLastName => FieldCell::Text(&mut self.contact.last_name),
            F::ContactFirstName => FieldCell::Text(&mut self.contact.first_name),
            F::ContactPhone => FieldCell::Text(&mut self.contact.phone),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section11 {
    pub residences: Entries<Residence>,
}
field_tree!(Section11 { residences });

impl SectionSchema for Section11 {
    const SECTION: SectionNumber = SectionNumber::from_const(11);
    const EXPECTED_FIELD_COUNT: usize = 80;
    type Field = Section11Field;

    fn create_default(mapper: &SectionMapper<'_>) -> Result<Self, MapperError> {
        let slots = RESIDENCE_SLOTS
            .iter()
            .map(|names| Residence::resolve(mapper, names))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            residences: Entries::new(Self::SECTION, slots, 1),
        })
    }

    fn field_mut(
        &mut self,
        field: Section11Field,
        index: Option<usize>,
    ) -> Result<FieldCell<'_>, MapperError> {
        self.residences.entry_mut(index.unwrap_or(0))?.cell(field)
    }

    fn after_update(
        &mut self,
        field: Section11Field,
        index: Option<usize>,
    ) -> Result<(), MapperError> {
        if field == Section11Field::IsApoFpo {
            let residence = self.residences.entry_mut(index.unwrap_or(0))?;
            let active = is_yes(&residence.is_apo_fpo);
            residence.apo_fpo_address.set_active(active);
        }
        Ok(())
    }
}

/// Adds a residence entry and returns its index.
///
/// # Errors
/// `EntryLimitExceeded` when all four entries are in use.
pub fn add_entry(state: &mut Section11) -> sf86_mapper::Result<usize> {
    state.residences.push()?;
    debug!("Section 11 now has {} residences", state.residences.len());
    Ok(state.residences.len() - 1)
}

/// Removes the last residence entry. The first entry is never removed.
pub fn remove_entry(state: &mut Section11) -> Option<Residence> {
    if state.residences.len() > 1 {
        state.residences.pop()
    } else {
        None
    }
}

impl Validate for Residence {
    fn validate_into(&self, report: &mut ValidationReport) {
        self.period.validate_into(report);
        self.residence_type.validate_into(report);
        if self.residence_type.value == RESIDENCE_TYPE_OTHER
            && self.residence_type_other.value.trim().is_empty()
        {
            report.warning(
                self.residence_type_other.field_ref(),
                "Describe the type of residence",
            );
        }
        self.address.state.validate_into(report);
        self.address.country.validate_into(report);
        self.is_apo_fpo.validate_into(report);
        if let Some(apo) = self.apo_fpo_address.get() {
            apo.apo_type.validate_into(report);
            apo.state_code.validate_into(report);
        }
    }
}

impl Validate for Section11 {
    fn validate_into(&self, report: &mut ValidationReport) {
        self.residences.validate_into(report);
    }
}

section_api!(Section11);

#[cfg(test)]
mod tests {
    use super::*;
    use sf86_mapper::{FieldTree, FieldUpdate, FieldValue};

    #[test]
    fn test_default_has_one_residence() {
        let catalogs = crate::bundled().unwrap();
        let state = create_default(&catalogs).unwrap();
        assert_eq!(state.residences.len(), 1);
        assert_eq!(state.bound_ids().len(), 80);
        // Entry without the APO/FPO record: 20 widgets less 4.
        assert_eq!(flatten_fields(&state).len(), 16);
    }

    #[test]
    fn test_apo_fpo_branch_is_per_entry() {
        let catalogs = crate::bundled().unwrap();
        let mut state = create_default(&catalogs).unwrap();
        add_entry(&mut state).unwrap();

        update_field(&mut state, FieldUpdate::new("residences.isApoFpo", "YES").at(1)).unwrap();
        update_field(&mut state, FieldUpdate::new("residences.apoFpo.type", "FPO").at(1))
            .unwrap();
        let flat = flatten_fields(&state);
        assert_eq!(flat["9786 0 R"], FieldValue::from("FPO"));
        assert!(!flat.contains_key("9806 0 R"));

        let err = update_field(&mut state, FieldUpdate::new("residences.apoFpo.type", "FPO"))
            .unwrap_err();
        assert!(matches!(err, MapperError::BranchInactive { .. }));
    }

    #[test]
    fn test_first_entry_is_kept() {
        let catalogs = crate::bundled().unwrap();
        let mut state = create_default(&catalogs).unwrap();
        assert!(remove_entry(&mut state).is_none());
        add_entry(&mut state).unwrap();
        assert!(remove_entry(&mut state).is_some());
        assert_eq!(state.residences.len(), 1);
    }
}

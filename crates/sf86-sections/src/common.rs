// crates/sf86-sections/src/common.rs

//! Building blocks shared by several sections.

use serde::{Deserialize, Serialize};
use sf86_mapper::{
    FieldCell, FieldNode, FieldNodeWithOptions, MapperError, SectionMapper, field_tree,
};

/// Export values of the YES/NO radio groups.
pub const YES: &str = "YES";
pub const NO: &str = "NO";

/// A YES/NO radio group, answered "NO" by default.
pub fn yes_no(
    mapper: &SectionMapper<'_>,
    name: &str,
) -> Result<FieldNodeWithOptions<String>, MapperError> {
    mapper.choice(name, NO, &[YES, NO])
}

pub fn is_yes(radio: &FieldNodeWithOptions<String>) -> bool {
    radio.value == YES
}

/// A dropdown with an empty default and the catalog's option list.
pub fn dropdown(
    mapper: &SectionMapper<'_>,
    name: &str,
) -> Result<FieldNodeWithOptions<String>, MapperError> {
    mapper.choice(name, "", &[])
}

/// Catalog names of the four widgets of a person's name.
#[derive(Debug, Clone, Copy)]
pub struct NameFields {
    pub last: &'static str,
    pub first: &'static str,
    pub middle: &'static str,
    pub suffix: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePart {
    Last,
    First,
    Middle,
    Suffix,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    pub last_name: FieldNode<String>,
    pub first_name: FieldNode<String>,
    pub middle_name: FieldNode<String>,
    pub suffix: FieldNodeWithOptions<String>,
}
field_tree!(PersonName {
    last_name,
    first_name,
    middle_name,
    suffix
});

impl PersonName {
    pub fn resolve(mapper: &SectionMapper<'_>, names: &NameFields) -> Result<Self, MapperError> {
        Ok(Self {
            last_name: mapper.text(names.last)?,
            first_name: mapper.text(names.first)?,
            middle_name: mapper.text(names.middle)?,
            suffix: dropdown(mapper, names.suffix)?,
        })
    }

    pub fn cell(&mut self, part: NamePart) -> FieldCell<'_> {
        match part {
            NamePart::Last => FieldCell::Text(&mut self.last_name),
            NamePart::First => FieldCell::Text(&mut self.first_name),
            NamePart::Middle => FieldCell::Text(&mut self.middle_name),
            NamePart::Suffix => FieldCell::Choice(&mut self.suffix),
        }
    }
}

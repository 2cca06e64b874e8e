// crates/sf86-mapper/src/types.rs

//! Public, ergonomic data structures shared by the catalog, the mapper and
//! the section schemas.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::convert::TryFrom;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Number of numbered sections on the questionnaire.
pub const SECTION_COUNT: u8 = 30;

/// Represents a questionnaire section number, wrapping a `u8` to ensure type safety.
///
/// Valid section numbers are in the range 1-30. This newtype prevents a raw
/// index from being used where a section is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SectionNumber(u8);

impl SectionNumber {
    /// Creates a `SectionNumber` in a const context.
    ///
    /// Panics (at compile time when used in a `const`) if `value` is not in 1-30.
    pub const fn from_const(value: u8) -> Self {
        assert!(value >= 1 && value <= SECTION_COUNT, "section number out of range");
        Self(value)
    }

    /// The raw section number.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The key used for this section in `ApplicantFormValues` and field paths
    /// (`section1` ... `section30`).
    pub fn key(self) -> String {
        let mut key = String::from("section");
        key.push_str(&self.0.to_string());
        key
    }

    /// Parses a `sectionN` key back into a section number.
    pub fn from_key(key: &str) -> Option<SectionNumber> {
        let digits = key.strip_prefix("section")?;
        if digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<u8>().ok().and_then(|n| SectionNumber::try_from(n).ok())
    }

    /// Iterates over all section numbers in ascending order.
    pub fn all() -> impl Iterator<Item = SectionNumber> {
        (1..=SECTION_COUNT).map(SectionNumber)
    }
}

/// Error type for invalid section number creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionNumberError(pub u8);

impl fmt::Display for SectionNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid section number: {}. Valid range is 1-{}.",
            self.0, SECTION_COUNT
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SectionNumberError {}

impl TryFrom<u8> for SectionNumber {
    type Error = SectionNumberError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=SECTION_COUNT => Ok(SectionNumber(value)),
            _ => Err(SectionNumberError(value)),
        }
    }
}

impl From<SectionNumber> for u8 {
    fn from(section: SectionNumber) -> Self {
        section.0
    }
}

impl fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section {}", self.0)
    }
}

/// The semantic widget type of a PDF form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Checkbox,
    Radio,
    Dropdown,
}

impl FieldType {
    /// Maps a catalog type tag to a `FieldType`.
    ///
    /// Accepts the short tags (`text`, `checkbox`, `radio`, `dropdown`) as well as
    /// the PDF library spellings (`PDFTextField`, `PDFCheckBox`, `PDFRadioGroup`,
    /// `PDFDropdown`). Matching is case-insensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        let tag = tag
            .get(..3)
            .filter(|p| p.eq_ignore_ascii_case("pdf"))
            .map_or(tag, |_| &tag[3..]);
        match tag.to_ascii_lowercase().as_str() {
            "text" | "textfield" => Some(FieldType::Text),
            "checkbox" => Some(FieldType::Checkbox),
            "radio" | "radiogroup" | "radiobutton" => Some(FieldType::Radio),
            "dropdown" | "combobox" | "optionlist" => Some(FieldType::Dropdown),
            _ => None,
        }
    }

    /// The short lowercase tag.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Dropdown => "dropdown",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The widget rectangle of a field on its PDF page, in PDF user space units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One row of a section's reference catalog.
///
/// Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Stable identifier used when writing values back into the PDF.
    pub id: String,
    /// Full dotted/bracketed PDF field path, unique within the catalog.
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub rect: Rect,
    /// 1-based PDF page number, when the inspection recorded it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Enumerated choices for dropdown and radio fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// A borrowed view of the identity of one bound field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRef<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub field_type: FieldType,
}

/// A value written into a PDF field.
///
/// Serialized untagged, so a flat field map becomes a plain JSON object of
/// strings and booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Returns the text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Flag(_) => None,
        }
    }

    /// Returns the boolean payload, if any.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }

    /// Short name of the payload kind, used in mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Flag(_) => "flag",
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.into())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_number_range() {
        assert!(SectionNumber::try_from(0).is_err());
        assert_eq!(SectionNumber::try_from(1).unwrap().get(), 1);
        assert_eq!(SectionNumber::try_from(30).unwrap().get(), 30);
        assert_eq!(SectionNumber::try_from(31), Err(SectionNumberError(31)));
        assert_eq!(SectionNumber::from_const(13).key(), "section13");
        assert_eq!(SectionNumber::all().count(), 30);
    }

    #[test]
    fn test_section_key_parsing() {
        assert_eq!(SectionNumber::from_key("section13"), Some(SectionNumber::from_const(13)));
        assert_eq!(SectionNumber::from_key("section30").map(SectionNumber::get), Some(30));
        assert_eq!(SectionNumber::from_key("section31"), None);
        assert_eq!(SectionNumber::from_key("section0"), None);
        assert_eq!(SectionNumber::from_key("section07"), None);
        assert_eq!(SectionNumber::from_key("section+7"), None);
        assert_eq!(SectionNumber::from_key("section"), None);
        assert_eq!(SectionNumber::from_key("notASection"), None);
        for section in SectionNumber::all() {
            assert_eq!(SectionNumber::from_key(&section.key()), Some(section));
        }
    }

    #[test]
    fn test_field_type_tags() {
        assert_eq!(FieldType::from_tag("text"), Some(FieldType::Text));
        assert_eq!(FieldType::from_tag("PDFTextField"), Some(FieldType::Text));
        assert_eq!(FieldType::from_tag("PDFCheckBox"), Some(FieldType::Checkbox));
        assert_eq!(FieldType::from_tag("PDFRadioGroup"), Some(FieldType::Radio));
        assert_eq!(FieldType::from_tag("PDFDropdown"), Some(FieldType::Dropdown));
        assert_eq!(FieldType::from_tag(" Dropdown "), Some(FieldType::Dropdown));
        assert_eq!(FieldType::from_tag("signature"), None);
    }

    #[test]
    fn test_field_value_json_shape() {
        let text = serde_json::to_string(&FieldValue::from("Smith")).unwrap();
        let flag = serde_json::to_string(&FieldValue::from(true)).unwrap();
        assert_eq!(text, "\"Smith\"");
        assert_eq!(flag, "true");
        let back: FieldValue = serde_json::from_str("false").unwrap();
        assert_eq!(back, FieldValue::Flag(false));
    }
}

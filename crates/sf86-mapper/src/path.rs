// crates/sf86-mapper/src/path.rs

//! Parsing of PDF field names such as
//! `form1[0].Section9\.1-9\.4[0].TextField11[6]`.
//!
//! A name is a sequence of segments separated by unescaped periods. A
//! backslash escapes the following character, so `\.` is a literal period
//! inside a segment. Every segment may end with a bracketed decimal index.

use crate::error::MapperError;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// One segment of a field path, with escapes removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub name: String,
    pub index: Option<u32>,
}

/// A parsed PDF field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Parses a full field name.
    ///
    /// # Errors
    /// Returns `MalformedFieldName` for empty segments, dangling escapes or
    /// bracket suffixes that are not a decimal index.
    pub fn parse(raw: &str) -> Result<Self, MapperError> {
        let malformed = |reason| MapperError::MalformedFieldName {
            name: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(malformed("empty name"));
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => return Err(malformed("dangling escape")),
                },
                '.' => {
                    segments.push(parse_segment(core::mem::take(&mut current)).map_err(malformed)?);
                }
                _ => current.push(c),
            }
        }
        segments.push(parse_segment(current).map_err(malformed)?);

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The subform the field lives in (the second segment, e.g. `Sections1-6`).
    pub fn subform(&self) -> Option<&PathSegment> {
        self.segments.get(1)
    }

    /// The widget segment (the last one, e.g. `TextField11[13]`).
    pub fn widget(&self) -> &PathSegment {
        // `parse` always produces at least one segment.
        &self.segments[self.segments.len() - 1]
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            for c in segment.name.chars() {
                if c == '.' || c == '\\' {
                    f.write_str("\\")?;
                }
                write!(f, "{}", c)?;
            }
            if let Some(index) = segment.index {
                write!(f, "[{}]", index)?;
            }
        }
        Ok(())
    }
}

fn parse_segment(text: String) -> Result<PathSegment, &'static str> {
    if text.is_empty() {
        return Err("empty segment");
    }
    if !text.ends_with(']') {
        if text.contains('[') || text.contains(']') {
            return Err("unbalanced brackets");
        }
        return Ok(PathSegment {
            name: text,
            index: None,
        });
    }

    let open = text.rfind('[').ok_or("unbalanced brackets")?;
    let digits = &text[open + 1..text.len() - 1];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err("bracket index is not a decimal number");
    }
    let index = digits.parse::<u32>().map_err(|_| "bracket index out of range")?;
    let name = &text[..open];
    if name.is_empty() {
        return Err("empty segment");
    }
    Ok(PathSegment {
        name: name.to_string(),
        index: Some(index),
    })
}

/// Splits a raw field name into the text before its final bracket index and
/// the index itself: `a[0].TextField11[13]` gives `("a[0].TextField11", 13)`.
///
/// Works on the raw (still escaped) name and returns `None` when the name
/// does not end in a decimal index.
pub fn split_final_index(raw: &str) -> Option<(&str, u32)> {
    let body = raw.strip_suffix(']')?;
    let open = body.rfind('[')?;
    let digits = &body[open + 1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((&body[..open], digits.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_parse_simple_path() {
        let path = FieldPath::parse("form1[0].Sections1-6[0].TextField11[13]").unwrap();
        let names: Vec<_> = path.segments().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["form1", "Sections1-6", "TextField11"]);
        assert_eq!(path.widget().index, Some(13));
        assert_eq!(path.subform().map(|s| s.name.as_str()), Some("Sections1-6"));
    }

    #[test]
    fn test_parse_escaped_periods() {
        let raw = "form1[0].Section9\\.1-9\\.4[0].TextField11[6]";
        let path = FieldPath::parse(raw).unwrap();
        assert_eq!(path.segments().len(), 3);
        assert_eq!(path.segments()[1].name, "Section9.1-9.4");
        assert_eq!(path.segments()[1].index, Some(0));
        assert_eq!(path.to_string(), raw);
    }

    #[test]
    fn test_parse_hash_widgets() {
        let path = FieldPath::parse("form1[0].Section16_3[0].#area[1].#field[4]").unwrap();
        assert_eq!(path.segments()[2].name, "#area");
        assert_eq!(path.widget().name, "#field");
        assert_eq!(path.widget().index, Some(4));
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        for raw in ["", "form1[0]..x[0]", "form1[0].x[a]", "form1[0].x[", "form1[0].x\\", "[0]"] {
            assert!(
                matches!(FieldPath::parse(raw), Err(MapperError::MalformedFieldName { .. })),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_split_final_index() {
        assert_eq!(
            split_final_index("form1[0].Sections1-6[0].TextField11[13]"),
            Some(("form1[0].Sections1-6[0].TextField11", 13))
        );
        assert_eq!(split_final_index("form1[0].Section11"), None);
        assert_eq!(split_final_index("form1[0].x[]"), None);
    }
}

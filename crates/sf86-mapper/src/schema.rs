// crates/sf86-mapper/src/schema.rs

//! The contract between section schemas and the mapping core.
//!
//! Each section provides a key enum (generated with [`field_keys!`]) and maps
//! every key to a [`FieldCell`]. Logical paths such as `section1.lastName`
//! are parsed into a key exactly once, so an unknown path fails before any
//! state is touched.

use crate::catalog::CatalogSet;
use crate::date::{DateField, DatePart, DateRange, RangePart, expect_flag, expect_text};
use crate::error::MapperError;
use crate::flatten::{FieldTree, FlatFieldMap};
use crate::log::{SectionLog, ctx_debug};
use crate::mapper::SectionMapper;
use crate::node::{FieldNode, FieldNodeWithOptions};
use crate::types::{FieldValue, SectionNumber};
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

/// A mutable view of the cell behind one logical field key.
#[derive(Debug)]
pub enum FieldCell<'a> {
    Text(&'a mut FieldNode<String>),
    Flag(&'a mut FieldNode<bool>),
    /// Dropdown or radio value. Values outside the option list are accepted
    /// here and reported by validation.
    Choice(&'a mut FieldNodeWithOptions<String>),
    Date(&'a mut DateField, DatePart),
    Range(&'a mut DateRange, RangePart),
}

impl FieldCell<'_> {
    /// Overwrites the addressed value.
    ///
    /// # Errors
    /// `ValueTypeMismatch` when a text value targets a checkbox or the other
    /// way around.
    pub fn assign(self, value: FieldValue) -> Result<(), MapperError> {
        match self {
            FieldCell::Text(node) => node.value = expect_text(&node.name, value)?,
            FieldCell::Flag(node) => node.value = expect_flag(&node.name, value)?,
            FieldCell::Choice(node) => node.node.value = expect_text(&node.node.name, value)?,
            FieldCell::Date(field, part) => field.assign(part, value)?,
            FieldCell::Range(range, part) => range.assign(part, value)?,
        }
        Ok(())
    }
}

/// An update addressed by logical path, as sent by the form UI.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate<'a> {
    pub field_path: &'a str,
    pub new_value: FieldValue,
    /// Entry index for repeating groups. `None` addresses the first entry.
    pub index: Option<usize>,
}

impl<'a> FieldUpdate<'a> {
    pub fn new(field_path: &'a str, new_value: impl Into<FieldValue>) -> Self {
        Self {
            field_path,
            new_value: new_value.into(),
            index: None,
        }
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// A logical path that does not name a field of the section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldKeyError {
    pub path: String,
}

impl ParseFieldKeyError {
    pub fn new(path: &str) -> Self {
        Self { path: path.into() }
    }
}

impl fmt::Display for ParseFieldKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field key '{}'", self.path)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseFieldKeyError {}

/// A typed section state bound to one section catalog.
pub trait SectionSchema: FieldTree + Sized {
    const SECTION: SectionNumber;

    /// The exact number of fields in the section catalog this schema was
    /// written against.
    const EXPECTED_FIELD_COUNT: usize;

    /// Logical field keys, parsed from paths such as `lastName` or
    /// `residences.fromDate`.
    type Field: FromStr<Err = ParseFieldKeyError> + Copy + fmt::Debug;

    /// Resolves every field of the section and fills in the defaults.
    fn create_default(mapper: &SectionMapper<'_>) -> Result<Self, MapperError>;

    /// The cell behind `field`. `index` selects the entry of a repeating group
    /// and is ignored by single-valued fields.
    fn field_mut(
        &mut self,
        field: Self::Field,
        index: Option<usize>,
    ) -> Result<FieldCell<'_>, MapperError>;

    /// Runs after every successful assignment, e.g. to toggle the branch a
    /// radio answer gates.
    fn after_update(
        &mut self,
        _field: Self::Field,
        _index: Option<usize>,
    ) -> Result<(), MapperError> {
        Ok(())
    }
}

/// Builds the default state of section `S`.
///
/// # Errors
/// `FieldCountMismatch` when the catalog has drifted from the schema, any
/// resolution error otherwise.
pub fn create_default<S: SectionSchema>(catalogs: &CatalogSet) -> Result<S, MapperError> {
    let catalog = catalogs.catalog(S::SECTION)?;
    catalog.expect_field_count(S::EXPECTED_FIELD_COUNT)?;
    let state = S::create_default(&SectionMapper::new(catalog))?;
    ctx_debug!(
        SectionLog::new(S::SECTION, "schema"),
        "Created default state ({} bound fields)",
        state.bound_ids().len()
    );
    Ok(state)
}

/// Applies a typed update without any string parsing.
pub fn set_field<S: SectionSchema>(
    state: &mut S,
    field: S::Field,
    index: Option<usize>,
    value: FieldValue,
) -> Result<(), MapperError> {
    state.field_mut(field, index)?.assign(value)?;
    state.after_update(field, index)
}

/// Applies an update addressed by logical path.
///
/// The path may carry the `sectionN.` prefix and a trailing `.value`, both as
/// sent by the form UI.
///
/// # Errors
/// `UnknownFieldPath` when the path names no field. Errors of
/// [`SectionSchema::field_mut`] and [`FieldCell::assign`] are propagated and
/// leave the state unchanged.
pub fn update_field<S: SectionSchema>(
    state: &mut S,
    update: FieldUpdate<'_>,
) -> Result<(), MapperError> {
    let key = logical_key(S::SECTION, update.field_path);
    let field: S::Field = key.parse().map_err(|_| MapperError::UnknownFieldPath {
        section: S::SECTION,
        path: update.field_path.into(),
    })?;
    ctx_debug!(
        SectionLog::new(S::SECTION, "schema"),
        "Updating {:?} (index {:?})",
        field,
        update.index
    );
    set_field(state, field, update.index, update.new_value)
}

/// Flattens section `S` into catalog id / value pairs.
pub fn flatten_fields<S: SectionSchema>(state: &S) -> FlatFieldMap {
    state.flatten()
}

fn logical_key(section: SectionNumber, path: &str) -> &str {
    let prefix = section.key();
    let path = path
        .strip_prefix(prefix.as_str())
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(path);
    path.strip_suffix(".value").unwrap_or(path)
}

/// Declares a logical field key enum with `FromStr`, `Display` and an `ALL`
/// table.
///
/// ```ignore
/// field_keys! {
///     pub enum Section1Field {
///         LastName => "lastName",
///         FirstName => "firstName",
///     }
/// }
/// ```
#[macro_export]
macro_rules! field_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $variant:ident => $path:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $variant ),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),* ];

            /// The logical path of this key.
            pub fn path(self) -> &'static str {
                match self {
                    $( $name::$variant => $path ),*
                }
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::ParseFieldKeyError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                match s {
                    $( $path => Ok($name::$variant), )*
                    _ => Err($crate::ParseFieldKeyError::new(s)),
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.path())
            }
        }
    };
}

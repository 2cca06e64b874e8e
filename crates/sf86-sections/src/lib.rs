// crates/sf86-sections/src/lib.rs

#![doc = "Typed section schemas for the SF-86 questionnaire."]
#![doc = ""]
#![doc = "Every modeled section exposes the same three operations:"]
#![doc = "- `create_default`: resolves the section against its reference catalog."]
#![doc = "- `update_field`: applies one UI update addressed by logical path."]
#![doc = "- `flatten_fields`: produces the `{catalog id: value}` map for the PDF writer."]

// Generates the per-section wrappers around the generic schema operations.
macro_rules! section_api {
    ($state:ty) => {
        /// Builds the default state of this section from the injected catalogs.
        pub fn create_default(catalogs: &sf86_mapper::CatalogSet) -> sf86_mapper::Result<$state> {
            sf86_mapper::create_default::<$state>(catalogs)
        }

        /// Applies one update addressed by logical path.
        pub fn update_field(
            state: &mut $state,
            update: sf86_mapper::FieldUpdate<'_>,
        ) -> sf86_mapper::Result<()> {
            sf86_mapper::update_field(state, update)
        }

        /// Flattens the section into catalog id / value pairs.
        pub fn flatten_fields(state: &$state) -> sf86_mapper::FlatFieldMap {
            sf86_mapper::flatten_fields(state)
        }
    };
}

// --- Crate Modules ---

mod catalogs;
pub mod common;
mod form;
pub mod section1;
pub mod section11;
pub mod section2;
pub mod section3;
pub mod section4;
pub mod section5;
pub mod section7;
pub mod section8;
pub mod section9;
pub mod validation;

// --- Public API Re-exports ---

pub use catalogs::{BUNDLED_SECTIONS, bundled, reference_config};
pub use form::ApplicantFormValues;
pub use section1::Section1;
pub use section2::Section2;
pub use section3::Section3;
pub use section4::Section4;
pub use section5::Section5;
pub use section7::Section7;
pub use section8::Section8;
pub use section9::Section9;
pub use section11::Section11;
pub use validation::{Validate, ValidationIssue, ValidationReport};

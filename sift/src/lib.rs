//! sift core library.
//!
//! Builds declarations of GraphQL filter input types: which fields and operation fields a
//! filter type exposes, under which names, with which descriptions and directives. Fields
//! come from two places, the fluent [`FilterInputTypeDescriptor`] API and the entity
//! inspector, and are merged so that explicit configuration always wins.
//!
//! ```
//! use sift::{DescriptorContext, FilterEntity, FilterInputTypeDescriptor};
//!
//! #[derive(FilterEntity)]
//! struct Person {
//!     /// Display name.
//!     name: String,
//!     age: u32,
//!     #[filter(ignore)]
//!     password_hash: String,
//! }
//!
//! # fn main() -> Result<(), sift::DescriptorError> {
//! let context = DescriptorContext::new();
//! let mut descriptor = FilterInputTypeDescriptor::for_entity::<Person>(&context, None);
//! descriptor.field("age")?.description("Age in whole years");
//!
//! let definition = descriptor.create_definition()?;
//! assert_eq!(definition.name, "PersonFilterInput");
//! assert_eq!(definition.field_names(), ["age", "name"]);
//! # Ok(())
//! # }
//! ```

extern crate self as sift;

pub mod config;
pub mod context;
pub mod convention;
pub mod definition;
pub mod descriptor;
pub mod directives;
pub mod errors;
pub mod inspector;
pub mod naming;
pub mod options;
pub mod types;

pub use config::{FieldNaming, FilterConventionConfig, OperationConfig, SiftConfig};
pub use context::DescriptorContext;
pub use convention::{DefaultFilterConvention, FilterConvention};
pub use definition::{FieldMap, FieldOrigin, FilterFieldDefinition, FilterInputTypeDefinition};
pub use descriptor::{FieldCompletion, FilterFieldDescriptor, FilterInputTypeDescriptor, FilterOperationFieldDescriptor};
pub use directives::{Directive, DirectiveArgument, DirectiveDefinition};
pub use errors::*;
pub use inspector::{
    CandidateTarget, DefaultEntityInspector, EntityFieldProvider, EntityInspector, EntityRegistration, FieldCandidate,
    RegisteredEntityProvider, StaticFieldProvider,
};
pub use options::{DescriptorOptions, set_ambient_options};
pub use types::{AnyEntity, BindingBehavior, MemberRef, TypeRef};

// Trait and derive macro share the name.
pub use inspector::registration::FilterEntity;
pub use sift_macros::FilterEntity;

// Re-export inventory for auto-registration in the entity derive macro
pub use inventory;

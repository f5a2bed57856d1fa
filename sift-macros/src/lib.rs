use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod parsed;

use parsed::ParsedFilterEntity;

/// Derive a field-candidate table for a filter entity.
///
/// Every named field becomes a candidate member. Attributes under `#[filter(...)]`:
///
/// - on fields: `name = "..."`, `description = "..."`, `ignore`, `directive = "..."`
///   (repeatable). Doc comments supply the description when none is given.
/// - on the struct: `operation = <expr>` and `ignore_operation = <expr>` (repeatable).
///
/// Any `#[filter]` attribute on a field marks it as declared, so it is bound even when the
/// filter type binds fields explicitly.
///
/// # Example
///
/// ```text
/// #[derive(FilterEntity)]
/// #[filter(operation = sift::convention::operations::AND)]
/// struct Person {
///     /// Display name.
///     name: String,
///     #[filter(name = "years", directive = "internal")]
///     age: u32,
///     #[filter(ignore)]
///     password_hash: String,
/// }
/// ```
#[proc_macro_derive(FilterEntity, attributes(filter))]
pub fn derive_filter_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ParsedFilterEntity::from_input(&input) {
        Ok(parsed) => parsed.emit().into(),
        Err(err) => err.to_compile_error().into(),
    }
}

use std::collections::HashSet;

use crate::context::DescriptorContext;
use crate::definition::{FieldMap, FilterInputTypeDefinition};
use crate::errors::DescriptorResult;
use crate::types::MemberRef;

/// Extension point run after deduplication and before the field set is frozen.
///
/// Specialized filter types use it to inject or adjust fields (computed filters, entity
/// specific operations). `handled_members` holds every backing member already described,
/// including ignored ones; add to it when injecting member-backed fields.
pub trait FieldCompletion {
    fn complete_fields(
        &self,
        context: &DescriptorContext,
        definition: &FilterInputTypeDefinition,
        fields: &mut FieldMap,
        handled_members: &mut HashSet<MemberRef>,
    ) -> DescriptorResult<()>;
}

impl<F> FieldCompletion for F
where
    F: Fn(&DescriptorContext, &FilterInputTypeDefinition, &mut FieldMap, &mut HashSet<MemberRef>) -> DescriptorResult<()>,
{
    fn complete_fields(
        &self,
        context: &DescriptorContext,
        definition: &FilterInputTypeDefinition,
        fields: &mut FieldMap,
        handled_members: &mut HashSet<MemberRef>,
    ) -> DescriptorResult<()> {
        self(context, definition, fields, handled_members)
    }
}

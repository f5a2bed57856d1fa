//! Fluent descriptor for filter input types.
//!
//! A [`FilterInputTypeDescriptor`] accumulates configuration through `&mut self` calls and is
//! consumed by [`create_definition`](FilterInputTypeDescriptor::create_definition), which
//! runs the entity inspector, merges explicit and inferred fields, and returns the frozen
//! [`FilterInputTypeDefinition`].
//!
//! ```
//! use sift::{DescriptorContext, FilterInputTypeDescriptor};
//! use sift::convention::operations;
//!
//! # fn main() -> Result<(), sift::DescriptorError> {
//! let context = DescriptorContext::new();
//! let mut descriptor = FilterInputTypeDescriptor::with_scope(&context, None);
//! descriptor.name("StringOperationFilterInput")?.allow_and(false);
//! descriptor.operation(operations::EQUALS).description("Exact match");
//! descriptor.operation(operations::CONTAINS);
//! descriptor.ignore_operation(operations::NOT_CONTAINS);
//!
//! let definition = descriptor.create_definition()?;
//! assert_eq!(definition.field_names(), ["eq", "contains"]);
//! # Ok(())
//! # }
//! ```

pub mod completion;
pub mod field;
mod merge;
pub mod operation;

use log::debug;
use std::collections::HashSet;
use std::sync::Arc;

use crate::context::DescriptorContext;
use crate::convention::FilterConvention;
use crate::definition::{FieldMap, FieldOrigin, FilterInputTypeDefinition};
use crate::directives::{self, Directive, DirectiveArgument};
use crate::errors::{DescriptorError, DescriptorResult};
use crate::naming::ensure_name;
use crate::types::{BindingBehavior, MemberRef, TypeRef};

pub use completion::FieldCompletion;
pub use field::FilterFieldDescriptor;
pub use operation::FilterOperationFieldDescriptor;

pub struct FilterInputTypeDescriptor {
    context: DescriptorContext,
    convention: Arc<dyn FilterConvention>,
    definition: FilterInputTypeDefinition,
    fields: Vec<FilterFieldDescriptor>,
    operations: Vec<FilterOperationFieldDescriptor>,
    completion: Option<Box<dyn FieldCompletion>>,
}

impl std::fmt::Debug for FilterInputTypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterInputTypeDescriptor")
            .field("definition", &self.definition)
            .field("fields", &self.fields)
            .field("operations", &self.operations)
            .field("has_completion", &self.completion.is_some())
            .finish()
    }
}

impl FilterInputTypeDescriptor {
    // ═══════════════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════════════

    /// Descriptor for a filter type generated from `entity_type`.
    ///
    /// Fails with [`DescriptorError::InvalidArgument`] when no entity type is given.
    pub fn new(context: &DescriptorContext, scope: Option<&str>, entity_type: Option<TypeRef>) -> DescriptorResult<Self> {
        let entity_type = entity_type.ok_or_else(|| DescriptorError::missing("entity_type"))?;
        Ok(Self::typed(context, scope, entity_type))
    }

    pub fn for_entity<T: ?Sized + 'static>(context: &DescriptorContext, scope: Option<&str>) -> Self {
        Self::typed(context, scope, TypeRef::of::<T>())
    }

    /// Hand-authored filter type without a backing entity. Name it before finalizing.
    pub fn with_scope(context: &DescriptorContext, scope: Option<&str>) -> Self {
        let definition = FilterInputTypeDefinition {
            scope: scope.map(str::to_string),
            ..FilterInputTypeDefinition::default()
        };
        Self::with_definition(context, scope, definition)
    }

    /// Adopt a pre-built definition, e.g. to extend an existing filter type.
    pub fn from_definition(
        context: &DescriptorContext,
        definition: Option<FilterInputTypeDefinition>,
        scope: Option<&str>,
    ) -> DescriptorResult<Self> {
        let definition = definition.ok_or_else(|| DescriptorError::missing("definition"))?;
        Ok(Self::with_definition(context, scope, definition))
    }

    /// Like [`new`](Self::new) for a schema type: fields are inspected from `schema_type`
    /// but the runtime type stays untyped.
    pub fn from_schema_type(context: &DescriptorContext, scope: Option<&str>, schema_type: TypeRef) -> Self {
        let mut descriptor = Self::typed(context, scope, schema_type);
        descriptor.definition.runtime_type = TypeRef::any();
        descriptor
    }

    fn typed(context: &DescriptorContext, scope: Option<&str>, entity_type: TypeRef) -> Self {
        let convention = context.filter_convention(scope);
        let definition = FilterInputTypeDefinition {
            name: convention.type_name(&entity_type),
            description: convention.type_description(&entity_type),
            runtime_type: entity_type.clone(),
            entity_type,
            scope: scope.map(str::to_string),
            binding_behavior: context.options().default_binding_behavior,
            ..FilterInputTypeDefinition::default()
        };
        Self::from_parts(context, convention, definition)
    }

    fn with_definition(context: &DescriptorContext, scope: Option<&str>, definition: FilterInputTypeDefinition) -> Self {
        let convention = context.filter_convention(scope);
        Self::from_parts(context, convention, definition)
    }

    fn from_parts(
        context: &DescriptorContext,
        convention: Arc<dyn FilterConvention>,
        definition: FilterInputTypeDefinition,
    ) -> Self {
        Self {
            context: context.clone(),
            convention,
            definition,
            fields: Vec::new(),
            operations: Vec::new(),
            completion: None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Fluent configuration
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn name(&mut self, value: impl Into<String>) -> DescriptorResult<&mut Self> {
        self.definition.name = ensure_name("value", value)?;
        Ok(self)
    }

    pub fn description(&mut self, value: impl Into<String>) -> &mut Self {
        self.definition.description = Some(value.into());
        self
    }

    pub fn directive<D: Directive>(&mut self, directive: D) -> DescriptorResult<&mut Self> {
        directives::push_instance(&mut self.definition.directives, &directive)?;
        Ok(self)
    }

    pub fn directive_default<D: Directive + Default>(&mut self) -> DescriptorResult<&mut Self> {
        self.directive(D::default())
    }

    pub fn directive_named<I>(&mut self, name: impl Into<String>, arguments: I) -> DescriptorResult<&mut Self>
    where
        I: IntoIterator<Item = DirectiveArgument>,
    {
        directives::push_named(&mut self.definition.directives, name, arguments)?;
        Ok(self)
    }

    pub fn bind_fields(&mut self, behavior: BindingBehavior) -> &mut Self {
        self.definition.binding_behavior = behavior;
        self
    }

    pub fn bind_fields_explicitly(&mut self) -> &mut Self {
        self.bind_fields(BindingBehavior::Explicit)
    }

    pub fn bind_fields_implicitly(&mut self) -> &mut Self {
        self.bind_fields(BindingBehavior::Implicit)
    }

    /// Get or create the operation field for `operation`.
    pub fn operation(&mut self, operation: i32) -> &mut FilterOperationFieldDescriptor {
        let slot = match self.operations.iter().position(|d| d.operation() == operation) {
            Some(slot) => slot,
            None => {
                self.operations
                    .push(FilterOperationFieldDescriptor::new(operation, FieldOrigin::Explicit));
                self.operations.len() - 1
            }
        };
        &mut self.operations[slot]
    }

    /// Get or create the field called `name`.
    pub fn field(&mut self, name: impl Into<String>) -> DescriptorResult<&mut FilterFieldDescriptor> {
        let name = ensure_name("name", name)?;
        let slot = match self.fields.iter().position(|d| d.definition().name == name) {
            Some(slot) => slot,
            None => {
                self.fields.push(FilterFieldDescriptor::new(name, FieldOrigin::Explicit)?);
                self.fields.len() - 1
            }
        };
        Ok(&mut self.fields[slot])
    }

    /// Get or create the explicit field bound to `member`.
    ///
    /// The exposed name starts as the convention's name for the member and can be changed
    /// with [`FilterFieldDescriptor::name`] without producing a second field.
    pub fn member(&mut self, member: MemberRef) -> &mut FilterFieldDescriptor {
        let existing = self
            .fields
            .iter()
            .position(|d| d.origin() == FieldOrigin::Explicit && d.member_ref() == Some(&member));
        let slot = match existing {
            Some(slot) => slot,
            None => {
                self.fields
                    .push(FilterFieldDescriptor::from_member(&*self.convention, member, FieldOrigin::Explicit));
                self.fields.len() - 1
            }
        };
        &mut self.fields[slot]
    }

    /// Exclude the field `name`, creating its descriptor if needed so the ignore sticks.
    pub fn ignore(&mut self, name: impl Into<String>) -> DescriptorResult<&mut Self> {
        self.field(name)?.ignore();
        Ok(self)
    }

    /// Exclude the operation field for `operation`.
    pub fn ignore_operation(&mut self, operation: i32) -> &mut Self {
        self.operation(operation).ignore();
        self
    }

    pub fn allow_or(&mut self, allow: bool) -> &mut Self {
        self.definition.use_or = allow;
        self
    }

    pub fn allow_and(&mut self, allow: bool) -> &mut Self {
        self.definition.use_and = allow;
        self
    }

    /// Install the hook run on the merged field set.
    pub fn with_completion<H>(&mut self, completion: H) -> &mut Self
    where
        H: FieldCompletion + 'static,
    {
        self.completion = Some(Box::new(completion));
        self
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Entity inspector surface
    // ═══════════════════════════════════════════════════════════════════════════

    /// Append an inferred field for `member`.
    ///
    /// An explicit field that is not yet bound to a member and whose name equals the
    /// member's declared name or its convention name takes ownership of the member, so
    /// configuring `field("Name")` or `ignore("Age")` governs the reflected members.
    pub fn infer_field(&mut self, member: MemberRef) -> &mut FilterFieldDescriptor {
        let convention_name = self.convention.field_name(&member);
        let owner = self.fields.iter_mut().find(|d| {
            d.origin() == FieldOrigin::Explicit
                && d.member_ref().is_none()
                && (d.definition().name == member.name() || d.definition().name == convention_name)
        });
        if let Some(owner) = owner {
            debug!("explicit filter field `{}` claims member {member}", owner.definition().name);
            owner.bind_member(member.clone());
        }

        self.fields
            .push(FilterFieldDescriptor::from_member(&*self.convention, member, FieldOrigin::Inferred));
        let slot = self.fields.len() - 1;
        &mut self.fields[slot]
    }

    /// Append an inferred operation field.
    pub fn infer_operation(&mut self, operation: i32) -> &mut FilterOperationFieldDescriptor {
        self.operations
            .push(FilterOperationFieldDescriptor::new(operation, FieldOrigin::Inferred));
        let slot = self.operations.len() - 1;
        &mut self.operations[slot]
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn definition(&self) -> &FilterInputTypeDefinition {
        &self.definition
    }

    pub fn context(&self) -> &DescriptorContext {
        &self.context
    }

    pub fn convention(&self) -> &dyn FilterConvention {
        &*self.convention
    }

    pub fn binding_behavior(&self) -> BindingBehavior {
        self.definition.binding_behavior
    }

    pub fn entity_type(&self) -> &TypeRef {
        &self.definition.entity_type
    }

    pub fn fields(&self) -> &[FilterFieldDescriptor] {
        &self.fields
    }

    pub fn operations(&self) -> &[FilterOperationFieldDescriptor] {
        &self.operations
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Finalization
    // ═══════════════════════════════════════════════════════════════════════════

    /// Freeze the descriptor into its definition.
    ///
    /// Inspector, convention and completion errors are returned unchanged.
    pub fn create_definition(mut self) -> DescriptorResult<FilterInputTypeDefinition> {
        if !self.definition.entity_type.is_any() {
            let context = self.context.clone();
            let entity_type = self.definition.entity_type.clone();
            context.inspector().apply_attributes(&context, &mut self, &entity_type)?;
        }

        let mut definitions: Vec<_> = self
            .fields
            .drain(..)
            .map(FilterFieldDescriptor::create_definition)
            .collect();
        for operation in self.operations.drain(..) {
            definitions.push(operation.create_definition(&*self.convention)?);
        }
        let declared = definitions.len();

        let mut fields: FieldMap = std::mem::take(&mut self.definition.fields).into_iter().collect();
        let mut handled_members: HashSet<MemberRef> = fields.values().filter_map(|f| f.member.clone()).collect();

        merge::merge_field_definitions(definitions, &mut fields, &mut handled_members);

        if let Some(completion) = &self.completion {
            completion.complete_fields(&self.context, &self.definition, &mut fields, &mut handled_members)?;
        }

        self.definition.fields = fields.into_values();
        debug!(
            "created filter input type `{}` with {} of {} declared fields",
            self.definition.name,
            self.definition.fields.len(),
            declared
        );
        Ok(self.definition)
    }
}

use crate::convention::FilterConvention;
use crate::definition::{FieldOrigin, FilterFieldDefinition};
use crate::directives::{self, Directive, DirectiveArgument, DirectiveDefinition};
use crate::errors::DescriptorResult;
use crate::naming::ensure_name;
use crate::types::MemberRef;

/// Mutable builder for one filter field.
///
/// Fetched through [`FilterInputTypeDescriptor::field`](super::FilterInputTypeDescriptor::field)
/// or [`member`](super::FilterInputTypeDescriptor::member); repeated fetches hand back this
/// same instance so configuration accumulates.
#[derive(Debug, Clone)]
pub struct FilterFieldDescriptor {
    definition: FilterFieldDefinition,
}

impl FilterFieldDescriptor {
    pub(crate) fn new(name: impl Into<String>, origin: FieldOrigin) -> DescriptorResult<Self> {
        let mut definition = FilterFieldDefinition::new(ensure_name("name", name)?);
        definition.origin = origin;
        Ok(Self { definition })
    }

    pub(crate) fn from_member(convention: &dyn FilterConvention, member: MemberRef, origin: FieldOrigin) -> Self {
        let mut definition = FilterFieldDefinition::new(convention.field_name(&member));
        definition.description = convention.field_description(&member);
        definition.member = Some(member);
        definition.origin = origin;
        Self { definition }
    }

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

    /// Append an already-built directive application.
    pub fn directive_definition(&mut self, directive: DirectiveDefinition) -> &mut Self {
        self.definition.directives.push(directive);
        self
    }

    /// Exclude this field from the finished type.
    pub fn ignore(&mut self) -> &mut Self {
        self.ignore_with(true)
    }

    pub fn ignore_with(&mut self, ignore: bool) -> &mut Self {
        self.definition.ignore = ignore;
        self
    }

    pub fn definition(&self) -> &FilterFieldDefinition {
        &self.definition
    }

    pub fn member_ref(&self) -> Option<&MemberRef> {
        self.definition.member.as_ref()
    }

    pub fn is_ignored(&self) -> bool {
        self.definition.ignore
    }

    pub fn origin(&self) -> FieldOrigin {
        self.definition.origin
    }

    pub(crate) fn bind_member(&mut self, member: MemberRef) {
        self.definition.member = Some(member);
    }

    pub(crate) fn create_definition(self) -> FilterFieldDefinition {
        self.definition
    }
}

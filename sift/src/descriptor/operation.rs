use crate::convention::FilterConvention;
use crate::definition::{FieldOrigin, FilterFieldDefinition};
use crate::directives::{self, Directive, DirectiveArgument, DirectiveDefinition};
use crate::errors::DescriptorResult;
use crate::naming::ensure_name;

/// Mutable builder for one filter operation field, keyed by operation id.
///
/// The field name is looked up on the convention when the definition is created, so a
/// convention swapped in after the descriptor was made is still honored.
#[derive(Debug, Clone)]
pub struct FilterOperationFieldDescriptor {
    operation: i32,
    name: Option<String>,
    description: Option<String>,
    directives: Vec<DirectiveDefinition>,
    ignore: bool,
    origin: FieldOrigin,
}

impl FilterOperationFieldDescriptor {
    pub(crate) fn new(operation: i32, origin: FieldOrigin) -> Self {
        Self {
            operation,
            name: None,
            description: None,
            directives: Vec::new(),
            ignore: false,
            origin,
        }
    }

    pub fn operation(&self) -> i32 {
        self.operation
    }

    /// Override the convention's name for this operation.
    pub fn name(&mut self, value: impl Into<String>) -> DescriptorResult<&mut Self> {
        self.name = Some(ensure_name("value", value)?);
        Ok(self)
    }

    pub fn description(&mut self, value: impl Into<String>) -> &mut Self {
        self.description = Some(value.into());
        self
    }

    pub fn directive<D: Directive>(&mut self, directive: D) -> DescriptorResult<&mut Self> {
        directives::push_instance(&mut self.directives, &directive)?;
        Ok(self)
    }

    pub fn directive_default<D: Directive + Default>(&mut self) -> DescriptorResult<&mut Self> {
        self.directive(D::default())
    }

    pub fn directive_named<I>(&mut self, name: impl Into<String>, arguments: I) -> DescriptorResult<&mut Self>
    where
        I: IntoIterator<Item = DirectiveArgument>,
    {
        directives::push_named(&mut self.directives, name, arguments)?;
        Ok(self)
    }

    /// Append an already-built directive application.
    pub fn directive_definition(&mut self, directive: DirectiveDefinition) -> &mut Self {
        self.directives.push(directive);
        self
    }

    pub fn ignore(&mut self) -> &mut Self {
        self.ignore_with(true)
    }

    pub fn ignore_with(&mut self, ignore: bool) -> &mut Self {
        self.ignore = ignore;
        self
    }

    pub fn explicit_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_ignored(&self) -> bool {
        self.ignore
    }

    pub fn origin(&self) -> FieldOrigin {
        self.origin
    }

    /// Resolve the name and description against `convention`.
    ///
    /// An ignored operation the convention does not know is tolerated; it never reaches
    /// the output, so it keeps an empty name.
    pub(crate) fn create_definition(self, convention: &dyn FilterConvention) -> DescriptorResult<FilterFieldDefinition> {
        let name = match self.name {
            Some(name) => name,
            None => match convention.operation_name(self.operation) {
                Ok(name) => name,
                Err(_) if self.ignore => String::new(),
                Err(err) => return Err(err),
            },
        };

        Ok(FilterFieldDefinition {
            name,
            description: self.description.or_else(|| convention.operation_description(self.operation)),
            directives: self.directives,
            ignore: self.ignore,
            member: None,
            operation: Some(self.operation),
            origin: self.origin,
        })
    }
}

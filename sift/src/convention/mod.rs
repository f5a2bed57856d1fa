//! Naming and description policy for filter input types.
//!
//! A convention is resolved per scope. It must be deterministic: the descriptor may ask
//! for the same name more than once (e.g. to match an explicit field against a member).

pub mod operations;

use std::collections::HashMap;

use convert_case::{Case, Casing};

use crate::config::{FieldNaming, FilterConventionConfig};
use crate::errors::{DescriptorError, DescriptorResult};
use crate::types::{MemberRef, TypeRef};

/// Supplies default names and descriptions from type information.
pub trait FilterConvention: Send + Sync {
    /// Scope this convention serves, `None` for the default scope.
    fn scope(&self) -> Option<&str>;

    fn type_name(&self, entity: &TypeRef) -> String;

    fn type_description(&self, entity: &TypeRef) -> Option<String>;

    fn field_name(&self, member: &MemberRef) -> String;

    fn field_description(&self, _member: &MemberRef) -> Option<String> {
        None
    }

    /// Name of the operation field for `operation`. Unknown ids are an error.
    fn operation_name(&self, operation: i32) -> DescriptorResult<String>;

    fn operation_description(&self, _operation: i32) -> Option<String> {
        None
    }
}

/// Convention driven by [`FilterConventionConfig`] and the built-in operation table.
#[derive(Debug, Clone)]
pub struct DefaultFilterConvention {
    scope: Option<String>,
    type_name_suffix: String,
    field_naming: FieldNaming,
    type_descriptions: HashMap<String, String>,
    /// Overrides of the built-in operation table.
    operation_names: HashMap<i32, String>,
    operation_descriptions: HashMap<i32, String>,
}

impl Default for DefaultFilterConvention {
    fn default() -> Self {
        Self::from_config(None, &FilterConventionConfig::default())
    }
}

impl DefaultFilterConvention {
    pub fn new(scope: Option<&str>) -> Self {
        Self::from_config(scope, &FilterConventionConfig::default())
    }

    pub fn from_config(scope: Option<&str>, config: &FilterConventionConfig) -> Self {
        let mut operation_names = HashMap::new();
        let mut operation_descriptions = HashMap::new();

        for operation in &config.operations {
            if let Some(name) = &operation.name {
                operation_names.insert(operation.id, name.clone());
            }
            if let Some(description) = &operation.description {
                operation_descriptions.insert(operation.id, description.clone());
            }
        }

        Self {
            scope: scope.map(str::to_string),
            type_name_suffix: config.type_name_suffix.clone(),
            field_naming: config.field_naming,
            type_descriptions: config.type_descriptions.clone(),
            operation_names,
            operation_descriptions,
        }
    }

    /// Register or rename an operation.
    pub fn with_operation(mut self, operation: i32, name: impl Into<String>) -> Self {
        self.operation_names.insert(operation, name.into());
        self
    }

    pub fn with_operation_description(mut self, operation: i32, description: impl Into<String>) -> Self {
        self.operation_descriptions.insert(operation, description.into());
        self
    }

    pub fn with_type_description(mut self, type_name: impl Into<String>, description: impl Into<String>) -> Self {
        self.type_descriptions.insert(type_name.into(), description.into());
        self
    }
}

impl FilterConvention for DefaultFilterConvention {
    fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    fn type_name(&self, entity: &TypeRef) -> String {
        // Generic arguments are not legal in GraphQL names.
        let base: String = entity.name().chars().filter(|c| c.is_ascii_alphanumeric() || *c == '_').collect();
        let base = base.to_case(Case::Pascal);
        match &self.scope {
            Some(scope) => format!("{}{base}{}", scope.to_case(Case::Pascal), self.type_name_suffix),
            None => format!("{base}{}", self.type_name_suffix),
        }
    }

    fn type_description(&self, entity: &TypeRef) -> Option<String> {
        self.type_descriptions.get(entity.name()).cloned()
    }

    fn field_name(&self, member: &MemberRef) -> String {
        match self.field_naming {
            FieldNaming::CamelCase => member.name().to_case(Case::Camel),
            FieldNaming::AsDeclared => member.name().to_string(),
        }
    }

    fn operation_name(&self, operation: i32) -> DescriptorResult<String> {
        self.operation_names
            .get(&operation)
            .cloned()
            .or_else(|| operations::default_operation_name(operation).map(str::to_string))
            .ok_or_else(|| DescriptorError::UnknownOperation {
                operation,
                scope: self.scope.clone(),
            })
    }

    fn operation_description(&self, operation: i32) -> Option<String> {
        self.operation_descriptions.get(&operation).cloned()
    }
}

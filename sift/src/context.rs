use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use convert_case::{Case, Casing};

use crate::config::SiftConfig;
use crate::convention::{DefaultFilterConvention, FilterConvention};
use crate::errors::DescriptorResult;
use crate::inspector::{DefaultEntityInspector, EntityInspector};
use crate::options::DescriptorOptions;
use crate::types::{MemberRef, TypeRef};

/// Collaborators shared by every descriptor created during one schema build.
///
/// Conventions are looked up by scope. A scope without its own convention falls back to
/// the default convention, re-scoped so generated type names still carry the scope.
#[derive(Clone)]
pub struct DescriptorContext {
    options: DescriptorOptions,
    default_convention: Arc<dyn FilterConvention>,
    conventions: HashMap<String, Arc<dyn FilterConvention>>,
    inspector: Arc<dyn EntityInspector>,
}

impl fmt::Debug for DescriptorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut scopes: Vec<&String> = self.conventions.keys().collect();
        scopes.sort();
        f.debug_struct("DescriptorContext")
            .field("options", &self.options)
            .field("scopes", &scopes)
            .finish_non_exhaustive()
    }
}

impl Default for DescriptorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorContext {
    /// Context with the ambient options, the default convention and the default inspector.
    pub fn new() -> Self {
        Self {
            options: DescriptorOptions::ambient(),
            default_convention: Arc::new(DefaultFilterConvention::default()),
            conventions: HashMap::new(),
            inspector: Arc::new(DefaultEntityInspector::new()),
        }
    }

    /// Context built from a configuration document.
    pub fn from_config(config: &SiftConfig) -> Self {
        let mut context = Self::new()
            .with_options(config.options)
            .with_default_convention(DefaultFilterConvention::from_config(None, &config.convention));
        for (scope, convention) in &config.scopes {
            context = context.with_convention(scope, DefaultFilterConvention::from_config(Some(scope), convention));
        }
        context
    }

    pub fn with_options(mut self, options: DescriptorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_default_convention<C>(mut self, convention: C) -> Self
    where
        C: FilterConvention + 'static,
    {
        self.default_convention = Arc::new(convention);
        self
    }

    pub fn with_convention<C>(mut self, scope: impl Into<String>, convention: C) -> Self
    where
        C: FilterConvention + 'static,
    {
        self.conventions.insert(scope.into(), Arc::new(convention));
        self
    }

    pub fn with_inspector<I>(mut self, inspector: I) -> Self
    where
        I: EntityInspector + 'static,
    {
        self.inspector = Arc::new(inspector);
        self
    }

    pub fn options(&self) -> &DescriptorOptions {
        &self.options
    }

    pub fn inspector(&self) -> &Arc<dyn EntityInspector> {
        &self.inspector
    }

    /// Convention responsible for `scope`.
    pub fn filter_convention(&self, scope: Option<&str>) -> Arc<dyn FilterConvention> {
        match scope {
            None => Arc::clone(&self.default_convention),
            Some(scope) => match self.conventions.get(scope) {
                Some(convention) => Arc::clone(convention),
                None => Arc::new(ScopedFallback {
                    scope: scope.to_string(),
                    inner: Arc::clone(&self.default_convention),
                }),
            },
        }
    }
}

/// Default convention answering for a scope that has no convention of its own.
struct ScopedFallback {
    scope: String,
    inner: Arc<dyn FilterConvention>,
}

impl FilterConvention for ScopedFallback {
    fn scope(&self) -> Option<&str> {
        Some(&self.scope)
    }

    fn type_name(&self, entity: &TypeRef) -> String {
        format!("{}{}", self.scope.to_case(Case::Pascal), self.inner.type_name(entity))
    }

    fn type_description(&self, entity: &TypeRef) -> Option<String> {
        self.inner.type_description(entity)
    }

    fn field_name(&self, member: &MemberRef) -> String {
        self.inner.field_name(member)
    }

    fn field_description(&self, member: &MemberRef) -> Option<String> {
        self.inner.field_description(member)
    }

    fn operation_name(&self, operation: i32) -> DescriptorResult<String> {
        self.inner.operation_name(operation)
    }

    fn operation_description(&self, operation: i32) -> Option<String> {
        self.inner.operation_description(operation)
    }
}

//! Entity inspection: turning a backing type into inferred field descriptors.

pub mod provider;
pub mod registration;

use log::debug;
use std::sync::Arc;

use crate::context::DescriptorContext;
use crate::descriptor::FilterInputTypeDescriptor;
use crate::errors::DescriptorResult;
use crate::types::{BindingBehavior, TypeRef};

pub use provider::{CandidateTarget, EntityFieldProvider, FieldCandidate, StaticFieldProvider};
pub use registration::{EntityRegistration, FilterEntity, RegisteredEntityProvider};

/// Applies an entity's declared attributes to a descriptor.
///
/// The only permitted effect is appending or mutating field/operation descriptors on
/// `descriptor`. Errors propagate to the caller of `create_definition` unchanged.
pub trait EntityInspector: Send + Sync {
    fn apply_attributes(
        &self,
        context: &DescriptorContext,
        descriptor: &mut FilterInputTypeDescriptor,
        entity: &TypeRef,
    ) -> DescriptorResult<()>;
}

/// Inspector that asks each provider in turn for candidates.
///
/// Under [`BindingBehavior::Explicit`] only declared candidates are applied; under
/// [`BindingBehavior::Implicit`] every candidate is.
#[derive(Clone)]
pub struct DefaultEntityInspector {
    providers: Vec<Arc<dyn EntityFieldProvider>>,
}

impl std::fmt::Debug for DefaultEntityInspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultEntityInspector")
            .field("providers", &self.providers.len())
            .finish()
    }
}

impl Default for DefaultEntityInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultEntityInspector {
    /// Inspector reading the types registered by `#[derive(FilterEntity)]`.
    pub fn new() -> Self {
        Self::empty().with_provider(RegisteredEntityProvider)
    }

    pub fn empty() -> Self {
        Self { providers: Vec::new() }
    }

    /// Add a provider consulted after the ones already present.
    pub fn with_provider<P>(mut self, provider: P) -> Self
    where
        P: EntityFieldProvider + 'static,
    {
        self.providers.push(Arc::new(provider));
        self
    }

    fn apply_candidate(descriptor: &mut FilterInputTypeDescriptor, candidate: FieldCandidate) -> DescriptorResult<()> {
        match candidate.target {
            CandidateTarget::Member(member) => {
                let field = descriptor.infer_field(member);
                if let Some(name) = candidate.name {
                    field.name(name)?;
                }
                if let Some(description) = candidate.description {
                    field.description(description);
                }
                for directive in candidate.directives {
                    field.directive_definition(directive);
                }
                field.ignore_with(candidate.ignore);
            }
            CandidateTarget::Operation(operation) => {
                let field = descriptor.infer_operation(operation);
                if let Some(name) = candidate.name {
                    field.name(name)?;
                }
                if let Some(description) = candidate.description {
                    field.description(description);
                }
                for directive in candidate.directives {
                    field.directive_definition(directive);
                }
                field.ignore_with(candidate.ignore);
            }
        }
        Ok(())
    }
}

impl EntityInspector for DefaultEntityInspector {
    fn apply_attributes(
        &self,
        _context: &DescriptorContext,
        descriptor: &mut FilterInputTypeDescriptor,
        entity: &TypeRef,
    ) -> DescriptorResult<()> {
        let behavior = descriptor.binding_behavior();
        for provider in &self.providers {
            for candidate in provider.candidates(entity)? {
                if behavior == BindingBehavior::Explicit && !candidate.declared {
                    debug!("skipping undeclared candidate {:?} of `{entity}` (explicit binding)", candidate.target);
                    continue;
                }
                Self::apply_candidate(descriptor, candidate)?;
            }
        }
        Ok(())
    }
}

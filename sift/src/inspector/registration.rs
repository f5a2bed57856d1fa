//! Entity auto-registration via inventory crate.
//!
//! `#[derive(FilterEntity)]` implements [`FilterEntity`] and submits an
//! [`EntityRegistration`], so [`RegisteredEntityProvider`] can find the candidate table of
//! any derived type linked into the binary.

use std::any::TypeId;

use super::provider::{EntityFieldProvider, FieldCandidate};
use crate::errors::DescriptorResult;
use crate::types::TypeRef;

/// Implemented by `#[derive(FilterEntity)]`.
pub trait FilterEntity: 'static {
    /// Field and operation candidates in declaration order.
    fn filter_candidates() -> Vec<FieldCandidate>;
}

/// Metadata for auto-discovered filter entities.
pub struct EntityRegistration {
    /// TypeId of the entity struct
    pub type_id: fn() -> TypeId,
    /// Name of the entity type (e.g., "Person")
    pub type_name: &'static str,
    pub candidates_fn: fn() -> Vec<FieldCandidate>,
}

inventory::collect!(EntityRegistration);

/// Get all registered entities.
pub fn registered_entities() -> impl Iterator<Item = &'static EntityRegistration> {
    inventory::iter::<EntityRegistration>()
}

/// Get a registered entity by type name.
pub fn get_entity_by_name(type_name: &str) -> Option<&'static EntityRegistration> {
    registered_entities().find(|e| e.type_name == type_name)
}

/// Check if an entity type is registered.
pub fn is_entity_registered<T: 'static>() -> bool {
    let type_id = TypeId::of::<T>();
    registered_entities().any(|e| (e.type_id)() == type_id)
}

/// Provider for types deriving `FilterEntity`.
///
/// Typed handles match on `TypeId`; name-only handles match on the type name.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegisteredEntityProvider;

impl EntityFieldProvider for RegisteredEntityProvider {
    fn candidates(&self, entity: &TypeRef) -> DescriptorResult<Vec<FieldCandidate>> {
        let registration = match entity.type_id() {
            Some(type_id) => registered_entities().find(|e| (e.type_id)() == type_id),
            None => get_entity_by_name(entity.name()),
        };
        Ok(registration.map(|e| (e.candidates_fn)()).unwrap_or_default())
    }
}

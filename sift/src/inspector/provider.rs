use crate::directives::DirectiveDefinition;
use crate::errors::DescriptorResult;
use crate::types::{MemberRef, TypeRef};

/// What a field candidate describes.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateTarget {
    Member(MemberRef),
    Operation(i32),
}

/// A field or operation an entity exposes, with whatever attributes were declared on it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCandidate {
    pub target: CandidateTarget,
    pub name: Option<String>,
    pub description: Option<String>,
    pub directives: Vec<DirectiveDefinition>,
    pub ignore: bool,
    /// Carries declared attributes. Undeclared candidates are only bound implicitly.
    pub declared: bool,
}

impl FieldCandidate {
    pub fn member(member: MemberRef) -> Self {
        Self {
            target: CandidateTarget::Member(member),
            name: None,
            description: None,
            directives: Vec::new(),
            ignore: false,
            declared: false,
        }
    }

    /// Operation candidates only exist through declarations, so they start declared.
    pub fn operation(operation: i32) -> Self {
        Self {
            target: CandidateTarget::Operation(operation),
            name: None,
            description: None,
            directives: Vec::new(),
            ignore: false,
            declared: true,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.declared = true;
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_directive(mut self, directive: DirectiveDefinition) -> Self {
        self.directives.push(directive);
        self.declared = true;
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self.declared = true;
        self
    }

    pub fn declared(mut self) -> Self {
        self.declared = true;
        self
    }
}

/// Pluggable field discovery for an entity type.
///
/// Implementations may read derived tables, static declarations or anything else; the
/// merge step does not care where candidates come from. Types a provider does not know
/// yield an empty list.
pub trait EntityFieldProvider: Send + Sync {
    fn candidates(&self, entity: &TypeRef) -> DescriptorResult<Vec<FieldCandidate>>;
}

/// Provider backed by a declaration table built at runtime.
///
/// Lookups use [`TypeRef::matches`], so a table keyed by `TypeRef::named("Person")` answers
/// for every type named `Person`; key by `TypeRef::of::<T>()` to target one type.
#[derive(Debug, Clone, Default)]
pub struct StaticFieldProvider {
    entities: Vec<(TypeRef, Vec<FieldCandidate>)>,
}

impl StaticFieldProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register candidates for `entity`, appending to any already registered.
    pub fn entity<I>(mut self, entity: TypeRef, candidates: I) -> Self
    where
        I: IntoIterator<Item = FieldCandidate>,
    {
        match self.entities.iter_mut().find(|(known, _)| *known == entity) {
            Some((_, existing)) => existing.extend(candidates),
            None => self.entities.push((entity, candidates.into_iter().collect())),
        }
        self
    }

    /// Register plain, undeclared members of `entity`.
    pub fn members(self, entity: TypeRef, members: &[&str]) -> Self {
        let owner = entity.name().to_string();
        let candidates: Vec<_> = members
            .iter()
            .map(|member| FieldCandidate::member(MemberRef::new(owner.clone(), *member)))
            .collect();
        self.entity(entity, candidates)
    }
}

impl EntityFieldProvider for StaticFieldProvider {
    fn candidates(&self, entity: &TypeRef) -> DescriptorResult<Vec<FieldCandidate>> {
        Ok(self
            .entities
            .iter()
            .filter(|(known, _)| known.matches(entity))
            .flat_map(|(_, candidates)| candidates.iter().cloned())
            .collect())
    }
}

use indexmap::IndexMap;
use serde::Serialize;

use crate::directives::DirectiveDefinition;
use crate::types::{BindingBehavior, MemberRef, TypeRef};

/// Where a field definition came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldOrigin {
    /// Declared through the fluent API.
    #[default]
    Explicit,
    /// Contributed by the entity inspector.
    Inferred,
}

/// Frozen definition of a single filter field or operation field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterFieldDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<DirectiveDefinition>,
    #[serde(skip)]
    pub ignore: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<MemberRef>,
    /// Operation id for operation fields, `None` for plain fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<i32>,
    #[serde(skip)]
    pub origin: FieldOrigin,
}

impl FilterFieldDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            directives: Vec::new(),
            ignore: false,
            member: None,
            operation: None,
            origin: FieldOrigin::Explicit,
        }
    }

    pub fn is_operation(&self) -> bool {
        self.operation.is_some()
    }
}

/// Immutable result of a filter input type descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterInputTypeDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub entity_type: TypeRef,
    pub runtime_type: TypeRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub binding_behavior: BindingBehavior,
    pub use_or: bool,
    pub use_and: bool,
    pub fields: Vec<FilterFieldDefinition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<DirectiveDefinition>,
}

impl Default for FilterInputTypeDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            entity_type: TypeRef::any(),
            runtime_type: TypeRef::any(),
            scope: None,
            binding_behavior: BindingBehavior::default(),
            use_or: true,
            use_and: true,
            fields: Vec::new(),
            directives: Vec::new(),
        }
    }
}

impl FilterInputTypeDefinition {
    pub fn field(&self, name: &str) -> Option<&FilterFieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }
}

/// Insertion-ordered `name -> definition` map used while merging fields.
///
/// Keys always equal the stored definition's `name`. Replacing an existing key keeps its
/// position; removing shifts later entries up.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    entries: IndexMap<String, FilterFieldDefinition>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under `definition.name`, returning the definition it replaced.
    pub fn insert(&mut self, definition: FilterFieldDefinition) -> Option<FilterFieldDefinition> {
        self.entries.insert(definition.name.clone(), definition)
    }

    pub fn remove(&mut self, name: &str) -> Option<FilterFieldDefinition> {
        self.entries.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FilterFieldDefinition> {
        self.entries.get(name)
    }

    /// Edit the field `name` in place. Returns `false` when there is no such field.
    ///
    /// Renaming re-keys the entry at its current position, replacing any other field that
    /// already held the new name.
    pub fn update<F>(&mut self, name: &str, apply: F) -> bool
    where
        F: FnOnce(&mut FilterFieldDefinition),
    {
        let Some((index, _, definition)) = self.entries.get_full_mut(name) else {
            return false;
        };
        apply(definition);
        if definition.name != name {
            self.rekey(index);
        }
        true
    }

    fn rekey(&mut self, index: usize) {
        let Some((_, definition)) = self.entries.shift_remove_index(index) else {
            return;
        };
        let index = match self.entries.shift_remove_full(&definition.name) {
            Some((taken, _, _)) if taken < index => index - 1,
            _ => index,
        };
        self.entries.shift_insert(index, definition.name.clone(), definition);
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &FilterFieldDefinition> {
        self.entries.values()
    }

    pub fn into_values(self) -> Vec<FilterFieldDefinition> {
        self.entries.into_values().collect()
    }
}

impl FromIterator<FilterFieldDefinition> for FieldMap {
    fn from_iter<I: IntoIterator<Item = FilterFieldDefinition>>(iter: I) -> Self {
        let mut map = Self::new();
        for definition in iter {
            map.insert(definition);
        }
        map
    }
}

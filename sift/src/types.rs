use std::any::{TypeId, type_name};
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Marker standing in for "no particular entity" on hand-authored filter types.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyEntity;

/// Opaque handle for the runtime type a filter input type is generated from.
///
/// Two handles are equal when both carry the same `TypeId`, or when neither carries one
/// and the names agree. Use [`TypeRef::matches`] to let a name-only handle stand for a
/// typed one.
#[derive(Debug, Clone, Eq)]
pub struct TypeRef {
    name: String,
    id: Option<TypeId>,
}

impl TypeRef {
    /// Handle for a concrete Rust type. The display name is the last path segment.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            name: short_type_name::<T>().to_string(),
            id: Some(TypeId::of::<T>()),
        }
    }

    /// Handle for a type known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), id: None }
    }

    /// The untyped marker used by bare-scope descriptors.
    pub fn any() -> Self {
        Self::of::<AnyEntity>()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_id(&self) -> Option<TypeId> {
        self.id
    }

    pub fn is_any(&self) -> bool {
        self.id == Some(TypeId::of::<AnyEntity>())
    }

    /// Lookup match: the `TypeId` decides when both sides are typed, the name otherwise.
    ///
    /// Not an equivalence: `named("Person")` matches every type whose short name is
    /// `Person`.
    pub fn matches(&self, other: &TypeRef) -> bool {
        match (self.id, other.id) {
            (Some(left), Some(right)) => left == right,
            _ => self.name == other.name,
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(left), Some(right)) => left == right,
            (None, None) => self.name == other.name,
            _ => false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for TypeRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.name)
    }
}

/// Last path segment of `std::any::type_name`, with generic arguments kept intact.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

/// Identity of the backing member a field was derived from.
///
/// Used only to detect "this property is already described"; it never owns anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MemberRef {
    owner: String,
    member: String,
}

impl MemberRef {
    pub fn new(owner: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            member: member.into(),
        }
    }

    /// Member `member` declared on the Rust type `T`.
    pub fn of<T: ?Sized + 'static>(member: impl Into<String>) -> Self {
        Self::new(short_type_name::<T>(), member)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Declared member name, before any naming convention is applied.
    pub fn name(&self) -> &str {
        &self.member
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.member)
    }
}

/// Whether members not explicitly declared are bound onto the filter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingBehavior {
    /// Every member the entity exposes becomes a field unless ignored.
    #[default]
    Implicit,
    /// Only members carrying declared attributes or configured through the API become fields.
    Explicit,
}

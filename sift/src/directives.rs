//! Directive applications attached to filter types and fields.
//!
//! A directive can be given three ways: as a typed instance whose serde representation
//! supplies the arguments, as a default-constructed typed directive, or by name with an
//! explicit argument list. All three end up as a [`DirectiveDefinition`].

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::errors::{DescriptorError, DescriptorResult};
use crate::naming::ensure_name;

/// A typed directive. Its serialized fields become the directive arguments.
///
/// ```
/// use serde::Serialize;
/// use sift::directives::Directive;
///
/// #[derive(Serialize, Default)]
/// struct Cost {
///     weight: u32,
/// }
///
/// impl Directive for Cost {
///     const NAME: &'static str = "cost";
/// }
/// ```
pub trait Directive: Serialize {
    const NAME: &'static str;
}

/// One `name: value` argument of a directive application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectiveArgument {
    pub name: String,
    pub value: JsonValue,
}

impl DirectiveArgument {
    pub fn new(name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A directive application in declaration order. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectiveDefinition {
    pub name: String,
    pub arguments: Vec<DirectiveArgument>,
}

impl DirectiveDefinition {
    /// Directive applied by name.
    pub fn named<I>(name: impl Into<String>, arguments: I) -> DescriptorResult<Self>
    where
        I: IntoIterator<Item = DirectiveArgument>,
    {
        Ok(Self {
            name: ensure_name("name", name)?,
            arguments: arguments.into_iter().collect(),
        })
    }

    /// Directive built from a typed instance.
    ///
    /// Struct fields become arguments sorted by name; unit structs have none.
    pub fn from_instance<D: Directive>(directive: &D) -> DescriptorResult<Self> {
        let value = serde_json::to_value(directive).map_err(|source| DescriptorError::Directive {
            name: D::NAME.to_string(),
            source,
        })?;

        let arguments = match value {
            JsonValue::Object(map) => map
                .into_iter()
                .map(|(name, value)| DirectiveArgument { name, value })
                .collect(),
            JsonValue::Null => Vec::new(),
            other => vec![DirectiveArgument::new("value", other)],
        };

        Ok(Self {
            name: D::NAME.to_string(),
            arguments,
        })
    }

    pub fn argument(&self, name: &str) -> Option<&JsonValue> {
        self.arguments.iter().find(|arg| arg.name == name).map(|arg| &arg.value)
    }
}

/// Shared directive list plumbing for every descriptor that accepts directives.
pub(crate) fn push_instance<D: Directive>(directives: &mut Vec<DirectiveDefinition>, directive: &D) -> DescriptorResult<()> {
    directives.push(DirectiveDefinition::from_instance(directive)?);
    Ok(())
}

pub(crate) fn push_named<I>(directives: &mut Vec<DirectiveDefinition>, name: impl Into<String>, arguments: I) -> DescriptorResult<()>
where
    I: IntoIterator<Item = DirectiveArgument>,
{
    directives.push(DirectiveDefinition::named(name, arguments)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize, Default)]
    struct Cost {
        weight: u32,
        multiplier: Option<String>,
    }

    impl Directive for Cost {
        const NAME: &'static str = "cost";
    }

    #[derive(Serialize, Default)]
    struct Internal;

    impl Directive for Internal {
        const NAME: &'static str = "internal";
    }

    #[test]
    fn instance_fields_become_arguments() {
        let directive = DirectiveDefinition::from_instance(&Cost {
            weight: 5,
            multiplier: None,
        })
        .unwrap();
        assert_eq!(directive.name, "cost");
        assert_eq!(directive.argument("weight"), Some(&json!(5)));
        assert_eq!(directive.argument("multiplier"), Some(&JsonValue::Null));
    }

    #[test]
    fn unit_directive_has_no_arguments() {
        let directive = DirectiveDefinition::from_instance(&Internal).unwrap();
        assert_eq!(directive.name, "internal");
        assert!(directive.arguments.is_empty());
    }

    #[test]
    fn named_directive_validates_name() {
        assert!(DirectiveDefinition::named("", []).is_err());
        let directive = DirectiveDefinition::named("tag", [DirectiveArgument::new("name", "beta")]).unwrap();
        assert_eq!(directive.argument("name"), Some(&json!("beta")));
    }
}

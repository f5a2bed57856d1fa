use regex::Regex;
use std::sync::LazyLock;

use crate::errors::{DescriptorError, DescriptorResult};

static GRAPHQL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").expect("valid GraphQL name pattern"));

/// Returns `true` when `value` is a legal GraphQL name.
pub fn is_valid_graphql_name(value: &str) -> bool {
    GRAPHQL_NAME.is_match(value)
}

/// Validate a name passed to a fluent configuration call.
///
/// Empty names and names outside the GraphQL name grammar fail immediately.
pub fn ensure_name(argument: &'static str, value: impl Into<String>) -> DescriptorResult<String> {
    let value = value.into();
    if value.is_empty() {
        return Err(DescriptorError::EmptyName { argument });
    }
    if !is_valid_graphql_name(&value) {
        return Err(DescriptorError::InvalidName { argument, name: value });
    }
    Ok(value)
}

//! TOML configuration for descriptor options and per-scope filter conventions.
//!
//! ```toml
//! [options]
//! default_binding_behavior = "explicit"
//!
//! [convention]
//! type_name_suffix = "Filter"
//!
//! [[convention.operations]]
//! id = 0
//! name = "equals"
//!
//! [scopes.audit]
//! field_naming = "as_declared"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use crate::errors::ConfigError;
use crate::naming::is_valid_graphql_name;
use crate::options::DescriptorOptions;

/// How member names are turned into field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldNaming {
    #[default]
    CamelCase,
    AsDeclared,
}

/// Override for one entry of the operation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationConfig {
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConventionConfig {
    pub type_name_suffix: String,
    pub field_naming: FieldNaming,
    /// Entity type name -> description.
    pub type_descriptions: HashMap<String, String>,
    pub operations: Vec<OperationConfig>,
}

impl Default for FilterConventionConfig {
    fn default() -> Self {
        Self {
            type_name_suffix: default_type_name_suffix(),
            field_naming: FieldNaming::default(),
            type_descriptions: HashMap::new(),
            operations: Vec::new(),
        }
    }
}

fn default_type_name_suffix() -> String {
    "FilterInput".to_string()
}

impl FilterConventionConfig {
    fn validate(&self, scope: &str) -> Result<(), ConfigError> {
        if !self.type_name_suffix.is_empty() && !is_valid_graphql_name(&self.type_name_suffix) {
            return Err(ConfigError::Invalid {
                message: format!("scope `{scope}`: type_name_suffix `{}` is not a GraphQL name", self.type_name_suffix),
            });
        }

        let mut seen = HashSet::new();
        for operation in &self.operations {
            if !seen.insert(operation.id) {
                return Err(ConfigError::Invalid {
                    message: format!("scope `{scope}`: operation {} configured twice", operation.id),
                });
            }
            match &operation.name {
                Some(name) if !is_valid_graphql_name(name) => {
                    return Err(ConfigError::Invalid {
                        message: format!("scope `{scope}`: operation {} name `{name}` is not a GraphQL name", operation.id),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    pub options: DescriptorOptions,
    /// Convention for the default (unscoped) filter types.
    pub convention: FilterConventionConfig,
    /// Conventions for named scopes.
    pub scopes: BTreeMap<String, FilterConventionConfig>,
}

impl SiftConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiftConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.convention.validate("<default>")?;
        for (scope, convention) in &self.scopes {
            if scope.is_empty() {
                return Err(ConfigError::Invalid {
                    message: "scope names must not be empty".to_string(),
                });
            }
            convention.validate(scope)?;
        }
        Ok(())
    }
}

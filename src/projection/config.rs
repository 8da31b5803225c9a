// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Configuration types for the field projector

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::PyDict;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid projector configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("annotation key `{0}` must not be empty")]
    EmptyKey(&'static str),

    #[error("exclusion value must not be empty")]
    EmptyExclusionValue,

    #[error("exclusion and visibility annotations share the key `{0}`")]
    SharedKey(String),
}

/// Which annotations drive field selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Annotation key holding the exclusion marker
    pub exclusion_key: String,
    /// Value of `exclusion_key` meaning "never serialize"
    pub exclusion_value: String,
    /// Annotation key holding the audience list
    pub visibility_key: String,
    /// Separator between audience tokens
    pub separator: char,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            exclusion_key: "json".to_string(),
            exclusion_value: "-".to_string(),
            visibility_key: "visible".to_string(),
            separator: ',',
        }
    }
}

impl ProjectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exclusion_key.is_empty() {
            return Err(ConfigError::EmptyKey("exclusion_key"));
        }
        if self.visibility_key.is_empty() {
            return Err(ConfigError::EmptyKey("visibility_key"));
        }
        if self.exclusion_value.is_empty() {
            return Err(ConfigError::EmptyExclusionValue);
        }
        if self.exclusion_key == self.visibility_key {
            return Err(ConfigError::SharedKey(self.exclusion_key.clone()));
        }
        Ok(())
    }
}

#[cfg(feature = "python")]
impl ProjectorConfig {
    /// Extract configuration from Python dict
    pub fn from_py_dict(dict: &Bound<'_, PyDict>) -> PyResult<Self> {
        let mut config = Self::default();

        macro_rules! extract_str {
            ($field:ident) => {
                if let Some(value) = dict.get_item(stringify!($field))? {
                    config.$field = value.extract()?;
                }
            };
        }

        extract_str!(exclusion_key);
        extract_str!(exclusion_value);
        extract_str!(visibility_key);

        if let Some(value) = dict.get_item("separator")? {
            let separator: String = value.extract()?;
            let mut chars = separator.chars();
            config.separator = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(pyo3::exceptions::PyValueError::new_err(
                        "'separator' must be a single character",
                    ))
                }
            };
        }

        Ok(config)
    }
}

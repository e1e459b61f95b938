#![forbid(unsafe_code)]

//! Context configuration.
//!
//! [`DndConfig`] groups the list shape and identifier settings a host hands
//! to [`DragDropContext`](crate::context::DragDropContext) and
//! [`IdContext`](crate::id_context::IdContext). With the `config` feature it
//! can be loaded from TOML or JSON:
//!
//! ```toml
//! [list]
//! droppable_id = "quotes"
//! axis = "vertical"
//! drop_disabled = false
//!
//! [ids]
//! separator = "-"
//! ```
//!
//! Missing fields fall back to [`Default`].

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::engine::Axis;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DndConfig {
    pub list: ListConfig,
    pub ids: IdConfig,
}

/// Shape of the single reorderable list a context controls.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ListConfig {
    /// Id of the droppable region holding the list (default: `"list"`).
    pub droppable_id: String,
    /// Axis along which directional moves are meaningful.
    pub axis: Axis,
    /// When set, every drop ends without a destination.
    pub drop_disabled: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            droppable_id: "list".to_string(),
            axis: Axis::Vertical,
            drop_disabled: false,
        }
    }
}

impl ListConfig {
    /// Config for a list with the given droppable id.
    #[must_use]
    pub fn new(droppable_id: impl Into<String>) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn with_drop_disabled(mut self, disabled: bool) -> Self {
        self.drop_disabled = disabled;
        self
    }
}

/// Identifier formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct IdConfig {
    /// Placed between scope key and counter (default: `"-"`).
    pub separator: String,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            separator: "-".to_string(),
        }
    }
}

impl DndConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Validate all fields.
    ///
    /// Returns a list of problems; empty means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.list.droppable_id.trim().is_empty() {
            errors.push("list.droppable_id must not be empty".into());
        }
        if self.ids.separator.is_empty() {
            errors.push("ids.separator must not be empty".into());
        }
        if self.ids.separator.chars().any(char::is_alphanumeric) {
            errors.push(format!(
                "ids.separator must not contain alphanumerics, got {:?}",
                self.ids.separator
            ));
        }
        errors
    }

    #[cfg(feature = "config")]
    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Failure loading a [`DndConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DndConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.list.droppable_id, "list");
        assert_eq!(config.list.axis, Axis::Vertical);
        assert_eq!(config.ids.separator, "-");
    }

    #[test]
    fn validate_catches_empty_droppable_id() {
        let mut config = DndConfig::default();
        config.list.droppable_id = "  ".into();
        assert!(
            config
                .validate()
                .iter()
                .any(|e| e.contains("list.droppable_id"))
        );
    }

    #[test]
    fn validate_catches_alphanumeric_separator() {
        let mut config = DndConfig::default();
        config.ids.separator = "x".into();
        assert!(config.validate().iter().any(|e| e.contains("separator")));
    }

    #[test]
    fn list_builder() {
        let list = ListConfig::new("quotes")
            .with_axis(Axis::Horizontal)
            .with_drop_disabled(true);
        assert_eq!(list.droppable_id, "quotes");
        assert_eq!(list.axis, Axis::Horizontal);
        assert!(list.drop_disabled);
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_uses_defaults() {
        let config = DndConfig::from_toml_str(
            r#"
            [list]
            droppable_id = "quotes"
            axis = "horizontal"
            "#,
        )
        .unwrap();
        assert_eq!(config.list.droppable_id, "quotes");
        assert_eq!(config.list.axis, Axis::Horizontal);
        assert!(!config.list.drop_disabled);
        assert_eq!(config.ids.separator, "-");
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_validation_error() {
        let err = DndConfig::from_json_str(r#"{"ids":{"separator":""}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("ids.separator"));
    }
}

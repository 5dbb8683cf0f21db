//! Configuration module for starfilter
//!
//! Holds the declarative settings of a ratings filter: which component id it
//! registers under, which field it queries, the tiers it lists and how it is
//! labelled. Settings are read from a TOML file and can be overridden through
//! `STARFILTER_*` environment variables.

use crate::filter::{RatingTier, Selection, default_tiers};
use crate::store::ReactSpec;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default filled star icon
pub const DEFAULT_ICON: &str = "★";
/// Default dimmed star icon
pub const DEFAULT_DIMMED_ICON: &str = "☆";

const fn default_true() -> bool {
    true
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

fn default_dimmed_icon() -> String {
    DEFAULT_DIMMED_ICON.to_string()
}

/// Declarative settings of a ratings filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Identifier the filter registers under in the store
    pub component_id: String,

    /// Document field holding the rating
    pub data_field: String,

    /// Path of the nested object holding `data_field`, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_field: Option<String>,

    /// Heading rendered above the list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Label attached to the active filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_label: Option<String>,

    /// List the active filter among the selected filters
    #[serde(default = "default_true")]
    pub show_filter: bool,

    /// Mirror the selection into URL parameters
    #[serde(default)]
    pub url_params: bool,

    /// Icon for filled stars
    #[serde(default = "default_icon")]
    pub icon: String,

    /// Icon for dimmed stars
    #[serde(default = "default_dimmed_icon")]
    pub dimmed_icon: String,

    /// Selection applied when the filter is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Selection>,

    /// Tiers listed by the filter, in display order
    #[serde(default = "default_tiers")]
    pub data: Vec<RatingTier>,

    /// Components whose changes should re-query this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub react: Option<ReactSpec>,
}

impl FilterConfig {
    /// Settings with the given id and field and everything else defaulted
    #[must_use]
    pub fn new(component_id: impl Into<String>, data_field: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            data_field: data_field.into(),
            nested_field: None,
            title: None,
            filter_label: None,
            show_filter: true,
            url_params: false,
            icon: default_icon(),
            dimmed_icon: default_dimmed_icon(),
            default_value: None,
            data: default_tiers(),
            react: None,
        }
    }

    /// Load settings from a TOML file, applying environment overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or does not
    /// deserialize into a `FilterConfig`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Environment::with_prefix("STARFILTER").try_parsing(true))
            .build()?;

        settings.try_deserialize()
    }

    /// Parse settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text is not valid TOML or is missing
    /// required keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Render settings as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Write settings to a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        fs::write(path, self.to_toml()?)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))
    }

    /// Set the nested field
    #[must_use]
    pub fn with_nested_field(mut self, nested_field: impl Into<String>) -> Self {
        self.nested_field = Some(nested_field.into());
        self
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the filter label
    #[must_use]
    pub fn with_filter_label(mut self, label: impl Into<String>) -> Self {
        self.filter_label = Some(label.into());
        self
    }

    /// Set the default selection
    #[must_use]
    pub const fn with_default_value(mut self, value: Selection) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Replace the listed tiers
    #[must_use]
    pub fn with_tiers(mut self, tiers: Vec<RatingTier>) -> Self {
        self.data = tiers;
        self
    }

    /// Set the dependency spec
    #[must_use]
    pub fn with_react(mut self, react: ReactSpec) -> Self {
        self.react = Some(react);
        self
    }

    /// Nested field, treating an empty string as unset
    #[must_use]
    pub fn nested_path(&self) -> Option<&str> {
        self.nested_field.as_deref().filter(|path| !path.is_empty())
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new("ratings", "rating")
    }
}

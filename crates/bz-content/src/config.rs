//! Session configuration

use crate::{ContentError, Result};
use serde::Deserialize;

/// Settings for one editing session
///
/// Loaded from TOML:
///
/// ```toml
/// page_id = "1042"
/// extra_attributes = ["data-bz-hint"]
/// reissue_retained = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Page the session's retained ids are scoped to
    pub page_id: String,
    /// Attribute names allowed through the filter in addition to the
    /// built-in whitelist
    #[serde(default)]
    pub extra_attributes: Vec<String>,
    /// Give pasted `data-bz-retained` values fresh numbers
    #[serde(default = "default_reissue_retained")]
    pub reissue_retained: bool,
}

fn default_reissue_retained() -> bool {
    true
}

impl SessionConfig {
    pub fn new(page_id: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            extra_attributes: Vec::new(),
            reissue_retained: default_reissue_retained(),
        }
    }

    /// Parse and validate a TOML config
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_page_id(&self.page_id)
    }
}

pub(crate) fn validate_page_id(page_id: &str) -> Result<()> {
    if page_id.is_empty() || page_id.chars().any(char::is_whitespace) {
        return Err(ContentError::InvalidPageId(page_id.to_string()));
    }
    Ok(())
}

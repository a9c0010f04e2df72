//! Controller configuration
//!
//! Defaults reproduce the Tablonaute site. Any field can be overridden from
//! a TOML file:
//!
//! ```toml
//! supported_locales = ["en", "fr", "ar"]
//! rtl_locales = ["ar"]
//! product_name = "Tablonaute"
//! fetch_timeout_secs = 10
//! ```

use crate::error::{I18nError, I18nResult};
use crate::locale::{DEFAULT_FALLBACK, DEFAULT_RTL, DEFAULT_SUPPORTED, LocaleSet};
use crate::picker::DEFAULT_SELECTOR_ID;
use crate::source::DEFAULT_CATALOG_PATH;
use crate::storage::DEFAULT_STORAGE_KEY;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_PRODUCT_NAME: &str = "Tablonaute";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalizerConfig {
    pub supported_locales: Vec<String>,
    pub rtl_locales: Vec<String>,
    pub fallback_locale: String,
    /// Preference store key holding the chosen locale
    pub storage_key: String,
    /// Catalog location relative to the site root
    pub catalog_path: String,
    /// Id of the element the locale picker is built into
    pub selector_id: String,
    /// Appended to page titles as `"<title> - <product_name>"`
    pub product_name: String,
    /// Catalog request timeout; unset means wait indefinitely
    pub fetch_timeout_secs: Option<u64>,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self {
            supported_locales: DEFAULT_SUPPORTED.iter().map(|c| c.to_string()).collect(),
            rtl_locales: DEFAULT_RTL.iter().map(|c| c.to_string()).collect(),
            fallback_locale: DEFAULT_FALLBACK.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            catalog_path: DEFAULT_CATALOG_PATH.to_string(),
            selector_id: DEFAULT_SELECTOR_ID.to_string(),
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            fetch_timeout_secs: None,
        }
    }
}

impl LocalizerConfig {
    pub fn from_toml_str(content: &str) -> I18nResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| I18nError::Config(e.to_string()))?;
        config.locale_set()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> I18nResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| I18nError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Validated locale set described by this configuration
    pub fn locale_set(&self) -> I18nResult<LocaleSet> {
        LocaleSet::new(
            &self.supported_locales,
            &self.rtl_locales,
            &self.fallback_locale,
        )
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}

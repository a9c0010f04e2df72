//! Supported locales, right-to-left locales and the fallback locale
//!
//! A `LocaleSet` is fixed for the lifetime of a controller. Construction
//! enforces that the fallback is supported and that every RTL locale is
//! supported, so the rest of the crate can rely on both.

use crate::error::{I18nError, I18nResult};

/// Locales the Tablonaute pages ship with, in picker order
pub const DEFAULT_SUPPORTED: [&str; 15] = [
    "en", "fr", "es", "de", "it", "nl", "pt", "ru", "uk", "pl", "ja", "zh", "ko", "ar", "hi",
];

/// Locales written right-to-left
pub const DEFAULT_RTL: [&str; 1] = ["ar"];

/// Locale used when the preferred one is unknown or lacks a message
pub const DEFAULT_FALLBACK: &str = "en";

/// Text direction of a locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Value of the `dir` attribute on the document root
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    supported: Vec<String>,
    rtl: Vec<String>,
    fallback: String,
}

impl LocaleSet {
    /// Build a locale set, lowercasing every code
    ///
    /// # Errors
    ///
    /// `I18nError::InvalidLocaleSet` when the list is empty, contains a
    /// duplicate or a malformed code, when the fallback is not supported, or
    /// when an RTL locale is not supported.
    pub fn new<S, R>(supported: S, rtl: R, fallback: &str) -> I18nResult<Self>
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let mut codes: Vec<String> = Vec::new();
        for code in supported {
            let code = code.as_ref().trim().to_lowercase();
            validate_locale(&code)?;
            if codes.contains(&code) {
                return Err(I18nError::InvalidLocaleSet(format!(
                    "duplicate locale '{}'",
                    code
                )));
            }
            codes.push(code);
        }
        if codes.is_empty() {
            return Err(I18nError::InvalidLocaleSet(
                "at least one locale must be supported".to_string(),
            ));
        }

        let fallback = fallback.trim().to_lowercase();
        if !codes.contains(&fallback) {
            return Err(I18nError::InvalidLocaleSet(format!(
                "fallback locale '{}' is not in the supported list",
                fallback
            )));
        }

        let mut rtl_codes = Vec::new();
        for code in rtl {
            let code = code.as_ref().trim().to_lowercase();
            if !codes.contains(&code) {
                return Err(I18nError::InvalidLocaleSet(format!(
                    "RTL locale '{}' is not in the supported list",
                    code
                )));
            }
            if !rtl_codes.contains(&code) {
                rtl_codes.push(code);
            }
        }

        Ok(Self {
            supported: codes,
            rtl: rtl_codes,
            fallback,
        })
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.supported.iter().any(|c| c == code)
    }

    pub fn is_rtl(&self, code: &str) -> bool {
        self.rtl.iter().any(|c| c == code)
    }

    pub fn direction(&self, code: &str) -> Direction {
        if self.is_rtl(code) {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Supported locales in their configured order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.supported.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.supported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supported.is_empty()
    }
}

impl Default for LocaleSet {
    fn default() -> Self {
        Self {
            supported: DEFAULT_SUPPORTED.iter().map(|c| c.to_string()).collect(),
            rtl: DEFAULT_RTL.iter().map(|c| c.to_string()).collect(),
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

/// Normalize a locale code by stripping region and script subtags
///
/// - `fr-FR` → `fr`
/// - `zh_Hans` → `zh`
/// - `EN` → `en`
///
/// Only used for user-typed input. Persisted preferences are compared verbatim.
pub fn normalize_locale(locale: &str) -> String {
    locale
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_lowercase()
}

/// Check that a locale code is non-empty and contains only ASCII
/// alphanumerics, hyphens and underscores
pub fn validate_locale(locale: &str) -> I18nResult<()> {
    if locale.is_empty() {
        return Err(I18nError::InvalidLocaleSet(
            "Locale code is empty".to_string(),
        ));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(I18nError::InvalidLocaleSet(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}

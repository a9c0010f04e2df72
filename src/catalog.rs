use crate::error::{I18nError, I18nResult};
use serde_json::Value;
use std::collections::HashMap;

/// Key under which a locale's catalog carries its own display name
pub const DISPLAY_NAME_KEY: &str = "lang_name";

/// Messages of a single locale, keyed by translation key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedMessages(pub HashMap<String, String>);

impl LocalizedMessages {
    pub fn new() -> Self {
        LocalizedMessages(HashMap::new())
    }
    pub fn with_message(&mut self, key: &str, message: &str) -> &mut Self {
        self.0.insert(key.to_owned(), message.to_owned());
        self
    }
    /// Message for `key`, treating an empty string as missing
    pub fn get_message(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|message| !message.is_empty())
    }
    pub fn get_messages(&self) -> &HashMap<String, String> {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Every locale's messages, loaded once and never partially updated
///
/// Keyed by locale and then by message key:
/// `messages["en"]["greet"] = "Hi"`, `messages["fr"]["greet"] = "Salut"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    messages: HashMap<String, LocalizedMessages>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog {
            messages: HashMap::new(),
        }
    }

    pub fn with_messages_for_locale(
        &mut self,
        locale: &str,
        messages: LocalizedMessages,
    ) -> &mut Self {
        self.messages.insert(locale.to_string(), messages);
        self
    }

    /// Parse a catalog payload shaped as `{ locale: { key: string } }`
    ///
    /// # Errors
    ///
    /// `I18nError::MalformedCatalog` when the payload is not JSON, the root is
    /// not an object, a locale entry is not an object, or a message is not a
    /// string. A malformed payload is rejected whole.
    pub fn from_json_str(content: &str) -> I18nResult<Self> {
        let json: Value = serde_json::from_str(content)
            .map_err(|e| I18nError::MalformedCatalog(format!("invalid JSON: {}", e)))?;
        Self::from_json_value(&json)
    }

    pub fn from_json_value(json: &Value) -> I18nResult<Self> {
        let root = json.as_object().ok_or_else(|| {
            I18nError::MalformedCatalog("root must be an object".to_string())
        })?;

        let mut catalog = Catalog::new();
        for (locale, entries) in root {
            let entries = entries.as_object().ok_or_else(|| {
                I18nError::MalformedCatalog(format!(
                    "entry for locale '{}' must be an object",
                    locale
                ))
            })?;

            let mut messages = LocalizedMessages::new();
            for (key, value) in entries {
                let message = value.as_str().ok_or_else(|| {
                    I18nError::MalformedCatalog(format!(
                        "message '{}' in locale '{}' is not a string",
                        key, locale
                    ))
                })?;
                messages.with_message(key, message);
            }
            catalog.with_messages_for_locale(locale, messages);
        }

        Ok(catalog)
    }

    pub fn messages_for(&self, locale: &str) -> Option<&LocalizedMessages> {
        self.messages.get(locale)
    }

    /// Non-empty message for `key` in exactly `locale`, without fallback
    pub fn message(&self, locale: &str, key: &str) -> Option<&str> {
        self.messages
            .get(locale)
            .and_then(|messages| messages.get_message(key))
    }

    /// The locale's name for itself, e.g. `Français` for `fr`
    pub fn display_name(&self, locale: &str) -> Option<&str> {
        self.message(locale, DISPLAY_NAME_KEY)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

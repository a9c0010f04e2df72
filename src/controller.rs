//! The localization controller
//!
//! A `Localizer` owns every piece of mutable localization state (catalog,
//! active locale, lifecycle state and preference store) so several
//! independent instances can coexist. The document is passed in per call.
//!
//! # Example
//!
//! ```ignore
//! use tablonaute_i18n::{Document, FileCatalogSource, Localizer, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut localizer = Localizer::with_defaults(MemoryStore::new());
//!     let mut doc = Document::new();
//!     localizer
//!         .init(&FileCatalogSource::new("lang/translations.json"), &mut doc)
//!         .await;
//!
//!     localizer.set_language("fr", &mut doc);
//!     println!("{}", localizer.t("greet"));
//!     Ok(())
//! }
//! ```

use crate::applier::{self, TranslationView};
use crate::catalog::Catalog;
use crate::config::LocalizerConfig;
use crate::document::Document;
use crate::error::I18nResult;
use crate::locale::{Direction, LocaleSet};
use crate::picker;
use crate::resolver::resolve_locale;
use crate::source::CatalogSource;
use crate::storage::PreferenceStore;

/// Lifecycle of the automatic bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    Uninitialized,
    CatalogLoading,
    /// Terminal; later changes only come through `set_language`
    Ready,
}

pub struct Localizer<S: PreferenceStore> {
    config: LocalizerConfig,
    locales: LocaleSet,
    catalog: Catalog,
    active: String,
    state: InitState,
    store: S,
}

impl<S: PreferenceStore> Localizer<S> {
    /// # Errors
    ///
    /// `I18nError::InvalidLocaleSet` when the configured locales break the
    /// fallback or RTL subset invariants.
    pub fn new(config: LocalizerConfig, store: S) -> I18nResult<Self> {
        let locales = config.locale_set()?;
        Ok(Self::from_parts(config, locales, store))
    }

    /// Controller for the Tablonaute site defaults
    pub fn with_defaults(store: S) -> Self {
        Self::from_parts(LocalizerConfig::default(), LocaleSet::default(), store)
    }

    fn from_parts(config: LocalizerConfig, locales: LocaleSet, store: S) -> Self {
        let active = locales.fallback().to_string();
        Self {
            config,
            locales,
            catalog: Catalog::new(),
            active,
            state: InitState::Uninitialized,
            store,
        }
    }

    /// Load the catalog, resolve the locale, translate the document and
    /// build the picker
    ///
    /// Only the first call does anything. A failed load is logged and leaves
    /// the catalog empty, so the page shows raw keys; it is never returned
    /// to the caller.
    pub async fn init<C>(&mut self, source: &C, doc: &mut Document)
    where
        C: CatalogSource + ?Sized,
    {
        if self.state != InitState::Uninitialized {
            tracing::debug!(state = ?self.state, "init already started, ignoring");
            return;
        }
        self.state = InitState::CatalogLoading;
        tracing::debug!(source = source.source_name(), "loading catalog");

        match source.fetch().await {
            Ok(catalog) => {
                tracing::info!(
                    source = source.source_name(),
                    locales = catalog.locales().count(),
                    "catalog loaded"
                );
                self.catalog = catalog;
            }
            Err(err) => {
                tracing::error!(
                    source = source.source_name(),
                    error = %err,
                    "Failed to load translations"
                );
            }
        }

        self.active = resolve_locale(&self.store, &self.config.storage_key, &self.locales);
        self.apply(doc);
        self.build_selector(doc);
        self.state = InitState::Ready;
        tracing::info!(locale = %self.active, "localizer ready");
    }

    /// Translation of `key` for the active locale, falling back to the
    /// fallback locale and then to `key` itself
    pub fn t(&self, key: &str) -> String {
        self.view().t(key)
    }

    /// Switch to `code`, persist it and re-translate the document
    ///
    /// Unsupported codes are silently ignored. Returns whether the switch
    /// happened.
    pub fn set_language(&mut self, code: &str, doc: &mut Document) -> bool {
        if !self.locales.is_supported(code) {
            return false;
        }

        self.active = code.to_string();
        if let Err(err) = self.store.set(&self.config.storage_key, code) {
            tracing::warn!(locale = code, error = %err, "could not persist language preference");
        }
        self.apply(doc);
        picker::sync_selector(self.view(), doc, &self.config.selector_id);
        tracing::info!(locale = code, "language changed");
        true
    }

    /// Run the picker's change listener: switch to whatever the picker now
    /// shows
    ///
    /// No-op when the picker is missing or was never wired by
    /// [`build_selector`](Self::build_selector).
    pub fn handle_selector_change(&mut self, doc: &mut Document) -> bool {
        let Some(selector) = doc.element_by_id(&self.config.selector_id) else {
            return false;
        };
        if doc.change_listener_count(selector) == 0 {
            return false;
        }
        let Some(code) = doc.select_value(selector).map(str::to_string) else {
            return false;
        };
        self.set_language(&code, doc)
    }

    /// Simulate the user picking `code` in the locale picker
    ///
    /// A picker only offers supported locales, so any other code is ignored
    /// and the picker left as it is.
    pub fn choose_in_selector(&mut self, code: &str, doc: &mut Document) -> bool {
        if !self.locales.is_supported(code) {
            return false;
        }
        let Some(selector) = doc.element_by_id(&self.config.selector_id) else {
            return false;
        };
        doc.set_select_value(selector, code);
        self.handle_selector_change(doc)
    }

    pub fn apply(&self, doc: &mut Document) {
        applier::apply(self.view(), doc, &self.config.product_name);
    }

    pub fn build_selector(&self, doc: &mut Document) {
        if picker::build_selector(self.view(), doc, &self.config.selector_id).is_none() {
            tracing::debug!(id = %self.config.selector_id, "no language selector on page");
        }
    }

    pub fn current_language(&self) -> &str {
        &self.active
    }

    pub fn direction(&self) -> Direction {
        self.locales.direction(&self.active)
    }

    pub fn state(&self) -> InitState {
        self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    pub fn config(&self) -> &LocalizerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Display label for `code` as shown in the picker
    pub fn display_name(&self, code: &str) -> String {
        picker::option_label(self.view(), code)
    }

    fn view(&self) -> TranslationView<'_> {
        TranslationView {
            catalog: &self.catalog,
            locales: &self.locales,
            active: &self.active,
        }
    }
}

//! Localization controller for Tablonaute pages
//!
//! Resolves the visitor's language from a persisted preference, loads the
//! translation catalog once, rewrites `data-i18n*` markup in a document and
//! builds the language picker. See [`Localizer`] for the entry point.

pub mod applier;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod locale;
pub mod lookup;
pub mod mock;
pub mod picker;
pub mod resolver;
pub mod source;
pub mod storage;

mod integration_tests;

pub use applier::TranslationView;
pub use catalog::{Catalog, LocalizedMessages};
pub use config::LocalizerConfig;
pub use controller::{InitState, Localizer};
pub use document::{Document, Element, ElementId};
pub use error::{I18nError, I18nResult};
pub use locale::{Direction, LocaleSet, normalize_locale};
pub use lookup::translate;
pub use mock::{MockCatalogSource, MockMode};
pub use resolver::resolve_locale;
pub use source::{CatalogSource, FileCatalogSource, HttpCatalogSource};
pub use storage::{FileStore, MemoryStore, PreferenceStore};

//! Mock catalog source for testing
//!
//! A deterministic, network-free `CatalogSource` for exercising the
//! controller's load path, including failures and slow responses.
//!
//! # Example
//!
//! ```ignore
//! use tablonaute_i18n::{CatalogSource, MockCatalogSource, MockMode};
//!
//! #[tokio::test]
//! async fn test_load() {
//!     let mock = MockCatalogSource::new(MockMode::Payload(r#"{"en": {"greet": "Hi"}}"#.into()));
//!     let catalog = mock.fetch().await.unwrap();
//!     assert_eq!(catalog.message("en", "greet"), Some("Hi"));
//! }
//! ```

use crate::catalog::Catalog;
use crate::error::{I18nError, I18nResult};
use crate::source::CatalogSource;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// What the mock answers with
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Parse this JSON body, as if it came over the wire
    Payload(String),

    /// Return this catalog as-is
    Catalog(Catalog),

    /// Simulate a transport failure
    Error(String),
}

#[derive(Debug)]
pub struct MockCatalogSource {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    fetches: AtomicUsize,
}

impl MockCatalogSource {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay_ms: 0,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Create a mock with simulated network delay
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode,
            delay_ms,
            fetches: AtomicUsize::new(0),
        }
    }

    /// How many times `fetch` has been called
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for MockCatalogSource {
    async fn fetch(&self) -> I18nResult<Catalog> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        match &self.mode {
            MockMode::Payload(body) => Catalog::from_json_str(body),
            MockMode::Catalog(catalog) => Ok(catalog.clone()),
            MockMode::Error(msg) => Err(I18nError::Network(msg.clone())),
        }
    }

    fn source_name(&self) -> &str {
        "mock"
    }
}

//! End-to-end scenarios for the localization controller
//!
//! Each test drives a `Localizer` through `init` against a realistic page
//! and then through the picker and `set_language`, the way a visitor would.

#[cfg(test)]
mod tests {
    use crate::applier::{PLACEHOLDER_ATTR, RTL_CLASS, TEXT_ATTR, TITLE_ATTR};
    use crate::catalog::Catalog;
    use crate::document::{Document, ElementId};
    use crate::mock::{MockCatalogSource, MockMode};
    use crate::source::test_server::serve_once;
    use crate::source::{FileCatalogSource, HttpCatalogSource};
    use crate::storage::{DEFAULT_STORAGE_KEY, FileStore, MemoryStore, PreferenceStore};
    use crate::{InitState, Localizer};

    const SITE_CATALOG: &str = r#"{
        "en": {
            "lang_name": "English",
            "greet": "Hi",
            "nav_faq": "FAQ",
            "search_placeholder": "Search a board",
            "close": "Close",
            "faq_title": "Frequently asked questions",
            "only_en": "Only in English"
        },
        "fr": {
            "lang_name": "Français",
            "greet": "Salut",
            "nav_faq": "FAQ",
            "search_placeholder": "Rechercher un tableau",
            "close": "Fermer",
            "faq_title": "Questions fréquentes"
        },
        "ar": {
            "lang_name": "العربية",
            "greet": "مرحبا"
        }
    }"#;

    struct Page {
        doc: Document,
        heading: ElementId,
        search: ElementId,
        close: ElementId,
        footer: ElementId,
        title: ElementId,
        selector: ElementId,
    }

    fn faq_page() -> Page {
        let mut doc = Document::new();
        let head = doc.head();
        let title = doc.append_element(head, "title", &[("data-page", "faq")]);
        doc.set_text(title, "FAQ - Tablonaute");

        let body = doc.body();
        let header = doc.append_element(body, "header", &[]);
        let selector = doc.append_element(header, "select", &[("id", "language-selector")]);
        let heading = doc.append_element(body, "h1", &[(TEXT_ATTR, "greet")]);
        let search = doc.append_element(
            body,
            "input",
            &[("type", "search"), (PLACEHOLDER_ATTR, "search_placeholder")],
        );
        let close = doc.append_element(body, "button", &[(TITLE_ATTR, "close")]);
        let footer = doc.append_element(body, "footer", &[(TEXT_ATTR, "only_en")]);

        Page {
            doc,
            heading,
            search,
            close,
            footer,
            title,
            selector,
        }
    }

    fn site_source() -> MockCatalogSource {
        MockCatalogSource::new(MockMode::Payload(SITE_CATALOG.to_string()))
    }

    #[tokio::test]
    async fn test_first_visit_renders_english() {
        let mut page = faq_page();
        let mut localizer = Localizer::with_defaults(MemoryStore::new());
        localizer.init(&site_source(), &mut page.doc).await;

        let doc = &page.doc;
        assert_eq!(localizer.current_language(), "en");
        assert_eq!(doc.element(page.heading).text(), "Hi");
        assert_eq!(doc.element(page.search).attribute("placeholder"), Some("Search a board"));
        assert_eq!(doc.element(page.close).attribute("title"), Some("Close"));
        assert_eq!(doc.element(page.title).text(), "Frequently asked questions - Tablonaute");
        assert_eq!(doc.element(doc.html()).attribute("lang"), Some("en"));
        assert_eq!(doc.element(doc.html()).attribute("dir"), Some("ltr"));

        let options = doc.element(page.selector).children();
        assert_eq!(options.len(), 15);
        assert_eq!(doc.element(options[0]).text(), "English");
        assert_eq!(doc.element(options[2]).text(), "ES");
        assert_eq!(doc.select_value(page.selector), Some("en"));
    }

    #[tokio::test]
    async fn test_returning_visitor_gets_saved_language() {
        let mut page = faq_page();
        let store = MemoryStore::new().with_value(DEFAULT_STORAGE_KEY, "fr");
        let mut localizer = Localizer::with_defaults(store);
        localizer.init(&site_source(), &mut page.doc).await;

        assert_eq!(localizer.current_language(), "fr");
        assert_eq!(localizer.t("greet"), "Salut");
        assert_eq!(localizer.t("missing"), "missing");
        assert_eq!(page.doc.element(page.heading).text(), "Salut");
        assert_eq!(page.doc.element(page.footer).text(), "Only in English");
        assert_eq!(page.doc.select_value(page.selector), Some("fr"));
    }

    #[tokio::test]
    async fn test_corrupt_preference_falls_back() {
        let mut page = faq_page();
        let store = MemoryStore::new().with_value(DEFAULT_STORAGE_KEY, "klingon");
        let mut localizer = Localizer::with_defaults(store);
        localizer.init(&site_source(), &mut page.doc).await;

        assert_eq!(localizer.current_language(), "en");
        assert_eq!(page.doc.element(page.heading).text(), "Hi");
    }

    #[tokio::test]
    async fn test_failed_load_shows_keys() {
        let mut page = faq_page();
        let mut localizer = Localizer::with_defaults(MemoryStore::new());
        let source = MockCatalogSource::new(MockMode::Error("connection reset".to_string()));
        localizer.init(&source, &mut page.doc).await;

        assert_eq!(localizer.state(), InitState::Ready);
        assert!(localizer.catalog().is_empty());
        assert_eq!(localizer.t("greet"), "greet");
        assert_eq!(page.doc.element(page.heading).text(), "greet");
        assert_eq!(page.doc.element(page.title).text(), "FAQ - Tablonaute");

        let options = page.doc.element(page.selector).children();
        assert_eq!(page.doc.element(options[1]).text(), "FR");
    }

    #[tokio::test]
    async fn test_server_error_shows_keys() {
        let base = serve_once("500 Internal Server Error", r#"{"error": "boom"}"#).await;
        let source = HttpCatalogSource::new(&base).unwrap();

        let mut page = faq_page();
        let mut localizer = Localizer::with_defaults(MemoryStore::new());
        localizer.init(&source, &mut page.doc).await;

        assert_eq!(localizer.state(), InitState::Ready);
        assert!(localizer.catalog().is_empty());
        assert_eq!(localizer.t("greet"), "greet");
        assert_eq!(page.doc.element(page.heading).text(), "greet");
        assert_eq!(page.doc.element(page.search).attribute("placeholder"), Some("search_placeholder"));
    }

    #[tokio::test]
    async fn test_catalog_over_http() {
        let base = serve_once("200 OK", SITE_CATALOG).await;
        let source = HttpCatalogSource::new(&base).unwrap();

        let mut page = faq_page();
        let store = MemoryStore::new().with_value(DEFAULT_STORAGE_KEY, "fr");
        let mut localizer = Localizer::with_defaults(store);
        localizer.init(&source, &mut page.doc).await;

        assert_eq!(page.doc.element(page.heading).text(), "Salut");
        assert_eq!(page.doc.element(page.title).text(), "Questions fréquentes - Tablonaute");
    }

    #[tokio::test]
    async fn test_malformed_catalog_shows_keys() {
        let mut page = faq_page();
        let mut localizer = Localizer::with_defaults(MemoryStore::new());
        let source = MockCatalogSource::new(MockMode::Payload(
            r#"{"en": {"greet": ["Hi"]}}"#.to_string(),
        ));
        localizer.init(&source, &mut page.doc).await;

        assert_eq!(localizer.catalog(), &Catalog::new());
        assert_eq!(page.doc.element(page.heading).text(), "greet");
    }

    #[tokio::test]
    async fn test_picker_switches_and_persists() {
        let mut page = faq_page();
        let mut localizer = Localizer::with_defaults(MemoryStore::new());
        localizer.init(&site_source(), &mut page.doc).await;

        assert!(localizer.choose_in_selector("ar", &mut page.doc));
        let doc = &page.doc;
        assert_eq!(localizer.current_language(), "ar");
        assert_eq!(localizer.store().get(DEFAULT_STORAGE_KEY).as_deref(), Some("ar"));
        assert_eq!(doc.element(page.heading).text(), "مرحبا");
        assert_eq!(doc.element(page.close).attribute("title"), Some("Close"));
        assert_eq!(doc.element(doc.html()).attribute("dir"), Some("rtl"));
        assert!(doc.element(doc.body()).has_class(RTL_CLASS));

        assert!(localizer.choose_in_selector("fr", &mut page.doc));
        let doc = &page.doc;
        assert_eq!(doc.element(doc.html()).attribute("dir"), Some("ltr"));
        assert!(!doc.element(doc.body()).has_class(RTL_CLASS));
        assert_eq!(doc.element(page.title).text(), "Questions fréquentes - Tablonaute");
    }

    #[tokio::test]
    async fn test_set_language_syncs_picker() {
        let mut page = faq_page();
        let mut localizer = Localizer::with_defaults(MemoryStore::new());
        localizer.init(&site_source(), &mut page.doc).await;

        localizer.set_language("fr", &mut page.doc);
        assert_eq!(page.doc.select_value(page.selector), Some("fr"));

        localizer.set_language("xx", &mut page.doc);
        assert_eq!(page.doc.select_value(page.selector), Some("fr"));
        assert_eq!(localizer.current_language(), "fr");
    }

    #[tokio::test]
    async fn test_rtl_invariant_across_switches() {
        let mut page = faq_page();
        let mut localizer = Localizer::with_defaults(MemoryStore::new());
        localizer.init(&site_source(), &mut page.doc).await;

        let codes: Vec<String> = localizer.locales().iter().map(str::to_string).collect();
        for code in codes {
            localizer.set_language(&code, &mut page.doc);
            let doc = &page.doc;
            let is_ar = localizer.current_language() == "ar";
            let dir_rtl = doc.element(doc.html()).attribute("dir") == Some("rtl");
            let marked = doc.element(doc.body()).has_class(RTL_CLASS);
            assert_eq!(is_ar, dir_rtl, "locale {}", code);
            assert_eq!(dir_rtl, marked, "locale {}", code);
        }
    }

    #[tokio::test]
    async fn test_reapply_is_idempotent() {
        let mut page = faq_page();
        let store = MemoryStore::new().with_value(DEFAULT_STORAGE_KEY, "ar");
        let mut localizer = Localizer::with_defaults(store);
        localizer.init(&site_source(), &mut page.doc).await;

        let first = page.doc.render();
        localizer.apply(&mut page.doc);
        localizer.apply(&mut page.doc);
        assert_eq!(page.doc.render(), first);
    }

    #[tokio::test]
    async fn test_independent_instances() {
        let mut page_a = faq_page();
        let mut page_b = faq_page();
        let mut a = Localizer::with_defaults(MemoryStore::new());
        let mut b = Localizer::with_defaults(MemoryStore::new());
        a.init(&site_source(), &mut page_a.doc).await;
        b.init(&site_source(), &mut page_b.doc).await;

        a.set_language("fr", &mut page_a.doc);
        assert_eq!(a.t("greet"), "Salut");
        assert_eq!(b.t("greet"), "Hi");
        assert_eq!(page_b.doc.element(page_b.heading).text(), "Hi");
    }

    #[tokio::test]
    async fn test_preference_survives_reload_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("translations.json");
        std::fs::write(&catalog_path, SITE_CATALOG).unwrap();
        let prefs_path = dir.path().join("prefs.json");

        let mut page = faq_page();
        let mut first = Localizer::with_defaults(FileStore::new(&prefs_path));
        first
            .init(&FileCatalogSource::new(&catalog_path), &mut page.doc)
            .await;
        first.set_language("fr", &mut page.doc);

        let mut reloaded_page = faq_page();
        let mut second = Localizer::with_defaults(FileStore::new(&prefs_path));
        second
            .init(&FileCatalogSource::new(&catalog_path), &mut reloaded_page.doc)
            .await;

        assert_eq!(second.current_language(), "fr");
        assert_eq!(reloaded_page.doc.element(reloaded_page.heading).text(), "Salut");
    }

    #[tokio::test]
    async fn test_page_without_picker_or_title() {
        let mut doc = Document::new();
        let body = doc.body();
        let p = doc.append_element(body, "p", &[(TEXT_ATTR, "greet")]);

        let mut localizer = Localizer::with_defaults(MemoryStore::new());
        localizer.init(&site_source(), &mut doc).await;
        localizer.set_language("fr", &mut doc);

        assert_eq!(doc.element(p).text(), "Salut");
        assert_eq!(doc.first_by_tag("select"), None);
        assert!(!localizer.handle_selector_change(&mut doc));
    }
}

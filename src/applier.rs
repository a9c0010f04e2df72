//! Writes the active locale into a document
//!
//! Markup opts in through attributes: `data-i18n` replaces the element's
//! text, `data-i18n-placeholder` and `data-i18n-title` set the matching
//! attribute. The root element gets `lang` and `dir`, the body gets the
//! `rtl` class for right-to-left locales, and a `<title data-page="...">`
//! is rewritten from the `<page>_title` key.

use crate::catalog::Catalog;
use crate::document::Document;
use crate::locale::{Direction, LocaleSet};
use crate::lookup::translate;

pub const TEXT_ATTR: &str = "data-i18n";
pub const PLACEHOLDER_ATTR: &str = "data-i18n-placeholder";
pub const TITLE_ATTR: &str = "data-i18n-title";
pub const PAGE_ATTR: &str = "data-page";
pub const RTL_CLASS: &str = "rtl";
pub const TITLE_KEY_SUFFIX: &str = "_title";

/// Read-only view of the state needed to translate
#[derive(Debug, Clone, Copy)]
pub struct TranslationView<'a> {
    pub catalog: &'a Catalog,
    pub locales: &'a LocaleSet,
    pub active: &'a str,
}

impl TranslationView<'_> {
    pub fn t(&self, key: &str) -> String {
        translate(self.catalog, self.active, self.locales.fallback(), key)
    }
}

/// Apply every translation for the view's active locale
///
/// Idempotent: a second call with the same view leaves the document as the
/// first call did.
pub fn apply(view: TranslationView<'_>, doc: &mut Document, product_name: &str) {
    for id in doc.elements_with_attribute(TEXT_ATTR) {
        if let Some(key) = doc.element(id).attribute(TEXT_ATTR).map(str::to_string) {
            doc.set_text(id, &view.t(&key));
        }
    }

    for (marker, target) in [(PLACEHOLDER_ATTR, "placeholder"), (TITLE_ATTR, "title")] {
        for id in doc.elements_with_attribute(marker) {
            if let Some(key) = doc.element(id).attribute(marker).map(str::to_string) {
                doc.set_attribute(id, target, &view.t(&key));
            }
        }
    }

    let html = doc.html();
    let body = doc.body();
    let direction = view.locales.direction(view.active);
    doc.set_attribute(html, "lang", view.active);
    doc.set_attribute(html, "dir", direction.as_str());
    match direction {
        Direction::Rtl => doc.add_class(body, RTL_CLASS),
        Direction::Ltr => doc.remove_class(body, RTL_CLASS),
    }

    apply_page_title(view, doc, product_name);
}

fn apply_page_title(view: TranslationView<'_>, doc: &mut Document, product_name: &str) {
    let Some(title) = doc.first_by_tag("title") else {
        return;
    };
    let Some(page) = doc.element(title).attribute(PAGE_ATTR) else {
        return;
    };
    if page.is_empty() {
        return;
    }

    let key = format!("{}{}", page, TITLE_KEY_SUFFIX);
    let translated = view.t(&key);
    if translated != key {
        doc.set_text(title, &format!("{} - {}", translated, product_name));
    }
}

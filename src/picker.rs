use crate::applier::TranslationView;
use crate::document::{Document, ElementId};

/// Id of the `<select>` container the picker is built into
pub const DEFAULT_SELECTOR_ID: &str = "language-selector";

/// Label for a locale's option: its own display name, or the uppercased code
pub fn option_label(view: TranslationView<'_>, code: &str) -> String {
    view.catalog
        .display_name(code)
        .map(str::to_string)
        .unwrap_or_else(|| code.to_uppercase())
}

/// Rebuild the locale picker inside the element with id `selector_id`
///
/// Does nothing and returns `None` when the page has no such element.
/// Otherwise the container's children are replaced by one `<option>` per
/// supported locale, the active one is selected, and a change listener is
/// bound unless one already is.
pub fn build_selector(
    view: TranslationView<'_>,
    doc: &mut Document,
    selector_id: &str,
) -> Option<ElementId> {
    let selector = doc.element_by_id(selector_id)?;
    doc.clear_children(selector);

    for code in view.locales.iter() {
        let option = doc.append_element(selector, "option", &[("value", code)]);
        doc.set_text(option, &option_label(view, code));
        if code == view.active {
            doc.set_attribute(option, "selected", "");
        }
    }

    if doc.change_listener_count(selector) == 0 {
        doc.add_change_listener(selector);
    }
    Some(selector)
}

/// Point the picker at the active locale, if the page has one
pub fn sync_selector(view: TranslationView<'_>, doc: &mut Document, selector_id: &str) {
    if let Some(selector) = doc.element_by_id(selector_id) {
        doc.set_select_value(selector, view.active);
    }
}

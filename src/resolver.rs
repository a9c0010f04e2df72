use crate::locale::LocaleSet;
use crate::storage::PreferenceStore;

/// Locale to start with: the persisted preference when it names a supported
/// locale, the fallback otherwise
///
/// Never fails. A missing, empty or unknown stored value is ignored.
pub fn resolve_locale<S: PreferenceStore + ?Sized>(
    store: &S,
    storage_key: &str,
    locales: &LocaleSet,
) -> String {
    match store.get(storage_key) {
        Some(stored) if locales.is_supported(&stored) => stored,
        _ => locales.fallback().to_string(),
    }
}

use crate::catalog::Catalog;

/// Translate `key` for `active`, falling back to `fallback` and then to the
/// key itself
///
/// Total: an unknown key, an unknown locale or an empty catalog all yield the
/// key unchanged.
pub fn translate(catalog: &Catalog, active: &str, fallback: &str, key: &str) -> String {
    catalog
        .message(active, key)
        .or_else(|| catalog.message(fallback, key))
        .unwrap_or(key)
        .to_string()
}

/// Like [`translate`] but reports whether a catalog entry was found
pub fn lookup<'a>(catalog: &'a Catalog, active: &str, fallback: &str, key: &str) -> Option<&'a str> {
    catalog
        .message(active, key)
        .or_else(|| catalog.message(fallback, key))
}

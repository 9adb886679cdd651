//! Page-level configuration lookup.
//!
//! Pages may embed a JSON override in `<html data-shell-config="...">`.
//! A broken override never breaks the page: it is logged and the defaults
//! are used instead.

#[cfg(test)]
#[path = "page_config_test.rs"]
mod page_config_test;

use shell::config::ShellConfig;

/// Resolve the raw attribute value into a config.
#[must_use]
pub fn resolve(raw: Option<&str>) -> ShellConfig {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return ShellConfig::default();
    };
    match ShellConfig::from_json(raw) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("page_config: {err}; using defaults");
            ShellConfig::default()
        }
    }
}

/// Read the override from the document's root element.
#[cfg(feature = "hydrate")]
pub fn from_document(document: &web_sys::Document) -> ShellConfig {
    let raw = document
        .document_element()
        .and_then(|root| root.get_attribute(shell::consts::ATTR_SHELL_CONFIG));
    resolve(raw.as_deref())
}

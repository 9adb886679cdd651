//! Theme mode resolution and root presentation attributes.
//!
//! The stored mode is three-way (`system`, `light`, `dark`); what the page
//! renders is two-way. `system` follows the OS color-scheme signal and is
//! recomputed whenever that signal changes.
//!
//! Root outputs:
//! - `data-theme`: the raw mode, absent for `system`
//! - `data-theme-effective`: the resolved `light` / `dark`
//! - `style.color-scheme`: same as the effective value

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ARIA_CHECKED, ATTR_THEME, ATTR_THEME_EFFECTIVE, STYLE_COLOR_SCHEME};
use crate::host::Host;
use crate::prefs::{PreferenceStore, write_or_warn};

/// User-selected theme preference. Persisted verbatim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the OS color-scheme signal.
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a persisted value. Anything unrecognized is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "system" => Some(Self::System),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// The light/dark value actually rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectiveTheme {
    Light,
    Dark,
}

impl EffectiveTheme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Resolve a mode against the OS dark-mode signal.
#[must_use]
pub fn resolve_effective(mode: ThemeMode, prefers_dark: bool) -> EffectiveTheme {
    match mode {
        ThemeMode::Light => EffectiveTheme::Light,
        ThemeMode::Dark => EffectiveTheme::Dark,
        ThemeMode::System if prefers_dark => EffectiveTheme::Dark,
        ThemeMode::System => EffectiveTheme::Light,
    }
}

/// Read the stored mode, defaulting to `system` when absent or invalid.
pub fn read_theme<S: PreferenceStore + ?Sized>(store: &S, key: &str) -> ThemeMode {
    match store.read(key) {
        None => ThemeMode::System,
        Some(raw) => ThemeMode::parse(&raw).unwrap_or_else(|| {
            log::debug!("theme: ignoring unrecognized stored mode {raw:?}");
            ThemeMode::System
        }),
    }
}

/// Write the root presentation attributes for `mode`. Idempotent.
pub fn apply<H: Host>(host: &H, mode: ThemeMode) -> EffectiveTheme {
    let root = host.root();
    match mode {
        ThemeMode::Light | ThemeMode::Dark => host.set_attribute(&root, ATTR_THEME, mode.as_str()),
        ThemeMode::System => host.remove_attribute(&root, ATTR_THEME),
    }

    let effective = resolve_effective(mode, host.prefers_dark());
    host.set_attribute(&root, ATTR_THEME_EFFECTIVE, effective.as_str());
    host.set_style(&root, STYLE_COLOR_SCHEME, effective.as_str());
    effective
}

/// Persist `mode`, then apply it locally.
pub fn persist_and_apply<H: Host, S: PreferenceStore + ?Sized>(
    host: &H,
    store: &S,
    key: &str,
    mode: ThemeMode,
) -> EffectiveTheme {
    write_or_warn(store, key, mode.as_str());
    apply(host, mode)
}

/// Mirror `mode` into the `aria-checked` state of every `data-theme` item
/// inside `menu`.
pub fn sync_radio_items<H: Host>(host: &H, menu: &H::Node, mode: ThemeMode) {
    for item in host.descendants_with_attribute(menu, ATTR_THEME) {
        let checked = host.attribute(&item, ATTR_THEME).as_deref() == Some(mode.as_str());
        host.set_attribute(&item, ARIA_CHECKED, if checked { "true" } else { "false" });
    }
}

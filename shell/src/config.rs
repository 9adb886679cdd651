//! Page configuration: storage keys, element ids, and UI labels.
//!
//! Every field has a default matching the server-rendered markup, so an
//! empty JSON object (or no configuration at all) yields a working shell.
//! Pages can override any subset through the root element's
//! `data-shell-config` attribute.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::login::{DEFAULT_SUBMIT_REENABLE_MS, LoginLabels};
use crate::menu::MenuRole;
use crate::sidebar::SidebarLabels;

pub const DEFAULT_THEME_KEY: &str = "vana.theme";
pub const DEFAULT_SIDEBAR_KEY: &str = "vana.sidebar";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse shell config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("storage keys must differ (both are {0:?})")]
    DuplicateKey(String),
    #[error("empty value for {0}")]
    Empty(&'static str),
}

/// Names of the persisted preference keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub theme: String,
    pub sidebar: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self { theme: DEFAULT_THEME_KEY.to_owned(), sidebar: DEFAULT_SIDEBAR_KEY.to_owned() }
    }
}

/// A popover menu and its trigger, by element id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSpec {
    pub menu: String,
    pub anchor: String,
    #[serde(default)]
    pub role: MenuRole,
}

/// Ids of the single-instance shell elements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub backdrop: String,
    pub sidebar_toggle: String,
    pub avatar: String,
    /// Element whose `data-user` feeds the avatar initials.
    pub avatar_source: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            backdrop: "backdrop".to_owned(),
            sidebar_toggle: "sidebarToggle".to_owned(),
            avatar: "avatar".to_owned(),
            avatar_source: "accountBtn".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    /// Delay before a stalled submit is re-enabled; `0` disables it.
    pub submit_reenable_ms: u32,
    pub labels: LoginLabels,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self { submit_reenable_ms: DEFAULT_SUBMIT_REENABLE_MS, labels: LoginLabels::default() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub storage: StorageKeys,
    pub elements: ElementIds,
    pub menus: Vec<MenuSpec>,
    pub sidebar_labels: SidebarLabels,
    pub login: LoginConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            storage: StorageKeys::default(),
            elements: ElementIds::default(),
            menus: vec![
                MenuSpec { menu: "themeMenu".to_owned(), anchor: "themeBtn".to_owned(), role: MenuRole::Theme },
                MenuSpec { menu: "accountMenu".to_owned(), anchor: "accountBtn".to_owned(), role: MenuRole::Plain },
            ],
            sidebar_labels: SidebarLabels::default(),
            login: LoginConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Parse a JSON override and validate it. Missing fields take defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.theme.is_empty() {
            return Err(ConfigError::Empty("storage.theme"));
        }
        if self.storage.sidebar.is_empty() {
            return Err(ConfigError::Empty("storage.sidebar"));
        }
        if self.storage.theme == self.storage.sidebar {
            return Err(ConfigError::DuplicateKey(self.storage.theme.clone()));
        }
        if self.elements.backdrop.is_empty() {
            return Err(ConfigError::Empty("elements.backdrop"));
        }
        if self.menus.iter().any(|entry| entry.menu.is_empty() || entry.anchor.is_empty()) {
            return Err(ConfigError::Empty("menus"));
        }
        Ok(())
    }
}

//! Sidebar expand/collapse state.
//!
//! Mirrors the theme mechanism: read on load, persist on toggle, re-apply
//! when another tab writes the key. The root carries `data-sidebar="expanded"`
//! while open; the toggle button mirrors the state in `aria-expanded`,
//! `title`, and `aria-label`.

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod sidebar_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ARIA_EXPANDED, ARIA_LABEL, ATTR_SIDEBAR, TITLE};
use crate::host::Host;
use crate::prefs::{PreferenceStore, write_or_warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarState {
    Expanded,
    #[default]
    Collapsed,
}

impl SidebarState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expanded => "expanded",
            Self::Collapsed => "collapsed",
        }
    }

    /// Only `expanded` is meaningful; every other value is collapsed.
    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        if raw == Some("expanded") { Self::Expanded } else { Self::Collapsed }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Expanded => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
        }
    }
}

/// Toggle button text for each state. The label describes the action the
/// button will perform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarLabels {
    pub expand: String,
    pub collapse: String,
}

impl Default for SidebarLabels {
    fn default() -> Self {
        Self { expand: "Expandir menu".to_owned(), collapse: "Recolher menu".to_owned() }
    }
}

#[derive(Debug)]
pub struct Sidebar<N> {
    toggle: Option<N>,
    state: SidebarState,
    key: String,
    labels: SidebarLabels,
}

impl<N: Clone + PartialEq + std::fmt::Debug> Sidebar<N> {
    /// Initial state: expanded when either the server-rendered root or the
    /// store says so. The result is applied and persisted immediately.
    pub fn load<H, S>(host: &H, store: &S, key: &str, toggle: Option<N>, labels: SidebarLabels) -> Self
    where
        H: Host<Node = N>,
        S: PreferenceStore + ?Sized,
    {
        let dom = host.attribute(&host.root(), ATTR_SIDEBAR);
        let stored = store.read(key);
        let state = if dom.as_deref() == Some("expanded") {
            SidebarState::Expanded
        } else {
            SidebarState::from_stored(stored.as_deref())
        };

        if toggle.is_none() {
            log::info!("sidebar: no toggle element; state follows storage only");
        }

        let mut sidebar = Self { toggle, state, key: key.to_owned(), labels };
        sidebar.set(host, store, state);
        sidebar
    }

    #[must_use]
    pub fn state(&self) -> SidebarState {
        self.state
    }

    #[must_use]
    pub fn toggle_element(&self) -> Option<&N> {
        self.toggle.as_ref()
    }

    /// User toggle: flip, persist, apply.
    pub fn toggle<H, S>(&mut self, host: &H, store: &S) -> SidebarState
    where
        H: Host<Node = N>,
        S: PreferenceStore + ?Sized,
    {
        let next = self.state.toggled();
        self.set(host, store, next);
        next
    }

    /// Persist and apply `state`.
    pub fn set<H, S>(&mut self, host: &H, store: &S, state: SidebarState)
    where
        H: Host<Node = N>,
        S: PreferenceStore + ?Sized,
    {
        write_or_warn(store, &self.key, state.as_str());
        self.apply(host, state);
    }

    /// Re-read the store after another tab changed it. Not persisted again.
    pub fn sync_from_store<H, S>(&mut self, host: &H, store: &S)
    where
        H: Host<Node = N>,
        S: PreferenceStore + ?Sized,
    {
        let state = SidebarState::from_stored(store.read(&self.key).as_deref());
        self.apply(host, state);
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    fn apply<H: Host<Node = N>>(&mut self, host: &H, state: SidebarState) {
        self.state = state;
        let root = host.root();
        let expanded = state == SidebarState::Expanded;
        if expanded {
            host.set_attribute(&root, ATTR_SIDEBAR, state.as_str());
        } else {
            host.remove_attribute(&root, ATTR_SIDEBAR);
        }

        let Some(toggle) = &self.toggle else {
            return;
        };
        let label = if expanded { &self.labels.collapse } else { &self.labels.expand };
        host.set_attribute(toggle, ARIA_EXPANDED, if expanded { "true" } else { "false" });
        host.set_attribute(toggle, TITLE, label);
        host.set_attribute(toggle, ARIA_LABEL, label);
    }
}

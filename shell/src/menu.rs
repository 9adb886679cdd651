//! Popover menu coordinator.
//!
//! Exactly one menu can be open at a time. The coordinator owns the only
//! [`MenuHandle`] and every transition that creates or drops it:
//!
//! ```text
//!            open_menu(i)                 open_menu(j)
//!   Closed ──────────────▶ Open(i) ──────────────────▶ Open(j)
//!     ▲                      │        (closes i first)
//!     └──── close_menus ─────┘
//! ```
//!
//! Closing always hides the shared backdrop, resets every registered
//! anchor's `aria-expanded`, and returns focus to the anchor that opened the
//! menu. Opening a second menu runs that close sequence first, so nothing of
//! the previous menu survives the switch.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ARIA_EXPANDED, STYLE_LEFT, STYLE_TOP};
use crate::geometry::{self, Geometry};
use crate::host::Host;

/// What a menu does besides opening and closing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuRole {
    /// A plain popover (account menu and the like).
    #[default]
    Plain,
    /// Items tagged with `data-theme` select the theme mode.
    Theme,
}

/// A menu surface and the trigger that opens it.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuPair<N> {
    pub menu: N,
    pub anchor: N,
    pub role: MenuRole,
}

/// The currently open menu.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuHandle<N> {
    /// Position of the pair in [`MenuCoordinator::pairs`].
    pub index: usize,
    pub menu: N,
    pub anchor: N,
}

/// Result of an anchor activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuTransition {
    Opened(usize),
    Closed,
    Ignored,
}

#[derive(Debug)]
pub struct MenuCoordinator<N> {
    backdrop: N,
    pairs: Vec<MenuPair<N>>,
    open: Option<MenuHandle<N>>,
}

impl<N: Clone + PartialEq + std::fmt::Debug> MenuCoordinator<N> {
    /// Build a coordinator. Returns `None` when there is nothing to
    /// coordinate, in which case the page simply has no popovers.
    #[must_use]
    pub fn new(backdrop: N, pairs: Vec<MenuPair<N>>) -> Option<Self> {
        if pairs.is_empty() {
            return None;
        }
        Some(Self { backdrop, pairs, open: None })
    }

    #[must_use]
    pub fn pairs(&self) -> &[MenuPair<N>] {
        &self.pairs
    }

    #[must_use]
    pub fn backdrop(&self) -> &N {
        &self.backdrop
    }

    #[must_use]
    pub fn open_handle(&self) -> Option<&MenuHandle<N>> {
        self.open.as_ref()
    }

    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.open.as_ref().is_some_and(|h| h.index == index)
    }

    /// First pair with the given role.
    #[must_use]
    pub fn find_role(&self, role: MenuRole) -> Option<(usize, &MenuPair<N>)> {
        self.pairs.iter().enumerate().find(|(_, pair)| pair.role == role)
    }

    /// Open the menu at `index`, closing whatever is open first.
    pub fn open_menu<H: Host<Node = N>>(&mut self, host: &H, index: usize) -> MenuTransition {
        let Some(pair) = self.pairs.get(index).cloned() else {
            log::debug!("menu: no menu registered at index {index}");
            return MenuTransition::Ignored;
        };

        self.close_menus(host);
        host.set_hidden(&self.backdrop, false);

        // Visible before measuring so the rect carries real dimensions.
        host.set_hidden(&pair.menu, false);
        apply_geometry(host, &pair.menu, &pair.anchor);

        host.set_attribute(&pair.anchor, ARIA_EXPANDED, "true");
        self.open = Some(MenuHandle { index, menu: pair.menu, anchor: pair.anchor });
        log::debug!("menu: opened {index}");
        MenuTransition::Opened(index)
    }

    /// Close the open menu, if any, and restore focus to its anchor.
    pub fn close_menus<H: Host<Node = N>>(&mut self, host: &H) {
        let handle = self.open.take();
        if let Some(handle) = &handle {
            host.set_hidden(&handle.menu, true);
        }

        host.set_hidden(&self.backdrop, true);
        for pair in &self.pairs {
            host.set_attribute(&pair.anchor, ARIA_EXPANDED, "false");
        }

        if let Some(handle) = handle {
            host.focus(&handle.anchor);
            log::debug!("menu: closed {}", handle.index);
        }
    }

    /// Anchor click: close when this anchor's menu is open, open otherwise.
    pub fn toggle<H: Host<Node = N>>(&mut self, host: &H, index: usize) -> MenuTransition {
        if self.is_open(index) {
            self.close_menus(host);
            return MenuTransition::Closed;
        }
        self.open_menu(host, index)
    }

    /// Document-wide click: dismiss when it lands outside the open menu and
    /// outside every registered anchor.
    pub fn dismiss_on_outside_click<H: Host<Node = N>>(&mut self, host: &H, target: &N) -> bool {
        let Some(handle) = &self.open else {
            return false;
        };
        if host.contains(&handle.menu, target) {
            return false;
        }
        if self.pairs.iter().any(|pair| host.contains(&pair.anchor, target)) {
            return false;
        }
        self.close_menus(host);
        true
    }

    /// Recompute the open menu's position. Nothing else changes.
    pub fn reposition<H: Host<Node = N>>(&self, host: &H) -> Option<Geometry> {
        let handle = self.open.as_ref()?;
        Some(apply_geometry(host, &handle.menu, &handle.anchor))
    }
}

fn apply_geometry<H: Host>(host: &H, menu: &H::Node, anchor: &H::Node) -> Geometry {
    let placed = geometry::position(host.bounding_rect(menu), host.bounding_rect(anchor), host.viewport());
    host.set_style(menu, STYLE_TOP, &placed.top_css());
    host.set_style(menu, STYLE_LEFT, &placed.left_css());
    placed
}

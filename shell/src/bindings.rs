//! Trigger table: which listener drives which transition.
//!
//! The shell never registers listeners itself. [`crate::shell::Shell::bindings`]
//! returns the full (target, event kind, route) table once at startup; the
//! host registers one listener per row and converts every delivered event
//! into a [`ShellEvent`] with [`Route::into_event`]. Keeping the table as
//! data makes the transition set enumerable in tests.

#[cfg(test)]
#[path = "bindings_test.rs"]
mod bindings_test;

use crate::prefs::StorageChange;

/// Where a listener is attached.
#[derive(Clone, Debug, PartialEq)]
pub enum ListenerTarget<N> {
    Element(N),
    Document,
    Window,
    /// The OS color-scheme media query.
    ColorScheme,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Click,
    KeyDown,
    Resize,
    Storage,
    Change,
}

impl EventKind {
    /// DOM event type name.
    #[must_use]
    pub fn dom_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Resize => "resize",
            Self::Storage => "storage",
            Self::Change => "change",
        }
    }
}

/// Which shell transition a listener feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Trigger of the menu at this index.
    AnchorClick(usize),
    /// Click inside the theme menu at this index.
    MenuItemClick(usize),
    BackdropClick,
    /// Document-wide click, dismisses when outside menus and anchors.
    OutsideClick,
    KeyDown,
    Resize,
    StorageChange,
    ColorSchemeChange,
    SidebarToggle,
}

/// What a host extracted from a delivered DOM event.
#[derive(Clone, Debug)]
pub struct EventPayload<N> {
    pub target: Option<N>,
    pub key: Option<String>,
    pub storage: Option<StorageChange>,
}

impl<N> Default for EventPayload<N> {
    fn default() -> Self {
        Self { target: None, key: None, storage: None }
    }
}

/// An input the shell reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum ShellEvent<N> {
    AnchorClick(usize),
    MenuItemClick { index: usize, target: N },
    BackdropClick,
    OutsideClick { target: N },
    KeyDown { key: String },
    Resize,
    StorageChanged(StorageChange),
    ColorSchemeChanged,
    SidebarToggle,
}

impl Route {
    /// Build the event for this route. `None` when the payload lacks what
    /// the route needs (a click without a target element, say).
    #[must_use]
    pub fn into_event<N>(self, payload: EventPayload<N>) -> Option<ShellEvent<N>> {
        Some(match self {
            Self::AnchorClick(index) => ShellEvent::AnchorClick(index),
            Self::MenuItemClick(index) => ShellEvent::MenuItemClick { index, target: payload.target? },
            Self::BackdropClick => ShellEvent::BackdropClick,
            Self::OutsideClick => ShellEvent::OutsideClick { target: payload.target? },
            Self::KeyDown => ShellEvent::KeyDown { key: payload.key? },
            Self::Resize => ShellEvent::Resize,
            Self::StorageChange => ShellEvent::StorageChanged(payload.storage?),
            Self::ColorSchemeChange => ShellEvent::ColorSchemeChanged,
            Self::SidebarToggle => ShellEvent::SidebarToggle,
        })
    }
}

/// One row of the trigger table.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding<N> {
    pub target: ListenerTarget<N>,
    pub kind: EventKind,
    pub route: Route,
}

impl<N> Binding<N> {
    #[must_use]
    pub fn new(target: ListenerTarget<N>, kind: EventKind, route: Route) -> Self {
        Self { target, kind, route }
    }
}

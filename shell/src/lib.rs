//! Page shell UI coordination for the server-rendered pages.
//!
//! This crate owns every stateful decision the page chrome makes: which
//! popover menu is open and where it sits, which theme is in effect, whether
//! the sidebar is expanded, and how those preferences follow the user across
//! tabs. It never touches the browser directly. Everything it needs from the
//! page goes through the [`host::Host`] and [`prefs::PreferenceStore`]
//! traits, which the `shell-web` crate implements over `web-sys` and which
//! [`fake`] implements in memory for tests.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`shell`] | Per-page [`shell::Shell`] coordinator and event routing |
//! | [`bindings`] | Trigger table: listener targets, event kinds, routes |
//! | [`menu`] | Single-open popover state machine |
//! | [`geometry`] | Viewport-clamped menu placement |
//! | [`theme`] | Theme mode resolution and root attributes |
//! | [`sidebar`] | Sidebar expand/collapse state |
//! | [`prefs`] | Persisted key/value store and cross-tab change events |
//! | [`config`] | Page configuration (keys, element ids, labels) |
//! | [`avatar`] | Account avatar initials |
//! | [`login`] | Login form normalization, submit guard, password toggle |
//! | [`host`] | DOM capability trait |
//! | [`fake`] | In-memory host and storage used by tests |
//! | [`consts`] | Attribute names and layout constants |

pub mod avatar;
pub mod bindings;
pub mod config;
pub mod consts;
pub mod fake;
pub mod geometry;
pub mod host;
pub mod login;
pub mod menu;
pub mod prefs;
pub mod shell;
pub mod sidebar;
pub mod theme;

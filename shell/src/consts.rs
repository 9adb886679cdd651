//! Shared attribute names and layout constants.

/// Root attribute carrying the raw theme mode (absent for `system`).
pub const ATTR_THEME: &str = "data-theme";
/// Root attribute carrying the resolved light/dark value.
pub const ATTR_THEME_EFFECTIVE: &str = "data-theme-effective";
/// Root attribute present with `expanded` while the sidebar is open.
pub const ATTR_SIDEBAR: &str = "data-sidebar";
/// Account trigger attribute holding the signed-in user's display label.
pub const ATTR_USER: &str = "data-user";
/// Root attribute that may hold a JSON page configuration.
pub const ATTR_SHELL_CONFIG: &str = "data-shell-config";

pub const ARIA_EXPANDED: &str = "aria-expanded";
pub const ARIA_CHECKED: &str = "aria-checked";
pub const ARIA_LABEL: &str = "aria-label";
pub const ARIA_PRESSED: &str = "aria-pressed";
pub const TITLE: &str = "title";

/// Inline style property mirroring the effective theme.
pub const STYLE_COLOR_SCHEME: &str = "color-scheme";
pub const STYLE_TOP: &str = "top";
pub const STYLE_LEFT: &str = "left";

/// Horizontal gap between an anchor's right edge and its menu.
pub const MENU_GAP: f64 = 10.0;
/// Minimum distance kept between a menu and every viewport edge.
pub const VIEWPORT_MARGIN: f64 = 10.0;

/// Key name reported by keyboard events for the dismiss key.
pub const KEY_ESCAPE: &str = "Escape";

/// Media query for the OS-level dark preference.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

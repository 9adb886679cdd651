//! The per-page coordinator.
//!
//! One [`Shell`] exists per page load. It owns the host, the preference
//! store, and every controller, and is the only thing that mutates them.
//! Each [`ShellEvent`] is handled to completion before `handle` returns, so
//! no transition is ever observed half-applied.
//!
//! Subsystems degrade independently: a page without a backdrop or without
//! any complete menu pair gets no popovers, a page without a sidebar toggle
//! still honors the persisted sidebar state, and theme handling always runs.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use crate::avatar;
use crate::bindings::{Binding, EventKind, ListenerTarget, Route, ShellEvent};
use crate::config::{ElementIds, ShellConfig};
use crate::consts::{ATTR_THEME, ATTR_USER, KEY_ESCAPE};
use crate::host::Host;
use crate::menu::{MenuCoordinator, MenuPair, MenuRole, MenuTransition};
use crate::prefs::{PreferenceStore, StorageChange};
use crate::sidebar::{Sidebar, SidebarState};
use crate::theme::{self, EffectiveTheme, ThemeMode};

pub struct Shell<H: Host, S: PreferenceStore> {
    host: H,
    store: S,
    config: ShellConfig,
    theme: ThemeMode,
    sidebar: Sidebar<H::Node>,
    menus: Option<MenuCoordinator<H::Node>>,
}

impl<H: Host, S: PreferenceStore> Shell<H, S> {
    /// Read persisted state, apply it to the page, and look up the menu
    /// elements.
    pub fn boot(host: H, store: S, config: ShellConfig) -> Self {
        let mode = theme::read_theme(&store, &config.storage.theme);
        theme::apply(&host, mode);

        let toggle = host.element_by_id(&config.elements.sidebar_toggle);
        let sidebar = Sidebar::load(&host, &store, &config.storage.sidebar, toggle, config.sidebar_labels.clone());

        render_avatar(&host, &config.elements);
        let menus = build_menus(&host, &config);

        let shell = Self { host, store, config, theme: mode, sidebar, menus };
        shell.sync_theme_menus();
        log::info!(
            "shell: booted (theme={}, sidebar={}, menus={})",
            mode.as_str(),
            shell.sidebar.state().as_str(),
            shell.menus.as_ref().map_or(0, |m| m.pairs().len())
        );
        shell
    }

    /// Every listener the host must register, registered once.
    #[must_use]
    pub fn bindings(&self) -> Vec<Binding<H::Node>> {
        let mut table = vec![
            Binding::new(ListenerTarget::Window, EventKind::Storage, Route::StorageChange),
            Binding::new(ListenerTarget::ColorScheme, EventKind::Change, Route::ColorSchemeChange),
        ];

        if let Some(toggle) = self.sidebar.toggle_element() {
            table.push(Binding::new(ListenerTarget::Element(toggle.clone()), EventKind::Click, Route::SidebarToggle));
        }

        let Some(menus) = &self.menus else {
            return table;
        };
        for (index, pair) in menus.pairs().iter().enumerate() {
            table.push(Binding::new(
                ListenerTarget::Element(pair.anchor.clone()),
                EventKind::Click,
                Route::AnchorClick(index),
            ));
            if pair.role == MenuRole::Theme {
                table.push(Binding::new(
                    ListenerTarget::Element(pair.menu.clone()),
                    EventKind::Click,
                    Route::MenuItemClick(index),
                ));
            }
        }
        table.extend([
            Binding::new(ListenerTarget::Element(menus.backdrop().clone()), EventKind::Click, Route::BackdropClick),
            Binding::new(ListenerTarget::Document, EventKind::KeyDown, Route::KeyDown),
            Binding::new(ListenerTarget::Document, EventKind::Click, Route::OutsideClick),
            Binding::new(ListenerTarget::Window, EventKind::Resize, Route::Resize),
        ]);
        table
    }

    pub fn handle(&mut self, event: ShellEvent<H::Node>) {
        match event {
            ShellEvent::AnchorClick(index) => {
                self.activate_anchor(index);
            }
            ShellEvent::MenuItemClick { index, target } => self.select_from_menu(index, &target),
            ShellEvent::BackdropClick => self.close_menus(),
            ShellEvent::OutsideClick { target } => {
                if let Some(menus) = self.menus.as_mut() {
                    menus.dismiss_on_outside_click(&self.host, &target);
                }
            }
            ShellEvent::KeyDown { key } => {
                if key == KEY_ESCAPE {
                    self.close_menus();
                }
            }
            ShellEvent::Resize => {
                if let Some(menus) = &self.menus {
                    menus.reposition(&self.host);
                }
            }
            ShellEvent::StorageChanged(change) => self.on_storage_change(&change),
            ShellEvent::ColorSchemeChanged => {
                if self.theme == ThemeMode::System {
                    theme::apply(&self.host, ThemeMode::System);
                }
            }
            ShellEvent::SidebarToggle => {
                self.sidebar.toggle(&self.host, &self.store);
            }
        }
    }

    /// User picked a theme mode.
    pub fn select_theme(&mut self, mode: ThemeMode) {
        self.theme = mode;
        theme::persist_and_apply(&self.host, &self.store, &self.config.storage.theme, mode);
        self.sync_theme_menus();
    }

    /// Anchor click with toggle semantics. The theme menu's radio states are
    /// refreshed before it opens.
    pub fn activate_anchor(&mut self, index: usize) -> MenuTransition {
        let Some(menus) = self.menus.as_mut() else {
            return MenuTransition::Ignored;
        };
        if !menus.is_open(index) {
            if let Some(pair) = menus.pairs().get(index).filter(|p| p.role == MenuRole::Theme) {
                theme::sync_radio_items(&self.host, &pair.menu, self.theme);
            }
        }
        menus.toggle(&self.host, index)
    }

    pub fn close_menus(&mut self) {
        if let Some(menus) = self.menus.as_mut() {
            menus.close_menus(&self.host);
        }
    }

    #[must_use]
    pub fn theme_mode(&self) -> ThemeMode {
        self.theme
    }

    #[must_use]
    pub fn effective_theme(&self) -> EffectiveTheme {
        theme::resolve_effective(self.theme, self.host.prefers_dark())
    }

    #[must_use]
    pub fn sidebar_state(&self) -> SidebarState {
        self.sidebar.state()
    }

    #[must_use]
    pub fn menus(&self) -> Option<&MenuCoordinator<H::Node>> {
        self.menus.as_ref()
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    fn select_from_menu(&mut self, index: usize, target: &H::Node) {
        let Some(menu) = self.menus.as_ref().and_then(|m| m.pairs().get(index)).map(|p| p.menu.clone()) else {
            return;
        };
        let Some(item) = self.host.closest_with_attribute(target, ATTR_THEME) else {
            return;
        };
        // The root carries `data-theme` too; only items inside the menu count.
        if item == menu || !self.host.contains(&menu, &item) {
            return;
        }
        let Some(raw) = self.host.attribute(&item, ATTR_THEME) else {
            return;
        };
        let Some(mode) = ThemeMode::parse(&raw) else {
            log::debug!("shell: ignoring theme item with value {raw:?}");
            return;
        };

        self.select_theme(mode);
        self.close_menus();
    }

    fn on_storage_change(&mut self, change: &StorageChange) {
        if change.concerns(&self.config.storage.theme) {
            self.theme = theme::read_theme(&self.store, &self.config.storage.theme);
            theme::apply(&self.host, self.theme);
            self.sync_theme_menus();
            log::debug!("shell: theme synced from another tab ({})", self.theme.as_str());
        }
        if change.concerns(self.sidebar.key()) {
            self.sidebar.sync_from_store(&self.host, &self.store);
            log::debug!("shell: sidebar synced from another tab ({})", self.sidebar.state().as_str());
        }
    }

    fn sync_theme_menus(&self) {
        let Some(menus) = &self.menus else {
            return;
        };
        for pair in menus.pairs().iter().filter(|p| p.role == MenuRole::Theme) {
            theme::sync_radio_items(&self.host, &pair.menu, self.theme);
        }
    }
}

fn build_menus<H: Host>(host: &H, config: &ShellConfig) -> Option<MenuCoordinator<H::Node>> {
    let Some(backdrop) = host.element_by_id(&config.elements.backdrop) else {
        log::info!("shell: no #{} element; popover menus disabled", config.elements.backdrop);
        return None;
    };

    let pairs: Vec<_> = config
        .menus
        .iter()
        .filter_map(|entry| {
            match (host.element_by_id(&entry.menu), host.element_by_id(&entry.anchor)) {
                (Some(menu), Some(anchor)) => Some(MenuPair { menu, anchor, role: entry.role }),
                _ => {
                    log::debug!("shell: skipping menu #{} / #{}: element missing", entry.menu, entry.anchor);
                    None
                }
            }
        })
        .collect();

    let coordinator = MenuCoordinator::new(backdrop, pairs);
    if coordinator.is_none() {
        log::info!("shell: no complete menu pairs; popover menus disabled");
    }
    coordinator
}

fn render_avatar<H: Host>(host: &H, ids: &ElementIds) {
    let (Some(avatar), Some(source)) = (host.element_by_id(&ids.avatar), host.element_by_id(&ids.avatar_source)) else {
        return;
    };
    let label = host.attribute(&source, ATTR_USER).unwrap_or_default();
    host.set_text(&avatar, &avatar::initials(&label));
}

use super::*;
use crate::consts::{ARIA_CHECKED, ARIA_EXPANDED, ATTR_SIDEBAR, ATTR_THEME_EFFECTIVE};
use crate::fake::{FakeHost, FakePage, MemoryStorage, MemoryStore, NodeId};
use crate::geometry::Size;

type TestShell = Shell<FakeHost, MemoryStore>;

const THEME: usize = 0;
const ACCOUNT: usize = 1;

fn boot(page: &FakePage, store: &MemoryStore) -> TestShell {
    Shell::boot(page.host.clone(), store.clone(), ShellConfig::default())
}

fn deliver(shell: &mut TestShell, store: &MemoryStore) {
    for change in store.take_changes() {
        shell.handle(ShellEvent::StorageChanged(change));
    }
}

fn effective(page: &FakePage) -> Option<String> {
    page.host.attr(page.host.root(), ATTR_THEME_EFFECTIVE)
}

fn checked(page: &FakePage) -> Vec<Option<String>> {
    page.theme_items.iter().map(|item| page.host.attr(*item, ARIA_CHECKED)).collect()
}

fn open_count(page: &FakePage) -> usize {
    [page.theme_menu, page.account_menu]
        .iter()
        .filter(|menu| !page.host.hidden(**menu))
        .count()
}

// =============================================================
// Boot
// =============================================================

#[test]
fn absent_theme_boots_as_system_and_follows_dark_os() {
    let page = FakePage::standard();
    page.host.set_prefers_dark(true);
    let store = MemoryStorage::new().context();
    let shell = boot(&page, &store);

    assert_eq!(shell.theme_mode(), ThemeMode::System);
    assert_eq!(shell.effective_theme(), EffectiveTheme::Dark);
    assert_eq!(effective(&page).as_deref(), Some("dark"));
    assert_eq!(page.host.attr(page.host.root(), ATTR_THEME), None);
}

#[test]
fn boot_marks_current_theme_item_checked() {
    let page = FakePage::standard();
    let store = MemoryStorage::new().context();
    store.write("vana.theme", "dark").unwrap();
    let _shell = boot(&page, &store);
    assert_eq!(checked(&page), vec![Some("false".into()), Some("false".into()), Some("true".into())]);
}

#[test]
fn boot_renders_avatar_initials() {
    let page = FakePage::standard();
    let store = MemoryStorage::new().context();
    let _shell = boot(&page, &store);
    assert_eq!(page.host.text(page.avatar), "MS");
}

#[test]
fn missing_backdrop_disables_menus_only() {
    let host = FakeHost::new(Size::new(800.0, 600.0));
    let root = host.root();
    let btn = host.add(root, Some("themeBtn"));
    let menu = host.add(root, Some("themeMenu"));
    let toggle = host.add(root, Some("sidebarToggle"));
    let store = MemoryStorage::new().context();

    let mut shell = Shell::boot(host.clone(), store.clone(), ShellConfig::default());
    assert!(shell.menus().is_none());
    assert_eq!(shell.activate_anchor(THEME), MenuTransition::Ignored);
    assert_eq!(host.attr(btn, ARIA_EXPANDED), None);
    assert!(!host.hidden(menu));

    // Theme and sidebar keep working.
    assert!(host.attr(root, ATTR_THEME_EFFECTIVE).is_some());
    shell.handle(ShellEvent::SidebarToggle);
    assert_eq!(host.attr(root, ATTR_SIDEBAR).as_deref(), Some("expanded"));
    assert_eq!(host.attr(toggle, ARIA_EXPANDED).as_deref(), Some("true"));
}

#[test]
fn backdrop_without_any_pair_disables_menus() {
    let host = FakeHost::new(Size::new(800.0, 600.0));
    host.add(host.root(), Some("backdrop"));
    host.add(host.root(), Some("themeBtn"));
    let shell = Shell::boot(host, MemoryStorage::new().context(), ShellConfig::default());
    assert!(shell.menus().is_none());
}

#[test]
fn incomplete_pair_is_skipped_but_others_work() {
    let host = FakeHost::new(Size::new(800.0, 600.0));
    let root = host.root();
    host.add(root, Some("backdrop"));
    host.add(root, Some("themeBtn"));
    host.add(root, Some("accountBtn"));
    host.add(root, Some("accountMenu"));
    let shell = Shell::boot(host, MemoryStorage::new().context(), ShellConfig::default());
    let menus = shell.menus().unwrap();
    assert_eq!(menus.pairs().len(), 1);
    assert_eq!(menus.pairs()[0].role, MenuRole::Plain);
}

// =============================================================
// Bindings
// =============================================================

#[test]
fn full_page_binds_every_trigger() {
    let page = FakePage::standard();
    let shell = boot(&page, &MemoryStorage::new().context());
    let table = shell.bindings();
    let routes: Vec<Route> = table.iter().map(|b| b.route).collect();

    assert_eq!(
        routes,
        vec![
            Route::StorageChange,
            Route::ColorSchemeChange,
            Route::SidebarToggle,
            Route::AnchorClick(THEME),
            Route::MenuItemClick(THEME),
            Route::AnchorClick(ACCOUNT),
            Route::BackdropClick,
            Route::KeyDown,
            Route::OutsideClick,
            Route::Resize,
        ]
    );
    assert!(table.contains(&Binding::new(ListenerTarget::Element(page.theme_btn), EventKind::Click, Route::AnchorClick(THEME))));
    assert!(table.contains(&Binding::new(ListenerTarget::Element(page.backdrop), EventKind::Click, Route::BackdropClick)));
    assert!(table.contains(&Binding::new(ListenerTarget::Document, EventKind::KeyDown, Route::KeyDown)));
}

#[test]
fn bare_page_binds_only_preference_sync() {
    let host = FakeHost::new(Size::new(800.0, 600.0));
    let shell = Shell::boot(host, MemoryStorage::new().context(), ShellConfig::default());
    let routes: Vec<Route> = shell.bindings().iter().map(|b| b.route).collect();
    assert_eq!(routes, vec![Route::StorageChange, Route::ColorSchemeChange]);
}

// =============================================================
// Menus through events
// =============================================================

#[test]
fn clicking_second_anchor_switches_menus() {
    let page = FakePage::standard();
    let mut shell = boot(&page, &MemoryStorage::new().context());

    shell.handle(ShellEvent::AnchorClick(THEME));
    shell.handle(ShellEvent::OutsideClick { target: page.theme_btn_icon });
    shell.handle(ShellEvent::AnchorClick(ACCOUNT));
    shell.handle(ShellEvent::OutsideClick { target: page.account_btn });

    assert_eq!(page.host.attr(page.theme_btn, ARIA_EXPANDED).as_deref(), Some("false"));
    assert_eq!(page.host.attr(page.account_btn, ARIA_EXPANDED).as_deref(), Some("true"));
    assert_eq!(open_count(&page), 1);
    assert!(!page.host.hidden(page.account_menu));
}

#[test]
fn anchor_click_toggles() {
    let page = FakePage::standard();
    let mut shell = boot(&page, &MemoryStorage::new().context());
    shell.handle(ShellEvent::AnchorClick(ACCOUNT));
    assert_eq!(open_count(&page), 1);
    shell.handle(ShellEvent::AnchorClick(ACCOUNT));
    assert_eq!(open_count(&page), 0);
    assert!(shell.menus().unwrap().open_handle().is_none());
}

#[test]
fn escape_closes_and_returns_focus() {
    let page = FakePage::standard();
    let mut shell = boot(&page, &MemoryStorage::new().context());
    shell.handle(ShellEvent::AnchorClick(ACCOUNT));
    shell.handle(ShellEvent::KeyDown { key: "Escape".into() });

    assert!(page.host.hidden(page.account_menu));
    assert!(page.host.hidden(page.backdrop));
    assert_eq!(page.host.focused(), Some(page.account_btn));
}

#[test]
fn other_keys_leave_menu_open() {
    let page = FakePage::standard();
    let mut shell = boot(&page, &MemoryStorage::new().context());
    shell.handle(ShellEvent::AnchorClick(ACCOUNT));
    shell.handle(ShellEvent::KeyDown { key: "Enter".into() });
    assert!(!page.host.hidden(page.account_menu));
}

#[test]
fn backdrop_click_closes() {
    let page = FakePage::standard();
    let mut shell = boot(&page, &MemoryStorage::new().context());
    shell.handle(ShellEvent::AnchorClick(THEME));
    shell.handle(ShellEvent::BackdropClick);
    shell.handle(ShellEvent::OutsideClick { target: page.backdrop });
    assert_eq!(open_count(&page), 0);
    assert_eq!(page.host.focus_calls(), 1);
}

#[test]
fn outside_click_closes_but_inside_does_not() {
    let page = FakePage::standard();
    let mut shell = boot(&page, &MemoryStorage::new().context());
    shell.handle(ShellEvent::AnchorClick(ACCOUNT));
    shell.handle(ShellEvent::OutsideClick { target: page.account_item });
    assert_eq!(open_count(&page), 1);
    shell.handle(ShellEvent::OutsideClick { target: page.content });
    assert_eq!(open_count(&page), 0);
}

#[test]
fn resize_repositions_open_menu() {
    let page = FakePage::standard();
    let mut shell = boot(&page, &MemoryStorage::new().context());
    shell.handle(ShellEvent::AnchorClick(THEME));
    page.host.set_viewport(Size::new(1280.0, 400.0));
    shell.handle(ShellEvent::Resize);
    // 400 - 120 - 10
    assert_eq!(page.host.style(page.theme_menu, "top").as_deref(), Some("270px"));
    assert!(shell.menus().unwrap().is_open(THEME));
}

// =============================================================
// Theme selection
// =============================================================

#[test]
fn explicit_light_overrides_dark_os() {
    let page = FakePage::standard();
    page.host.set_prefers_dark(true);
    let store = MemoryStorage::new().context();
    let mut shell = boot(&page, &store);

    shell.handle(ShellEvent::AnchorClick(THEME));
    shell.handle(ShellEvent::MenuItemClick { index: THEME, target: page.theme_items[1] });

    assert_eq!(store.read("vana.theme").as_deref(), Some("light"));
    assert_eq!(effective(&page).as_deref(), Some("light"));
    assert_eq!(shell.theme_mode(), ThemeMode::Light);
    assert_eq!(checked(&page)[1].as_deref(), Some("true"));
    assert!(page.host.hidden(page.theme_menu));
    assert_eq!(page.host.focused(), Some(page.theme_btn));
}

#[test]
fn click_on_nested_item_content_selects_item() {
    let page = FakePage::standard();
    let store = MemoryStorage::new().context();
    let mut shell = boot(&page, &store);
    shell.handle(ShellEvent::AnchorClick(THEME));
    shell.handle(ShellEvent::MenuItemClick { index: THEME, target: page.theme_item_label });
    assert_eq!(shell.theme_mode(), ThemeMode::Dark);
}

#[test]
fn click_on_menu_padding_changes_nothing() {
    let page = FakePage::standard();
    page.host.set_attribute(&page.host.root(), ATTR_THEME, "dark");
    let store = MemoryStorage::new().context();
    store.write("vana.theme", "light").unwrap();
    let mut shell = boot(&page, &store);

    shell.handle(ShellEvent::AnchorClick(THEME));
    shell.handle(ShellEvent::MenuItemClick { index: THEME, target: page.theme_menu });
    assert_eq!(shell.theme_mode(), ThemeMode::Light);
    assert!(!page.host.hidden(page.theme_menu));
}

#[test]
fn opening_theme_menu_resyncs_radios() {
    let page = FakePage::standard();
    let store = MemoryStorage::new().context();
    let mut shell = boot(&page, &store);
    page.host.set_attribute(&page.theme_items[0], ARIA_CHECKED, "false");
    shell.handle(ShellEvent::AnchorClick(THEME));
    assert_eq!(checked(&page)[0].as_deref(), Some("true"));
}

#[test]
fn os_change_reapplies_only_in_system_mode() {
    let page = FakePage::standard();
    let store = MemoryStorage::new().context();
    let mut shell = boot(&page, &store);
    assert_eq!(effective(&page).as_deref(), Some("light"));

    page.host.set_prefers_dark(true);
    shell.handle(ShellEvent::ColorSchemeChanged);
    assert_eq!(effective(&page).as_deref(), Some("dark"));

    shell.select_theme(ThemeMode::Light);
    page.host.set_prefers_dark(false);
    page.host.set_prefers_dark(true);
    shell.handle(ShellEvent::ColorSchemeChanged);
    assert_eq!(effective(&page).as_deref(), Some("light"));
}

// =============================================================
// Cross-tab
// =============================================================

#[test]
fn theme_converges_across_tabs_in_one_turn() {
    let storage = MemoryStorage::new();
    let (page_a, store_a) = (FakePage::standard(), storage.context());
    let (page_b, store_b) = (FakePage::standard(), storage.context());
    let mut a = boot(&page_a, &store_a);
    let mut b = boot(&page_b, &store_b);
    deliver(&mut a, &store_a);
    deliver(&mut b, &store_b);

    a.select_theme(ThemeMode::Dark);
    assert_ne!(effective(&page_b), effective(&page_a));
    deliver(&mut b, &store_b);

    assert_eq!(effective(&page_b), effective(&page_a));
    assert_eq!(b.theme_mode(), ThemeMode::Dark);
    assert_eq!(checked(&page_b)[2].as_deref(), Some("true"));
    assert!(store_a.take_changes().is_empty());
}

#[test]
fn sidebar_expanded_in_one_tab_loads_expanded_in_fresh_tab() {
    let storage = MemoryStorage::new();
    let (page_a, store_a) = (FakePage::standard(), storage.context());
    let mut a = boot(&page_a, &store_a);
    a.handle(ShellEvent::SidebarToggle);

    let page_b = FakePage::standard();
    let b = boot(&page_b, &storage.context());
    assert_eq!(b.sidebar_state(), SidebarState::Expanded);
    assert_eq!(page_b.host.attr(page_b.host.root(), ATTR_SIDEBAR).as_deref(), Some("expanded"));
}

#[test]
fn sidebar_change_in_peer_is_applied() {
    let storage = MemoryStorage::new();
    let (page_a, store_a) = (FakePage::standard(), storage.context());
    let (page_b, store_b) = (FakePage::standard(), storage.context());
    let mut a = boot(&page_a, &store_a);
    let mut b = boot(&page_b, &store_b);
    deliver(&mut b, &store_b);

    a.handle(ShellEvent::SidebarToggle);
    deliver(&mut b, &store_b);
    assert_eq!(b.sidebar_state(), SidebarState::Expanded);
    assert_eq!(page_b.host.attr(page_b.sidebar_toggle, ARIA_EXPANDED).as_deref(), Some("true"));
}

#[test]
fn unrelated_key_change_is_ignored() {
    let page = FakePage::standard();
    let store = MemoryStorage::new().context();
    let mut shell = boot(&page, &store);
    store.write("vana.theme", "dark").unwrap();

    shell.handle(ShellEvent::StorageChanged(StorageChange::new("other.key", Some("x".into()))));
    assert_eq!(shell.theme_mode(), ThemeMode::System);
}

#[test]
fn store_clear_resets_to_defaults() {
    let storage = MemoryStorage::new();
    let store = storage.context();
    store.write("vana.theme", "dark").unwrap();
    store.write("vana.sidebar", "expanded").unwrap();
    let page = FakePage::standard();
    let mut shell = boot(&page, &store);

    storage.clear();
    deliver(&mut shell, &store);
    assert_eq!(shell.theme_mode(), ThemeMode::System);
    assert_eq!(shell.sidebar_state(), SidebarState::Collapsed);
}

#[test]
fn failing_storage_keeps_local_state() {
    let storage = MemoryStorage::new();
    storage.set_failing(true);
    let page = FakePage::standard();
    let mut shell = boot(&page, &storage.context());
    shell.select_theme(ThemeMode::Dark);
    shell.handle(ShellEvent::SidebarToggle);
    assert_eq!(effective(&page).as_deref(), Some("dark"));
    assert_eq!(shell.sidebar_state(), SidebarState::Expanded);
}

#[test]
fn accessors_expose_parts() {
    let page = FakePage::standard();
    let store = MemoryStorage::new().context();
    let shell = boot(&page, &store);
    assert_eq!(shell.config(), &ShellConfig::default());
    assert_eq!(shell.host().root(), NodeId(0));
    assert_eq!(shell.store().read("vana.sidebar").as_deref(), Some("collapsed"));
}

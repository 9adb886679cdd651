#![allow(clippy::float_cmp)]

use super::*;
use crate::fake::{FakePage, NodeId};
use crate::geometry::Size;

const THEME: usize = 0;
const ACCOUNT: usize = 1;

fn coordinator(page: &FakePage) -> MenuCoordinator<NodeId> {
    MenuCoordinator::new(
        page.backdrop,
        vec![
            MenuPair { menu: page.theme_menu, anchor: page.theme_btn, role: MenuRole::Theme },
            MenuPair { menu: page.account_menu, anchor: page.account_btn, role: MenuRole::Plain },
        ],
    )
    .unwrap()
}

fn visible_menus(page: &FakePage) -> usize {
    [page.theme_menu, page.account_menu]
        .iter()
        .filter(|menu| !page.host.hidden(**menu))
        .count()
}

// =============================================================
// Construction
// =============================================================

#[test]
fn no_pairs_means_no_coordinator() {
    let page = FakePage::standard();
    assert!(MenuCoordinator::new(page.backdrop, Vec::new()).is_none());
}

#[test]
fn starts_closed() {
    let page = FakePage::standard();
    let menus = coordinator(&page);
    assert!(menus.open_handle().is_none());
    assert_eq!(menus.find_role(MenuRole::Theme).map(|(i, _)| i), Some(THEME));
}

// =============================================================
// open / close
// =============================================================

#[test]
fn open_shows_menu_and_backdrop_and_marks_anchor() {
    let page = FakePage::standard();
    let mut menus = coordinator(&page);

    assert_eq!(menus.open_menu(&page.host, ACCOUNT), MenuTransition::Opened(ACCOUNT));
    assert!(!page.host.hidden(page.account_menu));
    assert!(!page.host.hidden(page.backdrop));
    assert_eq!(page.host.attr(page.account_btn, ARIA_EXPANDED).as_deref(), Some("true"));
    let handle = menus.open_handle().unwrap();
    assert_eq!(handle.menu, page.account_menu);
    assert_eq!(handle.anchor, page.account_btn);
}

#[test]
fn open_positions_menu_beside_anchor() {
    let page = FakePage::standard();
    let mut menus = coordinator(&page);
    menus.open_menu(&page.host, ACCOUNT);
    // anchor (top 700, h 40) midpoint 720, menu h 160 -> 640; clamp to 800-160-10=630
    assert_eq!(page.host.style(page.account_menu, STYLE_TOP).as_deref(), Some("630px"));
    // anchor right 52 + 10
    assert_eq!(page.host.style(page.account_menu, STYLE_LEFT).as_deref(), Some("62px"));
}

#[test]
fn close_hides_everything_and_returns_focus() {
    let page = FakePage::standard();
    let mut menus = coordinator(&page);
    menus.open_menu(&page.host, THEME);
    menus.close_menus(&page.host);

    assert!(page.host.hidden(page.theme_menu));
    assert!(page.host.hidden(page.backdrop));
    assert_eq!(page.host.attr(page.theme_btn, ARIA_EXPANDED).as_deref(), Some("false"));
    assert_eq!(page.host.attr(page.account_btn, ARIA_EXPANDED).as_deref(), Some("false"));
    assert_eq!(page.host.focused(), Some(page.theme_btn));
    assert!(menus.open_handle().is_none());
}

#[test]
fn close_when_closed_is_harmless() {
    let page = FakePage::standard();
    let mut menus = coordinator(&page);
    menus.close_menus(&page.host);
    menus.close_menus(&page.host);
    assert!(page.host.hidden(page.backdrop));
    assert_eq!(page.host.focused(), None);
    assert_eq!(page.host.focus_calls(), 0);
}

#[test]
fn opening_second_menu_closes_first() {
    let page = FakePage::standard();
    let mut menus = coordinator(&page);
    menus.open_menu(&page.host, THEME);
    menus.open_menu(&page.host, ACCOUNT);

    assert!(page.host.hidden(page.theme_menu));
    assert_eq!(page.host.attr(page.theme_btn, ARIA_EXPANDED).as_deref(), Some("false"));
    assert_eq!(page.host.attr(page.account_btn, ARIA_EXPANDED).as_deref(), Some("true"));
    assert_eq!(visible_menus(&page), 1);
    assert!(!page.host.hidden(page.backdrop));
    // focus went back to the first anchor during the switch
    assert_eq!(page.host.focused(), Some(page.theme_btn));
}

#[test]
fn open_with_unknown_index_is_ignored() {
    let page = FakePage::standard();
    let mut menus = coordinator(&page);
    assert_eq!(menus.open_menu(&page.host, 9), MenuTransition::Ignored);
    assert!(menus.open_handle().is_none());
    assert!(page.host.hidden(page.backdrop));
}

// =============================================================
// toggle
// =============================================================

#[test]
fn toggle_opens_then_closes() {
    let page = FakePage::standard();
    let mut menus = coordinator(&page);
    assert_eq!(menus.toggle(&page.host, THEME), MenuTransition::Opened(THEME));
    assert_eq!(menus.toggle(&page.host, THEME), MenuTransition::Closed);
    assert!(page.host.hidden(page.theme_menu));
    assert!(menus.open_handle().is_none());
}

#[test]
fn toggle_other_anchor_switches_menus() {
    let page = FakePage::standard();
    let mut menus = coordinator(&page);
    menus.toggle(&page.host, THEME);
    assert_eq!(menus.toggle(&page.host, ACCOUNT), MenuTransition::Opened(ACCOUNT));
    assert!(menus.is_open(ACCOUNT));
    assert!(!menus.is_open(THEME));
    assert_eq!(visible_menus(&page), 1);
}

#[test]
fn toggle_sequence_never_has_two_open() {
    let page = FakePage::standard();
    let mut menus = coordinator(&page);
    for index in [THEME, THEME, ACCOUNT, THEME, ACCOUNT, ACCOUNT, THEME] {
        menus.toggle(&page.host, index);
        assert!(visible_menus(&page) <= 1);
        let expanded = [page.theme_btn, page.account_btn]
            .iter()
            .filter(|a| page.host.attr(**a, ARIA_EXPANDED).as_deref() == Some("true"))
            .count();
        assert_eq!(expanded, visible_menus(&page));
    }
}

// =============================================================
// outside click / resize
// =============================================================

#[test]
fn click_outside_closes() {
    let page = FakePage::standard();
    let mut menus = coordinator(&page);
    menus.open_menu(&page.host, ACCOUNT);
    assert!(menus.dismiss_on_outside_click(&page.host, &page.content));
    assert!(page.host.hidden(page.account_menu));
    assert_eq!(page.host.focused(), Some(page.account_btn));
}

#[test]
fn click_inside_menu_keeps_it_open() {
    let page = FakePage::standard();
    let mut menus = coordinator(&page);
    menus.open_menu(&page.host, ACCOUNT);
    assert!(!menus.dismiss_on_outside_click(&page.host, &page.account_item));
    assert!(menus.is_open(ACCOUNT));
}

#[test]
fn click_on_any_anchor_is_not_outside() {
    let page = FakePage::standard();
    let mut menus = coordinator(&page);
    menus.open_menu(&page.host, ACCOUNT);
    assert!(!menus.dismiss_on_outside_click(&page.host, &page.theme_btn_icon));
    assert!(menus.is_open(ACCOUNT));
}

#[test]
fn outside_click_when_closed_does_nothing() {
    let page = FakePage::standard();
    let mut menus = coordinator(&page);
    assert!(!menus.dismiss_on_outside_click(&page.host, &page.content));
    assert_eq!(page.host.focus_calls(), 0);
}

#[test]
fn reposition_follows_viewport_without_reopening() {
    let page = FakePage::standard();
    let mut menus = coordinator(&page);
    menus.open_menu(&page.host, THEME);
    let focus_before = page.host.focus_calls();

    page.host.set_viewport(Size::new(1280.0, 500.0));
    let placed = menus.reposition(&page.host).unwrap();
    // 500 - 120 - 10
    assert_eq!(placed.top, 370.0);
    assert_eq!(page.host.style(page.theme_menu, STYLE_TOP).as_deref(), Some("370px"));
    assert!(menus.is_open(THEME));
    assert_eq!(page.host.focus_calls(), focus_before);
}

#[test]
fn reposition_when_closed_is_none() {
    let page = FakePage::standard();
    let menus = coordinator(&page);
    assert!(menus.reposition(&page.host).is_none());
}

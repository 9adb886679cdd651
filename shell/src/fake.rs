//! In-memory host and storage.
//!
//! `FakeHost` is a tiny element tree with attributes, styles, visibility,
//! focus, and fixed bounding rects. `MemoryStorage` is one origin's shared
//! store; each [`MemoryStorage::context`] behaves like a separate tab that
//! receives [`StorageChange`]s for writes made by the other tabs.
//! Cloning either type shares the underlying state.

#[cfg(test)]
#[path = "fake_test.rs"]
mod fake_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::consts::{ATTR_THEME, ATTR_USER};
use crate::geometry::{Rect, Size};
use crate::host::Host;
use crate::prefs::{PreferenceStore, StorageChange, StoreError};

/// Index of an element in a [`FakeHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Default)]
struct FakeNode {
    id: Option<String>,
    parent: Option<NodeId>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    hidden: bool,
    rect: Rect,
}

#[derive(Debug)]
struct FakeDom {
    nodes: Vec<FakeNode>,
    focused: Option<NodeId>,
    focus_calls: usize,
    viewport: Size,
    prefers_dark: bool,
}

#[derive(Debug, Clone)]
pub struct FakeHost {
    dom: Rc<RefCell<FakeDom>>,
}

impl FakeHost {
    /// An empty document holding only the root element.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        let dom = FakeDom {
            nodes: vec![FakeNode::default()],
            focused: None,
            focus_calls: 0,
            viewport,
            prefers_dark: false,
        };
        Self { dom: Rc::new(RefCell::new(dom)) }
    }

    /// Append an element under `parent`, optionally with an `id`.
    pub fn add(&self, parent: NodeId, id: Option<&str>) -> NodeId {
        let mut dom = self.dom.borrow_mut();
        dom.nodes.push(FakeNode {
            id: id.map(str::to_owned),
            parent: Some(parent),
            ..FakeNode::default()
        });
        NodeId(dom.nodes.len() - 1)
    }

    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        self.dom.borrow_mut().nodes[node.0].rect = rect;
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.dom.borrow_mut().viewport = viewport;
    }

    pub fn set_prefers_dark(&self, dark: bool) {
        self.dom.borrow_mut().prefers_dark = dark;
    }

    #[must_use]
    pub fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.dom.borrow().nodes[node.0].attrs.get(name).cloned()
    }

    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.dom.borrow().nodes[node.0].style.get(property).cloned()
    }

    #[must_use]
    pub fn text(&self, node: NodeId) -> String {
        self.dom.borrow().nodes[node.0].text.clone()
    }

    #[must_use]
    pub fn hidden(&self, node: NodeId) -> bool {
        self.dom.borrow().nodes[node.0].hidden
    }

    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.dom.borrow().focused
    }

    /// Number of `focus` calls made so far.
    #[must_use]
    pub fn focus_calls(&self) -> usize {
        self.dom.borrow().focus_calls
    }
}

impl Host for FakeHost {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.dom
            .borrow()
            .nodes
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.attr(*node, name)
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.dom.borrow_mut().nodes[node.0]
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        self.dom.borrow_mut().nodes[node.0].attrs.remove(name);
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.dom.borrow_mut().nodes[node.0]
            .style
            .insert(property.to_owned(), value.to_owned());
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        text.clone_into(&mut self.dom.borrow_mut().nodes[node.0].text);
    }

    fn set_hidden(&self, node: &NodeId, hidden: bool) {
        self.dom.borrow_mut().nodes[node.0].hidden = hidden;
    }

    fn is_hidden(&self, node: &NodeId) -> bool {
        self.hidden(*node)
    }

    fn focus(&self, node: &NodeId) {
        let mut dom = self.dom.borrow_mut();
        dom.focused = Some(*node);
        dom.focus_calls += 1;
    }

    fn contains(&self, container: &NodeId, target: &NodeId) -> bool {
        let dom = self.dom.borrow();
        let mut cursor = Some(*target);
        while let Some(node) = cursor {
            if node == *container {
                return true;
            }
            cursor = dom.nodes[node.0].parent;
        }
        false
    }

    fn closest_with_attribute(&self, node: &NodeId, name: &str) -> Option<NodeId> {
        let dom = self.dom.borrow();
        let mut cursor = Some(*node);
        while let Some(current) = cursor {
            if dom.nodes[current.0].attrs.contains_key(name) {
                return Some(current);
            }
            cursor = dom.nodes[current.0].parent;
        }
        None
    }

    fn descendants_with_attribute(&self, node: &NodeId, name: &str) -> Vec<NodeId> {
        let len = self.dom.borrow().nodes.len();
        (0..len)
            .map(NodeId)
            .filter(|candidate| candidate != node && self.contains(node, candidate))
            .filter(|candidate| self.dom.borrow().nodes[candidate.0].attrs.contains_key(name))
            .collect()
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        let dom = self.dom.borrow();
        let entry = &dom.nodes[node.0];
        // Hidden elements measure as empty, like `display: none` in a browser.
        if entry.hidden { Rect::default() } else { entry.rect }
    }

    fn viewport(&self) -> Size {
        self.dom.borrow().viewport
    }

    fn prefers_dark(&self) -> bool {
        self.dom.borrow().prefers_dark
    }
}

/// The page the shell is written against, built in a [`FakeHost`].
#[derive(Debug, Clone)]
pub struct FakePage {
    pub host: FakeHost,
    pub backdrop: NodeId,
    pub theme_btn: NodeId,
    pub theme_btn_icon: NodeId,
    pub theme_menu: NodeId,
    /// Theme items in `system`, `light`, `dark` order.
    pub theme_items: [NodeId; 3],
    pub theme_item_label: NodeId,
    pub account_btn: NodeId,
    pub account_menu: NodeId,
    pub account_item: NodeId,
    pub avatar: NodeId,
    pub sidebar_toggle: NodeId,
    pub content: NodeId,
}

impl FakePage {
    /// Standard shell markup: backdrop, theme and account menus with their
    /// triggers, avatar, sidebar toggle, and a plain content element.
    /// Menus start hidden, as rendered by the server.
    #[must_use]
    pub fn standard() -> Self {
        let host = FakeHost::new(Size::new(1280.0, 800.0));
        let root = host.root();

        let backdrop = host.add(root, Some("backdrop"));
        host.set_hidden(&backdrop, true);

        let nav = host.add(root, None);
        let theme_btn = host.add(nav, Some("themeBtn"));
        let theme_btn_icon = host.add(theme_btn, None);
        host.set_rect(theme_btn, Rect::new(600.0, 12.0, 40.0, 40.0));
        let account_btn = host.add(nav, Some("accountBtn"));
        host.set_attribute(&account_btn, ATTR_USER, "maria.silva@example.com");
        host.set_rect(account_btn, Rect::new(700.0, 12.0, 40.0, 40.0));
        let avatar = host.add(account_btn, Some("avatar"));
        let sidebar_toggle = host.add(nav, Some("sidebarToggle"));

        let theme_menu = host.add(root, Some("themeMenu"));
        host.set_hidden(&theme_menu, true);
        host.set_rect(theme_menu, Rect::new(0.0, 0.0, 180.0, 120.0));
        let theme_items = ["system", "light", "dark"].map(|mode| {
            let item = host.add(theme_menu, None);
            host.set_attribute(&item, ATTR_THEME, mode);
            item
        });
        let theme_item_label = host.add(theme_items[2], None);

        let account_menu = host.add(root, Some("accountMenu"));
        host.set_hidden(&account_menu, true);
        host.set_rect(account_menu, Rect::new(0.0, 0.0, 220.0, 160.0));
        let account_item = host.add(account_menu, None);

        let content = host.add(root, None);

        Self {
            host,
            backdrop,
            theme_btn,
            theme_btn_icon,
            theme_menu,
            theme_items,
            theme_item_label,
            account_btn,
            account_menu,
            account_item,
            avatar,
            sidebar_toggle,
            content,
        }
    }
}

#[derive(Debug, Default)]
struct SharedStorage {
    entries: BTreeMap<String, String>,
    inboxes: Vec<Rc<RefCell<Vec<StorageChange>>>>,
    failing: bool,
}

/// One origin's storage, shared by any number of contexts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    shared: Rc<RefCell<SharedStorage>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new browsing context on this storage.
    #[must_use]
    pub fn context(&self) -> MemoryStore {
        let inbox = Rc::new(RefCell::new(Vec::new()));
        self.shared.borrow_mut().inboxes.push(Rc::clone(&inbox));
        MemoryStore { shared: Rc::clone(&self.shared), inbox }
    }

    /// Make every subsequent write fail with [`StoreError::Rejected`].
    pub fn set_failing(&self, failing: bool) {
        self.shared.borrow_mut().failing = failing;
    }

    /// Remove every entry, notifying all contexts.
    pub fn clear(&self) {
        let mut shared = self.shared.borrow_mut();
        shared.entries.clear();
        for inbox in &shared.inboxes {
            inbox.borrow_mut().push(StorageChange::cleared());
        }
    }
}

/// A single browsing context's view of a [`MemoryStorage`].
#[derive(Debug, Clone)]
pub struct MemoryStore {
    shared: Rc<RefCell<SharedStorage>>,
    inbox: Rc<RefCell<Vec<StorageChange>>>,
}

impl MemoryStore {
    /// Changes written by other contexts since the last call, oldest first.
    #[must_use]
    pub fn take_changes(&self) -> Vec<StorageChange> {
        std::mem::take(&mut *self.inbox.borrow_mut())
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.shared.borrow().entries.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut shared = self.shared.borrow_mut();
        if shared.failing {
            return Err(StoreError::Rejected { key: key.to_owned(), reason: "quota exceeded".to_owned() });
        }
        let previous = shared.entries.insert(key.to_owned(), value.to_owned());
        // Browsers only notify peers when the stored value actually changes.
        if previous.as_deref() == Some(value) {
            return Ok(());
        }
        for inbox in &shared.inboxes {
            if !Rc::ptr_eq(inbox, &self.inbox) {
                inbox.borrow_mut().push(StorageChange::new(key, Some(value.to_owned())));
            }
        }
        Ok(())
    }
}

//! `Host` implementation over the live DOM.

use shell::geometry::{Rect, Size};
use shell::host::Host;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MediaQueryList, Window};

/// Handles to the window, document, root element, and dark-mode query.
#[derive(Clone, Debug)]
pub struct WebHost {
    window: Window,
    document: Document,
    root: Element,
    color_scheme: Option<MediaQueryList>,
}

impl WebHost {
    /// `None` when the window has no document or root element.
    pub fn new(window: Window) -> Option<Self> {
        let document = window.document()?;
        let root = document.document_element()?;
        let color_scheme = match window.match_media(shell::consts::PREFERS_DARK_QUERY) {
            Ok(query) => query,
            Err(err) => {
                log::debug!("dom: matchMedia unavailable: {err:?}");
                None
            }
        };
        Some(Self { window, document, root, color_scheme })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn color_scheme(&self) -> Option<&MediaQueryList> {
        self.color_scheme.as_ref()
    }
}

fn html(node: &Element) -> Option<&HtmlElement> {
    node.dyn_ref::<HtmlElement>()
}

fn extent(value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> f64 {
    value.map_or(0.0, |v| v.as_f64().unwrap_or(0.0))
}

impl Host for WebHost {
    type Node = Element;

    fn root(&self) -> Element {
        self.root.clone()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            log::debug!("dom: set {name} failed: {err:?}");
        }
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        if let Err(err) = node.remove_attribute(name) {
            log::debug!("dom: remove {name} failed: {err:?}");
        }
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(el) = html(node) else {
            return;
        };
        if let Err(err) = el.style().set_property(property, value) {
            log::debug!("dom: style {property} failed: {err:?}");
        }
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_hidden(&self, node: &Element, hidden: bool) {
        if let Some(el) = html(node) {
            el.set_hidden(hidden);
        }
    }

    fn is_hidden(&self, node: &Element) -> bool {
        html(node).map_or(false, HtmlElement::hidden)
    }

    fn focus(&self, node: &Element) {
        let Some(el) = html(node) else {
            return;
        };
        if let Err(err) = el.focus() {
            log::debug!("dom: focus failed: {err:?}");
        }
    }

    fn contains(&self, container: &Element, target: &Element) -> bool {
        let target: &web_sys::Node = target;
        container.contains(Some(target))
    }

    fn closest_with_attribute(&self, node: &Element, name: &str) -> Option<Element> {
        match node.closest(&format!("[{name}]")) {
            Ok(found) => found,
            Err(err) => {
                log::debug!("dom: closest [{name}] failed: {err:?}");
                None
            }
        }
    }

    fn descendants_with_attribute(&self, node: &Element, name: &str) -> Vec<Element> {
        let list = match node.query_selector_all(&format!("[{name}]")) {
            Ok(list) => list,
            Err(err) => {
                log::debug!("dom: query [{name}] failed: {err:?}");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<Element>().ok())
            .collect()
    }

    fn bounding_rect(&self, node: &Element) -> Rect {
        let r = node.get_bounding_client_rect();
        Rect::new(r.top(), r.left(), r.width(), r.height())
    }

    fn viewport(&self) -> Size {
        Size::new(extent(self.window.inner_width()), extent(self.window.inner_height()))
    }

    fn prefers_dark(&self) -> bool {
        self.color_scheme.as_ref().map_or(false, MediaQueryList::matches)
    }
}

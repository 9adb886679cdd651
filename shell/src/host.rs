//! DOM capabilities the shell consumes.
//!
//! The trait is deliberately narrow: element lookup, attribute and style
//! writes, visibility, focus, containment, and measurement. Browser builds
//! implement it over `web-sys`; tests use [`crate::fake::FakeHost`].
//! Writes are infallible from the caller's point of view. Implementations
//! log and swallow host-level failures so a broken attribute write never
//! aborts a transition halfway.

use crate::geometry::{Rect, Size};

pub trait Host {
    /// Handle to an element. Equality must mean "same element".
    type Node: Clone + PartialEq + std::fmt::Debug;

    /// The document element (`<html>`).
    fn root(&self) -> Self::Node;
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn set_text(&self, node: &Self::Node, text: &str);

    fn set_hidden(&self, node: &Self::Node, hidden: bool);
    fn is_hidden(&self, node: &Self::Node) -> bool;
    fn focus(&self, node: &Self::Node);

    /// Whether `target` is `container` or one of its descendants.
    fn contains(&self, container: &Self::Node, target: &Self::Node) -> bool;
    /// Nearest inclusive ancestor of `node` carrying attribute `name`.
    fn closest_with_attribute(&self, node: &Self::Node, name: &str) -> Option<Self::Node>;
    /// Descendants of `node` carrying attribute `name`, in document order.
    fn descendants_with_attribute(&self, node: &Self::Node, name: &str) -> Vec<Self::Node>;

    /// Post-layout bounding box in viewport coordinates.
    fn bounding_rect(&self, node: &Self::Node) -> Rect;
    /// Inner size of the window.
    fn viewport(&self) -> Size;
    /// Current value of the OS dark color-scheme signal.
    fn prefers_dark(&self) -> bool;
}

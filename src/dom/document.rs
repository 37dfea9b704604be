//! The document handle consumed by the navigation components.

use serde::Serialize;

/// Opaque handle to an element of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

/// `scrollIntoView` の `behavior`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// `scrollIntoView` の `block`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollBlock {
    #[default]
    Start,
    Center,
    End,
    Nearest,
}

/// Options passed to [`Document::scroll_into_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScrollOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

impl ScrollOptions {
    /// Smooth scroll aligning the element to the top of the viewport.
    pub const SMOOTH_TO_TOP: Self = Self { behavior: ScrollBehavior::Smooth, block: ScrollBlock::Start };
}

/// A rendered document.
///
/// Implementations wrap whatever actually owns the DOM (a browser binding or
/// [`MemoryDocument`](super::MemoryDocument) in tests). All queries return
/// elements in document order.
pub trait Document {
    /// Like `getElementById`: the first element whose `id` equals `id`.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Heading elements (`h1`..`h6`) whose level is in `levels`.
    fn headings(&self, levels: &[u8]) -> Vec<NodeId>;

    /// Elements carrying the attribute `name`, whatever its value.
    fn elements_with_attribute(&self, name: &str) -> Vec<NodeId>;

    /// Concatenated text of the element and its descendants.
    fn text_content(&self, node: NodeId) -> String;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Like `Element.closest('.class')`: the element itself or its nearest
    /// ancestor carrying `class`.
    fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId>;

    fn scroll_into_view(&mut self, node: NodeId, options: ScrollOptions);

    /// The element's `id`, treating an empty attribute as absent.
    fn id(&self, node: NodeId) -> Option<String> {
        self.attribute(node, "id").filter(|id| !id.is_empty())
    }

    fn set_id(&mut self, node: NodeId, id: &str) {
        self.set_attribute(node, "id", id);
    }
}

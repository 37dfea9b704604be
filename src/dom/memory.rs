//! In-memory document tree.

use std::collections::BTreeMap;

use super::document::{
    Document,
    NodeId,
    ScrollOptions,
};
use super::events::DomEvent;

/// Tag used for text nodes.
const TEXT_TAG: &str = "#text";

/// A single node of the arena.
#[derive(Debug, Clone)]
struct Node {
    /// Lower-case tag name, or [`TEXT_TAG`]
    tag: String,
    /// Element attributes
    attributes: BTreeMap<String, String>,
    /// Text of a text node (empty for elements)
    text: String,
    /// Parent node (`None` only for the root)
    parent: Option<NodeId>,
    /// Children in document order
    children: Vec<NodeId>,
}

impl Node {
    /// 空の要素ノードを作成
    fn element(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            text: String::new(),
            parent,
            children: Vec::new(),
        }
    }

    /// `class` 属性に `class` が含まれるか
    fn has_class(&self, class: &str) -> bool {
        self.attributes
            .get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

/// Arena-backed [`Document`] used by tests and the CLI.
///
/// Besides the DOM queries it records every `scroll_into_view` call so that
/// callers can observe where the viewport went.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    /// Node arena; index 0 is the `body` root
    nodes: Vec<Node>,
    /// Scroll requests in the order they were made
    scrolls: Vec<(NodeId, ScrollOptions)>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Creates a document containing only an empty `body`.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![Node::element("body", None)], scrolls: Vec::new() }
    }

    /// The `body` element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends an element with the given attributes under `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let mut node = Node::element(tag, Some(parent));
        for (name, value) in attributes {
            node.attributes.insert((*name).to_string(), (*value).to_string());
        }
        self.push(parent, node)
    }

    /// Appends a text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let mut node = Node::element(TEXT_TAG, Some(parent));
        node.text = text.to_string();
        self.push(parent, node)
    }

    /// Appends `<hN>` with a text child and an optional `id`.
    pub fn append_heading(&mut self, parent: NodeId, level: u8, text: &str, id: Option<&str>) -> NodeId {
        let tag = format!("h{level}");
        let heading = match id {
            Some(id) => self.append_element(parent, &tag, &[("id", id)]),
            None => self.append_element(parent, &tag, &[]),
        };
        self.append_text(heading, text);
        heading
    }

    /// Scroll requests made so far.
    #[must_use]
    pub fn scrolls(&self) -> &[(NodeId, ScrollOptions)] {
        &self.scrolls
    }

    /// The element most recently scrolled into view.
    #[must_use]
    pub fn last_scrolled(&self) -> Option<NodeId> {
        self.scrolls.last().map(|(node, _)| *node)
    }

    /// A click on `target`, with the propagation path from the target up to
    /// the root (what `event.composedPath()` reports in a browser).
    #[must_use]
    pub fn click_event(&self, target: NodeId) -> DomEvent {
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            path.push(node);
            current = self.node(node).and_then(|n| n.parent);
        }
        DomEvent::Click { path }
    }

    /// ノードを取得
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// ノードを可変で取得
    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Adds `node` to the arena and links it under `parent`.
    fn push(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        if let Some(parent) = self.node_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    /// Pre-order walk of the whole tree, i.e. document order.
    fn document_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.node(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    /// Elements matching `predicate`, in document order.
    fn select(&self, predicate: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|id| self.node(*id).is_some_and(|n| n.tag != TEXT_TAG && predicate(n)))
            .collect()
    }

    /// Appends the text of `id` and its descendants to `out`.
    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        out.push_str(&node.text);
        for child in &node.children {
            self.collect_text(*child, out);
        }
    }
}

impl Document for MemoryDocument {
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.select(|n| n.attributes.get("id").is_some_and(|v| v == id)).into_iter().next()
    }

    fn headings(&self, levels: &[u8]) -> Vec<NodeId> {
        let tags: Vec<String> = levels.iter().map(|level| format!("h{level}")).collect();
        self.select(|n| tags.contains(&n.tag))
    }

    fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        self.select(|n| n.attributes.contains_key(name))
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        self.collect_text(node, &mut text);
        text
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.node(node).and_then(|n| n.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            let n = self.node(id)?;
            if n.has_class(class) {
                return Some(id);
            }
            current = n.parent;
        }
        None
    }

    fn scroll_into_view(&mut self, node: NodeId, options: ScrollOptions) {
        if self.node(node).is_some() {
            self.scrolls.push((node, options));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn headings_are_returned_in_document_order() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let section = doc.append_element(root, "section", &[]);
        let first = doc.append_heading(section, 2, "First", None);
        let _h1 = doc.append_heading(root, 1, "Title", None);
        let second = doc.append_heading(root, 3, "Second", None);

        assert_eq!(doc.headings(&[2, 3]), vec![first, second]);
    }

    #[rstest]
    fn element_by_id_returns_first_match() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let first = doc.append_element(root, "div", &[("id", "dup")]);
        let _second = doc.append_element(root, "div", &[("id", "dup")]);

        assert_eq!(doc.element_by_id("dup"), Some(first));
        assert_eq!(doc.element_by_id(""), None);
        assert_eq!(doc.element_by_id("missing"), None);
    }

    #[rstest]
    fn text_content_concatenates_descendants() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let heading = doc.append_element(root, "h2", &[]);
        doc.append_text(heading, "Shader ");
        let code = doc.append_element(heading, "code", &[]);
        doc.append_text(code, "Design");

        assert_that!(doc.text_content(heading), eq("Shader Design"));
    }

    #[rstest]
    fn closest_with_class_includes_self_and_ancestors() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let wrapper = doc.append_element(root, "a", &[("class", "icon heading-anchor")]);
        let span = doc.append_element(wrapper, "span", &[]);

        assert_eq!(doc.closest_with_class(span, "heading-anchor"), Some(wrapper));
        assert_eq!(doc.closest_with_class(wrapper, "heading-anchor"), Some(wrapper));
        assert_eq!(doc.closest_with_class(span, "heading"), None);
    }

    #[rstest]
    fn click_event_path_runs_from_target_to_root() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let menu = doc.append_element(root, "div", &[]);
        let link = doc.append_element(menu, "a", &[]);

        let DomEvent::Click { path } = doc.click_event(link) else {
            panic!("expected a click event");
        };
        assert_eq!(path, vec![link, menu, root]);
    }

    #[rstest]
    fn empty_id_attribute_counts_as_absent() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let heading = doc.append_element(root, "h2", &[("id", "")]);

        assert_that!(doc.id(heading), none());
        doc.set_id(heading, "intro");
        assert_that!(doc.id(heading), some(eq("intro")));
    }
}

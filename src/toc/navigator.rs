//! TOC expansion state and rendering.

use serde::Serialize;

use super::tree::TocNode;
use crate::i18n::Translator;

/// Translation key of the TOC heading.
const TITLE_KEY: &str = "toc.title";

/// Rendered TOC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocView {
    /// Localized heading ("Documentation", "ドキュメント", ...)
    pub heading: String,
    pub entries: Vec<TocEntryView>,
}

/// A rendered top-level node.
///
/// Flat and grouped nodes share this shape; only grouped ones are
/// `expandable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TocEntryView {
    pub title: String,
    /// Link of a flat node
    pub href: Option<String>,
    /// The flat node's link is the current page.
    pub active: bool,
    pub expandable: bool,
    pub expanded: bool,
    pub items: Vec<TocItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItemView {
    pub title: String,
    pub href: String,
    /// The link is the current page.
    pub active: bool,
}

/// Per-locale TOC with independent per-category expansion.
///
/// A category starts expanded iff one of its items is the current page.
/// Toggling one category never affects another.
#[derive(Debug, Clone)]
pub struct TocNavigator {
    /// Nodes of the active locale
    nodes: Vec<TocNode>,
    /// Current document path, compared verbatim with hrefs
    current_path: String,
    /// Expansion state per node index
    expanded: Vec<bool>,
}

impl TocNavigator {
    #[must_use]
    pub fn new(nodes: Vec<TocNode>, current_path: impl Into<String>) -> Self {
        let current_path = current_path.into();
        let expanded = initial_expansion(&nodes, &current_path);
        Self { nodes, current_path, expanded }
    }

    #[must_use]
    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.get(index).copied().unwrap_or(false)
    }

    /// Flips the category at `index` and returns its new state.
    ///
    /// Flat nodes and out-of-range indices are left alone (`false`).
    pub fn toggle(&mut self, index: usize) -> bool {
        if !matches!(self.nodes.get(index), Some(TocNode::Grouped { .. })) {
            return false;
        }
        let Some(state) = self.expanded.get_mut(index) else {
            return false;
        };
        *state = !*state;
        tracing::trace!(index, expanded = *state, "toc category toggled");
        *state
    }

    /// Keyboard activation of the category header at `index`.
    ///
    /// `Enter` and `Space` toggle, like a click; other keys are ignored.
    /// Returns whether the key was handled.
    pub fn handle_key(&mut self, index: usize, key: &str) -> bool {
        if !matches!(key, "Enter" | " " | "Spacebar") {
            return false;
        }
        self.toggle(index);
        true
    }

    /// Replaces the tree (e.g. after a locale change) and recomputes the
    /// initial expansion.
    pub fn set_tree(&mut self, nodes: Vec<TocNode>) {
        self.expanded = initial_expansion(&nodes, &self.current_path);
        self.nodes = nodes;
    }

    /// Updates the path used for highlighting. Expansion is left as is.
    pub fn set_current_path(&mut self, path: impl Into<String>) {
        self.current_path = path.into();
    }

    #[must_use]
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    #[must_use]
    pub fn nodes(&self) -> &[TocNode] {
        &self.nodes
    }

    /// Renders every node through the same view shape.
    #[must_use]
    pub fn render(&self, translator: &Translator<'_>) -> TocView {
        let entries = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| match node {
                TocNode::Flat { title, href } => TocEntryView {
                    title: title.clone(),
                    href: Some(href.clone()),
                    active: *href == self.current_path,
                    expandable: false,
                    expanded: false,
                    items: Vec::new(),
                },
                TocNode::Grouped { title, items } => TocEntryView {
                    title: title.clone(),
                    href: None,
                    active: false,
                    expandable: true,
                    expanded: self.is_expanded(index),
                    items: items
                        .iter()
                        .map(|item| TocItemView {
                            title: item.title.clone(),
                            href: item.href.clone(),
                            active: item.href == self.current_path,
                        })
                        .collect(),
                },
            })
            .collect();

        TocView { heading: translator.t(TITLE_KEY).to_string(), entries }
    }
}

/// 現在のパスを含むカテゴリだけを展開
fn initial_expansion(nodes: &[TocNode], current_path: &str) -> Vec<bool> {
    nodes
        .iter()
        .map(|node| matches!(node, TocNode::Grouped { .. }) && node.links_to(current_path))
        .collect()
}

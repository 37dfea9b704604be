//! TOC data: per-section, per-locale node lists.

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::i18n::Locale;

#[derive(Error, Debug)]
pub enum TocError {
    #[error("Failed to parse table of contents: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// A leaf link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TocItem {
    pub title: String,
    pub href: String,
}

/// One top-level TOC entry.
///
/// Sections written before categories existed use the flat shape
/// (`{title, href}`); newer ones group links (`{title, items}`). Both shapes
/// deserialize into this type and may be mixed in one list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TocNode {
    Grouped { title: String, items: Vec<TocItem> },
    Flat { title: String, href: String },
}

impl TocNode {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Grouped { title, .. } | Self::Flat { title, .. } => title,
        }
    }

    /// Whether this node or one of its items links to `path`.
    #[must_use]
    pub fn links_to(&self, path: &str) -> bool {
        match self {
            Self::Grouped { items, .. } => items.iter().any(|item| item.href == path),
            Self::Flat { href, .. } => href == path,
        }
    }
}

/// One section's TOC (e.g. `docs`), keyed by locale code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TocTree(BTreeMap<String, Vec<TocNode>>);

impl TocTree {
    /// Nodes for `locale`; empty when the locale has no tree.
    #[must_use]
    pub fn for_locale(&self, locale: &Locale) -> &[TocNode] {
        self.0.get(locale.as_str()).map(Vec::as_slice).unwrap_or_default()
    }

    /// Locale codes that have a tree.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Every section's TOC, keyed by section name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TocCatalog(BTreeMap<String, TocTree>);

impl TocCatalog {
    /// Parses `{ "<section>": { "<locale>": [node, ...] } }`.
    ///
    /// # Errors
    /// Invalid JSON or a node that is neither shape.
    pub fn from_json(json: &str) -> Result<Self, TocError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&TocTree> {
        self.0.get(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The section whose tree for `locale` links to `path`, if any.
    #[must_use]
    pub fn section_for_path(&self, locale: &Locale, path: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, tree)| tree.for_locale(locale).iter().any(|node| node.links_to(path)))
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::test_utils::locale;

    const MIXED: &str = r#"{
        "docs": {
            "en": [
                {"title": "Overview", "href": "/en/docs/"},
                {"title": "Basics", "items": [
                    {"title": "Installation", "href": "/en/docs/installation"}
                ]}
            ],
            "tr": []
        },
        "tutorials": {
            "en": [
                {"title": "Basic Tutorials", "items": [
                    {"title": "Displaying Geometries", "href": "/en/tutorials/basic/display_geometries"}
                ]}
            ]
        }
    }"#;

    #[rstest]
    fn parses_both_shapes() {
        let catalog = TocCatalog::from_json(MIXED).unwrap();
        let nodes = catalog.section("docs").unwrap().for_locale(&locale("en"));

        assert_eq!(
            nodes,
            &[
                TocNode::Flat { title: "Overview".to_string(), href: "/en/docs/".to_string() },
                TocNode::Grouped {
                    title: "Basics".to_string(),
                    items: vec![TocItem {
                        title: "Installation".to_string(),
                        href: "/en/docs/installation".to_string(),
                    }],
                },
            ]
        );
    }

    #[rstest]
    fn missing_or_empty_locale_yields_no_nodes() {
        let catalog = TocCatalog::from_json(MIXED).unwrap();
        let docs = catalog.section("docs").unwrap();

        assert!(docs.for_locale(&locale("tr")).is_empty());
        assert!(docs.for_locale(&locale("ja")).is_empty());
    }

    #[rstest]
    fn rejects_node_without_href_or_items() {
        let result = TocCatalog::from_json(r#"{"docs": {"en": [{"title": "Orphan"}]}}"#);

        assert_that!(result, err(displays_as(contains_substring("Failed to parse"))));
    }

    #[rstest]
    #[case::flat("/en/docs/", Some("docs"))]
    #[case::grouped("/en/tutorials/basic/display_geometries", Some("tutorials"))]
    #[case::unknown("/en/blog/", None)]
    fn section_for_path_cases(#[case] path: &str, #[case] expected: Option<&str>) {
        let catalog = TocCatalog::from_json(MIXED).unwrap();

        assert_eq!(catalog.section_for_path(&locale("en"), path), expected);
    }

    #[rstest]
    fn node_links_to_checks_items() {
        let node = TocNode::Grouped {
            title: "Advanced".to_string(),
            items: vec![TocItem { title: "glTF".to_string(), href: "/ja/tutorials/advanced/display_gltf".to_string() }],
        };

        assert_that!(node.links_to("/ja/tutorials/advanced/display_gltf"), eq(true));
        assert_that!(node.links_to("/ja/tutorials/advanced/"), eq(false));
        assert_that!(node.title(), eq("Advanced"));
    }
}

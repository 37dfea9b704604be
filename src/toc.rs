//! Table of contents.

mod navigator;
mod tree;

pub use navigator::{
    TocEntryView,
    TocItemView,
    TocNavigator,
    TocView,
};
pub use tree::{
    TocCatalog,
    TocError,
    TocItem,
    TocNode,
    TocTree,
};

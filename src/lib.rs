//! docs-nav
//!
//! 多言語ドキュメントサイトのクライアントサイドナビゲーション
//! （ロケール解決・アンカー解決・TOC・言語切り替え）

pub mod anchor;
pub mod config;
pub mod dom;
pub mod i18n;
pub mod localizer;
pub mod navigation;
pub mod page;
pub mod site;
pub mod slug;
pub mod switcher;
pub mod toc;

#[cfg(test)]
mod test_utils;

pub use page::{
    NavigationSnapshot,
    Page,
    PageOptions,
};
pub use site::Site;

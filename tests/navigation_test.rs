//! ページ全体のナビゲーションに関する結合テスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]

use docs_nav::anchor::{
    MatchStrategy,
    content_ready,
};
use docs_nav::config::{
    ConfigManager,
    NavSettings,
};
use docs_nav::dom::{
    Document,
    DomEvent,
    EventHub,
    EventKind,
    MemoryDocument,
    NodeId,
    ScrollBehavior,
    ScrollBlock,
};
use docs_nav::site::parse_location;
use docs_nav::switcher::MenuRegions;
use docs_nav::{
    Page,
    PageOptions,
    Site,
};
use pretty_assertions::assert_eq;

/// ドキュメントページの DOM
struct DocsPage {
    doc: MemoryDocument,
    menu: MenuRegions,
    /// "Shader Design"（ID なし）
    shader_design: NodeId,
    /// "Shader Design" 見出しのアンカーリンク
    anchor_link: NodeId,
    /// 本文の段落
    paragraph: NodeId,
}

fn docs_page() -> DocsPage {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let header = doc.append_element(root, "header", &[]);
    let trigger = doc.append_element(header, "button", &[]);
    let menu = doc.append_element(header, "ul", &[]);

    let main = doc.append_element(root, "main", &[]);
    doc.append_heading(main, 1, "RhodoniteTSについて", None);
    doc.append_heading(main, 2, "Installation", Some("installation"));
    let shader_design = doc.append_heading(main, 2, "Shader Design", None);
    let anchor_link = doc.append_element(shader_design, "a", &[("class", "heading-anchor"), ("href", "#shader-design")]);
    doc.append_element(anchor_link, "span", &[("data-i18n-key", "anchor.title")]);
    let paragraph = doc.append_element(main, "p", &[]);
    doc.append_text(paragraph, "Shaders are composed from nodes.");

    DocsPage { doc, menu: MenuRegions { trigger, menu }, shader_design, anchor_link, paragraph }
}

fn site() -> Site {
    Site::from_settings(NavSettings::default(), None).unwrap()
}

#[tokio::test]
async fn fragment_without_id_resolves_to_slugged_heading() {
    let site = site();
    let DocsPage { mut doc, menu, shader_design, anchor_link, .. } = docs_page();
    let hub = EventHub::new();
    let url = parse_location("/ja/docs/#shader-design").unwrap();

    let page = Page::mount(&site, url, &mut doc, &hub, PageOptions::new(menu));
    let (signal, ready) = content_ready();
    signal.notify();
    let found = page.resolve_anchor(&mut doc, ready).await.unwrap();

    assert_eq!(found.node, shader_design);
    assert_eq!(found.strategy, MatchStrategy::ExactSlug);
    assert_eq!(doc.id(shader_design).as_deref(), Some("shader-design"));
    let (scrolled, options) = *doc.scrolls().last().unwrap();
    assert_eq!(scrolled, shader_design);
    assert_eq!(options.behavior, ScrollBehavior::Smooth);
    assert_eq!(options.block, ScrollBlock::Start);

    assert_eq!(doc.attribute(anchor_link, "title").as_deref(), Some("このセクションへのリンク"));
    assert_eq!(page.localized_titles(), 1);
}

#[tokio::test]
async fn dropped_content_signal_skips_scrolling() {
    let site = site();
    let DocsPage { mut doc, menu, .. } = docs_page();
    let hub = EventHub::new();
    let url = parse_location("/ja/docs/#shader-design").unwrap();

    let page = Page::mount(&site, url, &mut doc, &hub, PageOptions::new(menu));
    let (signal, ready) = content_ready();
    drop(signal);

    assert_eq!(page.resolve_anchor(&mut doc, ready).await, None);
    assert!(doc.scrolls().is_empty());
}

#[test]
fn docs_page_navigation_state() {
    let site = site();
    let DocsPage { mut doc, menu, .. } = docs_page();
    let hub = EventHub::new();
    let url = parse_location("/ja/docs/#shader-design").unwrap();

    let page = Page::mount(&site, url, &mut doc, &hub, PageOptions::new(menu));
    let snapshot = page.snapshot();

    assert_eq!(snapshot.locale.as_str(), "ja");
    assert_eq!(snapshot.locale_label, "日本語");
    assert_eq!(snapshot.section.as_deref(), Some("docs"));
    assert_eq!(snapshot.fragment.as_deref(), Some("shader-design"));

    let toc = snapshot.toc.unwrap();
    assert_eq!(toc.heading, "ドキュメント");
    let active: Vec<&str> =
        toc.entries.iter().filter(|entry| entry.active).map(|entry| entry.title.as_str()).collect();
    assert_eq!(active, vec!["RhodoniteTSについて"]);

    let languages: Vec<(&str, &str, bool)> = snapshot
        .languages
        .iter()
        .map(|entry| (entry.code.as_str(), entry.href.as_str(), entry.current))
        .collect();
    assert_eq!(languages, vec![("ja", "/ja/docs/", true), ("en", "/en/docs/", false), ("tr", "/tr/docs/", false)]);

    let links: Vec<(&str, &str)> =
        snapshot.links.iter().map(|link| (link.label.as_str(), link.href.as_str())).collect();
    assert_eq!(
        links,
        vec![
            ("ホーム", "/ja/"),
            ("ドキュメント", "/ja/docs/"),
            ("チュートリアル", "/ja/tutorials/"),
            ("APIリファレンス", "/ja/api"),
            ("GitHub", "https://github.com/actnwit/RhodoniteTS"),
        ]
    );
}

#[test]
fn language_menu_and_mobile_menu_follow_events() {
    let site = site();
    let DocsPage { mut doc, menu, paragraph, .. } = docs_page();
    let hub = EventHub::new();
    let url = parse_location("/en/docs/installation").unwrap();

    let page = Page::mount(&site, url, &mut doc, &hub, PageOptions::new(menu).with_viewport_width(390));

    assert!(page.switcher().toggle_menu());
    hub.dispatch(&doc.click_event(menu.trigger));
    assert!(page.switcher().is_menu_open());
    hub.dispatch(&doc.click_event(paragraph));
    assert!(!page.switcher().is_menu_open());

    assert!(page.navigation().toggle_menu());
    hub.dispatch(&DomEvent::Resize { width: 1024 });
    assert!(!page.navigation().is_menu_open());
}

#[test]
fn remounting_pages_never_leaks_listeners() {
    let site = site();
    let DocsPage { mut doc, menu, .. } = docs_page();
    let hub = EventHub::new();

    for location in ["/ja/docs/", "/en/docs/installation", "/tr/tutorials/", "/fr/"] {
        let url = parse_location(location).unwrap();
        let page = Page::mount(&site, url, &mut doc, &hub, PageOptions::new(menu));
        assert_eq!(hub.listener_count(EventKind::Click), 1);
        assert_eq!(hub.listener_count(EventKind::Resize), 1);
        drop(page);
    }

    assert_eq!(hub.listener_count(EventKind::Click), 0);
    assert_eq!(hub.listener_count(EventKind::Resize), 0);
}

#[test]
fn workspace_config_changes_locales() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(".docs-nav.json"),
        r#"{
            "defaultLocale": "en",
            "locales": [{"code": "en", "label": "English"}, {"code": "ja", "label": "日本語"}],
            "layout": {"mobileBreakpoint": 1024}
        }"#,
    )
    .unwrap();
    let mut manager = ConfigManager::new();
    manager.load_settings(Some(temp_dir.path().to_path_buf())).unwrap();
    let site = Site::from_config(&manager).unwrap();
    let DocsPage { mut doc, menu, anchor_link, .. } = docs_page();
    let hub = EventHub::new();

    let url = parse_location("/tr/docs/").unwrap();
    let page = Page::mount(&site, url, &mut doc, &hub, PageOptions::new(menu).with_viewport_width(900));
    let snapshot = page.snapshot();

    assert_eq!(snapshot.locale.as_str(), "en");
    assert_eq!(snapshot.languages.len(), 2);
    assert_eq!(snapshot.languages[1].href, "/ja/tr/docs/");
    assert_eq!(doc.attribute(anchor_link, "title").as_deref(), Some("Link to this section"));
}

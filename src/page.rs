//! A mounted documentation page.
//!
//! Mounting wires every navigation component to one document and one event
//! hub; dropping the [`Page`] releases every listener it registered.

use serde::Serialize;
use url::Url;

use crate::anchor::{
    AnchorMatch,
    ContentReady,
    decode_fragment,
};
use crate::dom::{
    Document,
    EventHub,
};
use crate::i18n::{
    Locale,
    Translator,
};
use crate::localizer::localize_anchor_titles;
use crate::navigation::{
    LayoutMode,
    NavLink,
    NavigationBar,
};
use crate::site::Site;
use crate::switcher::{
    LanguageSwitcher,
    MenuRegions,
    SwitcherEntry,
};
use crate::toc::{
    TocNavigator,
    TocView,
};

/// Viewport width assumed when the caller does not know it.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

#[derive(Debug, Clone)]
pub struct PageOptions {
    /// TOC section; derived from the path when `None`.
    pub section: Option<String>,
    pub viewport_width: u32,
    /// Language menu trigger and dropdown
    pub menu: MenuRegions,
}

impl PageOptions {
    #[must_use]
    pub const fn new(menu: MenuRegions) -> Self {
        Self { section: None, viewport_width: DEFAULT_VIEWPORT_WIDTH, menu }
    }

    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    #[must_use]
    pub fn with_viewport_width(mut self, width: u32) -> Self {
        self.viewport_width = width;
        self
    }
}

/// Serializable state of a page's navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSnapshot {
    pub path: String,
    /// Decoded fragment, if any
    pub fragment: Option<String>,
    pub locale: Locale,
    pub locale_label: String,
    pub section: Option<String>,
    pub toc: Option<TocView>,
    pub languages: Vec<SwitcherEntry>,
    pub links: Vec<NavLink>,
    pub layout: LayoutMode,
}

#[derive(Debug)]
pub struct Page<'s> {
    /// サイト共通データ
    site: &'s Site,
    /// ページの URL
    url: Url,
    /// URL から解決したロケール
    locale: Locale,
    /// TOC セクション名
    section: Option<String>,
    /// TOC（セクションがない場合は `None`）
    toc: Option<TocNavigator>,
    /// 言語切り替えメニュー
    switcher: LanguageSwitcher,
    /// ナビゲーションバー
    navigation: NavigationBar,
    /// 初回マウント時に title を設定したアンカーリンク数
    localized_titles: usize,
}

impl<'s> Page<'s> {
    /// Mounts the navigation for `url` on `doc`.
    ///
    /// Anchor titles are localized once here. Fragment resolution waits for
    /// the content and is started separately with
    /// [`resolve_anchor`](Self::resolve_anchor).
    pub fn mount<D: Document + ?Sized>(
        site: &'s Site,
        url: Url,
        doc: &mut D,
        hub: &EventHub,
        options: PageOptions,
    ) -> Self {
        let settings = site.settings();
        let locale = site.locales().resolve(&url);
        let translator = site.catalog().translator(&locale);

        let localized_titles = localize_anchor_titles(doc, &translator, &settings.localization);

        let section =
            options.section.or_else(|| site.section_for(&locale, url.path()).map(str::to_string));
        let toc = section.as_deref().and_then(|section| {
            let navigator = site.toc_navigator(section, &locale, url.path());
            if navigator.is_none() {
                tracing::warn!(section, "unknown TOC section");
            }
            navigator
        });

        let switcher = LanguageSwitcher::mount(site.locales(), &url, hub, options.menu);
        let navigation = NavigationBar::mount(
            &translator,
            &settings.repository_url,
            settings.layout,
            options.viewport_width,
            hub,
        );

        tracing::debug!(path = url.path(), %locale, ?section, localized_titles, "page mounted");
        Self { site, url, locale, section, toc, switcher, navigation, localized_titles }
    }

    /// Scrolls to the URL's fragment once the content is ready.
    pub async fn resolve_anchor<D: Document + ?Sized>(
        &self,
        doc: &mut D,
        ready: ContentReady,
    ) -> Option<AnchorMatch> {
        self.site.anchor_resolver().resolve_when_ready(doc, &self.url, ready).await
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    #[must_use]
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    #[must_use]
    pub fn translator(&self) -> Translator<'_> {
        self.site.catalog().translator(&self.locale)
    }

    #[must_use]
    pub const fn toc(&self) -> Option<&TocNavigator> {
        self.toc.as_ref()
    }

    pub const fn toc_mut(&mut self) -> Option<&mut TocNavigator> {
        self.toc.as_mut()
    }

    #[must_use]
    pub fn toc_view(&self) -> Option<TocView> {
        self.toc.as_ref().map(|toc| toc.render(&self.translator()))
    }

    #[must_use]
    pub const fn switcher(&self) -> &LanguageSwitcher {
        &self.switcher
    }

    #[must_use]
    pub const fn navigation(&self) -> &NavigationBar {
        &self.navigation
    }

    #[must_use]
    pub const fn localized_titles(&self) -> usize {
        self.localized_titles
    }

    #[must_use]
    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            path: self.url.path().to_string(),
            fragment: decode_fragment(&self.url),
            locale: self.locale.clone(),
            locale_label: self.switcher.current_label().to_string(),
            section: self.section.clone(),
            toc: self.toc_view(),
            languages: self.switcher.entries().to_vec(),
            links: self.navigation.links().to_vec(),
            layout: self.navigation.layout_mode(),
        }
    }
}

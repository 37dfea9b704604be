//! Site navigation bar: localized section links and the mobile menu.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;

use crate::config::LayoutSettings;
use crate::dom::{
    DomEvent,
    EventHub,
    EventKind,
    ListenerGuard,
};
use crate::i18n::Translator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutMode {
    Mobile,
    Desktop,
}

/// Layout for a viewport `width` CSS pixels wide.
#[must_use]
pub const fn layout_for_width(width: u32, layout: LayoutSettings) -> LayoutMode {
    if width < layout.mobile_breakpoint { LayoutMode::Mobile } else { LayoutMode::Desktop }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    /// Opens outside the site (new tab).
    pub external: bool,
}

/// Links of the navigation bar for the translator's locale.
#[must_use]
pub fn nav_links(translator: &Translator<'_>, repository_url: &str) -> Vec<NavLink> {
    let locale = translator.locale();
    let internal = |key: &str, href: String| NavLink { label: translator.t(key).to_string(), href, external: false };

    vec![
        internal("nav.home", format!("/{locale}/")),
        internal("nav.docs", format!("/{locale}/docs/")),
        internal("nav.tutorials", format!("/{locale}/tutorials/")),
        internal("nav.api", format!("/{locale}/api")),
        NavLink { label: translator.t("nav.github").to_string(), href: repository_url.to_string(), external: true },
    ]
}

/// Shared between the bar and its resize listener.
#[derive(Debug)]
struct BarState {
    /// 現在のレイアウト
    mode: Cell<LayoutMode>,
    /// モバイルメニューの開閉状態
    menu_open: Cell<bool>,
}

/// A mounted navigation bar.
///
/// Tracks the layout mode through one resize listener, released when the
/// bar is dropped. Entering the desktop layout closes the mobile menu.
#[derive(Debug)]
pub struct NavigationBar {
    /// Section links followed by the repository link
    links: Vec<NavLink>,
    /// Label of the mobile menu button
    toggle_label: String,
    /// Shared with the resize listener
    state: Rc<BarState>,
    /// Resize listener registration
    _resize: ListenerGuard,
}

impl NavigationBar {
    pub fn mount(
        translator: &Translator<'_>,
        repository_url: &str,
        layout: LayoutSettings,
        viewport_width: u32,
        hub: &EventHub,
    ) -> Self {
        let state =
            Rc::new(BarState { mode: Cell::new(layout_for_width(viewport_width, layout)), menu_open: Cell::new(false) });

        let shared = Rc::clone(&state);
        let resize = hub.listen(EventKind::Resize, move |event| {
            let DomEvent::Resize { width } = event else {
                return;
            };
            let mode = layout_for_width(*width, layout);
            if mode != shared.mode.replace(mode) {
                tracing::debug!(width, ?mode, "layout mode changed");
            }
            if mode == LayoutMode::Desktop {
                shared.menu_open.set(false);
            }
        });

        Self {
            links: nav_links(translator, repository_url),
            toggle_label: translator.t("nav.toggleMenu").to_string(),
            state,
            _resize: resize,
        }
    }

    #[must_use]
    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    #[must_use]
    pub fn toggle_label(&self) -> &str {
        &self.toggle_label
    }

    #[must_use]
    pub fn layout_mode(&self) -> LayoutMode {
        self.state.mode.get()
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.state.menu_open.get()
    }

    /// Flips the mobile menu and returns its new state.
    pub fn toggle_menu(&self) -> bool {
        let open = !self.state.menu_open.get();
        self.state.menu_open.set(open);
        open
    }

    /// Following a link closes the mobile menu.
    pub fn close_menu(&self) {
        self.state.menu_open.set(false);
    }
}

//! Language switcher.
//!
//! Builds the same page's URL in another locale and tracks the dropdown
//! menu. The trigger's own click handler calls
//! [`LanguageSwitcher::toggle_menu`]; the document-level listener only
//! closes the menu on clicks outside the trigger and the menu, and lives
//! exactly as long as the mounted switcher.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;
use url::Url;

use crate::dom::{
    DomEvent,
    EventHub,
    EventKind,
    ListenerGuard,
    NodeId,
};
use crate::i18n::{
    Locale,
    LocaleSet,
};

/// URL of `current_path` in `locale`: `/<locale>/<rest>`.
///
/// `rest` is `current_path` without its leading locale segment, so
/// switching to the active locale yields the canonical form of the current
/// page.
#[must_use]
pub fn target_url(locales: &LocaleSet, locale: &Locale, current_path: &str) -> String {
    format!("/{locale}/{}", locales.strip_locale(current_path))
}

/// One row of the language menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitcherEntry {
    pub code: String,
    pub label: String,
    pub href: String,
    /// The page is currently shown in this locale.
    pub current: bool,
}

/// Elements the outside-click test is made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuRegions {
    /// Button that opens the menu
    pub trigger: NodeId,
    /// The dropdown itself
    pub menu: NodeId,
}

/// A mounted language switcher.
///
/// Dropping it unregisters the click listener.
#[derive(Debug)]
pub struct LanguageSwitcher {
    /// Active locale
    current: Locale,
    /// One entry per supported locale, in display order
    entries: Vec<SwitcherEntry>,
    /// メニューの開閉状態（リスナーと共有）
    open: Rc<Cell<bool>>,
    /// Click listener registration
    _click: ListenerGuard,
}

impl LanguageSwitcher {
    /// Resolves the active locale from `url` and registers the click
    /// listener on `hub`.
    ///
    /// The listener ignores clicks whose path contains the trigger or the
    /// menu and closes the menu on any other click.
    pub fn mount(locales: &LocaleSet, url: &Url, hub: &EventHub, regions: MenuRegions) -> Self {
        let current = locales.resolve(url);
        let entries = locales
            .iter()
            .map(|(locale, label)| SwitcherEntry {
                code: locale.to_string(),
                label: label.to_string(),
                href: target_url(locales, locale, url.path()),
                current: *locale == current,
            })
            .collect();

        let open = Rc::new(Cell::new(false));
        let state = Rc::clone(&open);
        let click = hub.listen(EventKind::Click, move |event| {
            let DomEvent::Click { path } = event else {
                return;
            };
            if state.get() && !path.contains(&regions.trigger) && !path.contains(&regions.menu) {
                tracing::trace!("click outside language menu, closing");
                state.set(false);
            }
        });

        tracing::debug!(locale = %current, "language switcher mounted");
        Self { current, entries, open, _click: click }
    }

    #[must_use]
    pub const fn current(&self) -> &Locale {
        &self.current
    }

    /// Label shown on the trigger (e.g. `English`).
    #[must_use]
    pub fn current_label(&self) -> &str {
        self.entries
            .iter()
            .find(|entry| entry.current)
            .map_or_else(|| self.current.as_str(), |entry| entry.label.as_str())
    }

    #[must_use]
    pub fn entries(&self) -> &[SwitcherEntry] {
        &self.entries
    }

    /// Link to this page in `code`, if `code` is a supported locale.
    #[must_use]
    pub fn href_for(&self, code: &str) -> Option<&str> {
        self.entries.iter().find(|entry| entry.code == code).map(|entry| entry.href.as_str())
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.open.get()
    }

    /// Flips the menu and returns its new state. Wired to the trigger's
    /// click handler.
    pub fn toggle_menu(&self) -> bool {
        let open = !self.open.get();
        self.open.set(open);
        open
    }

    pub fn close_menu(&self) {
        self.open.set(false);
    }
}

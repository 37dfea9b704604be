//! サイト全体のナビゲーションデータ
//!
//! 設定・ロケール・翻訳テーブル・TOC をまとめて保持する。ページごとの状態は
//! [`crate::page::Page`] が持つ。

use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;
use url::Url;

use crate::anchor::AnchorResolver;
use crate::config::{
    ConfigManager,
    NavSettings,
};
use crate::i18n::{
    CatalogError,
    Locale,
    LocaleSet,
    LocaleSetError,
    TranslationCatalog,
};
use crate::toc::{
    TocCatalog,
    TocError,
    TocNavigator,
};

/// 組み込みの翻訳テーブル
const BUILTIN_TRANSLATIONS: &str = include_str!("../assets/translations.json");

/// 組み込みの TOC
const BUILTIN_TOC: &str = include_str!("../assets/toc.json");

/// Base for locations given as a bare path (`/ja/docs/`).
const LOCAL_ORIGIN: &str = "http://localhost/";

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Invalid locale settings: {0}")]
    Locales(#[from] LocaleSetError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Toc(#[from] TocError),

    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid location '{location}': {source}")]
    InvalidLocation {
        location: String,
        #[source]
        source: url::ParseError,
    },
}

/// Everything shared by every page of one site.
#[derive(Debug, Clone)]
pub struct Site {
    /// 検証済みの設定
    settings: NavSettings,
    /// 対応ロケール
    locales: LocaleSet,
    /// 翻訳テーブル
    catalog: TranslationCatalog,
    /// セクションごとの TOC
    toc: TocCatalog,
}

impl Site {
    /// Builds the site from validated settings.
    ///
    /// `translationsFile` / `tocFile` are resolved against `root` (or the
    /// working directory); unset files fall back to the built-in tables.
    ///
    /// # Errors
    /// - a referenced file cannot be read or parsed
    /// - the translation tables break the default-locale invariant
    pub fn from_settings(settings: NavSettings, root: Option<&Path>) -> Result<Self, SiteError> {
        let locales = LocaleSet::new(
            settings.locales.iter().map(|locale| (locale.code.clone(), locale.label.clone())),
            &settings.default_locale,
        )?;

        let translations = read_or_builtin(settings.translations_file.as_deref(), root, BUILTIN_TRANSLATIONS)?;
        let catalog = TranslationCatalog::from_json(locales.default_locale(), &translations)?;

        let toc = read_or_builtin(settings.toc_file.as_deref(), root, BUILTIN_TOC)?;
        let toc = TocCatalog::from_json(&toc)?;

        let site = Self { settings, locales, catalog, toc };
        site.warn_unknown_locales();
        Ok(site)
    }

    /// Builds the site from the manager's current settings.
    ///
    /// # Errors
    /// See [`Site::from_settings`].
    pub fn from_config(manager: &ConfigManager) -> Result<Self, SiteError> {
        Self::from_settings(manager.get_settings().clone(), manager.workspace_root().map(PathBuf::as_path))
    }

    #[must_use]
    pub const fn settings(&self) -> &NavSettings {
        &self.settings
    }

    #[must_use]
    pub const fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    #[must_use]
    pub const fn catalog(&self) -> &TranslationCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn toc(&self) -> &TocCatalog {
        &self.toc
    }

    #[must_use]
    pub fn anchor_resolver(&self) -> AnchorResolver {
        AnchorResolver::new(&self.settings.anchor)
    }

    /// TOC section for a page.
    ///
    /// The section whose tree links to `path`, else the first segment after
    /// the locale when a section has that name (`/en/tutorials/` →
    /// `tutorials`).
    #[must_use]
    pub fn section_for(&self, locale: &Locale, path: &str) -> Option<&str> {
        if let Some(section) = self.toc.section_for_path(locale, path) {
            return Some(section);
        }
        let segment = self.locales.strip_locale(path).split('/').next().unwrap_or_default();
        self.toc.sections().find(|section| *section == segment)
    }

    /// TOC navigator for `section` in `locale`, or `None` for an unknown
    /// section.
    #[must_use]
    pub fn toc_navigator(&self, section: &str, locale: &Locale, path: &str) -> Option<TocNavigator> {
        let tree = self.toc.section(section)?;
        Some(TocNavigator::new(tree.for_locale(locale).to_vec(), path))
    }

    /// Locales that have tables or trees but are not configured.
    fn warn_unknown_locales(&self) {
        for section in self.toc.sections() {
            let Some(tree) = self.toc.section(section) else {
                continue;
            };
            for code in tree.locales().filter(|code| self.locales.get(code).is_none()) {
                tracing::warn!(section, locale = code, "TOC defines an unsupported locale; it will never be shown");
            }
        }
        for (locale, _) in self.locales.iter() {
            if !self.catalog.has_locale(locale.as_str()) {
                tracing::warn!(%locale, "no translation table; every string falls back to the default locale");
            }
        }
    }
}

/// Parses an absolute URL or a site-relative path such as `/ja/docs/#intro`.
///
/// # Errors
/// The location is not a valid URL or path.
pub fn parse_location(location: &str) -> Result<Url, SiteError> {
    let invalid = |source: url::ParseError| SiteError::InvalidLocation { location: location.to_string(), source };
    match Url::parse(location) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(LOCAL_ORIGIN).and_then(|base| base.join(location)).map_err(invalid)
        }
        Err(e) => Err(invalid(e)),
    }
}

/// `path` (relative to `root`) の内容、未指定なら組み込みデータ
fn read_or_builtin(path: Option<&Path>, root: Option<&Path>, builtin: &str) -> Result<String, SiteError> {
    let Some(path) = path else {
        return Ok(builtin.to_string());
    };
    let path = root.map_or_else(|| path.to_path_buf(), |root| root.join(path));
    tracing::debug!("Loading site data from: {:?}", path);
    std::fs::read_to_string(&path).map_err(|source| SiteError::Read { path, source })
}

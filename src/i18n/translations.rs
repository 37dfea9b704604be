//! 翻訳テーブル
//!
//! ロケールごとの `key → 文字列` マップを保持し、フォールバック付きで引く。

use std::collections::{
    BTreeSet,
    HashMap,
};

use thiserror::Error;

use super::locale::Locale;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("No translation table for the default locale '{0}'")]
    MissingDefaultTable(String),

    #[error("Keys of locale '{locale}' are missing from the default locale: {}", keys.join(", "))]
    KeysMissingFromDefault { locale: String, keys: Vec<String> },

    #[error("Failed to parse translation tables: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Immutable translation tables for every locale.
///
/// Every key of every table is also present in the default locale's table,
/// so a lookup can always fall back to it.
#[derive(Debug, Clone)]
pub struct TranslationCatalog {
    /// デフォルトロケールのコード
    default: String,
    /// ロケールコード → (キー → 翻訳値)
    tables: HashMap<String, HashMap<String, String>>,
}

impl TranslationCatalog {
    /// # Errors
    /// - the default locale has no table
    /// - another locale defines keys the default table lacks
    pub fn new(
        default: &Locale,
        tables: HashMap<String, HashMap<String, String>>,
    ) -> Result<Self, CatalogError> {
        let Some(default_table) = tables.get(default.as_str()) else {
            return Err(CatalogError::MissingDefaultTable(default.to_string()));
        };

        // Report locales in a stable order.
        let mut locales: Vec<&String> = tables.keys().collect();
        locales.sort();
        for locale in locales {
            let Some(table) = tables.get(locale) else {
                continue;
            };
            let missing: BTreeSet<&String> =
                table.keys().filter(|key| !default_table.contains_key(*key)).collect();
            if !missing.is_empty() {
                return Err(CatalogError::KeysMissingFromDefault {
                    locale: locale.clone(),
                    keys: missing.into_iter().cloned().collect(),
                });
            }
        }

        Ok(Self { default: default.to_string(), tables })
    }

    /// Parses `{ "<locale>": { "<key>": "<value>" } }`.
    ///
    /// # Errors
    /// - invalid JSON
    /// - see [`TranslationCatalog::new`]
    pub fn from_json(default: &Locale, json: &str) -> Result<Self, CatalogError> {
        let tables: HashMap<String, HashMap<String, String>> = serde_json::from_str(json)?;
        Self::new(default, tables)
    }

    /// Looks up `key` for `locale`.
    ///
    /// Falls back to the default locale's value, then to `key` itself. Empty
    /// strings count as missing.
    #[must_use]
    pub fn translate<'a>(&'a self, locale: &Locale, key: &'a str) -> &'a str {
        if let Some(value) = self.lookup(locale.as_str(), key) {
            return value;
        }
        if let Some(value) = self.lookup(&self.default, key) {
            tracing::debug!(%locale, key, "translation missing, using default locale");
            return value;
        }
        tracing::debug!(%locale, key, "translation missing in every locale, using key");
        key
    }

    /// Binds the catalog to `locale`.
    #[must_use]
    pub fn translator<'a>(&'a self, locale: &'a Locale) -> Translator<'a> {
        Translator { catalog: self, locale }
    }

    /// Whether `locale` has a table at all.
    #[must_use]
    pub fn has_locale(&self, locale: &str) -> bool {
        self.tables.contains_key(locale)
    }

    /// テーブルから非空の値を引く
    fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        self.tables
            .get(locale)
            .and_then(|table| table.get(key))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// A catalog bound to one locale.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    catalog: &'a TranslationCatalog,
    locale: &'a Locale,
}

impl<'a> Translator<'a> {
    /// See [`TranslationCatalog::translate`].
    #[must_use]
    pub fn t<'k>(&self, key: &'k str) -> &'k str
    where
        'a: 'k,
    {
        self.catalog.translate(self.locale, key)
    }

    #[must_use]
    pub const fn locale(&self) -> &'a Locale {
        self.locale
    }
}

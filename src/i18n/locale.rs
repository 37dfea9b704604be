//! Locale derivation from URLs.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;
use url::Url;

/// A supported language code.
///
/// Only obtainable from a [`LocaleSet`], so every `Locale` in circulation is
/// a member of the configured set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleSetError {
    #[error("At least one locale is required")]
    Empty,

    #[error("Locale '{0}' is declared more than once")]
    Duplicate(String),

    #[error("Default locale '{0}' is not one of the supported locales")]
    UnknownDefault(String),
}

/// 対応ロケールの一覧（表示順）とデフォルトロケール
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    /// `(locale, label)` in display order
    entries: Vec<(Locale, String)>,
    /// Fallback for unknown or missing locale segments
    default: Locale,
}

impl LocaleSet {
    /// Builds the set from `(code, label)` pairs in display order.
    ///
    /// # Errors
    /// - no locales
    /// - a code appears twice
    /// - `default_code` is not among the codes
    pub fn new<I, C, L>(entries: I, default_code: &str) -> Result<Self, LocaleSetError>
    where
        I: IntoIterator<Item = (C, L)>,
        C: Into<String>,
        L: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut collected = Vec::new();
        for (code, label) in entries {
            let code = code.into();
            if !seen.insert(code.clone()) {
                return Err(LocaleSetError::Duplicate(code));
            }
            collected.push((Locale(code), label.into()));
        }

        if collected.is_empty() {
            return Err(LocaleSetError::Empty);
        }

        let default = collected
            .iter()
            .find(|(locale, _)| locale.as_str() == default_code)
            .map(|(locale, _)| locale.clone())
            .ok_or_else(|| LocaleSetError::UnknownDefault(default_code.to_string()))?;

        Ok(Self { entries: collected, default })
    }

    #[must_use]
    pub const fn default_locale(&self) -> &Locale {
        &self.default
    }

    /// Looks up a supported locale by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Locale> {
        self.entries.iter().map(|(locale, _)| locale).find(|locale| locale.as_str() == code)
    }

    /// Display label of `locale` (e.g. `日本語`); the code itself for a
    /// locale from another set.
    #[must_use]
    pub fn label<'a>(&'a self, locale: &'a Locale) -> &'a str {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == locale)
            .map_or_else(|| locale.as_str(), |(_, label)| label.as_str())
    }

    /// Supported locales with their labels, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&Locale, &str)> {
        self.entries.iter().map(|(locale, label)| (locale, label.as_str()))
    }

    /// Resolves the active locale from the first path segment of `url`.
    #[must_use]
    pub fn resolve(&self, url: &Url) -> Locale {
        self.resolve_path(url.path())
    }

    /// Resolves the active locale from a path such as `/ja/docs/`.
    ///
    /// Never fails: an unsupported or missing segment yields the default.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> Locale {
        let segment = first_segment(path);
        match self.get(segment) {
            Some(locale) => {
                tracing::debug!(path, segment, "using locale from path");
                locale.clone()
            }
            None => {
                tracing::debug!(
                    path,
                    segment,
                    default = %self.default,
                    "segment is not a supported locale, using default"
                );
                self.default.clone()
            }
        }
    }

    /// `path` without its leading slash and leading locale segment.
    ///
    /// A path whose first segment is not a supported locale is returned
    /// whole (minus the leading slash).
    #[must_use]
    pub fn strip_locale<'a>(&self, path: &'a str) -> &'a str {
        let relative = path.strip_prefix('/').unwrap_or(path);
        let segment = first_segment(path);
        if self.get(segment).is_none() {
            return relative;
        }
        relative.strip_prefix(segment).map_or(relative, |rest| rest.strip_prefix('/').unwrap_or(rest))
    }
}

/// First `/`-separated segment of `path`, ignoring one leading slash.
fn first_segment(path: &str) -> &str {
    let relative = path.strip_prefix('/').unwrap_or(path);
    relative.split('/').next().unwrap_or_default()
}

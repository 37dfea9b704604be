use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "locales[0].code")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleConfig {
    pub code: String,
    /// Label shown in the language menu.
    pub label: String,
}

impl LocaleConfig {
    fn new(code: &str, label: &str) -> Self {
        Self { code: code.to_string(), label: label.to_string() }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavSettings {
    /// Used when the first path segment is not a supported locale.
    pub default_locale: String,

    /// Supported locales in menu order.
    pub locales: Vec<LocaleConfig>,

    pub anchor: AnchorSettings,
    pub localization: LocalizationSettings,
    pub layout: LayoutSettings,

    /// External repository link shown in the navigation bar.
    pub repository_url: String,

    /// Translation tables (`{locale: {key: value}}`), relative to the
    /// workspace root. Built-in tables are used when unset.
    pub translations_file: Option<PathBuf>,

    /// TOC trees (`{section: {locale: [node]}}`), relative to the workspace
    /// root. Built-in trees are used when unset.
    pub toc_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnchorSettings {
    /// Heading levels searched when a fragment is not an element id.
    pub heading_levels: Vec<u8>,

    /// Upper bound on waiting for the content-ready signal before the
    /// headings are scanned anyway.
    pub content_ready_timeout_ms: u64,
}

impl Default for AnchorSettings {
    fn default() -> Self {
        Self { heading_levels: vec![2, 3], content_ready_timeout_ms: 500 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizationSettings {
    /// Attribute holding the translation key of an anchor icon.
    pub key_attribute: String,

    /// Class of the anchor-link wrapper whose `title` gets localized.
    pub wrapper_class: String,
}

impl Default for LocalizationSettings {
    fn default() -> Self {
        Self { key_attribute: "data-i18n-key".to_string(), wrapper_class: "heading-anchor".to_string() }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutSettings {
    /// Viewport widths below this (CSS px) use the mobile layout.
    pub mobile_breakpoint: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self { mobile_breakpoint: 768 }
    }
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            default_locale: "ja".to_string(),
            locales: vec![
                LocaleConfig::new("ja", "日本語"),
                LocaleConfig::new("en", "English"),
                LocaleConfig::new("tr", "Türkçe"),
            ],
            anchor: AnchorSettings::default(),
            localization: LocalizationSettings::default(),
            layout: LayoutSettings::default(),
            repository_url: "https://github.com/actnwit/RhodoniteTS".to_string(),
            translations_file: None,
            toc_file: None,
        }
    }
}

impl NavSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid or duplicated locale code
    /// - Default locale not among the locales
    /// - Heading level outside 1..=6
    /// - Invalid repository URL
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.locales.is_empty() {
            errors.push(ValidationError::new(
                "locales",
                "At least one locale is required. Example: [{\"code\": \"en\", \"label\": \"English\"}]",
            ));
        }

        for (index, locale) in self.locales.iter().enumerate() {
            if !is_valid_locale_code(&locale.code) {
                errors.push(ValidationError::new(
                    format!("locales[{index}].code"),
                    format!(
                        "Invalid locale code '{}'. Use lower-case letters, digits and '-' (e.g., \"en\", \"pt-br\")",
                        locale.code
                    ),
                ));
            }
            if self.locales.iter().take(index).any(|other| other.code == locale.code) {
                errors.push(ValidationError::new(
                    format!("locales[{index}].code"),
                    format!("Locale '{}' is declared more than once", locale.code),
                ));
            }
            if locale.label.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("locales[{index}].label"),
                    "The label cannot be empty",
                ));
            }
        }

        if !self.locales.iter().any(|locale| locale.code == self.default_locale) {
            errors.push(ValidationError::new(
                "defaultLocale",
                format!("Default locale '{}' must be one of the configured locales", self.default_locale),
            ));
        }

        if self.anchor.heading_levels.is_empty() {
            errors.push(ValidationError::new(
                "anchor.headingLevels",
                "At least one heading level is required. Example: [2, 3]",
            ));
        }

        for (index, level) in self.anchor.heading_levels.iter().enumerate() {
            if !(1..=6).contains(level) {
                errors.push(ValidationError::new(
                    format!("anchor.headingLevels[{index}]"),
                    format!("Heading level {level} is out of range (1-6)"),
                ));
            }
        }

        if self.localization.key_attribute.is_empty() {
            errors.push(ValidationError::new(
                "localization.keyAttribute",
                "The attribute name cannot be empty. Example: \"data-i18n-key\"",
            ));
        }

        if self.localization.wrapper_class.is_empty()
            || self.localization.wrapper_class.chars().any(char::is_whitespace)
        {
            errors.push(ValidationError::new(
                "localization.wrapperClass",
                "Specify a single class name without whitespace. Example: \"heading-anchor\"",
            ));
        }

        if self.layout.mobile_breakpoint == 0 {
            errors.push(ValidationError::new(
                "layout.mobileBreakpoint",
                "The breakpoint must be greater than 0",
            ));
        }

        if let Err(e) = url::Url::parse(&self.repository_url) {
            errors.push(ValidationError::new(
                "repositoryUrl",
                format!("Invalid URL '{}': {e}", self.repository_url),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Locale codes become URL path segments.
fn is_valid_locale_code(code: &str) -> bool {
    !code.is_empty()
        && !code.starts_with('-')
        && code.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

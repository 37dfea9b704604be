//! Site navigation settings (`.docs-nav.json`).
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use types::{
    AnchorSettings,
    ConfigError,
    LayoutSettings,
    LocaleConfig,
    LocalizationSettings,
    NavSettings,
    ValidationError,
};

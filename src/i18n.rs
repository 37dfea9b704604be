//! Locale resolution and translation lookup.

mod locale;
mod translations;

pub use locale::{
    Locale,
    LocaleSet,
    LocaleSetError,
};
pub use translations::{
    CatalogError,
    TranslationCatalog,
    Translator,
};

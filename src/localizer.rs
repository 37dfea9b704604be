//! Localized hover titles for heading anchor links.
//!
//! The content pipeline renders each heading's anchor icon as an element
//! carrying a translation key (`data-i18n-key="anchor.title"`) inside a
//! wrapper link (`.heading-anchor`). On mount the wrapper's `title` is set to
//! the key's translation for the active locale.

use crate::config::LocalizationSettings;
use crate::dom::Document;
use crate::i18n::Translator;

/// Sets the `title` of every anchor-link wrapper to its translated string.
///
/// Elements with an empty key or without an enclosing wrapper are skipped.
/// Returns the number of wrappers updated.
pub fn localize_anchor_titles<D: Document + ?Sized>(
    doc: &mut D,
    translator: &Translator<'_>,
    settings: &LocalizationSettings,
) -> usize {
    let mut updated = 0;

    for element in doc.elements_with_attribute(&settings.key_attribute) {
        let Some(key) = doc.attribute(element, &settings.key_attribute).filter(|key| !key.is_empty())
        else {
            continue;
        };
        let Some(wrapper) = doc.closest_with_class(element, &settings.wrapper_class) else {
            tracing::trace!(key = %key, "no anchor wrapper around translation key");
            continue;
        };

        let title = translator.t(&key);
        doc.set_attribute(wrapper, "title", title);
        updated += 1;
    }

    tracing::debug!(locale = %translator.locale(), updated, "localized anchor titles");
    updated
}

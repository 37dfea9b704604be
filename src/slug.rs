//! Heading text → anchor identifier.
//!
//! A simplified github-slugger: the same transform the site build uses to
//! assign heading ids, reproduced here so that a fragment can still be
//! matched against a heading that was rendered without one.

/// Converts heading text into an anchor slug.
///
/// Lower-cases the text, turns whitespace runs into a single hyphen and
/// drops everything except ASCII alphanumerics, hyphens and Japanese script
/// (see [`is_slug_char`]). Repeated hyphens collapse and leading/trailing
/// hyphens are trimmed.
///
/// ```
/// use docs_nav::slug::slugify;
///
/// assert_eq!(slugify("Shader Design"), "shader-design");
/// assert_eq!(slugify("  A--B  "), "a-b");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for ch in lowered.chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
        } else if is_slug_char(ch) {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch);
            pending_hyphen = false;
        }
    }

    slug
}

/// Characters kept in a slug besides the hyphen.
///
/// ASCII lower-case letters and digits, Hiragana, Katakana, CJK Unified
/// Ideographs and CJK Extension A.
#[must_use]
pub const fn is_slug_char(ch: char) -> bool {
    matches!(
        ch,
        'a'..='z'
            | '0'..='9'
            | '\u{3040}'..='\u{309F}'
            | '\u{30A0}'..='\u{30FF}'
            | '\u{4E00}'..='\u{9FAF}'
            | '\u{3400}'..='\u{4DBF}'
    )
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::two_words("Hello World", "hello-world")]
    #[case::padded_double_hyphen("  A--B  ", "a-b")]
    #[case::empty("", "")]
    #[case::whitespace_only(" \t\n ", "")]
    #[case::punctuation("Frame, Expression, RenderPass", "frame-expression-renderpass")]
    #[case::punctuation_between_spaces("a ! b", "a-b")]
    #[case::punctuation_inside_word("don't", "dont")]
    #[case::underscore("memory_model", "memorymodel")]
    #[case::leading_trailing_hyphens("--Intro--", "intro")]
    #[case::digits("Step 2: Install", "step-2-install")]
    #[case::accents_dropped("Café Menu", "caf-menu")]
    #[case::japanese("シェーダー設計", "シェーダー設計")]
    #[case::mixed_script("EntityとComponent", "entityとcomponent")]
    #[case::ideographic_space("メモリ\u{3000}モデル", "メモリ-モデル")]
    #[case::fullwidth_punctuation("初期化（基本）", "初期化基本")]
    #[case::symbols_only("!!!", "")]
    fn slugify_cases(#[case] text: &str, #[case] expected: &str) {
        assert_that!(slugify(text), eq(expected));
    }

    #[rstest]
    #[case("Hello World")]
    #[case("  A--B  ")]
    #[case("Frame, Expression, RenderPass")]
    #[case("シェーダー設計 と Memory")]
    #[case("- - -")]
    #[case("")]
    fn slugify_is_idempotent(#[case] text: &str) {
        let once = slugify(text);

        assert_that!(slugify(&once), eq(&once));
    }

    #[rstest]
    fn slugify_ignores_case() {
        let lower = slugify("getting started");

        assert_that!(slugify("GETTING Started"), eq(&lower));
    }
}

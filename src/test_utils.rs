//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use crate::i18n::{
    Locale,
    LocaleSet,
    TranslationCatalog,
};

/// テスト用の `LocaleSet`（ja / en / tr、デフォルトは ja）
pub(crate) fn locales() -> LocaleSet {
    LocaleSet::new([("ja", "日本語"), ("en", "English"), ("tr", "Türkçe")], "ja").unwrap()
}

/// テスト用のロケールを取得する
///
/// # Arguments
/// * `code` - 言語コード（例: "en", "ja"）
pub(crate) fn locale(code: &str) -> Locale {
    locales().get(code).unwrap().clone()
}

/// `(key, value)` の配列から翻訳テーブルを作成する
pub(crate) fn table(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect()
}

/// ナビゲーション系テストで使う翻訳カタログ
pub(crate) fn catalog() -> TranslationCatalog {
    TranslationCatalog::new(
        locales().default_locale(),
        HashMap::from([
            (
                "ja".to_string(),
                table(&[
                    ("anchor.title", "このセクションへのリンク"),
                    ("toc.title", "ドキュメント"),
                    ("nav.home", "ホーム"),
                    ("nav.docs", "ドキュメント"),
                    ("nav.tutorials", "チュートリアル"),
                    ("nav.api", "APIリファレンス"),
                    ("nav.github", "GitHub"),
                ]),
            ),
            (
                "en".to_string(),
                table(&[
                    ("anchor.title", "Link to this section"),
                    ("toc.title", "Documentation"),
                    ("nav.home", "Home"),
                    ("nav.docs", "Documents"),
                    ("nav.tutorials", "Tutorials"),
                    ("nav.api", "API Reference"),
                    ("nav.github", "GitHub"),
                ]),
            ),
            ("tr".to_string(), table(&[("nav.home", "Ana Sayfa")])),
        ]),
    )
    .unwrap()
}

//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    NavSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: NavSettings,

    /// ワークスペースのルートパス
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: NavSettings::default(), workspace_root: None }
    }

    /// ワークスペースから設定を読み込む
    ///
    /// 設定ファイルがなければデフォルト設定を使う。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        let settings = if let Some(root) = &workspace_root {
            loader::load_from_workspace(root)?.map_or_else(NavSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            })
        } else {
            NavSettings::default()
        };

        self.apply(settings)?;
        self.workspace_root = workspace_root;

        Ok(())
    }

    /// 明示されたファイルから設定を読み込む
    ///
    /// 相対パス（翻訳ファイルなど）はファイルのあるディレクトリを基準に解決する。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_file(&mut self, config_path: &Path) -> Result<(), ConfigError> {
        let settings = loader::load_from_file(config_path)?;

        self.apply(settings)?;
        self.workspace_root = config_path.parent().map(Path::to_path_buf);

        Ok(())
    }

    /// 設定を更新する
    ///
    /// # Errors
    /// バリデーションエラー
    pub fn update_settings(&mut self, new_settings: NavSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");
        self.apply(new_settings)
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &NavSettings {
        &self.current_settings
    }

    /// ワークスペースルートを取得
    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }

    /// バリデーションして保存
    fn apply(&mut self, settings: NavSettings) -> Result<(), ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        tracing::debug!("Settings applied: {:?}", self.current_settings);

        Ok(())
    }
}

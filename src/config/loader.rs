//! 設定ファイルの読み込み関数

use std::io::ErrorKind;
use std::path::Path;

use super::StoreSettings;
use crate::error::ConfigError;

/// Name of the settings file looked up in a directory.
pub const CONFIG_FILE_NAME: &str = ".locale-store.json";

/// ディレクトリから設定を読み込む
///
/// `.locale-store.json` ファイルを探して読み込む
///
/// # Arguments
/// * `root` - 設定ファイルを探すディレクトリ
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー（パス付き）
///
/// # Errors
/// - ファイル読み込みエラー（存在しない場合を除く）
/// - JSON パースエラー
pub fn load_from_dir(root: &Path) -> Result<Option<StoreSettings>, ConfigError> {
    let path = root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(source) if source.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No store settings file");
            return Ok(None);
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    tracing::debug!(path = %path.display(), "Read store settings file");
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse { path, source })
}

/// 設定を読み込み、バリデーションする
///
/// `root` が `None` またはファイルが無い場合はデフォルト値を使う
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
/// - バリデーションエラー
pub fn load_settings(root: Option<&Path>) -> Result<StoreSettings, ConfigError> {
    tracing::debug!("Loading settings for: {:?}", root);

    let settings = match root {
        Some(root) => load_from_dir(root)?.unwrap_or_default(),
        None => StoreSettings::default(),
    };

    settings.validate().map_err(ConfigError::Invalid)?;
    tracing::debug!("Settings loaded successfully: {:?}", settings);

    Ok(settings)
}

//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::io;
use std::sync::{
    Arc,
    Mutex,
    PoisonError,
};

use serde_json::{
    Value,
    json,
};

use crate::store::LocaleStore;
use crate::types::LocaleTree;

/// JSON オブジェクトから `LocaleTree` を作成する
///
/// # Panics
/// `value` がオブジェクトでも配列でもない場合
pub(crate) fn tree(value: &Value) -> LocaleTree {
    LocaleTree::from_json(value).unwrap()
}

/// `en` と `it` を登録済みのテスト用ストアを作成する
///
/// 現在のロケールはデフォルトの `en`
pub(crate) fn sample_store() -> LocaleStore {
    let mut store = LocaleStore::new();
    store.add(tree(&json!({
        "en": { "voc": { "Hi": "Hi" } },
        "it": { "voc": { "Hi": "Ciao" } }
    })));
    store
}

/// ログ出力を貯めるバッファ
#[derive(Clone, Default)]
struct LogBuffer {
    /// 書き込まれたバイト列
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// `f` の実行中に出力されたログを文字列として取得する
///
/// 現在のスレッドだけにサブスクライバーを設定するため、並列テストの影響を受けない
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.bytes.lock().unwrap()).into_owned();
    (result, logs)
}

//! アップロードステータス監視
//!
//! サーバー側の処理が終わるまで一定間隔でポーリングする。
//! 状態遷移は pending → processing → completed|failed の一方向で、
//! 表示は常にサーバーが報告した状態に従う（先読みしない）。

use super::api::{ApiClient, UploadState, UploadStatus};
use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// 処理完了までステータスをポーリングする
///
/// pending/processingの間はinterval間隔で照会を続け、
/// completed/failedになったら最終ステータスを返す。
pub async fn watch_until_done(
    client: &ApiClient,
    upload_id: i64,
    interval: Duration,
) -> Result<UploadStatus> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));

    let mut ticker = tokio::time::interval(interval);
    let mut last_state: Option<UploadState> = None;

    loop {
        ticker.tick().await;

        let status = client.status(upload_id).await?;

        if last_state != Some(status.status) {
            spinner.set_message(format!("{} ({})", status.original_name, status.status));
            last_state = Some(status.status);
        }

        if status.status.is_terminal() {
            spinner.finish_and_clear();
            return Ok(status);
        }
    }
}

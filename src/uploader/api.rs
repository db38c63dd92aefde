//! ダッシュボードAPIクライアント
//!
//! アップロード受付・ステータス照会・履歴取得のHTTP呼び出し。
//! サーバー側のスキーマは upload_history テーブル由来の固定形。

use crate::config::Config;
use crate::error::{AlkanaUploadError, Result};
use crate::period::ReportingPeriod;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 判別できなかったファイルの送り先（従来の汎用取込パス）
pub const LEGACY_UPLOAD_ENDPOINT: &str = "/api/v1/upload";

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// アップロード受付レスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub upload_id: i64,
    pub status: String,
    pub message: String,
}

/// サーバー側の処理状態
///
/// 遷移は pending → processing → completed|failed の一方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadState {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl UploadState {
    /// 終了状態か（これ以上遷移しない）
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadState::Completed | UploadState::Failed)
    }
}

impl std::fmt::Display for UploadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadState::Pending => write!(f, "pending"),
            UploadState::Processing => write!(f, "processing"),
            UploadState::Completed => write!(f, "completed"),
            UploadState::Failed => write!(f, "failed"),
        }
    }
}

/// アップロード処理状況
#[derive(Debug, Clone, Deserialize)]
pub struct UploadStatus {
    pub upload_id: i64,
    pub file_name: String,
    pub original_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub status: UploadState,
    pub uploaded_at: String,
    pub processed_at: Option<String>,
    #[serde(default)]
    pub rows_loaded: i64,
    #[serde(default)]
    pub rows_updated: i64,
    #[serde(default)]
    pub rows_skipped: i64,
    #[serde(default)]
    pub rows_failed: i64,
    pub error_message: Option<String>,
    pub snapshot_date: Option<String>,
}

/// アップロード履歴の1件
#[derive(Debug, Clone, Deserialize)]
pub struct UploadHistoryItem {
    pub upload_id: i64,
    pub original_name: String,
    pub file_type: String,
    pub status: String,
    pub uploaded_at: String,
    #[serde(default)]
    pub rows_loaded: i64,
    #[serde(default)]
    pub rows_failed: i64,
}

/// ダッシュボードAPIクライアント
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// 設定からクライアントを生成する
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// ファイルをアップロードする
    ///
    /// 期間必須の帳票ではmonth/year、AR帳票ではsnapshot_dateを
    /// multipartフィールドとして添付する。
    pub async fn upload(
        &self,
        path: &Path,
        endpoint: &str,
        period: Option<ReportingPeriod>,
        snapshot_date: Option<&str>,
    ) -> Result<UploadResponse> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let bytes = tokio::fs::read(path).await?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(XLSX_MIME)?;

        let mut form = reqwest::multipart::Form::new().part("file", part);

        if let Some(period) = period {
            form = form
                .text("month", period.month.to_string())
                .text("year", period.year.to_string());
        }

        if let Some(date) = snapshot_date {
            form = form.text("snapshot_date", date.to_string());
        }

        let response = self
            .client
            .post(self.url(endpoint))
            .multipart(form)
            .send()
            .await?;

        Self::parse_json(response).await
    }

    /// アップロードIDの処理状況を取得する
    pub async fn status(&self, upload_id: i64) -> Result<UploadStatus> {
        let response = self
            .client
            .get(self.url(&format!("/api/v1/upload/{}/status", upload_id)))
            .send()
            .await?;

        Self::parse_json(response).await
    }

    /// アップロード履歴を取得する
    pub async fn history(&self, limit: usize) -> Result<Vec<UploadHistoryItem>> {
        let response = self
            .client
            .get(self.url("/api/v1/upload/history"))
            .query(&[("limit", limit)])
            .send()
            .await?;

        Self::parse_json(response).await
    }

    /// ステータスコードを確認してJSONを取り出す
    async fn parse_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AlkanaUploadError::Api(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

//! アップロード実行モジュール
//!
//! ## 処理フロー
//! 1. ファイル検証（拡張子・サイズ上限）
//! 2. 帳票種別判別（detector）
//! 3. 対象期間の確認（期間必須の帳票は年月が揃うまでアップロードしない）
//! 4. multipart POSTでアップロードIDを取得
//! 5. ステータス監視（1秒間隔、completed/failedで終了）

pub mod api;
pub mod cache;
pub mod status;

use crate::detector::Detection;
use crate::period::ReportingPeriod;

/// アップロードフローの段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Detecting,
    NeedsPeriodInput,
    Uploading,
    Pending,
    Processing,
    Completed,
    Failed,
}

impl From<api::UploadState> for UploadPhase {
    fn from(state: api::UploadState) -> Self {
        match state {
            api::UploadState::Pending => UploadPhase::Pending,
            api::UploadState::Processing => UploadPhase::Processing,
            api::UploadState::Completed => UploadPhase::Completed,
            api::UploadState::Failed => UploadPhase::Failed,
        }
    }
}

/// 判別結果から次の段階を決める
///
/// 期間必須のルールで期間が未指定なら入力待ちに遷移する。
/// 判別できなかった場合も汎用パスでのアップロードへ進む。
pub fn phase_after_detection(
    detection: Option<&Detection>,
    period: Option<ReportingPeriod>,
) -> UploadPhase {
    match detection {
        Some(d) if d.rule.requires_period && period.is_none() => UploadPhase::NeedsPeriodInput,
        _ => UploadPhase::Uploading,
    }
}

/// アップロード先エンドポイントを決める
///
/// 上書き指定 > 判別ルールのエンドポイント > 従来の汎用パス。
pub fn resolve_endpoint(detection: Option<&Detection>, override_endpoint: Option<&str>) -> String {
    if let Some(endpoint) = override_endpoint {
        return endpoint.to_string();
    }

    match detection {
        Some(d) => d.rule.endpoint.to_string(),
        None => api::LEGACY_UPLOAD_ENDPOINT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{rules, Detection, DetectionMethod};

    fn detection_of(file_type: &str) -> Detection {
        Detection {
            rule: rules::find_by_type(file_type).unwrap(),
            method: DetectionMethod::ColumnSignature,
        }
    }

    #[test]
    fn test_period_required_blocks_upload() {
        // ZRPP062は期間が揃うまでアップロードに進まない
        let detection = detection_of("ZRPP062");
        let phase = phase_after_detection(Some(&detection), None);
        assert_eq!(phase, UploadPhase::NeedsPeriodInput);
    }

    #[test]
    fn test_period_supplied_proceeds() {
        let detection = detection_of("ZRPP062");
        let period = ReportingPeriod::new(2025, 7).unwrap();
        let phase = phase_after_detection(Some(&detection), Some(period));
        assert_eq!(phase, UploadPhase::Uploading);
    }

    #[test]
    fn test_no_period_needed_proceeds() {
        let detection = detection_of("MB51");
        let phase = phase_after_detection(Some(&detection), None);
        assert_eq!(phase, UploadPhase::Uploading);
    }

    #[test]
    fn test_undetected_uses_legacy_path() {
        // 判別できなくてもアップロードは止めない
        let phase = phase_after_detection(None, None);
        assert_eq!(phase, UploadPhase::Uploading);
        assert_eq!(resolve_endpoint(None, None), api::LEGACY_UPLOAD_ENDPOINT);
    }

    #[test]
    fn test_resolve_endpoint_from_rule() {
        let detection = detection_of("ZRPP062");
        assert_eq!(
            resolve_endpoint(Some(&detection), None),
            "/api/v3/yield/upload"
        );
    }

    #[test]
    fn test_resolve_endpoint_override_wins() {
        let detection = detection_of("ZRPP062");
        assert_eq!(
            resolve_endpoint(Some(&detection), Some("/api/v2/custom")),
            "/api/v2/custom"
        );
    }

    #[test]
    fn test_phase_from_server_state() {
        assert_eq!(UploadPhase::from(api::UploadState::Pending), UploadPhase::Pending);
        assert_eq!(
            UploadPhase::from(api::UploadState::Processing),
            UploadPhase::Processing
        );
        assert_eq!(
            UploadPhase::from(api::UploadState::Completed),
            UploadPhase::Completed
        );
        assert_eq!(UploadPhase::from(api::UploadState::Failed), UploadPhase::Failed);
    }
}

//! 帳票種別判別モジュール
//!
//! ## 判別フロー
//! 1. 列ヘッダー抽出（Excel解析）
//! 2. シグネチャ照合（6割しきい値、定義順の先勝ち）
//! 3. ファイル名フォールバック
//!
//! 判別の失敗はアップロードを止めない。どのルールにも該当しなければ
//! 従来の汎用取込パスが使われる。

pub mod headers;
pub mod matching;
pub mod rules;

pub use rules::{DetectionRule, DETECTION_RULES};

use crate::error::{AlkanaUploadError, Result};
use std::path::Path;

/// 判別に使われた手段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMethod {
    /// 列シグネチャ照合
    ColumnSignature,
    /// ファイル名パターン
    FilenamePattern,
}

impl std::fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionMethod::ColumnSignature => write!(f, "列シグネチャ"),
            DetectionMethod::FilenamePattern => write!(f, "ファイル名"),
        }
    }
}

/// 判別結果
#[derive(Debug, Clone, Copy)]
pub struct Detection {
    pub rule: &'static DetectionRule,
    pub method: DetectionMethod,
}

/// ファイルの帳票種別を判別する
///
/// ヘッダー判別が不成立（Excelとして読めない、またはしきい値未達）なら
/// ファイル名フォールバックを試す。どちらも不成立ならNone。
/// レジストリは不変なので同じファイルへの再実行は同じ結果を返す。
pub fn detect_file(path: &Path, verbose: bool) -> Result<Option<Detection>> {
    if !path.exists() {
        return Err(AlkanaUploadError::FileNotFound(path.display().to_string()));
    }

    // 1. ヘッダー判別（解析エラーは「判別できず」として続行）
    let headers = match headers::extract_headers(path) {
        Ok(headers) => headers,
        Err(AlkanaUploadError::Parse(msg)) => {
            if verbose {
                println!("  ヘッダー抽出失敗: {}", msg);
            }
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    if verbose && !headers.is_empty() {
        let preview: Vec<&str> = headers.iter().take(10).map(|s| s.as_str()).collect();
        println!("  検出ヘッダー: {}", preview.join(", "));
        for count in matching::count_matches(&headers) {
            println!(
                "  {}: {}/{} (しきい値 {})",
                count.file_type, count.matched, count.signature_len, count.threshold
            );
        }
    }

    if let Some(rule) = matching::match_headers(&headers, DETECTION_RULES) {
        return Ok(Some(Detection {
            rule,
            method: DetectionMethod::ColumnSignature,
        }));
    }

    // 2. ファイル名フォールバック
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if let Some(file_type) = matching::guess_from_filename(&file_name) {
        if let Some(rule) = rules::find_by_type(file_type) {
            return Ok(Some(Detection {
                rule,
                method: DetectionMethod::FilenamePattern,
            }));
        }
    }

    Ok(None)
}

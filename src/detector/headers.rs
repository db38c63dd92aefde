//! Excelヘッダー行の抽出
//!
//! 1枚目のシート（ファイル内の並び順、シート名は見ない）の1行目から
//! 列ヘッダー文字列を取り出す。

use crate::error::{AlkanaUploadError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Excelファイルからヘッダー行を抽出する
///
/// 1行目を左から右へ走査し、空セルは詰めて（プレースホルダーを入れずに）
/// 文字列のリストを返す。Excelとして読めないファイルはParseエラー。
pub fn extract_headers(path: &Path) -> Result<Vec<String>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AlkanaUploadError::Parse(format!("Excelとして開けません: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AlkanaUploadError::Parse("シートがありません".into()))?
        .map_err(|e| AlkanaUploadError::Parse(format!("シート読み込みエラー: {}", e)))?;

    // 使用範囲が1行目から始まらないシートはヘッダーなし扱い
    let first_row = match range.start() {
        Some((0, _)) => match range.rows().next() {
            Some(row) => row,
            None => return Ok(Vec::new()),
        },
        _ => return Ok(Vec::new()),
    };

    Ok(first_row.iter().filter_map(cell_to_header).collect())
}

/// セル値をヘッダー文字列へ変換する（空セルはNone）
///
/// 空文字列・0・falseのセルは空セルと同じ扱いでスキップする。
fn cell_to_header(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) if *f == 0.0 => None,
        Data::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(0) => None,
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(false) => None,
        Data::Bool(true) => Some("true".to_string()),
        other => Some(other.to_string()),
    }
}

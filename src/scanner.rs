//! アップロード対象Excelファイルのスキャン・検証モジュール

use crate::error::{AlkanaUploadError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// スキャンで見つかったファイル情報
#[derive(Debug, Clone)]
pub struct SpreadsheetInfo {
    pub path: PathBuf,
    pub file_name: String,
    pub file_size: u64,
}

/// 受け付ける拡張子（アップロード側の許可リスト）
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm"];

/// 拡張子が対応形式かを判定（大文字小文字は区別しない）
pub fn is_spreadsheet_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            SPREADSHEET_EXTENSIONS.iter().any(|&e| e == ext)
        })
        .unwrap_or(false)
}

/// フォルダ直下のExcelファイルを列挙する
pub fn scan_folder(folder: &Path) -> Result<Vec<SpreadsheetInfo>> {
    if !folder.exists() {
        return Err(AlkanaUploadError::FolderNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if !is_spreadsheet_extension(path) {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let file_size = entry.metadata().map(|m| m.len()).unwrap_or(0);

        files.push(SpreadsheetInfo {
            path: path.to_path_buf(),
            file_name,
            file_size,
        });
    }

    // ファイル名でソート
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}

/// アップロード前のファイル検証（存在・拡張子・サイズ上限）
///
/// サイズ上限は判別器ではなくアップロード側の制約。
pub fn validate_for_upload(path: &Path, max_size_mb: u64) -> Result<SpreadsheetInfo> {
    if !path.exists() {
        return Err(AlkanaUploadError::FileNotFound(path.display().to_string()));
    }

    if !is_spreadsheet_extension(path) {
        return Err(AlkanaUploadError::UnsupportedExtension(
            path.display().to_string(),
        ));
    }

    let metadata = std::fs::metadata(path)?;
    let max_bytes = max_size_mb * 1024 * 1024;
    if metadata.len() > max_bytes {
        return Err(AlkanaUploadError::FileTooLarge(format!(
            "{} ({:.1} MB、上限 {} MB)",
            path.display(),
            metadata.len() as f64 / 1024.0 / 1024.0,
            max_size_mb
        )));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(SpreadsheetInfo {
        path: path.to_path_buf(),
        file_name,
        file_size: metadata.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_is_spreadsheet_extension() {
        assert!(is_spreadsheet_extension(Path::new("report.xlsx")));
        assert!(is_spreadsheet_extension(Path::new("report.XLSX")));
        assert!(is_spreadsheet_extension(Path::new("report.xls")));
        assert!(is_spreadsheet_extension(Path::new("report.xlsm")));
        assert!(!is_spreadsheet_extension(Path::new("report.csv")));
        assert!(!is_spreadsheet_extension(Path::new("report.pdf")));
        assert!(!is_spreadsheet_extension(Path::new("report")));
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(result.is_err());
    }

    #[test]
    fn test_scan_folder_empty() {
        let dir = tempdir().unwrap();
        let result = scan_folder(dir.path()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_folder_filters_and_sorts() {
        let dir = tempdir().unwrap();

        File::create(dir.path().join("b_mb51.xlsx")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("a_cooispi.XLSX")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("c_target.xlsm")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("readme.txt")).unwrap().write_all(b"text").unwrap();

        let result = scan_folder(dir.path()).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].file_name, "a_cooispi.XLSX");
        assert_eq!(result[1].file_name, "b_mb51.xlsx");
        assert_eq!(result[2].file_name, "c_target.xlsm");
    }

    #[test]
    fn test_scan_folder_not_recursive() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        File::create(sub.join("nested.xlsx")).unwrap();
        File::create(dir.path().join("top.xlsx")).unwrap();

        let result = scan_folder(dir.path()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].file_name, "top.xlsx");
    }

    #[test]
    fn test_validate_rejects_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        File::create(&path).unwrap();

        let result = validate_for_upload(&path, 50);
        assert!(matches!(
            result,
            Err(AlkanaUploadError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn test_validate_rejects_oversize() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.xlsx");
        File::create(&path).unwrap().write_all(&[0u8; 2048]).unwrap();

        // 上限0MBなら2KBでも弾かれる
        let result = validate_for_upload(&path, 0);
        assert!(matches!(result, Err(AlkanaUploadError::FileTooLarge(_))));
    }

    #[test]
    fn test_validate_ok() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        File::create(&path).unwrap().write_all(b"dummy").unwrap();

        let info = validate_for_upload(&path, 50).unwrap();
        assert_eq!(info.file_name, "report.xlsx");
        assert_eq!(info.file_size, 5);
    }
}

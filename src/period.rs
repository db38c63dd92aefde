//! 対象期間（年月）の入力・検証モジュール
//!
//! ZRPP062（生産歩留まり）のアップロードはmonth/yearの指定が必須。
//! バックエンドの受付範囲（月1〜12、年2020〜2100）に合わせて検証する。

use crate::error::{AlkanaUploadError, Result};
use chrono::{Datelike, Local, NaiveDate};
use dialoguer::Input;
use regex::Regex;

pub const MIN_YEAR: i32 = 2020;
pub const MAX_YEAR: i32 = 2100;

/// 帳票の対象期間（年月）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingPeriod {
    pub year: i32,
    pub month: u32,
}

impl ReportingPeriod {
    /// 年月を検証して生成
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(AlkanaUploadError::InvalidPeriod(format!(
                "月は1〜12で指定してください: {}",
                month
            )));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(AlkanaUploadError::InvalidPeriod(format!(
                "年は{}〜{}で指定してください: {}",
                MIN_YEAR, MAX_YEAR, year
            )));
        }
        Ok(Self { year, month })
    }

    /// "YYYY-MM" 形式の文字列からパース（区切りは - または / ）
    pub fn parse(s: &str) -> Result<Self> {
        lazy_static::lazy_static! {
            static ref PERIOD_RE: Regex = Regex::new(r"^(\d{4})[-/](\d{1,2})$").unwrap();
        }

        let caps = PERIOD_RE.captures(s.trim()).ok_or_else(|| {
            AlkanaUploadError::InvalidPeriod(format!("YYYY-MM形式で指定してください: {}", s))
        })?;

        let year: i32 = caps[1]
            .parse()
            .map_err(|_| AlkanaUploadError::InvalidPeriod(s.to_string()))?;
        let month: u32 = caps[2]
            .parse()
            .map_err(|_| AlkanaUploadError::InvalidPeriod(s.to_string()))?;

        Self::new(year, month)
    }

    /// 当月の期間
    pub fn current() -> Self {
        let now = Local::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }
}

impl std::fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// 対話式で対象期間を入力する
///
/// 空入力はキャンセル扱い（Noneを返す、副作用なし）。
pub fn prompt_period() -> Result<Option<ReportingPeriod>> {
    let default = ReportingPeriod::current();

    let input: String = Input::new()
        .with_prompt(format!("対象期間を入力 (YYYY-MM、空欄でキャンセル) [{}]", default))
        .allow_empty(true)
        .interact_text()
        .map_err(|e| AlkanaUploadError::Prompt(e.to_string()))?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    ReportingPeriod::parse(trimmed).map(Some)
}

/// スナップショット日付（YYYY-MM-DD）を検証して正規化する
pub fn parse_snapshot_date(s: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| AlkanaUploadError::InvalidDate(format!("YYYY-MM-DD形式で指定してください: {}", s)))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// 当日の日付（YYYY-MM-DD）
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

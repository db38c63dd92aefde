use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "alkana-upload")]
#[command(about = "SAP帳票の自動判別・ダッシュボードアップロードツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Excelファイルの帳票種別を判別
    Detect {
        /// 判別対象のExcelファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 帳票を判別してダッシュボードへアップロード
    Upload {
        /// アップロードするExcelファイル
        #[arg(required = true)]
        file: PathBuf,

        /// 対象期間（YYYY-MM形式。ZRPP062で必須、未指定なら対話入力）
        #[arg(short, long)]
        period: Option<String>,

        /// ARスナップショット日付（YYYY-MM-DD形式。ZRFI005用、省略時は当日）
        #[arg(long)]
        snapshot_date: Option<String>,

        /// アップロード先エンドポイントを上書き
        #[arg(long)]
        endpoint: Option<String>,

        /// アップロード済みの同一ファイルでも再アップロードする
        #[arg(short, long)]
        force: bool,

        /// アップロード後のステータス監視をスキップ
        #[arg(long)]
        no_watch: bool,
    },

    /// フォルダ内のExcelファイルを一括判別
    Scan {
        /// スキャン対象フォルダ
        #[arg(required = true)]
        folder: PathBuf,
    },

    /// アップロードの処理状況を確認
    Status {
        /// アップロードID
        #[arg(required = true)]
        upload_id: i64,

        /// 完了までポーリングで監視
        #[arg(short, long)]
        watch: bool,
    },

    /// アップロード履歴を表示
    History {
        /// 表示件数
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// 設定の表示・変更
    Config {
        /// APIベースURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

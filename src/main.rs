use alkana_upload_rust::{cli, config, detector, error, period, scanner, uploader};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::path::Path;
use std::time::Duration;
use uploader::api::{ApiClient, UploadState, UploadStatus};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Detect { file } => {
            println!("🔍 alkana-upload - 帳票判別\n");

            match detector::detect_file(&file, cli.verbose)? {
                Some(detection) => {
                    println!("✅ {} ({})", detection.rule.file_type, detection.rule.label);
                    println!("  判別方法: {}", detection.method);
                    println!("  エンドポイント: {}", detection.rule.endpoint);
                    if detection.rule.requires_period {
                        println!("  ⚠ アップロード時に対象期間（年月）の入力が必要です");
                    }
                }
                None => {
                    println!("⚠ 帳票種別を判別できませんでした");
                    println!("  アップロード時は汎用取込パスが使われます");
                }
            }
        }

        Commands::Upload {
            file,
            period: period_arg,
            snapshot_date,
            endpoint,
            force,
            no_watch,
        } => {
            println!("📤 alkana-upload - アップロード\n");

            // 1. ファイル検証
            println!("[1/4] ファイルを検証中...");
            let info = scanner::validate_for_upload(&file, config.max_file_size_mb)?;
            println!(
                "✔ {} ({:.2} MB)\n",
                info.file_name,
                info.file_size as f64 / 1024.0 / 1024.0
            );

            // 2. 帳票判別
            println!("[2/4] 帳票種別を判別中...");
            let detection = detector::detect_file(&file, cli.verbose)?;
            match &detection {
                Some(d) => println!("✔ {} ({}) [{}]\n", d.rule.file_type, d.rule.label, d.method),
                None => println!("⚠ 判別できず。汎用取込パスでアップロードします\n"),
            }

            // 対象期間の解決（期間必須の帳票は揃うまで進まない）
            let mut reporting_period = period_arg
                .as_deref()
                .map(period::ReportingPeriod::parse)
                .transpose()?;

            if uploader::phase_after_detection(detection.as_ref(), reporting_period)
                == uploader::UploadPhase::NeedsPeriodInput
            {
                match period::prompt_period()? {
                    Some(p) => reporting_period = Some(p),
                    None => {
                        // キャンセル。まだ何も送っていないので副作用なし
                        println!("キャンセルしました");
                        return Ok(());
                    }
                }
            }

            // ZRFI005はスナップショット日付を添付（省略時は当日）
            let snapshot = resolve_snapshot_date(detection.as_ref(), snapshot_date.as_deref())?;
            if let Some(date) = &snapshot {
                println!("  スナップショット日付: {}", date);
            }

            // 同一内容の二重アップロード確認
            let folder = file.parent().unwrap_or_else(|| Path::new("."));
            let hash = uploader::cache::compute_file_hash(&file)?;
            let mut upload_cache = uploader::cache::UploadCache::load(folder);

            if let Some(entry) = upload_cache.get(&hash) {
                if !force {
                    println!(
                        "⚠ 同一内容のファイルは既にアップロード済みです (ID: {}, {})",
                        entry.upload_id, entry.uploaded_at
                    );
                    println!("  再アップロードする場合は --force を指定してください");
                    return Ok(());
                }
            }

            // 3. アップロード
            println!("[3/4] アップロード中...");
            let client = ApiClient::new(&config)?;
            let upload_endpoint = uploader::resolve_endpoint(detection.as_ref(), endpoint.as_deref());
            let response = client
                .upload(&file, &upload_endpoint, reporting_period, snapshot.as_deref())
                .await?;
            println!("✔ 受付完了 (アップロードID: {})\n", response.upload_id);

            upload_cache.insert(
                hash,
                uploader::cache::CacheEntry {
                    file_name: info.file_name.clone(),
                    file_size: info.file_size,
                    upload_id: response.upload_id,
                    uploaded_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                },
            );
            if let Err(e) = upload_cache.save(folder) {
                eprintln!("キャッシュ保存に失敗: {}", e);
            }

            // 4. ステータス監視
            if no_watch {
                println!("ステータス確認: alkana-upload status {}", response.upload_id);
            } else {
                println!("[4/4] 処理状況を監視中...");
                let status = uploader::status::watch_until_done(
                    &client,
                    response.upload_id,
                    Duration::from_secs(config.poll_interval_seconds),
                )
                .await?;
                print_status(&status);

                if status.status == UploadState::Failed {
                    return Err(error::AlkanaUploadError::UploadFailed(
                        status.error_message.unwrap_or_else(|| "原因不明".into()),
                    ));
                }
            }

            println!("\n✅ 完了");
        }

        Commands::Scan { folder } => {
            println!("📂 alkana-upload - フォルダスキャン\n");

            let files = scanner::scan_folder(&folder)?;
            if files.is_empty() {
                println!("Excelファイルが見つかりませんでした");
                return Ok(());
            }
            println!("{}件のExcelファイルを検出\n", files.len());

            for file in &files {
                match detector::detect_file(&file.path, cli.verbose) {
                    Ok(Some(d)) => {
                        println!("  ✔ {} → {} ({})", file.file_name, d.rule.file_type, d.rule.label)
                    }
                    Ok(None) => println!("  ⚠ {} → 判別できず", file.file_name),
                    Err(e) => println!("  ✗ {} → {}", file.file_name, e),
                }
            }
        }

        Commands::Status { upload_id, watch } => {
            println!("📊 alkana-upload - ステータス確認\n");

            let client = ApiClient::new(&config)?;
            let status = if watch {
                uploader::status::watch_until_done(
                    &client,
                    upload_id,
                    Duration::from_secs(config.poll_interval_seconds),
                )
                .await?
            } else {
                client.status(upload_id).await?
            };
            print_status(&status);
        }

        Commands::History { limit } => {
            println!("📜 alkana-upload - アップロード履歴\n");

            let client = ApiClient::new(&config)?;
            let items = client.history(limit).await?;

            if items.is_empty() {
                println!("履歴がありません");
                return Ok(());
            }

            for item in &items {
                println!(
                    "  [{}] {} {} ({}) 取込{}件/失敗{}件 - {}",
                    item.upload_id,
                    status_mark(&item.status),
                    item.original_name,
                    item.file_type,
                    item.rows_loaded,
                    item.rows_failed,
                    item.uploaded_at
                );
            }
        }

        Commands::Config { set_api_url, show } => {
            let mut config = config;

            if let Some(url) = set_api_url {
                config.set_api_url(url)?;
                println!("✔ APIベースURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  APIベースURL: {}", config.api_base_url);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  ポーリング間隔: {}秒", config.poll_interval_seconds);
                println!("  サイズ上限: {} MB", config.max_file_size_mb);
            }
        }
    }

    Ok(())
}

/// ZRFI005（AR帳票）のスナップショット日付を決める
///
/// 指定があれば検証して使い、AR帳票なのに未指定なら当日を使う。
/// AR帳票以外では指定があっても送らない。
fn resolve_snapshot_date(
    detection: Option<&detector::Detection>,
    snapshot_date: Option<&str>,
) -> Result<Option<String>> {
    let is_ar_file = detection.map(|d| d.rule.file_type == "ZRFI005").unwrap_or(false);
    if !is_ar_file {
        return Ok(None);
    }

    match snapshot_date {
        Some(date) => Ok(Some(period::parse_snapshot_date(date)?)),
        None => Ok(Some(period::today())),
    }
}

/// ステータスの詳細を表示する
fn print_status(status: &UploadStatus) {
    let mark = match status.status {
        UploadState::Completed => "✅",
        UploadState::Failed => "❌",
        UploadState::Processing => "⏳",
        UploadState::Pending => "🕒",
    };

    println!("\n{} {} [{}]", mark, status.original_name, status.status);
    println!(
        "  種別: {} / サイズ: {:.2} MB",
        status.file_type,
        status.file_size as f64 / 1024.0 / 1024.0
    );

    if let Some(date) = &status.snapshot_date {
        println!("  スナップショット日付: {}", date);
    }

    if status.status == UploadState::Completed {
        println!(
            "  取込: {} / 更新: {} / スキップ: {} / 失敗: {}",
            status.rows_loaded, status.rows_updated, status.rows_skipped, status.rows_failed
        );
    }

    if let Some(message) = &status.error_message {
        println!("  エラー: {}", message);
    }

    println!("  受付: {}", status.uploaded_at);
    if let Some(processed) = &status.processed_at {
        println!("  処理完了: {}", processed);
    }
}

fn status_mark(status: &str) -> &'static str {
    match status {
        "completed" => "✅",
        "failed" => "❌",
        "processing" => "⏳",
        _ => "🕒",
    }
}

use clap::Parser;
use recipe_tag_rust::{cli, config, error, exporter, matcher, prompt, tagger};

use cli::{Cli, Commands};
use config::Config;
use error::Result;
use matcher::MatchReport;
use tagger::TagStats;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Export { folder, output, recursive } => {
            println!("🎞 recipe-tag - メタデータ抽出\n");

            println!("[1/2] 写真をスキャン中...");
            let images = exporter::scan_folder(&folder, recursive)?;
            println!("✔ {}枚の写真を検出\n", images.len());

            if images.is_empty() {
                return Err(error::RecipeTagError::NoImagesFound(
                    folder.display().to_string(),
                ));
            }

            println!("[2/2] exiftoolでメタデータを抽出中...");
            let output = output.unwrap_or_else(|| folder.join("metadata.csv"));
            exporter::export_metadata(&folder, &output, recursive, &config, cli.verbose).await?;
            println!("✔ メタデータを保存: {}", output.display());

            println!("\n✅ 抽出完了");
        }

        Commands::Match { metadata, recipes, out_dir } => {
            println!("🎞 recipe-tag - レシピ照合\n");

            let metadata = match metadata {
                Some(path) => path,
                None => prompt::prompt_existing_file("メタデータCSVのパス")?,
            };
            let recipes = match recipes {
                Some(path) => path,
                None => prompt::prompt_existing_file("レシピCSVのパス")?,
            };

            println!("- 照合中...");
            let report = matcher::run_match(&metadata, &recipes, &out_dir)?;
            print_match_report(&report);

            println!("\n✅ 照合完了");
        }

        Commands::Tag { input, dry_run } => {
            println!("🏷 recipe-tag - キーワード書き込み\n");

            let plans = tagger::load_tag_plans(&input)?;
            if plans.is_empty() {
                println!("書き込む照合結果がありません: {}", input.display());
                return Ok(());
            }

            println!("- {}ファイルへ書き込み中...{}", plans.len(), if dry_run { " (dry-run)" } else { "" });
            let stats = tagger::tag_files(&plans, &config, dry_run, cli.verbose).await?;
            print_tag_stats(&stats, dry_run);

            println!("\n✅ 書き込み完了");
        }

        Commands::Run { folder, recipes, out_dir, recursive, dry_run } => {
            println!("🚀 recipe-tag - 一括処理\n");

            // 1. Export
            println!("[1/3] メタデータを抽出中...");
            let images = exporter::scan_folder(&folder, recursive)?;
            println!("✔ {}枚の写真を検出", images.len());

            if images.is_empty() {
                return Err(error::RecipeTagError::NoImagesFound(
                    folder.display().to_string(),
                ));
            }

            let out_dir = out_dir.unwrap_or_else(|| folder.clone());
            std::fs::create_dir_all(&out_dir)?;
            let metadata_csv = out_dir.join("metadata.csv");
            exporter::export_metadata(&folder, &metadata_csv, recursive, &config, cli.verbose).await?;
            println!("✔ メタデータを保存: {}\n", metadata_csv.display());

            // 2. Match
            println!("[2/3] レシピと照合中...");
            let report = matcher::run_match(&metadata_csv, &recipes, &out_dir)?;
            print_match_report(&report);
            println!();

            // 3. Tag
            println!("[3/3] キーワードを書き込み中...{}", if dry_run { " (dry-run)" } else { "" });
            let plans = tagger::load_tag_plans(&report.matched_path)?;
            if plans.is_empty() {
                println!("書き込む照合結果がありません");
            } else {
                let stats = tagger::tag_files(&plans, &config, dry_run, cli.verbose).await?;
                print_tag_stats(&stats, dry_run);
            }

            println!("\n✅ 完了");
        }

        Commands::Config { set_exiftool_path, set_keyword_tag, show } => {
            let mut config = config;

            if let Some(path) = set_exiftool_path {
                config.set_exiftool_path(path)?;
                println!("✔ exiftoolのパスを設定しました");
            }

            if let Some(tag) = set_keyword_tag {
                config.set_keyword_tag(tag)?;
                println!("✔ キーワードタグ名を設定しました");
            }

            if show {
                println!("設定:");
                println!("  exiftool: {}", config.exiftool_command());
                println!("  キーワードタグ: {}", config.keyword_tag);
            }
        }
    }

    Ok(())
}

fn print_match_report(report: &MatchReport) {
    for warning in &report.warnings {
        println!("⚠ {}", warning);
    }

    println!(
        "✔ 入力写真: {}枚 / 照合: {}行 / 未照合: {}枚",
        report.total_photos, report.matched_rows, report.unmatched_photos
    );
    println!("✔ 照合結果: {}", report.matched_path.display());
    if let Some(path) = &report.unmatched_path {
        println!("✔ 未照合一覧: {}", path.display());
    }
}

fn print_tag_stats(stats: &TagStats, dry_run: bool) {
    if dry_run {
        return;
    }

    println!(
        "✔ 書き込み: {}ファイル / {}キーワード",
        stats.files_tagged, stats.keywords_written
    );
    for (source_file, reason) in &stats.failures {
        println!("⚠ 書き込み失敗: {} ({})", source_file, reason);
    }
}

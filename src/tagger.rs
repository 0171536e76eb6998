//! キーワード書き込みモジュール
//!
//! matched_recipes.csv の各行について、写真のキーワードタグへレシピ名を
//! 追記する。同名キーワードは一度削除してから追加するので重複しない。
//! 1ファイルの失敗は記録して続行する（全体は止めない）。

use crate::config::Config;
use crate::error::{RecipeTagError, Result};
use crate::exiftool::run_exiftool;
use crate::matcher::{Table, RECIPE_NAME_COLUMN, SOURCE_FILE_COLUMN};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::Path;

/// 1ファイル分の書き込み予定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPlan {
    pub source_file: String,
    /// 追記するレシピ名（出現順、重複除去済み）
    pub keywords: Vec<String>,
}

/// 書き込み結果の集計
#[derive(Debug, Clone, Default)]
pub struct TagStats {
    pub files_tagged: usize,
    pub keywords_written: usize,
    /// (SourceFile, エラー内容)
    pub failures: Vec<(String, String)>,
}

/// matched_recipes.csv を読み、ファイルごとの書き込み予定に変換する
///
/// 1枚の写真が複数レシピに一致していれば1予定にまとめる。
pub fn load_tag_plans(input: &Path) -> Result<Vec<TagPlan>> {
    let table = Table::from_csv_path(input)?;

    for column in [SOURCE_FILE_COLUMN, RECIPE_NAME_COLUMN] {
        if !table.has_column(column) {
            return Err(RecipeTagError::MissingColumn {
                column: column.to_string(),
                path: input.display().to_string(),
            });
        }
    }
    let source_col = table.column_index(SOURCE_FILE_COLUMN).unwrap_or(0);
    let filmsim_col = table.column_index(RECIPE_NAME_COLUMN).unwrap_or(0);

    let mut plans: Vec<TagPlan> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in table.rows() {
        let source_file = row[source_col].as_str();
        let filmsim = row[filmsim_col].as_str();
        if source_file.is_empty() || filmsim.is_empty() {
            continue;
        }

        let plan_idx = *index.entry(source_file.to_string()).or_insert_with(|| {
            plans.push(TagPlan {
                source_file: source_file.to_string(),
                keywords: Vec::new(),
            });
            plans.len() - 1
        });

        let plan = &mut plans[plan_idx];
        if !plan.keywords.iter().any(|k| k == filmsim) {
            plan.keywords.push(filmsim.to_string());
        }
    }

    Ok(plans)
}

/// 書き込み予定を順に実行する
pub async fn tag_files(
    plans: &[TagPlan],
    config: &Config,
    dry_run: bool,
    verbose: bool,
) -> Result<TagStats> {
    let mut stats = TagStats::default();

    let pb = ProgressBar::new(plans.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40}] {pos}/{len} {msg}")
            .expect("Failed to create progress bar template")
            .progress_chars("=> "),
    );

    for plan in plans {
        pb.set_message(
            Path::new(&plan.source_file)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| plan.source_file.clone()),
        );

        if dry_run {
            pb.println(format!(
                "(dry-run) {} ← {}",
                plan.source_file,
                plan.keywords.join(", ")
            ));
            pb.inc(1);
            continue;
        }

        match write_keywords(plan, config, verbose) {
            Ok(written) => {
                stats.files_tagged += 1;
                stats.keywords_written += written;
            }
            Err(e) => {
                stats.failures.push((plan.source_file.clone(), e.to_string()));
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(stats)
}

/// 1ファイルへキーワードを書き込む
///
/// `-TAG-=名前 -TAG+=名前` で削除してから追加する。既にあっても重複しない。
fn write_keywords(plan: &TagPlan, config: &Config, verbose: bool) -> Result<usize> {
    let tag = &config.keyword_tag;
    let mut written = 0;

    for keyword in &plan.keywords {
        let args = vec![
            "-overwrite_original".to_string(),
            format!("-{}-={}", tag, keyword),
            format!("-{}+={}", tag, keyword),
            plan.source_file.clone(),
        ];
        run_exiftool(config.exiftool_command(), &args, verbose)?;
        written += 1;
    }

    Ok(written)
}

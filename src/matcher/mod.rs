//! レシピ照合エンジン
//!
//! ## 処理フロー
//! 1. メタデータCSVとレシピCSVを読み込む（検証に失敗したら何も書かず中断）
//! 2. スキーマ整合（欠損カラム補完・空セル正規化）
//! 3. 14属性の完全一致で左結合（キーはカラム名で指定）
//! 4. 照合済み／未照合の2表に分割して書き出す
//!
//! 結合キーの比較は厳密な文字列一致のみ。曖昧照合はしない。

mod reconcile;
mod table;
mod types;

pub use reconcile::{reconcile, ReconcileReport};
pub use table::Table;
pub use types::{
    MatchReport, MatchedRow, FILE_NAME_COLUMN, JOIN_ATTRIBUTES, RECIPE_NAME_COLUMN, SENTINEL,
    SOURCE_FILE_COLUMN,
};

use crate::error::{RecipeTagError, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub const MATCHED_FILE_NAME: &str = "matched_recipes.csv";
pub const UNMATCHED_FILE_NAME: &str = "unmatched_jpgs.csv";

/// 入力CSVがこのサイズを超えたら警告する（バイト）
const LARGE_INPUT_BYTES: u64 = 30 * 1024 * 1024;

/// 結合の中間結果（ファイル書き出し前）
#[derive(Debug, Clone, Default)]
pub struct JoinOutcome {
    /// メタデータ行の順で並ぶ。同一写真に複数レシピが一致すれば複数行。
    pub matched: Vec<MatchedRow>,
    /// 未照合ファイル名（初出順、重複なし）
    pub unmatched: Vec<String>,
}

/// メタデータ表とレシピ表を14属性の完全一致で結合する
///
/// 両表とも整合済み（14属性カラムがすべて存在）であること。
/// filmsimかSourceFileが空の行は照合済みには入らない。
pub fn join_tables(metadata: &Table, recipes: &Table) -> Result<JoinOutcome> {
    let meta_keys = key_columns(metadata, "メタデータ表")?;
    let recipe_keys = key_columns(recipes, "レシピ表")?;
    let source_col = require_column(metadata, SOURCE_FILE_COLUMN, "メタデータ表")?;
    let name_col = require_column(metadata, FILE_NAME_COLUMN, "メタデータ表")?;
    let filmsim_col = require_column(recipes, RECIPE_NAME_COLUMN, "レシピ表")?;

    // レシピ側を14属性タプル→レシピ名の索引にする（定義順を維持）
    let mut recipe_index: HashMap<Vec<&str>, Vec<&str>> = HashMap::new();
    for row in recipes.rows() {
        let key: Vec<&str> = recipe_keys.iter().map(|&i| row[i].as_str()).collect();
        recipe_index
            .entry(key)
            .or_default()
            .push(row[filmsim_col].as_str());
    }

    let mut matched = Vec::new();
    for row in metadata.rows() {
        let key: Vec<&str> = meta_keys.iter().map(|&i| row[i].as_str()).collect();
        let Some(names) = recipe_index.get(&key) else {
            continue;
        };

        let source_file = row[source_col].as_str();
        if source_file.is_empty() {
            continue;
        }

        for filmsim in names {
            if filmsim.is_empty() {
                continue;
            }
            matched.push(MatchedRow {
                source_file: source_file.to_string(),
                file_name: row[name_col].clone(),
                filmsim: filmsim.to_string(),
            });
        }
    }

    // 未照合はファイル名の差集合（結合ではない）。
    // 同名写真が2行あって片方だけ一致しても、その名前は照合済み扱い。
    let matched_names: HashSet<&str> = matched.iter().map(|m| m.file_name.as_str()).collect();
    let mut seen = HashSet::new();
    let mut unmatched = Vec::new();
    for row in metadata.rows() {
        let name = row[name_col].as_str();
        if seen.insert(name) && !matched_names.contains(name) {
            unmatched.push(name.to_string());
        }
    }

    Ok(JoinOutcome { matched, unmatched })
}

/// 照合を実行して結果ファイルを書き出す
///
/// 入力検証・結合がすべて成功するまで出力は一切書かない。
pub fn run_match(metadata_csv: &Path, recipes_csv: &Path, out_dir: &Path) -> Result<MatchReport> {
    let mut warnings = Vec::new();

    for path in [metadata_csv, recipes_csv] {
        if !path.exists() {
            return Err(RecipeTagError::FileNotFound(path.display().to_string()));
        }
        let size = std::fs::metadata(path)?.len();
        if size > LARGE_INPUT_BYTES {
            warnings.push(format!(
                "入力ファイルが大きいため処理に時間がかかる可能性があります: {} ({}MB)",
                path.display(),
                size / (1024 * 1024)
            ));
        }
    }

    let mut metadata = Table::from_csv_path(metadata_csv)?;
    let mut recipes = Table::from_csv_path(recipes_csv)?;

    // 識別カラムの検証（整合では補完しない）
    for column in [SOURCE_FILE_COLUMN, FILE_NAME_COLUMN] {
        if !metadata.has_column(column) {
            return Err(RecipeTagError::MissingColumn {
                column: column.to_string(),
                path: metadata_csv.display().to_string(),
            });
        }
    }
    if !recipes.has_column(RECIPE_NAME_COLUMN) {
        return Err(RecipeTagError::MissingColumn {
            column: RECIPE_NAME_COLUMN.to_string(),
            path: recipes_csv.display().to_string(),
        });
    }

    let meta_report = reconcile(&mut metadata);
    if !meta_report.added_columns.is_empty() {
        warnings.push(format!(
            "メタデータ側に無い照合カラムを{}で補完しました ({}個): {}",
            SENTINEL,
            meta_report.added_columns.len(),
            meta_report.added_columns.join(", ")
        ));
    }
    let recipe_report = reconcile(&mut recipes);
    if !recipe_report.added_columns.is_empty() {
        warnings.push(format!(
            "レシピ側に無い照合カラムを{}で補完しました ({}個): {}（設定の無いレシピは曖昧になります）",
            SENTINEL,
            recipe_report.added_columns.len(),
            recipe_report.added_columns.join(", ")
        ));
    }

    let outcome = join_tables(&metadata, &recipes)?;

    if outcome.matched.is_empty() {
        warnings.push("一致するレシピがありませんでした".to_string());
    }
    if outcome.matched.len() > metadata.len() {
        warnings.push(format!(
            "照合行数({})が入力写真数({})を超えています。レシピ定義の重複が原因の可能性があります",
            outcome.matched.len(),
            metadata.len()
        ));
    }

    // ここから先でのみ出力を書く
    std::fs::create_dir_all(out_dir)?;

    let matched_path = out_dir.join(MATCHED_FILE_NAME);
    write_matched(&outcome.matched, &matched_path)?;

    let unmatched_path = if outcome.unmatched.is_empty() {
        None
    } else {
        let path = out_dir.join(UNMATCHED_FILE_NAME);
        write_unmatched(&outcome.unmatched, &path)?;
        Some(path)
    };

    Ok(MatchReport {
        total_photos: metadata.len(),
        matched_rows: outcome.matched.len(),
        unmatched_photos: outcome.unmatched.len(),
        warnings,
        matched_path,
        unmatched_path,
    })
}

fn key_columns(table: &Table, label: &str) -> Result<Vec<usize>> {
    JOIN_ATTRIBUTES
        .iter()
        .map(|attr| require_column(table, attr, label))
        .collect()
}

fn require_column(table: &Table, column: &str, label: &str) -> Result<usize> {
    table
        .column_index(column)
        .ok_or_else(|| RecipeTagError::MissingColumn {
            column: column.to_string(),
            path: label.to_string(),
        })
}

fn write_matched(rows: &[MatchedRow], path: &Path) -> Result<()> {
    let mut table = Table::new(vec![
        SOURCE_FILE_COLUMN.to_string(),
        FILE_NAME_COLUMN.to_string(),
        RECIPE_NAME_COLUMN.to_string(),
    ]);
    for row in rows {
        table.push_row(vec![
            row.source_file.clone(),
            row.file_name.clone(),
            row.filmsim.clone(),
        ])?;
    }
    table.write_csv_path(path)
}

fn write_unmatched(names: &[String], path: &Path) -> Result<()> {
    let mut table = Table::new(vec![FILE_NAME_COLUMN.to_string()]);
    for name in names {
        table.push_row(vec![name.clone()])?;
    }
    table.write_csv_path(path)
}

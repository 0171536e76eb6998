//! スキーマ整合モジュール
//!
//! 照合前に2つの表を結合可能な形へ揃える。
//! - 14属性のうちヘッダに無いカラムは番兵値 "NA" 埋めで追加
//! - 既存の照合カラムの空白セルも "NA" へ置き換え
//!
//! 「両側とも値が無い」を空文字どうしの偶然の一致ではなく
//! 明示的な番兵値どうしの一致として扱うための処理。

use super::table::Table;
use super::types::{JOIN_ATTRIBUTES, SENTINEL};

/// 整合処理の結果（警告文の組み立ては呼び出し側が行う）
#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    /// 補完した（元の表に存在しなかった）照合カラム
    pub added_columns: Vec<String>,
    /// 番兵値へ置き換えた空セルの数
    pub normalized_cells: usize,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.added_columns.is_empty() && self.normalized_cells == 0
    }
}

/// 表を照合可能な形に整える
///
/// 整合後は14属性すべてのカラムが存在し、その中に空文字セルは残らない。
/// 照合対象外のカラムには触れない。
pub fn reconcile(table: &mut Table) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for attr in JOIN_ATTRIBUTES {
        match table.column_index(attr) {
            None => {
                table.add_column(attr, SENTINEL);
                report.added_columns.push(attr.to_string());
            }
            Some(col) => {
                for row in 0..table.len() {
                    if table.cell(row, col).trim().is_empty() {
                        table.set_cell(row, col, SENTINEL);
                        report.normalized_cells += 1;
                    }
                }
            }
        }
    }

    report
}

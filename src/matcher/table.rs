//! CSV由来のインメモリ表
//!
//! ヘッダ名でカラムを引く。結合キーはカラム名で指定するので
//! 物理的なカラム位置に意味は無い。

use crate::error::{RecipeTagError, Result};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// CSVファイルを読み込む
    ///
    /// ヘッダ行が無い（空ファイル含む）場合はエラー。
    /// 行ごとのカラム数不一致などCSVエンジンのエラーはそのまま伝播する。
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RecipeTagError::FileNotFound(path.display().to_string()));
        }

        let mut reader = csv::ReaderBuilder::new().from_path(path)?;

        let header: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if header.is_empty() || header.iter().all(|h| h.trim().is_empty()) {
            return Err(RecipeTagError::EmptyCsv(path.display().to_string()));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        Ok(Self { header, rows })
    }

    pub fn write_csv_path(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// カラムを末尾に追加し、既存の全行をfillで埋める
    pub fn add_column(&mut self, name: &str, fill: &str) {
        self.header.push(name.to_string());
        for row in &mut self.rows {
            row.push(fill.to_string());
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.header.len() {
            return Err(RecipeTagError::Table(format!(
                "行のカラム数({})がヘッダ({})と一致しません",
                row.len(),
                self.header.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: &str) {
        self.rows[row][col] = value.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_csv(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("recipe-tag-test-table");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_from_csv_path_not_found() {
        let result = Table::from_csv_path(Path::new("/nonexistent/table.csv"));
        assert!(matches!(result, Err(RecipeTagError::FileNotFound(_))));
    }

    #[test]
    fn test_from_csv_path_empty_file() {
        let path = temp_csv("empty.csv", "");
        let result = Table::from_csv_path(&path);
        assert!(matches!(result, Err(RecipeTagError::EmptyCsv(_))));
    }

    #[test]
    fn test_from_csv_path_reads_header_and_rows() {
        let path = temp_csv("basic.csv", "A,B\n1,2\n3,4\n");
        let table = Table::from_csv_path(&path).unwrap();

        assert_eq!(table.header(), &["A".to_string(), "B".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 0), "3");
    }

    #[test]
    fn test_from_csv_path_header_only() {
        // ヘッダのみ（データ0行）は空ファイルとは別物で、正常に読める
        let path = temp_csv("header_only.csv", "A,B\n");
        let table = Table::from_csv_path(&path).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_from_csv_path_ragged_row_is_engine_error() {
        let path = temp_csv("ragged.csv", "A,B\n1,2,3\n");
        let result = Table::from_csv_path(&path);
        assert!(matches!(result, Err(RecipeTagError::Csv(_))));
    }

    #[test]
    fn test_add_column_fills_existing_rows() {
        let mut table = Table::new(vec!["A".into()]);
        table.push_row(vec!["1".into()]).unwrap();
        table.push_row(vec!["2".into()]).unwrap();

        table.add_column("B", "NA");

        assert_eq!(table.header(), &["A".to_string(), "B".to_string()]);
        assert_eq!(table.cell(0, 1), "NA");
        assert_eq!(table.cell(1, 1), "NA");
    }

    #[test]
    fn test_push_row_length_mismatch() {
        let mut table = Table::new(vec!["A".into(), "B".into()]);
        let result = table.push_row(vec!["1".into()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_write_and_reload_roundtrip() {
        let mut table = Table::new(vec!["A".into(), "B".into()]);
        table.push_row(vec!["1".into(), "x,y".into()]).unwrap();

        let dir = std::env::temp_dir().join("recipe-tag-test-table");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roundtrip.csv");
        table.write_csv_path(&path).unwrap();

        let reloaded = Table::from_csv_path(&path).unwrap();
        assert_eq!(reloaded, table);
    }
}

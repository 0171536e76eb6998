//! 対話式パス入力モジュール
//!
//! matchサブコマンドで引数が省略されたときに使う。
//! 存在しないパスは受け付けず再入力を求める。

use crate::error::{RecipeTagError, Result};
use dialoguer::Input;
use std::path::PathBuf;

/// 存在するファイルのパスを対話的に取得する
pub fn prompt_existing_file(label: &str) -> Result<PathBuf> {
    loop {
        let input: String = Input::new()
            .with_prompt(label)
            .interact_text()
            .map_err(|e| RecipeTagError::Prompt(e.to_string()))?;

        let path = PathBuf::from(input.trim());
        if path.is_file() {
            return Ok(path);
        }
        println!("⚠ ファイルが見つかりません: {}（再入力してください）", path.display());
    }
}

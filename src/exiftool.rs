//! exiftool CLI連携モジュール
//!
//! メタデータ抽出とキーワード書き込みの両方がここを経由する。
//! 呼び出しは同期・逐次で、失敗時はstderrをそのままエラーに載せる。

use crate::error::{RecipeTagError, Result};
use std::process::Command;

pub fn run_exiftool(command_name: &str, args: &[String], verbose: bool) -> Result<String> {
    if verbose {
        println!("  {} {}", command_name, args.join(" "));
    }

    // exiftool呼び出し（Windowsではcmd /c経由）
    #[cfg(windows)]
    let output = {
        let mut cmd_args: Vec<&str> = vec!["/c", command_name];
        cmd_args.extend(args.iter().map(|a| a.as_str()));
        Command::new("cmd")
            .args(&cmd_args)
            .output()
            .map_err(|e| RecipeTagError::ExifTool(format!("{} の起動に失敗: {}", command_name, e)))?
    };

    #[cfg(not(windows))]
    let output = Command::new(command_name)
        .args(args)
        .output()
        .map_err(|e| RecipeTagError::ExifTool(format!("{} の起動に失敗: {}", command_name, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RecipeTagError::ExifTool(format!(
            "exiftool failed (code {:?}): {}",
            output.status.code(),
            stderr
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

//! メタデータ抽出モジュール
//!
//! ## 処理フロー
//! 1. フォルダをスキャンして対象画像を列挙
//! 2. exiftoolに14属性＋パススルータグを指定してCSVを取得
//! 3. 取得したCSVをそのまま出力ファイルへ保存
//!
//! 抽出自体はexiftool任せ（バイナリ画像の解析は行わない）

use crate::config::Config;
use crate::error::{RecipeTagError, Result};
use crate::exiftool::run_exiftool;
use crate::matcher::JOIN_ATTRIBUTES;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "JPG", "JPEG"];

/// 照合には使わないが出力CSVに残すタグ
const PASSTHROUGH_TAGS: &[&str] = &[
    "FileName",
    "Make",
    "Model",
    "DateTimeOriginal",
    "WhiteBalance",
    "Keywords",
];

pub fn scan_folder(folder: &Path, recursive: bool) -> Result<Vec<ImageInfo>> {
    if !folder.exists() {
        return Err(RecipeTagError::FolderNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy();
            if IMAGE_EXTENSIONS.iter().any(|&e| e == ext_str) {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();

                images.push(ImageInfo {
                    path: path.to_path_buf(),
                    file_name,
                });
            }
        }
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

/// フォルダのメタデータをCSVとして書き出す
///
/// SourceFileカラムはexiftoolの-csvモードが自動で先頭に付ける。
pub async fn export_metadata(
    folder: &Path,
    output: &Path,
    recursive: bool,
    config: &Config,
    verbose: bool,
) -> Result<()> {
    if !folder.exists() {
        return Err(RecipeTagError::FolderNotFound(folder.display().to_string()));
    }

    let args = build_export_args(folder, recursive);
    let csv_text = run_exiftool(config.exiftool_command(), &args, verbose)?;

    if csv_text.trim().is_empty() {
        return Err(RecipeTagError::NoImagesFound(folder.display().to_string()));
    }

    std::fs::write(output, csv_text)?;
    Ok(())
}

fn build_export_args(folder: &Path, recursive: bool) -> Vec<String> {
    let mut args: Vec<String> = vec!["-csv".into(), "-q".into()];

    if recursive {
        args.push("-r".into());
    }

    for tag in PASSTHROUGH_TAGS {
        args.push(format!("-{}", tag));
    }
    for tag in JOIN_ATTRIBUTES {
        args.push(format!("-{}", tag));
    }

    for ext in ["jpg", "jpeg"] {
        args.push("-ext".into());
        args.push(ext.into());
    }

    args.push(folder.display().to_string());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"), false);
        assert!(result.is_err());
    }

    #[test]
    fn test_scan_folder_empty() {
        let temp_dir = std::env::temp_dir().join("recipe-tag-test-empty");
        fs::create_dir_all(&temp_dir).unwrap();

        let result = scan_folder(&temp_dir, false).unwrap();
        assert!(result.is_empty());

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_scan_folder_filters_extensions() {
        let temp_dir = std::env::temp_dir().join("recipe-tag-test-images");
        fs::create_dir_all(&temp_dir).unwrap();

        File::create(temp_dir.join("test1.jpg")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.join("test2.JPG")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.join("test3.jpeg")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.join("raw.raf")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.join("readme.txt")).unwrap().write_all(b"text").unwrap();

        let result = scan_folder(&temp_dir, false).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].file_name, "test1.jpg");
        assert_eq!(result[1].file_name, "test2.JPG");
        assert_eq!(result[2].file_name, "test3.jpeg");

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_scan_folder_recursive() {
        let temp_dir = std::env::temp_dir().join("recipe-tag-test-recursive");
        let sub_dir = temp_dir.join("2024-05");
        fs::create_dir_all(&sub_dir).unwrap();

        File::create(temp_dir.join("a.jpg")).unwrap();
        File::create(sub_dir.join("b.jpg")).unwrap();

        let flat = scan_folder(&temp_dir, false).unwrap();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].file_name, "a.jpg");

        let recursive = scan_folder(&temp_dir, true).unwrap();
        assert_eq!(recursive.len(), 2);

        fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_build_export_args() {
        let args = build_export_args(Path::new("/photos"), true);

        assert_eq!(args[0], "-csv");
        assert!(args.contains(&"-r".to_string()));
        assert!(args.contains(&"-FilmMode".to_string()));
        assert!(args.contains(&"-Clarity".to_string()));
        assert!(args.contains(&"-DateTimeOriginal".to_string()));
        assert_eq!(args.last().unwrap(), "/photos");
    }

    #[test]
    fn test_build_export_args_not_recursive() {
        let args = build_export_args(Path::new("/photos"), false);
        assert!(!args.contains(&"-r".to_string()));
    }
}

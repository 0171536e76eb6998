use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recipe-tag")]
#[command(about = "フィルムシミュレーションレシピ照合・キーワード書き込みツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真フォルダからメタデータCSVを抽出
    Export {
        /// 写真フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 出力CSVファイル（デフォルト: 入力フォルダ/metadata.csv）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// メタデータCSVとレシピCSVを照合
    Match {
        /// メタデータCSVのパス（省略時は対話入力）
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        /// レシピCSVのパス（省略時は対話入力）
        #[arg(short = 'c', long)]
        recipes: Option<PathBuf>,

        /// 出力ディレクトリ
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// 照合結果をキーワードタグへ書き込み
    Tag {
        /// matched_recipes.csv のパス
        #[arg(required = true)]
        input: PathBuf,

        /// 書き込まず予定のみ表示
        #[arg(long)]
        dry_run: bool,
    },

    /// 抽出から書き込みまで一括実行
    Run {
        /// 写真フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// レシピCSVのパス
        #[arg(required = true)]
        recipes: PathBuf,

        /// 出力ディレクトリ（デフォルト: 入力フォルダ）
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// キーワードを書き込まず予定のみ表示
        #[arg(long)]
        dry_run: bool,
    },

    /// 設定を表示/編集
    Config {
        /// exiftoolコマンドのパスを設定
        #[arg(long)]
        set_exiftool_path: Option<String>,

        /// キーワードタグ名を設定（デフォルト: Keywords）
        #[arg(long)]
        set_keyword_tag: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

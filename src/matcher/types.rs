use std::path::PathBuf;

/// 照合キーとなる14個のカメラ設定属性（順序固定）
pub const JOIN_ATTRIBUTES: [&str; 14] = [
    "FilmMode",
    "DevelopmentDynamicRange",
    "ColorChromeEffect",
    "ColorChromeFXBlue",
    "GrainEffectSize",
    "GrainEffectRoughness",
    "ColorTemperature",
    "WhiteBalanceFineTune",
    "HighlightTone",
    "ShadowTone",
    "Saturation",
    "Sharpness",
    "NoiseReduction",
    "Clarity",
];

/// 欠損・空セルを表す番兵値
pub const SENTINEL: &str = "NA";

pub const SOURCE_FILE_COLUMN: &str = "SourceFile";
pub const FILE_NAME_COLUMN: &str = "FileName";
pub const RECIPE_NAME_COLUMN: &str = "filmsim";

/// 照合済み1行（写真×レシピ）
///
/// 同一キーのレシピが複数あれば同じ写真から複数行できる（集約しない）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRow {
    pub source_file: String,
    pub file_name: String,
    pub filmsim: String,
}

/// 照合の集計結果
///
/// 警告は処理中に蓄積して呼び出し側へ返す（グローバル状態は持たない）。
#[derive(Debug, Clone)]
pub struct MatchReport {
    /// 入力写真の行数
    pub total_photos: usize,
    /// 照合済み行数（重複レシピがあると入力行数を超えることがある）
    pub matched_rows: usize,
    /// 未照合のファイル名数
    pub unmatched_photos: usize,
    pub warnings: Vec<String>,
    pub matched_path: PathBuf,
    /// 未照合が無いときはファイル自体を作らない
    pub unmatched_path: Option<PathBuf>,
}

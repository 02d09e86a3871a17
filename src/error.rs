use thiserror::Error;

#[derive(Error, Debug)]
pub enum VacancyError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("シートが見つかりません: {0}")]
    SheetNotFound(String),

    #[error("列が見つかりません: {0}")]
    ColumnNotFound(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    Spreadsheet(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("クリーニング辞書の書式が不正（シート{sheet}）: {entry}")]
    InvalidCleaningEntry { sheet: String, entry: String },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] vacancy_search_common::Error),
}

pub type Result<T> = std::result::Result<T, VacancyError>;

impl From<calamine::Error> for VacancyError {
    fn from(e: calamine::Error) -> Self {
        VacancyError::Spreadsheet(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for VacancyError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        VacancyError::ExcelGeneration(e.to_string())
    }
}

//! # ABC IO
//!
//! 庫存匯出檔讀取（CSV / Excel）

pub mod csv_reader;
pub mod workbook;

use std::path::Path;

use abc_core::{AbcError, RawTable};

pub use csv_reader::load_csv;
pub use workbook::load_workbook;

/// 讀檔錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO 錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 錯誤: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel 讀取錯誤: {0}")]
    Workbook(String),

    #[error("活頁簿沒有任何工作表: {0}")]
    EmptyWorkbook(String),

    #[error("不支援的檔案格式: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Table(#[from] AbcError),
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// 依副檔名讀取檔案為原始表格
pub fn load_path(path: impl AsRef<Path>) -> Result<RawTable> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    tracing::info!("讀取檔案: {}", path.display());

    let table = match extension.as_str() {
        "csv" => load_csv(std::fs::File::open(path)?)?,
        "xlsx" | "xlsm" | "xls" | "ods" => load_workbook(path)?,
        _ => return Err(LoadError::UnsupportedFormat(path.display().to_string())),
    };

    tracing::debug!("欄位: {:?}，資料列: {}", table.columns, table.rows.len());
    Ok(table)
}

/// 讀取檔案並檢查必要欄位
pub fn load_checked(path: impl AsRef<Path>) -> Result<RawTable> {
    let table = load_path(path)?;
    table.check_required_columns()?;
    Ok(table)
}

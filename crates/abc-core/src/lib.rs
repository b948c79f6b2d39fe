//! # ABC Core
//!
//! 核心資料模型與類型定義

pub mod category;
pub mod config;
pub mod summary;
pub mod table;
pub mod transaction;

// Re-export 主要類型
pub use category::AbcCategory;
pub use config::{AbcConfig, SummaryColumns, Thresholds, ZeroTotalPolicy};
pub use summary::{CategorizedSummary, CategorySummary, MaterialSummary, RankedSummary};
pub use table::{Cell, RawTable};
pub use transaction::TransactionRow;

use rust_decimal::Decimal;

/// ABC 分析錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum AbcError {
    #[error("缺少必要欄位: {0}")]
    MissingColumn(String),

    #[error("無效的分類門檻: A/B = {boundary_ab}, B/C = {boundary_bc}（必須 0 < A/B < B/C <= 100）")]
    InvalidThreshold {
        boundary_ab: Decimal,
        boundary_bc: Decimal,
    },

    #[error("總價值為零，無法計算累積百分比")]
    ZeroTotalValue,

    #[error("第 {row} 列欄位 '{column}' 的值無效: {value}")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("計算錯誤: {0}")]
    CalculationError(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AbcError>;

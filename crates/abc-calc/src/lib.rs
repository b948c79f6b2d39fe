//! # ABC Calculation Engine
//!
//! 核心 ABC 分類計算引擎

pub mod aggregation;
pub mod analyzer;
pub mod category_summary;
pub mod classification;
pub mod monitoring;
pub mod ranking;

// Re-export 主要類型
pub use aggregation::Aggregator;
pub use analyzer::AbcAnalyzer;
pub use category_summary::CategorySummarizer;
pub use classification::Classifier;
pub use monitoring::InventoryOverview;
pub use ranking::Ranker;

use abc_core::{CategorizedSummary, CategorySummary};
use rust_decimal::Decimal;
use serde::Serialize;

/// ABC 分析結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbcResult {
    /// 逐物料分類明細（依價值由高到低）
    pub items: Vec<CategorizedSummary>,

    /// 類別彙總
    pub categories: Vec<CategorySummary>,

    /// 總價值
    pub grand_total_value: Decimal,

    /// 總數量
    pub grand_total_quantity: Decimal,

    /// 不重複物料數
    pub material_count: usize,

    /// 警告信息
    pub warnings: Vec<AbcWarning>,

    /// 計算耗時（毫秒）
    #[serde(skip)]
    pub calculation_time_ms: Option<u128>,
}

impl AbcResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            categories: Vec::new(),
            grand_total_value: Decimal::ZERO,
            grand_total_quantity: Decimal::ZERO,
            material_count: 0,
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: AbcWarning) {
        self.warnings.push(warning);
    }

    /// 取得某類別的彙總
    pub fn category(&self, category: abc_core::AbcCategory) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.category == category)
    }
}

/// ABC 警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbcWarning {
    pub material_id: Option<String>,
    pub message: String,
    pub severity: WarningSeverity,
}

impl AbcWarning {
    pub fn new(material_id: Option<String>, message: String, severity: WarningSeverity) -> Self {
        Self {
            material_id,
            message,
            severity,
        }
    }

    pub fn warning(material_id: Option<String>, message: String) -> Self {
        Self::new(material_id, message, WarningSeverity::Warning)
    }

    pub fn error(material_id: Option<String>, message: String) -> Self {
        Self::new(material_id, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    Warning,
    Error,
}

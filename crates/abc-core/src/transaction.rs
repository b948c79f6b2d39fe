//! 庫存異動明細模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單筆庫存異動（匯出檔中的一列）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    /// 物料ID（分組鍵，不做大小寫或空白正規化）
    pub material_id: String,

    /// 物料描述
    pub material_description: Option<String>,

    /// 數量（可為負，例如出庫）
    pub quantity: Decimal,

    /// 本幣金額（Amount in LC）
    pub amount: Decimal,

    /// 評價類型
    pub valuation_type: Option<String>,

    /// 過帳日期
    pub posting_date: Option<NaiveDate>,
}

impl TransactionRow {
    /// 創建新的異動明細
    pub fn new(
        material_id: impl Into<String>,
        material_description: Option<String>,
        quantity: Decimal,
        amount: Decimal,
    ) -> Self {
        Self {
            material_id: material_id.into(),
            material_description,
            quantity,
            amount,
            valuation_type: None,
            posting_date: None,
        }
    }

    /// 建構器模式：設置描述
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.material_description = Some(description.into());
        self
    }

    /// 建構器模式：設置評價類型
    pub fn with_valuation_type(mut self, valuation_type: impl Into<String>) -> Self {
        self.valuation_type = Some(valuation_type.into());
        self
    }

    /// 建構器模式：設置過帳日期
    pub fn with_posting_date(mut self, posting_date: NaiveDate) -> Self {
        self.posting_date = Some(posting_date);
        self
    }

    /// 非空白的描述
    pub fn description(&self) -> Option<&str> {
        self.material_description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_row() {
        let row = TransactionRow::new("100234", None, Decimal::from(-5), Decimal::from(-1500))
            .with_description("Kabel NYY 4x16")
            .with_valuation_type("NORMAL")
            .with_posting_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        assert_eq!(row.material_id, "100234");
        assert_eq!(row.description(), Some("Kabel NYY 4x16"));
        assert_eq!(row.quantity, Decimal::from(-5));
        assert_eq!(row.valuation_type.as_deref(), Some("NORMAL"));
        assert!(row.posting_date.is_some());
    }

    #[test]
    fn test_blank_description_is_none() {
        let row = TransactionRow::new("M-1", Some("   ".to_string()), Decimal::ONE, Decimal::ONE);
        assert_eq!(row.description(), None);
    }
}

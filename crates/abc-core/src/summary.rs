//! 彙總結果模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::AbcCategory;

/// 單一物料彙總
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSummary {
    /// 物料ID
    pub material_id: String,

    /// 首個非空描述
    pub description: Option<String>,

    /// 數量合計
    pub total_quantity: Decimal,

    /// 金額合計
    pub total_value: Decimal,
}

impl MaterialSummary {
    pub fn new(material_id: impl Into<String>, description: Option<String>) -> Self {
        Self {
            material_id: material_id.into(),
            description,
            total_quantity: Decimal::ZERO,
            total_value: Decimal::ZERO,
        }
    }
}

/// 排序後並帶累積值的物料彙總
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSummary {
    #[serde(flatten)]
    pub summary: MaterialSummary,

    /// 排名（從 1 開始）
    pub rank: usize,

    /// 累積金額
    pub cumulative_value: Decimal,

    /// 累積百分比
    ///
    /// `None` 表示總價值為零，百分比無定義。
    pub cumulative_percentage: Option<Decimal>,
}

impl RankedSummary {
    /// 百分比是否有定義
    pub fn is_percentage_defined(&self) -> bool {
        self.cumulative_percentage.is_some()
    }
}

/// 已分類的物料彙總
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedSummary {
    #[serde(flatten)]
    pub ranked: RankedSummary,

    /// ABC 類別
    pub category: AbcCategory,
}

impl CategorizedSummary {
    pub fn material_id(&self) -> &str {
        &self.ranked.summary.material_id
    }

    pub fn total_value(&self) -> Decimal {
        self.ranked.summary.total_value
    }

    pub fn total_quantity(&self) -> Decimal {
        self.ranked.summary.total_quantity
    }

    pub fn cumulative_percentage(&self) -> Option<Decimal> {
        self.ranked.cumulative_percentage
    }
}

/// 類別層級彙總
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// 類別
    pub category: AbcCategory,

    /// 物料數（不重複物料ID）
    pub item_count: usize,

    /// 數量合計
    pub total_quantity: Decimal,

    /// 金額合計
    pub total_value: Decimal,

    /// 金額佔總價值百分比（總價值為零時為 `None`）
    pub percentage_of_total_value: Option<Decimal>,

    /// 物料數佔比（未啟用時為 `None`）
    pub percentage_of_item_count: Option<Decimal>,

    /// 數量佔總數量百分比（未啟用或總數量為零時為 `None`）
    pub percentage_of_quantity: Option<Decimal>,
}

impl CategorySummary {
    /// 創建空的類別彙總
    pub fn empty(category: AbcCategory) -> Self {
        Self {
            category,
            item_count: 0,
            total_quantity: Decimal::ZERO,
            total_value: Decimal::ZERO,
            percentage_of_total_value: None,
            percentage_of_item_count: None,
            percentage_of_quantity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorized_accessors() {
        let mut summary = MaterialSummary::new("M-1", Some("Trafo".to_string()));
        summary.total_value = Decimal::from(700);
        summary.total_quantity = Decimal::from(3);

        let item = CategorizedSummary {
            ranked: RankedSummary {
                summary,
                rank: 1,
                cumulative_value: Decimal::from(700),
                cumulative_percentage: Some(Decimal::from(70)),
            },
            category: AbcCategory::A,
        };

        assert_eq!(item.material_id(), "M-1");
        assert_eq!(item.total_value(), Decimal::from(700));
        assert_eq!(item.total_quantity(), Decimal::from(3));
        assert_eq!(item.cumulative_percentage(), Some(Decimal::from(70)));
        assert!(item.ranked.is_percentage_defined());
    }

    #[test]
    fn test_serialize_flattens_nested_rows() {
        let item = CategorizedSummary {
            ranked: RankedSummary {
                summary: MaterialSummary::new("M-9", None),
                rank: 3,
                cumulative_value: Decimal::ZERO,
                cumulative_percentage: None,
            },
            category: AbcCategory::C,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["material_id"], "M-9");
        assert_eq!(json["category"], "C");
        assert!(json["cumulative_percentage"].is_null());
    }
}

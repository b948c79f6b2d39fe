//! ABC 分析配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AbcError, Result};

/// 累積百分比門檻（上界含等於）
///
/// 累積百分比 `<= boundary_ab` 為 A 類，`<= boundary_bc` 為 B 類，其餘為 C 類。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// A/B 分界（%）
    pub boundary_ab: Decimal,

    /// B/C 分界（%）
    pub boundary_bc: Decimal,
}

impl Thresholds {
    /// 創建並驗證門檻
    pub fn new(boundary_ab: Decimal, boundary_bc: Decimal) -> Result<Self> {
        let thresholds = Self {
            boundary_ab,
            boundary_bc,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// 70 / 90 預設組合
    pub fn preset_70_90() -> Self {
        Self {
            boundary_ab: Decimal::from(70),
            boundary_bc: Decimal::from(90),
        }
    }

    /// 80 / 95 預設組合
    pub fn preset_80_95() -> Self {
        Self {
            boundary_ab: Decimal::from(80),
            boundary_bc: Decimal::from(95),
        }
    }

    /// 檢查 `0 < boundary_ab < boundary_bc <= 100`
    pub fn validate(&self) -> Result<()> {
        let valid = self.boundary_ab > Decimal::ZERO
            && self.boundary_ab < self.boundary_bc
            && self.boundary_bc <= Decimal::ONE_HUNDRED;

        if valid {
            Ok(())
        } else {
            Err(AbcError::InvalidThreshold {
                boundary_ab: self.boundary_ab,
                boundary_bc: self.boundary_bc,
            })
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::preset_70_90()
    }
}

/// 總價值為零時的處理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroTotalPolicy {
    /// 百分比標記為未定義，所有物料歸入 C 類
    #[default]
    AllC,
    /// 直接回傳 `AbcError::ZeroTotalValue`
    Fail,
}

/// 類別彙總的選用欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryColumns {
    /// 計算物料數佔比
    pub item_count_percentage: bool,

    /// 計算數量佔比
    pub quantity_percentage: bool,
}

impl Default for SummaryColumns {
    fn default() -> Self {
        Self {
            item_count_percentage: true,
            quantity_percentage: true,
        }
    }
}

/// ABC 分析參數配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbcConfig {
    /// 分類門檻
    pub thresholds: Thresholds,

    /// 總價值為零時的策略
    pub zero_total_policy: ZeroTotalPolicy,

    /// 彙總選用欄位
    pub summary_columns: SummaryColumns,

    /// 是否輸出沒有物料的類別（以零值列出）
    pub report_empty_categories: bool,
}

impl AbcConfig {
    /// 創建新的配置
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            ..Self::default()
        }
    }

    /// 從 JSON 字串讀取配置
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AbcError::Other(format!("配置解析失敗: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置門檻
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// 建構器模式：設置零總值策略
    pub fn with_zero_total_policy(mut self, policy: ZeroTotalPolicy) -> Self {
        self.zero_total_policy = policy;
        self
    }

    /// 建構器模式：設置彙總欄位
    pub fn with_summary_columns(mut self, columns: SummaryColumns) -> Self {
        self.summary_columns = columns;
        self
    }

    /// 建構器模式：是否輸出空類別
    pub fn with_report_empty_categories(mut self, report: bool) -> Self {
        self.report_empty_categories = report;
        self
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_config() {
        let config = AbcConfig::default();

        assert_eq!(config.thresholds, Thresholds::preset_70_90());
        assert_eq!(config.zero_total_policy, ZeroTotalPolicy::AllC);
        assert!(config.summary_columns.item_count_percentage);
        assert!(!config.report_empty_categories);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = AbcConfig::new(Thresholds::preset_80_95())
            .with_zero_total_policy(ZeroTotalPolicy::Fail)
            .with_summary_columns(SummaryColumns {
                item_count_percentage: false,
                quantity_percentage: true,
            })
            .with_report_empty_categories(true);

        assert_eq!(config.thresholds.boundary_ab, Decimal::from(80));
        assert_eq!(config.thresholds.boundary_bc, Decimal::from(95));
        assert_eq!(config.zero_total_policy, ZeroTotalPolicy::Fail);
        assert!(!config.summary_columns.item_count_percentage);
        assert!(config.report_empty_categories);
    }

    #[rstest]
    #[case(70, 90)]
    #[case(80, 95)]
    #[case(1, 100)]
    fn test_valid_thresholds(#[case] ab: i64, #[case] bc: i64) {
        assert!(Thresholds::new(Decimal::from(ab), Decimal::from(bc)).is_ok());
    }

    #[rstest]
    #[case(0, 90)]
    #[case(-5, 90)]
    #[case(90, 90)]
    #[case(95, 80)]
    #[case(70, 101)]
    fn test_invalid_thresholds(#[case] ab: i64, #[case] bc: i64) {
        let err = Thresholds::new(Decimal::from(ab), Decimal::from(bc)).unwrap_err();
        assert!(matches!(err, AbcError::InvalidThreshold { .. }));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "thresholds": { "boundary_ab": "80", "boundary_bc": "95" },
            "zero_total_policy": "fail"
        }"#;
        let config = AbcConfig::from_json_str(json).unwrap();

        assert_eq!(config.thresholds, Thresholds::preset_80_95());
        assert_eq!(config.zero_total_policy, ZeroTotalPolicy::Fail);
        // 未指定的欄位使用預設值
        assert!(config.summary_columns.quantity_percentage);
    }

    #[test]
    fn test_from_json_rejects_bad_thresholds() {
        let json = r#"{ "thresholds": { "boundary_ab": "95", "boundary_bc": "80" } }"#;
        assert!(matches!(
            AbcConfig::from_json_str(json),
            Err(AbcError::InvalidThreshold { .. })
        ));
    }
}

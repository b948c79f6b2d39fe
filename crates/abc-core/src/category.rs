//! ABC 類別

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::Thresholds;

/// ABC 類別
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbcCategory {
    /// 高價值少數物料
    A,
    /// 中間層
    B,
    /// 低價值多數物料
    C,
}

impl AbcCategory {
    /// 全部類別（依字母順序）
    pub const ALL: [AbcCategory; 3] = [AbcCategory::A, AbcCategory::B, AbcCategory::C];

    /// 依累積百分比分類
    ///
    /// 門檻為含等於的上界：恰好落在 `boundary_ab` 的物料屬於 A，
    /// 恰好落在 `boundary_bc` 的屬於 B。
    pub fn from_cumulative_percentage(cumulative_percentage: Decimal, thresholds: &Thresholds) -> Self {
        if cumulative_percentage <= thresholds.boundary_ab {
            AbcCategory::A
        } else if cumulative_percentage <= thresholds.boundary_bc {
            AbcCategory::B
        } else {
            AbcCategory::C
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AbcCategory::A => "A",
            AbcCategory::B => "B",
            AbcCategory::C => "C",
        }
    }
}

impl fmt::Display for AbcCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! ABC 分類

use abc_core::{
    AbcCategory, AbcError, CategorizedSummary, RankedSummary, Result, Thresholds, ZeroTotalPolicy,
};

/// ABC 分類器
pub struct Classifier;

impl Classifier {
    /// 依累積百分比為每列指派類別
    ///
    /// 門檻在處理任何一列之前驗證。累積百分比未定義（總價值為零）時，
    /// 依 `policy` 全數歸入 C 類或回傳 `ZeroTotalValue`。
    pub fn classify(
        ranked: Vec<RankedSummary>,
        thresholds: &Thresholds,
        policy: ZeroTotalPolicy,
    ) -> Result<Vec<CategorizedSummary>> {
        thresholds.validate()?;

        ranked
            .into_iter()
            .map(|row| {
                let category = match row.cumulative_percentage {
                    Some(pct) => AbcCategory::from_cumulative_percentage(pct, thresholds),
                    None => match policy {
                        ZeroTotalPolicy::AllC => AbcCategory::C,
                        ZeroTotalPolicy::Fail => return Err(AbcError::ZeroTotalValue),
                    },
                };
                Ok(CategorizedSummary {
                    ranked: row,
                    category,
                })
            })
            .collect()
    }
}

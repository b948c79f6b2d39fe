//! 價值排序與累積百分比

use abc_core::{AbcError, MaterialSummary, RankedSummary, Result};
use rust_decimal::Decimal;

/// 排序與累積計算器
pub struct Ranker;

impl Ranker {
    /// 依總價值由高到低排序，並計算累積值與累積百分比
    ///
    /// 排序為穩定排序，同值物料保留輸入順序。總價值為零時，
    /// 每列的 `cumulative_percentage` 皆為 `None`。
    pub fn rank(mut summaries: Vec<MaterialSummary>) -> Result<Vec<RankedSummary>> {
        summaries.sort_by(|a, b| b.total_value.cmp(&a.total_value));

        let grand_total = Self::grand_total(&summaries)?;
        let mut cumulative = Decimal::ZERO;
        let mut ranked = Vec::with_capacity(summaries.len());

        for (i, summary) in summaries.into_iter().enumerate() {
            cumulative = cumulative
                .checked_add(summary.total_value)
                .ok_or_else(|| AbcError::CalculationError("累積金額溢位".to_string()))?;

            let cumulative_percentage = percentage_of(cumulative, grand_total)?;

            ranked.push(RankedSummary {
                summary,
                rank: i + 1,
                cumulative_value: cumulative,
                cumulative_percentage,
            });
        }

        Ok(ranked)
    }

    /// 所有物料的總價值
    pub fn grand_total(summaries: &[MaterialSummary]) -> Result<Decimal> {
        summaries.iter().try_fold(Decimal::ZERO, |acc, s| {
            acc.checked_add(s.total_value)
                .ok_or_else(|| AbcError::CalculationError("總價值溢位".to_string()))
        })
    }

    /// 全部物料的數量合計
    pub fn grand_total_quantity(summaries: &[MaterialSummary]) -> Result<Decimal> {
        summaries.iter().try_fold(Decimal::ZERO, |acc, s| {
            acc.checked_add(s.total_quantity)
                .ok_or_else(|| AbcError::CalculationError("總數量溢位".to_string()))
        })
    }
}

/// `100 * part / total`；`total` 為零時回傳 `None`
pub(crate) fn percentage_of(part: Decimal, total: Decimal) -> Result<Option<Decimal>> {
    if total.is_zero() {
        return Ok(None);
    }
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(total))
        .map(Some)
        .ok_or_else(|| AbcError::CalculationError(format!("百分比計算溢位: {} / {}", part, total)))
}

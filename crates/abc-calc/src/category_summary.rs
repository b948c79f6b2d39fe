//! 類別彙總

use std::collections::HashSet;

use abc_core::{
    AbcCategory, AbcError, CategorizedSummary, CategorySummary, Result, SummaryColumns,
};
use rust_decimal::Decimal;

use crate::ranking::percentage_of;

/// 類別彙總計算器
pub struct CategorySummarizer;

impl CategorySummarizer {
    /// 依類別彙總物料數、數量與金額
    ///
    /// 輸出依 A、B、C 排列。沒有物料的類別預設省略，
    /// `report_empty` 為 true 時以零值列出。
    pub fn summarize(
        categorized: &[CategorizedSummary],
        columns: &SummaryColumns,
        report_empty: bool,
    ) -> Result<Vec<CategorySummary>> {
        let grand_total_value = sum(categorized.iter().map(|c| c.total_value()))?;
        let grand_total_quantity = sum(categorized.iter().map(|c| c.total_quantity()))?;
        let total_materials = categorized
            .iter()
            .map(|c| c.material_id())
            .collect::<HashSet<_>>()
            .len();

        let mut result = Vec::new();

        for category in AbcCategory::ALL {
            let members: Vec<&CategorizedSummary> =
                categorized.iter().filter(|c| c.category == category).collect();

            if members.is_empty() && !report_empty {
                continue;
            }

            let item_count = members
                .iter()
                .map(|c| c.material_id())
                .collect::<HashSet<_>>()
                .len();
            let total_quantity = sum(members.iter().map(|c| c.total_quantity()))?;
            let total_value = sum(members.iter().map(|c| c.total_value()))?;

            let percentage_of_item_count = if columns.item_count_percentage {
                percentage_of(Decimal::from(item_count), Decimal::from(total_materials))?
            } else {
                None
            };
            let percentage_of_quantity = if columns.quantity_percentage {
                percentage_of(total_quantity, grand_total_quantity)?
            } else {
                None
            };

            result.push(CategorySummary {
                category,
                item_count,
                total_quantity,
                total_value,
                percentage_of_total_value: percentage_of(total_value, grand_total_value)?,
                percentage_of_item_count,
                percentage_of_quantity,
            });
        }

        Ok(result)
    }
}

fn sum(values: impl Iterator<Item = Decimal>) -> Result<Decimal> {
    let mut total = Decimal::ZERO;
    for value in values {
        total = total
            .checked_add(value)
            .ok_or_else(|| AbcError::CalculationError("類別加總溢位".to_string()))?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classification::Classifier, ranking::Ranker};
    use abc_core::{MaterialSummary, Thresholds, ZeroTotalPolicy};

    fn categorized(values: &[(i64, i64)]) -> Vec<CategorizedSummary> {
        let summaries = values
            .iter()
            .enumerate()
            .map(|(i, (qty, value))| {
                let mut s = MaterialSummary::new(format!("M-{}", i + 1), None);
                s.total_quantity = Decimal::from(*qty);
                s.total_value = Decimal::from(*value);
                s
            })
            .collect();
        Classifier::classify(
            Ranker::rank(summaries).unwrap(),
            &Thresholds::preset_70_90(),
            ZeroTotalPolicy::AllC,
        )
        .unwrap()
    }

    #[test]
    fn test_summary_per_category() {
        let items = categorized(&[(1, 700), (4, 200), (5, 100)]);
        let summary =
            CategorySummarizer::summarize(&items, &SummaryColumns::default(), false).unwrap();

        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].category, AbcCategory::A);
        assert_eq!(summary[0].item_count, 1);
        assert_eq!(summary[0].total_value, Decimal::from(700));
        assert_eq!(summary[0].percentage_of_total_value, Some(Decimal::from(70)));
        assert_eq!(summary[1].percentage_of_quantity, Some(Decimal::from(40)));
        assert_eq!(summary[2].total_quantity, Decimal::from(5));
    }

    #[test]
    fn test_totals_reconcile() {
        let items = categorized(&[(1, 620), (2, 130), (3, 90), (4, 80), (5, 50), (6, 30)]);
        let summary =
            CategorySummarizer::summarize(&items, &SummaryColumns::default(), false).unwrap();

        let value: Decimal = summary.iter().map(|s| s.total_value).sum();
        let count: usize = summary.iter().map(|s| s.item_count).sum();
        let value_pct: Decimal = summary
            .iter()
            .filter_map(|s| s.percentage_of_total_value)
            .sum();

        assert_eq!(value, Decimal::from(1000));
        assert_eq!(count, 6);
        assert_eq!(value_pct, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_empty_categories_omitted_by_default() {
        // 單一物料累積 100% -> 只有 C
        let items = categorized(&[(1, 500)]);
        let summary =
            CategorySummarizer::summarize(&items, &SummaryColumns::default(), false).unwrap();

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].category, AbcCategory::C);
    }

    #[test]
    fn test_empty_categories_reported_as_zero() {
        let items = categorized(&[(1, 500)]);
        let summary =
            CategorySummarizer::summarize(&items, &SummaryColumns::default(), true).unwrap();

        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].item_count, 0);
        assert_eq!(summary[0].total_value, Decimal::ZERO);
        assert_eq!(summary[0].percentage_of_total_value, Some(Decimal::ZERO));
    }

    #[test]
    fn test_optional_columns_disabled() {
        let items = categorized(&[(1, 700), (1, 300)]);
        let columns = SummaryColumns {
            item_count_percentage: false,
            quantity_percentage: false,
        };
        let summary = CategorySummarizer::summarize(&items, &columns, false).unwrap();

        assert!(summary.iter().all(|s| s.percentage_of_item_count.is_none()));
        assert!(summary.iter().all(|s| s.percentage_of_quantity.is_none()));
        assert!(summary.iter().all(|s| s.percentage_of_total_value.is_some()));
    }

    #[test]
    fn test_zero_total_value() {
        let items = categorized(&[(1, 0), (2, 0)]);
        let summary =
            CategorySummarizer::summarize(&items, &SummaryColumns::default(), false).unwrap();

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].category, AbcCategory::C);
        assert_eq!(summary[0].item_count, 2);
        assert_eq!(summary[0].percentage_of_total_value, None);
        assert_eq!(summary[0].percentage_of_item_count, Some(Decimal::ONE_HUNDRED));
    }

    #[test]
    fn test_summarize_empty() {
        let summary = CategorySummarizer::summarize(&[], &SummaryColumns::default(), false).unwrap();
        assert!(summary.is_empty());
    }
}

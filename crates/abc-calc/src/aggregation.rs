//! 物料彙總

use std::collections::HashMap;

use abc_core::{AbcError, MaterialSummary, RawTable, Result, TransactionRow};
use rust_decimal::Decimal;

/// 物料彙總計算器
pub struct Aggregator;

impl Aggregator {
    /// 依物料ID分組加總
    ///
    /// 物料ID精確比對；描述取該物料第一個非空描述。
    /// 輸出依物料首次出現的順序排列。加總溢位時回傳 `CalculationError`。
    pub fn aggregate(rows: &[TransactionRow]) -> Result<Vec<MaterialSummary>> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut summaries: Vec<MaterialSummary> = Vec::new();

        for row in rows {
            let idx = *positions.entry(row.material_id.as_str()).or_insert_with(|| {
                summaries.push(MaterialSummary::new(row.material_id.clone(), None));
                summaries.len() - 1
            });

            let summary = &mut summaries[idx];
            if summary.description.is_none() {
                summary.description = row.description().map(str::to_string);
            }
            summary.total_quantity = checked_sum(summary.total_quantity, row.quantity, &row.material_id)?;
            summary.total_value = checked_sum(summary.total_value, row.amount, &row.material_id)?;
        }

        Ok(summaries)
    }

    /// 從原始表格彙總（缺少必要欄位時失敗）
    pub fn aggregate_table(table: &RawTable) -> Result<Vec<MaterialSummary>> {
        let rows = table.transaction_rows()?;
        Self::aggregate(&rows)
    }

    /// 找出描述不一致的物料（依首次出現順序）
    pub fn description_conflicts(rows: &[TransactionRow]) -> Vec<String> {
        let mut first_seen: HashMap<&str, &str> = HashMap::new();
        let mut conflicts: Vec<String> = Vec::new();

        for row in rows {
            let Some(description) = row.description() else {
                continue;
            };
            match first_seen.get(row.material_id.as_str()) {
                None => {
                    first_seen.insert(row.material_id.as_str(), description);
                }
                Some(&first) if first != description => {
                    if !conflicts.contains(&row.material_id) {
                        conflicts.push(row.material_id.clone());
                    }
                }
                Some(_) => {}
            }
        }

        conflicts
    }
}

fn checked_sum(total: Decimal, value: Decimal, material_id: &str) -> Result<Decimal> {
    total
        .checked_add(value)
        .ok_or_else(|| AbcError::CalculationError(format!("物料 {} 加總溢位", material_id)))
}

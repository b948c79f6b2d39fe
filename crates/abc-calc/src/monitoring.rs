//! 庫存監控彙總
//!
//! 出庫總量、總金額、依評價類型/日期的數量分布、金額前 N 名與異動最多的物料。
//! 只產出資料，不負責圖表。

use std::collections::{BTreeMap, HashMap};

use abc_core::{AbcError, Result, TransactionRow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// 整體概況
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryOverview {
    /// 數量合計（出庫為負）
    pub total_quantity: Decimal,
    /// 金額合計
    pub total_value: Decimal,
    /// 明細筆數
    pub row_count: usize,
    /// 不重複物料數
    pub material_count: usize,
}

/// 依描述分組的金額排名
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialValue {
    pub description: String,
    pub total_value: Decimal,
}

/// 依物料分組的異動量排名
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialMovement {
    pub material_id: String,
    pub description: Option<String>,
    /// 淨數量的絕對值
    pub moved_quantity: Decimal,
}

pub fn overview(rows: &[TransactionRow]) -> Result<InventoryOverview> {
    let material_count = rows
        .iter()
        .map(|r| r.material_id.as_str())
        .collect::<std::collections::HashSet<_>>()
        .len();

    Ok(InventoryOverview {
        total_quantity: checked_total(rows.iter().map(|r| r.quantity))?,
        total_value: checked_total(rows.iter().map(|r| r.amount))?,
        row_count: rows.len(),
        material_count,
    })
}

/// 依評價類型加總數量，由小到大排序；沒有評價類型的列略過
pub fn quantity_by_valuation_type(rows: &[TransactionRow]) -> Result<Vec<(String, Decimal)>> {
    let mut totals = grouped(
        rows.iter()
            .filter_map(|r| r.valuation_type.as_ref().map(|v| (v.clone(), r.quantity))),
    )?;
    totals.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(totals)
}

/// 依描述加總金額，取前 `n` 名；沒有描述的列以物料ID分組
pub fn top_materials_by_value(rows: &[TransactionRow], n: usize) -> Result<Vec<MaterialValue>> {
    let mut totals = grouped(rows.iter().map(|r| {
        let key = r.description().unwrap_or(r.material_id.as_str()).to_string();
        (key, r.amount)
    }))?;
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(totals
        .into_iter()
        .take(n)
        .map(|(description, total_value)| MaterialValue {
            description,
            total_value,
        })
        .collect())
}

/// 依過帳日期加總數量（日期遞增）；沒有日期的列略過
pub fn quantity_by_posting_date(rows: &[TransactionRow]) -> Result<Vec<(NaiveDate, Decimal)>> {
    let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for row in rows {
        if let Some(date) = row.posting_date {
            let total = totals.entry(date).or_default();
            *total = add(*total, row.quantity)?;
        }
    }
    Ok(totals.into_iter().collect())
}

/// 依物料淨數量絕對值排序，取前 `n` 名
pub fn most_moved_materials(rows: &[TransactionRow], n: usize) -> Result<Vec<MaterialMovement>> {
    let mut descriptions: HashMap<&str, &str> = HashMap::new();
    for row in rows {
        if let Some(description) = row.description() {
            descriptions.entry(row.material_id.as_str()).or_insert(description);
        }
    }

    let mut totals = grouped(rows.iter().map(|r| (r.material_id.clone(), r.quantity)))?;
    for entry in totals.iter_mut() {
        entry.1 = entry.1.abs();
    }
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(totals
        .into_iter()
        .take(n)
        .map(|(material_id, moved_quantity)| MaterialMovement {
            description: descriptions.get(material_id.as_str()).map(|d| d.to_string()),
            material_id,
            moved_quantity,
        })
        .collect())
}

/// 依鍵加總並保留首次出現順序
fn grouped(pairs: impl Iterator<Item = (String, Decimal)>) -> Result<Vec<(String, Decimal)>> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<(String, Decimal)> = Vec::new();

    for (key, value) in pairs {
        match positions.get(&key) {
            Some(&idx) => totals[idx].1 = add(totals[idx].1, value)?,
            None => {
                positions.insert(key.clone(), totals.len());
                totals.push((key, value));
            }
        }
    }

    Ok(totals)
}

fn checked_total(mut values: impl Iterator<Item = Decimal>) -> Result<Decimal> {
    values.try_fold(Decimal::ZERO, add)
}

fn add(total: Decimal, value: Decimal) -> Result<Decimal> {
    total
        .checked_add(value)
        .ok_or_else(|| AbcError::CalculationError("監控彙總溢位".to_string()))
}

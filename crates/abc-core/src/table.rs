//! 原始表格模型與欄位擷取

use chrono::{Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::TransactionRow;
use crate::{AbcError, Result};

pub const COL_MATERIAL: &str = "Material";
pub const COL_DESCRIPTION: &str = "Material Description";
pub const COL_QUANTITY: &str = "Quantity";
pub const COL_AMOUNT: &str = "Amount in LC";
pub const COL_VALUATION_TYPE: &str = "Valuation Type";
pub const COL_POSTING_DATE: &str = "Posting Date";

/// 必要欄位
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_MATERIAL, COL_DESCRIPTION, COL_QUANTITY, COL_AMOUNT];

static EMPTY_CELL: Cell = Cell::Empty;

/// 儲存格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Text(String),
    Number(Decimal),
    Date(NaiveDate),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Date(d) => d.to_string(),
        }
    }
}

/// 記憶體中的原始表格（首列為欄名）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// 必要與選用欄位的位置
struct ColumnIndex {
    material: usize,
    description: usize,
    quantity: usize,
    amount: usize,
    valuation_type: Option<usize>,
    posting_date: Option<usize>,
}

impl RawTable {
    /// 創建新的表格
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    /// 欄位位置（欄名前後空白不計）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.trim() == name)
    }

    /// 檢查必要欄位
    pub fn check_required_columns(&self) -> Result<()> {
        for name in REQUIRED_COLUMNS {
            if self.column_index(name).is_none() {
                return Err(AbcError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }

    fn resolve_columns(&self) -> Result<ColumnIndex> {
        let required = |name: &str| {
            self.column_index(name)
                .ok_or_else(|| AbcError::MissingColumn(name.to_string()))
        };

        Ok(ColumnIndex {
            material: required(COL_MATERIAL)?,
            description: required(COL_DESCRIPTION)?,
            quantity: required(COL_QUANTITY)?,
            amount: required(COL_AMOUNT)?,
            valuation_type: self.column_index(COL_VALUATION_TYPE),
            posting_date: self.column_index(COL_POSTING_DATE),
        })
    }

    /// 轉換為異動明細
    ///
    /// 缺少必要欄位時整批失敗，不回傳部分結果。完全空白的列會被略過。
    pub fn transaction_rows(&self) -> Result<Vec<TransactionRow>> {
        let index = self.resolve_columns()?;
        let mut rows = Vec::with_capacity(self.rows.len());

        for (i, cells) in self.rows.iter().enumerate() {
            if cells.iter().all(Cell::is_empty) {
                continue;
            }
            // 報錯時的列號以檔案為準（第 1 列為表頭）
            let line = i + 2;
            let cell = |idx: usize| cells.get(idx).unwrap_or(&EMPTY_CELL);

            let material_id = material_id(cell(index.material)).ok_or_else(|| {
                AbcError::InvalidCell {
                    row: line,
                    column: COL_MATERIAL.to_string(),
                    value: cell(index.material).display(),
                }
            })?;

            let mut row = TransactionRow::new(
                material_id,
                text(cell(index.description)),
                number(cell(index.quantity), line, COL_QUANTITY)?,
                number(cell(index.amount), line, COL_AMOUNT)?,
            );

            if let Some(idx) = index.valuation_type {
                row.valuation_type = text(cell(idx));
            }
            if let Some(idx) = index.posting_date {
                row.posting_date = date(cell(idx), line)?;
            }

            rows.push(row);
        }

        Ok(rows)
    }
}

fn material_id(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        // Excel 常把物料號存成數字，例如 100234.0
        Cell::Number(n) => Some(n.normalize().to_string()),
        _ => None,
    }
}

fn text(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Text(s) if s.trim().is_empty() => None,
        Cell::Text(s) => Some(s.trim().to_string()),
        other => Some(other.display()),
    }
}

fn number(cell: &Cell, line: usize, column: &str) -> Result<Decimal> {
    match cell {
        Cell::Number(n) => Ok(*n),
        Cell::Empty => Ok(Decimal::ZERO),
        Cell::Text(s) if s.trim().is_empty() => Ok(Decimal::ZERO),
        Cell::Text(s) => parse_decimal(s).ok_or_else(|| AbcError::InvalidCell {
            row: line,
            column: column.to_string(),
            value: s.clone(),
        }),
        Cell::Date(d) => Err(AbcError::InvalidCell {
            row: line,
            column: column.to_string(),
            value: d.to_string(),
        }),
    }
}

fn date(cell: &Cell, line: usize) -> Result<Option<NaiveDate>> {
    let invalid = |value: String| AbcError::InvalidCell {
        row: line,
        column: COL_POSTING_DATE.to_string(),
        value,
    };

    match cell {
        Cell::Empty => Ok(None),
        Cell::Date(d) => Ok(Some(*d)),
        Cell::Number(n) => n
            .to_f64()
            .and_then(excel_serial_to_date)
            .map(Some)
            .ok_or_else(|| invalid(n.to_string())),
        Cell::Text(s) if s.trim().is_empty() => Ok(None),
        Cell::Text(s) => parse_date(s).map(Some).ok_or_else(|| invalid(s.clone())),
    }
}

/// 解析數值文字（允許千分位逗號與科學記號）
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(&cleaned).ok())
}

/// 解析日期文字：`YYYY-MM-DD`、`DD.MM.YYYY`、`MM/DD/YYYY`，可帶時間部分
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.split([' ', 'T']).next().unwrap_or(trimmed);

    ["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Excel 可表示的最後一天（9999-12-31）
const EXCEL_MAX_SERIAL: f64 = 2_958_465.0;

/// Excel 序列日期轉換（1900 日期系統），超出 Excel 範圍時回傳 `None`
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !(1.0..=EXCEL_MAX_SERIAL).contains(&serial) {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(Duration::try_days(serial.trunc() as i64)?)
}

//! Excel / ODS 讀取

use std::path::Path;

use abc_core::table::excel_serial_to_date;
use abc_core::{Cell, RawTable};
use calamine::{Data, Reader};
use rust_decimal::Decimal;

use crate::{LoadError, Result};

/// 讀取活頁簿的第一個工作表（首列為欄名）
pub fn load_workbook(path: &Path) -> Result<RawTable> {
    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| LoadError::Workbook(format!("無法開啟 {}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::EmptyWorkbook(path.display().to_string()))?
        .map_err(|e| LoadError::Workbook(e.to_string()))?;

    let mut iter = range.rows();
    let columns: Vec<String> = match iter.next() {
        Some(header) => header.iter().map(header_name).collect(),
        None => Vec::new(),
    };
    let rows: Vec<Vec<Cell>> = iter.map(|row| row.iter().map(to_cell).collect()).collect();

    tracing::debug!("工作表讀取完成：{} 列", rows.len());
    Ok(RawTable::new(columns, rows))
}

fn header_name(data: &Data) -> String {
    match data {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// 工作表儲存格轉換
pub(crate) fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(Decimal::from(*i)),
        Data::Float(f) => Decimal::try_from(*f)
            .map(Cell::Number)
            .unwrap_or_else(|_| Cell::Text(f.to_string())),
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64())
            .map(Cell::Date)
            .unwrap_or(Cell::Empty),
        Data::DateTimeIso(s) => abc_core::table::parse_date(s)
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::Text(s.clone())),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

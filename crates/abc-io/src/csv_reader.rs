//! CSV 讀取

use std::io::Read;

use abc_core::{Cell, RawTable};

use crate::Result;

/// 從任意 reader 讀取 CSV（首列為欄名）
pub fn load_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(to_cell).collect());
    }

    Ok(RawTable::new(columns, rows))
}

/// 一律保留為文字，數值與日期於擷取欄位時再解析（物料號前導零不會遺失）
fn to_cell(raw: &str) -> Cell {
    if raw.is_empty() {
        Cell::Empty
    } else {
        Cell::Text(raw.to_string())
    }
}

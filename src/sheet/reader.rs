//! ワークブック読み込み（calamine）

use super::{Cell, Table};
use crate::error::{OvdMatchError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::debug;

/// 1枚目のワークシートを表として読み込む
///
/// 先頭行をヘッダーとし、すべて空の行は読み飛ばす。
pub fn read_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(OvdMatchError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .unwrap_or_else(|| "Sheet1".to_string());

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| OvdMatchError::EmptySheet(path.display().to_string()))??;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| convert_cell(cell).as_text().trim().to_string())
            .collect(),
        None => return Err(OvdMatchError::EmptySheet(path.display().to_string())),
    };

    let mut table = Table::new(sheet_name, headers);
    for row in rows {
        let mut cells: Vec<Cell> = row.iter().map(convert_cell).collect();
        if cells.iter().all(Cell::is_blank) {
            continue;
        }
        cells.resize(table.headers.len().max(cells.len()), Cell::Empty);
        table.rows.push(cells);
    }

    debug!(
        path = %path.display(),
        sheet = %table.sheet_name,
        columns = table.headers.len(),
        rows = table.rows.len(),
        "workbook loaded"
    );

    Ok(table)
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        other => Cell::Text(other.to_string()),
    }
}

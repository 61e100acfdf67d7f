//! ワークブック書き出し（rust_xlsxwriter）

use super::{Cell, Table};
use crate::error::Result;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// 表を1枚のワークシートとして書き出す
///
/// 小数2桁の書式はスコア列の数値にだけ付ける。
pub fn write_table(table: &Table, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let score_format = Format::new().set_num_format("0.00");

    let worksheet = workbook.add_worksheet();
    if !table.sheet_name.is_empty() {
        worksheet.set_name(&table.sheet_name)?;
    }

    for (col, header) in table.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = row_idx as u32 + 1;
        for (col_idx, cell) in row.iter().enumerate() {
            let col = col_idx as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    worksheet.write_string(row_num, col, s)?;
                }
                Cell::Number(n) if table.is_score_column(col_idx) && n.fract() != 0.0 => {
                    worksheet.write_number_with_format(row_num, col, *n, &score_format)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row_num, col, *n)?;
                }
                Cell::Bool(b) => {
                    worksheet.write_boolean(row_num, col, *b)?;
                }
            }
        }
    }

    workbook.save(output_path)?;
    Ok(())
}

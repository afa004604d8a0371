//! `.xlsx` encoding of export workbooks.

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook as XlsxWorkbook;

use crate::backend::domain::export_service::{Cell, Workbook};

pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Encode every sheet of `workbook` into an in-memory `.xlsx` file
pub fn encode_xlsx(workbook: &Workbook) -> Result<Vec<u8>> {
    let mut xlsx = XlsxWorkbook::new();

    for sheet in &workbook.sheets {
        let worksheet = xlsx.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .with_context(|| format!("Invalid sheet name {}", sheet.name))?;

        for (col, width) in sheet.column_widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        for (row_index, row) in sheet.rows.iter().enumerate() {
            for (col_index, cell) in row.iter().enumerate() {
                let (row_num, col_num) = (row_index as u32, col_index as u16);
                match cell {
                    Cell::Text(text) => worksheet.write_string(row_num, col_num, text)?,
                    Cell::Number(number) => worksheet.write_number(row_num, col_num, *number)?,
                };
            }
        }
    }

    xlsx.save_to_buffer().context("Failed to encode workbook")
}

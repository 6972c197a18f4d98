use rust_xlsxwriter::{Format, Workbook};

use super::ExportError;
use crate::data::filter::FilteredView;
use crate::data::model::CellValue;

pub const SHEET_NAME: &str = "Relatório Filtrado";

/// The filtered rows as a plain table: source headers plus raw cells.
#[derive(Debug, Clone, PartialEq)]
pub struct TableExport {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl TableExport {
    pub fn from_view(view: &FilteredView<'_>) -> Self {
        TableExport {
            columns: view.dataset().columns.clone(),
            rows: view.rows().map(|row| row.cells.clone()).collect(),
        }
    }
}

/// Write the table to a single-sheet workbook with a bold header row.
/// Null cells are left empty; an empty table gives a header-only sheet.
pub fn write(table: &TableExport) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, column_index(col)?, name, &header_format)?;
    }

    for (i, cells) in table.rows.iter().enumerate() {
        let row = u32::try_from(i + 1).map_err(|_| ExportError::TooManyRows(table.rows.len()))?;
        for (col, value) in cells.iter().enumerate() {
            let col = column_index(col)?;
            match value {
                CellValue::String(s) | CellValue::Date(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                CellValue::Integer(v) => {
                    worksheet.write_number(row, col, *v as f64)?;
                }
                CellValue::Float(v) if v.is_finite() => {
                    worksheet.write_number(row, col, *v)?;
                }
                CellValue::Float(_) | CellValue::Null => {}
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row, col, *b)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn column_index(col: usize) -> Result<u16, ExportError> {
    u16::try_from(col).map_err(|_| ExportError::TooManyColumns(col + 1))
}

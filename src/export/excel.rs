//! Excel出力
//!
//! 元の列＋スキルごとの s_ / req_ / keys_ 列を1シートに書き出す。

use crate::error::{Result, VacancyError};
use crate::sheet::Sheet;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use vacancy_search_common::Annotation;

/// Excelセルの最大文字数
const MAX_CELL_CHARS: usize = 32_767;
/// Excelの最大列数
const MAX_COLUMNS: usize = 16_384;

/// 照合結果付きのシートを書き出す
pub fn write_annotated(
    sheet: &Sheet,
    annotation: &Annotation,
    output_path: &Path,
    sheet_name: &str,
) -> Result<()> {
    if annotation.row_count != sheet.rows.len() {
        return Err(VacancyError::ExcelGeneration(format!(
            "行数が一致しません（シート: {}, 照合結果: {}）",
            sheet.rows.len(),
            annotation.row_count
        )));
    }

    let extra_columns = annotation.column_names();
    let total_columns = sheet.columns.len() + extra_columns.len();
    if total_columns > MAX_COLUMNS {
        return Err(VacancyError::ExcelGeneration(format!(
            "列数がExcelの上限を超えています: {}",
            total_columns
        )));
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    // ヘッダー
    for (col, name) in sheet.columns.iter().chain(extra_columns.iter()).enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    let base = sheet.columns.len();
    for (index, row) in sheet.rows.iter().enumerate() {
        let excel_row = index as u32 + 1;

        for (col, value) in row.iter().enumerate() {
            if let Some(value) = value {
                write_text(worksheet, excel_row, col as u16, value)?;
            }
        }

        for (offset, m) in annotation.row(index).into_iter().enumerate() {
            let col = (base + offset * 3) as u16;
            worksheet.write_number(excel_row, col, f64::from(m.flag()))?;
            write_text(worksheet, excel_row, col + 1, &m.requirements_joined())?;
            write_text(worksheet, excel_row, col + 2, &m.keys_joined())?;
        }
    }

    workbook.save(output_path)?;
    Ok(())
}

fn write_text(worksheet: &mut Worksheet, row: u32, col: u16, value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    if value.chars().count() > MAX_CELL_CHARS {
        let truncated: String = value.chars().take(MAX_CELL_CHARS).collect();
        worksheet.write_string(row, col, &truncated)?;
    } else {
        worksheet.write_string(row, col, value)?;
    }
    Ok(())
}

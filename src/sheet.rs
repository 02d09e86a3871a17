//! ワークシート読み込み
//!
//! calamineでxlsx/xls/odsを読み、1行目をヘッダーとする表に変換する。

use crate::error::{Result, VacancyError};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::collections::HashSet;
use std::path::Path;
use vacancy_search_common::SkillTable;

/// ヘッダー付きの表（空セルはNone）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| {
            VacancyError::ColumnNotFound(format!("{}（シート: {}）", name, self.name))
        })
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }

    /// 列の値（空セルは空文字）
    pub fn column_text(&self, col: usize) -> Vec<String> {
        (0..self.rows.len())
            .map(|row| self.cell(row, col).unwrap_or_default().to_string())
            .collect()
    }

    /// 列の空でない値を上から順に取得
    pub fn non_empty_values(&self, col: usize) -> Vec<&str> {
        (0..self.rows.len())
            .filter_map(|row| self.cell(row, col))
            .filter(|v| !v.trim().is_empty())
            .collect()
    }

    /// 列を追加（既存なら上書き）して列番号を返す
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> usize {
        let col = match self.column_index(name) {
            Some(col) => col,
            None => {
                self.columns.push(name.to_string());
                self.columns.len() - 1
            }
        };
        for (row, value) in self.rows.iter_mut().zip(values) {
            if row.len() <= col {
                row.resize(col + 1, None);
            }
            row[col] = if value.is_empty() { None } else { Some(value) };
        }
        col
    }

    /// 完全に同じ行を除去（最初の出現を残す）し、除去件数を返す
    pub fn drop_duplicate_rows(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen: HashSet<Vec<Option<String>>> = HashSet::new();
        self.rows.retain(|row| seen.insert(row.clone()));
        before - self.rows.len()
    }

    pub fn into_skill_table(self) -> SkillTable {
        SkillTable {
            name: self.name,
            columns: self.columns,
            rows: self.rows,
        }
    }

    fn from_range(name: &str, range: &Range<Data>) -> Self {
        let mut iter = range.rows();
        let columns: Vec<String> = match iter.next() {
            Some(header) => header
                .iter()
                .enumerate()
                .map(|(i, cell)| cell_to_string(cell).unwrap_or_else(|| format!("column_{}", i + 1)))
                .collect(),
            None => Vec::new(),
        };

        let rows = iter
            .map(|row| {
                let mut cells: Vec<Option<String>> = row.iter().map(cell_to_string).collect();
                cells.resize(columns.len(), None);
                cells
            })
            .filter(|cells| cells.iter().any(|c| c.is_some()))
            .collect();

        Self {
            name: name.to_string(),
            columns,
            rows,
        }
    }
}

/// セル値を文字列化（整数値のFloatは小数点なし）
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        other => Some(other.to_string()),
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(VacancyError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

/// シートを1枚読み込む（名前省略時は先頭シート）
pub fn read_sheet(path: &Path, sheet_name: Option<&str>) -> Result<Sheet> {
    ensure_exists(path)?;
    let mut workbook = open_workbook_auto(path)?;

    let name = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| VacancyError::SheetNotFound(path.display().to_string()))?,
    };

    if !workbook.sheet_names().contains(&name) {
        return Err(VacancyError::SheetNotFound(format!(
            "{}（{}）",
            name,
            path.display()
        )));
    }

    let range = workbook.worksheet_range(&name)?;
    Ok(Sheet::from_range(&name, &range))
}

/// 全シートをブック内の順で読み込む
pub fn read_all_sheets(path: &Path) -> Result<Vec<Sheet>> {
    ensure_exists(path)?;
    let mut workbook = open_workbook_auto(path)?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        sheets.push(Sheet::from_range(&name, &range));
    }
    Ok(sheets)
}

/// シート名を指定して読み込む（存在しなければNone）
pub fn read_optional_sheet(path: &Path, sheet_name: &str) -> Result<Option<Sheet>> {
    ensure_exists(path)?;
    let mut workbook = open_workbook_auto(path)?;
    if !workbook.sheet_names().iter().any(|n| n == sheet_name) {
        return Ok(None);
    }
    let range = workbook.worksheet_range(sheet_name)?;
    Ok(Some(Sheet::from_range(sheet_name, &range)))
}

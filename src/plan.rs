//! Plan spreadsheet ingestion
//!
//! First worksheet, header row first. The `dia` column carries the day
//! number; every later column named after a catalog class carries the
//! expected quantity for that class.

use crate::error::{InventoryError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use inventario_common::{class_id, DayPlanRow, ExpectedCount};
use std::path::Path;

pub const DAY_COLUMN: &str = "dia";

/// Read every non-empty data row of the plan, in sheet order
pub fn read_plan(path: &Path) -> Result<Vec<DayPlanRow>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| InventoryError::Spreadsheet(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| InventoryError::Spreadsheet("workbook has no worksheets".into()))?
        .map_err(|e| InventoryError::Spreadsheet(e.to_string()))?;

    let mut rows = range.rows().filter(|row| !is_blank_row(row));

    let header: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(header_name).collect(),
        None => return Err(InventoryError::InvalidPlan("plan is empty".into())),
    };

    let day_idx = header
        .iter()
        .position(|h| h == DAY_COLUMN)
        .ok_or_else(|| InventoryError::InvalidPlan(format!("column '{}' not found", DAY_COLUMN)))?;

    let columns = class_columns(&header);

    rows.map(|row| -> Result<DayPlanRow> {
        let day = parse_day(cell(row, day_idx))?;
        let expected = columns
            .iter()
            .map(|(idx, name)| -> Result<ExpectedCount> {
                Ok(ExpectedCount {
                    column: name.clone(),
                    count: parse_count(name, cell(row, *idx))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(DayPlanRow { day, expected })
    })
    .collect()
}

/// Catalog columns after the first, first occurrence only
fn class_columns(header: &[String]) -> Vec<(usize, String)> {
    let mut columns: Vec<(usize, String)> = Vec::new();
    for (idx, name) in header.iter().enumerate().skip(1) {
        if name == DAY_COLUMN || class_id(name).is_none() {
            continue;
        }
        if columns.iter().any(|(_, n)| n == name) {
            tracing::warn!(column = %name, "duplicate plan column ignored");
            continue;
        }
        columns.push((idx, name.clone()));
    }
    columns
}

fn header_name(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell(row: &[Data], idx: usize) -> &Data {
    row.get(idx).unwrap_or(&Data::Empty)
}

fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|c| match c {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    })
}

/// Integer value of a cell; floats truncate toward zero
fn cell_integer(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(i) => Some(*i),
        Data::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Any integer; days outside the schedule are skipped later, not rejected
fn parse_day(cell: &Data) -> Result<i64> {
    cell_integer(cell)
        .ok_or_else(|| InventoryError::InvalidPlan(format!("invalid day value: '{}'", cell)))
}

fn parse_count(column: &str, cell: &Data) -> Result<u32> {
    cell_integer(cell)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| {
            inventario_common::Error::InvalidCount {
                column: column.to_string(),
                value: cell.to_string(),
            }
            .into()
        })
}

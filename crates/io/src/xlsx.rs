// Excel timetable import (xlsx, xls, xlsb, ods) and export (xlsx only)
//
// Import: one-way conversion into the engine's session model. Each
// sheet's used range is read as raw cell rows; all header detection and
// normalization happens in the engine.
// Export: a single flat sheet per squad, renumbered per day. Not a
// round-trip of the source workbook's layout or formatting.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDateTime, Timelike};
use rust_xlsxwriter::Workbook as XlsxWorkbook;
use uuid::Uuid;

use rostergrid_engine::export::{schedule_rows, EXPORT_HEADERS};
use rostergrid_engine::import::{import_sheets, ImportReport, SheetRows};
use rostergrid_engine::model::{CellScalar, Session};

/// Result of a workbook import.
#[derive(Debug)]
pub struct ImportOutcome {
    pub sessions: Vec<Session>,
    pub report: ImportReport,
}

/// Import a timetable workbook.
///
/// Unreadable files fail the whole operation; malformed rows degrade
/// silently and show up only in the report. A workbook that yields zero
/// sessions is reported as a failure too.
pub fn import_schedule(path: &Path) -> Result<ImportOutcome, String> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| format!("Failed to open workbook: {}", e))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err("Workbook contains no sheets".to_string());
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| format!("Failed to read sheet '{}': {}", name, e))?;

        let rows: Vec<Vec<CellScalar>> = range
            .rows()
            .map(|row| row.iter().map(to_scalar).collect())
            .collect();

        sheets.push(SheetRows {
            name: name.clone(),
            rows,
        });
    }

    let (sessions, report) = import_sheets(&sheets, || Uuid::new_v4().to_string());

    if sessions.is_empty() {
        return Err(format!(
            "No sessions found in {} ({})",
            path.display(),
            report.summary()
        ));
    }

    Ok(ImportOutcome { sessions, report })
}

/// Map a calamine cell into the engine's import union.
fn to_scalar(cell: &Data) -> CellScalar {
    match cell {
        Data::Empty => CellScalar::Empty,
        Data::String(s) => CellScalar::Text(s.clone()),
        Data::Float(n) => CellScalar::Number(*n),
        Data::Int(n) => CellScalar::Number(*n as f64),
        Data::Bool(b) => CellScalar::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        // Error cells carry nothing a schedule row can use.
        Data::Error(_) => CellScalar::Empty,
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellScalar::DateTime(naive),
            None => CellScalar::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso_datetime(s),
        Data::DurationIso(s) => CellScalar::Text(s.clone()),
    }
}

fn parse_iso_datetime(s: &str) -> CellScalar {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .map(CellScalar::DateTime)
        .unwrap_or_else(|_| CellScalar::Text(s.to_string()))
}

/// Write the updated schedule for one squad.
///
/// Sheet layout: row 0 holds the squad id alone, row 1 the seven fixed
/// lowercase headers, rows 2+ the per-day-renumbered session rows.
/// Returns the number of data rows written.
pub fn export_schedule(path: &Path, squad: &str, sessions: &[Session]) -> Result<usize, String> {
    let rows = schedule_rows(sessions, squad);

    let mut workbook = XlsxWorkbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name("Schedule")
        .map_err(|e| format!("Failed to create sheet: {}", e))?;

    worksheet
        .write_string(0, 0, squad)
        .map_err(|e| format!("Failed to write squad header: {}", e))?;

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet
            .write_string(1, col as u16, *header)
            .map_err(|e| format!("Failed to write header '{}': {}", header, e))?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 2) as u32;
        let cells: [&str; 6] = [
            &row.date,
            &row.from,
            &row.to,
            &row.course_id,
            &row.lu_id,
            &row.mentor_id,
        ];

        worksheet
            .write_number(r, 0, row.slot_number as f64)
            .map_err(|e| format!("Failed to write row {}: {}", r, e))?;
        for (c, value) in cells.iter().enumerate() {
            worksheet
                .write_string(r, (c + 1) as u16, *value)
                .map_err(|e| format!("Failed to write row {}: {}", r, e))?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save {}: {}", path.display(), e))?;

    Ok(rows.len())
}

/// Deterministic export file name for a squad at a given local time:
/// `{squad}_updated_on_{YYYY-MM-DD}_{HHmm}.xlsx`, fully lower-cased.
pub fn export_file_name(squad: &str, at: NaiveDateTime) -> String {
    format!(
        "{}_updated_on_{}_{:02}{:02}.xlsx",
        squad,
        at.date().format("%Y-%m-%d"),
        at.hour(),
        at.minute()
    )
    .to_lowercase()
}

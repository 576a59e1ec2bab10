// Sheet-walking importer: raw workbook rows to Session records.
//
// Sheets are independent: squad label and the last-seen-date tracker
// never leak across sheet boundaries.

use crate::model::{CellScalar, Session};
use crate::normalize::{extract_squad, normalize_date, normalize_time};

/// One sheet of raw cell rows, in file order. Row 0 column 0 is the
/// squad header cell; later rows are `[label, date, from, to,
/// course_id?, lu_id?, mentor_id?]`.
#[derive(Debug, Clone)]
pub struct SheetRows {
    pub name: String,
    pub rows: Vec<Vec<CellScalar>>,
}

/// Substrings marking a repeated header/label row (matched against the
/// lower-cased first cell).
const HEADER_MARKERS: &[&str] = &["slot", "date", "squad"];

/// Per-sheet import statistics.
#[derive(Debug, Default, Clone)]
pub struct SheetReport {
    pub name: String,
    pub squad: String,
    pub rows_scanned: usize,
    pub sessions_imported: usize,
    pub header_rows_skipped: usize,
    pub rows_dropped: usize,
    /// Sheet had no resolvable squad label and contributed nothing.
    pub skipped_no_squad: bool,
}

/// Result of a workbook import.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub sheets: Vec<SheetReport>,
    pub sessions_imported: usize,
}

impl ImportReport {
    /// Returns a summary message suitable for display.
    pub fn summary(&self) -> String {
        let dropped: usize = self.sheets.iter().map(|s| s.rows_dropped).sum();
        let no_squad = self.sheets.iter().filter(|s| s.skipped_no_squad).count();

        let mut parts = vec![
            format!(
                "{} sheet{}",
                self.sheets.len(),
                if self.sheets.len() == 1 { "" } else { "s" }
            ),
            format!(
                "{} session{}",
                self.sessions_imported,
                if self.sessions_imported == 1 { "" } else { "s" }
            ),
        ];
        if dropped > 0 {
            parts.push(format!("{} rows dropped", dropped));
        }
        if no_squad > 0 {
            parts.push(format!("{} sheets without a squad label", no_squad));
        }
        parts.join(" · ")
    }
}

/// Walk every sheet and materialize the full session collection.
///
/// `next_id` supplies a fresh unique id per session (the io layer passes
/// a UUID generator; tests pass a counter).
pub fn import_sheets(
    sheets: &[SheetRows],
    mut next_id: impl FnMut() -> String,
) -> (Vec<Session>, ImportReport) {
    let mut sessions = Vec::new();
    let mut report = ImportReport::default();

    for sheet in sheets {
        let mut stats = SheetReport {
            name: sheet.name.clone(),
            ..Default::default()
        };

        if sheet.rows.is_empty() {
            report.sheets.push(stats);
            continue;
        }

        let squad = extract_squad(cell(&sheet.rows[0], 0));
        if squad.is_empty() {
            stats.skipped_no_squad = true;
            report.sheets.push(stats);
            continue;
        }
        stats.squad = squad.clone();

        // A blank date cell means "same day as the row above".
        let mut last_date = String::new();

        for row in &sheet.rows[1..] {
            stats.rows_scanned += 1;

            if row.len() < 3 {
                stats.rows_dropped += 1;
                continue;
            }

            let label = cell(row, 0).display().to_lowercase();
            if HEADER_MARKERS.iter().any(|m| label.contains(m)) {
                stats.header_rows_skipped += 1;
                continue;
            }

            let mut date = normalize_date(cell(row, 1));
            if date.is_empty() {
                date = last_date.clone();
            }
            let from = normalize_time(cell(row, 2));
            let to = normalize_time(cell(row, 3));

            // A row without a start time or a date is not a session.
            if from.is_empty() || date.is_empty() {
                stats.rows_dropped += 1;
                continue;
            }

            sessions.push(Session {
                id: next_id(),
                squad: squad.clone(),
                date: date.clone(),
                from,
                to,
                course_id: text_or(row, 4, "Untitled Course"),
                lu_id: text_or(row, 5, ""),
                mentor_id: text_or(row, 6, "Unassigned"),
            });
            stats.sessions_imported += 1;
            last_date = date;
        }

        report.sessions_imported += stats.sessions_imported;
        report.sheets.push(stats);
    }

    (sessions, report)
}

fn cell<'a>(row: &'a [CellScalar], idx: usize) -> &'a CellScalar {
    row.get(idx).unwrap_or(&CellScalar::Empty)
}

fn text_or(row: &[CellScalar], idx: usize, default: &str) -> String {
    match row.get(idx) {
        None | Some(CellScalar::Empty) => default.to_string(),
        Some(v) => {
            let s = v.display().trim().to_string();
            if s.is_empty() {
                default.to_string()
            } else {
                s
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> CellScalar {
        CellScalar::Text(s.to_string())
    }

    fn counter_ids() -> impl FnMut() -> String {
        let mut n = 0u32;
        move || {
            n += 1;
            format!("s{}", n)
        }
    }

    fn squad_sheet() -> SheetRows {
        SheetRows {
            name: "Squad 4".into(),
            rows: vec![
                vec![t("Squad 4")],
                vec![t("slot"), t("date"), t("from"), t("to")],
                vec![t(""), t("2024-01-01"), t("0830"), t("1030"), t("Intro")],
                vec![t(""), t(""), t("1030"), t("1230"), t("Advanced")],
            ],
        }
    }

    #[test]
    fn blank_date_inherits_previous_row() {
        let (sessions, report) = import_sheets(&[squad_sheet()], counter_ids());

        assert_eq!(sessions.len(), 2);
        assert!(sessions.iter().all(|s| s.date == "2024-01-01"));
        assert!(sessions.iter().all(|s| s.squad == "4"));
        assert_eq!(sessions[0].course_id, "Intro");
        assert_eq!(sessions[1].course_id, "Advanced");
        assert_eq!(report.sessions_imported, 2);
        assert_eq!(report.sheets[0].header_rows_skipped, 1);
    }

    #[test]
    fn sheet_without_squad_contributes_nothing() {
        let sheet = SheetRows {
            name: "Notes".into(),
            rows: vec![
                vec![CellScalar::Empty],
                vec![t(""), t("2024-01-01"), t("0830"), t("1030")],
            ],
        };
        let (sessions, report) = import_sheets(&[sheet], counter_ids());

        assert!(sessions.is_empty());
        assert!(report.sheets[0].skipped_no_squad);
    }

    #[test]
    fn empty_sheet_is_skipped() {
        let sheet = SheetRows {
            name: "Blank".into(),
            rows: vec![],
        };
        let (sessions, report) = import_sheets(&[sheet], counter_ids());
        assert!(sessions.is_empty());
        assert_eq!(report.sheets.len(), 1);
    }

    #[test]
    fn rows_without_start_time_are_dropped() {
        let sheet = SheetRows {
            name: "Squad 9".into(),
            rows: vec![
                vec![t("Squad 9")],
                vec![t(""), t("2024-01-01"), t(""), t("1030"), t("No start")],
                vec![t(""), t("2024-01-01"), t("0900"), t(""), t("Kept")],
                // Too few cells.
                vec![t(""), t("2024-01-02")],
            ],
        };
        let (sessions, report) = import_sheets(&[sheet], counter_ids());

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].course_id, "Kept");
        assert_eq!(sessions[0].to, "");
        assert_eq!(report.sheets[0].rows_dropped, 2);
    }

    #[test]
    fn missing_labels_get_defaults_except_lu_id() {
        let sheet = SheetRows {
            name: "Squad 2".into(),
            rows: vec![
                vec![t("Squad 2")],
                vec![t(""), t("2024-05-01"), t("0900"), t("1100")],
            ],
        };
        let (sessions, _) = import_sheets(&[sheet], counter_ids());

        assert_eq!(sessions[0].course_id, "Untitled Course");
        assert_eq!(sessions[0].lu_id, "");
        assert_eq!(sessions[0].mentor_id, "Unassigned");
    }

    #[test]
    fn trackers_do_not_leak_across_sheets() {
        let mut second = squad_sheet();
        second.name = "Squad 5".into();
        second.rows[0] = vec![t("Squad 5")];
        // The second sheet's data rows all have blank dates. With no
        // resolved date inside that sheet they are dropped; the first
        // sheet's 2024-01-01 must not carry over.
        second.rows[2] = vec![t(""), t(""), t("0830"), t("1030"), t("Orphan")];

        let (sessions, report) = import_sheets(&[squad_sheet(), second], counter_ids());

        assert!(sessions.iter().all(|s| s.squad == "4"));
        assert_eq!(report.sheets[1].rows_dropped, 2);
    }

    #[test]
    fn ids_are_fresh_per_session() {
        let (sessions, _) = import_sheets(&[squad_sheet()], counter_ids());
        assert_eq!(sessions[0].id, "s1");
        assert_eq!(sessions[1].id, "s2");
    }
}

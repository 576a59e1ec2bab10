// Export ordering: filter one squad's sessions, sort them, and assign
// per-day slot numbers. The io layer serializes the result.

use serde::Serialize;

use crate::model::{time_key, Session};

/// Column headers of the exported sheet, in order.
pub const EXPORT_HEADERS: [&str; 7] = [
    "slot_number",
    "date",
    "from",
    "to",
    "course_id",
    "lu_id",
    "mentor_id",
];

/// One data row of the exported sheet.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow {
    pub slot_number: u32,
    pub date: String,
    pub from: String,
    pub to: String,
    pub course_id: String,
    pub lu_id: String,
    pub mentor_id: String,
}

/// Build the export rows for one squad.
///
/// Sessions are filtered by case-insensitive squad equality, sorted by
/// date (lexicographic is chronological for `YYYY-MM-DD`) then start
/// time as an integer, and renumbered from 1 at each new date.
pub fn schedule_rows(sessions: &[Session], squad: &str) -> Vec<ExportRow> {
    let mut picked: Vec<&Session> = sessions.iter().filter(|s| s.in_squad(squad)).collect();
    picked.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| time_key(&a.from).cmp(&time_key(&b.from)))
    });

    let mut rows = Vec::with_capacity(picked.len());
    let mut prev_date: Option<&str> = None;
    let mut slot_number = 0u32;

    for s in picked {
        if prev_date == Some(s.date.as_str()) {
            slot_number += 1;
        } else {
            slot_number = 1;
            prev_date = Some(s.date.as_str());
        }
        rows.push(ExportRow {
            slot_number,
            date: s.date.clone(),
            from: s.from.clone(),
            to: s.to.clone(),
            course_id: s.course_id.clone(),
            lu_id: s.lu_id.clone(),
            mentor_id: s.mentor_id.clone(),
        });
    }

    rows
}

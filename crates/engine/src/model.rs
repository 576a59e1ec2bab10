use chrono::NaiveDateTime;
use serde::Serialize;

/// A spreadsheet cell value at the import boundary.
///
/// Closed union over what a cell can carry after file decoding. The io
/// layer maps its reader's cell type into this; the normalizers pattern
/// match on the tag instead of sniffing string contents.
#[derive(Debug, Clone, PartialEq)]
pub enum CellScalar {
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl CellScalar {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellScalar::Empty)
    }

    /// Display form, used by squad extraction and the date fallback.
    pub fn display(&self) -> String {
        match self {
            CellScalar::Empty => String::new(),
            CellScalar::Text(s) => s.clone(),
            CellScalar::Number(n) => format_number(*n),
            CellScalar::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Format a cell number: integers without decimals.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Numeric sort key for a 4-digit railway time. Unparseable values sort
/// first rather than erroring.
pub(crate) fn time_key(from: &str) -> u32 {
    from.parse::<u32>().unwrap_or(0)
}

/// One scheduled course occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    /// Opaque unique token, assigned at creation, never recomputed.
    pub id: String,
    /// Squad identifier; compared case-insensitively as a string.
    pub squad: String,
    /// Canonical `YYYY-MM-DD`.
    pub date: String,
    /// Canonical 4-digit railway time.
    pub from: String,
    /// Canonical 4-digit railway time; empty if unknown.
    pub to: String,
    pub course_id: String,
    /// Learning-unit label; empty means "not provided" and stays empty.
    pub lu_id: String,
    pub mentor_id: String,
}

impl Session {
    /// Case-insensitive squad match.
    pub fn in_squad(&self, squad: &str) -> bool {
        self.squad.eq_ignore_ascii_case(squad)
    }
}

/// One grid column: a `from`–`to` time range. Derived, never stored;
/// uniqueness key is `from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotDefinition {
    pub from: String,
    pub to: String,
}

impl SlotDefinition {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

// Cell normalizers: heterogeneous spreadsheet values to canonical forms.
//
// All three are total functions. Malformed input degrades to "" or to
// the original text, never to an error, so a sloppy timetable imports
// partially instead of failing wholesale.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::model::{format_number, CellScalar};

/// Excel date serials count days from 1899-12-30 (the 1900 system, with
/// its historical off-by-two baked into the epoch).
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Serials below this are time-only day fractions, not dates.
const MIN_DATE_SERIAL: f64 = 1.0;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Normalize any time-like cell to 4-digit railway time, or `""` when
/// the input is empty or carries no usable digits.
///
/// Hours wrap mod 24 and minutes mod 60; out-of-range components from
/// malformed input wrap instead of erroring.
pub fn normalize_time(value: &CellScalar) -> String {
    match value {
        CellScalar::Empty => String::new(),
        CellScalar::DateTime(dt) => railway(dt.hour(), dt.minute()),
        // Excel stores times as fractions of a day.
        CellScalar::Number(n) if (0.0..1.0).contains(n) => {
            let total = (n * 1440.0).round() as u32;
            railway(total / 60, total % 60)
        }
        // Any other number is a literal HHmm (or Hmm) reading.
        CellScalar::Number(n) => {
            let digits = format!("{}", n.trunc() as i64);
            match split_hhmm(&digits) {
                Some((h, m)) => railway(h, m),
                None => String::new(),
            }
        }
        CellScalar::Text(s) => normalize_time_text(s),
    }
}

fn normalize_time_text(s: &str) -> String {
    let lower = s.to_lowercase();
    let is_pm = lower.contains("pm");
    let is_am = lower.contains("am");

    let cleaned: String = lower.chars().filter(|c| !c.is_alphabetic()).collect();
    let parts: Vec<&str> = cleaned.split(':').collect();

    let (mut hours, minutes) = if parts.len() >= 2 {
        match (parse_digits(parts[0]), parse_digits(parts[1])) {
            (Some(h), m) => (h, m.unwrap_or(0)),
            (None, _) => return String::new(),
        }
    } else {
        let digits: String = cleaned.chars().filter(|c| c.is_ascii_digit()).collect();
        match split_hhmm(&digits) {
            Some(hm) => hm,
            None => return String::new(),
        }
    };

    // Meridiem markers only carry meaning for text input, applied after
    // the numeric split.
    if is_pm && hours < 12 {
        hours += 12;
    }
    if is_am && hours == 12 {
        hours = 0;
    }

    railway(hours, minutes)
}

/// Split a digit string into hours/minutes: left-pad to 4 digits, then
/// everything before the final two digits is hours.
fn split_hhmm(digits: &str) -> Option<(u32, u32)> {
    if digits.is_empty() {
        return None;
    }
    let padded = if digits.len() < 4 {
        format!("{:0>4}", digits)
    } else {
        digits.to_string()
    };
    let cut = padded.len() - 2;
    let hours = padded[..cut].parse::<u32>().ok()?;
    let minutes = padded[cut..].parse::<u32>().ok()?;
    Some((hours, minutes))
}

fn parse_digits(part: &str) -> Option<u32> {
    let digits: String = part.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse::<u32>().ok()
}

fn railway(hours: u32, minutes: u32) -> String {
    format!("{:02}{:02}", hours % 24, minutes % 60)
}

// ---------------------------------------------------------------------------
// Date
// ---------------------------------------------------------------------------

/// Normalize any date-like cell to canonical `YYYY-MM-DD`, `""` for
/// empty input, otherwise best effort: unparseable text comes back
/// trimmed but verbatim. Never fails.
pub fn normalize_date(value: &CellScalar) -> String {
    match value {
        CellScalar::Empty => String::new(),
        CellScalar::Number(n) if *n >= MIN_DATE_SERIAL => match date_from_serial(*n) {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => format_number(*n),
        },
        // A sub-day fraction is a time, not a date; fall through to the
        // text path on its display form.
        CellScalar::Number(n) => normalize_date_text(&format_number(*n)),
        CellScalar::DateTime(dt) => dt.date().format("%Y-%m-%d").to_string(),
        CellScalar::Text(s) => normalize_date_text(s),
    }
}

/// Decode an Excel 1900-system date serial.
fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// Formats tried for free-text dates, specific before generic.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%Y%m%d",
    "%B %d, %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

fn normalize_date_text(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    // Already canonical: idempotent.
    if is_canonical_date(trimmed) {
        return trimmed.to_string();
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return d.format("%Y-%m-%d").to_string();
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return dt.date().format("%Y-%m-%d").to_string();
        }
    }
    // Unparseable: hand back what we were given.
    trimmed.to_string()
}

/// Syntactic `YYYY-MM-DD` check (shape only, not calendar validity).
fn is_canonical_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Squad label
// ---------------------------------------------------------------------------

/// Extract a squad identifier from a header cell: the first maximal run
/// of decimal digits, or the trimmed text unchanged when it has none
/// (purely alphabetic squad labels must round-trip).
pub fn extract_squad(value: &CellScalar) -> String {
    if value.is_empty() {
        return String::new();
    }
    let text = value.display();
    let start = match text.find(|c: char| c.is_ascii_digit()) {
        Some(i) => i,
        None => return text.trim().to_string(),
    };
    text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(h: u32, m: u32) -> CellScalar {
        CellScalar::DateTime(
            NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap(),
        )
    }

    #[test]
    fn same_wall_clock_moment_all_encodings() {
        // Every encoding of 13:30 collapses to "1330".
        assert_eq!(normalize_time(&dt(13, 30)), "1330");
        assert_eq!(normalize_time(&CellScalar::Text("1:30 PM".into())), "1330");
        assert_eq!(normalize_time(&CellScalar::Text("13:30".into())), "1330");
        assert_eq!(normalize_time(&CellScalar::Number(1330.0)), "1330");
        assert_eq!(normalize_time(&CellScalar::Number(0.5625)), "1330");
    }

    #[test]
    fn empty_time_inputs() {
        assert_eq!(normalize_time(&CellScalar::Empty), "");
        assert_eq!(normalize_time(&CellScalar::Text("".into())), "");
        assert_eq!(normalize_time(&CellScalar::Text("tbd".into())), "");
    }

    #[test]
    fn short_time_forms_pad() {
        assert_eq!(normalize_time(&CellScalar::Text("830".into())), "0830");
        assert_eq!(normalize_time(&CellScalar::Number(830.0)), "0830");
        assert_eq!(normalize_time(&CellScalar::Text("9:05".into())), "0905");
    }

    #[test]
    fn meridiem_adjustments() {
        assert_eq!(normalize_time(&CellScalar::Text("12:15 AM".into())), "0015");
        assert_eq!(normalize_time(&CellScalar::Text("12:15 PM".into())), "1215");
        assert_eq!(normalize_time(&CellScalar::Text("11:45pm".into())), "2345");
    }

    #[test]
    fn out_of_range_components_wrap() {
        // 25:75 wraps to 01:15 by design, not an error.
        assert_eq!(normalize_time(&CellScalar::Text("25:75".into())), "0115");
        assert_eq!(normalize_time(&CellScalar::Number(2460.0)), "0000");
    }

    #[test]
    fn fraction_rounds_to_nearest_minute() {
        assert_eq!(normalize_time(&CellScalar::Number(0.354_166_7)), "0830");
        // A fraction a hair under midnight rounds to 1440 minutes and
        // wraps to 0000.
        assert_eq!(normalize_time(&CellScalar::Number(0.999_7)), "0000");
    }

    #[test]
    fn canonical_date_is_idempotent() {
        assert_eq!(
            normalize_date(&CellScalar::Text("2024-03-05".into())),
            "2024-03-05"
        );
    }

    #[test]
    fn date_serial_decodes_from_epoch() {
        // 2024-01-01 is serial 45292 in the 1900 system.
        assert_eq!(normalize_date(&CellScalar::Number(45292.0)), "2024-01-01");
        // Time-of-day fraction on a serial is ignored.
        assert_eq!(normalize_date(&CellScalar::Number(45292.75)), "2024-01-01");
    }

    #[test]
    fn date_from_datetime_cell() {
        assert_eq!(normalize_date(&dt(23, 59)), "2024-03-05");
    }

    #[test]
    fn date_common_text_forms() {
        assert_eq!(
            normalize_date(&CellScalar::Text("2024/03/05".into())),
            "2024-03-05"
        );
        assert_eq!(
            normalize_date(&CellScalar::Text("03/05/2024".into())),
            "2024-03-05"
        );
        assert_eq!(
            normalize_date(&CellScalar::Text("March 5, 2024".into())),
            "2024-03-05"
        );
    }

    #[test]
    fn unparseable_date_falls_back_verbatim() {
        assert_eq!(
            normalize_date(&CellScalar::Text("  next tuesday ".into())),
            "next tuesday"
        );
        assert_eq!(normalize_date(&CellScalar::Empty), "");
    }

    #[test]
    fn squad_extraction() {
        assert_eq!(extract_squad(&CellScalar::Text("Squad 4".into())), "4");
        assert_eq!(extract_squad(&CellScalar::Text("SQ-12".into())), "12");
        assert_eq!(extract_squad(&CellScalar::Number(7.0)), "7");
        // Purely alphabetic labels round-trip.
        assert_eq!(extract_squad(&CellScalar::Text(" Alpha ".into())), "Alpha");
        assert_eq!(extract_squad(&CellScalar::Empty), "");
    }

    #[test]
    fn squad_takes_first_digit_run_only() {
        assert_eq!(extract_squad(&CellScalar::Text("Squad 12 of 30".into())), "12");
    }
}

//! `rostergrid-io` — Workbook reading and writing for RosterGrid.

pub mod xlsx;

pub use xlsx::{export_file_name, export_schedule, import_schedule, ImportOutcome};

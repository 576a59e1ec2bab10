//! `rostergrid-engine` — Schedule normalization and grid-synthesis core.
//!
//! Pure engine crate: receives pre-loaded sheet rows, returns session
//! collections and grid state. No CLI or IO dependencies.

pub mod export;
pub mod import;
pub mod model;
pub mod normalize;
pub mod placement;
pub mod slots;

pub use export::{schedule_rows, ExportRow};
pub use import::{import_sheets, ImportReport, SheetRows};
pub use model::{CellScalar, Session, SlotDefinition};
pub use normalize::{extract_squad, normalize_date, normalize_time};
pub use placement::{Board, Placement, PlacementError, PlacementStatus};
pub use slots::derive_slots;

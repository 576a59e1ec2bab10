// Grid column derivation: the distinct start times present in a session
// collection, in chronological order.

use std::collections::HashMap;

use crate::model::{time_key, Session, SlotDefinition};

/// Columns shown when a schedule has no sessions to derive from.
const DEFAULT_SLOTS: &[(&str, &str)] = &[
    ("0830", "1030"),
    ("1030", "1230"),
    ("1330", "1530"),
    ("1530", "1730"),
];

/// Derive the ordered slot columns for grid display.
///
/// Each distinct non-empty `from` maps to its `to`; when the same start
/// appears with different ends the last writer wins (accepted
/// simplification). Keys sort by integer value, so columns are
/// chronological regardless of input row order.
pub fn derive_slots(sessions: &[Session]) -> Vec<SlotDefinition> {
    let mut ends: HashMap<&str, &str> = HashMap::new();
    for s in sessions {
        if !s.from.is_empty() {
            ends.insert(&s.from, &s.to);
        }
    }

    if ends.is_empty() {
        return DEFAULT_SLOTS
            .iter()
            .map(|(f, t)| SlotDefinition::new(f, t))
            .collect();
    }

    let mut froms: Vec<&str> = ends.keys().copied().collect();
    froms.sort_by_key(|f| time_key(f));

    froms
        .into_iter()
        .map(|f| SlotDefinition::new(f, ends[f]))
        .collect()
}

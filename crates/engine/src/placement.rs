// Placement board: single source of truth for which sessions sit on the
// grid and which are parked in staging.
//
// One map from session id to (Session, status). A session is in exactly
// one status at a time, so moves are status transitions and a session
// can never exist in both sets or neither.

use std::collections::HashMap;
use std::fmt;

use crate::model::{time_key, Session, SlotDefinition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStatus {
    /// On the grid at the session's (squad, date, from) cell.
    Placed,
    /// Parked in the staging area. Date/time fields keep their
    /// last-known values so a re-placed session needs no edits.
    Staged,
}

#[derive(Debug)]
pub enum PlacementError {
    /// No session with this id on the board.
    UnknownSession(String),
    /// stage() requires a currently placed session.
    NotPlaced(String),
    /// discard() requires a currently staged session.
    NotStaged(String),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSession(id) => write!(f, "unknown session: {id}"),
            Self::NotPlaced(id) => write!(f, "session {id} is not on the grid"),
            Self::NotStaged(id) => write!(f, "session {id} is not staged"),
        }
    }
}

impl std::error::Error for PlacementError {}

/// Outcome of a successful placement.
#[derive(Debug)]
pub struct Placement {
    /// The rewritten session now occupying the target cell.
    pub session: Session,
    /// A different session that previously occupied the cell. It has
    /// left the board; the caller decides what to do with it.
    pub displaced: Option<Session>,
}

#[derive(Debug, Default)]
pub struct Board {
    entries: HashMap<String, (Session, PlacementStatus)>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the board from an import: every session starts on the grid.
    pub fn from_imported(sessions: Vec<Session>) -> Self {
        let mut board = Self::new();
        for s in sessions {
            board.entries.insert(s.id.clone(), (s, PlacementStatus::Placed));
        }
        board
    }

    /// Add a session directly to the staging area.
    pub fn add_staged(&mut self, session: Session) {
        self.entries
            .insert(session.id.clone(), (session, PlacementStatus::Staged));
    }

    /// Drop a session onto a grid cell.
    ///
    /// The session keeps its id but takes the target squad, date and
    /// slot times; it moves to (or stays in) the placed status. A drop
    /// onto an occupied cell overwrites it: the previous occupant is
    /// removed from the board and returned as `displaced`.
    pub fn place(
        &mut self,
        id: &str,
        squad: &str,
        date: &str,
        slot: &SlotDefinition,
    ) -> Result<Placement, PlacementError> {
        let (session, _) = self
            .entries
            .get(id)
            .ok_or_else(|| PlacementError::UnknownSession(id.to_string()))?;

        let mut updated = session.clone();
        updated.squad = squad.to_string();
        updated.date = date.to_string();
        updated.from = slot.from.clone();
        updated.to = slot.to.clone();

        let displaced_id = self
            .session_at(squad, date, &slot.from)
            .filter(|s| s.id != id)
            .map(|s| s.id.clone());
        let displaced = displaced_id
            .and_then(|d| self.entries.remove(&d))
            .map(|(s, _)| s);

        self.entries
            .insert(id.to_string(), (updated.clone(), PlacementStatus::Placed));

        Ok(Placement {
            session: updated,
            displaced,
        })
    }

    /// Move a placed session to the staging area, fields untouched.
    pub fn stage(&mut self, id: &str) -> Result<(), PlacementError> {
        match self.entries.get_mut(id) {
            None => Err(PlacementError::UnknownSession(id.to_string())),
            Some((_, status)) if *status == PlacementStatus::Placed => {
                *status = PlacementStatus::Staged;
                Ok(())
            }
            Some(_) => Err(PlacementError::NotPlaced(id.to_string())),
        }
    }

    /// Remove a staged session permanently. Placed sessions must be
    /// staged first.
    pub fn discard(&mut self, id: &str) -> Result<Session, PlacementError> {
        match self.entries.get(id).map(|(_, status)| *status) {
            None => Err(PlacementError::UnknownSession(id.to_string())),
            Some(PlacementStatus::Placed) => Err(PlacementError::NotStaged(id.to_string())),
            Some(PlacementStatus::Staged) => match self.entries.remove(id) {
                Some((session, _)) => Ok(session),
                None => Err(PlacementError::UnknownSession(id.to_string())),
            },
        }
    }

    pub fn get(&self, id: &str) -> Option<(&Session, PlacementStatus)> {
        self.entries.get(id).map(|(s, status)| (s, *status))
    }

    /// The placed session occupying a grid cell, if any. Squad matches
    /// case-insensitively, like everywhere else.
    pub fn session_at(&self, squad: &str, date: &str, from: &str) -> Option<&Session> {
        self.entries
            .values()
            .filter(|(_, status)| *status == PlacementStatus::Placed)
            .map(|(s, _)| s)
            .find(|s| s.in_squad(squad) && s.date == date && s.from == from)
    }

    /// Placed sessions, chronological (date, then start time, then id).
    pub fn placed(&self) -> Vec<&Session> {
        self.by_status(PlacementStatus::Placed)
    }

    /// Staged sessions, chronological by their last-known date/time.
    pub fn staged(&self) -> Vec<&Session> {
        self.by_status(PlacementStatus::Staged)
    }

    /// Every session on the board, regardless of status.
    pub fn sessions(&self) -> Vec<&Session> {
        let mut out: Vec<&Session> = self.entries.values().map(|(s, _)| s).collect();
        sort_schedule(&mut out);
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn by_status(&self, status: PlacementStatus) -> Vec<&Session> {
        let mut out: Vec<&Session> = self
            .entries
            .values()
            .filter(|(_, st)| *st == status)
            .map(|(s, _)| s)
            .collect();
        sort_schedule(&mut out);
        out
    }
}

fn sort_schedule(sessions: &mut [&Session]) {
    sessions.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| time_key(&a.from).cmp(&time_key(&b.from)))
            .then_with(|| a.id.cmp(&b.id))
    });
}

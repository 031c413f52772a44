//! Core schedule data model.
//!
//! A schedule is an ordered list of rounds; each round partitions the
//! participants into numbered table rosters. Participants are plain display
//! labels at this level — the generation strategies work on indices and only
//! the conversion step attaches labels.

use serde::{Deserialize, Serialize};

use crate::engine::Strategy;

/// Hard per-table seat limit, anchors included.
pub const TABLE_CAPACITY: usize = 4;

/// Build the display labels `"1"..="n"` for a fresh generation run.
pub fn participant_labels(count: usize) -> Vec<String> {
    (1..=count).map(|i| i.to_string()).collect()
}

/// One table's roster for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableAssignment {
    /// 1-based table number.
    pub table: usize,
    /// Ordered member labels; the anchor comes first when one is pinned.
    pub members: Vec<String>,
    /// Anchor pinned to this table, if any.
    pub anchor: Option<String>,
}

/// A table left short of its occupancy target in one round.
///
/// Soft failure: the schedule is still returned, the short table simply has
/// fewer members than the distribution called for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentGap {
    /// 1-based round number.
    pub round: usize,
    /// 1-based table number.
    pub table: usize,
    /// Members actually seated.
    pub seated: usize,
    /// Members the distribution called for.
    pub target: usize,
}

/// A full multi-round seating plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Display labels in creation order.
    pub participants: Vec<String>,
    /// Rounds in production order; each round holds its table rosters.
    pub rounds: Vec<Vec<TableAssignment>>,
    /// Strategy that produced the rounds.
    pub strategy: Strategy,
    /// Under-filled tables; empty when every round seats everyone.
    pub gaps: Vec<AssignmentGap>,
}

impl Schedule {
    /// Number of rounds in the plan.
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Whether every round seats the full participant set.
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }
}

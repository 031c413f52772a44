//! Schedule generation: validation, strategy routing, and round-to-table
//! conversion.
//!
//! The engine owns the run's seeded random source and the schedule
//! accumulator; nothing is shared across invocations. Strategy selection is
//! a pure function of the population, table count, anchor mode, and
//! catalogue membership.

use std::collections::HashSet;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::anchor;
use crate::catalog;
use crate::distribution;
use crate::fallback::{self, SMALL_GROUP_LIMIT};
use crate::greedy::GreedyAssigner;
use crate::ledger::InteractionLedger;
use crate::schedule::{
    participant_labels, AssignmentGap, Schedule, TableAssignment, TABLE_CAPACITY,
};

/// Input preconditions the engine refuses to work without.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("minimum 4 people required, got {got}")]
    TooFewPeople { got: usize },
    #[error("minimum 2 tables required, got {got}")]
    TooFewTables { got: usize },
    #[error("number of people ({people}) must be at least the number of tables ({tables})")]
    FewerPeopleThanTables { people: usize, tables: usize },
    #[error("cannot fit {people} people in {tables} tables with max {capacity} per table")]
    TooManyPeople {
        people: usize,
        tables: usize,
        capacity: usize,
    },
    #[error("anchor mode needs exactly {tables} anchors, got {got}")]
    AnchorCountMismatch { tables: usize, got: usize },
    #[error("anchor {label:?} is not one of the participants")]
    UnknownAnchor { label: String },
    #[error("anchor {label:?} is listed more than once")]
    DuplicateAnchor { label: String },
}

/// Round-generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Catalogued exact design cycles.
    Exact,
    /// Modular/projective pattern construction.
    Fallback,
    /// Interaction-minimizing greedy assignment.
    Greedy,
    /// Anchor-pinned rotation of the non-anchor pool.
    Anchored,
}

impl Strategy {
    /// Display name of this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fallback => "fallback",
            Self::Greedy => "greedy",
            Self::Anchored => "anchored",
        }
    }
}

/// Pure routing: which strategy a (population, tables, mode) triple gets.
pub fn select_strategy(total_people: usize, num_tables: usize, anchored: bool) -> Strategy {
    if anchored {
        return Strategy::Anchored;
    }
    if catalog::canonical_rounds(total_people, num_tables).is_some() {
        return Strategy::Exact;
    }
    if total_people <= SMALL_GROUP_LIMIT && catalog::grouped_rounds(total_people).is_some() {
        return Strategy::Exact;
    }
    Strategy::Fallback
}

/// One generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Number of participants (labels are created as `"1"..="n"`).
    pub total_people: usize,
    /// Requested table count; the distribution may use fewer.
    pub num_tables: usize,
    /// Anchor labels, one per table, each reserved from the rotating pool.
    pub anchors: Option<Vec<String>>,
    /// Seed for the tie-break random source; drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Explicit strategy override; routed from the inputs when absent.
    pub strategy: Option<Strategy>,
}

impl GenerateConfig {
    pub fn new(total_people: usize, num_tables: usize) -> Self {
        Self {
            total_people,
            num_tables,
            anchors: None,
            seed: None,
            strategy: None,
        }
    }
}

/// Generate a schedule for one request.
pub fn generate_schedule(config: &GenerateConfig) -> Result<Schedule, ValidationError> {
    ScheduleEngine::new(config.clone()).generate()
}

/// One-shot schedule generator holding the request and its random source.
pub struct ScheduleEngine {
    config: GenerateConfig,
    rng: ChaCha8Rng,
}

impl ScheduleEngine {
    pub fn new(config: GenerateConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Validate the request and produce the full schedule.
    pub fn generate(&mut self) -> Result<Schedule, ValidationError> {
        self.validate()?;

        let labels = participant_labels(self.config.total_people);
        let requested_rounds = self.requested_rounds();
        let strategy = self.resolve_strategy();
        debug!(
            people = self.config.total_people,
            tables = self.config.num_tables,
            strategy = strategy.name(),
            requested_rounds,
            "generating schedule"
        );

        let schedule = match strategy {
            Strategy::Exact => self.generate_exact(&labels, requested_rounds),
            Strategy::Fallback => self.generate_fallback(&labels, requested_rounds),
            Strategy::Greedy => self.generate_greedy(&labels, requested_rounds),
            Strategy::Anchored => self.generate_anchored(&labels, requested_rounds),
        };

        Ok(schedule)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let people = self.config.total_people;
        let tables = self.config.num_tables;

        if people < 4 {
            return Err(ValidationError::TooFewPeople { got: people });
        }
        if tables < 2 {
            return Err(ValidationError::TooFewTables { got: tables });
        }
        if people < tables {
            return Err(ValidationError::FewerPeopleThanTables { people, tables });
        }
        if people > tables * TABLE_CAPACITY {
            return Err(ValidationError::TooManyPeople {
                people,
                tables,
                capacity: TABLE_CAPACITY,
            });
        }

        if let Some(anchors) = &self.config.anchors {
            if anchors.len() != tables {
                return Err(ValidationError::AnchorCountMismatch {
                    tables,
                    got: anchors.len(),
                });
            }
            let labels: HashSet<String> = participant_labels(people).into_iter().collect();
            let mut seen = HashSet::new();
            for label in anchors {
                if !labels.contains(label) {
                    return Err(ValidationError::UnknownAnchor {
                        label: label.clone(),
                    });
                }
                if !seen.insert(label) {
                    return Err(ValidationError::DuplicateAnchor {
                        label: label.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Global round estimate from the requested layout.
    fn requested_rounds(&self) -> usize {
        let per_table = TABLE_CAPACITY.min(self.config.total_people.div_ceil(self.config.num_tables));
        distribution::estimate_rounds(self.config.total_people, per_table)
    }

    /// Routed strategy, honoring an explicit override where it applies.
    fn resolve_strategy(&self) -> Strategy {
        let anchored = self.config.anchors.is_some();
        let routed = select_strategy(self.config.total_people, self.config.num_tables, anchored);

        match self.config.strategy {
            None => routed,
            Some(requested) if anchored => {
                if requested != Strategy::Anchored {
                    debug!(
                        requested = requested.name(),
                        "anchors given; anchored scheduling overrides the requested strategy"
                    );
                }
                Strategy::Anchored
            }
            // Anchored without anchors has no pins to honor.
            Some(Strategy::Anchored) => routed,
            Some(Strategy::Exact) if catalog::grouped_rounds(self.config.total_people).is_none() => {
                debug!(
                    people = self.config.total_people,
                    "no catalogued design for this population; using fallback"
                );
                Strategy::Fallback
            }
            Some(requested) => requested,
        }
    }

    /// Catalogued design cycle, converted against the distribution quotas.
    fn generate_exact(&mut self, labels: &[String], requested_rounds: usize) -> Schedule {
        let people = labels.len();
        let seats =
            distribution::optimal_distribution(people, self.config.num_tables, TABLE_CAPACITY);
        let base = catalog::grouped_rounds(people)
            .expect("exact strategy is only routed for catalogued populations");

        let total_rounds = catalog::canonical_rounds(people, self.config.num_tables)
            .unwrap_or_else(|| coverage_rounds(people, seats.len()).max(requested_rounds));

        let mut gaps = Vec::new();
        let rounds = catalog::cycle(base, total_rounds)
            .iter()
            .enumerate()
            .map(|(round, groups)| quota_tables(groups, &seats, labels, round, &mut gaps))
            .collect();

        Schedule {
            participants: labels.to_vec(),
            rounds,
            strategy: Strategy::Exact,
            gaps,
        }
    }

    /// Pattern-constructed rounds; groups become tables directly, with
    /// overflow reseated into spare capacity so every round seats everyone.
    fn generate_fallback(&mut self, labels: &[String], requested_rounds: usize) -> Schedule {
        let people = labels.len();
        let seats =
            distribution::optimal_distribution(people, self.config.num_tables, TABLE_CAPACITY);
        let total_rounds = coverage_rounds(people, seats.len()).max(requested_rounds);

        let rounds = (0..total_rounds)
            .map(|round| {
                let groups = fallback::build_round(people, TABLE_CAPACITY, round);
                capacity_tables(&groups, seats.len(), TABLE_CAPACITY, labels, round)
            })
            .collect();

        Schedule {
            participants: labels.to_vec(),
            rounds,
            strategy: Strategy::Fallback,
            gaps: Vec::new(),
        }
    }

    /// Greedy least-repeat rounds over the whole population.
    fn generate_greedy(&mut self, labels: &[String], requested_rounds: usize) -> Schedule {
        let people = labels.len();
        let seats =
            distribution::optimal_distribution(people, self.config.num_tables, TABLE_CAPACITY);
        let pool: Vec<usize> = (0..people).collect();
        let mut ledger = InteractionLedger::new(people);

        let rounds = (0..requested_rounds)
            .map(|round| {
                let groups =
                    GreedyAssigner::new(&mut ledger, &mut self.rng).build_round(&pool, &seats, round);
                groups
                    .iter()
                    .enumerate()
                    .map(|(table, group)| TableAssignment {
                        table: table + 1,
                        members: group.iter().map(|&p| labels[p].clone()).collect(),
                        anchor: None,
                    })
                    .collect()
            })
            .collect();

        Schedule {
            participants: labels.to_vec(),
            rounds,
            strategy: Strategy::Greedy,
            gaps: Vec::new(),
        }
    }

    /// Anchor-pinned rounds over the non-anchor pool.
    fn generate_anchored(&mut self, labels: &[String], requested_rounds: usize) -> Schedule {
        let anchors = self
            .config
            .anchors
            .clone()
            .expect("anchored strategy is only routed when anchors are given");
        let pool: Vec<String> = labels
            .iter()
            .filter(|label| !anchors.contains(label))
            .cloned()
            .collect();

        let rounds = anchor::generate_rounds(
            &anchors,
            &pool,
            self.config.num_tables,
            requested_rounds,
            TABLE_CAPACITY,
            &mut self.rng,
        );

        Schedule {
            participants: labels.to_vec(),
            rounds,
            strategy: Strategy::Anchored,
            gaps: Vec::new(),
        }
    }
}

/// Coverage-driven round count for an already-fixed table layout.
fn coverage_rounds(people: usize, tables: usize) -> usize {
    let per_table = people.div_ceil(tables).max(2);
    (people - 1).div_ceil(per_table - 1)
}

/// Convert one grouped round against per-table quotas.
///
/// Each table takes at most its quota from its group; a group running short
/// leaves the table under-filled and flags a gap rather than failing.
fn quota_tables(
    groups: &[catalog::Group],
    seats: &[usize],
    labels: &[String],
    round: usize,
    gaps: &mut Vec<AssignmentGap>,
) -> Vec<TableAssignment> {
    let mut tables = Vec::with_capacity(seats.len());
    let mut seated = 0;

    for (table, &target) in seats.iter().enumerate() {
        let members: Vec<String> = groups
            .get(table)
            .map(|group| group.iter().take(target).map(|&p| labels[p].clone()).collect())
            .unwrap_or_default();
        seated += members.len();

        if members.len() < target {
            gaps.push(AssignmentGap {
                round: round + 1,
                table: table + 1,
                seated: members.len(),
                target,
            });
        }
        if !members.is_empty() {
            tables.push(TableAssignment {
                table: table + 1,
                members,
                anchor: None,
            });
        }
    }

    if seated != labels.len() {
        warn!(
            round = round + 1,
            expected = labels.len(),
            seated,
            "not all participants assigned in round"
        );
    }

    tables
}

/// Convert pattern groups into tables directly, capped at the table limit.
///
/// Members of groups beyond the limit are reseated one at a time into tables
/// with spare capacity, in table order; validation guarantees the capacity
/// is there.
fn capacity_tables(
    groups: &[Vec<usize>],
    table_limit: usize,
    capacity: usize,
    labels: &[String],
    round: usize,
) -> Vec<TableAssignment> {
    let mut seats: Vec<Vec<usize>> = groups.iter().take(table_limit).cloned().collect();
    let overflow: Vec<usize> = groups
        .iter()
        .skip(table_limit)
        .flatten()
        .copied()
        .collect();

    let mut cursor = 0;
    for table in seats.iter_mut() {
        while table.len() < capacity && cursor < overflow.len() {
            table.push(overflow[cursor]);
            cursor += 1;
        }
    }
    if cursor < overflow.len() {
        warn!(
            round = round + 1,
            unseated = overflow.len() - cursor,
            "table capacity exhausted while reseating overflow"
        );
    }

    seats
        .iter()
        .enumerate()
        .map(|(table, group)| TableAssignment {
            table: table + 1,
            members: group.iter().map(|&p| labels[p].clone()).collect(),
            anchor: None,
        })
        .collect()
}

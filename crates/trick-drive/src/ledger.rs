//! Pairwise interaction accounting and schedule quality reporting.
//!
//! The ledger is a symmetric meeting-count matrix over participant indices.
//! The greedy assigner feeds it while rounds are produced; quality reports
//! recompute it from a finished schedule, so recomputation is idempotent by
//! construction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;

/// Symmetric pairwise meeting counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionLedger {
    counts: Vec<Vec<u32>>,
}

impl InteractionLedger {
    /// Zeroed ledger for `participants` indices.
    pub fn new(participants: usize) -> Self {
        Self {
            counts: vec![vec![0; participants]; participants],
        }
    }

    /// Number of participants tracked.
    pub fn participants(&self) -> usize {
        self.counts.len()
    }

    /// Count one co-seating for every unordered pair in `group`.
    pub fn record_group(&mut self, group: &[usize]) {
        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                let (a, b) = (group[i], group[j]);
                self.counts[a][b] += 1;
                self.counts[b][a] += 1;
            }
        }
    }

    /// Times `a` and `b` have been co-seated.
    pub fn count(&self, a: usize, b: usize) -> u32 {
        self.counts[a][b]
    }

    /// Highest meeting count over all pairs.
    pub fn max_repeats(&self) -> u32 {
        let n = self.counts.len();
        let mut max = 0;
        for a in 0..n {
            for b in (a + 1)..n {
                max = max.max(self.counts[a][b]);
            }
        }
        max
    }

    /// Every pair meeting more than once, in participant order.
    pub fn repeat_pairs(&self) -> Vec<(usize, usize, u32)> {
        let n = self.counts.len();
        let mut pairs = Vec::new();
        for a in 0..n {
            for b in (a + 1)..n {
                if self.counts[a][b] > 1 {
                    pairs.push((a, b, self.counts[a][b]));
                }
            }
        }
        pairs
    }
}

/// A pair co-seated more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatPair {
    pub first: String,
    pub second: String,
    pub count: u32,
}

/// Quality classification of a finished schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionReport {
    /// Highest meeting count over all pairs.
    pub max_repeats: u32,
    /// Every pair meeting more than once, in participant order.
    pub repeat_pairs: Vec<RepeatPair>,
}

impl InteractionReport {
    /// A perfect split: no pair meets more than once.
    pub fn is_perfect(&self) -> bool {
        self.max_repeats <= 1
    }
}

/// Rebuild the ledger by scanning every table of every round.
pub fn ledger_from_schedule(schedule: &Schedule) -> InteractionLedger {
    let index: HashMap<&str, usize> = schedule
        .participants
        .iter()
        .enumerate()
        .map(|(position, label)| (label.as_str(), position))
        .collect();

    let mut ledger = InteractionLedger::new(schedule.participants.len());
    for round in &schedule.rounds {
        for table in round {
            let group: Vec<usize> = table
                .members
                .iter()
                .filter_map(|member| index.get(member.as_str()).copied())
                .collect();
            ledger.record_group(&group);
        }
    }
    ledger
}

/// Grade a finished schedule.
pub fn interaction_report(schedule: &Schedule) -> InteractionReport {
    let ledger = ledger_from_schedule(schedule);
    let repeat_pairs = ledger
        .repeat_pairs()
        .into_iter()
        .map(|(a, b, count)| RepeatPair {
            first: schedule.participants[a].clone(),
            second: schedule.participants[b].clone(),
            count,
        })
        .collect();

    InteractionReport {
        max_repeats: ledger.max_repeats(),
        repeat_pairs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Strategy;
    use crate::schedule::{participant_labels, TableAssignment};

    fn table(number: usize, members: &[&str]) -> TableAssignment {
        TableAssignment {
            table: number,
            members: members.iter().map(|m| m.to_string()).collect(),
            anchor: None,
        }
    }

    fn sample_schedule() -> Schedule {
        Schedule {
            participants: participant_labels(6),
            rounds: vec![
                vec![table(1, &["1", "2", "3"]), table(2, &["4", "5", "6"])],
                vec![table(1, &["1", "2", "4"]), table(2, &["3", "5", "6"])],
            ],
            strategy: Strategy::Exact,
            gaps: Vec::new(),
        }
    }

    #[test]
    fn test_counts_are_symmetric() {
        let mut ledger = InteractionLedger::new(4);
        ledger.record_group(&[0, 1, 2]);
        for a in 0..4 {
            for b in 0..4 {
                assert_eq!(ledger.count(a, b), ledger.count(b, a));
            }
        }
        assert_eq!(ledger.count(0, 1), 1);
        assert_eq!(ledger.count(0, 3), 0);
    }

    #[test]
    fn test_report_finds_repeats() {
        let report = interaction_report(&sample_schedule());
        assert_eq!(report.max_repeats, 2);
        assert!(!report.is_perfect());
        // 1-2 and 5-6 meet in both rounds; pairs come out in participant
        // order.
        assert_eq!(
            report.repeat_pairs,
            vec![
                RepeatPair {
                    first: "1".to_string(),
                    second: "2".to_string(),
                    count: 2,
                },
                RepeatPair {
                    first: "5".to_string(),
                    second: "6".to_string(),
                    count: 2,
                },
            ]
        );
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let schedule = sample_schedule();
        let first = interaction_report(&schedule);
        let second = interaction_report(&schedule);
        assert_eq!(first, second);
        assert_eq!(
            ledger_from_schedule(&schedule),
            ledger_from_schedule(&schedule)
        );
    }

    #[test]
    fn test_perfect_schedule() {
        let schedule = Schedule {
            participants: participant_labels(4),
            rounds: vec![vec![table(1, &["1", "2"]), table(2, &["3", "4"])]],
            strategy: Strategy::Exact,
            gaps: Vec::new(),
        };
        let report = interaction_report(&schedule);
        assert_eq!(report.max_repeats, 1);
        assert!(report.is_perfect());
        assert!(report.repeat_pairs.is_empty());
    }
}

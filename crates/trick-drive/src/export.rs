//! Flat record stream for tabular export.
//!
//! One record per table per round, preserving round and table order exactly
//! as produced. This is the only exported representation of a schedule;
//! serializing it to CSV or elsewhere is the caller's concern.

use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;

/// One table of one round, flattened for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    /// 1-based round number.
    pub round: usize,
    /// 1-based table number.
    pub table: usize,
    /// Member labels joined with `"; "`, anchor first when present.
    pub members: String,
}

/// Flatten a schedule into its record stream.
pub fn records(schedule: &Schedule) -> Vec<ExportRecord> {
    schedule
        .rounds
        .iter()
        .enumerate()
        .flat_map(|(round, tables)| {
            tables.iter().map(move |assignment| ExportRecord {
                round: round + 1,
                table: assignment.table,
                members: assignment.members.join("; "),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Strategy;
    use crate::schedule::{participant_labels, TableAssignment};

    #[test]
    fn test_records_preserve_order() {
        let schedule = Schedule {
            participants: participant_labels(6),
            rounds: vec![
                vec![
                    TableAssignment {
                        table: 1,
                        members: vec!["1".into(), "2".into(), "3".into()],
                        anchor: None,
                    },
                    TableAssignment {
                        table: 2,
                        members: vec!["4".into(), "5".into(), "6".into()],
                        anchor: None,
                    },
                ],
                vec![TableAssignment {
                    table: 1,
                    members: vec!["1".into(), "4".into()],
                    anchor: None,
                }],
            ],
            strategy: Strategy::Exact,
            gaps: Vec::new(),
        };

        let records = records(&schedule);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].round, 1);
        assert_eq!(records[0].table, 1);
        assert_eq!(records[0].members, "1; 2; 3");
        assert_eq!(records[1].table, 2);
        assert_eq!(records[2].round, 2);
        assert_eq!(records[2].members, "1; 4");
    }
}

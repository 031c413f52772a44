//! Greedy interaction-minimizing table assignment.
//!
//! Builds each round table by table, always seating the pool member with the
//! fewest prior co-seatings against the current occupants. The first seat of
//! an empty table rotates with the round and table index so rounds do not
//! all start from the same person. Ties break on a small seeded random
//! perturbation; the weighting below is an empirically tuned heuristic, not
//! an invariant.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::ledger::InteractionLedger;

/// Penalty per prior co-seating with a current table occupant.
const REPEAT_PENALTY: f64 = 10.0;
/// Scale of the random tie-break perturbation.
const TIE_BREAK_SCALE: f64 = 0.1;

/// Round builder over a shared ledger and seeded random source.
pub struct GreedyAssigner<'a> {
    ledger: &'a mut InteractionLedger,
    rng: &'a mut ChaCha8Rng,
}

impl<'a> GreedyAssigner<'a> {
    pub fn new(ledger: &'a mut InteractionLedger, rng: &'a mut ChaCha8Rng) -> Self {
        Self { ledger, rng }
    }

    /// Build one round of groups over `pool`, one group per target, and
    /// record the new co-seatings in the ledger.
    pub fn build_round(
        &mut self,
        pool: &[usize],
        targets: &[usize],
        round: usize,
    ) -> Vec<Vec<usize>> {
        let mut available: Vec<usize> = pool.to_vec();
        let mut groups = Vec::with_capacity(targets.len());

        for (table, &target) in targets.iter().enumerate() {
            let mut group: Vec<usize> = Vec::with_capacity(target);
            for position in 0..target {
                if available.is_empty() {
                    break;
                }
                let pick = if group.is_empty() {
                    // Rotate the opening seat so tables do not always start
                    // from the lowest index.
                    (round * 3 + table) % available.len()
                } else {
                    self.best_candidate(&available, &group, round, table, position)
                };
                group.push(available.remove(pick));
            }
            groups.push(group);
        }

        for group in &groups {
            self.ledger.record_group(group);
        }

        groups
    }

    /// Position in `available` with the lowest assignment score.
    fn best_candidate(
        &mut self,
        available: &[usize],
        seated: &[usize],
        round: usize,
        table: usize,
        position: usize,
    ) -> usize {
        let mut best = 0;
        let mut best_score = f64::INFINITY;

        for (index, &person) in available.iter().enumerate() {
            let meetings: u32 = seated
                .iter()
                .map(|&occupant| self.ledger.count(person, occupant))
                .sum();
            let variety = ((round + table + position) % 3) as f64;
            let score = f64::from(meetings) * REPEAT_PENALTY
                + variety
                + self.rng.random::<f64>() * TIE_BREAK_SCALE;
            if score < best_score {
                best_score = score;
                best = index;
            }
        }

        best
    }
}

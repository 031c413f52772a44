//! Anchor-mode scheduling: one participant pinned to each table, the rest
//! rotating.
//!
//! Only the non-anchor pool is rotated; each round's table roster is the
//! table's anchor followed by its slice of the pool seating. The table count
//! never shrinks below the anchor count — every anchor holds its table every
//! round — and the pool is distributed at one below capacity so the roster
//! including the anchor never exceeds a table's seats.

use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::catalog;
use crate::distribution;
use crate::fallback::SMALL_GROUP_LIMIT;
use crate::greedy::GreedyAssigner;
use crate::ledger::InteractionLedger;
use crate::schedule::TableAssignment;

/// Generate the full anchor-mode round list.
///
/// `anchors` has exactly one entry per table; `pool` is every other
/// participant label in creation order. `requested_rounds` is the engine's
/// global estimate — the pool's own coverage estimate wins when larger.
pub fn generate_rounds(
    anchors: &[String],
    pool: &[String],
    num_tables: usize,
    requested_rounds: usize,
    capacity: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<Vec<TableAssignment>> {
    let seats = distribution::even_distribution(pool.len(), num_tables, capacity - 1);
    let total_rounds = pool_rounds(pool.len(), num_tables).max(requested_rounds);
    let seatings = pool_seatings(pool.len(), &seats, total_rounds, rng);

    seatings
        .iter()
        .map(|seating| deal_round(anchors, pool, &seats, seating))
        .collect()
}

/// Coverage-driven round count for the pool alone.
fn pool_rounds(pool: usize, num_tables: usize) -> usize {
    if pool <= 1 {
        return 0;
    }
    let per_table = pool.div_ceil(num_tables).max(2);
    (pool - 1).div_ceil(per_table - 1)
}

/// One flat pool seating per round.
///
/// Catalogued pool sizes cycle their rotation designs; other small pools use
/// the systematic rotation variants; large pools fall back to greedy
/// least-repeat assignment.
fn pool_seatings(
    pool: usize,
    seats: &[usize],
    total_rounds: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<Vec<usize>> {
    if let Some(base) = catalog::rotation_rounds(pool) {
        debug!(pool, "anchor mode using catalogued rotation cycle");
        return catalog::cycle(base, total_rounds)
            .into_iter()
            .map(|round| round.to_vec())
            .collect();
    }

    if pool <= SMALL_GROUP_LIMIT {
        debug!(pool, "anchor mode using systematic rotation");
        return (0..total_rounds)
            .map(|round| systematic_rotation(pool, round))
            .collect();
    }

    debug!(pool, "anchor mode using greedy assignment");
    let indices: Vec<usize> = (0..pool).collect();
    let mut ledger = InteractionLedger::new(pool);
    (0..total_rounds)
        .map(|round| {
            GreedyAssigner::new(&mut ledger, rng)
                .build_round(&indices, seats, round)
                .concat()
        })
        .collect()
}

/// Systematic pool rotation for uncatalogued small pools.
fn systematic_rotation(pool: usize, round: usize) -> Vec<usize> {
    match round % 4 {
        // Original order.
        0 => (0..pool).collect(),
        // Shift by half.
        1 => {
            let shift = pool / 2;
            (0..pool).map(|i| (i + shift) % pool).collect()
        }
        // Reverse order.
        2 => (0..pool).rev().collect(),
        // Interleave the two halves.
        _ => {
            let half = pool / 2;
            let mut seating = Vec::with_capacity(pool);
            for i in 0..half {
                seating.push(i);
                if i + half < pool {
                    seating.push(i + half);
                }
            }
            if pool % 2 == 1 {
                seating.push(pool - 1);
            }
            seating
        }
    }
}

/// Anchor-first rosters for one round's flat seating.
fn deal_round(
    anchors: &[String],
    pool: &[String],
    seats: &[usize],
    seating: &[usize],
) -> Vec<TableAssignment> {
    let mut cursor = 0;
    seats
        .iter()
        .enumerate()
        .map(|(table, &target)| {
            let mut members = Vec::with_capacity(target + 1);
            members.push(anchors[table].clone());
            for _ in 0..target {
                if cursor < seating.len() {
                    members.push(pool[seating[cursor]].clone());
                    cursor += 1;
                }
            }
            TableAssignment {
                table: table + 1,
                members,
                anchor: Some(anchors[table].clone()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn labels(range: std::ops::RangeInclusive<usize>) -> Vec<String> {
        range.map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_systematic_rotation_permutes() {
        for pool in [5, 7, 11] {
            for round in 0..8 {
                let seating = systematic_rotation(pool, round);
                let mut seen = vec![false; pool];
                assert_eq!(seating.len(), pool);
                for person in seating {
                    assert!(!seen[person]);
                    seen[person] = true;
                }
            }
        }
    }

    #[test]
    fn test_anchor_holds_its_table_every_round() {
        let anchors = labels(1..=3);
        let pool = labels(4..=12);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let rounds = generate_rounds(&anchors, &pool, 3, 4, 4, &mut rng);

        assert!(rounds.len() >= 4);
        for round in &rounds {
            assert_eq!(round.len(), 3);
            for (table, assignment) in round.iter().enumerate() {
                assert_eq!(assignment.members[0], anchors[table]);
                assert_eq!(assignment.anchor.as_deref(), Some(anchors[table].as_str()));
                assert!(assignment.members.len() <= 4);
            }
        }
    }

    #[test]
    fn test_every_pool_member_seated_each_round() {
        let anchors = labels(1..=3);
        let pool = labels(4..=12);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let rounds = generate_rounds(&anchors, &pool, 3, 4, 4, &mut rng);

        for round in &rounds {
            let mut seated: Vec<&str> = round
                .iter()
                .flat_map(|t| t.members.iter().skip(1))
                .map(String::as_str)
                .collect();
            seated.sort_unstable();
            let mut expected: Vec<&str> = pool.iter().map(String::as_str).collect();
            expected.sort_unstable();
            assert_eq!(seated, expected);
        }
    }

    #[test]
    fn test_large_pool_uses_greedy_and_stays_valid() {
        // 18 participants on 5 tables: pool of 13 is past the catalogue and
        // the small-group limit.
        let anchors = labels(1..=5);
        let pool = labels(6..=18);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let rounds = generate_rounds(&anchors, &pool, 5, 4, 4, &mut rng);

        for round in &rounds {
            assert_eq!(round.len(), 5);
            for (table, assignment) in round.iter().enumerate() {
                assert_eq!(assignment.members[0], anchors[table]);
                assert!(assignment.members.len() <= 4);
            }
            let seated = round.iter().map(|t| t.members.len() - 1).sum::<usize>();
            assert_eq!(seated, pool.len());
        }
    }

    #[test]
    fn test_empty_pool_leaves_anchors_alone() {
        let anchors = labels(1..=4);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let rounds = generate_rounds(&anchors, &[], 4, 3, 4, &mut rng);

        assert_eq!(rounds.len(), 3);
        for round in &rounds {
            for assignment in round {
                assert_eq!(assignment.members.len(), 1);
            }
        }
    }
}

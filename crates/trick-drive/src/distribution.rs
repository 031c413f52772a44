//! Table-count and occupancy planning.
//!
//! Given a population, a requested table count, and the per-table capacity,
//! pick how many tables to actually use and how many participants sit at
//! each, then derive how many rounds near-complete pairwise coverage needs.

/// Pick the table count with the most even split.
///
/// Searches from the minimum feasible count (`ceil(total / capacity)`) up to
/// `max_tables` and keeps the candidate with the lowest occupancy variance;
/// the first candidate found wins ties, so the search never uses more tables
/// than an equally even smaller layout. Callers validate
/// `total <= max_tables * capacity`.
pub fn optimal_table_count(total: usize, max_tables: usize, capacity: usize) -> usize {
    let min_tables = total.div_ceil(capacity);
    let mut best_tables = min_tables;
    let mut best_variance = f64::INFINITY;

    for tables in min_tables..=max_tables {
        let variance = split_variance(total, tables);
        if variance < best_variance {
            best_variance = variance;
            best_tables = tables;
        }
    }

    best_tables
}

/// Occupancy variance of the even split of `total` over `tables`.
fn split_variance(total: usize, tables: usize) -> f64 {
    let base = total / tables;
    let remainder = total % tables;
    let mean = total as f64 / tables as f64;

    (0..tables)
        .map(|table| {
            let count = base + usize::from(table < remainder);
            (count as f64 - mean).powi(2)
        })
        .sum::<f64>()
        / tables as f64
}

/// Per-table occupancy for `total` participants over at most `max_tables`.
///
/// Selects the table count via [`optimal_table_count`], then splits evenly
/// with the first `total % tables` tables one larger. Guarantees the counts
/// sum to `total` and every entry stays within `capacity`.
pub fn optimal_distribution(total: usize, max_tables: usize, capacity: usize) -> Vec<usize> {
    let tables = optimal_table_count(total, max_tables, capacity);
    even_distribution(total, tables, capacity)
}

/// Even split of `total` over exactly `tables` tables, capped at `capacity`.
///
/// Participants cut off by the cap are reseated one at a time into tables
/// with spare capacity, in table order.
pub fn even_distribution(total: usize, tables: usize, capacity: usize) -> Vec<usize> {
    let base = total / tables;
    let remainder = total % tables;

    let mut distribution: Vec<usize> = (0..tables)
        .map(|table| (base + usize::from(table < remainder)).min(capacity))
        .collect();

    // Reseat anyone the cap displaced.
    let mut leftover = total - distribution.iter().sum::<usize>();
    for count in distribution.iter_mut() {
        if leftover == 0 {
            break;
        }
        let take = leftover.min(capacity - *count);
        *count += take;
        leftover -= take;
    }

    distribution
}

/// Minimum rounds for near-complete pairwise coverage, floored at 3.
///
/// `ceil((total - 1) / (per_table - 1))` approximates the round count a
/// balanced block design needs for every participant to meet most others.
/// `per_table` is clamped to 2 so one-per-table layouts fall through to the
/// three-round floor instead of dividing by zero.
pub fn estimate_rounds(total: usize, per_table: usize) -> usize {
    let per_table = per_table.max(2);
    (total - 1).div_ceil(per_table - 1).max(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_sums_to_total() {
        for total in 4..=16 {
            for tables in 2..=total.min(8) {
                if total > tables * 4 {
                    continue;
                }
                let distribution = optimal_distribution(total, tables, 4);
                assert_eq!(
                    distribution.iter().sum::<usize>(),
                    total,
                    "distribution {:?} for {} people / {} tables",
                    distribution,
                    total,
                    tables
                );
                assert!(distribution.iter().all(|&count| (1..=4).contains(&count)));
            }
        }
    }

    #[test]
    fn test_never_fewer_than_min_tables() {
        // 13 people cannot fit on fewer than 4 tables of 4.
        let distribution = optimal_distribution(13, 4, 4);
        assert_eq!(distribution.len(), 4);
        assert_eq!(distribution, vec![4, 3, 3, 3]);
    }

    #[test]
    fn test_even_split_wins_over_more_tables() {
        // Three tables of four tie with four tables of three on variance;
        // the smaller layout is found first and kept.
        assert_eq!(optimal_table_count(12, 4, 4), 3);
        assert_eq!(optimal_distribution(12, 4, 4), vec![4, 4, 4]);
    }

    #[test]
    fn test_uneven_population_prefers_lower_variance() {
        // 10 over 3 tables is 4/3/3; over the minimum this is already the
        // most even option within the cap.
        assert_eq!(optimal_distribution(10, 3, 4), vec![4, 3, 3]);
    }

    #[test]
    fn test_single_table_collapse() {
        // Four people fit on one table; the search prefers the zero-variance
        // single table over spreading them thin.
        assert_eq!(optimal_distribution(4, 4, 4), vec![4]);
    }

    #[test]
    fn test_even_distribution_fixed_table_count() {
        assert_eq!(even_distribution(7, 2, 4), vec![4, 3]);
        assert_eq!(even_distribution(11, 3, 4), vec![4, 4, 3]);
        // Anchor mode distributes the pool at one below capacity.
        assert_eq!(even_distribution(9, 3, 3), vec![3, 3, 3]);
        assert_eq!(even_distribution(5, 3, 3), vec![2, 2, 1]);
    }

    #[test]
    fn test_estimate_rounds_floor() {
        // Tiny populations still rotate at least three times.
        assert_eq!(estimate_rounds(4, 4), 3);
        assert_eq!(estimate_rounds(5, 4), 3);
    }

    #[test]
    fn test_estimate_rounds_coverage_bound() {
        assert_eq!(estimate_rounds(6, 2), 5);
        assert_eq!(estimate_rounds(9, 3), 4);
        assert_eq!(estimate_rounds(13, 4), 4);
        for total in 4..=16 {
            for per_table in 1..=4 {
                let rounds = estimate_rounds(total, per_table);
                assert!(rounds >= 3);
                let clamped = per_table.max(2);
                assert!(rounds >= (total - 1).div_ceil(clamped - 1));
            }
        }
    }

    #[test]
    fn test_one_per_table_clamps() {
        // One per table would divide by zero without the clamp.
        assert_eq!(estimate_rounds(4, 1), 3);
    }
}

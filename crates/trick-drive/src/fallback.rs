//! Modular-arithmetic round construction for populations without a
//! catalogued design.
//!
//! Each round partitions the participant indices with a round-dependent
//! pattern function over Z/n. Small populations rotate through an affine
//! family; larger ones use a projective-plane-style family built on
//! `q = ceil(sqrt(n))`. Varying the pattern per round keeps repeat pairings
//! statistically low; nothing here guarantees zero repeats.

/// Largest population the small-group pattern family handles; beyond this
/// the projective family takes over.
pub const SMALL_GROUP_LIMIT: usize = 12;

/// Pattern function over Z/n: `(start, offset, round, population, q)` to a
/// candidate index.
type Pattern = fn(usize, usize, usize, usize, usize) -> usize;

const AFFINE_PATTERNS: &[Pattern] = &[
    |i, j, _r, n, _q| (i + j) % n,
    |i, j, _r, n, _q| (i + j * 2) % n,
    |i, j, _r, n, _q| (i + j * 3) % n,
    |i, j, _r, n, _q| (i * j) % n,
    |i, j, r, n, _q| (i + j + r) % n,
    |i, j, r, n, _q| (i + j * (r + 1)) % n,
    |i, j, r, n, _q| (i * (j + 1) + r) % n,
    |i, j, _r, n, _q| (i + j * (n / 2)) % n,
];

const PROJECTIVE_PATTERNS: &[Pattern] = &[
    |i, j, _r, n, q| (i + j * q) % n,
    |i, j, _r, n, q| (i * q + j) % n,
    |i, j, r, n, q| (i + j + r * q) % n,
    |i, j, r, n, _q| (i * j + r) % n,
    |i, j, r, n, _q| (i + j * (r + 1)) % n,
];

/// Build one round's groups for `population` indices.
///
/// Ascending scan: every unassigned index starts a group, then probes
/// offsets `1..capacity` through the round's pattern, wrapping through
/// `population` extra steps when a candidate is already seated. A slot with
/// no unused candidate stays short; every index still lands in exactly one
/// group.
pub fn build_round(population: usize, capacity: usize, round: usize) -> Vec<Vec<usize>> {
    let q = (population as f64).sqrt().ceil() as usize;
    let patterns = if population <= SMALL_GROUP_LIMIT {
        AFFINE_PATTERNS
    } else {
        PROJECTIVE_PATTERNS
    };
    let pattern = patterns[round % patterns.len()];

    let mut used = vec![false; population];
    let mut groups = Vec::new();

    for start in 0..population {
        if used[start] {
            continue;
        }
        let mut group = vec![start];
        used[start] = true;

        for offset in 1..capacity {
            if group.len() >= capacity {
                break;
            }
            if let Some(candidate) = probe(pattern, start, offset, round, population, q, &used) {
                used[candidate] = true;
                group.push(candidate);
            }
        }

        groups.push(group);
    }

    groups
}

/// First unused candidate reachable from `start` at `offset`, wrapping
/// through the whole index space.
fn probe(
    pattern: Pattern,
    start: usize,
    offset: usize,
    round: usize,
    population: usize,
    q: usize,
    used: &[bool],
) -> Option<usize> {
    (0..population)
        .map(|wrap| pattern(start, offset + wrap, round, population, q))
        .find(|&candidate| !used[candidate])
}

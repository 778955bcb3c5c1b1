//! Permutation operators for tour orders.
//!
//! All operators work on `&[usize]` city-id orders and resolve edge
//! lengths through a [`CityMap`].
//!
//! - [`transposition_mutation`]: per-position random swaps, O(n)
//! - [`greedy_crossover`]: deterministic greedy edge recombination, O(n)
//! - [`two_opt`]: first-improvement 2-opt local search, O(n²) per pass
//!
//! # References
//!
//! - Grefenstette et al. (1985), "Genetic Algorithms for the Traveling
//!   Salesman Problem" (greedy crossover)
//! - Croes (1958), "A Method for Solving Traveling-Salesman Problems" (2-opt)
//! - Sengoku & Yoshihara (1998), "A Fast TSP Solver Using GA on JAVA"

use rand::Rng;

use super::types::check_permutation;
use crate::city::{CityMap, CostMode};
use crate::error::{Result, TspError};

// ============================================================================
// Mutation
// ============================================================================

/// Per-position transposition mutation.
///
/// Walks the order once; each position independently, with probability
/// `ratio`, is swapped with a uniformly chosen position (possibly itself).
/// This is not a full shuffle: with a small ratio most positions stay put.
///
/// Returns the number of swaps performed.
///
/// # Complexity
/// O(n)
pub fn transposition_mutation<R: Rng>(order: &mut [usize], ratio: f64, rng: &mut R) -> usize {
    let n = order.len();
    if n < 2 {
        return 0;
    }
    let mut swaps = 0;
    for i in 0..n {
        if rng.random_range(0.0..1.0) < ratio {
            let j = rng.random_range(0..n);
            order.swap(i, j);
            swaps += 1;
        }
    }
    swaps
}

// ============================================================================
// Crossover
// ============================================================================

/// Greedy crossover of two parent orders.
///
/// Starts from `parent1`'s first city. For the last placed city it looks
/// up the city following it in each parent (the last position wraps to the
/// first) and takes the cheaper edge under `mode`; on equal cost
/// `parent2`'s successor wins. If the preferred successor is already
/// placed the other one is taken. If both are placed, the child continues
/// with the first unplaced city in `parent1`'s order after its head.
/// The operator draws no random numbers, so equal inputs always give equal
/// children. The final unplaced city is appended last.
///
/// # Errors
/// [`TspError::InvalidPermutation`] if the parents are not permutations
/// of the same `0..n` city set.
pub fn greedy_crossover(
    parent1: &[usize],
    parent2: &[usize],
    map: &CityMap,
    mode: CostMode,
) -> Result<Vec<usize>> {
    let n = parent1.len();
    if parent2.len() != n {
        return Err(TspError::InvalidPermutation(format!(
            "parents differ in length: {n} vs {}",
            parent2.len()
        )));
    }
    check_permutation(parent1, n)?;
    check_permutation(parent2, n)?;
    if n < 2 {
        return Ok(parent1.to_vec());
    }

    let next1 = successors(parent1);
    let next2 = successors(parent2);

    let mut placed = vec![false; n];
    let mut child = Vec::with_capacity(n);
    child.push(parent1[0]);
    placed[parent1[0]] = true;

    // Fallback candidates in parent1 order; the cursor only moves forward
    // because placed cities are never unplaced.
    let remaining = &parent1[1..];
    let mut cursor = 0;

    while n - child.len() > 1 {
        let last = child[child.len() - 1];
        let s1 = next1[last];
        let s2 = next2[last];

        let (preferred, other) = if map.cost(last, s1, mode)? < map.cost(last, s2, mode)? {
            (s1, s2)
        } else {
            (s2, s1)
        };

        let pick = if !placed[preferred] {
            preferred
        } else if !placed[other] {
            other
        } else {
            while placed[remaining[cursor]] {
                cursor += 1;
            }
            remaining[cursor]
        };

        placed[pick] = true;
        child.push(pick);
    }

    while placed[remaining[cursor]] {
        cursor += 1;
    }
    child.push(remaining[cursor]);

    Ok(child)
}

/// `next[id]` is the city visited after `id`, wrapping at the end.
fn successors(order: &[usize]) -> Vec<usize> {
    let n = order.len();
    let mut next = vec![0; n];
    for i in 0..n {
        next[order[i]] = order[(i + 1) % n];
    }
    next
}

// ============================================================================
// Local search
// ============================================================================

/// 2-opt local search in place.
///
/// Each pass scans position pairs `(i, j)` with `j >= i + 2` in increasing
/// order and compares edges `(i, i+1)` + `(j, j+1)` against `(i, j)` +
/// `(i+1, j+1)`, indices modulo `n`. A strictly shorter pair is applied at
/// once by reversing `i+1..=j` (first improvement). Passes repeat until one
/// applies no move, at most `n` passes.
///
/// Edges are compared by distance, so the tour length never grows.
///
/// Returns the number of moves applied.
///
/// # Complexity
/// O(n²) distance lookups per pass
pub fn two_opt(order: &mut [usize], map: &CityMap) -> Result<usize> {
    let n = order.len();
    // Below four cities every edge pair shares an endpoint.
    if n < 4 {
        return Ok(0);
    }

    let mut moves = 0;
    for _ in 0..n {
        let mut improved = false;
        for i in 0..n {
            for j in (i + 2)..n {
                let a = order[i];
                let b = order[i + 1];
                let c = order[j];
                let d = order[(j + 1) % n];

                let current = map.distance(a, b)? + map.distance(c, d)?;
                let exchanged = map.distance(a, c)? + map.distance(b, d)?;
                if exchanged < current {
                    order[i + 1..=j].reverse();
                    improved = true;
                    moves += 1;
                }
            }
        }
        if !improved {
            break;
        }
    }
    Ok(moves)
}

// ============================================================================
// Tests
// ============================================================================

//! Winner selection.
//!
//! A thin wrapper over `rand`'s reservoir sampling: every same-size
//! subset of the candidate pool is equally likely, with no weighting by
//! join time or anything else. Stateless, so repeated calls (reroll)
//! are independent draws.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use tombola_types::UserId;

/// Draw `min(count, candidates.len())` distinct winners, uniformly at
/// random without replacement. An empty candidate pool yields an empty
/// vec - "nobody entered" is a reportable outcome, not an error.
pub fn draw_winners(candidates: &HashSet<UserId>, count: u32) -> Vec<UserId> {
    draw_winners_with(candidates, count, &mut rand::thread_rng())
}

/// Seam for deterministic tests: same contract, caller-supplied RNG.
pub fn draw_winners_with<R: Rng + ?Sized>(
    candidates: &HashSet<UserId>,
    count: u32,
    rng: &mut R,
) -> Vec<UserId> {
    let pool: Vec<UserId> = candidates.iter().copied().collect();
    pool.choose_multiple(rng, count as usize).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pool(ids: &[u64]) -> HashSet<UserId> {
        ids.iter().map(|&id| UserId(id)).collect()
    }

    #[test]
    fn test_draw_is_clamped_and_distinct() {
        let candidates = pool(&[1, 2, 3]);
        for k in 0..6u32 {
            let winners = draw_winners(&candidates, k);
            assert_eq!(winners.len(), (k as usize).min(3));

            let unique: HashSet<UserId> = winners.iter().copied().collect();
            assert_eq!(unique.len(), winners.len(), "winners must be distinct");
            assert!(unique.is_subset(&candidates));
        }
    }

    #[test]
    fn test_empty_pool_yields_empty_draw() {
        assert!(draw_winners(&HashSet::new(), 3).is_empty());
    }

    #[test]
    fn test_every_candidate_is_reachable() {
        // Over many seeded draws of 1-of-3, each candidate should show up.
        let candidates = pool(&[10, 20, 30]);
        let mut seen = HashSet::new();
        for seed in 0..64u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            seen.extend(draw_winners_with(&candidates, 1, &mut rng));
        }
        assert_eq!(seen, candidates);
    }

    #[test]
    fn test_repeated_draws_are_independent() {
        // No memoization: two draws with different RNG states may differ,
        // but both must be valid 2-subsets.
        let candidates = pool(&[1, 2, 3, 4, 5]);
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(8);
        let a = draw_winners_with(&candidates, 2, &mut rng_a);
        let b = draw_winners_with(&candidates, 2, &mut rng_b);
        for draw in [&a, &b] {
            assert_eq!(draw.len(), 2);
            assert!(draw.iter().all(|w| candidates.contains(w)));
        }
    }
}

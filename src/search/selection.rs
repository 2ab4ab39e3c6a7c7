//! Tie-break policies for the cascade's fallback tier.

use rand::Rng;

/// How the fallback tier picks one column out of a candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The lowest-indexed candidate.
    First,
    /// The candidate at index `len / 2`.
    Middle,
    /// A uniformly random candidate drawn from the supplied RNG.
    Random,
    /// The first candidate when at most `n` remain, the middle one otherwise.
    FirstWhenNarrow(usize),
}

impl Selection {
    /// Picks a column from `candidates`. Returns `None` only when
    /// `candidates` is empty.
    pub fn pick(self, candidates: &[usize], rng: &mut impl Rng) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }
        let idx = match self {
            Selection::First => 0,
            Selection::Middle => candidates.len() / 2,
            Selection::Random => rng.gen_range(0..candidates.len()),
            Selection::FirstWhenNarrow(n) => {
                if candidates.len() <= n {
                    0
                } else {
                    candidates.len() / 2
                }
            }
        };
        Some(candidates[idx])
    }

    /// The policy used when the safety filter removed every move and the
    /// pick falls back to all valid moves. `FirstWhenNarrow` only applies
    /// to a set of safe moves; otherwise it plays the middle.
    pub fn unfiltered(self) -> Selection {
        match self {
            Selection::FirstWhenNarrow(_) => Selection::Middle,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn fixed_index_policies() {
        let mut rng = SmallRng::seed_from_u64(1);
        let cands = [0, 1, 2, 3, 4, 5, 6];
        assert_eq!(Selection::First.pick(&cands, &mut rng), Some(0));
        assert_eq!(Selection::Middle.pick(&cands, &mut rng), Some(3));
        assert_eq!(Selection::Middle.pick(&[2, 5], &mut rng), Some(5));
        assert_eq!(Selection::FirstWhenNarrow(5).pick(&cands, &mut rng), Some(3));
        assert_eq!(Selection::FirstWhenNarrow(5).pick(&[1, 4, 6], &mut rng), Some(1));
    }

    #[test]
    fn unfiltered_policy_only_changes_first_when_narrow() {
        assert_eq!(Selection::FirstWhenNarrow(5).unfiltered(), Selection::Middle);
        assert_eq!(Selection::First.unfiltered(), Selection::First);
        assert_eq!(Selection::Random.unfiltered(), Selection::Random);
    }

    #[test]
    fn empty_candidates_yield_none() {
        let mut rng = SmallRng::seed_from_u64(1);
        for sel in [
            Selection::First,
            Selection::Middle,
            Selection::Random,
            Selection::FirstWhenNarrow(5),
        ] {
            assert_eq!(sel.pick(&[], &mut rng), None);
        }
    }

    #[test]
    fn random_is_reproducible_with_seed() {
        let cands = [0, 2, 3, 6];
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        let picks_a: Vec<_> = (0..20).map(|_| Selection::Random.pick(&cands, &mut a)).collect();
        let picks_b: Vec<_> = (0..20).map(|_| Selection::Random.pick(&cands, &mut b)).collect();
        assert_eq!(picks_a, picks_b);
        assert!(picks_a.iter().all(|p| p.is_some_and(|c| cands.contains(&c))));
    }
}

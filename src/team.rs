//! Expedition team selection.
//!
//! The search is exhaustive over `C(n, k)` combinations. That is fine for a
//! single account roster with `k = 5` but grows quickly with `n`.

use hero_api::Hero;

/// Heroes sent on one expedition.
pub const TEAM_SIZE: usize = 5;

/// Picks the team of `team_size` heroes with the smallest total power that
/// still reaches `min_power`.
///
/// Combinations are enumerated in lexicographic index order and ties go to
/// the first one found. A team hitting `min_power` exactly ends the search.
pub fn find_team(heroes: &[Hero], min_power: u64, team_size: usize) -> Option<Vec<Hero>> {
    let mut best: Option<(u64, Vec<usize>)> = None;

    for indices in IndexCombinations::new(heroes.len(), team_size) {
        let power = indices
            .iter()
            .fold(0u64, |sum, &index| sum.saturating_add(heroes[index].power));
        if power < min_power {
            continue;
        }
        if best.as_ref().is_some_and(|(best_power, _)| power >= *best_power) {
            continue;
        }

        let exact = power == min_power;
        best = Some((power, indices));
        if exact {
            break;
        }
    }

    best.map(|(_, indices)| indices.into_iter().map(|index| heroes[index]).collect())
}

/// Total power of a team.
pub fn team_power(team: &[Hero]) -> u64 {
    team.iter()
        .fold(0u64, |sum, hero| sum.saturating_add(hero.power))
}

/// `k`-combinations of `0..n` in lexicographic order.
///
/// Yields nothing when `k` is zero or larger than `n`.
#[derive(Debug, Clone)]
struct IndexCombinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl IndexCombinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            done: k == 0 || k > n,
        }
    }

    fn advance(&mut self) {
        let k = self.indices.len();
        let Some(position) = (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) else {
            self.done = true;
            return;
        };

        self.indices[position] += 1;
        for next in position + 1..k {
            self.indices[next] = self.indices[next - 1] + 1;
        }
    }
}

impl Iterator for IndexCombinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();
        self.advance();
        Some(current)
    }
}

use crate::key::PermutationKey;
use crate::optimizer::Member;
use fastrand::Rng;

/// Draws `size` members uniformly with replacement and returns the index of the fittest.
///
/// A tournament at least as large as the population is decided without
/// sampling: it always returns the globally fittest member. Ties go to the
/// earliest candidate. `population` must not be empty.
pub fn tournament_index(population: &[Member], size: usize, rng: &mut Rng) -> usize {
    debug_assert!(!population.is_empty());
    if size >= population.len() {
        return fittest_index(population);
    }

    let mut best = rng.usize(0..population.len());
    for _ in 1..size {
        let idx = rng.usize(0..population.len());
        if population[idx].fitness > population[best].fitness {
            best = idx;
        }
    }
    best
}

/// Like [`fittest_index`] but `None` for an empty population.
pub fn fittest_index_checked(population: &[Member]) -> Option<usize> {
    if population.is_empty() {
        None
    } else {
        Some(fittest_index(population))
    }
}

pub fn fittest_index(population: &[Member]) -> usize {
    let mut best = 0;
    for (i, m) in population.iter().enumerate().skip(1) {
        if m.fitness > population[best].fitness {
            best = i;
        }
    }
    best
}

/// Tournament selection returning an independent copy of the winner's key.
pub fn tournament(population: &[Member], size: usize, rng: &mut Rng) -> PermutationKey {
    population[tournament_index(population, size, rng)].key.clone()
}

use crate::consts::{ALPHABET_LEN, SHOCK_DISCARD_RATIO};
use crate::error::{CfResult, CipherError};
use crate::key::PermutationKey;
use crate::optimizer::initialization::random_key;
use fastrand::Rng;

/// Swaps the destinations of two distinct random positions. Origins stay fixed.
pub fn mutate(key: &mut PermutationKey, rng: &mut Rng) -> CfResult<()> {
    if !key.is_complete() {
        return Err(CipherError::IncompleteKey { len: key.len() });
    }

    let i = rng.usize(0..ALPHABET_LEN);
    let mut j = rng.usize(0..ALPHABET_LEN - 1);
    if j >= i {
        j += 1;
    }

    transpose(key, i, j)
}

/// Exchanges the destinations at sorted positions `i` and `j`.
pub fn transpose(key: &mut PermutationKey, i: usize, j: usize) -> CfResult<()> {
    let incomplete = || CipherError::IncompleteKey { len: key.len() };
    let a = key.mappings().get(i).copied().ok_or_else(incomplete)?;
    let b = key.mappings().get(j).copied().ok_or_else(incomplete)?;
    if i == j {
        return Ok(());
    }

    key.remove(a.origin, a.destination);
    key.remove(b.origin, b.destination);
    key.insert(a.origin, b.destination)?;
    key.insert(b.origin, a.destination)?;
    Ok(())
}

/// Diversity injection after prolonged stagnation.
///
/// Members scoring above `0.9 * best_fitness` are replaced by fresh random keys;
/// every other member is mutated once. `fitness[i]` belongs to `members[i]`.
pub fn shock(
    members: Vec<PermutationKey>,
    fitness: &[f64],
    best_fitness: f64,
    rng: &mut Rng,
) -> CfResult<Vec<PermutationKey>> {
    let cutoff = SHOCK_DISCARD_RATIO * best_fitness;

    members
        .into_iter()
        .zip(fitness.iter())
        .map(|(mut key, &f)| {
            if f > cutoff {
                Ok(random_key(rng))
            } else {
                mutate(&mut key, rng)?;
                Ok(key)
            }
        })
        .collect()
}

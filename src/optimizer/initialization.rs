use crate::consts::{ALPHABET, ALPHABET_LEN};
use crate::key::PermutationKey;
use fastrand::Rng;

/// Uniformly random complete key: identity origins, Fisher-Yates shuffled destinations.
pub fn random_key(rng: &mut Rng) -> PermutationKey {
    let mut destinations: [u8; ALPHABET_LEN] = *ALPHABET;
    rng.shuffle(&mut destinations);
    PermutationKey::from_permutation(&destinations)
}

pub fn random_population(rng: &mut Rng, size: usize) -> Vec<PermutationKey> {
    (0..size).map(|_| random_key(rng)).collect()
}

pub mod blocks;
pub mod loader;

pub use self::loader::{load_frequency_table, read_frequency_table, FrequencyModel};

use crate::key::PermutationKey;
use fnv::FnvHashMap;
use std::sync::Arc;

/// Scores candidate keys by how well their decryption's blocks match the model.
///
/// The score is `sum(log2(model_count(block)) * local_count(block))` over the
/// blocks of every space-separated token. Blocks the model has never seen add
/// nothing. Higher is fitter; values only compare within one ciphertext.
#[derive(Clone)]
pub struct Scorer {
    model: Arc<FrequencyModel>,
}

impl Scorer {
    pub fn new(model: Arc<FrequencyModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &FrequencyModel {
        &self.model
    }

    /// Decrypts `cipher_text` with `key` and scores the result.
    pub fn score(&self, key: &PermutationKey, cipher_text: &str) -> f64 {
        self.score_plain(&key.apply(cipher_text))
    }

    /// Scores already-decrypted text.
    pub fn score_plain(&self, plain: &str) -> f64 {
        let tally = self.tally(plain);
        tally
            .iter()
            .filter_map(|(block, &local)| {
                self.model
                    .count_of(block)
                    .map(|count| (count as f64).log2() * local as f64)
            })
            .sum()
    }

    /// Counts every block of every token. Blocks longer than the model's longest are skipped.
    pub fn tally<'a>(&self, plain: &'a str) -> FnvHashMap<&'a str, u32> {
        let cap = self.model.max_block_len();
        let mut tally: FnvHashMap<&'a str, u32> = FnvHashMap::default();
        for token in plain.split(' ') {
            for block in blocks::blocks(token, cap) {
                *tally.entry(block).or_default() += 1;
            }
        }
        tally
    }
}

#![allow(dead_code)]

use cipherforge::config::SearchParams;
use cipherforge::oracle::WordOracle;
use cipherforge::scorer::FrequencyModel;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Accepts every decryption.
pub struct AcceptAll;

impl WordOracle for AcceptAll {
    fn unknown_words(&self, _text: &str) -> BTreeSet<String> {
        BTreeSet::new()
    }
}

/// Rejects every decryption, so runs only stop on a budget.
pub struct RejectAll;

impl WordOracle for RejectAll {
    fn unknown_words(&self, text: &str) -> BTreeSet<String> {
        let mut unknown: BTreeSet<String> = text.split(' ').map(str::to_string).collect();
        unknown.insert(String::new());
        unknown
    }
}

/// The `{a: 10, ab: 3}` model used across the scoring tests.
pub fn tiny_model() -> FrequencyModel {
    FrequencyModel::from_counts(vec![("a", 10), ("ab", 3)])
}

pub fn english_model() -> Arc<FrequencyModel> {
    Arc::new(cipherforge::corpus::model_from_corpus(
        "the quick brown fox jumps over the lazy dog and then the dog sleeps \
         while the fox runs through the forest on the other side of the hill",
    ))
}

/// A small, fast population for engine tests.
pub fn small_search(max_cycles: usize) -> SearchParams {
    SearchParams {
        elites: 2,
        children: 12,
        randoms: 4,
        tournament_size: 3,
        crossover_probability: 0.7,
        mutation_probability: 0.3,
        shock_threshold: 0,
        max_cycles,
    }
}

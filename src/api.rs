use crate::config::SearchParams;
use crate::error::CfResult;
use crate::key::PermutationKey;
use crate::optimizer::{Incubator, IncubatorParams, ProgressCallback, TrainingOutcome};
use crate::oracle::{Dictionary, WordOracle};
use crate::scorer::{load_frequency_table, FrequencyModel, Scorer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// The read-only data every run needs: the block model and the word list.
/// Load once, then build as many incubators as needed.
#[derive(Clone)]
pub struct Session {
    model: Arc<FrequencyModel>,
    dictionary: Arc<Dictionary>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub key: PermutationKey,
    pub plain_text: String,
    pub fitness: f64,
    pub unknown_words: Vec<String>,
    pub solved: bool,
}

impl Session {
    pub fn new(model: FrequencyModel, dictionary: Dictionary) -> Self {
        Self {
            model: Arc::new(model),
            dictionary: Arc::new(dictionary),
        }
    }

    /// Loads the frequency table and the word list, merging an optional
    /// supplementary list into the dictionary.
    pub fn load<P1, P2, P3>(table: P1, words: P2, supplement: Option<P3>) -> CfResult<Self>
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
        P3: AsRef<Path>,
    {
        let model = load_frequency_table(table)?;
        let mut dictionary = Dictionary::load(words)?;
        if let Some(extra) = supplement {
            dictionary.add_word_list(extra)?;
        }
        info!(
            "Session ready: {} blocks, {} words",
            model.len(),
            dictionary.len()
        );
        Ok(Self::new(model, dictionary))
    }

    pub fn model(&self) -> &Arc<FrequencyModel> {
        &self.model
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    pub fn incubator(&self, search: SearchParams, max_time: Option<Duration>) -> CfResult<Incubator> {
        let oracle: Arc<dyn WordOracle> = self.dictionary.clone();
        IncubatorParams::builder()
            .model(self.model.clone())
            .oracle(oracle)
            .search(search)
            .max_time(max_time)
            .build()
            .build_incubator()
    }

    /// Runs one training attempt against `cipher_text`.
    pub fn crack<CB: ProgressCallback + ?Sized>(
        &self,
        cipher_text: &str,
        search: SearchParams,
        max_time: Option<Duration>,
        seed: Option<u64>,
        callback: &CB,
    ) -> CfResult<TrainingOutcome> {
        self.incubator(search, max_time)?
            .train(cipher_text, seed, callback)
    }

    /// Scores a single key without running the search.
    pub fn score_key(&self, key: &PermutationKey, cipher_text: &str) -> ScoreReport {
        let plain_text = key.apply(cipher_text);
        let fitness = Scorer::new(self.model.clone()).score_plain(&plain_text);
        let unknown_words: Vec<String> = self
            .dictionary
            .unknown_words(&plain_text)
            .into_iter()
            .collect();
        let solved = unknown_words.is_empty();

        ScoreReport {
            key: key.clone(),
            plain_text,
            fitness,
            unknown_words,
            solved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn session() -> Session {
        let mut counts = BTreeMap::new();
        counts.insert("a".to_string(), 10u64);
        counts.insert("ab".to_string(), 3u64);
        Session::new(
            FrequencyModel::from_counts(counts),
            Dictionary::from_words(["ab", "a"]),
        )
    }

    #[test]
    fn test_score_key_lists_unknown_words() {
        let s = session();
        let report = s.score_key(&PermutationKey::identity(), "ab a zz");
        assert_eq!(report.unknown_words, vec!["zz".to_string()]);
        assert!(!report.solved);
        assert_eq!(report.plain_text, "ab a zz");
    }

    #[test]
    fn test_score_report_uses_camel_case() {
        let s = session();
        let report = s.score_key(&PermutationKey::identity(), "ab");
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"plainText\":\"ab\""));
        assert!(json.contains("\"key\":\"abcdefghijklmnopqrstuvwxyz\""));
    }
}

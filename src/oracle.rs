use crate::error::CfResult;
use fnv::FnvHashSet;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// Decides whether a candidate decryption reads as real words.
///
/// The engine only uses this as a stop test: an empty result means solved.
pub trait WordOracle: Send + Sync {
    /// Returns the whitespace-delimited tokens of `text` that are not recognized words.
    fn unknown_words(&self, text: &str) -> BTreeSet<String>;

    fn is_solved(&self, text: &str) -> bool {
        self.unknown_words(text).is_empty()
    }
}

/// A word-list backed oracle. Lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: FnvHashSet<String>,
}

impl Dictionary {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::default();
        dict.extend(words);
        dict
    }

    /// Loads a word list, one word per line. Blank lines are ignored.
    pub fn load<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let mut dict = Self::default();
        dict.add_word_list(path)?;
        Ok(dict)
    }

    /// Merges a supplementary word list into this dictionary.
    pub fn add_word_list<P: AsRef<Path>>(&mut self, path: P) -> CfResult<usize> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let before = self.words.len();
        self.extend(content.lines());
        let added = self.words.len() - before;
        info!("📖 Loaded {} words from {}", added, path.display());
        Ok(added)
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for w in words {
            let w = w.as_ref().trim();
            if !w.is_empty() {
                self.words.insert(w.to_lowercase());
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordOracle for Dictionary {
    fn unknown_words(&self, text: &str) -> BTreeSet<String> {
        text.split_whitespace()
            .filter(|token| !self.contains(token))
            .map(str::to_string)
            .collect()
    }

    fn is_solved(&self, text: &str) -> bool {
        text.split_whitespace().all(|token| self.contains(token))
    }
}

use crate::consts::in_alphabet;
use crate::error::{CfResult, CipherError};
use fnv::FnvHashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Reference block counts built from a corpus. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct FrequencyModel {
    counts: FnvHashMap<String, u64>,
    max_block_len: usize,
}

impl FrequencyModel {
    /// Builds a model from in-memory counts. Zero counts are dropped.
    pub fn from_counts<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut counts = FnvHashMap::default();
        let mut max_block_len = 0;
        for (block, count) in entries {
            if count == 0 {
                continue;
            }
            let block = block.into();
            max_block_len = max_block_len.max(block.chars().count());
            counts.insert(block, count);
        }
        Self {
            counts,
            max_block_len,
        }
    }

    #[inline]
    pub fn count_of(&self, block: &str) -> Option<u64> {
        self.counts.get(block).copied()
    }

    /// Length of the longest block in the table. Longer blocks can never match.
    #[inline]
    pub fn max_block_len(&self) -> usize {
        self.max_block_len
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// Loads a `<block> <count>` table from disk.
pub fn load_frequency_table<P: AsRef<Path>>(path: P) -> CfResult<FrequencyModel> {
    let path = path.as_ref();
    info!("📚 Loading frequency table: {}", path.display());
    let file = File::open(path)?;
    let model = read_frequency_table(file)?;
    info!(
        "   -> {} blocks (longest: {} chars)",
        model.len(),
        model.max_block_len()
    );
    Ok(model)
}

/// Parses a `<block> <count>` table. Any malformed line fails the whole load.
pub fn read_frequency_table<R: Read>(reader: R) -> CfResult<FrequencyModel> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut counts: FnvHashMap<String, u64> = FnvHashMap::default();
    let mut max_block_len = 0;

    for result in rdr.records() {
        let rec = result?;
        let line = rec.position().map(|p| p.line() as usize).unwrap_or(0);

        let format_err = |reason: String| CipherError::Format { line, reason };

        if rec.len() != 2 {
            return Err(format_err(format!(
                "expected '<block> <count>', found {} fields",
                rec.len()
            )));
        }

        let block = &rec[0];
        if block.is_empty() || !block.bytes().all(in_alphabet) {
            return Err(format_err(format!(
                "block '{}' is not lowercase alphabetic",
                block
            )));
        }

        let count: u64 = rec[1]
            .parse()
            .map_err(|_| format_err(format!("count '{}' is not a whole number", &rec[1])))?;
        if count == 0 {
            return Err(format_err(format!("block '{}' has a zero count", block)));
        }

        if counts.insert(block.to_string(), count).is_some() {
            return Err(format_err(format!("block '{}' appears twice", block)));
        }
        max_block_len = max_block_len.max(block.len());
    }

    debug!("Parsed {} table entries", counts.len());

    Ok(FrequencyModel {
        counts,
        max_block_len,
    })
}

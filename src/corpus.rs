use crate::error::CfResult;
use crate::scorer::blocks::blocks;
use crate::scorer::FrequencyModel;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Splits raw text into lowercase words, breaking on anything non-alphabetic.
pub fn tokenize(content: &str) -> Vec<String> {
    content
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_ascii_lowercase())
        .collect()
}

/// Normalizes free text into the form the engine expects: lowercase words
/// separated by single spaces, everything else dropped.
pub fn normalize(content: &str) -> String {
    tokenize(content).join(" ")
}

/// Counts every block of every word. Sorted by block.
pub fn count_blocks<S: AsRef<str>>(words: &[S]) -> BTreeMap<String, u64> {
    let mut table: BTreeMap<String, u64> = BTreeMap::new();
    for word in words {
        for block in blocks(word.as_ref(), usize::MAX) {
            *table.entry(block.to_string()).or_default() += 1;
        }
    }
    table
}

/// Generates the `<block> <count>` table text for a raw corpus.
pub fn generate_table(content: &str) -> String {
    let mut output = String::new();
    for (block, count) in count_blocks(&tokenize(content)) {
        output.push_str(&block);
        output.push(' ');
        output.push_str(&count.to_string());
        output.push('\n');
    }
    output
}

/// Builds a model straight from a corpus, skipping the table file.
pub fn model_from_corpus(content: &str) -> FrequencyModel {
    FrequencyModel::from_counts(count_blocks(&tokenize(content)))
}

/// Reads a corpus file and writes its frequency table. Returns the number of distinct blocks.
pub fn build_table_file<P1: AsRef<Path>, P2: AsRef<Path>>(
    corpus_path: P1,
    output_path: P2,
) -> CfResult<usize> {
    let corpus_path = corpus_path.as_ref();
    let output_path = output_path.as_ref();

    info!("📂 Reading corpus: {}", corpus_path.display());
    let content = std::fs::read_to_string(corpus_path)?;
    let words = tokenize(&content);
    info!("   -> {} words", words.len());

    let table = count_blocks(&words);

    info!("💾 Writing {} blocks to {}", table.len(), output_path.display());
    let mut out = BufWriter::new(File::create(output_path)?);
    for (block, count) in &table {
        writeln!(out, "{} {}", block, count)?;
    }
    out.flush()?;

    Ok(table.len())
}

pub mod build_table;
pub mod encrypt;
pub mod score;
pub mod train;

use cipherforge::corpus::normalize;
use cipherforge::error::{CfResult, CipherError};
use clap::Args;
use std::fs;

/// Where a command reads its text from.
#[derive(Args, Debug, Clone)]
pub struct TextSource {
    /// Text given inline.
    #[arg(long, conflicts_with = "input")]
    pub text: Option<String>,

    /// File holding the text.
    #[arg(short, long)]
    pub input: Option<String>,
}

impl TextSource {
    /// Reads the text and normalizes it to lowercase words separated by single spaces.
    pub fn read(&self) -> CfResult<String> {
        let raw = match (&self.text, &self.input) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => fs::read_to_string(path)?,
            (None, None) => {
                return Err(CipherError::Config(
                    "no text given: pass --text or --input".to_string(),
                ))
            }
        };
        Ok(normalize(&raw))
    }
}

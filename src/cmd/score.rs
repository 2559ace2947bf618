use super::TextSource;
use crate::reports;
use cipherforge::api::Session;
use cipherforge::error::CfResult;
use cipherforge::key::PermutationKey;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Decryption key as the 26 letters `a..z` map to.
    #[arg(short, long)]
    pub key: String,

    #[command(flatten)]
    pub source: TextSource,
}

pub fn run(args: ScoreArgs, session: &Session) -> CfResult<()> {
    let key: PermutationKey = args.key.parse()?;
    let cipher_text = args.source.read()?;

    let report = session.score_key(&key, &cipher_text);
    reports::print_score(&report);
    reports::print_key_table("KEY", &key);
    Ok(())
}

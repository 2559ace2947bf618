use cipherforge::corpus::build_table_file;
use cipherforge::error::CfResult;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct BuildTableArgs {
    /// Raw text corpus.
    #[arg(short, long)]
    pub corpus: String,

    /// Where to write the `<block> <count>` table.
    #[arg(short, long)]
    pub output: String,
}

pub fn run(args: BuildTableArgs) -> CfResult<()> {
    let blocks = build_table_file(&args.corpus, &args.output)?;
    println!("Wrote {} blocks to {}", blocks, args.output);
    Ok(())
}

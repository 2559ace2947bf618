use cipherforge::api::Session;
use cipherforge::config::{Config, SearchParams};
use cipherforge::error::CfResult;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Block frequency table (`<block> <count>` per line).
    #[arg(global = true, short, long, default_value = "data/blocks.txt")]
    table: String,

    /// Word list, one word per line.
    #[arg(global = true, short, long, default_value = "data/words.txt")]
    words: String,

    /// Extra words merged into the word list.
    #[arg(global = true, long)]
    supplement: Option<String>,

    /// JSON search parameters. Flags typed on the command line override it.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Break a ciphertext with the genetic search.
    Train(cmd::train::TrainArgs),
    /// Score a ciphertext under a given key.
    Score(cmd::score::ScoreArgs),
    /// Encrypt plaintext with a given or random key.
    Encrypt(cmd::encrypt::EncryptArgs),
    /// Build a frequency table from a raw corpus.
    BuildTable(cmd::build_table::BuildTableArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    if let Err(e) = run(&cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, matches: &ArgMatches) -> CfResult<()> {
    match &cli.command {
        Commands::Train(args) => {
            let search = resolve_search(
                &args.config,
                cli.config.as_deref(),
                matches.subcommand_matches("train"),
            )?;
            let session = load_session(cli)?;
            cmd::train::run(args.clone(), search, &session, cli.debug)
        }
        Commands::Score(args) => {
            let session = load_session(cli)?;
            cmd::score::run(args.clone(), &session)
        }
        Commands::Encrypt(args) => cmd::encrypt::run(args.clone()),
        Commands::BuildTable(args) => cmd::build_table::run(args.clone()),
    }
}

fn load_session(cli: &Cli) -> CfResult<Session> {
    info!("🚀 Initializing CipherForge...");
    Session::load(&cli.table, &cli.words, cli.supplement.as_ref())
}

/// JSON file first, then only the flags the user actually typed.
fn resolve_search(
    cli_config: &Config,
    path: Option<&str>,
    sub_matches: Option<&ArgMatches>,
) -> CfResult<SearchParams> {
    let Some(path) = path else {
        return Ok(cli_config.search.clone());
    };

    let mut config = Config::load_from_file(path)?;
    if let Some(sub) = sub_matches {
        config.search.merge_from_cli(&cli_config.search, sub);
    }
    config.search.validate()?;
    Ok(config.search)
}

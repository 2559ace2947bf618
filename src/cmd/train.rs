use super::TextSource;
use crate::reports;
use cipherforge::api::Session;
use cipherforge::config::{Config, SearchParams};
use cipherforge::error::CfResult;
use cipherforge::optimizer::{GenerationReport, ProgressCallback, TrainingOutcome};
use clap::Args;
use std::fs;
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub source: TextSource,

    /// Wall-clock budget in seconds, shared by all attempts.
    #[arg(short = 'T', long)]
    pub time: Option<u64>,

    #[arg(short = 'a', long)]
    pub attempts: Option<usize>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Write the final outcome as JSON.
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Prints a progress line every `interval` generations and on every shock.
struct CliLogger {
    interval: usize,
}

impl ProgressCallback for CliLogger {
    fn on_generation(&self, report: &GenerationReport<'_>) -> bool {
        if report.shocked {
            println!(
                "    ⚡ Shock at gen {} (champion {:.2})",
                report.cycle, report.champion_fitness
            );
        }
        if report.cycle % self.interval == 0 {
            println!(
                "Gen {:5} | Best: {:10.2} | Mean: {:10.2} | Stagnant: {:3} | {}",
                report.cycle,
                report.best_fitness,
                report.mean_fitness,
                report.stagnation,
                report.best_key
            );
        }
        true
    }
}

/// Seed for the 1-based `attempt`. Wraps instead of overflowing near `u64::MAX`.
fn attempt_seed(base: u64, attempt: usize) -> u64 {
    base.wrapping_add((attempt as u64).wrapping_sub(1).wrapping_mul(100))
}

pub fn run(args: TrainArgs, search: SearchParams, session: &Session, debug: bool) -> CfResult<()> {
    let cipher_text = args.source.read()?;
    println!("🔐 Ciphertext: {}", cipher_text);

    let max_duration = args.time.map(Duration::from_secs);
    let max_attempts = match (args.time, args.attempts) {
        (_, Some(a)) => a.max(1),
        (Some(_), None) => usize::MAX,
        (None, None) => 1,
    };

    let logger = CliLogger {
        interval: if debug { 10 } else { 50 },
    };

    let total_start_time = Instant::now();
    let mut best: Option<TrainingOutcome> = None;
    let mut attempt_count = 0;

    while attempt_count < max_attempts {
        let remaining = match max_duration {
            Some(limit) => match limit.checked_sub(total_start_time.elapsed()) {
                Some(left) if !left.is_zero() => Some(left),
                _ => break,
            },
            None => None,
        };
        attempt_count += 1;

        println!(
            "\n➡️  Attempt #{} (Best: {:.2})",
            attempt_count,
            best.as_ref().map_or(0.0, |b| b.fitness)
        );

        let seed = args.seed.map(|s| attempt_seed(s, attempt_count));
        let outcome = session.crack(&cipher_text, search.clone(), remaining, seed, &logger)?;
        info!(
            "Attempt #{} finished: {} after {} cycles (fitness {:.2})",
            attempt_count, outcome.reason, outcome.cycles, outcome.fitness
        );

        let solved = outcome.is_solved();
        let improved = match &best {
            Some(b) => solved || (!b.is_solved() && outcome.fitness > b.fitness),
            None => true,
        };
        if improved {
            best = Some(outcome);
        }
        if solved {
            break;
        }
    }

    let Some(best) = best else {
        println!("No attempt ran within the time budget.");
        return Ok(());
    };

    println!("\n=== 🏆 FINAL RESULT ===");
    reports::print_outcome(&best, attempt_count, total_start_time.elapsed());
    reports::print_key_table("DECRYPTION KEY", &best.key);

    if let Some(path) = &args.output {
        fs::write(path, serde_json::to_string_pretty(&best)?)?;
        info!("💾 Outcome written to {}", path);
    }

    Ok(())
}

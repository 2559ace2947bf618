use crate::consts::PROBABILITY_EPSILON;
use crate::error::{CfResult, CipherError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let path = path.as_ref();
        info!("⚙️  Loading config from: {}", path.display());
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.search.validate()?;
        Ok(config)
    }
}

/// Genetic search parameters. Fixed for the lifetime of one training run.
#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchParams {
    /// Fittest members copied unchanged into the next generation.
    #[arg(long, default_value_t = 10)]
    pub elites: usize,
    /// Members bred from tournament winners each generation.
    #[arg(long, default_value_t = 150)]
    pub children: usize,
    /// Fresh random members added each generation.
    #[arg(long, default_value_t = 40)]
    pub randoms: usize,
    #[arg(long, default_value_t = 8)]
    pub tournament_size: usize,
    #[arg(long, default_value_t = 0.7)]
    pub crossover_probability: f64,
    #[arg(long, default_value_t = 0.3)]
    pub mutation_probability: f64,
    /// Generations without improvement before a shock. 0 disables shocks.
    #[arg(long, default_value_t = 25)]
    pub shock_threshold: usize,
    #[arg(long, default_value_t = 500)]
    pub max_cycles: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            elites: 10,
            children: 150,
            randoms: 40,
            tournament_size: 8,
            crossover_probability: 0.7,
            mutation_probability: 0.3,
            shock_threshold: 25,
            max_cycles: 500,
        }
    }
}

impl SearchParams {
    #[inline]
    pub fn population_size(&self) -> usize {
        self.elites + self.children + self.randoms
    }

    #[inline]
    pub fn shock_enabled(&self) -> bool {
        self.shock_threshold > 0
    }

    pub fn validate(&self) -> CfResult<()> {
        for (name, p) in [
            ("crossover_probability", self.crossover_probability),
            ("mutation_probability", self.mutation_probability),
        ] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(CipherError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }

        let sum = self.crossover_probability + self.mutation_probability;
        if (sum - 1.0).abs() > PROBABILITY_EPSILON {
            return Err(CipherError::Config(format!(
                "crossover_probability + mutation_probability must equal 1, got {}",
                sum
            )));
        }

        if self.population_size() == 0 {
            return Err(CipherError::Config(
                "population is empty: elites + children + randoms must be > 0".to_string(),
            ));
        }

        if self.children > 0 && self.tournament_size == 0 {
            return Err(CipherError::Config(
                "tournament_size must be > 0 when breeding children".to_string(),
            ));
        }

        Ok(())
    }

    /// Overlays only the values the user actually typed on the command line.
    pub fn merge_from_cli(&mut self, cli: &SearchParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(elites, "elites");
        update_if_present!(children, "children");
        update_if_present!(randoms, "randoms");
        update_if_present!(tournament_size, "tournament_size");
        update_if_present!(crossover_probability, "crossover_probability");
        update_if_present!(mutation_probability, "mutation_probability");
        update_if_present!(shock_threshold, "shock_threshold");
        update_if_present!(max_cycles, "max_cycles");
    }
}

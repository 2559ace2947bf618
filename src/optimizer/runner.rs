use crate::config::SearchParams;
use crate::error::{CfResult, CipherError};
use crate::key::PermutationKey;
use crate::optimizer::crossover::crossover;
use crate::optimizer::initialization::{random_key, random_population};
use crate::optimizer::mutation::{self, mutate};
use crate::optimizer::selection::tournament;
use crate::optimizer::{Generation, Member};
use crate::oracle::WordOracle;
use crate::scorer::{FrequencyModel, Scorer};
use fastrand::Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use strum_macros::{Display, EnumString};
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The oracle recognized every word of a decryption.
    Solved,
    /// `max_cycles` generations were bred without an exact match.
    CycleLimit,
    TimeLimit,
    /// The progress callback asked to stop.
    Aborted,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingOutcome {
    pub key: PermutationKey,
    pub plain_text: String,
    pub fitness: f64,
    pub cycles: usize,
    pub reason: StopReason,
}

impl TrainingOutcome {
    pub fn is_solved(&self) -> bool {
        self.reason == StopReason::Solved
    }
}

/// Snapshot handed to the progress callback once per generation.
#[derive(Debug)]
pub struct GenerationReport<'a> {
    pub cycle: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub champion_fitness: f64,
    pub stagnation: usize,
    pub shocked: bool,
    pub best_key: &'a PermutationKey,
}

/// Receives updates during training.
/// Returning `false` stops the run after the current generation.
pub trait ProgressCallback: Send + Sync {
    fn on_generation(&self, report: &GenerationReport<'_>) -> bool;
}

/// A callback that never interrupts.
pub struct Silent;

impl ProgressCallback for Silent {
    fn on_generation(&self, _report: &GenerationReport<'_>) -> bool {
        true
    }
}

/// Tracks how long the population has gone without beating its best fitness.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stagnation {
    pub best: f64,
    pub count: usize,
}

impl Stagnation {
    /// Returns true when `generation_best` improved on the best so far.
    pub fn observe(&mut self, generation_best: f64) -> bool {
        if generation_best > self.best {
            self.best = generation_best;
            self.count = 0;
            true
        } else {
            self.count += 1;
            false
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(TypedBuilder)]
pub struct IncubatorParams {
    pub model: Arc<FrequencyModel>,
    pub oracle: Arc<dyn WordOracle>,
    #[builder(default)]
    pub search: SearchParams,
    #[builder(default)]
    pub max_time: Option<Duration>,
}

impl IncubatorParams {
    pub fn build_incubator(self) -> CfResult<Incubator> {
        let mut incubator = Incubator::new(self.model, self.oracle, self.search)?;
        incubator.max_time = self.max_time;
        Ok(incubator)
    }
}

/// The genetic engine: owns the configuration and the read-only scoring state,
/// and breeds populations of keys toward a decryption.
pub struct Incubator {
    scorer: Scorer,
    oracle: Arc<dyn WordOracle>,
    search: SearchParams,
    max_time: Option<Duration>,
}

impl Incubator {
    /// Fails with a configuration error if `search` is inconsistent.
    pub fn new(
        model: Arc<FrequencyModel>,
        oracle: Arc<dyn WordOracle>,
        search: SearchParams,
    ) -> CfResult<Self> {
        search.validate()?;
        Ok(Self {
            scorer: Scorer::new(model),
            oracle,
            search,
            max_time: None,
        })
    }

    pub fn search(&self) -> &SearchParams {
        &self.search
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Breaks `cipher_text`, returning either the key that decrypts it to known
    /// words or, once a budget runs out, the fittest key seen.
    ///
    /// `cycles` counts breeding rounds: a match in the seed population reports 0,
    /// and exhausting `max_cycles = N` reports N.
    pub fn train<CB: ProgressCallback + ?Sized>(
        &self,
        cipher_text: &str,
        seed: Option<u64>,
        callback: &CB,
    ) -> CfResult<TrainingOutcome> {
        let opts = &self.search;
        let mut rng = if let Some(s) = seed {
            Rng::with_seed(s)
        } else {
            Rng::new()
        };
        let start_time = Instant::now();

        info!(
            "🧬 Training: population {} ({} elites / {} children / {} randoms), max {} cycles",
            opts.population_size(),
            opts.elites,
            opts.children,
            opts.randoms,
            opts.max_cycles
        );

        let mut keys = random_population(&mut rng, opts.population_size());
        let mut stagnation = Stagnation::default();
        let mut champion: Option<Member> = None;
        let mut cycle = 0;

        loop {
            // EVALUATE
            let (generation, solved) = self.evaluate(keys, cipher_text, cycle);

            if let Some(idx) = solved {
                let winner = &generation.members[idx];
                info!("✅ Solved at cycle {} (fitness {:.2})", cycle, winner.fitness);
                return Ok(self.outcome(winner, cipher_text, cycle, StopReason::Solved));
            }

            let Some(best) = generation.best().cloned() else {
                return Err(CipherError::Config("population is empty".to_string()));
            };
            if champion.as_ref().map_or(true, |c| best.fitness > c.fitness) {
                champion = Some(best.clone());
            }
            let champion_ref = champion.as_ref().unwrap_or(&best);
            stagnation.observe(best.fitness);

            // CHECK_TERMINATION
            if cycle >= opts.max_cycles {
                info!(
                    "⏹  Cycle limit reached ({}); best fitness {:.2}",
                    cycle, champion_ref.fitness
                );
                return Ok(self.outcome(champion_ref, cipher_text, cycle, StopReason::CycleLimit));
            }

            if let Some(limit) = self.max_time {
                if start_time.elapsed() >= limit {
                    info!("⏱  Time limit reached at cycle {}", cycle);
                    return Ok(self.outcome(champion_ref, cipher_text, cycle, StopReason::TimeLimit));
                }
            }

            // BREED
            let mut next = self.breed(&generation, &mut rng)?;

            // MAYBE_SHOCK
            let shocked = opts.shock_enabled() && stagnation.count >= opts.shock_threshold;
            if shocked {
                warn!(
                    "⚡ Genetic shock after {} stagnant cycles (best {:.2})",
                    stagnation.count, stagnation.best
                );
                next = self.shock(next, cipher_text, stagnation.best, &mut rng)?;
                stagnation.reset();
            }

            let report = GenerationReport {
                cycle,
                best_fitness: best.fitness,
                mean_fitness: generation.mean_fitness(),
                champion_fitness: champion_ref.fitness,
                stagnation: stagnation.count,
                shocked,
                best_key: &best.key,
            };
            debug!(
                "Gen {:5} | best {:10.2} | mean {:10.2} | stagnant {:3}",
                report.cycle, report.best_fitness, report.mean_fitness, report.stagnation
            );

            if !callback.on_generation(&report) {
                info!("Training aborted by callback at cycle {}", cycle);
                return Ok(self.outcome(champion_ref, cipher_text, cycle, StopReason::Aborted));
            }

            keys = next;
            cycle += 1;
        }
    }

    /// Scores every key and finds the first one the oracle accepts.
    ///
    /// Scoring and oracle checks run in parallel; the returned index is the
    /// lowest solving member, so results do not depend on thread scheduling.
    pub fn evaluate(
        &self,
        keys: Vec<PermutationKey>,
        cipher_text: &str,
        index: usize,
    ) -> (Generation, Option<usize>) {
        let evaluated: Vec<(Member, bool)> = keys
            .into_par_iter()
            .map(|key| {
                let plain = key.apply(cipher_text);
                let fitness = self.scorer.score_plain(&plain);
                let solved = self.oracle.is_solved(&plain);
                (Member { key, fitness }, solved)
            })
            .collect();

        let solved = evaluated.iter().position(|(_, ok)| *ok);
        let members = evaluated.into_iter().map(|(m, _)| m).collect();

        (Generation { index, members }, solved)
    }

    /// Builds the next population: elites, then bred children, then randoms.
    pub fn breed(&self, generation: &Generation, rng: &mut Rng) -> CfResult<Vec<PermutationKey>> {
        let opts = &self.search;
        let ranked = generation.ranked();
        let mut next = Vec::with_capacity(opts.population_size());

        next.extend(ranked.iter().take(opts.elites).map(|m| m.key.clone()));

        if !ranked.is_empty() {
            next.extend(self.breed_children(&ranked, rng)?);
        }

        next.extend(random_population(rng, opts.randoms));
        Ok(next)
    }

    fn breed_children(&self, ranked: &[Member], rng: &mut Rng) -> CfResult<Vec<PermutationKey>> {
        let opts = &self.search;
        let mut queue: Vec<PermutationKey> = (0..opts.children)
            .map(|_| tournament(ranked, opts.tournament_size, rng))
            .collect();
        let mut children = Vec::with_capacity(opts.children);

        while let Some(mut first) = queue.pop() {
            if !queue.is_empty() && rng.f64() < opts.crossover_probability {
                if let Some(second) = queue.pop() {
                    let (c1, c2) = crossover(&first, &second, rng)?;
                    children.push(c1);
                    children.push(c2);
                }
            } else if rng.f64() < opts.mutation_probability {
                mutate(&mut first, rng)?;
                children.push(first);
            } else {
                // Immigration: the candidate is dropped for a fresh key.
                children.push(random_key(rng));
            }
        }

        Ok(children)
    }

    /// Rescores a freshly bred population and applies the genetic shock to it.
    pub fn shock(
        &self,
        keys: Vec<PermutationKey>,
        cipher_text: &str,
        best_fitness: f64,
        rng: &mut Rng,
    ) -> CfResult<Vec<PermutationKey>> {
        let fitness: Vec<f64> = keys
            .par_iter()
            .map(|key| self.scorer.score(key, cipher_text))
            .collect();
        mutation::shock(keys, &fitness, best_fitness, rng)
    }

    fn outcome(
        &self,
        member: &Member,
        cipher_text: &str,
        cycles: usize,
        reason: StopReason,
    ) -> TrainingOutcome {
        TrainingOutcome {
            key: member.key.clone(),
            plain_text: member.key.apply(cipher_text),
            fitness: member.fitness,
            cycles,
            reason,
        }
    }
}

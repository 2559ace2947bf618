pub mod crossover;
pub mod initialization;
pub mod mutation;
pub mod runner;
pub mod selection;

pub use self::runner::{
    GenerationReport, Incubator, IncubatorParams, ProgressCallback, Silent, StopReason,
    TrainingOutcome,
};

use crate::key::PermutationKey;

/// A key together with its fitness against the current ciphertext.
#[derive(Debug, Clone)]
pub struct Member {
    pub key: PermutationKey,
    pub fitness: f64,
}

/// One fully evaluated population. Each cycle builds a new one instead of
/// editing the previous generation in place.
#[derive(Debug, Clone)]
pub struct Generation {
    pub index: usize,
    pub members: Vec<Member>,
}

impl Generation {
    pub fn best(&self) -> Option<&Member> {
        self.members
            .get(selection::fittest_index_checked(&self.members)?)
    }

    pub fn mean_fitness(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        self.members.iter().map(|m| m.fitness).sum::<f64>() / self.members.len() as f64
    }

    /// Members sorted by descending fitness. Equal scores keep their original order.
    pub fn ranked(&self) -> Vec<Member> {
        let mut ranked = self.members.clone();
        ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        ranked
    }
}

//! Batch execution harness.
//!
//! Runs the generator over a batch of prompts either strictly in order
//! (serial) or with one independent worker task per prompt (parallel). In
//! both modes the result list is ordered by input prompt index; in parallel
//! mode tasks may finish in any order and the indexed collect re-establishes
//! input order at the join.
//!
//! Failure policy: abort-whole-batch. The first per-prompt error fails the
//! run, identically in both modes, so their failure behavior stays
//! comparable.
//!
//! Known limitation: there is no cancellation or timeout; a generation that
//! never terminates hangs the final join.
//!
//! Deployment note: when running many concurrent generation tasks on CPU,
//! keep the model's own intra-op parallelism at one thread per task.
//! Oversubscribing cores negates the benefit of task parallelism.

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{HarnessConfig, SamplingConfig};
use crate::engine::Generator;
use crate::error::{Error, Result};
use crate::model::LanguageModel;
use crate::tokenizer::Tokenizer;

/// How the harness schedules the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// One prompt at a time, strictly in input order.
    Serial,
    /// One worker task per prompt, joined in input order.
    Parallel,
}

/// Runs generation over prompt batches in serial or parallel mode.
pub struct Harness {
    generator: Generator,
    sampling: SamplingConfig,
    config: HarnessConfig,
    pool: rayon::ThreadPool,
}

impl Harness {
    /// Build a harness over shared model/tokenizer handles.
    ///
    /// Validates the sampling configuration up front and builds the worker
    /// pool (`config.num_threads == 0` sizes it to the CPU count).
    pub fn new(
        model: Arc<dyn LanguageModel>,
        tokenizer: Arc<dyn Tokenizer>,
        sampling: SamplingConfig,
        config: HarnessConfig,
    ) -> Result<Self> {
        sampling.validate()?;

        let mut builder = rayon::ThreadPoolBuilder::new();
        if config.num_threads > 0 {
            builder = builder.num_threads(config.num_threads);
        }
        let pool = builder
            .build()
            .map_err(|e| Error::TaskFailure(format!("failed to build worker pool: {e}")))?;

        Ok(Self {
            generator: Generator::new(model, tokenizer),
            sampling,
            config,
            pool,
        })
    }

    /// Number of worker threads in the pool.
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run the batch in the given mode.
    ///
    /// Returns one result per prompt, in input order. The task for prompt
    /// `i` samples with seed `base_seed + i`, so each task owns an
    /// independent RNG in both modes.
    pub fn run(&self, prompts: &[String], mode: ExecutionMode) -> Result<Vec<String>> {
        log::debug!(
            "running {} prompt(s) in {:?} mode on {} thread(s)",
            prompts.len(),
            mode,
            self.num_threads()
        );
        match mode {
            ExecutionMode::Serial => self.run_serial(prompts),
            ExecutionMode::Parallel => self.run_parallel(prompts),
        }
    }

    fn run_serial(&self, prompts: &[String]) -> Result<Vec<String>> {
        let mut results = Vec::with_capacity(prompts.len());
        for (index, prompt) in prompts.iter().enumerate() {
            let seed = self.config.base_seed + index as u64;
            results.push(self.generator.generate(prompt, &self.sampling, seed)?);
        }
        Ok(results)
    }

    fn run_parallel(&self, prompts: &[String]) -> Result<Vec<String>> {
        // Indexed collect places each task's output at its prompt's position
        // regardless of completion order.
        self.pool.install(|| {
            prompts
                .par_iter()
                .enumerate()
                .map(|(index, prompt)| {
                    let seed = self.config.base_seed + index as u64;
                    self.generator.generate(prompt, &self.sampling, seed)
                })
                .collect()
        })
    }
}

//! Benchmark driver.
//!
//! Times one serial and one parallel run of the harness over the same prompt
//! batch, computes the wall-clock speedup, and sanity-checks the outputs.
//! The validity check (every result at least as long as its prompt) is a
//! diagnostic, not a correctness proof: sampling is stochastic and the two
//! modes draw from independent RNGs, so their texts are expected to differ.

use std::fmt;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::harness::{ExecutionMode, Harness};

/// Aggregate results of one serial-vs-parallel comparison.
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    /// The prompts the benchmark ran over.
    pub prompts: Vec<String>,
    /// Worker thread count used by parallel mode.
    pub num_threads: usize,
    /// Wall-clock time of the serial run.
    pub serial_elapsed: Duration,
    /// Wall-clock time of the parallel run.
    pub parallel_elapsed: Duration,
    /// Serial outputs, in prompt order.
    pub serial_outputs: Vec<String>,
    /// Parallel outputs, in prompt order.
    pub parallel_outputs: Vec<String>,
    /// Prompt indices whose output failed the length sanity check.
    pub invalid_indices: Vec<usize>,
}

impl BenchmarkReport {
    /// Wall-clock speedup of parallel over serial execution.
    pub fn speedup(&self) -> f64 {
        self.serial_elapsed.as_secs_f64() / self.parallel_elapsed.as_secs_f64()
    }

    /// Whether every result passed the length sanity check.
    pub fn all_valid(&self) -> bool {
        self.invalid_indices.is_empty()
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== generation benchmark ===")?;
        writeln!(f, "prompts:       {}", self.prompts.len())?;
        writeln!(f, "workers:       {}", self.num_threads)?;
        writeln!(f, "serial time:   {:.3?}", self.serial_elapsed)?;
        writeln!(f, "parallel time: {:.3?}", self.parallel_elapsed)?;
        writeln!(f, "speedup:       {:.2}x", self.speedup())?;

        for index in 0..self.prompts.len().min(2) {
            writeln!(f)?;
            writeln!(f, "prompt {index}:   {:?}", self.prompts[index])?;
            writeln!(f, "  serial:   {:?}", self.serial_outputs[index])?;
            writeln!(f, "  parallel: {:?}", self.parallel_outputs[index])?;
        }

        writeln!(f)?;
        if self.all_valid() {
            write!(f, "validation: all {} results OK", self.prompts.len())
        } else {
            write!(
                f,
                "validation: {} result(s) shorter than their prompt: {:?}",
                self.invalid_indices.len(),
                self.invalid_indices
            )
        }
    }
}

/// Time both execution modes over the same batch and build a report.
pub fn run_benchmark(harness: &Harness, prompts: &[String]) -> Result<BenchmarkReport> {
    log::info!("benchmarking {} prompt(s): serial run", prompts.len());
    let start = Instant::now();
    let serial_outputs = harness.run(prompts, ExecutionMode::Serial)?;
    let serial_elapsed = start.elapsed();

    log::info!(
        "serial run finished in {serial_elapsed:.3?}; parallel run on {} thread(s)",
        harness.num_threads()
    );
    let start = Instant::now();
    let parallel_outputs = harness.run(prompts, ExecutionMode::Parallel)?;
    let parallel_elapsed = start.elapsed();
    log::info!("parallel run finished in {parallel_elapsed:.3?}");

    let invalid_indices = prompts
        .iter()
        .enumerate()
        .filter(|&(i, prompt)| {
            let prompt_len = prompt.chars().count();
            serial_outputs[i].chars().count() < prompt_len
                || parallel_outputs[i].chars().count() < prompt_len
        })
        .map(|(i, _)| i)
        .collect();

    Ok(BenchmarkReport {
        prompts: prompts.to_vec(),
        num_threads: harness.num_threads(),
        serial_elapsed,
        parallel_elapsed,
        serial_outputs,
        parallel_outputs,
        invalid_indices,
    })
}

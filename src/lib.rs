//! genbench: serial vs. task-parallel text-generation benchmark.
//!
//! This crate measures the wall-clock speedup of fanning independent
//! generation calls out across worker tasks:
//! - Temperature + top-k sampling over model logits
//! - An autoregressive decode loop over injected model/tokenizer handles
//! - A serial/parallel execution harness with an order-preserving join
//! - A benchmark driver that times both modes and prints a report

pub mod bench;
pub mod config;
pub mod engine;
pub mod error;
pub mod harness;
pub mod model;
pub mod tokenizer;

pub use bench::{run_benchmark, BenchmarkReport};
pub use config::{HarnessConfig, SamplingConfig};
pub use engine::{Generator, Sampler};
pub use error::{Error, Result};
pub use harness::{ExecutionMode, Harness};
pub use model::{LanguageModel, TinyCharLm};
pub use tokenizer::{CharTokenizer, Tokenizer};

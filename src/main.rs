use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, ValueEnum};

use genbench::{
    run_benchmark, CharTokenizer, ExecutionMode, Harness, HarnessConfig, Result, SamplingConfig,
    TinyCharLm, Tokenizer,
};

#[derive(Parser, Debug)]
#[command(name = "genbench")]
#[command(about = "Serial vs. task-parallel text generation benchmark")]
struct Args {
    /// Maximum tokens to generate per prompt
    #[arg(long, default_value = "48")]
    max_tokens: usize,

    /// Sampling temperature
    #[arg(long, default_value = "1.2")]
    temperature: f32,

    /// Top-k sampling cutoff
    #[arg(long, default_value = "10")]
    top_k: usize,

    /// Execution mode
    #[arg(long, value_enum, default_value = "both")]
    mode: Mode,

    /// Worker threads for parallel mode (0 = one per CPU core)
    #[arg(long, default_value = "0")]
    threads: usize,

    /// Base RNG seed (prompt i samples with seed + i)
    #[arg(long, default_value = "42")]
    seed: u64,

    /// JSON file holding the prompt list (array of strings)
    #[arg(long)]
    prompts: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Mode {
    Serial,
    Parallel,
    Both,
}

/// Prompts used when no `--prompts` file is given. Restricted to the demo
/// tokenizer's character set.
const DEFAULT_PROMPTS: &[&str] = &[
    "the quick brown fox",
    "once upon a time",
    "it was a dark and stormy night",
    "in the beginning",
    "to be or not to be",
    "a journey of a thousand miles",
    "all that glitters",
    "the answer is",
];

fn load_prompts(path: Option<&PathBuf>) -> Result<Vec<String>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(DEFAULT_PROMPTS.iter().map(|s| s.to_string()).collect()),
    }
}

fn run(args: Args) -> Result<()> {
    let prompts = load_prompts(args.prompts.as_ref())?;

    let sampling = SamplingConfig {
        temperature: args.temperature,
        top_k: args.top_k,
        max_tokens: args.max_tokens,
    };
    let harness_config = HarnessConfig {
        num_threads: args.threads,
        base_seed: args.seed,
    };

    let tokenizer = Arc::new(CharTokenizer::new());
    let model = Arc::new(TinyCharLm::new(tokenizer.vocab_size(), args.seed)?);
    let harness = Harness::new(model, tokenizer, sampling, harness_config)?;

    match args.mode {
        Mode::Both => {
            let report = run_benchmark(&harness, &prompts)?;
            println!("{report}");
        }
        Mode::Serial | Mode::Parallel => {
            let mode = match args.mode {
                Mode::Serial => ExecutionMode::Serial,
                _ => ExecutionMode::Parallel,
            };
            let start = Instant::now();
            let outputs = harness.run(&prompts, mode)?;
            let elapsed = start.elapsed();

            println!("mode: {mode:?} ({} workers)", harness.num_threads());
            for (prompt, output) in prompts.iter().zip(outputs.iter()) {
                println!("{prompt:?} -> {output:?}");
            }
            println!("elapsed: {elapsed:.3?}");
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

//! Token sampling.
//!
//! Turns a logits vector into a single next-token ID:
//!
//! ```text
//! Logits [vocab_size]
//!     │
//!     ▼ Temperature scaling
//! Logits / temperature
//!     │
//!     ▼ Softmax (full vocabulary)
//! Probabilities
//!     │
//!     ▼ Top-k selection
//! k most probable tokens
//!     │
//!     ▼ Weighted draw
//! Selected token
//! ```
//!
//! The draw weights the k candidates by their probability mass over the full
//! vocabulary; the mass is deliberately not renormalized to the k candidates
//! before drawing, matching the reference sampling behavior.

use candle_core::{Tensor, D};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SamplingConfig;
use crate::error::{Error, Result};

/// Temperature + top-k token sampler.
///
/// Each sampler owns its RNG. Concurrent generation tasks must each construct
/// their own sampler rather than share one: a shared RNG drawn from multiple
/// threads is both a data race and a reproducibility hazard.
#[derive(Debug, Clone)]
pub struct Sampler {
    temperature: f32,
    top_k: usize,
    rng: StdRng,
}

impl Sampler {
    /// Create a sampler with an entropy-seeded RNG.
    ///
    /// Fails fast with [`Error::InvalidArgument`] if the config carries a
    /// non-positive temperature or `top_k == 0`.
    pub fn new(config: &SamplingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            temperature: config.temperature,
            top_k: config.top_k,
            rng: StdRng::from_entropy(),
        })
    }

    /// Create a sampler with a specific seed for reproducibility.
    pub fn with_seed(config: &SamplingConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            temperature: config.temperature,
            top_k: config.top_k,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Sample the next token from 1-D logits.
    ///
    /// `top_k` larger than the vocabulary is clamped to the vocabulary size.
    /// With `top_k == 1` the draw degenerates to greedy decoding and is
    /// deterministic regardless of the RNG state.
    pub fn sample(&mut self, logits: &Tensor) -> Result<u32> {
        let probs = self.probabilities(logits)?;
        let candidates = top_k_candidates(&probs, self.top_k);

        let weights: Vec<f32> = candidates.iter().map(|&(_, p)| p).collect();
        let dist = WeightedIndex::new(&weights).map_err(|e| {
            Error::InvalidArgument(format!("failed to build sampling distribution: {e}"))
        })?;

        let chosen = dist.sample(&mut self.rng);
        Ok(candidates[chosen].0 as u32)
    }

    /// Temperature-scaled softmax over the full vocabulary.
    ///
    /// The returned vector sums to 1 (within floating-point tolerance) for
    /// any valid temperature.
    fn probabilities(&self, logits: &Tensor) -> Result<Vec<f32>> {
        if logits.dims().len() != 1 {
            return Err(Error::InvalidArgument(format!(
                "expected 1-D logits, got {}-D",
                logits.dims().len()
            )));
        }
        let scaled = (logits / self.temperature as f64)?;
        let probs = candle_nn::ops::softmax(&scaled, D::Minus1)?;
        Ok(probs.to_vec1()?)
    }
}

/// Indices and probabilities of the k most probable tokens.
///
/// Ties are broken by original index order (stable descending sort), so the
/// selection is deterministic. `k` is clamped to the vocabulary size.
fn top_k_candidates(probs: &[f32], k: usize) -> Vec<(usize, f32)> {
    let k = k.min(probs.len());
    let mut indexed: Vec<(usize, f32)> = probs.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    indexed.truncate(k);
    indexed
}

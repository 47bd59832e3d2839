//! Configuration types for genbench.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Sampling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Temperature for scaling logits (must be > 0; < 1 sharpens, > 1 flattens).
    pub temperature: f32,
    /// Top-k sampling: restrict the draw to the k most probable tokens (k >= 1).
    pub top_k: usize,
    /// Maximum tokens to generate beyond the prompt.
    pub max_tokens: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 1.2,
            top_k: 10,
            max_tokens: 48,
        }
    }
}

impl SamplingConfig {
    /// Validate the configuration, failing fast before any generation work.
    pub fn validate(&self) -> Result<()> {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "temperature must be a finite positive number, got {}",
                self.temperature
            )));
        }
        if self.top_k == 0 {
            return Err(Error::InvalidArgument(
                "top_k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Execution harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Number of worker threads for parallel mode (0 = one per CPU core).
    pub num_threads: usize,
    /// Base seed; the task for prompt `i` samples with seed `base_seed + i`.
    pub base_seed: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            num_threads: 0,
            base_seed: 42,
        }
    }
}

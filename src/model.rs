//! Language model abstraction.
//!
//! The benchmark treats the model as an injected collaborator: given the
//! token IDs generated so far, produce a logits vector for the next position.
//! The model is loaded once, shared read-only across all generation tasks,
//! and never mutated during inference.
//!
//! A small self-contained model ([`TinyCharLm`]) is included so the binary
//! runs without downloading weights. It is a demo collaborator for exercising
//! the harness, not a trained model.

use candle_core::{Device, Tensor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

/// Next-token prediction collaborator.
///
/// `forward` takes the full token sequence so far and returns a 1-D logits
/// tensor of length `vocab_size` for the position immediately following the
/// last token. Implementations must be `Send + Sync`: the same handle is
/// shared by all concurrent generation tasks.
pub trait LanguageModel: Send + Sync {
    /// Compute logits for the next position given the tokens so far.
    fn forward(&self, token_ids: &[u32]) -> Result<Tensor>;

    /// Get the vocabulary size.
    fn vocab_size(&self) -> usize;
}

/// Random-weight character-level model: embed, mean-pool, two-layer MLP.
///
/// Weights are drawn once from a seeded RNG at construction, so the model is
/// deterministic for a given seed and immutable afterwards. All tensors live
/// on CPU.
pub struct TinyCharLm {
    embedding: Tensor,
    w1: Tensor,
    b1: Tensor,
    w2: Tensor,
    b2: Tensor,
    vocab_size: usize,
    context_size: usize,
}

/// Hidden dimension of the demo model.
const HIDDEN_SIZE: usize = 32;
/// Number of trailing tokens pooled into the model's context.
const CONTEXT_SIZE: usize = 16;

impl TinyCharLm {
    /// Build the model with seeded random weights over the given vocabulary.
    pub fn new(vocab_size: usize, seed: u64) -> Result<Self> {
        if vocab_size == 0 {
            return Err(Error::InvalidArgument(
                "vocab_size must be at least 1".to_string(),
            ));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let device = Device::Cpu;

        let embedding = Self::random_tensor(&mut rng, vocab_size, HIDDEN_SIZE, &device)?;
        let w1 = Self::random_tensor(&mut rng, HIDDEN_SIZE, HIDDEN_SIZE, &device)?;
        let b1 = Tensor::zeros(HIDDEN_SIZE, candle_core::DType::F32, &device)?;
        let w2 = Self::random_tensor(&mut rng, HIDDEN_SIZE, vocab_size, &device)?;
        let b2 = Tensor::zeros(vocab_size, candle_core::DType::F32, &device)?;

        Ok(Self {
            embedding,
            w1,
            b1,
            w2,
            b2,
            vocab_size,
            context_size: CONTEXT_SIZE,
        })
    }

    fn random_tensor(
        rng: &mut StdRng,
        rows: usize,
        cols: usize,
        device: &Device,
    ) -> Result<Tensor> {
        let data: Vec<f32> = (0..rows * cols)
            .map(|_| rng.gen_range(-0.1..0.1))
            .collect();
        Ok(Tensor::from_vec(data, (rows, cols), device)?)
    }

    /// Mean-pooled embedding of the trailing context window, shape `[1, hidden]`.
    fn pool_context(&self, token_ids: &[u32]) -> Result<Tensor> {
        let start = token_ids.len().saturating_sub(self.context_size);
        let window = &token_ids[start..];

        if window.is_empty() {
            // Empty prompt: decode from a zero context vector.
            return Ok(Tensor::zeros(
                (1, HIDDEN_SIZE),
                candle_core::DType::F32,
                self.embedding.device(),
            )?);
        }

        for &id in window {
            if id as usize >= self.vocab_size {
                return Err(Error::ModelInference(format!(
                    "token id {id} out of range for vocab size {}",
                    self.vocab_size
                )));
            }
        }

        let ids = Tensor::new(window, self.embedding.device())?;
        let embedded = self.embedding.index_select(&ids, 0)?;
        Ok(embedded.mean_keepdim(0)?)
    }
}

impl LanguageModel for TinyCharLm {
    fn forward(&self, token_ids: &[u32]) -> Result<Tensor> {
        let pooled = self.pool_context(token_ids)?;
        let hidden = pooled.matmul(&self.w1)?.broadcast_add(&self.b1)?.relu()?;
        let logits = hidden.matmul(&self.w2)?.broadcast_add(&self.b2)?;
        Ok(logits.squeeze(0)?)
    }

    fn vocab_size(&self) -> usize {
        self.vocab_size
    }
}

//! Autoregressive text generation.
//!
//! The generator drives the decode loop for a single prompt: encode, then
//! repeatedly invoke the model, sample a token, append it, and stop at EOS or
//! the token cap. The model and tokenizer are shared read-only handles; all
//! per-run state (the growing token sequence and the sampler's RNG) is owned
//! by the call, so one generator can serve many concurrent tasks.

use std::sync::Arc;

use crate::config::SamplingConfig;
use crate::engine::sampler::Sampler;
use crate::error::Result;
use crate::model::LanguageModel;
use crate::tokenizer::Tokenizer;

/// Drives autoregressive decoding over shared model/tokenizer handles.
#[derive(Clone)]
pub struct Generator {
    model: Arc<dyn LanguageModel>,
    tokenizer: Arc<dyn Tokenizer>,
}

impl Generator {
    /// Create a generator over shared model and tokenizer handles.
    pub fn new(model: Arc<dyn LanguageModel>, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self { model, tokenizer }
    }

    /// Generate a completion for `prompt`, sampling with the given seed.
    ///
    /// Encodes the prompt, extends it by up to `config.max_tokens` sampled
    /// tokens (stopping early when the EOS token is drawn), and returns the
    /// decoded text of the full sequence. `max_tokens == 0` returns the
    /// decoded form of the prompt encoding unchanged.
    pub fn generate(&self, prompt: &str, config: &SamplingConfig, seed: u64) -> Result<String> {
        config.validate()?;
        let mut sampler = Sampler::with_seed(config, seed)?;
        let eos_token_id = self.tokenizer.eos_token_id();

        let mut tokens = self.tokenizer.encode(prompt)?;
        for _ in 0..config.max_tokens {
            let logits = self.model.forward(&tokens)?;
            let next = sampler.sample(&logits)?;
            tokens.push(next);
            if next == eos_token_id {
                break;
            }
        }

        self.tokenizer.decode(&tokens)
    }

    /// Get the shared tokenizer handle.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }
}

//! Shared stub collaborators for integration tests.
#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use candle_core::{Device, Tensor};
use genbench::{Error, LanguageModel, Result, Tokenizer};

/// Vocabulary size of the stub collaborators (ASCII range).
pub const STUB_VOCAB: usize = 128;
/// EOS token id used by [`StubTokenizer`].
pub const STUB_EOS: u32 = 0;

/// ASCII tokenizer: one token per byte, id 0 reserved for EOS.
pub struct StubTokenizer;

impl Tokenizer for StubTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        text.chars()
            .map(|ch| {
                let id = ch as u32;
                if (1..STUB_VOCAB as u32).contains(&id) {
                    Ok(id)
                } else {
                    Err(Error::Tokenization(format!("{ch:?} not representable")))
                }
            })
            .collect()
    }

    fn decode(&self, token_ids: &[u32]) -> Result<String> {
        token_ids
            .iter()
            .filter(|&&id| id != STUB_EOS)
            .map(|&id| {
                char::from_u32(id)
                    .ok_or_else(|| Error::Tokenization(format!("bad token id {id}")))
            })
            .collect()
    }

    fn eos_token_id(&self) -> u32 {
        STUB_EOS
    }

    fn vocab_size(&self) -> usize {
        STUB_VOCAB
    }
}

/// One-hot logits with a large peak at `peak`.
fn peaked_logits(peak: u32) -> Result<Tensor> {
    let mut values = vec![0.0f32; STUB_VOCAB];
    values[peak as usize] = 100.0;
    Ok(Tensor::from_vec(values, STUB_VOCAB, &Device::Cpu)?)
}

/// Model that deterministically emits `filler` tokens and then EOS.
///
/// The per-prompt generation budget is looked up from the sequence's first
/// token, so each prompt can stop after a different number of tokens.
/// Optionally records the first token of every sequence whose generation it
/// starts, and sleeps per forward call to scramble parallel completion order.
pub struct StubModel {
    /// `(first_token, tokens_before_eos)` pairs; unlisted prompts get `default_budget`.
    budgets: Vec<(u32, usize)>,
    default_budget: usize,
    filler: u32,
    delay_per_call: Duration,
    started: Mutex<Vec<u32>>,
}

impl StubModel {
    pub fn new(default_budget: usize) -> Self {
        Self {
            budgets: Vec::new(),
            default_budget,
            filler: b'x' as u32,
            delay_per_call: Duration::ZERO,
            started: Mutex::new(Vec::new()),
        }
    }

    /// Stop the prompt starting with `first_token` after `budget` generated tokens.
    pub fn with_budget(mut self, first_token: char, budget: usize) -> Self {
        self.budgets.push((first_token as u32, budget));
        self
    }

    /// Sleep this long inside every forward call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay_per_call = delay;
        self
    }

    /// First tokens of sequences whose generation has started, in start order.
    pub fn started_order(&self) -> Vec<u32> {
        self.started.lock().unwrap().clone()
    }

    fn budget_for(&self, first_token: u32) -> usize {
        self.budgets
            .iter()
            .find(|&&(token, _)| token == first_token)
            .map(|&(_, budget)| budget)
            .unwrap_or(self.default_budget)
    }
}

impl LanguageModel for StubModel {
    fn forward(&self, token_ids: &[u32]) -> Result<Tensor> {
        if !self.delay_per_call.is_zero() {
            std::thread::sleep(self.delay_per_call);
        }

        let first = token_ids.first().copied().unwrap_or(STUB_EOS);

        // Single-char prompts in these tests, so a length-1 sequence marks
        // the start of a generation.
        if token_ids.len() == 1 {
            self.started.lock().unwrap().push(first);
        }

        let generated = token_ids.len().saturating_sub(1);
        if generated >= self.budget_for(first) {
            peaked_logits(STUB_EOS)
        } else {
            peaked_logits(self.filler)
        }
    }

    fn vocab_size(&self) -> usize {
        STUB_VOCAB
    }
}

//! Integration tests for the decode loop.

mod common;

use std::sync::Arc;

use common::{StubModel, StubTokenizer};
use genbench::{Generator, SamplingConfig};

fn config(max_tokens: usize) -> SamplingConfig {
    SamplingConfig {
        temperature: 1.0,
        top_k: 1,
        max_tokens,
    }
}

fn generator(model: StubModel) -> Generator {
    Generator::new(Arc::new(model), Arc::new(StubTokenizer))
}

#[test]
fn zero_max_tokens_returns_decoded_prompt() {
    let generator = generator(StubModel::new(3));
    let output = generator.generate("hello", &config(0), 1).unwrap();
    assert_eq!(output, "hello");
}

#[test]
fn stops_at_eos_before_the_cap() {
    // Budget of 2 filler tokens, then EOS, well under the cap of 50.
    let generator = generator(StubModel::new(2));
    let output = generator.generate("q", &config(50), 1).unwrap();
    assert_eq!(output, "qxx");
}

#[test]
fn cap_bounds_generation_when_eos_never_comes() {
    let generator = generator(StubModel::new(usize::MAX));
    let output = generator.generate("q", &config(7), 1).unwrap();
    assert_eq!(output, "qxxxxxxx");
}

#[test]
fn empty_prompt_is_legal() {
    let generator = generator(StubModel::new(0));
    // First sampled token is EOS, so the output decodes to nothing.
    let output = generator.generate("", &config(4), 1).unwrap();
    assert_eq!(output, "");
}

#[test]
fn output_always_starts_with_the_prompt() {
    let generator = generator(StubModel::new(5));
    let output = generator.generate("w", &config(10), 3).unwrap();
    assert!(output.starts_with('w'));
    assert!(output.len() > "w".len());
}

#[test]
fn invalid_sampling_config_fails_before_inference() {
    let generator = generator(StubModel::new(3));
    let bad = SamplingConfig {
        temperature: -1.0,
        top_k: 1,
        max_tokens: 4,
    };
    assert!(generator.generate("q", &bad, 1).is_err());
}

#[test]
fn tokenizer_failure_propagates() {
    let generator = generator(StubModel::new(3));
    // NUL is outside the stub tokenizer's id range.
    assert!(generator.generate("\u{0}", &config(4), 1).is_err());
}

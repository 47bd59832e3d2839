//! Generation engine.
//!
//! This module contains:
//! - Generator for the autoregressive decode loop
//! - Sampler for token sampling

pub mod generator;
pub mod sampler;

pub use generator::Generator;
pub use sampler::Sampler;

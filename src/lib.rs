//! Factorio Noise Verification
//!
//! Checks the `factorio-noise` reproduction against values recorded from
//! Factorio 0.17, and exposes the noise primitives to Lua scripts.

pub mod error;
pub mod fixtures;
pub mod lua;
pub mod verify;
pub use factorio_noise as noise;

pub use error::{Error, Result};
pub use fixtures::{
    builtin_rng_cases, load_noise_cases, load_rng_cases, NoiseTestCase, RngMode, RngTestCase, Sample,
};
pub use lua::{register_noise_functions, run_script};
pub use verify::{sanity_check, Mismatch, NoiseReport, RngReport, Verifier, DEFAULT_MAX_FAILURES};

//! Reproduction of Factorio 0.17's noise primitives
//!
//! - `rng` - the three-lane xorshift generator used to shuffle noise tables
//! - `basis` - single-octave gradient noise with cubic corner falloff
//! - `multioctave` - stacked basis noise with amplitude normalization
//! - `function` - compiling a [`NoiseSpec`] into a sampling function
//!
//! Table construction is the only place the generator is consumed; compiled
//! functions are immutable and can be sampled from any thread.

pub mod basis;
pub mod function;
pub mod multioctave;
pub mod rng;

pub use basis::{BasisNoise, GRADIENT_MAGNITUDE, TABLE_SIZE};
pub use function::{
    compile_noise_function, NoiseFunction, NoiseSpec, BASIS_NOISE_FUNCTION, BASIS_NOISE_TOLERANCE,
    FRACTIONAL_OCTAVE_TOLERANCE, INTEGRAL_OCTAVE_TOLERANCE, MULTIOCTAVE_NOISE_FUNCTION,
};
pub use multioctave::{modified_amplitude, MultioctaveNoise};
pub use rng::{random_shuffle, RandomGenerator, MIN_SEED};

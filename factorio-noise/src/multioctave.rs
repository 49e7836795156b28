//! Multi-octave noise built from stacked basis noise
//!
//! Octaves are summed from the finest (largest input scale) to the coarsest.
//! A fractional octave count starts at a proportionally finer scale instead of
//! dropping or fading the last octave.

use crate::basis::BasisNoise;

/// Horizontal offset added per octave so octaves don't sample aligned points.
const OCTAVE_X_OFFSET: f64 = 17.17;

/// Starting amplitude such that `octaves` terms, each `persistence` times the
/// previous, sum to roughly the variance of a single unit-amplitude term.
///
/// The degenerate denominator as `persistence^(2 * octaves)` approaches 1 is
/// left unguarded.
pub fn modified_amplitude(amplitude: f64, octaves: f64, persistence: f64) -> f64 {
    if persistence == 1.0 {
        return amplitude / octaves.sqrt();
    }
    if persistence == 0.0 {
        return amplitude;
    }
    let p2 = persistence * persistence;
    amplitude * ((p2 - 1.0) / (p2.powf(octaves) - 1.0)).sqrt()
}

/// Fractal noise with a possibly fractional octave count.
#[derive(Debug, Clone)]
pub struct MultioctaveNoise {
    basis: BasisNoise,
    octaves: u32,
    inv_persistence: f64,
    start_input_scale: f64,
    start_amplitude: f64,
}

impl MultioctaveNoise {
    pub fn new(basis: BasisNoise, octave_count: f64, persistence: f64) -> Self {
        let int_octaves = octave_count.ceil();
        let inv_persistence = 1.0 / persistence;
        Self {
            basis,
            // NaN and negative counts run no octaves
            octaves: int_octaves as u32,
            inv_persistence,
            start_input_scale: 2f64.powf(int_octaves - octave_count),
            start_amplitude: modified_amplitude(1.0, int_octaves, inv_persistence),
        }
    }

    pub fn basis(&self) -> &BasisNoise {
        &self.basis
    }

    /// Number of basis evaluations per sample.
    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let mut input_scale = self.start_input_scale;
        let mut amplitude = self.start_amplitude;
        let mut result = 0.0;
        for i in 0..self.octaves {
            let octave_x = x * input_scale + f64::from(i) * OCTAVE_X_OFFSET;
            result += amplitude * self.basis.evaluate(octave_x, y * input_scale);
            input_scale *= 0.5;
            amplitude *= self.inv_persistence;
        }
        result
    }
}

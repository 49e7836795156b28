//! Validation of generator and noise output against reference vectors

use std::fmt;

use factorio_noise::RandomGenerator;

use crate::error::{Error, Result};
use crate::fixtures::{NoiseTestCase, RngMode, RngTestCase};

/// Default number of mismatches tolerated before a run is aborted.
pub const DEFAULT_MAX_FAILURES: usize = 10;

/// Relative error between a reference value and a computed one.
///
/// `0 / 0` yields NaN, which never compares greater than a threshold and so
/// counts as a match.
pub fn error_ratio(expected: f64, actual: f64) -> f64 {
    (expected - actual).abs() / expected.max(actual)
}

/// Check the first shuffle draw Factorio makes for seed 1234.
pub fn sanity_check() -> Result<()> {
    const EXPECTED: i64 = 23;
    let actual = RandomGenerator::for_seed(1234).next_int_between(0, 256);
    if actual != EXPECTED {
        return Err(Error::SanityCheck { expected: EXPECTED, actual });
    }
    Ok(())
}

/// One computed value that disagreed with the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub case: String,
    pub index: usize,
    pub expected: f64,
    pub actual: f64,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {} got {} for {}, sample #{}",
            self.expected, self.actual, self.case, self.index
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RngReport {
    pub cases: usize,
    pub draws: usize,
    pub mismatches: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoiseReport {
    pub cases: usize,
    pub samples: usize,
    pub total_deviation: f64,
    pub mismatches: usize,
}

impl NoiseReport {
    pub fn average_deviation(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.total_deviation / self.samples as f64
    }
}

/// Collects mismatches across cases, giving up once too many pile up.
#[derive(Debug)]
pub struct Verifier {
    max_failures: usize,
    mismatches: Vec<Mismatch>,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FAILURES)
    }
}

impl Verifier {
    pub fn new(max_failures: usize) -> Self {
        Self { max_failures, mismatches: Vec::new() }
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    fn record(&mut self, mismatch: Mismatch) -> Result<()> {
        tracing::warn!("test failure: {mismatch}");
        self.mismatches.push(mismatch);
        if self.mismatches.len() > self.max_failures {
            return Err(Error::TooManyFailures { limit: self.max_failures });
        }
        Ok(())
    }

    /// Replay every generator case; integer draws and float draws must match exactly.
    pub fn verify_rng_cases(&mut self, cases: &[RngTestCase]) -> Result<RngReport> {
        let mut report = RngReport::default();
        for case in cases {
            let mut rng = RandomGenerator::for_seed_i64(case.seed);
            for (index, &expected) in case.outputs.iter().enumerate() {
                let actual = match case.mode {
                    RngMode::Integer => f64::from(rng.next_int()),
                    RngMode::Float => rng.next_float(),
                };
                report.draws += 1;
                if error_ratio(expected, actual) > 0.0 {
                    report.mismatches += 1;
                    self.record(Mismatch {
                        case: format!("RNG(seed={}, mode={:?})", case.seed, case.mode),
                        index,
                        expected,
                        actual,
                    })?;
                }
            }
            report.cases += 1;
        }
        tracing::info!(cases = report.cases, draws = report.draws, mismatches = report.mismatches, "rng verification done");
        Ok(report)
    }

    /// Compile each noise case once and compare every sample within its tolerance.
    pub fn verify_noise_cases(&mut self, cases: &[NoiseTestCase]) -> Result<NoiseReport> {
        let mut report = NoiseReport::default();
        for case in cases {
            let function = case.spec.compile();
            let max_deviation = case.spec.max_deviation();
            for (index, sample) in case.samples.iter().enumerate() {
                let actual = function.sample(sample.x, sample.y);
                let deviation = (sample.value - actual).abs();
                if deviation > max_deviation || deviation.is_nan() {
                    report.mismatches += 1;
                    self.record(Mismatch {
                        case: format!(
                            "{}(seed0={}, seed1={}, octaves={:?}, persistence={:?}) at ({}, {})",
                            case.spec.function_name,
                            case.spec.seed0,
                            case.spec.seed1,
                            case.spec.octave_count,
                            case.spec.persistence,
                            sample.x,
                            sample.y
                        ),
                        index,
                        expected: sample.value,
                        actual,
                    })?;
                }
                report.total_deviation += deviation;
                report.samples += 1;
            }
            report.cases += 1;
        }
        tracing::info!(
            cases = report.cases,
            samples = report.samples,
            average_deviation = report.average_deviation(),
            "noise verification done"
        );
        Ok(report)
    }
}

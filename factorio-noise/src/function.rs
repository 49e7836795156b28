//! Compiling noise specifications into sampling functions

use serde::Deserialize;

use crate::basis::BasisNoise;
use crate::multioctave::MultioctaveNoise;

/// Function name selecting raw basis noise; anything else is multi-octave.
pub const BASIS_NOISE_FUNCTION: &str = "FactorioBasisNoise";
/// Name used for multi-octave specs built without an explicit function name.
pub const MULTIOCTAVE_NOISE_FUNCTION: &str = "FactorioMultioctaveNoise";

/// Allowed deviation from reference output for basis noise.
pub const BASIS_NOISE_TOLERANCE: f64 = 0.00002;
/// Allowed deviation for multi-octave noise with an integral octave count.
pub const INTEGRAL_OCTAVE_TOLERANCE: f64 = 0.0005;
/// Allowed deviation for fractional octave counts, where Factorio 0.17
/// approximates `2^x` loosely.
pub const FRACTIONAL_OCTAVE_TOLERANCE: f64 = 0.005;

/// Parameters of one noise function as recorded alongside reference samples.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoiseSpec {
    #[serde(default = "default_function_name")]
    pub function_name: String,
    pub seed0: u32,
    pub seed1: u8,
    #[serde(default)]
    pub octave_count: Option<f64>,
    #[serde(default)]
    pub persistence: Option<f64>,
}

impl NoiseSpec {
    pub fn basis(seed0: u32, seed1: u8) -> Self {
        Self {
            function_name: BASIS_NOISE_FUNCTION.to_owned(),
            seed0,
            seed1,
            octave_count: None,
            persistence: None,
        }
    }

    pub fn multioctave(seed0: u32, seed1: u8, octave_count: f64, persistence: f64) -> Self {
        Self {
            function_name: MULTIOCTAVE_NOISE_FUNCTION.to_owned(),
            seed0,
            seed1,
            octave_count: Some(octave_count),
            persistence: Some(persistence),
        }
    }

    pub fn is_basis(&self) -> bool {
        self.function_name == BASIS_NOISE_FUNCTION
    }

    /// Largest acceptable absolute deviation from a reference sample.
    pub fn max_deviation(&self) -> f64 {
        if self.is_basis() {
            return BASIS_NOISE_TOLERANCE;
        }
        match self.octave_count {
            Some(count) if count == count.floor() => INTEGRAL_OCTAVE_TOLERANCE,
            _ => FRACTIONAL_OCTAVE_TOLERANCE,
        }
    }

    /// Build the lookup tables and return a reusable sampler.
    ///
    /// Missing multi-octave parameters are not rejected; they become NaN and
    /// degrade the output numerically.
    pub fn compile(&self) -> NoiseFunction {
        let basis = BasisNoise::new(self.seed0, self.seed1);
        tracing::debug!(
            function = %self.function_name,
            seed0 = self.seed0,
            seed1 = self.seed1,
            fingerprint = basis.fingerprint(),
            "compiled noise tables"
        );
        if self.is_basis() {
            NoiseFunction::Basis(basis)
        } else {
            NoiseFunction::Multioctave(MultioctaveNoise::new(
                basis,
                self.octave_count.unwrap_or(f64::NAN),
                self.persistence.unwrap_or(f64::NAN),
            ))
        }
    }
}

fn default_function_name() -> String {
    MULTIOCTAVE_NOISE_FUNCTION.to_owned()
}

/// A compiled noise function. Sampling never mutates it.
#[derive(Debug, Clone)]
pub enum NoiseFunction {
    Basis(BasisNoise),
    Multioctave(MultioctaveNoise),
}

impl NoiseFunction {
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        match self {
            Self::Basis(noise) => noise.evaluate(x, y),
            Self::Multioctave(noise) => noise.evaluate(x, y),
        }
    }

    pub fn basis(&self) -> &BasisNoise {
        match self {
            Self::Basis(noise) => noise,
            Self::Multioctave(noise) => noise.basis(),
        }
    }
}

/// Compile `spec` into a plain closure over its tables.
pub fn compile_noise_function(spec: &NoiseSpec) -> impl Fn(f64, f64) -> f64 + Send + Sync {
    let function = spec.compile();
    move |x, y| function.sample(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_basis() {
        let spec: NoiseSpec =
            serde_json::from_str(r#"{"functionName":"FactorioBasisNoise","seed0":123,"seed1":45}"#).unwrap();
        assert_eq!(spec, NoiseSpec::basis(123, 45));
        assert!(spec.is_basis());
    }

    #[test]
    fn test_deserialize_multioctave() {
        let spec: NoiseSpec = serde_json::from_str(
            r#"{"functionName":"FactorioMultioctaveNoise","seed0":1,"seed1":2,"octaveCount":3.5,"persistence":0.7}"#,
        )
        .unwrap();
        assert!(!spec.is_basis());
        assert_eq!(spec.octave_count, Some(3.5));
        assert_eq!(spec.persistence, Some(0.7));
    }

    #[test]
    fn test_missing_function_name_is_multioctave() {
        let spec: NoiseSpec =
            serde_json::from_str(r#"{"seed0":1,"seed1":2,"octaveCount":3,"persistence":0.5}"#).unwrap();
        assert_eq!(spec, NoiseSpec::multioctave(1, 2, 3.0, 0.5));
        assert!(matches!(spec.compile(), NoiseFunction::Multioctave(_)));
    }

    #[test]
    fn test_seed1_out_of_range_rejected() {
        let result = serde_json::from_str::<NoiseSpec>(r#"{"functionName":"FactorioBasisNoise","seed0":1,"seed1":256}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_max_deviation() {
        assert_eq!(NoiseSpec::basis(1, 1).max_deviation(), BASIS_NOISE_TOLERANCE);
        assert_eq!(NoiseSpec::multioctave(1, 1, 4.0, 0.5).max_deviation(), INTEGRAL_OCTAVE_TOLERANCE);
        assert_eq!(NoiseSpec::multioctave(1, 1, 4.25, 0.5).max_deviation(), FRACTIONAL_OCTAVE_TOLERANCE);

        let mut missing = NoiseSpec::multioctave(1, 1, 4.0, 0.5);
        missing.octave_count = None;
        assert_eq!(missing.max_deviation(), FRACTIONAL_OCTAVE_TOLERANCE);
    }

    #[test]
    fn test_dispatch() {
        let basis = NoiseSpec::basis(5000, 17).compile();
        assert!(matches!(basis, NoiseFunction::Basis(_)));

        let multi = NoiseSpec::multioctave(5000, 17, 1.0, 0.5).compile();
        assert!(matches!(multi, NoiseFunction::Multioctave(_)));
        assert_eq!(multi.basis().fingerprint(), basis.basis().fingerprint());
        // One integral octave at unit scale is the basis field itself.
        assert_eq!(multi.sample(2.75, -3.5), basis.sample(2.75, -3.5));
    }

    #[test]
    fn test_compiled_function_is_pure() {
        let f = compile_noise_function(&NoiseSpec::multioctave(8, 8, 5.5, 0.6));
        for &(x, y) in &[(0.1, 0.2), (1000.5, -2000.25), (-3.3, 7.7)] {
            assert_eq!(f(x, y).to_bits(), f(x, y).to_bits());
        }
    }

    #[test]
    fn test_compiled_function_shared_across_threads() {
        let f = compile_noise_function(&NoiseSpec::multioctave(99, 3, 4.0, 0.5));
        let expected: Vec<f64> = (0..64).map(|i| f(f64::from(i) * 0.37, 1.5)).collect();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let got: Vec<f64> = (0..64).map(|i| f(f64::from(i) * 0.37, 1.5)).collect();
                    assert_eq!(got, expected);
                });
            }
        });
    }

    #[test]
    fn test_missing_persistence_is_nan() {
        let mut spec = NoiseSpec::multioctave(3, 3, 2.0, 0.5);
        spec.persistence = None;
        assert!(spec.compile().sample(0.5, 0.5).is_nan());
    }
}

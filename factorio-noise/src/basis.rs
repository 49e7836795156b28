//! Factorio basis noise
//!
//! A 2D gradient noise with a cubic radial falloff per corner instead of
//! the classic quintic interpolation. Three permutation tables and a table of
//! 256 gradients of length 4.2 are shuffled from a single generator; lookups
//! mask grid coordinates to 8 bits, so the field tiles every 256 units.

use std::f64::consts::PI;

use crc32fast::Hasher;

use crate::rng::{random_shuffle, RandomGenerator};

/// Number of entries in every lookup table.
pub const TABLE_SIZE: usize = 256;

/// Length of every gradient vector.
pub const GRADIENT_MAGNITUDE: f64 = 4.2;

const CORNER_OFFSETS: [(i64, i64); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];

/// Compiled basis noise for one `(seed0, seed1)` pair.
#[derive(Debug, Clone)]
pub struct BasisNoise {
    perm1: [u8; TABLE_SIZE],
    perm2: [u8; TABLE_SIZE],
    perm3: [u8; TABLE_SIZE],
    gradients: [(f64, f64); TABLE_SIZE],
    seed1: u8,
}

impl BasisNoise {
    pub fn new(seed0: u32, seed1: u8) -> Self {
        let mut perm1 = identity_table();
        let mut perm2 = identity_table();
        let mut perm3 = identity_table();

        let mut gradients = [(0.0, 0.0); TABLE_SIZE];
        for (i, gradient) in gradients.iter_mut().enumerate() {
            let angle = PI * i as f64 / 128.0;
            *gradient = (GRADIENT_MAGNITUDE * angle.cos(), GRADIENT_MAGNITUDE * angle.sin());
        }

        // One generator, four shuffles, fixed order.
        let mut rng = RandomGenerator::for_seed(seed0);
        tracing::trace!(seed0, seed1, lanes = ?rng.lanes(), "shuffling basis noise tables");
        random_shuffle(&mut perm1, &mut rng);
        random_shuffle(&mut perm2, &mut rng);
        random_shuffle(&mut perm3, &mut rng);
        random_shuffle(&mut gradients, &mut rng);

        Self { perm1, perm2, perm3, gradients, seed1 }
    }

    /// Gradient vector at integer grid point `(x, y)`.
    #[inline]
    pub fn gradient(&self, x: i64, y: i64) -> (f64, f64) {
        let row_hash = self.perm1[self.seed1 as usize] ^ self.perm2[(y & 0xFF) as usize];
        let hash = self.perm3[(x & 0xFF) as usize] ^ row_hash;
        self.gradients[hash as usize]
    }

    /// Sample the field at `(x, y)`.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let grid_x = x.floor();
        let grid_y = y.floor();
        let xx = x - grid_x;
        let yy = y - grid_y;
        // Only the low 8 bits are used; reduce before casting so huge floors can't saturate.
        let grid_x = grid_x.rem_euclid(256.0) as i64;
        let grid_y = grid_y.rem_euclid(256.0) as i64;

        let mut result = 0.0;
        for (dx, dy) in CORNER_OFFSETS {
            let (gx, gy) = self.gradient(grid_x + dx, grid_y + dy);
            let ox = xx - dx as f64;
            let oy = yy - dy as f64;
            let distance_squared = ox * ox + oy * oy;
            result += surflet(distance_squared) * (gx * ox + gy * oy);
        }
        result
    }

    /// CRC-32 over the shuffled tables.
    ///
    /// Equal fingerprints mean the generator was consumed identically.
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = Hasher::new();
        hasher.update(&self.perm1);
        hasher.update(&self.perm2);
        hasher.update(&self.perm3);
        for (gx, gy) in &self.gradients {
            hasher.update(&gx.to_bits().to_le_bytes());
            hasher.update(&gy.to_bits().to_le_bytes());
        }
        hasher.finalize()
    }
}

fn identity_table() -> [u8; TABLE_SIZE] {
    let mut table = [0u8; TABLE_SIZE];
    for (i, entry) in table.iter_mut().enumerate() {
        *entry = i as u8;
    }
    table
}

/// `(1 - min(d², 1))³`
#[inline]
fn surflet(distance_squared: f64) -> f64 {
    let t = 1.0 - distance_squared.min(1.0);
    t * t * t
}

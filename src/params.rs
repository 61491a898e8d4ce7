//! Solve-wide scaling constants `k` and `t`.
//!
//! `k` caps the pivot selector's exploration volume (`k * |sources|`) and the
//! per-level processing count (`k * 2^(level*t)`); `t` is the exponent that
//! sets the batch step `2^((level-1)*t)` of every queue.

use serde::{Deserialize, Serialize};

use crate::error::{BmsspError, Result};

pub const DEFAULT_K: usize = 2;
pub const DEFAULT_T: u32 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub k: usize,
    pub t: u32,
}

impl Default for Params {
    fn default() -> Self { Self { k: DEFAULT_K, t: DEFAULT_T } }
}

impl Params {
    pub fn new(k: usize, t: u32) -> Result<Self> {
        let p = Self { k, t };
        p.validate()?;
        Ok(p)
    }

    pub fn validate(&self) -> Result<()> {
        if self.k == 0 || self.t == 0 {
            return Err(BmsspError::InvalidParams { k: self.k, t: self.t });
        }
        Ok(())
    }

    /// Reads `BMSSP_K` / `BMSSP_T`; unset, unparsable or zero values fall back to defaults.
    pub fn from_env() -> Self {
        let k = std::env::var("BMSSP_K").ok().and_then(|v| v.parse::<usize>().ok()).filter(|&k| k > 0).unwrap_or(DEFAULT_K);
        let t = std::env::var("BMSSP_T").ok().and_then(|v| v.parse::<u32>().ok()).filter(|&t| t > 0).unwrap_or(DEFAULT_T);
        Self { k, t }
    }

    /// Batch step for a queue living at `level` (>= 1): `2^((level-1)*t)`.
    pub fn batch_step(&self, level: u32) -> f64 {
        let exp = level.saturating_sub(1).saturating_mul(self.t);
        pow2(exp)
    }

    /// Processed-vertex cap for a frame at `level`: `k * 2^(level*t)`, saturating.
    pub fn level_limit(&self, level: u32) -> usize {
        let exp = level.saturating_mul(self.t);
        let scale = 1usize.checked_shl(exp).unwrap_or(usize::MAX);
        self.k.saturating_mul(scale)
    }
}

#[inline]
fn pow2(exp: u32) -> f64 {
    // powi takes i32; anything past 1023 is already +inf in f64.
    2f64.powi(exp.min(1024) as i32)
}

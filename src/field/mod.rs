//! Closed-form velocity fields
//!
//! Compares the velocity field of a diffusion (score-based) generative process,
//! whose squared norm blows up like `1 / (1 - t)` at the terminal time, with the
//! Kac velocity field, whose squared norm stays below `d c²`.
//!
//! | Quantity | Diffusion | Kac |
//! |----------|-----------|-----|
//! | `‖v_t‖²` | `1 / (1 - t + ε)` | `d c²` |
//! | `v_t(x)` | `-x / (1 - t + ε)` | `-a x` (placeholder) |
//!
//! `ε` keeps the diffusion forms finite at `t = 1`. It approximates a genuine
//! blow-up and is the only guard; values for `t >= 1` are not meaningful.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Constants of both velocity fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityFieldModel {
    /// Noise scale of the diffusion process. Does not enter the current closed forms.
    pub sigma: f64,
    /// Kac flip rate
    pub a: f64,
    /// Kac speed
    pub c: f64,
    /// Dimension
    pub d: f64,
    /// Offset added to `1 - t` in the diffusion denominators
    pub epsilon: f64,
}

impl Default for VelocityFieldModel {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            a: 4.0,
            c: 2.0,
            d: 1.0,
            epsilon: 1e-6,
        }
    }
}

impl VelocityFieldModel {
    pub fn with_kac(mut self, a: f64, c: f64) -> Self {
        self.a = a;
        self.c = c;
        self
    }

    pub fn with_dimension(mut self, d: f64) -> Self {
        self.d = d;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Approximate `‖v_t‖²` of the diffusion velocity field.
    pub fn diffusion_velocity_norm(&self, t: f64) -> f64 {
        1.0 / (1.0 - t + self.epsilon)
    }

    /// Upper bound `d c²` on `‖v_t‖²` of the Kac velocity field, independent of `t`.
    pub fn kac_velocity_norm(&self, _t: f64) -> f64 {
        self.d * self.c * self.c
    }

    /// Approximate score-based velocity `-x / (1 - t)`.
    pub fn diffusion_velocity_field(&self, x: f64, t: f64) -> f64 {
        -x / (1.0 - t + self.epsilon)
    }

    /// Simplified one-dimensional Kac velocity field.
    ///
    /// This is a mean-reverting linear placeholder toward a standard normal target,
    /// not the exact field of the Kac process; it does not depend on `t`.
    pub fn kac_velocity_field(&self, x: f64, _t: f64) -> f64 {
        -self.a * x
    }

    /// Evaluate both norms on `times`.
    pub fn norm_curves(&self, times: &Array1<f64>) -> NormCurves {
        NormCurves {
            t: times.clone(),
            diffusion: times.mapv(|t| self.diffusion_velocity_norm(t)),
            kac: times.mapv(|t| self.kac_velocity_norm(t)),
        }
    }

    /// Evaluate both fields over `xs` at each of `times`.
    pub fn field_profiles(&self, xs: &Array1<f64>, times: &[f64]) -> Vec<FieldProfile> {
        times
            .iter()
            .map(|&t| FieldProfile {
                t,
                x: xs.clone(),
                diffusion: xs.mapv(|x| self.diffusion_velocity_field(x, t)),
                kac: xs.mapv(|x| self.kac_velocity_field(x, t)),
            })
            .collect()
    }
}

/// Inclusive evenly spaced grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub start: f64,
    pub stop: f64,
    pub points: usize,
}

impl Grid {
    pub fn new(start: f64, stop: f64, points: usize) -> Self {
        Self {
            start,
            stop,
            points,
        }
    }

    /// Default time grid for norm curves, stopping short of the singularity at 1.
    pub fn norm_times() -> Self {
        Self::new(0.0, 0.99, 100)
    }

    /// Default spatial grid for field profiles.
    pub fn profile_xs() -> Self {
        Self::new(-5.0, 5.0, 50)
    }

    pub fn values(&self) -> Array1<f64> {
        Array1::linspace(self.start, self.stop, self.points)
    }
}

/// Squared norms of both fields over a time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct NormCurves {
    pub t: Array1<f64>,
    pub diffusion: Array1<f64>,
    pub kac: Array1<f64>,
}

/// Both fields over a spatial grid at one time.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldProfile {
    pub t: f64,
    pub x: Array1<f64>,
    pub diffusion: Array1<f64>,
    pub kac: Array1<f64>,
}

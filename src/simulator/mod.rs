//! Sample-path simulators
//!
//! Two walk families share the same time discretization:
//! - [`KacWalk`]: finite-speed motion whose velocity flips at Poisson-rate events
//! - [`BrownianMotion`]: a discretized Wiener process with Gaussian increments
//!
//! Every simulator validates its parameters on construction. Once built, drawing a
//! path cannot fail, so a simulation either yields a complete [`Path`] or nothing.
//!
//! ```rust,ignore
//! use kacwalk::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let kac = KacWalk::new(KacParameters::new(4.0, 2.0, 10.0, Discretization::Steps(2000)))?
//!     .with_variant(KacVariant::DirectionRedraw);
//! let mut rng = StdRng::seed_from_u64(7);
//! let path = kac.simulate_with(&mut rng);
//! assert_eq!(path.positions().nrows(), 2000);
//! ```

mod brownian;
mod kac;
mod path;
mod sweep;

pub use brownian::BrownianMotion;
pub use kac::{FlipTrigger, KacParameters, KacVariant, KacWalk};
pub use path::{Ensemble, IncrementMoments, KacPath, Path};
pub use sweep::{FlipSetting, Sweep, SweepRun};

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::ParameterError;

/// How the interval `[0, T]` is cut into samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discretization {
    /// Fixed number of samples including both endpoints, `dt = T / (steps - 1)`.
    Steps(usize),
    /// Fixed step size, `steps = floor(T / dt)`.
    StepSize(f64),
}

/// Resolved discretization of a simulation interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    duration: f64,
    steps: usize,
    dt: f64,
}

impl TimeGrid {
    /// Validate `duration` and `discretization` and derive the step count and size.
    pub fn resolve(duration: f64, discretization: Discretization) -> Result<Self, ParameterError> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(ParameterError::InvalidDuration(duration));
        }
        let (steps, dt) = match discretization {
            Discretization::Steps(steps) => {
                if steps < 2 {
                    return Err(ParameterError::TooFewSteps(steps));
                }
                (steps, duration / (steps - 1) as f64)
            }
            Discretization::StepSize(dt) => {
                if !(dt.is_finite() && dt > 0.0) {
                    return Err(ParameterError::InvalidStepSize(dt));
                }
                let steps = (duration / dt).floor() as usize;
                if steps < 2 {
                    return Err(ParameterError::TooFewSteps(steps));
                }
                (steps, dt)
            }
        };
        Ok(Self {
            duration,
            steps,
            dt,
        })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Sample times `i * dt` for `i in 0..steps`.
    pub fn times(&self) -> Array1<f64> {
        Array1::from_iter((0..self.steps).map(|i| i as f64 * self.dt))
    }
}

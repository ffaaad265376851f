use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::ParameterError;

use super::{Discretization, Ensemble, Path, TimeGrid};

/// Discretized planar Brownian motion started at the origin.
///
/// Increments are independent with law `N(0, sigma² dt)` per coordinate,
/// `dt = T / (steps - 1)`.
#[derive(Debug, Clone)]
pub struct BrownianMotion {
    grid: TimeGrid,
    sigma: f64,
    increment: Normal<f64>,
}

impl BrownianMotion {
    /// Standard Brownian motion (`sigma = 1`) over `[0, duration]` with `steps` samples.
    pub fn new(duration: f64, steps: usize) -> Result<Self, ParameterError> {
        let grid = TimeGrid::resolve(duration, Discretization::Steps(steps)).inspect_err(|e| {
            tracing::warn!("Rejected Brownian motion parameters: {}", e);
        })?;
        Self::build(grid, 1.0)
    }

    /// Scale the increments by `sigma`.
    pub fn with_sigma(self, sigma: f64) -> Result<Self, ParameterError> {
        Self::build(self.grid, sigma)
    }

    fn build(grid: TimeGrid, sigma: f64) -> Result<Self, ParameterError> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(ParameterError::InvalidSigma(sigma));
        }
        let increment =
            Normal::new(0.0, sigma * grid.dt().sqrt()).map_err(|_| ParameterError::InvalidSigma(sigma))?;
        Ok(Self {
            grid,
            sigma,
            increment,
        })
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Variance of one coordinate at time `t`, `sigma² t`
    pub fn exact_variance(&self, t: f64) -> f64 {
        self.sigma * self.sigma * t
    }

    pub fn simulate(&self) -> Path {
        self.simulate_with(&mut rand::rng())
    }

    pub fn simulate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Path {
        let steps = self.grid.steps();
        let mut positions = Array2::<f64>::zeros((steps, 2));
        for i in 1..steps {
            for axis in 0..2 {
                positions[[i, axis]] = positions[[i - 1, axis]] + self.increment.sample(rng);
            }
        }
        tracing::debug!(
            "Brownian motion: {} steps, dt = {}, sigma = {}",
            steps,
            self.grid.dt(),
            self.sigma
        );
        Path::new(self.grid.times(), positions, self.grid.dt())
    }

    pub fn simulate_ensemble(&self, n_paths: usize) -> Result<Ensemble<Path>, ParameterError> {
        self.simulate_ensemble_with(n_paths, &mut rand::rng())
    }

    pub fn simulate_ensemble_with<R: Rng + ?Sized>(
        &self,
        n_paths: usize,
        rng: &mut R,
    ) -> Result<Ensemble<Path>, ParameterError> {
        if n_paths == 0 {
            return Err(ParameterError::NoPaths);
        }
        let mut ensemble = Ensemble::with_capacity(n_paths);
        for _ in 0..n_paths {
            ensemble.push(self.simulate_with(rng));
        }
        Ok(ensemble)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn starts_at_origin_with_requested_length() {
        let bm = BrownianMotion::new(1.0, 101).unwrap();
        assert_relative_eq!(bm.grid().dt(), 0.01);
        let path = bm.simulate_with(&mut StdRng::seed_from_u64(1));
        assert_eq!(path.positions().dim(), (101, 2));
        assert_eq!(path.initial_position(), Some([0.0, 0.0]));
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert_eq!(
            BrownianMotion::new(-1.0, 10).unwrap_err(),
            ParameterError::InvalidDuration(-1.0)
        );
        assert_eq!(
            BrownianMotion::new(1.0, 0).unwrap_err(),
            ParameterError::TooFewSteps(0)
        );
        assert_eq!(
            BrownianMotion::new(1.0, 10)
                .unwrap()
                .with_sigma(0.0)
                .unwrap_err(),
            ParameterError::InvalidSigma(0.0)
        );
    }

    #[test]
    fn sigma_scales_variance() {
        let bm = BrownianMotion::new(2.0, 3).unwrap().with_sigma(3.0).unwrap();
        assert_relative_eq!(bm.exact_variance(2.0), 18.0);
    }
}

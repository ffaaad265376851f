use nalgebra::Vector2;
use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, Poisson};
use serde::{Deserialize, Serialize};

use crate::error::ParameterError;

use super::{Discretization, Ensemble, KacPath, Path, TimeGrid};

/// How a flip event changes the velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KacVariant {
    /// Start with `(±c, ±c)` and negate one uniformly chosen component per event.
    #[default]
    AxisFlip,
    /// Start with `(c, 0)` and redraw from `{(±c, 0), (0, ±c)}` per event.
    DirectionRedraw,
}

/// Per-step rule deciding whether a flip event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipTrigger {
    /// Fires with probability `a * dt`.
    #[default]
    Bernoulli,
    /// Fires when a `Poisson(a * dt)` draw is at least one, i.e. with probability
    /// `1 - exp(-a * dt)`. Kept to reproduce early runs; slightly less likely to fire
    /// than [`FlipTrigger::Bernoulli`] for the same `a * dt`.
    LegacyPoisson,
}

/// Rate, speed and time discretization of a Kac walk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KacParameters {
    /// Poisson rate `a` of flip events per unit time
    pub rate: f64,
    /// Speed `c`
    pub speed: f64,
    /// Total duration `T`
    pub duration: f64,
    pub discretization: Discretization,
}

impl KacParameters {
    pub fn new(rate: f64, speed: f64, duration: f64, discretization: Discretization) -> Self {
        Self {
            rate,
            speed,
            duration,
            discretization,
        }
    }

    /// Check every constraint and resolve the time grid.
    ///
    /// The per-step flip probability `a * dt` must stay below one; it is reported,
    /// never clamped.
    pub fn validate(&self) -> Result<TimeGrid, ParameterError> {
        if !(self.rate.is_finite() && self.rate > 0.0) {
            return Err(ParameterError::InvalidRate(self.rate));
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ParameterError::InvalidSpeed(self.speed));
        }
        let grid = TimeGrid::resolve(self.duration, self.discretization)?;
        let probability = self.rate * grid.dt();
        if probability >= 1.0 {
            return Err(ParameterError::UnstableFlipProbability {
                rate: self.rate,
                dt: grid.dt(),
                probability,
            });
        }
        Ok(grid)
    }
}

#[derive(Debug, Clone)]
enum FlipLaw {
    Bernoulli(f64),
    Poisson(Poisson<f64>),
}

/// Velocity-flipping random walk in the plane.
#[derive(Debug, Clone)]
pub struct KacWalk {
    params: KacParameters,
    grid: TimeGrid,
    variant: KacVariant,
    trigger: FlipTrigger,
    law: FlipLaw,
}

impl KacWalk {
    /// Validate `params` and build an axis-flip walk with the Bernoulli trigger.
    pub fn new(params: KacParameters) -> Result<Self, ParameterError> {
        let grid = params.validate().inspect_err(|e| {
            tracing::warn!("Rejected Kac walk parameters: {}", e);
        })?;
        Ok(Self {
            params,
            grid,
            variant: KacVariant::default(),
            trigger: FlipTrigger::Bernoulli,
            law: FlipLaw::Bernoulli(params.rate * grid.dt()),
        })
    }

    pub fn with_variant(mut self, variant: KacVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_trigger(mut self, trigger: FlipTrigger) -> Result<Self, ParameterError> {
        let probability = self.flip_probability();
        self.law = match trigger {
            FlipTrigger::Bernoulli => FlipLaw::Bernoulli(probability),
            FlipTrigger::LegacyPoisson => FlipLaw::Poisson(
                Poisson::new(probability)
                    .map_err(|_| ParameterError::InvalidRate(self.params.rate))?,
            ),
        };
        self.trigger = trigger;
        Ok(self)
    }

    pub fn params(&self) -> &KacParameters {
        &self.params
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn variant(&self) -> KacVariant {
        self.variant
    }

    pub fn trigger(&self) -> FlipTrigger {
        self.trigger
    }

    /// Per-step event probability `a * dt`
    pub fn flip_probability(&self) -> f64 {
        self.params.rate * self.grid.dt()
    }

    /// Draw one path using the thread-local generator.
    pub fn simulate(&self) -> KacPath {
        self.simulate_with(&mut rand::rng())
    }

    /// Draw one path from `rng`.
    ///
    /// Row 0 is the origin. For `i >= 1` the position advances by `velocity * dt`,
    /// after which a flip event may change the velocity for the next step.
    pub fn simulate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> KacPath {
        let steps = self.grid.steps();
        let dt = self.grid.dt();
        let mut positions = Array2::<f64>::zeros((steps, 2));
        let mut velocities = Array2::<f64>::zeros((steps, 2));

        let mut x = Vector2::<f64>::zeros();
        let mut v = self.initial_velocity(rng);
        let mut flips = 0usize;

        for i in 1..steps {
            velocities[[i - 1, 0]] = v.x;
            velocities[[i - 1, 1]] = v.y;

            x += v * dt;
            positions[[i, 0]] = x.x;
            positions[[i, 1]] = x.y;

            if self.flip_fires(rng) {
                self.flip(&mut v, rng);
                flips += 1;
            }
        }
        velocities[[steps - 1, 0]] = v.x;
        velocities[[steps - 1, 1]] = v.y;

        tracing::debug!(
            "Kac walk ({:?}, {:?}): {} steps, dt = {}, {} flips",
            self.variant,
            self.trigger,
            steps,
            dt,
            flips
        );

        KacPath::new(Path::new(self.grid.times(), positions, dt), velocities, flips)
    }

    /// Draw `n_paths` independent paths using the thread-local generator.
    pub fn simulate_ensemble(&self, n_paths: usize) -> Result<Ensemble<KacPath>, ParameterError> {
        self.simulate_ensemble_with(n_paths, &mut rand::rng())
    }

    pub fn simulate_ensemble_with<R: Rng + ?Sized>(
        &self,
        n_paths: usize,
        rng: &mut R,
    ) -> Result<Ensemble<KacPath>, ParameterError> {
        if n_paths == 0 {
            return Err(ParameterError::NoPaths);
        }
        let mut ensemble = Ensemble::with_capacity(n_paths);
        for _ in 0..n_paths {
            ensemble.push(self.simulate_with(rng));
        }
        Ok(ensemble)
    }

    fn initial_velocity<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2<f64> {
        let c = self.params.speed;
        match self.variant {
            KacVariant::AxisFlip => Vector2::new(c * random_sign(rng), c * random_sign(rng)),
            KacVariant::DirectionRedraw => Vector2::new(c, 0.0),
        }
    }

    fn flip_fires<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        match &self.law {
            FlipLaw::Bernoulli(p) => rng.random::<f64>() < *p,
            FlipLaw::Poisson(dist) => dist.sample(rng) >= 1.0,
        }
    }

    fn flip<R: Rng + ?Sized>(&self, v: &mut Vector2<f64>, rng: &mut R) {
        match self.variant {
            KacVariant::AxisFlip => {
                let axis = rng.random_range(0..2usize);
                v[axis] = -v[axis];
            }
            KacVariant::DirectionRedraw => {
                let c = self.params.speed;
                let directions = [
                    Vector2::new(c, 0.0),
                    Vector2::new(-c, 0.0),
                    Vector2::new(0.0, c),
                    Vector2::new(0.0, -c),
                ];
                *v = directions[rng.random_range(0..directions.len())];
            }
        }
    }
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.random_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn walk(rate: f64, speed: f64) -> KacWalk {
        KacWalk::new(KacParameters::new(rate, speed, 10.0, Discretization::Steps(2000))).unwrap()
    }

    #[test]
    fn rejects_flip_probability_of_one() {
        let params = KacParameters::new(4.0, 2.0, 100_000.0, Discretization::Steps(1000));
        match KacWalk::new(params) {
            Err(ParameterError::UnstableFlipProbability { probability, .. }) => {
                assert!(probability >= 1.0)
            }
            other => panic!("expected unstable flip probability, got {:?}", other),
        }
    }

    #[test]
    fn rejects_non_positive_rate_and_speed() {
        let steps = Discretization::Steps(100);
        assert_eq!(
            KacWalk::new(KacParameters::new(0.0, 1.0, 1.0, steps)).unwrap_err(),
            ParameterError::InvalidRate(0.0)
        );
        assert_eq!(
            KacWalk::new(KacParameters::new(1.0, -1.0, 1.0, steps)).unwrap_err(),
            ParameterError::InvalidSpeed(-1.0)
        );
    }

    #[test]
    fn axis_flip_only_changes_signs() {
        let kac = walk(4.0, 2.0);
        let mut rng = StdRng::seed_from_u64(11);
        let path = kac.simulate_with(&mut rng);
        assert!(path.flips() > 0);
        for v in path.velocities().iter() {
            assert_eq!(v.abs(), 2.0);
        }
    }

    #[test]
    fn direction_redraw_stays_on_candidates() {
        let kac = walk(4.0, 2.0).with_variant(KacVariant::DirectionRedraw);
        let mut rng = StdRng::seed_from_u64(3);
        let path = kac.simulate_with(&mut rng);
        assert_eq!(path.velocities().row(0).to_vec(), vec![2.0, 0.0]);
        for row in path.velocities().rows() {
            let on_axis = (row[0].abs() == 2.0 && row[1] == 0.0)
                || (row[0] == 0.0 && row[1].abs() == 2.0);
            assert!(on_axis, "unexpected velocity {:?}", row);
        }
    }

    #[test]
    fn legacy_poisson_trigger_is_opt_in() {
        let kac = walk(4.0, 2.0);
        assert_eq!(kac.trigger(), FlipTrigger::Bernoulli);
        let legacy = kac.with_trigger(FlipTrigger::LegacyPoisson).unwrap();
        assert_eq!(legacy.trigger(), FlipTrigger::LegacyPoisson);
        let path = legacy.simulate_with(&mut StdRng::seed_from_u64(5));
        assert_eq!(path.positions().nrows(), 2000);
        assert!(path.flips() > 0);
    }

    #[test]
    fn empty_ensemble_is_rejected() {
        let kac = walk(1.0, 1.0);
        assert_eq!(
            kac.simulate_ensemble_with(0, &mut StdRng::seed_from_u64(0))
                .unwrap_err(),
            ParameterError::NoPaths
        );
    }
}

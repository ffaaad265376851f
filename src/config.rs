//! Experiment configuration
//!
//! Everything a run needs, in one serde document. Missing sections and fields fall
//! back to the settings used for the published figures:
//!
//! ```json
//! {
//!   "walk": { "rate": 4.0, "speed": 2.0, "duration": 10.0, "steps": 2000,
//!             "variant": "direction_redraw", "seed": 7 },
//!   "sweep": { "n_paths": 3, "discretization": { "step_size": 0.01 } },
//!   "field": { "model": { "epsilon": 1e-6 } }
//! }
//! ```

use std::path::Path;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{KacError, ParameterError};
use crate::field::{Grid, VelocityFieldModel};
use crate::simulator::{
    BrownianMotion, Discretization, FlipTrigger, KacParameters, KacVariant, KacWalk, Sweep,
};

/// A single Kac walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    pub rate: f64,
    pub speed: f64,
    pub duration: f64,
    pub steps: usize,
    pub variant: KacVariant,
    pub trigger: FlipTrigger,
    /// Fixed seed for reproducible paths; `None` draws a fresh one
    pub seed: Option<u64>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            rate: 4.0,
            speed: 2.0,
            duration: 10.0,
            steps: 2000,
            variant: KacVariant::DirectionRedraw,
            trigger: FlipTrigger::Bernoulli,
            seed: None,
        }
    }
}

impl WalkConfig {
    pub fn kac_walk(&self) -> Result<KacWalk, ParameterError> {
        KacWalk::new(KacParameters::new(
            self.rate,
            self.speed,
            self.duration,
            Discretization::Steps(self.steps),
        ))?
        .with_variant(self.variant)
        .with_trigger(self.trigger)
    }

    pub fn rng(&self) -> StdRng {
        seeded_rng(self.seed)
    }
}

/// A single Brownian path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrownianConfig {
    pub duration: f64,
    pub steps: usize,
    pub sigma: f64,
    pub seed: Option<u64>,
}

impl Default for BrownianConfig {
    fn default() -> Self {
        Self {
            duration: 10.0,
            steps: 2000,
            sigma: 1.0,
            seed: None,
        }
    }
}

impl BrownianConfig {
    pub fn brownian(&self) -> Result<BrownianMotion, ParameterError> {
        BrownianMotion::new(self.duration, self.steps)?.with_sigma(self.sigma)
    }

    pub fn rng(&self) -> StdRng {
        seeded_rng(self.seed)
    }
}

/// Velocity field comparison grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub model: VelocityFieldModel,
    /// Times at which both norms are evaluated
    pub times: Grid,
    /// Positions at which both fields are evaluated
    pub xs: Grid,
    /// One field profile is produced per entry
    pub profile_times: Vec<f64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            model: VelocityFieldModel::default(),
            times: Grid::norm_times(),
            xs: Grid::profile_xs(),
            profile_times: vec![0.1, 0.5, 0.9],
        }
    }
}

/// Complete description of a run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub walk: WalkConfig,
    pub brownian: BrownianConfig,
    pub sweep: Sweep,
    pub field: FieldConfig,
}

impl ExperimentConfig {
    pub fn from_json_str(json: &str) -> Result<Self, KacError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, KacError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!("Loaded experiment configuration from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, KacError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate every simulation section without drawing any sample.
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.walk.kac_walk()?;
        self.brownian.brownian()?;
        self.sweep.walks()?;
        Ok(())
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ExperimentConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ExperimentConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_sections_are_merged_with_defaults() {
        let json = r#"{
            "walk": { "rate": 2.0, "variant": "axis_flip", "trigger": "legacy_poisson", "seed": 9 },
            "sweep": { "n_paths": 2, "discretization": { "steps": 101 } },
            "field": { "model": { "epsilon": 0.001 }, "profile_times": [0.25] }
        }"#;
        let config = ExperimentConfig::from_json_str(json).unwrap();
        assert_eq!(config.walk.rate, 2.0);
        assert_eq!(config.walk.speed, 2.0);
        assert_eq!(config.walk.variant, KacVariant::AxisFlip);
        assert_eq!(config.walk.trigger, FlipTrigger::LegacyPoisson);
        assert_eq!(config.walk.seed, Some(9));
        assert_eq!(config.sweep.n_paths, 2);
        assert_eq!(config.sweep.discretization, Discretization::Steps(101));
        assert_eq!(config.sweep.settings.len(), 4);
        assert_eq!(config.field.model.epsilon, 0.001);
        assert_eq!(config.field.model.c, 2.0);
        assert_eq!(config.field.profile_times, vec![0.25]);
    }

    #[test]
    fn unstable_walk_fails_validation() {
        let json = r#"{ "walk": { "duration": 100000.0, "steps": 1000 } }"#;
        let config = ExperimentConfig::from_json_str(json).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ParameterError::UnstableFlipProbability { .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            ExperimentConfig::from_json_str("{ \"walk\": 3 }"),
            Err(KacError::Json(_))
        ));
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let config = ExperimentConfig::default();
        let json = config.to_json_string().unwrap();
        assert_eq!(ExperimentConfig::from_json_str(&json).unwrap(), config);
    }
}

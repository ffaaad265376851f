use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ParameterError;

use super::{Discretization, Ensemble, FlipTrigger, KacParameters, KacPath, KacVariant, KacWalk};

/// One `(a, c)` pair of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlipSetting {
    pub rate: f64,
    pub speed: f64,
}

impl FlipSetting {
    pub fn new(rate: f64, speed: f64) -> Self {
        Self { rate, speed }
    }
}

/// Kac walk ensembles for a list of `(a, c)` settings sharing one time grid.
///
/// The defaults draw five paths of duration 5 with `dt = 0.01` for
/// `(1, 1)`, `(2, 1)`, `(4, 2)` and `(25, 5)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sweep {
    pub settings: Vec<FlipSetting>,
    pub duration: f64,
    pub discretization: Discretization,
    pub n_paths: usize,
    pub variant: KacVariant,
    pub trigger: FlipTrigger,
    /// Show a progress bar on stderr while running
    pub progress: bool,
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            settings: vec![
                FlipSetting::new(1.0, 1.0),
                FlipSetting::new(2.0, 1.0),
                FlipSetting::new(4.0, 2.0),
                FlipSetting::new(25.0, 5.0),
            ],
            duration: 5.0,
            discretization: Discretization::StepSize(0.01),
            n_paths: 5,
            variant: KacVariant::AxisFlip,
            trigger: FlipTrigger::Bernoulli,
            progress: false,
        }
    }
}

/// Ensemble drawn for one setting of a [`Sweep`].
#[derive(Debug, Clone)]
pub struct SweepRun {
    pub setting: FlipSetting,
    pub ensemble: Ensemble<KacPath>,
}

impl Sweep {
    pub fn with_settings(mut self, settings: Vec<FlipSetting>) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = n_paths;
        self
    }

    pub fn with_variant(mut self, variant: KacVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Build one walk per setting, failing on the first invalid one.
    pub fn walks(&self) -> Result<Vec<KacWalk>, ParameterError> {
        if self.n_paths == 0 {
            return Err(ParameterError::NoPaths);
        }
        self.settings
            .iter()
            .map(|s| {
                KacWalk::new(KacParameters::new(
                    s.rate,
                    s.speed,
                    self.duration,
                    self.discretization,
                ))?
                .with_variant(self.variant)
                .with_trigger(self.trigger)
            })
            .collect()
    }

    pub fn run(&self) -> Result<Vec<SweepRun>, ParameterError> {
        self.run_with(&mut rand::rng())
    }

    /// Draw every ensemble in setting order.
    ///
    /// All settings are validated before the first path is drawn.
    pub fn run_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<SweepRun>, ParameterError> {
        let walks = self.walks()?;
        let pb = if self.progress {
            let pb = ProgressBar::new((walks.len() * self.n_paths) as u64);
            if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}") {
                pb.set_style(style);
            }
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut runs = Vec::with_capacity(walks.len());
        for (setting, walk) in self.settings.iter().zip(&walks) {
            pb.set_message(format!("a={}, c={}", setting.rate, setting.speed));
            let mut ensemble = Ensemble::with_capacity(self.n_paths);
            for _ in 0..self.n_paths {
                ensemble.push(walk.simulate_with(rng));
                pb.inc(1);
            }
            runs.push(SweepRun {
                setting: *setting,
                ensemble,
            });
        }
        pb.finish_and_clear();
        tracing::debug!(
            "Sweep finished: {} settings x {} paths",
            runs.len(),
            self.n_paths
        );
        Ok(runs)
    }
}

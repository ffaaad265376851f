use thiserror::Error;

/// Rejected simulation parameters.
///
/// Raised before any sample is drawn, so a failed call never yields a partial path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Duration must be positive and finite, got {0}")]
    InvalidDuration(f64),
    #[error("At least 2 steps are required, got {0}")]
    TooFewSteps(usize),
    #[error("Step size must be positive and finite, got {0}")]
    InvalidStepSize(f64),
    #[error("Flip rate must be positive and finite, got {0}")]
    InvalidRate(f64),
    #[error("Speed must be positive and finite, got {0}")]
    InvalidSpeed(f64),
    /// `a * dt` is not a valid per-step event probability.
    #[error("Flip probability a*dt = {probability} must be below 1 (a = {rate}, dt = {dt})")]
    UnstableFlipProbability { rate: f64, dt: f64, probability: f64 },
    #[error("Diffusion scale must be positive and finite, got {0}")]
    InvalidSigma(f64),
    #[error("At least one path per ensemble is required")]
    NoPaths,
}

#[derive(Error, Debug)]
pub enum KacError {
    #[error("Invalid simulation parameters: {0}")]
    Parameter(#[from] ParameterError),
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

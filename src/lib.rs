pub mod config;
pub mod error;
pub mod field;
pub mod simulator;

pub use crate::config::ExperimentConfig;
pub use crate::field::{FieldProfile, Grid, NormCurves, VelocityFieldModel};
pub use crate::simulator::{
    BrownianMotion, Discretization, Ensemble, FlipSetting, FlipTrigger, IncrementMoments,
    KacParameters, KacPath, KacVariant, KacWalk, Path, Sweep, SweepRun, TimeGrid,
};
pub use error::{KacError, ParameterError};

pub mod prelude {
    pub mod simulator {
        pub use crate::simulator::{
            BrownianMotion, Discretization, Ensemble, FlipTrigger, KacParameters, KacPath,
            KacVariant, KacWalk, Path, Sweep, TimeGrid,
        };
    }
    pub mod field {
        pub use crate::field::{FieldProfile, Grid, NormCurves, VelocityFieldModel};
    }

    pub use crate::config::{BrownianConfig, ExperimentConfig, FieldConfig, WalkConfig};
    pub use crate::error::{KacError, ParameterError};
    pub use crate::field::*;
    pub use crate::simulator::*;
}

//! # OpenStrike
//!
//! Golf strike-quality estimation from a single measured carry distance.
//!
//! One empirical measurement (how far the ball carried) is compared against
//! tabulated scratch-player reference data for the selected club to derive
//! dynamic loft, spin rate, smash factor, ball speed, and launch angle, plus
//! coaching advice and trajectory descriptors for an external renderer.

pub use advice::{classify, Advice, Severity, DRIVER_KEY};
pub use data::{
    load_reference, BaselineData, CarryCurve, ClubMetrics, ClubProfile, ClubRecord, CurveError,
    ReferenceData, SmashFactorRange,
};
pub use error::{DataError, EngineError};
pub use estimator::{
    compute_ratio, interpolate_carry, loft_adjusted_speed, EngineHandle, EstimationInput,
    EstimationResult, Estimator, MAX_SWING_SPEED_MPH, MIN_SWING_SPEED_MPH,
};
pub use trajectory::{build_arcs, ArcLabel, TrajectoryArc};

mod advice;
mod data;
mod error;
mod estimator;
pub mod report;
mod trajectory;

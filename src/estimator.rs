use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::advice::{classify, Advice};
use crate::data::{CarryCurve, ReferenceData};
use crate::error::EngineError;
use crate::trajectory::{build_arcs, TrajectoryArc};

pub const MIN_SWING_SPEED_MPH: f64 = 60.0;
pub const MAX_SWING_SPEED_MPH: f64 = 130.0;

/// Speed gained/lost per degree of static loft removed/added.
const LOFT_SPEED_FACTOR: f64 = 0.01;
/// Launch angle as a fraction of dynamic loft, independent of attack angle.
const LAUNCH_PER_DYNAMIC_LOFT: f64 = 0.85;
/// A dynamic-loft estimate more than this far above static loft is clamped
/// and flagged low-confidence.
const MAX_LOFT_GAIN_DEG: f64 = 5.0;

/// One calculation request.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationInput {
    /// Key into the reference tables.
    pub club: String,
    /// Mph; clamped to [60, 130] before any interpolation.
    pub swing_speed: f64,
    /// Degrees; defaults to the club's standard loft.
    pub static_loft: Option<f64>,
    /// Yards.
    pub actual_carry: f64,
}

/// Everything a presentation layer needs to render one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationResult {
    pub club: String,
    pub club_name: String,
    /// Swing speed actually used, after clamping.
    pub swing_speed: f64,
    /// Static loft actually used, after defaulting.
    pub static_loft: f64,
    pub actual_carry: f64,

    pub performance_ratio: f64,
    pub efficiency_pct: f64,

    pub estimated_dynamic_loft: f64,
    /// Set when the dynamic-loft estimate hit the +5 degree cap.
    pub loft_capped: bool,
    pub estimated_launch_angle: f64,
    pub estimated_spin_rate: f64,
    pub estimated_smash_factor: f64,
    pub ball_speed: f64,

    pub scratch_carry_at_user_speed: Option<f64>,
    pub scratch_carry_at_full_speed: Option<f64>,
    pub scratch_swing_speed: f64,
    pub scratch_dynamic_loft: f64,
    pub scratch_launch_angle: f64,
    pub scratch_spin_rate: f64,
    pub scratch_smash_factor: f64,

    pub advice: Advice,
    pub trajectory: Vec<TrajectoryArc>,
}

/// Piecewise-linear lookup over a carry-vs-speed curve.
///
/// An exact tabulated speed returns the tabulated carry untouched; a speed
/// strictly between two tabulated speeds interpolates and rounds to the
/// nearest yard. Outside the tabulated bounds there is no extrapolation:
/// `None` means "not available", not an error.
pub fn interpolate_carry(curve: &CarryCurve, speed: f64) -> Option<f64> {
    let points = curve.points();
    if points.len() < 2 {
        return None;
    }

    if let Some(&(_, carry)) = points.iter().find(|(tabulated, _)| *tabulated == speed) {
        return Some(carry);
    }

    for pair in points.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        if lower.0 < speed && speed < upper.0 {
            let t = (speed - lower.0) / (upper.0 - lower.0);
            return Some((lower.1 + (upper.1 - lower.1) * t).round());
        }
    }

    None
}

/// Equivalent swing speed for a de-lofted or weakened club face. De-lofting
/// raises the speed needed to reach the standard-loft tabulated carry.
pub fn loft_adjusted_speed(speed: f64, standard_loft: f64, static_loft: f64) -> f64 {
    speed * (1.0 + (standard_loft - static_loft) * LOFT_SPEED_FACTOR)
}

/// How far above the zero-compression baseline the shot landed, relative to
/// the scratch player's spread. Exactly 0 at or below baseline, unbounded
/// above 1, and 0 (never NaN) when the spread is degenerate.
pub fn compute_ratio(actual_carry: f64, baseline_carry: f64, scratch_carry: f64) -> f64 {
    let carry_range = scratch_carry - baseline_carry;
    let above_baseline = (actual_carry - baseline_carry).max(0.0);
    if carry_range == 0.0 {
        0.0
    } else {
        above_baseline / carry_range
    }
}

/// The estimation engine. Owns an immutable reference dataset; every
/// calculation is a pure function of that dataset and one input.
pub struct Estimator {
    data: ReferenceData,
}

impl Estimator {
    pub fn new(data: ReferenceData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    pub fn estimate(&self, input: &EstimationInput) -> Result<EstimationResult, EngineError> {
        if !input.swing_speed.is_finite() || !input.actual_carry.is_finite() {
            return Err(EngineError::InvalidInput(
                "swing speed and measured carry must be numbers".to_string(),
            ));
        }
        if input.static_loft.is_some_and(|loft| !loft.is_finite()) {
            return Err(EngineError::InvalidInput(
                "static loft must be a number".to_string(),
            ));
        }

        let record = self
            .data
            .club(&input.club)
            .ok_or_else(|| EngineError::UnknownClub(input.club.clone()))?;
        let profile = record.profile;
        let metrics = record.metrics;

        // Clamp before any interpolation or ratio work.
        let swing_speed = input
            .swing_speed
            .clamp(MIN_SWING_SPEED_MPH, MAX_SWING_SPEED_MPH);
        let static_loft = input.static_loft.unwrap_or(profile.loft);

        // Two scratch carries: one at the user's effort, one at the scratch
        // player's full swing. Both go through the same loft adjustment.
        let adjusted_user_speed = loft_adjusted_speed(swing_speed, profile.loft, static_loft);
        let adjusted_full_speed =
            loft_adjusted_speed(profile.swing_speed, profile.loft, static_loft);

        let scratch_carry_at_user_speed = interpolate_carry(&profile.carry, adjusted_user_speed);
        let scratch_carry_at_full_speed = interpolate_carry(&profile.carry, adjusted_full_speed);

        // Out-of-range lookups stay a display concern. The ratio anchors to
        // whichever scratch carry is available, neutral when neither is.
        let performance_ratio = scratch_carry_at_user_speed
            .or(scratch_carry_at_full_speed)
            .map(|scratch| compute_ratio(input.actual_carry, record.baseline.carry, scratch))
            .unwrap_or(0.0);
        let efficiency_pct = performance_ratio * 100.0;

        let shaft_lean = static_loft - metrics.dynamic_loft;
        let mut estimated_dynamic_loft = static_loft - shaft_lean * performance_ratio;
        let loft_capped = estimated_dynamic_loft > static_loft + MAX_LOFT_GAIN_DEG;
        if loft_capped {
            estimated_dynamic_loft = static_loft + MAX_LOFT_GAIN_DEG;
        }

        let estimated_launch_angle = LAUNCH_PER_DYNAMIC_LOFT * estimated_dynamic_loft;
        let estimated_spin_rate = (metrics.spin_rate
            + (record.baseline.spin - metrics.spin_rate) * (1.0 - performance_ratio))
            .round();
        let estimated_smash_factor =
            record.smash.low + (record.smash.high - record.smash.low) * performance_ratio;
        let ball_speed = swing_speed * estimated_smash_factor;

        let advice = classify(record.key, efficiency_pct);
        let trajectory = build_arcs(
            input.actual_carry,
            scratch_carry_at_user_speed,
            scratch_carry_at_full_speed,
        );

        log::debug!(
            "[ESTIMATE] club={} speed={:.1} carry={:.0} ratio={:.3} capped={}",
            record.key,
            swing_speed,
            input.actual_carry,
            performance_ratio,
            loft_capped
        );

        Ok(EstimationResult {
            club: record.key.to_string(),
            club_name: profile.name.clone(),
            swing_speed,
            static_loft,
            actual_carry: input.actual_carry,
            performance_ratio,
            efficiency_pct,
            estimated_dynamic_loft,
            loft_capped,
            estimated_launch_angle,
            estimated_spin_rate,
            estimated_smash_factor,
            ball_speed,
            scratch_carry_at_user_speed,
            scratch_carry_at_full_speed,
            scratch_swing_speed: profile.swing_speed,
            scratch_dynamic_loft: metrics.dynamic_loft,
            scratch_launch_angle: metrics.launch_angle,
            scratch_spin_rate: metrics.spin_rate,
            scratch_smash_factor: record.smash.high,
            advice,
            trajectory,
        })
    }
}

/// Readiness gate around the estimator.
///
/// The reference data arrives from a one-time asynchronous fetch; until it is
/// installed, every estimate answers `NotReady` instead of assuming the data
/// is there. Clones share the same slot.
#[derive(Clone, Default)]
pub struct EngineHandle {
    inner: Arc<Mutex<Option<Arc<Estimator>>>>,
}

impl EngineHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self, estimator: Estimator) {
        let mut guard = self.inner.lock().unwrap();
        *guard = Some(Arc::new(estimator));
        log::info!("[ENGINE] Reference data installed; engine ready");
    }

    pub fn is_ready(&self) -> bool {
        self.inner.lock().unwrap().is_some()
    }

    pub fn estimate(&self, input: &EstimationInput) -> Result<EstimationResult, EngineError> {
        let estimator = self.inner.lock().unwrap().clone();
        match estimator {
            Some(estimator) => estimator.estimate(input),
            None => Err(EngineError::NotReady),
        }
    }
}

use serde::Serialize;

/// Which arc a descriptor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArcLabel {
    Measured,
    ScratchAtUserSpeed,
    ScratchAtFullSpeed,
}

impl ArcLabel {
    pub fn legend(&self) -> &'static str {
        match self {
            ArcLabel::Measured => "Measured Carry",
            ArcLabel::ScratchAtUserSpeed => "Scratch @ Your Speed",
            ArcLabel::ScratchAtFullSpeed => "Scratch @ Full Speed",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ArcLabel::Measured => "red",
            ArcLabel::ScratchAtUserSpeed => "green",
            ArcLabel::ScratchAtFullSpeed => "blue",
        }
    }
}

/// One arc for an external renderer: how far, and which legend entry.
/// Arc geometry is the renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryArc {
    pub carry_yards: f64,
    pub label: ArcLabel,
}

/// Descriptors for the measured shot plus whichever scratch carries are
/// available. Missing scratch figures simply produce no arc.
pub fn build_arcs(
    measured_carry: f64,
    scratch_at_user_speed: Option<f64>,
    scratch_at_full_speed: Option<f64>,
) -> Vec<TrajectoryArc> {
    let mut arcs = vec![TrajectoryArc {
        carry_yards: measured_carry,
        label: ArcLabel::Measured,
    }];
    if let Some(carry) = scratch_at_user_speed {
        arcs.push(TrajectoryArc {
            carry_yards: carry,
            label: ArcLabel::ScratchAtUserSpeed,
        });
    }
    if let Some(carry) = scratch_at_full_speed {
        arcs.push(TrajectoryArc {
            carry_yards: carry,
            label: ArcLabel::ScratchAtFullSpeed,
        });
    }
    arcs
}

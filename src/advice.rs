use serde::Serialize;

/// Club key that selects the driver decision table. The reference document's
/// key set is the contract.
pub const DRIVER_KEY: &str = "driver";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Efficiency beyond anything the tables consider real.
    Implausible,
    Excellent,
    Good,
    Fair,
    Caution,
    Poor,
    Miss,
}

impl Severity {
    /// Color tag for presentation layers (matches the original legend).
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Implausible => "blue",
            Severity::Excellent => "green",
            Severity::Good => "darkorange",
            Severity::Fair => "orange",
            Severity::Caution => "black",
            Severity::Poor => "red",
            Severity::Miss => "gray",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub message: &'static str,
    pub severity: Severity,
    /// Estimated launch angle, spin rate, and dynamic loft are not reliable
    /// for the driver outside optimal launch; suppress their display. Scratch
    /// values are still shown, and the estimates are still computed.
    pub driver_metrics_unavailable: bool,
}

/// Map strike efficiency (ratio * 100) to advice. Two disjoint ordered
/// tables, first match wins.
pub fn classify(club: &str, efficiency_pct: f64) -> Advice {
    if club == DRIVER_KEY {
        classify_driver(efficiency_pct)
    } else {
        classify_standard(efficiency_pct)
    }
}

fn classify_driver(efficiency_pct: f64) -> Advice {
    if efficiency_pct >= 80.0 {
        Advice {
            message: "Optimal launch conditions. You're hitting slightly up on the ball for great carry.",
            severity: Severity::Excellent,
            driver_metrics_unavailable: false,
        }
    } else if efficiency_pct >= 50.0 {
        Advice {
            message: "Decent strike, but you're likely just outside the optimal launch window of 11-14 degrees.",
            severity: Severity::Fair,
            driver_metrics_unavailable: true,
        }
    } else {
        Advice {
            message: "You could be hitting down or only just up on the ball, reducing launch and carry. \
                      You may also be launching too high, creating excess spin and losing distance.",
            severity: Severity::Poor,
            driver_metrics_unavailable: true,
        }
    }
}

fn classify_standard(efficiency_pct: f64) -> Advice {
    let (message, severity) = if efficiency_pct >= 130.0 {
        (
            "You either made a typo or you're ready to turn pro.",
            Severity::Implausible,
        )
    } else if efficiency_pct >= 85.0 {
        ("Tour-level compression. Great ball striking.", Severity::Excellent)
    } else if efficiency_pct >= 60.0 {
        ("Solid strike. You're compressing the ball well.", Severity::Good)
    } else if efficiency_pct >= 20.0 {
        (
            "Decent contact, but room to improve compression. Hold the wrist angle through impact.",
            Severity::Fair,
        )
    } else if efficiency_pct >= 5.0 {
        (
            "Likely casting or flipping. Try to lead with the hands.",
            Severity::Caution,
        )
    } else if efficiency_pct >= -25.0 {
        ("Poor strike. Focus on striking the ball cleanly.", Severity::Poor)
    } else {
        ("Complete mishit. Try again.", Severity::Miss)
    };

    Advice {
        message,
        severity,
        driver_metrics_unavailable: false,
    }
}

use std::fmt::Write;

use crate::estimator::EstimationResult;

const RULE_WIDTH: usize = 44;

/// Render one calculation as an aligned text block for stdout.
///
/// Estimated launch angle, spin rate, and dynamic loft print as `N/A` when
/// the advice carries the driver suppression flag; scratch figures always
/// print. Scratch carries outside the tabulated speed range print as `N/A`.
pub fn render(result: &EstimationResult) -> String {
    let mut out = String::new();
    write_report(&mut out, result).expect("formatting into a String cannot fail");
    out
}

fn write_report(out: &mut String, result: &EstimationResult) -> std::fmt::Result {
    let suppressed = result.advice.driver_metrics_unavailable;
    let rule = "-".repeat(RULE_WIDTH);

    writeln!(out, "{}", rule)?;
    writeln!(
        out,
        "  {} | Strike Efficiency: {:.0}%  [{}]",
        result.club_name,
        result.efficiency_pct,
        result.advice.severity.color()
    )?;
    writeln!(out, "  {}", result.advice.message)?;
    if result.loft_capped {
        writeln!(
            out,
            "  Note: dynamic loft capped at +5.0 deg above static; the measured carry is too short for a reliable estimate."
        )?;
    }
    writeln!(out, "{}", rule)?;

    writeln!(out, "  Ball Speed:     {:.1} mph (est.)", result.ball_speed)?;
    writeln!(
        out,
        "  Smash Factor:   {:.2} est / {:.2} scratch",
        result.estimated_smash_factor, result.scratch_smash_factor
    )?;
    writeln!(
        out,
        "  Launch Angle:   {} / {:.1} deg scratch",
        estimated(suppressed, format!("{:.1} deg est", result.estimated_launch_angle)),
        result.scratch_launch_angle
    )?;
    writeln!(
        out,
        "  Spin Rate:      {} / {:.0} rpm scratch",
        estimated(suppressed, format!("{:.0} rpm est", result.estimated_spin_rate)),
        result.scratch_spin_rate
    )?;
    writeln!(
        out,
        "  Dynamic Loft:   {} / {:.1} deg scratch",
        estimated(suppressed, format!("{:.1} deg est", result.estimated_dynamic_loft)),
        result.scratch_dynamic_loft
    )?;
    writeln!(out, "  Static Loft:    {:.1} deg", result.static_loft)?;

    writeln!(out, "  Measured Carry: {:.0} yards", result.actual_carry)?;
    writeln!(
        out,
        "  Scratch Carry:  {} @ {:.0} mph (your speed)",
        carry_figure(result.scratch_carry_at_user_speed),
        result.swing_speed
    )?;
    writeln!(
        out,
        "  Scratch Carry:  {} @ {:.0} mph (full swing)",
        carry_figure(result.scratch_carry_at_full_speed),
        result.scratch_swing_speed
    )?;
    if let Some(scratch) = result.scratch_carry_at_user_speed {
        writeln!(
            out,
            "  vs Scratch:     {:+.1} yards at your speed",
            result.actual_carry - scratch
        )?;
    }
    if let Some(scratch) = result.scratch_carry_at_full_speed {
        writeln!(
            out,
            "  vs Scratch:     {:+.1} yards at full swing",
            result.actual_carry - scratch
        )?;
    }

    writeln!(out, "{}", rule)?;
    writeln!(out, "  Trajectory:")?;
    for arc in &result.trajectory {
        writeln!(
            out,
            "    {:<22} {:>4.0} yd  [{}]",
            arc.label.legend(),
            arc.carry_yards,
            arc.label.color()
        )?;
    }
    writeln!(out, "{}", rule)?;

    Ok(())
}

fn estimated(suppressed: bool, value: String) -> String {
    if suppressed {
        "N/A".to_string()
    } else {
        value
    }
}

fn carry_figure(carry: Option<f64>) -> String {
    match carry {
        Some(yards) => format!("{:.0} yards", yards),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::{Advice, Severity};
    use crate::trajectory::{ArcLabel, TrajectoryArc};

    fn sample_result(suppressed: bool, capped: bool) -> EstimationResult {
        EstimationResult {
            club: "driver".to_string(),
            club_name: "Driver".to_string(),
            swing_speed: 95.0,
            static_loft: 10.5,
            actual_carry: 220.0,
            performance_ratio: 0.921,
            efficiency_pct: 92.1,
            estimated_dynamic_loft: 12.7,
            loft_capped: capped,
            estimated_launch_angle: 10.8,
            estimated_spin_rate: 2829.0,
            estimated_smash_factor: 1.48,
            ball_speed: 141.0,
            scratch_carry_at_user_speed: Some(226.0),
            scratch_carry_at_full_speed: None,
            scratch_swing_speed: 113.0,
            scratch_dynamic_loft: 12.9,
            scratch_launch_angle: 10.9,
            scratch_spin_rate: 2686.0,
            scratch_smash_factor: 1.50,
            advice: Advice {
                message: "Test advice.",
                severity: Severity::Excellent,
                driver_metrics_unavailable: suppressed,
            },
            trajectory: vec![TrajectoryArc {
                carry_yards: 220.0,
                label: ArcLabel::Measured,
            }],
        }
    }

    #[test]
    fn renders_estimates_when_not_suppressed() {
        let text = render(&sample_result(false, false));
        assert!(text.contains("Strike Efficiency: 92%"));
        assert!(text.contains("10.8 deg est"));
        assert!(text.contains("2829 rpm est"));
        assert!(text.contains("vs Scratch:     -6.0 yards at your speed"));
        // Out-of-range full-swing carry renders as unavailable.
        assert!(text.contains("N/A @ 113 mph (full swing)"));
        assert!(!text.contains("capped"));
    }

    #[test]
    fn suppresses_driver_metrics_in_display_only() {
        let text = render(&sample_result(true, false));
        assert!(text.contains("Launch Angle:   N/A / 10.9 deg scratch"));
        assert!(text.contains("Spin Rate:      N/A / 2686 rpm scratch"));
        assert!(text.contains("Dynamic Loft:   N/A / 12.9 deg scratch"));
    }

    #[test]
    fn warns_when_loft_estimate_was_capped() {
        let text = render(&sample_result(false, true));
        assert!(text.contains("dynamic loft capped at +5.0 deg"));
    }

    #[test]
    fn lists_trajectory_legend_with_color_tags() {
        let text = render(&sample_result(false, false));
        assert!(text.contains("Measured Carry"));
        assert!(text.contains("[red]"));
    }
}

//! Rendering of analysis results.

use pinch_engine::{
    CascadeProfile, CompositeDiagram, Curve, EnergyTargets, HeatCascadeRow, PinchAnalysis,
    PinchConfig, ProblemTableRow,
};
use serde::Serialize;
use std::fmt::Write as _;

/// Everything the `analyze` command reports, in serializable form.
#[derive(Serialize)]
pub struct AnalysisReport<'a> {
    pub config: &'a PinchConfig,
    pub targets: &'a EnergyTargets,
    pub temperatures: &'a [f64],
    pub problem_table: &'a [ProblemTableRow],
    pub unfeasible_heat_cascade: &'a [HeatCascadeRow],
    pub heat_cascade: &'a [HeatCascadeRow],
    pub shifted_composite: &'a CompositeDiagram,
    pub composite: &'a CompositeDiagram,
    pub grand_composite: &'a Curve,
    pub deleted_pocket_cascade: CascadeProfile,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(analysis: &'a PinchAnalysis) -> pinch_core::PinchResult<Self> {
        Ok(Self {
            config: analysis.config(),
            targets: analysis.targets(),
            temperatures: analysis.temperatures(),
            problem_table: analysis.problem_table(),
            unfeasible_heat_cascade: analysis.unfeasible_heat_cascade(),
            heat_cascade: analysis.heat_cascade(),
            shifted_composite: analysis.shifted_composite(),
            composite: analysis.composite(),
            grand_composite: analysis.grand_composite(),
            deleted_pocket_cascade: analysis.deleted_pocket_cascade()?,
        })
    }
}

pub fn targets_text(targets: &EnergyTargets) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Energy targets:");
    let _ = writeln!(out, "  Hot utility:        {:>12.3} kW", targets.hot_utility);
    let _ = writeln!(out, "  Cold utility:       {:>12.3} kW", targets.cold_utility);
    let _ = writeln!(out, "  Pinch (shifted):    {:>12.3} °C", targets.pinch_temperature);
    let _ = writeln!(out, "  Pinch (hot side):   {:>12.3} °C", targets.hot_pinch_temperature);
    let _ = writeln!(out, "  Pinch (cold side):  {:>12.3} °C", targets.cold_pinch_temperature);
    let _ = writeln!(out, "  Total hot duty:     {:>12.3} kW", targets.total_hot_duty);
    let _ = writeln!(out, "  Total cold duty:    {:>12.3} kW", targets.total_cold_duty);
    let _ = writeln!(out, "  Heat recovery:      {:>12.3} kW", targets.heat_recovery);
    out
}

pub fn tables_text(analysis: &PinchAnalysis) -> String {
    let mut out = String::new();
    let temps: Vec<String> = analysis
        .temperatures()
        .iter()
        .map(|t| format!("{t}"))
        .collect();
    let _ = writeln!(out, "Shifted temperatures: {}", temps.join(", "));

    let _ = writeln!(out, "\nProblem table:");
    let _ = writeln!(
        out,
        "  {:>3} {:>10} {:>10} {:>8} {:>8} {:>9} {:>10}",
        "#", "T1", "T2", "dT", "sumCPh", "sumCPc", "dH"
    );
    for (i, (interval, row)) in analysis
        .intervals()
        .iter()
        .zip(analysis.problem_table())
        .enumerate()
    {
        let _ = writeln!(
            out,
            "  {:>3} {:>10.3} {:>10.3} {:>8.3} {:>8.3} {:>9.3} {:>10.3}",
            i + 1,
            interval.t1,
            interval.t2,
            row.delta_s,
            row.hot_cp,
            row.cold_cp,
            row.delta_h
        );
    }

    let _ = writeln!(out, "\nHeat cascade:");
    let _ = writeln!(
        out,
        "  {:>3} {:>10} {:>14} {:>12}",
        "#", "dH", "unfeasible H", "feasible H"
    );
    for (i, (inf, feas)) in analysis
        .unfeasible_heat_cascade()
        .iter()
        .zip(analysis.heat_cascade())
        .enumerate()
    {
        let _ = writeln!(
            out,
            "  {:>3} {:>10.3} {:>14.3} {:>12.3}",
            i + 1,
            feas.delta_h,
            inf.exit_h,
            feas.exit_h
        );
    }
    out
}

pub fn profile_text(profile: &CascadeProfile) -> String {
    let mut out = String::from("  T [°C]        H [kW]     dH [kW]\n");
    let top = profile.top();
    let _ = writeln!(out, "  {:>10.3} {:>10.3}", top.temperature, top.exit_h);
    for row in profile.rows() {
        let _ = writeln!(
            out,
            "  {:>10.3} {:>10.3} {:>10.3}",
            row.temperature, row.exit_h, row.delta_h
        );
    }
    out
}

/// Two-column CSV of one curve.
pub fn curve_csv(curve: &Curve) -> String {
    let mut csv = String::from("h_kw,t_c\n");
    for p in &curve.points {
        csv.push_str(&format!("{},{}\n", p.h, p.t));
    }
    csv
}

/// CSV of both composite curves, one row per point, tagged by side.
pub fn diagram_csv(diagram: &CompositeDiagram) -> String {
    let mut csv = String::from("curve,h_kw,t_c\n");
    for (name, curve) in [("hot", &diagram.hot), ("cold", &diagram.cold)] {
        for p in &curve.points {
            csv.push_str(&format!("{name},{},{}\n", p.h, p.t));
        }
    }
    csv
}

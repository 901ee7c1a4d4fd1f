use credit_risk::scoring::{CompanyId, ComponentStatus, RiskAssessment};
use std::fmt::Write;

/// Human-readable summary of an assessment for terminal output.
pub(crate) fn render_assessment(company_id: CompanyId, assessment: &RiskAssessment) -> String {
    let risk = &assessment.risk;
    let drivers = &risk.drivers;
    let components = &risk.components;
    let availability = &assessment.availability;
    let mut out = String::new();

    let _ = writeln!(out, "Company {company_id}");
    let _ = writeln!(out, "Risk score: {} ({} risk)", risk.score, risk.band);

    let _ = writeln!(out, "\nCovenant drivers");
    let _ = writeln!(out, "- liquidity: {}", drivers.liquidity_score);
    let _ = writeln!(out, "- solvency: {}", drivers.solvency_score);
    let _ = writeln!(out, "- profitability: {}", drivers.profitability_score);
    let _ = writeln!(out, "- efficiency: {}", drivers.efficiency_score);

    let _ = writeln!(out, "\nComponents");
    let rows = [
        (
            "covenant",
            Some(format!("{:.1}", components.covenant_weighted_score)),
            &availability.covenant,
        ),
        (
            "trend",
            Some(components.trend_score.to_string()),
            &availability.trend,
        ),
        (
            "benchmark",
            Some(components.abs_score.to_string()),
            &availability.benchmark,
        ),
        (
            "maturity",
            components.maturity_score.map(|score| score.to_string()),
            &availability.maturity,
        ),
        (
            "size",
            components.size_score.map(|score| score.to_string()),
            &availability.size,
        ),
        (
            "scale",
            components.scale_score.map(|score| score.to_string()),
            &availability.scale,
        ),
    ];
    for (label, value, status) in rows {
        let value = value.unwrap_or_else(|| "-".to_string());
        match status {
            ComponentStatus::Included => {
                let _ = writeln!(out, "- {label}: {value}");
            }
            ComponentStatus::Excluded { cause } => {
                let _ = writeln!(out, "- {label}: {value} (excluded: {cause})");
            }
        }
    }

    out
}

//! Multi-year financial trend score: revenue growth, latest margin, latest leverage.

use super::domain::{FinancialStatement, FinancialSummary};

/// Score used when history is too short or a formula produces a non-finite value.
pub const NEUTRAL_TREND_SCORE: u8 = 50;

const GROWTH_WEIGHT: f64 = 0.4;
const MARGIN_WEIGHT: f64 = 0.4;
const LEVERAGE_WEIGHT: f64 = 0.2;

/// Breakdown of the three sub-scores, each on 0-100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendBreakdown {
    pub growth: f64,
    pub margin: f64,
    pub leverage: f64,
}

impl TrendBreakdown {
    pub fn blended(&self) -> u8 {
        let blended =
            GROWTH_WEIGHT * self.growth + MARGIN_WEIGHT * self.margin + LEVERAGE_WEIGHT * self.leverage;
        if blended.is_finite() {
            blended.round().clamp(0.0, 100.0) as u8
        } else {
            NEUTRAL_TREND_SCORE
        }
    }
}

pub fn trend_score(summary: &FinancialSummary) -> u8 {
    trend_breakdown(summary)
        .map(|breakdown| breakdown.blended())
        .unwrap_or(NEUTRAL_TREND_SCORE)
}

/// `None` when fewer than two years are present.
pub fn trend_breakdown(summary: &FinancialSummary) -> Option<TrendBreakdown> {
    if summary.len() < 2 {
        return None;
    }

    let first = summary.values().next()?;
    let last = summary.values().next_back()?;

    Some(TrendBreakdown {
        growth: growth_pct(revenue_growth(first, last)),
        margin: margin_pct(profit_margin(last)),
        leverage: leverage_pct(leverage_ratio(last)),
    })
}

fn value(field: Option<f64>) -> f64 {
    field.unwrap_or(f64::NAN)
}

fn revenue_growth(first: &FinancialStatement, last: &FinancialStatement) -> f64 {
    let rev0 = value(first.net_revenue);
    let rev1 = value(last.net_revenue);
    if rev0 > 0.0 {
        (rev1 - rev0) / rev0
    } else {
        0.0
    }
}

fn profit_margin(statement: &FinancialStatement) -> f64 {
    let revenue = value(statement.net_revenue);
    if revenue > 0.0 {
        value(statement.profit_loss) / revenue
    } else {
        0.0
    }
}

fn leverage_ratio(statement: &FinancialStatement) -> f64 {
    let assets = value(statement.total_assets);
    if assets > 0.0 {
        value(statement.total_liabilities) / assets
    } else {
        1.0
    }
}

/// -50% or worse maps to 0, flat to 50, doubling or better to 100.
pub fn growth_pct(growth: f64) -> f64 {
    if !growth.is_finite() {
        return f64::from(NEUTRAL_TREND_SCORE);
    }
    if growth <= -0.5 {
        0.0
    } else if growth >= 1.0 {
        100.0
    } else if growth < 0.0 {
        (growth + 0.5) / 0.5 * 50.0
    } else {
        50.0 + growth * 50.0
    }
}

/// Losses floor at 30; a 30% margin or better maps to 100.
pub fn margin_pct(margin: f64) -> f64 {
    if !margin.is_finite() {
        return f64::from(NEUTRAL_TREND_SCORE);
    }
    if margin <= 0.0 {
        30.0
    } else if margin >= 0.3 {
        100.0
    } else {
        30.0 + (margin / 0.3) * 70.0
    }
}

/// Liabilities at or above assets floor at 20; 30% leverage or lower maps to 100.
pub fn leverage_pct(leverage: f64) -> f64 {
    if !leverage.is_finite() {
        return f64::from(NEUTRAL_TREND_SCORE);
    }
    if leverage >= 1.0 {
        20.0
    } else if leverage <= 0.3 {
        100.0
    } else {
        20.0 + (1.0 - leverage) * 80.0
    }
}

//! Pass/fail evaluation of covenant ratios against directional targets.

use serde::{Deserialize, Serialize};

use super::domain::{CovenantRatio, CovenantRatios, RiskDrivers};
use super::settings::{CovenantTargets, CovenantWeights};

/// Fixed grouping of covenant ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CovenantCategory {
    Liquidity,
    Solvency,
    Profitability,
    Efficiency,
}

impl CovenantCategory {
    pub const ALL: [CovenantCategory; 4] = [
        CovenantCategory::Liquidity,
        CovenantCategory::Solvency,
        CovenantCategory::Profitability,
        CovenantCategory::Efficiency,
    ];

    pub fn members(self) -> impl Iterator<Item = CovenantRatio> {
        COVENANT_POLICY
            .iter()
            .filter(move |entry| entry.category == self)
            .map(|entry| entry.ratio)
    }
}

/// Which side of the target counts as a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    GreaterThan,
    LessThan,
}

struct PolicyEntry {
    ratio: CovenantRatio,
    category: CovenantCategory,
    direction: Direction,
    default_target: f64,
}

const fn entry(
    ratio: CovenantRatio,
    category: CovenantCategory,
    direction: Direction,
    default_target: f64,
) -> PolicyEntry {
    PolicyEntry {
        ratio,
        category,
        direction,
        default_target,
    }
}

/// Category membership, direction, and default target for every ratio, in
/// [`CovenantRatio::ALL`] order. Ratios are stored in percent-style units.
static COVENANT_POLICY: [PolicyEntry; CovenantRatio::COUNT] = {
    use CovenantCategory::*;
    use CovenantRatio::*;
    use Direction::*;
    [
        entry(CurrentRatio, Liquidity, GreaterThan, 88.0),
        entry(QuickRatio, Liquidity, GreaterThan, 70.0),
        entry(CashRatio, Liquidity, GreaterThan, 20.0),
        entry(WorkingCapitalRatio, Liquidity, GreaterThan, 10.0),
        entry(DebtRatio, Solvency, LessThan, 60.0),
        entry(DebtToEquityRatio, Solvency, LessThan, 150.0),
        entry(InterestCoverageRatio, Solvency, GreaterThan, 150.0),
        entry(EquityRatio, Solvency, GreaterThan, 30.0),
        entry(GrossProfitMargin, Profitability, GreaterThan, 25.0),
        entry(NetProfitMargin, Profitability, GreaterThan, 5.0),
        entry(ReturnOnAssets, Profitability, GreaterThan, 5.0),
        entry(ReturnOnEquity, Profitability, GreaterThan, 10.0),
        entry(AvgCollectionPeriod, Efficiency, LessThan, 30.0),
        entry(InventoryTurnoverDays, Efficiency, LessThan, 60.0),
        entry(OperatingCycle, Efficiency, LessThan, 90.0),
        entry(CashConversionCycle, Efficiency, LessThan, 60.0),
        entry(AssetTurnover, Efficiency, GreaterThan, 80.0),
    ]
};

impl CovenantRatio {
    fn policy(self) -> &'static PolicyEntry {
        &COVENANT_POLICY[self.index()]
    }

    pub fn category(self) -> CovenantCategory {
        self.policy().category
    }

    pub fn direction(self) -> Direction {
        self.policy().direction
    }

    pub fn default_target(self) -> f64 {
        self.policy().default_target
    }
}

/// Strict comparison; a missing or non-finite value never passes.
pub fn is_pass(value: Option<f64>, direction: Direction, target: f64) -> bool {
    match value {
        Some(value) if value.is_finite() => match direction {
            Direction::GreaterThan => value > target,
            Direction::LessThan => value < target,
        },
        _ => false,
    }
}

/// Pass rate of one category. The denominator is always the full member count,
/// so a missing ratio counts as a fail.
pub fn category_score(
    category: CovenantCategory,
    ratios: &CovenantRatios,
    targets: &CovenantTargets,
) -> u8 {
    let (passed, total) = category.members().fold((0u32, 0u32), |(passed, total), ratio| {
        let pass = is_pass(ratios.get(ratio), ratio.direction(), targets.get(ratio));
        (passed + u32::from(pass), total + 1)
    });

    if total == 0 {
        return 0;
    }
    (100.0 * f64::from(passed) / f64::from(total)).round() as u8
}

/// Category pass rates for a ratio document.
pub fn score_drivers(ratios: &CovenantRatios, targets: &CovenantTargets) -> RiskDrivers {
    RiskDrivers {
        liquidity_score: category_score(CovenantCategory::Liquidity, ratios, targets),
        solvency_score: category_score(CovenantCategory::Solvency, ratios, targets),
        profitability_score: category_score(CovenantCategory::Profitability, ratios, targets),
        efficiency_score: category_score(CovenantCategory::Efficiency, ratios, targets),
    }
}

/// Weighted blend of the category scores using the sub-weights as given.
pub fn weighted_score(drivers: &RiskDrivers, weights: &CovenantWeights) -> f64 {
    f64::from(drivers.liquidity_score) * weights.liquidity
        + f64::from(drivers.solvency_score) * weights.solvency
        + f64::from(drivers.profitability_score) * weights.profitability
        + f64::from(drivers.efficiency_score) * weights.efficiency
}

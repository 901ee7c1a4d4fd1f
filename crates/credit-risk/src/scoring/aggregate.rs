//! Availability-aware weighted blend of the component scores.

use serde::Serialize;

use super::benchmark::{abs_score, NEUTRAL_ABS_SCORE};
use super::covenant::{score_drivers, weighted_score};
use super::domain::{
    BenchmarkRow, BorrowerProfileSlice, CompanyRisk, CovenantRatios, FinancialSummaryDocument,
    RiskBand, RiskComponents,
};
use super::normalize::{maturity_score, scale_score, size_score};
use super::settings::ResolvedSettings;
use super::sources::{Availability, UnavailableReason};
use super::trend::{trend_score, NEUTRAL_TREND_SCORE};

/// Score reported when no component had any input.
pub const NEUTRAL_SCORE: u8 = 50;

/// Fetched documents for one company, each possibly unavailable.
#[derive(Debug, Clone)]
pub struct ScoringInputs {
    pub covenant: Availability<CovenantRatios>,
    pub financials: Availability<FinancialSummaryDocument>,
    pub benchmarks: Availability<Vec<BenchmarkRow>>,
    pub profile: Availability<BorrowerProfileSlice>,
}

impl ScoringInputs {
    pub fn unavailable() -> Self {
        Self {
            covenant: Availability::missing(),
            financials: Availability::missing(),
            benchmarks: Availability::missing(),
            profile: Availability::missing(),
        }
    }
}

/// Whether a component took part in the weighted blend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComponentStatus {
    Included,
    Excluded { cause: UnavailableReason },
}

impl ComponentStatus {
    pub fn is_included(&self) -> bool {
        matches!(self, ComponentStatus::Included)
    }

    fn of<T>(availability: &Availability<T>) -> Self {
        match availability.reason() {
            None => ComponentStatus::Included,
            Some(reason) => ComponentStatus::Excluded {
                cause: reason.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentAvailability {
    pub covenant: ComponentStatus,
    pub trend: ComponentStatus,
    pub benchmark: ComponentStatus,
    pub maturity: ComponentStatus,
    pub size: ComponentStatus,
    pub scale: ComponentStatus,
}

/// Result plus the per-component trail explaining it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub risk: CompanyRisk,
    pub availability: ComponentAvailability,
}

/// Blend the fetched inputs into a [`RiskAssessment`]. Total over every input combination.
pub fn aggregate(inputs: &ScoringInputs, settings: &ResolvedSettings) -> RiskAssessment {
    let empty_ratios = CovenantRatios::default();
    let ratios = inputs.covenant.value().unwrap_or(&empty_ratios);
    let drivers = score_drivers(ratios, &settings.targets);
    let covenant_weighted_score = weighted_score(&drivers, &settings.covenant);

    let trend = inputs
        .financials
        .value()
        .map(|document| trend_score(&document.financial_statements))
        .unwrap_or(NEUTRAL_TREND_SCORE);

    let benchmarks = inputs
        .benchmarks
        .as_ref()
        .require(|rows| !rows.is_empty());
    let abs = benchmarks
        .value()
        .map(|rows| abs_score(rows))
        .unwrap_or(NEUTRAL_ABS_SCORE);

    let years = profile_field(&inputs.profile, |profile| profile.years_in_business);
    let employees = profile_field(&inputs.profile, |profile| profile.employee_count);
    let revenue = profile_field(&inputs.profile, |profile| profile.revenue_range);

    let components = RiskComponents {
        covenant_weighted_score,
        trend_score: trend,
        maturity_score: years.value().map(|years| maturity_score(*years)),
        abs_score: abs,
        size_score: revenue.value().map(|range| size_score(*range)),
        scale_score: employees.value().map(|count| scale_score(*count)),
    };

    let availability = ComponentAvailability {
        covenant: ComponentStatus::of(&inputs.covenant),
        trend: ComponentStatus::of(&inputs.financials),
        benchmark: ComponentStatus::of(&benchmarks),
        maturity: ComponentStatus::of(&years),
        size: ComponentStatus::of(&revenue),
        scale: ComponentStatus::of(&employees),
    };

    let score = combined_score(&components, &availability, settings);

    RiskAssessment {
        risk: CompanyRisk {
            score,
            band: RiskBand::from_score(score),
            drivers,
            components,
        },
        availability,
    }
}

fn profile_field<T: Copy>(
    profile: &Availability<BorrowerProfileSlice>,
    field: impl FnOnce(&BorrowerProfileSlice) -> Option<T>,
) -> Availability<T> {
    match profile {
        Availability::Available(profile) => match field(profile) {
            Some(value) => Availability::Available(value),
            None => Availability::missing(),
        },
        Availability::Unavailable(reason) => Availability::Unavailable(reason.clone()),
    }
}

/// Weighted mean over included components, with weights renormalized to their sum.
fn combined_score(
    components: &RiskComponents,
    availability: &ComponentAvailability,
    settings: &ResolvedSettings,
) -> u8 {
    let weights = &settings.components;
    let weighted = [
        (
            Some(components.covenant_weighted_score),
            weights.covenant,
            &availability.covenant,
        ),
        (
            Some(f64::from(components.trend_score)),
            weights.trend,
            &availability.trend,
        ),
        (
            Some(f64::from(components.abs_score)),
            weights.benchmark,
            &availability.benchmark,
        ),
        (
            components.maturity_score.map(f64::from),
            weights.maturity,
            &availability.maturity,
        ),
        (
            components.size_score.map(f64::from),
            weights.size,
            &availability.size,
        ),
        (
            components.scale_score.map(f64::from),
            weights.scale,
            &availability.scale,
        ),
    ];

    let (total, weight_sum) = weighted
        .iter()
        .filter(|(_, _, status)| status.is_included())
        .filter_map(|(value, weight, _)| value.map(|value| (value, *weight)))
        .fold((0.0, 0.0), |(total, weight_sum), (value, weight)| {
            (total + value * weight, weight_sum + weight)
        });

    if weight_sum <= 0.0 || !weight_sum.is_finite() {
        return NEUTRAL_SCORE;
    }

    let combined = total / weight_sum;
    if !combined.is_finite() {
        return NEUTRAL_SCORE;
    }
    combined.round().clamp(0.0, 100.0) as u8
}

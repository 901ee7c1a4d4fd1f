//! Composite company risk scoring.
//!
//! Covenant pass rates, financial trend, benchmark alignment, and three profile
//! normalizers are computed independently and blended with weights renormalized over
//! whichever components had input. Every path degrades to a neutral value or to
//! exclusion; nothing here returns an error to the caller.

pub mod aggregate;
mod appetite;
pub mod benchmark;
pub mod covenant;
pub mod domain;
mod lenient;
pub mod normalize;
pub mod service;
pub mod settings;
pub mod sources;
pub mod trend;

#[cfg(test)]
mod tests;

pub use aggregate::{
    aggregate, ComponentAvailability, ComponentStatus, RiskAssessment, ScoringInputs,
    NEUTRAL_SCORE,
};
pub use appetite::{appetite_accepts_band, RiskAppetite};
pub use covenant::{CovenantCategory, Direction};
pub use domain::{
    BenchmarkRow, BorrowerProfileSlice, CompanyId, CompanyRisk, CovenantRatio, CovenantRatios,
    FinancialStatement, FinancialSummary, FinancialSummaryDocument, RevenueRange, RiskBand,
    RiskComponents, RiskDrivers,
};
pub use service::CompanyRiskService;
pub use settings::{
    ComponentWeights, CovenantTargets, CovenantWeights, ResolvedSettings, RiskOverrides,
};
pub use sources::{Availability, RiskDataSource, RiskScoreSink, SourceError, UnavailableReason};

//! Collaborator boundaries and the best-effort fetch wrapper.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::domain::{
    BenchmarkRow, BorrowerProfileSlice, CompanyId, CovenantRatios, FinancialSummaryDocument,
    RiskBand,
};
use super::settings::RiskOverrides;

/// Read side of the persistence layer that owns every scoring input.
#[async_trait]
pub trait RiskDataSource: Send + Sync {
    async fn covenant_ratios(
        &self,
        company_id: CompanyId,
    ) -> Result<Option<CovenantRatios>, SourceError>;

    async fn financial_summary(
        &self,
        company_id: CompanyId,
    ) -> Result<Option<FinancialSummaryDocument>, SourceError>;

    async fn benchmark_rows(
        &self,
        company_id: CompanyId,
    ) -> Result<Option<Vec<BenchmarkRow>>, SourceError>;

    /// Resolved through the company's borrower profile by the collaborator.
    async fn borrower_profile(
        &self,
        company_id: CompanyId,
    ) -> Result<Option<BorrowerProfileSlice>, SourceError>;

    /// Global administrator overrides, not per company.
    async fn risk_overrides(&self) -> Result<Option<RiskOverrides>, SourceError>;
}

/// Write path for computed scores.
#[async_trait]
pub trait RiskScoreSink: Send + Sync {
    async fn store_company_risk(
        &self,
        company_id: CompanyId,
        score: u8,
        band: RiskBand,
    ) -> Result<(), SourceError>;
}

/// Error enumeration for collaborator failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),
    #[error("malformed document: {0}")]
    Malformed(String),
}

/// Why a component had no usable input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum UnavailableReason {
    Missing,
    Malformed(String),
    SourceFailed(String),
    TimedOut,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::Missing => f.write_str("document missing"),
            UnavailableReason::Malformed(detail) => write!(f, "malformed document: {detail}"),
            UnavailableReason::SourceFailed(detail) => write!(f, "source failed: {detail}"),
            UnavailableReason::TimedOut => f.write_str("fetch timed out"),
        }
    }
}

/// Input document for one component, or the reason it is absent.
#[derive(Debug, Clone, PartialEq)]
pub enum Availability<T> {
    Available(T),
    Unavailable(UnavailableReason),
}

impl<T> Availability<T> {
    pub fn missing() -> Self {
        Availability::Unavailable(UnavailableReason::Missing)
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }

    pub fn as_ref(&self) -> Availability<&T> {
        match self {
            Availability::Available(value) => Availability::Available(value),
            Availability::Unavailable(reason) => Availability::Unavailable(reason.clone()),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Availability::Available(value) => Some(value),
            Availability::Unavailable(_) => None,
        }
    }

    pub fn reason(&self) -> Option<&UnavailableReason> {
        match self {
            Availability::Available(_) => None,
            Availability::Unavailable(reason) => Some(reason),
        }
    }

    /// Demote an available document that fails `usable`.
    pub fn require(self, usable: impl FnOnce(&T) -> bool) -> Self {
        match self {
            Availability::Available(value) if !usable(&value) => Availability::missing(),
            other => other,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Availability::Available(value) => Some(value),
            Availability::Unavailable(_) => None,
        }
    }
}

impl<T> From<Result<Option<T>, SourceError>> for Availability<T> {
    fn from(result: Result<Option<T>, SourceError>) -> Self {
        match result {
            Ok(Some(value)) => Availability::Available(value),
            Ok(None) => Availability::missing(),
            Err(SourceError::Malformed(detail)) => {
                Availability::Unavailable(UnavailableReason::Malformed(detail))
            }
            Err(other) => Availability::Unavailable(UnavailableReason::SourceFailed(other.to_string())),
        }
    }
}

/// Await a collaborator call under `timeout`, folding every outcome into [`Availability`].
pub async fn fetch<T, F>(timeout: Duration, call: F) -> Availability<T>
where
    F: Future<Output = Result<Option<T>, SourceError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result.into(),
        Err(_) => Availability::Unavailable(UnavailableReason::TimedOut),
    }
}

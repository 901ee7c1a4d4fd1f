use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::aggregate::{aggregate, RiskAssessment, ScoringInputs};
use super::domain::{CompanyId, CompanyRisk};
use super::settings::ResolvedSettings;
use super::sources::{fetch, Availability, RiskDataSource, RiskScoreSink};
use crate::config::ScoringConfig;

/// Service composing the data source, the score sink, and the scoring pipeline.
pub struct CompanyRiskService<S, W> {
    source: Arc<S>,
    sink: Arc<W>,
    fetch_timeout: Duration,
}

impl<S, W> Clone for CompanyRiskService<S, W> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            sink: Arc::clone(&self.sink),
            fetch_timeout: self.fetch_timeout,
        }
    }
}

impl<S, W> CompanyRiskService<S, W>
where
    S: RiskDataSource + 'static,
    W: RiskScoreSink + 'static,
{
    pub fn new(source: Arc<S>, sink: Arc<W>, config: &ScoringConfig) -> Self {
        Self {
            source,
            sink,
            fetch_timeout: config.fetch_timeout,
        }
    }

    /// Score a company and keep the per-component availability trail.
    pub async fn assess_company(&self, company_id: CompanyId) -> RiskAssessment {
        let timeout = self.fetch_timeout;
        let source = self.source.as_ref();

        let (covenant, financials, benchmarks, profile, overrides) = tokio::join!(
            fetch(timeout, source.covenant_ratios(company_id)),
            fetch(timeout, source.financial_summary(company_id)),
            fetch(timeout, source.benchmark_rows(company_id)),
            fetch(timeout, source.borrower_profile(company_id)),
            fetch(timeout, source.risk_overrides()),
        );

        if let Availability::Unavailable(reason) = &overrides {
            debug!(%company_id, %reason, "risk overrides unavailable; using defaults");
        }
        let settings = ResolvedSettings::resolve(overrides.value());

        let inputs = ScoringInputs {
            covenant,
            financials,
            benchmarks,
            profile,
        };
        log_unavailable(company_id, &inputs);

        let assessment = aggregate(&inputs, &settings);
        info!(
            %company_id,
            score = assessment.risk.score,
            band = %assessment.risk.band,
            "company risk computed"
        );
        assessment
    }

    /// Score a company. Never fails; missing inputs degrade to neutral values or exclusion.
    pub async fn compute_company_risk(&self, company_id: CompanyId) -> CompanyRisk {
        self.assess_company(company_id).await.risk
    }

    /// Best-effort write of score and band. Failures are logged and swallowed.
    pub async fn persist_company_risk(&self, company_id: CompanyId, risk: &CompanyRisk) {
        match self
            .sink
            .store_company_risk(company_id, risk.score, risk.band)
            .await
        {
            Ok(()) => debug!(%company_id, score = risk.score, "company risk persisted"),
            Err(err) => warn!(%company_id, error = %err, "failed to persist company risk"),
        }
    }

    /// Recompute and store in one step, returning the fresh result.
    pub async fn refresh_company_risk(&self, company_id: CompanyId) -> CompanyRisk {
        let risk = self.compute_company_risk(company_id).await;
        self.persist_company_risk(company_id, &risk).await;
        risk
    }
}

fn log_unavailable(company_id: CompanyId, inputs: &ScoringInputs) {
    let reasons = [
        ("covenant_ratios", inputs.covenant.reason()),
        ("financial_summary", inputs.financials.reason()),
        ("benchmark_rows", inputs.benchmarks.reason()),
        ("borrower_profile", inputs.profile.reason()),
    ];
    for (document, reason) in reasons {
        if let Some(reason) = reason {
            debug!(%company_id, document, %reason, "scoring input unavailable");
        }
    }
}

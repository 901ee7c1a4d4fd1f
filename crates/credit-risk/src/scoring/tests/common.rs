use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::ScoringConfig;
use crate::scoring::domain::{
    BenchmarkRow, BorrowerProfileSlice, CompanyId, CovenantRatio, CovenantRatios,
    FinancialStatement, FinancialSummaryDocument, RevenueRange, RiskBand,
};
use crate::scoring::settings::RiskOverrides;
use crate::scoring::sources::{RiskDataSource, RiskScoreSink, SourceError};
use crate::scoring::CompanyRiskService;

pub(super) fn company() -> CompanyId {
    CompanyId(42)
}

/// Every ratio on the passing side of its default target.
pub(super) fn passing_ratios() -> CovenantRatios {
    CovenantRatios::new()
        .with(CovenantRatio::CurrentRatio, 200.0)
        .with(CovenantRatio::QuickRatio, 150.0)
        .with(CovenantRatio::CashRatio, 45.0)
        .with(CovenantRatio::WorkingCapitalRatio, 25.0)
        .with(CovenantRatio::DebtRatio, 35.0)
        .with(CovenantRatio::DebtToEquityRatio, 80.0)
        .with(CovenantRatio::InterestCoverageRatio, 400.0)
        .with(CovenantRatio::EquityRatio, 55.0)
        .with(CovenantRatio::GrossProfitMargin, 42.0)
        .with(CovenantRatio::NetProfitMargin, 12.0)
        .with(CovenantRatio::ReturnOnAssets, 9.0)
        .with(CovenantRatio::ReturnOnEquity, 18.0)
        .with(CovenantRatio::AvgCollectionPeriod, 10.0)
        .with(CovenantRatio::InventoryTurnoverDays, 35.0)
        .with(CovenantRatio::OperatingCycle, 45.0)
        .with(CovenantRatio::CashConversionCycle, 20.0)
        .with(CovenantRatio::AssetTurnover, 120.0)
}

/// Liquidity passes in full; every other category is absent.
pub(super) fn liquidity_only_ratios() -> CovenantRatios {
    CovenantRatios::new()
        .with(CovenantRatio::CurrentRatio, 200.0)
        .with(CovenantRatio::QuickRatio, 150.0)
        .with(CovenantRatio::CashRatio, 45.0)
        .with(CovenantRatio::WorkingCapitalRatio, 25.0)
}

pub(super) fn statement(revenue: f64, profit: f64, assets: f64, liabilities: f64) -> FinancialStatement {
    FinancialStatement {
        net_revenue: Some(revenue),
        profit_loss: Some(profit),
        ebitda: Some(profit * 1.2),
        total_assets: Some(assets),
        total_liabilities: Some(liabilities),
        date: None,
    }
}

pub(super) fn summary(years: &[(&str, FinancialStatement)]) -> FinancialSummaryDocument {
    FinancialSummaryDocument {
        financial_statements: years
            .iter()
            .map(|(year, statement)| (year.to_string(), statement.clone()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Revenue doubles, 30% margin, 20% leverage.
pub(super) fn strong_financials() -> FinancialSummaryDocument {
    summary(&[
        ("2022", statement(100.0, 10.0, 100.0, 40.0)),
        ("2023", statement(200.0, 60.0, 100.0, 20.0)),
    ])
}

pub(super) fn exact_benchmarks() -> Vec<BenchmarkRow> {
    vec![
        BenchmarkRow::new("current_ratio", 1.8, 1.8),
        BenchmarkRow::new("debt_ratio", 0.45, 0.45),
        BenchmarkRow::new("gross_profit_margin", 32.0, 32.0),
    ]
}

pub(super) fn full_profile() -> BorrowerProfileSlice {
    BorrowerProfileSlice {
        years_in_business: Some(12),
        employee_count: Some(50),
        revenue_range: Some(RevenueRange::From1MTo5M),
    }
}

#[derive(Debug, Default, Clone)]
pub(super) struct MemorySource {
    pub(super) covenant: Option<CovenantRatios>,
    pub(super) financials: Option<FinancialSummaryDocument>,
    pub(super) benchmarks: Option<Vec<BenchmarkRow>>,
    pub(super) profile: Option<BorrowerProfileSlice>,
    pub(super) overrides: Option<RiskOverrides>,
}

impl MemorySource {
    pub(super) fn complete() -> Self {
        Self {
            covenant: Some(passing_ratios()),
            financials: Some(strong_financials()),
            benchmarks: Some(exact_benchmarks()),
            profile: Some(full_profile()),
            overrides: None,
        }
    }
}

#[async_trait]
impl RiskDataSource for MemorySource {
    async fn covenant_ratios(&self, _: CompanyId) -> Result<Option<CovenantRatios>, SourceError> {
        Ok(self.covenant.clone())
    }

    async fn financial_summary(
        &self,
        _: CompanyId,
    ) -> Result<Option<FinancialSummaryDocument>, SourceError> {
        Ok(self.financials.clone())
    }

    async fn benchmark_rows(&self, _: CompanyId) -> Result<Option<Vec<BenchmarkRow>>, SourceError> {
        Ok(self.benchmarks.clone())
    }

    async fn borrower_profile(
        &self,
        _: CompanyId,
    ) -> Result<Option<BorrowerProfileSlice>, SourceError> {
        Ok(self.profile.clone())
    }

    async fn risk_overrides(&self) -> Result<Option<RiskOverrides>, SourceError> {
        Ok(self.overrides.clone())
    }
}

/// Every call fails with the configured error.
pub(super) struct FailingSource(pub(super) SourceError);

#[async_trait]
impl RiskDataSource for FailingSource {
    async fn covenant_ratios(&self, _: CompanyId) -> Result<Option<CovenantRatios>, SourceError> {
        Err(self.0.clone())
    }

    async fn financial_summary(
        &self,
        _: CompanyId,
    ) -> Result<Option<FinancialSummaryDocument>, SourceError> {
        Err(self.0.clone())
    }

    async fn benchmark_rows(&self, _: CompanyId) -> Result<Option<Vec<BenchmarkRow>>, SourceError> {
        Err(self.0.clone())
    }

    async fn borrower_profile(
        &self,
        _: CompanyId,
    ) -> Result<Option<BorrowerProfileSlice>, SourceError> {
        Err(self.0.clone())
    }

    async fn risk_overrides(&self) -> Result<Option<RiskOverrides>, SourceError> {
        Err(self.0.clone())
    }
}

/// Answers like [`MemorySource`] after sleeping past any sane fetch timeout.
pub(super) struct SlowSource {
    pub(super) inner: MemorySource,
    pub(super) delay: Duration,
}

#[async_trait]
impl RiskDataSource for SlowSource {
    async fn covenant_ratios(&self, id: CompanyId) -> Result<Option<CovenantRatios>, SourceError> {
        tokio::time::sleep(self.delay).await;
        self.inner.covenant_ratios(id).await
    }

    async fn financial_summary(
        &self,
        id: CompanyId,
    ) -> Result<Option<FinancialSummaryDocument>, SourceError> {
        tokio::time::sleep(self.delay).await;
        self.inner.financial_summary(id).await
    }

    async fn benchmark_rows(&self, id: CompanyId) -> Result<Option<Vec<BenchmarkRow>>, SourceError> {
        tokio::time::sleep(self.delay).await;
        self.inner.benchmark_rows(id).await
    }

    async fn borrower_profile(
        &self,
        id: CompanyId,
    ) -> Result<Option<BorrowerProfileSlice>, SourceError> {
        // Profile answers immediately so a partial timeout can be observed.
        self.inner.borrower_profile(id).await
    }

    async fn risk_overrides(&self) -> Result<Option<RiskOverrides>, SourceError> {
        tokio::time::sleep(self.delay).await;
        self.inner.risk_overrides().await
    }
}

#[derive(Debug, Default, Clone)]
pub(super) struct MemorySink {
    stored: Arc<Mutex<Vec<(CompanyId, u8, RiskBand)>>>,
}

impl MemorySink {
    pub(super) fn stored(&self) -> Vec<(CompanyId, u8, RiskBand)> {
        self.stored.lock().expect("sink mutex poisoned").clone()
    }
}

#[async_trait]
impl RiskScoreSink for MemorySink {
    async fn store_company_risk(
        &self,
        company_id: CompanyId,
        score: u8,
        band: RiskBand,
    ) -> Result<(), SourceError> {
        self.stored
            .lock()
            .expect("sink mutex poisoned")
            .push((company_id, score, band));
        Ok(())
    }
}

/// Storage without the score columns.
pub(super) struct LegacySink;

#[async_trait]
impl RiskScoreSink for LegacySink {
    async fn store_company_risk(&self, _: CompanyId, _: u8, _: RiskBand) -> Result<(), SourceError> {
        Err(SourceError::Unavailable(
            "companies table has no risk_score column".to_string(),
        ))
    }
}

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig {
        fetch_timeout: Duration::from_millis(250),
        ..ScoringConfig::default()
    }
}

pub(super) fn build_service<S: RiskDataSource + 'static>(
    source: S,
) -> (CompanyRiskService<S, MemorySink>, MemorySink) {
    let sink = MemorySink::default();
    let service = CompanyRiskService::new(Arc::new(source), Arc::new(sink.clone()), &scoring_config());
    (service, sink)
}

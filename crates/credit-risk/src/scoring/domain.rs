use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;

/// Identifier wrapper for companies on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub u64);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The 17 covenant ratios tracked per company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CovenantRatio {
    CurrentRatio,
    QuickRatio,
    CashRatio,
    WorkingCapitalRatio,
    DebtRatio,
    DebtToEquityRatio,
    InterestCoverageRatio,
    EquityRatio,
    GrossProfitMargin,
    NetProfitMargin,
    ReturnOnAssets,
    ReturnOnEquity,
    AvgCollectionPeriod,
    InventoryTurnoverDays,
    OperatingCycle,
    CashConversionCycle,
    AssetTurnover,
}

impl CovenantRatio {
    pub const COUNT: usize = 17;

    pub const ALL: [CovenantRatio; Self::COUNT] = [
        CovenantRatio::CurrentRatio,
        CovenantRatio::QuickRatio,
        CovenantRatio::CashRatio,
        CovenantRatio::WorkingCapitalRatio,
        CovenantRatio::DebtRatio,
        CovenantRatio::DebtToEquityRatio,
        CovenantRatio::InterestCoverageRatio,
        CovenantRatio::EquityRatio,
        CovenantRatio::GrossProfitMargin,
        CovenantRatio::NetProfitMargin,
        CovenantRatio::ReturnOnAssets,
        CovenantRatio::ReturnOnEquity,
        CovenantRatio::AvgCollectionPeriod,
        CovenantRatio::InventoryTurnoverDays,
        CovenantRatio::OperatingCycle,
        CovenantRatio::CashConversionCycle,
        CovenantRatio::AssetTurnover,
    ];

    /// Wire name used by stored ratio documents and override targets.
    pub fn name(self) -> &'static str {
        match self {
            CovenantRatio::CurrentRatio => "current_ratio",
            CovenantRatio::QuickRatio => "quick_ratio",
            CovenantRatio::CashRatio => "cash_ratio",
            CovenantRatio::WorkingCapitalRatio => "working_capital_ratio",
            CovenantRatio::DebtRatio => "debt_ratio",
            CovenantRatio::DebtToEquityRatio => "debt_to_equity_ratio",
            CovenantRatio::InterestCoverageRatio => "interest_coverage_ratio",
            CovenantRatio::EquityRatio => "equity_ratio",
            CovenantRatio::GrossProfitMargin => "gross_profit_margin",
            CovenantRatio::NetProfitMargin => "net_profit_margin",
            CovenantRatio::ReturnOnAssets => "return_on_assets",
            CovenantRatio::ReturnOnEquity => "return_on_equity",
            CovenantRatio::AvgCollectionPeriod => "avg_collection_period",
            CovenantRatio::InventoryTurnoverDays => "inventory_turnover_days",
            CovenantRatio::OperatingCycle => "operating_cycle",
            CovenantRatio::CashConversionCycle => "cash_conversion_cycle",
            CovenantRatio::AssetTurnover => "asset_turnover",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ratio| ratio.name() == name)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Sparse covenant ratio document. Absent, null, and non-numeric entries are
/// all treated the same: the ratio has no value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Value>",
    into = "BTreeMap<String, f64>"
)]
pub struct CovenantRatios {
    values: BTreeMap<CovenantRatio, f64>,
}

impl CovenantRatios {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ratio: CovenantRatio, value: f64) -> Self {
        self.set(ratio, value);
        self
    }

    pub fn set(&mut self, ratio: CovenantRatio, value: f64) {
        self.values.insert(ratio, value);
    }

    pub fn get(&self, ratio: CovenantRatio) -> Option<f64> {
        self.values.get(&ratio).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for CovenantRatios {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let values = raw
            .into_iter()
            .filter_map(|(key, value)| {
                let ratio = CovenantRatio::from_name(&key)?;
                value.as_f64().map(|number| (ratio, number))
            })
            .collect();
        Self { values }
    }
}

impl From<CovenantRatios> for BTreeMap<String, f64> {
    fn from(ratios: CovenantRatios) -> Self {
        ratios
            .values
            .into_iter()
            .map(|(ratio, value)| (ratio.name().to_string(), value))
            .collect()
    }
}

/// One fiscal year of income statement and balance sheet figures. Values that are
/// not finite numbers read as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStatement {
    #[serde(default, deserialize_with = "lenient::finite_number")]
    pub net_revenue: Option<f64>,
    #[serde(default, deserialize_with = "lenient::finite_number")]
    pub profit_loss: Option<f64>,
    #[serde(default, deserialize_with = "lenient::finite_number")]
    pub ebitda: Option<f64>,
    #[serde(default, deserialize_with = "lenient::finite_number")]
    pub total_assets: Option<f64>,
    #[serde(default, deserialize_with = "lenient::finite_number")]
    pub total_liabilities: Option<f64>,
    #[serde(default, deserialize_with = "lenient::calendar_date")]
    pub date: Option<NaiveDate>,
}

/// Year-keyed statements. Keys are 4-digit years, so map order is chronological.
pub type FinancialSummary = BTreeMap<String, FinancialStatement>;

/// Document returned by the financial summary collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummaryDocument {
    pub financial_statements: FinancialSummary,
}

/// One industry benchmark ratio paired with the company's calculated value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkRow {
    pub name: String,
    #[serde(default)]
    pub benchmark_value: Option<f64>,
    #[serde(default)]
    pub calculated_value: Option<f64>,
}

impl BenchmarkRow {
    pub fn new(name: impl Into<String>, benchmark_value: f64, calculated_value: f64) -> Self {
        Self {
            name: name.into(),
            benchmark_value: Some(benchmark_value),
            calculated_value: Some(calculated_value),
        }
    }
}

/// Approximate annual revenue buckets offered on the borrower profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevenueRange {
    #[serde(rename = "0-100k")]
    UpTo100K,
    #[serde(rename = "100k-500k")]
    From100KTo500K,
    #[serde(rename = "500k-1m")]
    From500KTo1M,
    #[serde(rename = "1m-5m")]
    From1MTo5M,
    #[serde(rename = "5m-10m")]
    From5MTo10M,
    #[serde(rename = "10m-25m")]
    From10MTo25M,
    #[serde(rename = "25m-50m")]
    From25MTo50M,
    #[serde(rename = "50m+")]
    Over50M,
}

/// Risk-relevant slice of the borrower profile. Each field is independently optional,
/// and a field holding something unusable reads as absent without affecting the others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BorrowerProfileSlice {
    #[serde(default, deserialize_with = "lenient::count")]
    pub years_in_business: Option<u32>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub employee_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient::revenue_range")]
    pub revenue_range: Option<RevenueRange>,
}

/// Coarse classification of a company's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            75..=u8::MAX => RiskBand::Low,
            50..=74 => RiskBand::Medium,
            _ => RiskBand::High,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Medium => "medium",
            RiskBand::High => "high",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(RiskBand::Low),
            "medium" => Some(RiskBand::Medium),
            "high" => Some(RiskBand::High),
            _ => None,
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-category covenant pass rates, reported for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskDrivers {
    pub liquidity_score: u8,
    pub solvency_score: u8,
    pub profitability_score: u8,
    pub efficiency_score: u8,
}

/// Every computed component value, including ones excluded from weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskComponents {
    pub covenant_weighted_score: f64,
    pub trend_score: u8,
    pub maturity_score: Option<u8>,
    pub abs_score: u8,
    pub size_score: Option<u8>,
    pub scale_score: Option<u8>,
}

/// Result of scoring a company. Built fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRisk {
    pub score: u8,
    pub band: RiskBand,
    pub drivers: RiskDrivers,
    pub components: RiskComponents,
}

use async_trait::async_trait;
use credit_risk::scoring::{
    BenchmarkRow, BorrowerProfileSlice, CompanyId, CovenantRatios, FinancialSummaryDocument,
    RiskBand, RiskDataSource, RiskOverrides, RiskScoreSink, SourceError,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory-backed collaborator: one folder of documents per company plus a global
/// settings folder.
#[derive(Debug, Clone)]
pub(crate) struct FileRiskStore {
    root: PathBuf,
}

impl FileRiskStore {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn company_dir(&self, company_id: CompanyId) -> PathBuf {
        self.root.join("companies").join(company_id.to_string())
    }

    fn settings_path(&self) -> PathBuf {
        self.root.join("settings").join("risk_overrides.json")
    }
}

async fn read_document(path: &Path) -> Result<Option<String>, SourceError> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(SourceError::Unavailable(format!(
            "{}: {err}",
            path.display()
        ))),
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, SourceError> {
    let Some(raw) = read_document(path).await? else {
        return Ok(None);
    };
    serde_json::from_str::<Option<T>>(&raw)
        .map_err(|err| SourceError::Malformed(format!("{}: {err}", path.display())))
}

#[derive(Debug, Deserialize)]
struct BenchmarkCsvRow {
    name: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    benchmark_value: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    calculated_value: Option<f64>,
}

impl From<BenchmarkCsvRow> for BenchmarkRow {
    fn from(row: BenchmarkCsvRow) -> Self {
        Self {
            name: row.name,
            benchmark_value: row.benchmark_value,
            calculated_value: row.calculated_value,
        }
    }
}

fn parse_benchmark_csv(raw: &str, path: &Path) -> Result<Vec<BenchmarkRow>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    reader
        .deserialize::<BenchmarkCsvRow>()
        .map(|row| {
            row.map(BenchmarkRow::from)
                .map_err(|err| SourceError::Malformed(format!("{}: {err}", path.display())))
        })
        .collect()
}

#[async_trait]
impl RiskDataSource for FileRiskStore {
    async fn covenant_ratios(
        &self,
        company_id: CompanyId,
    ) -> Result<Option<CovenantRatios>, SourceError> {
        read_json(&self.company_dir(company_id).join("covenant_ratios.json")).await
    }

    async fn financial_summary(
        &self,
        company_id: CompanyId,
    ) -> Result<Option<FinancialSummaryDocument>, SourceError> {
        read_json(&self.company_dir(company_id).join("financial_summary.json")).await
    }

    async fn benchmark_rows(
        &self,
        company_id: CompanyId,
    ) -> Result<Option<Vec<BenchmarkRow>>, SourceError> {
        let path = self.company_dir(company_id).join("benchmarks.csv");
        match read_document(&path).await? {
            Some(raw) => parse_benchmark_csv(&raw, &path).map(Some),
            None => Ok(None),
        }
    }

    async fn borrower_profile(
        &self,
        company_id: CompanyId,
    ) -> Result<Option<BorrowerProfileSlice>, SourceError> {
        read_json(&self.company_dir(company_id).join("borrower_profile.json")).await
    }

    async fn risk_overrides(&self) -> Result<Option<RiskOverrides>, SourceError> {
        read_json(&self.settings_path()).await
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct StoredRisk {
    score: u8,
    band: RiskBand,
}

#[async_trait]
impl RiskScoreSink for FileRiskStore {
    async fn store_company_risk(
        &self,
        company_id: CompanyId,
        score: u8,
        band: RiskBand,
    ) -> Result<(), SourceError> {
        let dir = self.company_dir(company_id);
        if !tokio::fs::try_exists(&dir).await.unwrap_or(false) {
            return Err(SourceError::Unavailable(format!(
                "no company record at {}",
                dir.display()
            )));
        }

        let payload = serde_json::to_vec_pretty(&StoredRisk { score, band })
            .map_err(|err| SourceError::Malformed(err.to_string()))?;
        tokio::fs::write(dir.join("risk.json"), payload)
            .await
            .map_err(|err| SourceError::Unavailable(err.to_string()))
    }
}

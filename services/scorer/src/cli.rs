use crate::infra::FileRiskStore;
use crate::report::render_assessment;
use clap::{Args, Parser, Subcommand};
use credit_risk::config::AppConfig;
use credit_risk::error::AppError;
use credit_risk::scoring::{appetite_accepts_band, CompanyId, CompanyRiskService, RiskBand};
use credit_risk::telemetry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "credit-risk-scorer",
    about = "Score marketplace companies and check lender risk appetite from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the composite risk score for one company
    Score(ScoreArgs),
    /// Check whether a lender's risk appetite accepts a band
    Appetite(AppetiteArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Company identifier
    #[arg(long)]
    pub(crate) company_id: u64,
    /// Override the configured data directory
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Write the score and band back to the company's record
    #[arg(long)]
    pub(crate) persist: bool,
    /// Print the full assessment as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AppetiteArgs {
    /// conservative, moderate, or aggressive
    #[arg(long)]
    pub(crate) appetite: Option<String>,
    /// low, medium, or high
    #[arg(long, value_parser = parse_band)]
    pub(crate) band: RiskBand,
}

fn parse_band(raw: &str) -> Result<RiskBand, String> {
    RiskBand::parse(raw).ok_or_else(|| format!("'{raw}' is not one of low, medium, high"))
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Score(args) => run_score(args, config).await,
        Command::Appetite(args) => {
            run_appetite(args);
            Ok(())
        }
    }
}

async fn run_score(args: ScoreArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(data_dir) = args.data_dir {
        config.scoring.data_dir = data_dir;
    }

    info!(
        ?config.environment,
        data_dir = %config.scoring.data_dir.display(),
        "scoring company"
    );

    let store = Arc::new(FileRiskStore::new(config.scoring.data_dir.clone()));
    let service = CompanyRiskService::new(store.clone(), store, &config.scoring);
    let company_id = CompanyId(args.company_id);

    let assessment = service.assess_company(company_id).await;
    if args.persist {
        service
            .persist_company_risk(company_id, &assessment.risk)
            .await;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        print!("{}", render_assessment(company_id, &assessment));
    }
    Ok(())
}

fn run_appetite(args: AppetiteArgs) {
    let accepted = appetite_accepts_band(args.appetite.as_deref(), args.band);
    let appetite = args.appetite.as_deref().unwrap_or("<none>");
    if accepted {
        println!("appetite '{appetite}' accepts {} risk", args.band);
    } else {
        println!("appetite '{appetite}' rejects {} risk", args.band);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_score_command() {
        let cli = Cli::try_parse_from([
            "credit-risk-scorer",
            "score",
            "--company-id",
            "17",
            "--persist",
        ])
        .expect("score args parse");

        match cli.command {
            Command::Score(args) => {
                assert_eq!(args.company_id, 17);
                assert!(args.persist);
                assert!(!args.json);
                assert!(args.data_dir.is_none());
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_unknown_band() {
        let result = Cli::try_parse_from([
            "credit-risk-scorer",
            "appetite",
            "--appetite",
            "moderate",
            "--band",
            "extreme",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn appetite_is_optional() {
        let cli = Cli::try_parse_from(["credit-risk-scorer", "appetite", "--band", "LOW"])
            .expect("appetite args parse");

        match cli.command {
            Command::Appetite(args) => {
                assert!(args.appetite.is_none());
                assert_eq!(args.band, RiskBand::Low);
            }
            other => panic!("expected appetite command, got {other:?}"),
        }
    }
}

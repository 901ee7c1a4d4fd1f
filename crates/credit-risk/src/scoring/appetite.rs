use serde::{Deserialize, Serialize};

use super::domain::RiskBand;

/// Lender-declared tolerance for borrower risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAppetite {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskAppetite {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "conservative" => Some(RiskAppetite::Conservative),
            "moderate" => Some(RiskAppetite::Moderate),
            "aggressive" => Some(RiskAppetite::Aggressive),
            _ => None,
        }
    }

    pub fn accepts(self, band: RiskBand) -> bool {
        match self {
            RiskAppetite::Conservative => band == RiskBand::Low,
            RiskAppetite::Moderate => matches!(band, RiskBand::Low | RiskBand::Medium),
            RiskAppetite::Aggressive => true,
        }
    }
}

/// Matching gate for accepted deals. An absent or unrecognized appetite accepts nothing.
pub fn appetite_accepts_band(appetite: Option<&str>, band: RiskBand) -> bool {
    appetite
        .and_then(RiskAppetite::parse)
        .map(|appetite| appetite.accepts(band))
        .unwrap_or(false)
}

//! Pure mappings from single raw metrics onto the 0-100 scale.

use super::domain::RevenueRange;

/// Years in business at which the maturity score saturates.
pub const MATURITY_SATURATION_YEARS: f64 = 10.0;
/// Headcount at which the scale score saturates.
pub const SCALE_SATURATION_EMPLOYEES: f64 = 200.0;
/// Revenue at which the logarithmic size curve reaches 100.
pub const SIZE_CAP_REVENUE: f64 = 50_000_000.0;

const CREDIT_SCORE_FLOOR: f64 = 300.0;
const CREDIT_SCORE_CEILING: f64 = 850.0;

/// Clamp into [0, 1]. Non-finite input maps to 0.
pub fn clamp01(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Scale a unit fraction to an integer percentage.
pub fn to_pct(fraction: f64) -> u8 {
    (100.0 * clamp01(fraction)).round() as u8
}

pub fn maturity_score(years_in_business: u32) -> u8 {
    to_pct(f64::from(years_in_business) / MATURITY_SATURATION_YEARS)
}

pub fn scale_score(employee_count: u32) -> u8 {
    to_pct(f64::from(employee_count) / SCALE_SATURATION_EMPLOYEES)
}

pub fn size_score(range: RevenueRange) -> u8 {
    let revenue = range.midpoint();
    to_pct((1.0 + revenue).log10() / (1.0 + SIZE_CAP_REVENUE).log10())
}

/// Linear map of a 300-850 credit-like score.
pub fn credit_score_pct(score: f64) -> u8 {
    to_pct((score - CREDIT_SCORE_FLOOR) / (CREDIT_SCORE_CEILING - CREDIT_SCORE_FLOOR))
}

impl RevenueRange {
    pub const ALL: [RevenueRange; 8] = [
        RevenueRange::UpTo100K,
        RevenueRange::From100KTo500K,
        RevenueRange::From500KTo1M,
        RevenueRange::From1MTo5M,
        RevenueRange::From5MTo10M,
        RevenueRange::From10MTo25M,
        RevenueRange::From25MTo50M,
        RevenueRange::Over50M,
    ];

    /// Approximate annual revenue used in place of the exact figure.
    /// The open-ended top bucket sits above the size cap on purpose.
    pub fn midpoint(self) -> f64 {
        match self {
            RevenueRange::UpTo100K => 50_000.0,
            RevenueRange::From100KTo500K => 300_000.0,
            RevenueRange::From500KTo1M => 750_000.0,
            RevenueRange::From1MTo5M => 3_000_000.0,
            RevenueRange::From5MTo10M => 7_500_000.0,
            RevenueRange::From10MTo25M => 17_500_000.0,
            RevenueRange::From25MTo50M => 37_500_000.0,
            RevenueRange::Over50M => 60_000_000.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RevenueRange::UpTo100K => "0-100k",
            RevenueRange::From100KTo500K => "100k-500k",
            RevenueRange::From500KTo1M => "500k-1m",
            RevenueRange::From1MTo5M => "1m-5m",
            RevenueRange::From5MTo10M => "5m-10m",
            RevenueRange::From10MTo25M => "10m-25m",
            RevenueRange::From25MTo50M => "25m-50m",
            RevenueRange::Over50M => "50m+",
        }
    }

    /// Bucket label match, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|range| range.label().eq_ignore_ascii_case(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp01_rejects_non_finite_values() {
        assert_eq!(clamp01(f64::NAN), 0.0);
        assert_eq!(clamp01(f64::INFINITY), 0.0);
        assert_eq!(clamp01(-0.4), 0.0);
        assert_eq!(clamp01(1.7), 1.0);
        assert_eq!(clamp01(0.25), 0.25);
    }

    #[test]
    fn maturity_saturates_at_ten_years() {
        assert_eq!(maturity_score(0), 0);
        assert_eq!(maturity_score(5), 50);
        assert_eq!(maturity_score(10), 100);
        assert_eq!(maturity_score(42), 100);
    }

    #[test]
    fn scale_saturates_at_two_hundred_employees() {
        assert_eq!(scale_score(0), 0);
        assert_eq!(scale_score(50), 25);
        assert_eq!(scale_score(200), 100);
        assert_eq!(scale_score(5_000), 100);
    }

    #[test]
    fn size_grows_logarithmically_with_revenue_bucket() {
        let scores: Vec<u8> = RevenueRange::ALL.iter().map(|r| size_score(*r)).collect();
        assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]), "{scores:?}");
        // log10(3_000_001) / log10(50_000_001) ~= 0.8413
        assert_eq!(size_score(RevenueRange::From1MTo5M), 84);
        assert_eq!(size_score(RevenueRange::Over50M), 100);
    }

    #[test]
    fn credit_score_maps_range_linearly() {
        assert_eq!(credit_score_pct(300.0), 0);
        assert_eq!(credit_score_pct(575.0), 50);
        assert_eq!(credit_score_pct(850.0), 100);
        assert_eq!(credit_score_pct(900.0), 100);
        assert_eq!(credit_score_pct(f64::NAN), 0);
    }
}

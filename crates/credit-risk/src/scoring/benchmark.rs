//! Alignment between a company's calculated ratios and industry benchmarks.

use super::domain::BenchmarkRow;

/// Score used when no row carries a usable pair of values.
pub const NEUTRAL_ABS_SCORE: u8 = 50;

/// `max(0, 1 - |c - b| / max(1, |b|))`, or `None` when either value is unusable.
pub fn row_alignment(row: &BenchmarkRow) -> Option<f64> {
    let benchmark = row.benchmark_value.filter(|value| value.is_finite())?;
    let calculated = row.calculated_value.filter(|value| value.is_finite())?;
    let relative_error = (calculated - benchmark).abs() / benchmark.abs().max(1.0);
    Some((1.0 - relative_error).max(0.0))
}

/// Mean row alignment on 0-100. Rows with unusable values are excluded, not penalized.
pub fn abs_score(rows: &[BenchmarkRow]) -> u8 {
    let (sum, count) = rows
        .iter()
        .filter_map(row_alignment)
        .fold((0.0, 0u32), |(sum, count), score| (sum + score, count + 1));

    if count == 0 {
        return NEUTRAL_ABS_SCORE;
    }
    (100.0 * sum / f64::from(count)).round().clamp(0.0, 100.0) as u8
}

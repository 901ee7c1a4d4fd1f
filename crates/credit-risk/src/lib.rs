//! Composite creditworthiness scoring for the lending marketplace.
//!
//! The [`scoring`] module blends covenant ratios, multi-year financial statements,
//! industry benchmark alignment, and borrower profile attributes into a single
//! 0-100 score and a coarse risk band used to gate lender/borrower matching.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;

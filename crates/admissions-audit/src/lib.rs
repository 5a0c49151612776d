//! Compares blind and aware admission policies under top-K or cutoff selection and
//! reports per-group admission rates with the demographic parity gap.

pub mod admissions;
pub mod config;
pub mod error;
pub mod export;
pub mod intake;
pub mod telemetry;

// Library root: match dataset loading, outcome classification, and the
// aggregate views behind the dashboard.

pub mod cache;
pub mod config;
pub mod dataset;
pub mod filter;
pub mod outcome;
pub mod stats;
pub mod view;

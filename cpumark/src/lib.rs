//! Scrapes per-CPU specification pages from cpubenchmark.net and turns the
//! loosely structured page text into typed, normalized records.

pub mod common;
pub mod dataset;
pub mod details;
pub mod extract;
pub mod fetch;
pub mod page;
pub mod rank;
pub mod record;

//! Security smoke-test checklist runner.
//!
//! Drives one headless Chromium page through a fixed list of scenarios against
//! a locally running application and writes a Markdown report with one row per
//! scenario plus any findings.

pub mod browser;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod output;
pub mod report;
pub mod scenario;

#[cfg(test)]
pub(crate) mod testing;

//! CLI library components for the keyword audit tool.

pub mod config;
pub mod logging;

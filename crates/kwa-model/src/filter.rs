//! Competitive filter configuration.

use serde::{Deserialize, Serialize};

/// Thresholds applied by the competitive aggregator.
///
/// A zero `min_sites` keeps every keyword. A zero `top_positions` disables the
/// top-position filter whatever `min_sites_in_top` says; a zero
/// `min_sites_in_top` with an active top filter imposes no floor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Minimum number of distinct sites ranking for a keyword.
    pub min_sites: u32,
    /// Rank threshold of the top-N filter (0 = disabled).
    pub top_positions: u32,
    /// Minimum number of sites ranking within `top_positions`.
    pub min_sites_in_top: u32,
}

impl FilterConfig {
    pub fn new(min_sites: u32, top_positions: u32, min_sites_in_top: u32) -> Self {
        Self {
            min_sites,
            top_positions,
            min_sites_in_top,
        }
    }

    /// Returns the active top-N threshold, if any.
    pub fn top_filter(&self) -> Option<u32> {
        (self.top_positions > 0).then_some(self.top_positions)
    }
}

//! Report planner configuration.

/// Configuration for the readings report planner.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Rows per page handed back to the caller (default: 100).
    pub page_size: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { page_size: 100 }
    }
}

//! VIGIL Reports — merges inventory metadata from the configuration
//! store with time-ordered readings from the time-series store into
//! tenant-isolated, paginated report pages.

pub mod browser;
pub mod config;
pub mod planner;
pub mod token;

pub use browser::{
    FilterVocabulary, ReadingsBrowserFilter, ReadingsBrowserPage, ReadingsBrowserParameters,
};
pub use config::PlannerConfig;
pub use planner::ReadingsReportPlanner;

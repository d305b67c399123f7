//! Configuration loading and management for the Agency Cost Engine.
//!
//! This module loads the process-wide company settings and the holiday
//! calendar from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use agency_cost_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/agency").unwrap();
//! println!("Working days per week: {}", config.settings().working_days_per_week);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CompanySettings, HolidayCalendarConfig};

//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading company
//! settings and the holiday calendar from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{Holiday, holidays_in_year};

use super::types::{CompanySettings, HolidayCalendarConfig};

/// Loads and provides access to company configuration.
///
/// # Directory Structure
///
/// ```text
/// config/agency/
/// ├── company.yaml   # Working time and pricing defaults
/// └── holidays.yaml  # Public holidays, any number of years
/// ```
///
/// # Example
///
/// ```no_run
/// use agency_cost_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/agency").unwrap();
/// println!("Hours per day: {}", loader.settings().working_hours_per_day);
/// println!("Holidays in 2026: {}", loader.holidays_for_year(2026).len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: CompanySettings,
    holidays: Vec<Holiday>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `company.yaml` is missing or invalid
    /// - `holidays.yaml` is present but invalid
    /// - the settings fail validation
    ///
    /// A missing `holidays.yaml` yields an empty calendar.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<CompanySettings>(&path.join("company.yaml"))?;
        settings.validate()?;

        let holidays_path = path.join("holidays.yaml");
        let holidays = if holidays_path.exists() {
            Self::load_yaml::<HolidayCalendarConfig>(&holidays_path)?.holidays
        } else {
            Vec::new()
        };

        Ok(Self::new(settings, holidays))
    }

    /// Builds a loader from already-parsed parts.
    pub fn new(settings: CompanySettings, mut holidays: Vec<Holiday>) -> Self {
        holidays.sort_by(|a, b| a.date.cmp(&b.date));
        Self { settings, holidays }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the company settings.
    pub fn settings(&self) -> &CompanySettings {
        &self.settings
    }

    /// Returns every configured holiday, sorted by date.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Returns the holidays that count against `year`.
    pub fn holidays_for_year(&self, year: i32) -> Vec<Holiday> {
        holidays_in_year(&self.holidays, year).cloned().collect()
    }
}

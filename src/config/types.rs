//! Configuration types for cost allocation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Holiday;

/// Company-wide working time and pricing defaults.
///
/// There is one instance per process, loaded from `company.yaml`.
///
/// # Example
///
/// ```
/// use agency_cost_engine::config::CompanySettings;
/// use rust_decimal::Decimal;
///
/// let settings = CompanySettings {
///     working_hours_per_day: Decimal::new(8, 0),
///     working_days_per_week: 5,
///     default_vat_rate: Decimal::new(5, 0),
///     default_profit_margin: Decimal::new(20, 0),
/// };
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySettings {
    /// Working hours in one working day.
    pub working_hours_per_day: Decimal,
    /// Working days in one week.
    pub working_days_per_week: u32,
    /// VAT rate in percent applied to estimates by default.
    pub default_vat_rate: Decimal,
    /// Profit margin in percent applied to estimates by default.
    pub default_profit_margin: Decimal,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            working_hours_per_day: Decimal::from(8),
            working_days_per_week: 5,
            default_vat_rate: Decimal::from(5),
            default_profit_margin: Decimal::from(20),
        }
    }
}

impl CompanySettings {
    /// Checks the settings for values the cost engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] when `working_days_per_week` is
    /// outside 1..=7 or a rate is negative, and
    /// [`EngineError::DivisionByZero`] when `working_hours_per_day` is not
    /// positive (it divides the daily cost).
    pub fn validate(&self) -> EngineResult<()> {
        if self.working_hours_per_day <= Decimal::ZERO {
            return Err(EngineError::DivisionByZero {
                context: format!(
                    "working_hours_per_day must be positive (got {})",
                    self.working_hours_per_day
                ),
            });
        }

        if !(1..=7).contains(&self.working_days_per_week) {
            return Err(EngineError::InvalidInput {
                field: "working_days_per_week".to_string(),
                message: format!(
                    "must be between 1 and 7 (got {})",
                    self.working_days_per_week
                ),
            });
        }

        for (field, value) in [
            ("default_vat_rate", self.default_vat_rate),
            ("default_profit_margin", self.default_profit_margin),
        ] {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!("must not be negative (got {})", value),
                });
            }
        }

        Ok(())
    }
}

/// Holiday calendar file structure (`holidays.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayCalendarConfig {
    /// All configured holidays, across years.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

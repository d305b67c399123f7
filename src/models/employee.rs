//! Employee model.
//!
//! This module defines the canonical [`Employee`] record the cost engine
//! consumes. Persisted records are normalized into this shape before they
//! reach any calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The maximum number of vacation days an employee may be allotted per year.
pub const MAX_VACATION_DAYS: u32 = 60;

/// Represents an employee whose costs are allocated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Base salary per month.
    pub base_salary: Decimal,
    /// Monthly compensation paid on top of the base salary.
    #[serde(default)]
    pub compensation: Decimal,
    /// Annual insurance premium.
    #[serde(default)]
    pub insurance: Decimal,
    /// Annual flight ticket allowance.
    #[serde(default)]
    pub ticket_value: Decimal,
    /// Visa cost, amortized over two years.
    #[serde(default)]
    pub visa_cost: Decimal,
    /// Vacation days allotted per year.
    #[serde(default)]
    pub vacation_days: u32,
    /// Whether the employee is active. Inactive employees do not share
    /// overhead and are left out of cost reporting.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Checks the record for impossible values.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if any monetary field is negative
    /// or `vacation_days` exceeds [`MAX_VACATION_DAYS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use agency_cost_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Dana".to_string(),
    ///     base_salary: Decimal::new(12000, 0),
    ///     compensation: Decimal::ZERO,
    ///     insurance: Decimal::new(5000, 0),
    ///     ticket_value: Decimal::new(3500, 0),
    ///     visa_cost: Decimal::new(4000, 0),
    ///     vacation_days: 30,
    ///     active: true,
    /// };
    /// assert!(employee.validate().is_ok());
    ///
    /// employee.vacation_days = 61;
    /// assert!(employee.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        let monetary = [
            ("base_salary", self.base_salary),
            ("compensation", self.compensation),
            ("insurance", self.insurance),
            ("ticket_value", self.ticket_value),
            ("visa_cost", self.visa_cost),
        ];

        for (field, value) in monetary {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!(
                        "must not be negative (employee '{}', got {})",
                        self.id, value
                    ),
                });
            }
        }

        if self.vacation_days > MAX_VACATION_DAYS {
            return Err(EngineError::InvalidInput {
                field: "vacation_days".to_string(),
                message: format!(
                    "must be between 0 and {} (employee '{}', got {})",
                    MAX_VACATION_DAYS, self.id, self.vacation_days
                ),
            });
        }

        Ok(())
    }
}

/// Counts the active employees in a snapshot.
///
/// This is the divisor for the equal overhead split.
pub fn count_active(employees: &[Employee]) -> usize {
    employees.iter().filter(|e| e.active).count()
}

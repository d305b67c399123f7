//! Service catalog and project staffing models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog service the agency sells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// List price for one unit of the service.
    pub base_price: Decimal,
    /// Hours of staff time one unit of the service takes.
    pub estimated_hours: Decimal,
    /// Inactive services are not offered in estimates.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// A service picked for a prospective project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedService {
    /// The catalog id of the service.
    pub service_id: String,
    /// How many units of the service the project needs.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Hours an employee is staffed on a prospective project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffAssignment {
    /// The employee being staffed.
    pub employee_id: String,
    /// Hours assigned to the employee.
    pub hours: Decimal,
}

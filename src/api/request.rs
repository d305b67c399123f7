//! Request types for the Agency Cost Engine API.
//!
//! Payloads arrive in whatever casing the upstream store produced. Each
//! record type here accepts both snake_case and camelCase field names and is
//! converted into its canonical model before any calculation sees it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Asset, CostFrequency, Employee, EstimateRequest, Holiday, OverheadCost, SelectedService,
    Service, StaffAssignment,
};
use crate::snapshot::CostSnapshot;

/// Request body for `POST /employees/cost-breakdown`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCostRequest {
    /// The employee to cost. Must be active in the snapshot.
    #[serde(alias = "employeeId")]
    pub employee_id: String,
    /// The calendar year. Defaults to the current year.
    #[serde(default)]
    pub year: Option<i32>,
    /// The records to calculate from.
    pub snapshot: SnapshotRequest,
}

/// Request body for `POST /team/costs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamCostRequest {
    /// The calendar year. Defaults to the current year.
    #[serde(default)]
    pub year: Option<i32>,
    /// The records to calculate from.
    pub snapshot: SnapshotRequest,
}

/// Request body for `POST /estimates` and `POST /offers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequestBody {
    /// The calendar year. Defaults to the current year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Services picked from the catalog.
    #[serde(alias = "selectedServices", alias = "selected_services")]
    pub services: Vec<SelectedServiceRecord>,
    /// Staff hours assigned to the project.
    #[serde(default)]
    pub staffing: Vec<StaffAssignmentRecord>,
    /// Extra overhead in percent of labor cost.
    #[serde(default, alias = "overheadPercent")]
    pub overhead_percent: Decimal,
    /// Profit margin in percent. Defaults to the company setting.
    #[serde(default, alias = "profitMargin")]
    pub profit_margin: Option<Decimal>,
    /// Discount in percent of the suggested price.
    #[serde(default, alias = "discountPercent")]
    pub discount_percent: Decimal,
    /// VAT rate in percent. Defaults to the company setting.
    #[serde(default, alias = "vatRate")]
    pub vat_rate: Option<Decimal>,
    /// The records to calculate from.
    pub snapshot: SnapshotRequest,
}

/// The records one calculation reads.
///
/// Company settings always come from the server configuration. Holidays
/// fall back to the configured calendar when the request omits them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotRequest {
    /// All employees, active or not.
    #[serde(default)]
    pub employees: Vec<EmployeeRecord>,
    /// All assets.
    #[serde(default)]
    pub assets: Vec<AssetRecord>,
    /// All overhead costs.
    #[serde(default, alias = "overheadCosts")]
    pub overhead_costs: Vec<OverheadCostRecord>,
    /// Holidays; `None` uses the configured calendar.
    #[serde(default)]
    pub holidays: Option<Vec<HolidayRecord>>,
    /// The service catalog.
    #[serde(default, alias = "services")]
    pub catalog: Vec<ServiceRecord>,
}

/// An employee record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Monthly base salary.
    #[serde(alias = "baseSalary")]
    pub base_salary: Decimal,
    /// Monthly compensation on top of the salary.
    #[serde(default)]
    pub compensation: Decimal,
    /// Annual insurance premium.
    #[serde(default)]
    pub insurance: Decimal,
    /// Annual flight ticket allowance.
    #[serde(default, alias = "ticketValue")]
    pub ticket_value: Decimal,
    /// Visa cost.
    #[serde(default, alias = "visaCost")]
    pub visa_cost: Decimal,
    /// Vacation days per year.
    #[serde(default, alias = "vacationDays")]
    pub vacation_days: u32,
    /// Whether the employee is active.
    #[serde(default = "default_active", alias = "isActive")]
    pub active: bool,
}

/// An asset record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Purchase price.
    #[serde(alias = "purchasePrice")]
    pub purchase_price: Decimal,
    /// Useful life in years.
    #[serde(alias = "usefulLifeYears")]
    pub useful_life_years: u32,
    /// The employee the asset is assigned to.
    #[serde(default, alias = "assignedTo")]
    pub assigned_to: Option<String>,
}

/// An overhead cost record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverheadCostRecord {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Amount per period.
    pub amount: Decimal,
    /// How often the amount recurs.
    #[serde(default = "default_frequency")]
    pub frequency: CostFrequency,
    /// Whether the cost is active.
    #[serde(default = "default_active", alias = "isActive")]
    pub active: bool,
}

/// A holiday record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayRecord {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The year the holiday counts against; defaults to the date's year.
    #[serde(default)]
    pub year: Option<i32>,
    /// The name of the holiday.
    #[serde(default)]
    pub name: String,
}

/// A catalog service record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// List price per unit.
    #[serde(alias = "basePrice")]
    pub base_price: Decimal,
    /// Staff hours per unit.
    #[serde(alias = "estimatedHours")]
    pub estimated_hours: Decimal,
    /// Whether the service is offered.
    #[serde(default = "default_active", alias = "isActive")]
    pub active: bool,
}

/// A service picked for the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedServiceRecord {
    /// The catalog id.
    #[serde(alias = "serviceId")]
    pub service_id: String,
    /// Units required.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Hours assigned to one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffAssignmentRecord {
    /// The employee.
    #[serde(alias = "employeeId")]
    pub employee_id: String,
    /// Hours assigned.
    pub hours: Decimal,
}

fn default_active() -> bool {
    true
}

fn default_quantity() -> u32 {
    1
}

fn default_frequency() -> CostFrequency {
    CostFrequency::Monthly
}

impl From<EmployeeRecord> for Employee {
    fn from(req: EmployeeRecord) -> Self {
        Employee {
            id: req.id,
            name: req.name,
            base_salary: req.base_salary,
            compensation: req.compensation,
            insurance: req.insurance,
            ticket_value: req.ticket_value,
            visa_cost: req.visa_cost,
            vacation_days: req.vacation_days,
            active: req.active,
        }
    }
}

impl TryFrom<AssetRecord> for Asset {
    type Error = EngineError;

    fn try_from(req: AssetRecord) -> EngineResult<Self> {
        Ok(Asset::new(req.id, req.name, req.purchase_price, req.useful_life_years)?
            .assigned(req.assigned_to))
    }
}

impl From<OverheadCostRecord> for OverheadCost {
    fn from(req: OverheadCostRecord) -> Self {
        OverheadCost {
            id: req.id,
            name: req.name,
            amount: req.amount,
            frequency: req.frequency,
            active: req.active,
        }
    }
}

impl From<HolidayRecord> for Holiday {
    fn from(req: HolidayRecord) -> Self {
        let mut holiday = Holiday::new(req.date, req.name);
        if let Some(year) = req.year {
            holiday.year = year;
        }
        holiday
    }
}

impl From<ServiceRecord> for Service {
    fn from(req: ServiceRecord) -> Self {
        Service {
            id: req.id,
            name: req.name,
            base_price: req.base_price,
            estimated_hours: req.estimated_hours,
            active: req.active,
        }
    }
}

impl From<SelectedServiceRecord> for SelectedService {
    fn from(req: SelectedServiceRecord) -> Self {
        SelectedService {
            service_id: req.service_id,
            quantity: req.quantity,
        }
    }
}

impl From<StaffAssignmentRecord> for StaffAssignment {
    fn from(req: StaffAssignmentRecord) -> Self {
        StaffAssignment {
            employee_id: req.employee_id,
            hours: req.hours,
        }
    }
}

impl SnapshotRequest {
    /// Converts the records into a [`CostSnapshot`], filling settings and
    /// missing holidays from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] for an asset with a negative
    /// price or a useful life below one year.
    pub fn into_snapshot(self, config: &ConfigLoader) -> EngineResult<CostSnapshot> {
        let assets = self
            .assets
            .into_iter()
            .map(Asset::try_from)
            .collect::<EngineResult<Vec<_>>>()?;
        let holidays = match self.holidays {
            Some(records) => records.into_iter().map(Into::into).collect(),
            None => config.holidays().to_vec(),
        };

        Ok(CostSnapshot {
            settings: config.settings().clone(),
            employees: self.employees.into_iter().map(Into::into).collect(),
            assets,
            overhead_costs: self.overhead_costs.into_iter().map(Into::into).collect(),
            holidays,
            services: self.catalog.into_iter().map(Into::into).collect(),
        })
    }
}

impl EstimateRequestBody {
    /// Splits the body into the estimate parameters and the snapshot
    /// records.
    pub fn into_parts(self) -> (EstimateRequest, SnapshotRequest) {
        let request = EstimateRequest {
            services: self.services.into_iter().map(Into::into).collect(),
            staffing: self.staffing.into_iter().map(Into::into).collect(),
            overhead_percent: self.overhead_percent,
            profit_margin: self.profit_margin,
            discount_percent: self.discount_percent,
            vat_rate: self.vat_rate,
        };
        (request, self.snapshot)
    }
}

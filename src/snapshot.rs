//! Snapshot sources.
//!
//! The engine never fetches data itself. Callers hand it a consistent
//! snapshot of employees, assets, overhead costs, holidays, settings and
//! services, read in one request scope so the active-employee count cannot
//! shift mid-calculation. [`SnapshotSource`] is the seam persistence layers
//! implement; [`CostSnapshot`] is the in-memory implementation.

use serde::{Deserialize, Serialize};

use crate::calculation::{
    CostContext, EmployeeCostResult, EstimateCalculation, EstimateContext, TeamCostResult,
    calculate_employee_cost, calculate_estimate, calculate_team_costs,
};
use crate::config::CompanySettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Asset, Employee, EmployeeCostBreakdown, EstimateRequest, EstimateResult, Holiday,
    OverheadCost, Service, holidays_in_year,
};

/// Read access to the records the cost engine consumes.
pub trait SnapshotSource {
    /// Returns the active employees.
    fn fetch_active_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Returns every asset, assigned or not.
    fn fetch_all_assets(&self) -> EngineResult<Vec<Asset>>;

    /// Returns the assets assigned to one employee.
    fn fetch_assets_assigned_to(&self, employee_id: &str) -> EngineResult<Vec<Asset>> {
        Ok(self
            .fetch_all_assets()?
            .into_iter()
            .filter(|a| a.is_assigned_to(employee_id))
            .collect())
    }

    /// Returns the active overhead costs.
    fn fetch_active_overhead_costs(&self) -> EngineResult<Vec<OverheadCost>>;

    /// Returns the holidays that count against `year`.
    fn fetch_holidays(&self, year: i32) -> EngineResult<Vec<Holiday>>;

    /// Returns the company settings.
    fn fetch_company_settings(&self) -> EngineResult<CompanySettings>;

    /// Returns the active catalog services.
    fn fetch_active_services(&self) -> EngineResult<Vec<Service>>;
}

/// An in-memory snapshot of everything the engine reads.
///
/// # Example
///
/// ```
/// use agency_cost_engine::config::CompanySettings;
/// use agency_cost_engine::snapshot::{CostSnapshot, SnapshotSource};
///
/// let snapshot = CostSnapshot::new(CompanySettings::default());
/// assert!(snapshot.fetch_active_employees().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostSnapshot {
    /// Company settings.
    #[serde(default)]
    pub settings: CompanySettings,
    /// All employees, active or not.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// All assets.
    #[serde(default)]
    pub assets: Vec<Asset>,
    /// All overhead costs.
    #[serde(default)]
    pub overhead_costs: Vec<OverheadCost>,
    /// All holidays, across years.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// The service catalog.
    #[serde(default)]
    pub services: Vec<Service>,
}

impl CostSnapshot {
    /// Creates an empty snapshot with the given settings.
    pub fn new(settings: CompanySettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }
}

impl SnapshotSource for CostSnapshot {
    fn fetch_active_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.employees.iter().filter(|e| e.active).cloned().collect())
    }

    fn fetch_all_assets(&self) -> EngineResult<Vec<Asset>> {
        Ok(self.assets.clone())
    }

    fn fetch_active_overhead_costs(&self) -> EngineResult<Vec<OverheadCost>> {
        Ok(self
            .overhead_costs
            .iter()
            .filter(|c| c.active)
            .cloned()
            .collect())
    }

    fn fetch_holidays(&self, year: i32) -> EngineResult<Vec<Holiday>> {
        Ok(holidays_in_year(&self.holidays, year).cloned().collect())
    }

    fn fetch_company_settings(&self) -> EngineResult<CompanySettings> {
        Ok(self.settings.clone())
    }

    fn fetch_active_services(&self) -> EngineResult<Vec<Service>> {
        Ok(self.services.iter().filter(|s| s.active).cloned().collect())
    }
}

/// Reads a snapshot from `source` and computes one employee's breakdown.
///
/// # Errors
///
/// Returns [`EngineError::EmployeeNotFound`] if `employee_id` is not among
/// the active employees, or any error from the source or the cost engine.
pub fn employee_cost_from_source<S: SnapshotSource + ?Sized>(
    source: &S,
    employee_id: &str,
    year: i32,
) -> EngineResult<EmployeeCostBreakdown> {
    calculate_employee_cost_from_source(source, employee_id, year).map(|r| r.breakdown)
}

/// Like [`employee_cost_from_source`], keeping the audit steps.
pub fn calculate_employee_cost_from_source<S: SnapshotSource + ?Sized>(
    source: &S,
    employee_id: &str,
    year: i32,
) -> EngineResult<EmployeeCostResult> {
    let employees = source.fetch_active_employees()?;
    let employee = employees
        .iter()
        .find(|e| e.id == employee_id)
        .ok_or_else(|| EngineError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        })?;

    let settings = source.fetch_company_settings()?;
    let overhead_costs = source.fetch_active_overhead_costs()?;
    let assets = source.fetch_assets_assigned_to(employee_id)?;
    let holidays = source.fetch_holidays(year)?;

    let context = CostContext {
        settings: &settings,
        overhead_costs: &overhead_costs,
        assets: &assets,
        holidays: &holidays,
        active_employee_count: employees.len(),
        year,
    };
    calculate_employee_cost(employee, &context, 1)
}

/// Reads a snapshot from `source` and prices an estimate.
pub fn estimate_from_source<S: SnapshotSource + ?Sized>(
    source: &S,
    request: &EstimateRequest,
    year: i32,
) -> EngineResult<EstimateResult> {
    calculate_estimate_from_source(source, request, year).map(|c| c.result)
}

/// Like [`estimate_from_source`], keeping the audit steps and warnings.
pub fn calculate_estimate_from_source<S: SnapshotSource + ?Sized>(
    source: &S,
    request: &EstimateRequest,
    year: i32,
) -> EngineResult<EstimateCalculation> {
    let settings = source.fetch_company_settings()?;
    let employees = source.fetch_active_employees()?;
    let services = source.fetch_active_services()?;
    let assets = source.fetch_all_assets()?;
    let overhead_costs = source.fetch_active_overhead_costs()?;
    let holidays = source.fetch_holidays(year)?;

    let context = EstimateContext {
        settings: &settings,
        employees: &employees,
        services: &services,
        assets: &assets,
        overhead_costs: &overhead_costs,
        holidays: &holidays,
        year,
    };
    calculate_estimate(request, &context, 1)
}

/// Reads a snapshot from `source` and reports costs for the whole team.
pub fn team_costs_from_source<S: SnapshotSource + ?Sized>(
    source: &S,
    year: i32,
) -> EngineResult<TeamCostResult> {
    let settings = source.fetch_company_settings()?;
    let employees = source.fetch_active_employees()?;
    let assets = source.fetch_all_assets()?;
    let overhead_costs = source.fetch_active_overhead_costs()?;
    let holidays = source.fetch_holidays(year)?;

    calculate_team_costs(&employees, &settings, &overhead_costs, &assets, &holidays, year)
}

//! Employee cost breakdown models.
//!
//! This module contains the [`EmployeeCostBreakdown`] produced by the
//! employee cost engine and the [`TeamCostSummary`] used for finance
//! reporting. Both are derived values: they are recomputed from a snapshot
//! on every request and never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The layered cost of one employee, from raw monthly cost to hourly rate.
///
/// Every monetary figure is rounded to 2 decimal places; the layers were
/// computed from unrounded intermediates.
///
/// # Example
///
/// ```
/// use agency_cost_engine::models::EmployeeCostBreakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let breakdown = EmployeeCostBreakdown {
///     employee_id: "emp_001".to_string(),
///     employee_name: "Dana".to_string(),
///     year: 2026,
///     base_salary: dec("12000"),
///     compensation: dec("0"),
///     insurance_monthly: dec("416.67"),
///     ticket_monthly: dec("291.67"),
///     visa_monthly: dec("166.67"),
///     thirteenth_month_accrual: dec("1000"),
///     asset_depreciation_yearly: dec("0"),
///     asset_depreciation_monthly: dec("0"),
///     total_monthly_overhead: dec("46500"),
///     active_employee_count: 10,
///     overhead_share: dec("4650"),
///     monthly_cost: dec("13875"),
///     full_monthly_cost: dec("18525"),
///     yearly_cost: dec("222300"),
///     working_days_per_year: 217,
///     daily_cost: dec("1024.42"),
///     hourly_cost: dec("128.05"),
/// };
/// assert_eq!(breakdown.full_monthly_cost - breakdown.monthly_cost, breakdown.overhead_share);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCostBreakdown {
    /// The employee the breakdown is for.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The calendar year used for the working-day calendar.
    pub year: i32,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Monthly compensation add-on.
    pub compensation: Decimal,
    /// Annual insurance spread over 12 months.
    pub insurance_monthly: Decimal,
    /// Annual ticket allowance spread over 12 months.
    pub ticket_monthly: Decimal,
    /// Visa cost spread over 24 months.
    pub visa_monthly: Decimal,
    /// One month of base salary spread over 12 months.
    pub thirteenth_month_accrual: Decimal,
    /// Straight-line depreciation of assigned assets per year.
    pub asset_depreciation_yearly: Decimal,
    /// Straight-line depreciation of assigned assets per month.
    pub asset_depreciation_monthly: Decimal,
    /// Company-wide overhead per month.
    pub total_monthly_overhead: Decimal,
    /// The number of active employees sharing the overhead.
    pub active_employee_count: usize,
    /// This employee's equal share of monthly overhead.
    pub overhead_share: Decimal,
    /// Monthly cost before overhead.
    pub monthly_cost: Decimal,
    /// Monthly cost including the overhead share.
    pub full_monthly_cost: Decimal,
    /// Full monthly cost times twelve.
    pub yearly_cost: Decimal,
    /// Effective working days in `year`.
    pub working_days_per_year: i64,
    /// Yearly cost per working day.
    pub daily_cost: Decimal,
    /// Daily cost per working hour.
    pub hourly_cost: Decimal,
}

/// Cost figures for every active employee in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCostSummary {
    /// The calendar year used for the working-day calendar.
    pub year: i32,
    /// Company-wide overhead per month.
    pub total_monthly_overhead: Decimal,
    /// The number of active employees.
    pub active_employee_count: usize,
    /// One breakdown per active employee, in snapshot order.
    pub employees: Vec<EmployeeCostBreakdown>,
    /// Sum of pre-overhead monthly costs.
    pub total_monthly_cost: Decimal,
    /// Sum of monthly costs including overhead shares.
    pub total_full_monthly_cost: Decimal,
    /// Sum of yearly costs.
    pub total_yearly_cost: Decimal,
    /// Mean hourly cost across active employees.
    pub average_hourly_cost: Decimal,
}

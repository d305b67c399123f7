//! Calculation logic for the Agency Cost Engine.
//!
//! This module contains the cost-allocation pipeline: overhead aggregation,
//! the working calendar, asset depreciation, the per-employee cost engine,
//! team cost reporting and the project cost estimator.

mod asset_depreciation;
mod cost_estimator;
mod employee_cost;
mod overhead;
mod rounding;
mod team_costs;
mod working_calendar;

pub use asset_depreciation::{AssetDepreciationResult, resolve_asset_depreciation};
pub use cost_estimator::{
    EstimateCalculation, EstimateContext, calculate_estimate, compute_estimate,
};
pub use employee_cost::{
    CostContext, EmployeeCostResult, calculate_employee_cost, compute_employee_cost_breakdown,
};
pub use overhead::{OverheadAggregation, aggregate_overhead};
pub use rounding::{MONEY_DECIMAL_PLACES, round_money};
pub use team_costs::{TeamCostResult, calculate_team_costs};
pub use working_calendar::{WEEKS_PER_YEAR, WorkingDaysResult, calculate_working_days};

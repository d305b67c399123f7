//! Core data models for the Agency Cost Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod asset;
mod audit;
mod cost_breakdown;
mod employee;
mod estimate;
mod holiday;
mod overhead;
mod service;

pub use asset::Asset;
pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use cost_breakdown::{EmployeeCostBreakdown, TeamCostSummary};
pub use employee::{Employee, MAX_VACATION_DAYS, count_active};
pub use estimate::{EstimateLine, EstimateRequest, EstimateResult, EstimateTotals, StaffingState};
pub use holiday::{Holiday, holidays_in_year};
pub use overhead::{CostFrequency, OverheadCost};
pub use service::{SelectedService, Service, StaffAssignment};

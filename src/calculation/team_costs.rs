//! Team cost reporting.
//!
//! Runs the employee cost engine across every active employee in a
//! snapshot. Inactive employees are excluded from the overhead pool and from
//! the report.

use rust_decimal::Decimal;

use crate::config::CompanySettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Asset, AuditStep, Employee, EmployeeCostBreakdown, Holiday, OverheadCost, TeamCostSummary,
    count_active,
};

use super::employee_cost::{CostContext, calculate_employee_cost};
use super::overhead::aggregate_overhead;
use super::rounding::{checked_sum, round_money};

const OVERHEAD_AGGREGATION: &str = "overhead_aggregation";

/// The result of a team cost calculation, including audit steps.
#[derive(Debug, Clone)]
pub struct TeamCostResult {
    /// The aggregated report.
    pub summary: TeamCostSummary,
    /// Audit steps: one overhead aggregation, then the per-employee steps
    /// of every employee, then the team totals.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates costs for every active employee and sums them.
///
/// # Errors
///
/// Returns [`EngineError::DivisionByZero`] when the snapshot has no active
/// employees, [`EngineError::InvalidInput`] when a team total overflows, or
/// any error from the employee cost engine.
pub fn calculate_team_costs(
    employees: &[Employee],
    settings: &CompanySettings,
    overhead_costs: &[OverheadCost],
    assets: &[Asset],
    holidays: &[Holiday],
    year: i32,
) -> EngineResult<TeamCostResult> {
    let active_employee_count = count_active(employees);
    if active_employee_count == 0 {
        return Err(EngineError::DivisionByZero {
            context: "no active employees to report on".to_string(),
        });
    }

    let overhead = aggregate_overhead(overhead_costs, 1)?;
    let mut audit_steps = vec![overhead.audit_step];
    let mut step: u32 = 2;

    let context = CostContext {
        settings,
        overhead_costs,
        assets,
        holidays,
        active_employee_count,
        year,
    };

    let mut breakdowns: Vec<EmployeeCostBreakdown> = Vec::with_capacity(active_employee_count);
    for employee in employees.iter().filter(|e| e.active) {
        let result = calculate_employee_cost(employee, &context, step)?;
        // The pool was aggregated once above
        for mut employee_step in result
            .audit_steps
            .into_iter()
            .filter(|s| s.rule_id != OVERHEAD_AGGREGATION)
        {
            employee_step.step_number = step;
            step += 1;
            audit_steps.push(employee_step);
        }
        breakdowns.push(result.breakdown);
    }

    let total_monthly_cost =
        checked_sum("total_monthly_cost", breakdowns.iter().map(|b| b.monthly_cost))?;
    let total_full_monthly_cost = checked_sum(
        "total_full_monthly_cost",
        breakdowns.iter().map(|b| b.full_monthly_cost),
    )?;
    let total_yearly_cost =
        checked_sum("total_yearly_cost", breakdowns.iter().map(|b| b.yearly_cost))?;
    let hourly_sum = checked_sum(
        "average_hourly_cost",
        breakdowns.iter().map(|b| b.hourly_cost),
    )?;
    let average_hourly_cost = round_money(hourly_sum / Decimal::from(breakdowns.len()));

    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "team_totals".to_string(),
        rule_name: "Team Totals".to_string(),
        formula: "sum over active employees; average hourly = sum(hourly) / count".to_string(),
        input: serde_json::json!({
            "active_employee_count": active_employee_count,
            "inactive_employees_excluded": employees.len() - active_employee_count
        }),
        output: serde_json::json!({
            "total_monthly_cost": total_monthly_cost.to_string(),
            "total_full_monthly_cost": total_full_monthly_cost.to_string(),
            "total_yearly_cost": total_yearly_cost.to_string(),
            "average_hourly_cost": average_hourly_cost.to_string()
        }),
        reasoning: format!(
            "{} active employees cost ${} per year, ${} per hour on average",
            active_employee_count, total_yearly_cost, average_hourly_cost
        ),
    });

    Ok(TeamCostResult {
        summary: TeamCostSummary {
            year,
            total_monthly_overhead: round_money(overhead.total_monthly_overhead),
            active_employee_count,
            employees: breakdowns,
            total_monthly_cost,
            total_full_monthly_cost,
            total_yearly_cost,
            average_hourly_cost,
        },
        audit_steps,
    })
}

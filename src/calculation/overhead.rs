//! Overhead aggregation.
//!
//! This module sums the active recurring operating costs into one
//! normalized monthly figure, the pool every active employee shares.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, OverheadCost};

use super::rounding::checked_sum;

/// The result of aggregating overhead costs, including the audit step.
#[derive(Debug, Clone)]
pub struct OverheadAggregation {
    /// Sum of normalized monthly contributions of active costs.
    pub total_monthly_overhead: Decimal,
    /// How many active costs contributed.
    pub active_cost_count: usize,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Aggregates overhead costs into a total monthly figure.
///
/// Inactive costs are skipped. Monthly costs contribute their amount, yearly
/// costs one twelfth of it. An empty or all-inactive set yields zero.
///
/// # Arguments
///
/// * `costs` - The overhead costs in the snapshot
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if any cost amount is negative, or
/// if the monthly total overflows.
///
/// # Examples
///
/// ```
/// use agency_cost_engine::calculation::aggregate_overhead;
/// use agency_cost_engine::models::{CostFrequency, OverheadCost};
/// use rust_decimal::Decimal;
///
/// let costs = vec![
///     OverheadCost {
///         id: "rent".to_string(),
///         name: "Office rent".to_string(),
///         amount: Decimal::new(40000, 0),
///         frequency: CostFrequency::Monthly,
///         active: true,
///     },
///     OverheadCost {
///         id: "licences".to_string(),
///         name: "Licences".to_string(),
///         amount: Decimal::new(78000, 0),
///         frequency: CostFrequency::Yearly,
///         active: true,
///     },
/// ];
///
/// let result = aggregate_overhead(&costs, 1).unwrap();
/// assert_eq!(result.total_monthly_overhead, Decimal::new(46500, 0));
/// ```
pub fn aggregate_overhead(
    costs: &[OverheadCost],
    step_number: u32,
) -> EngineResult<OverheadAggregation> {
    if let Some(cost) = costs.iter().find(|c| c.amount < Decimal::ZERO) {
        return Err(EngineError::InvalidInput {
            field: "amount".to_string(),
            message: format!(
                "overhead cost '{}' must not be negative (got {})",
                cost.id, cost.amount
            ),
        });
    }

    let active: Vec<&OverheadCost> = costs.iter().filter(|c| c.active).collect();
    let total_monthly_overhead =
        checked_sum("overhead_costs", active.iter().map(|c| c.monthly_amount()))?;

    let contributions: Vec<serde_json::Value> = active
        .iter()
        .map(|c| {
            serde_json::json!({
                "id": c.id,
                "amount": c.amount.normalize().to_string(),
                "frequency": c.frequency,
                "monthly": c.monthly_amount().normalize().to_string()
            })
        })
        .collect();

    let skipped = costs.len() - active.len();
    let audit_step = AuditStep {
        step_number,
        rule_id: "overhead_aggregation".to_string(),
        rule_name: "Overhead Aggregation".to_string(),
        formula: "sum(monthly amount | yearly amount / 12)".to_string(),
        input: serde_json::json!({
            "active_costs": contributions,
            "inactive_costs_skipped": skipped
        }),
        output: serde_json::json!({
            "total_monthly_overhead": total_monthly_overhead.normalize().to_string()
        }),
        reasoning: format!(
            "{} active overhead cost(s) normalize to ${} per month",
            active.len(),
            total_monthly_overhead.normalize()
        ),
    };

    Ok(OverheadAggregation {
        total_monthly_overhead,
        active_cost_count: active.len(),
        audit_step,
    })
}

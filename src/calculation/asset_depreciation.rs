//! Asset depreciation resolution.
//!
//! Sums the straight-line depreciation of the assets assigned to one
//! employee.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{Asset, AuditStep};

use super::rounding::checked_sum;

/// Per-employee asset depreciation, including the audit step.
#[derive(Debug, Clone)]
pub struct AssetDepreciationResult {
    /// Sum of `depreciation_per_year` over the employee's assets.
    pub yearly: Decimal,
    /// `yearly / 12`.
    pub monthly: Decimal,
    /// Number of assets assigned to the employee.
    pub asset_count: usize,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Resolves the yearly and monthly depreciation of assets assigned to
/// `employee_id`.
///
/// Assets assigned to other employees, or unassigned, are ignored.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
/// if the yearly sum overflows.
///
/// # Examples
///
/// ```
/// use agency_cost_engine::calculation::resolve_asset_depreciation;
/// use agency_cost_engine::models::Asset;
/// use rust_decimal::Decimal;
///
/// let assets = vec![
///     Asset::new("laptop", "Laptop", Decimal::new(7200, 0), 3)
///         .unwrap()
///         .assigned(Some("emp_001".to_string())),
///     Asset::new("car", "Car", Decimal::new(90000, 0), 5)
///         .unwrap()
///         .assigned(Some("emp_002".to_string())),
/// ];
///
/// let result = resolve_asset_depreciation("emp_001", &assets, 1).unwrap();
/// assert_eq!(result.yearly, Decimal::new(2400, 0));
/// assert_eq!(result.monthly, Decimal::new(200, 0));
/// ```
pub fn resolve_asset_depreciation(
    employee_id: &str,
    assets: &[Asset],
    step_number: u32,
) -> EngineResult<AssetDepreciationResult> {
    let assigned: Vec<&Asset> = assets
        .iter()
        .filter(|a| a.is_assigned_to(employee_id))
        .collect();

    let yearly = checked_sum(
        "asset_depreciation",
        assigned.iter().map(|a| a.depreciation_per_year()),
    )?;
    let monthly = yearly / Decimal::from(12);

    let asset_ids: Vec<&str> = assigned.iter().map(|a| a.id()).collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "asset_depreciation".to_string(),
        rule_name: "Asset Depreciation".to_string(),
        formula: "sum(purchase_price / useful_life_years); monthly = yearly / 12".to_string(),
        input: serde_json::json!({
            "employee_id": employee_id,
            "asset_ids": asset_ids
        }),
        output: serde_json::json!({
            "yearly": yearly.normalize().to_string(),
            "monthly": monthly.normalize().to_string()
        }),
        reasoning: if assigned.is_empty() {
            format!("No assets assigned to employee '{}'", employee_id)
        } else {
            format!(
                "{} asset(s) depreciate ${} per year, ${} per month",
                assigned.len(),
                yearly.normalize(),
                monthly.normalize()
            )
        },
    };

    Ok(AssetDepreciationResult {
        yearly,
        monthly,
        asset_count: assigned.len(),
        audit_step,
    })
}

//! Project estimate models.
//!
//! This module contains the inputs and outputs of the cost estimator,
//! including the [`StaffingState`] gate that decides whether an offer can
//! be created from an estimate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{SelectedService, StaffAssignment};

/// The user-adjustable parameters of one estimate.
///
/// `profit_margin` and `vat_rate` fall back to the company defaults when
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    /// Services the project needs.
    pub services: Vec<SelectedService>,
    /// Hours per staffed employee.
    pub staffing: Vec<StaffAssignment>,
    /// Overhead uplift applied to labor cost, in percent.
    #[serde(default)]
    pub overhead_percent: Decimal,
    /// Profit margin applied on cost plus overhead, in percent.
    #[serde(default)]
    pub profit_margin: Option<Decimal>,
    /// Discount applied to the suggested price, in percent.
    #[serde(default)]
    pub discount_percent: Decimal,
    /// VAT rate applied to the final price, in percent.
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
}

/// Whether staffed hours cover the hours the selected services require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffingState {
    /// Assigned hours meet or exceed required hours.
    Valid,
    /// Assigned hours fall short; offers cannot be created.
    Insufficient,
}

impl StaffingState {
    /// Derives the state from required and assigned hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use agency_cost_engine::models::StaffingState;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(
    ///     StaffingState::from_hours(Decimal::new(40, 0), Decimal::new(32, 0)),
    ///     StaffingState::Insufficient
    /// );
    /// assert_eq!(
    ///     StaffingState::from_hours(Decimal::new(40, 0), Decimal::new(40, 0)),
    ///     StaffingState::Valid
    /// );
    /// ```
    pub fn from_hours(required_hours: Decimal, assigned_hours: Decimal) -> Self {
        if assigned_hours < required_hours {
            StaffingState::Insufficient
        } else {
            StaffingState::Valid
        }
    }
}

/// Cost of one staffed employee within an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateLine {
    /// The staffed employee.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// Hours assigned.
    pub hours: Decimal,
    /// The employee's hourly cost from the cost engine.
    pub hourly_cost: Decimal,
    /// `hourly_cost * hours`.
    pub labor_cost: Decimal,
}

/// Aggregated pricing figures for an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateTotals {
    /// Sum of line labor costs.
    pub labor_cost: Decimal,
    /// Overhead uplift percentage used.
    pub overhead_percent: Decimal,
    /// `labor_cost * overhead_percent / 100`.
    pub overhead_amount: Decimal,
    /// `labor_cost + overhead_amount`.
    pub cost_with_overhead: Decimal,
    /// Profit margin percentage used.
    pub profit_margin: Decimal,
    /// `cost_with_overhead * profit_margin / 100`.
    pub profit_amount: Decimal,
    /// `cost_with_overhead + profit_amount`.
    pub suggested_price: Decimal,
    /// Discount percentage used.
    pub discount_percent: Decimal,
    /// `suggested_price * discount_percent / 100`.
    pub discount_amount: Decimal,
    /// `suggested_price - discount_amount`.
    pub final_price: Decimal,
    /// `profit_amount - discount_amount`.
    pub profit_after_discount: Decimal,
    /// Sum of catalog list prices for the selected services.
    pub services_list_price: Decimal,
    /// VAT rate percentage used.
    pub vat_rate: Decimal,
    /// `final_price * vat_rate / 100`.
    pub vat_amount: Decimal,
    /// `final_price + vat_amount`.
    pub total_with_vat: Decimal,
}

/// The complete output of the cost estimator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateResult {
    /// Per-employee labor costs.
    pub lines: Vec<EstimateLine>,
    /// Hours the selected services require.
    pub required_hours: Decimal,
    /// Hours staffed.
    pub assigned_hours: Decimal,
    /// `required_hours - assigned_hours`; positive only when insufficient.
    pub shortfall_hours: Decimal,
    /// Whether the staffing covers the required hours.
    pub staffing_state: StaffingState,
    /// Pricing totals.
    pub totals: EstimateTotals,
}

impl EstimateResult {
    /// Returns true if an offer may be created from this estimate.
    pub fn can_create_offer(&self) -> bool {
        self.staffing_state == StaffingState::Valid
    }

    /// Gate for the "create offer" action.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientStaffing`] carrying the shortfall
    /// when the estimate is in the [`StaffingState::Insufficient`] state.
    pub fn ensure_offer_allowed(&self) -> EngineResult<()> {
        match self.staffing_state {
            StaffingState::Valid => Ok(()),
            StaffingState::Insufficient => Err(EngineError::InsufficientStaffing {
                required_hours: self.required_hours,
                assigned_hours: self.assigned_hours,
                shortfall_hours: self.shortfall_hours,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn zero_totals() -> EstimateTotals {
        EstimateTotals {
            labor_cost: Decimal::ZERO,
            overhead_percent: Decimal::ZERO,
            overhead_amount: Decimal::ZERO,
            cost_with_overhead: Decimal::ZERO,
            profit_margin: Decimal::ZERO,
            profit_amount: Decimal::ZERO,
            suggested_price: Decimal::ZERO,
            discount_percent: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            final_price: Decimal::ZERO,
            profit_after_discount: Decimal::ZERO,
            services_list_price: Decimal::ZERO,
            vat_rate: Decimal::ZERO,
            vat_amount: Decimal::ZERO,
            total_with_vat: Decimal::ZERO,
        }
    }

    fn result_with_hours(required: &str, assigned: &str) -> EstimateResult {
        let required_hours = dec(required);
        let assigned_hours = dec(assigned);
        EstimateResult {
            lines: vec![],
            required_hours,
            assigned_hours,
            shortfall_hours: required_hours - assigned_hours,
            staffing_state: StaffingState::from_hours(required_hours, assigned_hours),
            totals: zero_totals(),
        }
    }

    #[test]
    fn test_valid_estimate_allows_offer() {
        let result = result_with_hours("40", "45");
        assert!(result.can_create_offer());
        assert!(result.ensure_offer_allowed().is_ok());
        assert!(result.shortfall_hours <= Decimal::ZERO);
    }

    #[test]
    fn test_insufficient_estimate_blocks_offer() {
        let result = result_with_hours("40", "32.5");
        assert!(!result.can_create_offer());

        match result.ensure_offer_allowed() {
            Err(EngineError::InsufficientStaffing {
                required_hours,
                assigned_hours,
                shortfall_hours,
            }) => {
                assert_eq!(required_hours, dec("40"));
                assert_eq!(assigned_hours, dec("32.5"));
                assert_eq!(shortfall_hours, dec("7.5"));
            }
            other => panic!("Expected InsufficientStaffing, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_cover_is_valid() {
        assert_eq!(
            StaffingState::from_hours(dec("10"), dec("10.0")),
            StaffingState::Valid
        );
    }

    #[test]
    fn test_staffing_state_serialization() {
        assert_eq!(
            serde_json::to_string(&StaffingState::Insufficient).unwrap(),
            "\"insufficient\""
        );
        assert_eq!(
            serde_json::to_string(&StaffingState::Valid).unwrap(),
            "\"valid\""
        );
    }

    #[test]
    fn test_estimate_request_defaults() {
        let json = r#"{"services": [], "staffing": []}"#;
        let request: EstimateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.overhead_percent, Decimal::ZERO);
        assert_eq!(request.discount_percent, Decimal::ZERO);
        assert!(request.profit_margin.is_none());
        assert!(request.vat_rate.is_none());
    }
}

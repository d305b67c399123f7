//! Recurring operating cost model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often an overhead cost recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostFrequency {
    /// Billed every month.
    Monthly,
    /// Billed once a year.
    Yearly,
}

/// A recurring operating cost such as rent, software licences or utilities.
///
/// # Example
///
/// ```
/// use agency_cost_engine::models::{CostFrequency, OverheadCost};
/// use rust_decimal::Decimal;
///
/// let licences = OverheadCost {
///     id: "oh_001".to_string(),
///     name: "Design licences".to_string(),
///     amount: Decimal::new(24000, 0),
///     frequency: CostFrequency::Yearly,
///     active: true,
/// };
/// assert_eq!(licences.monthly_amount(), Decimal::new(2000, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverheadCost {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Amount charged per `frequency` period.
    pub amount: Decimal,
    /// Billing frequency.
    pub frequency: CostFrequency,
    /// Inactive costs are ignored by the overhead aggregator.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl OverheadCost {
    /// Returns the cost normalized to one month: `amount` when monthly,
    /// `amount / 12` when yearly.
    pub fn monthly_amount(&self) -> Decimal {
        match self.frequency {
            CostFrequency::Monthly => self.amount,
            CostFrequency::Yearly => self.amount / Decimal::from(12),
        }
    }
}

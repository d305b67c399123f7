//! Asset model with straight-line depreciation.
//!
//! An [`Asset`] keeps its yearly depreciation in sync with its purchase price
//! and useful life: the figure is recomputed by every constructor and setter
//! that touches either input, and deserialization goes through the same
//! validating constructor.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A depreciating asset, optionally assigned to one employee.
///
/// Many assets may point at the same employee. The asset does not own the
/// employee and outlives any assignment.
///
/// # Example
///
/// ```
/// use agency_cost_engine::models::Asset;
/// use rust_decimal::Decimal;
///
/// let mut laptop = Asset::new("ast_001", "Laptop", Decimal::new(6000, 0), 3).unwrap();
/// assert_eq!(laptop.depreciation_per_year(), Decimal::new(2000, 0));
///
/// laptop.set_useful_life_years(4).unwrap();
/// assert_eq!(laptop.depreciation_per_year(), Decimal::new(1500, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AssetRecord")]
pub struct Asset {
    id: String,
    name: String,
    purchase_price: Decimal,
    useful_life_years: u32,
    depreciation_per_year: Decimal,
    assigned_to: Option<String>,
}

/// The raw shape of an asset as stored, before validation.
#[derive(Debug, Clone, Deserialize)]
struct AssetRecord {
    id: String,
    #[serde(default)]
    name: String,
    purchase_price: Decimal,
    useful_life_years: u32,
    #[serde(default)]
    assigned_to: Option<String>,
}

impl TryFrom<AssetRecord> for Asset {
    type Error = EngineError;

    fn try_from(record: AssetRecord) -> EngineResult<Self> {
        let asset = Asset::new(
            record.id,
            record.name,
            record.purchase_price,
            record.useful_life_years,
        )?;
        Ok(asset.assigned(record.assigned_to))
    }
}

impl Asset {
    /// Creates an unassigned asset.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if `purchase_price` is negative
    /// or `useful_life_years` is less than one.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        purchase_price: Decimal,
        useful_life_years: u32,
    ) -> EngineResult<Self> {
        let id = id.into();
        validate_price(&id, purchase_price)?;
        validate_useful_life(&id, useful_life_years)?;

        Ok(Self {
            depreciation_per_year: straight_line(purchase_price, useful_life_years),
            id,
            name: name.into(),
            purchase_price,
            useful_life_years,
            assigned_to: None,
        })
    }

    /// Returns the asset with its assignment replaced.
    pub fn assigned(mut self, employee_id: Option<String>) -> Self {
        self.assigned_to = employee_id;
        self
    }

    /// Returns the asset id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the asset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the purchase price.
    pub fn purchase_price(&self) -> Decimal {
        self.purchase_price
    }

    /// Returns the useful life in years.
    pub fn useful_life_years(&self) -> u32 {
        self.useful_life_years
    }

    /// Returns `purchase_price / useful_life_years`, unrounded.
    pub fn depreciation_per_year(&self) -> Decimal {
        self.depreciation_per_year
    }

    /// Returns the id of the employee this asset is assigned to, if any.
    pub fn assigned_to(&self) -> Option<&str> {
        self.assigned_to.as_deref()
    }

    /// Returns true if the asset is assigned to the given employee.
    pub fn is_assigned_to(&self, employee_id: &str) -> bool {
        self.assigned_to.as_deref() == Some(employee_id)
    }

    /// Updates the purchase price and recomputes depreciation.
    pub fn set_purchase_price(&mut self, purchase_price: Decimal) -> EngineResult<()> {
        validate_price(&self.id, purchase_price)?;
        self.purchase_price = purchase_price;
        self.depreciation_per_year = straight_line(self.purchase_price, self.useful_life_years);
        Ok(())
    }

    /// Updates the useful life and recomputes depreciation.
    pub fn set_useful_life_years(&mut self, useful_life_years: u32) -> EngineResult<()> {
        validate_useful_life(&self.id, useful_life_years)?;
        self.useful_life_years = useful_life_years;
        self.depreciation_per_year = straight_line(self.purchase_price, self.useful_life_years);
        Ok(())
    }

    /// Assigns the asset to an employee, or clears the assignment.
    pub fn set_assigned_to(&mut self, employee_id: Option<String>) {
        self.assigned_to = employee_id;
    }
}

fn straight_line(purchase_price: Decimal, useful_life_years: u32) -> Decimal {
    purchase_price / Decimal::from(useful_life_years)
}

fn validate_price(id: &str, purchase_price: Decimal) -> EngineResult<()> {
    if purchase_price < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "purchase_price".to_string(),
            message: format!("must not be negative (asset '{}', got {})", id, purchase_price),
        });
    }
    Ok(())
}

fn validate_useful_life(id: &str, useful_life_years: u32) -> EngineResult<()> {
    if useful_life_years < 1 {
        return Err(EngineError::InvalidInput {
            field: "useful_life_years".to_string(),
            message: format!("must be at least 1 year (asset '{}')", id),
        });
    }
    Ok(())
}

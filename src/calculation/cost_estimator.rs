//! Project cost estimation.
//!
//! This module prices a prospective project from the selected catalog
//! services and the hours staffed per employee:
//!
//! 1. required hours = sum(estimated_hours x quantity) over services
//! 2. assigned hours = sum(hours) over staff
//! 3. labor cost = sum(hourly_cost x hours) over staff
//! 4. overhead amount = labor cost x overhead% / 100
//! 5. cost with overhead = labor cost + overhead amount
//! 6. profit = cost with overhead x margin% / 100
//! 7. suggested price = cost with overhead + profit
//! 8. discount = suggested price x discount% / 100; final price = suggested
//!    price - discount; profit after discount = profit - discount
//!
//! The overhead percentage is an uplift on top of the overhead share already
//! contained in each hourly cost; both layers apply.
//!
//! Staffing is validated against the required hours. When assigned hours
//! fall short the estimate is still priced, but it is marked
//! [`StaffingState::Insufficient`] and no offer may be created from it.
//!
//! Each published amount is rounded to cents and later amounts are derived
//! from the rounded ones, so the totals reconcile to the cent.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::CompanySettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Asset, AuditStep, AuditWarning, Employee, EstimateLine, EstimateRequest, EstimateResult,
    EstimateTotals, Holiday, OverheadCost, Service, StaffingState, count_active,
};

use super::employee_cost::{CostContext, calculate_employee_cost};
use super::rounding::{checked_add, checked_mul, checked_sub, checked_sum, percent_of, round_money};

/// The snapshot an estimate is priced against.
#[derive(Debug, Clone, Copy)]
pub struct EstimateContext<'a> {
    /// Company settings providing default margin and VAT.
    pub settings: &'a CompanySettings,
    /// All employees; the active ones set the overhead split.
    pub employees: &'a [Employee],
    /// The service catalog; only active services can be selected.
    pub services: &'a [Service],
    /// All assets.
    pub assets: &'a [Asset],
    /// All overhead costs.
    pub overhead_costs: &'a [OverheadCost],
    /// The holiday calendar.
    pub holidays: &'a [Holiday],
    /// The calendar year for working-day calendars.
    pub year: i32,
}

impl<'a> EstimateContext<'a> {
    /// Returns the employee cost context, with the overhead split taken over
    /// the active employees in this snapshot.
    pub fn cost_context(&self) -> CostContext<'a> {
        CostContext {
            settings: self.settings,
            overhead_costs: self.overhead_costs,
            assets: self.assets,
            holidays: self.holidays,
            active_employee_count: count_active(self.employees),
            year: self.year,
        }
    }
}

/// The result of an estimate calculation, including audit data.
#[derive(Debug, Clone)]
pub struct EstimateCalculation {
    /// The priced estimate.
    pub result: EstimateResult,
    /// The audit steps recording each stage.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings, such as insufficient staffing.
    pub warnings: Vec<AuditWarning>,
}

/// Computes an estimate without the audit trail.
///
/// # Examples
///
/// ```
/// use agency_cost_engine::calculation::{EstimateContext, compute_estimate};
/// use agency_cost_engine::config::CompanySettings;
/// use agency_cost_engine::models::{
///     Employee, EstimateRequest, SelectedService, Service, StaffAssignment, StaffingState,
/// };
/// use rust_decimal::Decimal;
///
/// let employees = vec![Employee {
///     id: "emp_001".to_string(),
///     name: "Dana".to_string(),
///     base_salary: Decimal::new(12000, 0),
///     compensation: Decimal::ZERO,
///     insurance: Decimal::ZERO,
///     ticket_value: Decimal::ZERO,
///     visa_cost: Decimal::ZERO,
///     vacation_days: 0,
///     active: true,
/// }];
/// let services = vec![Service {
///     id: "svc_logo".to_string(),
///     name: "Logo".to_string(),
///     base_price: Decimal::new(5000, 0),
///     estimated_hours: Decimal::new(20, 0),
///     active: true,
/// }];
/// let settings = CompanySettings::default();
/// let context = EstimateContext {
///     settings: &settings,
///     employees: &employees,
///     services: &services,
///     assets: &[],
///     overhead_costs: &[],
///     holidays: &[],
///     year: 2026,
/// };
/// let request = EstimateRequest {
///     services: vec![SelectedService { service_id: "svc_logo".to_string(), quantity: 2 }],
///     staffing: vec![StaffAssignment { employee_id: "emp_001".to_string(), hours: Decimal::new(30, 0) }],
///     overhead_percent: Decimal::ZERO,
///     profit_margin: None,
///     discount_percent: Decimal::ZERO,
///     vat_rate: None,
/// };
///
/// let estimate = compute_estimate(&request, &context).unwrap();
/// assert_eq!(estimate.required_hours, Decimal::new(40, 0));
/// assert_eq!(estimate.staffing_state, StaffingState::Insufficient);
/// assert_eq!(estimate.shortfall_hours, Decimal::new(10, 0));
/// ```
pub fn compute_estimate(
    request: &EstimateRequest,
    context: &EstimateContext<'_>,
) -> EngineResult<EstimateResult> {
    calculate_estimate(request, context, 1).map(|calculation| calculation.result)
}

/// Calculates an estimate with an audit trail.
///
/// # Errors
///
/// * [`EngineError::ServiceNotFound`] if a selected service is not in the
///   active catalog
/// * [`EngineError::EmployeeNotFound`] if a staffed employee is not in the
///   snapshot
/// * [`EngineError::InvalidInput`] for negative percentages or hours, a
///   discount above 100%, zero quantities, duplicate staffing rows, an
///   inactive staffed employee, or an amount too large to represent
/// * any error from the employee cost engine, such as
///   [`EngineError::DivisionByZero`]
///
/// Insufficient staffing is not an error here; it is reported through
/// [`EstimateResult::staffing_state`].
pub fn calculate_estimate(
    request: &EstimateRequest,
    context: &EstimateContext<'_>,
    step_number: u32,
) -> EngineResult<EstimateCalculation> {
    let settings = context.settings;
    settings.validate()?;

    let profit_margin = request.profit_margin.unwrap_or(settings.default_profit_margin);
    let vat_rate = request.vat_rate.unwrap_or(settings.default_vat_rate);
    validate_percent("overhead_percent", request.overhead_percent)?;
    validate_percent("profit_margin", profit_margin)?;
    validate_percent("vat_rate", vat_rate)?;
    validate_percent("discount_percent", request.discount_percent)?;
    if request.discount_percent > Decimal::ONE_HUNDRED {
        return Err(EngineError::InvalidInput {
            field: "discount_percent".to_string(),
            message: format!("must not exceed 100 (got {})", request.discount_percent),
        });
    }

    let mut step = step_number;
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();

    // Required hours
    let mut required_hours = Decimal::ZERO;
    let mut services_list_price = Decimal::ZERO;
    let mut service_rows = Vec::with_capacity(request.services.len());
    for selected in &request.services {
        let service = context
            .services
            .iter()
            .find(|s| s.active && s.id == selected.service_id)
            .ok_or_else(|| EngineError::ServiceNotFound {
                service_id: selected.service_id.clone(),
            })?;
        validate_service(service)?;
        if selected.quantity == 0 {
            return Err(EngineError::InvalidInput {
                field: "quantity".to_string(),
                message: format!("service '{}' must be selected at least once", service.id),
            });
        }

        let quantity = Decimal::from(selected.quantity);
        required_hours = checked_add(
            "required_hours",
            required_hours,
            checked_mul("required_hours", service.estimated_hours, quantity)?,
        )?;
        services_list_price = checked_add(
            "services_list_price",
            services_list_price,
            checked_mul("services_list_price", service.base_price, quantity)?,
        )?;
        service_rows.push(serde_json::json!({
            "service_id": service.id,
            "quantity": selected.quantity,
            "estimated_hours": service.estimated_hours.normalize().to_string()
        }));
    }
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "required_hours".to_string(),
        rule_name: "Required Hours".to_string(),
        formula: "sum(estimated_hours * quantity)".to_string(),
        input: serde_json::json!({ "services": service_rows }),
        output: serde_json::json!({
            "required_hours": required_hours.normalize().to_string()
        }),
        reasoning: format!(
            "{} service selection(s) require {} hours",
            request.services.len(),
            required_hours.normalize()
        ),
    });
    step += 1;

    // Labor cost per staffed employee
    let cost_context = context.cost_context();
    let mut seen = HashSet::new();
    let mut lines = Vec::with_capacity(request.staffing.len());
    for assignment in &request.staffing {
        if !seen.insert(assignment.employee_id.as_str()) {
            return Err(EngineError::InvalidInput {
                field: "staffing".to_string(),
                message: format!("employee '{}' is staffed more than once", assignment.employee_id),
            });
        }
        if assignment.hours < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "hours".to_string(),
                message: format!(
                    "hours for employee '{}' must not be negative (got {})",
                    assignment.employee_id, assignment.hours
                ),
            });
        }

        let employee = context
            .employees
            .iter()
            .find(|e| e.id == assignment.employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: assignment.employee_id.clone(),
            })?;

        // The per-employee steps stay internal; one summary step is recorded.
        let cost = calculate_employee_cost(employee, &cost_context, step)?;
        let hourly_cost = cost.breakdown.hourly_cost;
        let labor_cost = round_money(checked_mul("labor_cost", hourly_cost, assignment.hours)?);

        audit_steps.push(AuditStep {
            step_number: step,
            rule_id: "staff_labor_cost".to_string(),
            rule_name: "Staff Labor Cost".to_string(),
            formula: "hourly_cost * hours".to_string(),
            input: serde_json::json!({
                "employee_id": employee.id,
                "hourly_cost": hourly_cost.to_string(),
                "hours": assignment.hours.normalize().to_string()
            }),
            output: serde_json::json!({ "labor_cost": labor_cost.to_string() }),
            reasoning: format!(
                "${} x {} hours = ${}",
                hourly_cost,
                assignment.hours.normalize(),
                labor_cost
            ),
        });
        step += 1;

        lines.push(EstimateLine {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            hours: assignment.hours,
            hourly_cost,
            labor_cost,
        });
    }

    let assigned_hours = checked_sum("assigned_hours", lines.iter().map(|l| l.hours))?;
    let labor_cost = checked_sum("labor_cost", lines.iter().map(|l| l.labor_cost))?;

    // Pricing
    let overhead_amount = percent_of("overhead_amount", labor_cost, request.overhead_percent)?;
    let cost_with_overhead = checked_add("cost_with_overhead", labor_cost, overhead_amount)?;
    let profit_amount = percent_of("profit_amount", cost_with_overhead, profit_margin)?;
    let suggested_price = checked_add("suggested_price", cost_with_overhead, profit_amount)?;
    let discount_amount =
        percent_of("discount_amount", suggested_price, request.discount_percent)?;
    let final_price = checked_sub("final_price", suggested_price, discount_amount)?;
    let profit_after_discount =
        checked_sub("profit_after_discount", profit_amount, discount_amount)?;
    let vat_amount = percent_of("vat_amount", final_price, vat_rate)?;
    let total_with_vat = checked_add("total_with_vat", final_price, vat_amount)?;

    let totals = EstimateTotals {
        labor_cost,
        overhead_percent: request.overhead_percent,
        overhead_amount,
        cost_with_overhead,
        profit_margin,
        profit_amount,
        suggested_price,
        discount_percent: request.discount_percent,
        discount_amount,
        final_price,
        profit_after_discount,
        services_list_price: round_money(services_list_price),
        vat_rate,
        vat_amount,
        total_with_vat,
    };

    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "pricing".to_string(),
        rule_name: "Pricing".to_string(),
        formula: "(labor * (1 + overhead%)) * (1 + margin%) * (1 - discount%)".to_string(),
        input: serde_json::json!({
            "labor_cost": labor_cost.to_string(),
            "overhead_percent": request.overhead_percent.normalize().to_string(),
            "profit_margin": profit_margin.normalize().to_string(),
            "discount_percent": request.discount_percent.normalize().to_string(),
            "vat_rate": vat_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "overhead_amount": overhead_amount.to_string(),
            "cost_with_overhead": cost_with_overhead.to_string(),
            "profit_amount": profit_amount.to_string(),
            "suggested_price": suggested_price.to_string(),
            "discount_amount": discount_amount.to_string(),
            "final_price": final_price.to_string(),
            "profit_after_discount": profit_after_discount.to_string(),
            "total_with_vat": total_with_vat.to_string()
        }),
        reasoning: format!(
            "${} labor + ${} overhead + ${} profit = ${} suggested; - ${} discount = ${}",
            labor_cost,
            overhead_amount,
            profit_amount,
            suggested_price,
            discount_amount,
            final_price
        ),
    });
    step += 1;

    // Staffing gate
    let staffing_state = StaffingState::from_hours(required_hours, assigned_hours);
    let shortfall_hours = required_hours - assigned_hours;
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "staffing_validation".to_string(),
        rule_name: "Staffing Validation".to_string(),
        formula: "assigned_hours >= required_hours".to_string(),
        input: serde_json::json!({
            "required_hours": required_hours.normalize().to_string(),
            "assigned_hours": assigned_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "staffing_state": staffing_state,
            "shortfall_hours": shortfall_hours.normalize().to_string()
        }),
        reasoning: match staffing_state {
            StaffingState::Valid => format!(
                "{} hours staffed cover {} required hours",
                assigned_hours.normalize(),
                required_hours.normalize()
            ),
            StaffingState::Insufficient => format!(
                "{} hours staffed fall {} hours short of {} required; offer creation blocked",
                assigned_hours.normalize(),
                shortfall_hours.normalize(),
                required_hours.normalize()
            ),
        },
    });

    if staffing_state == StaffingState::Insufficient {
        warn!(
            required_hours = %required_hours,
            assigned_hours = %assigned_hours,
            shortfall_hours = %shortfall_hours,
            "Estimate staffing is insufficient"
        );
        warnings.push(AuditWarning {
            code: "INSUFFICIENT_STAFFING".to_string(),
            message: format!(
                "Staffed hours are {} short of the {} hours the selected services require",
                shortfall_hours.normalize(),
                required_hours.normalize()
            ),
            severity: "high".to_string(),
        });
    }

    Ok(EstimateCalculation {
        result: EstimateResult {
            lines,
            required_hours,
            assigned_hours,
            shortfall_hours,
            staffing_state,
            totals,
        },
        audit_steps,
        warnings,
    })
}

fn validate_percent(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative (got {})", value),
        });
    }
    Ok(())
}

fn validate_service(service: &Service) -> EngineResult<()> {
    for (field, value) in [
        ("base_price", service.base_price),
        ("estimated_hours", service.estimated_hours),
    ] {
        if value < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: field.to_string(),
                message: format!(
                    "service '{}' must not be negative (got {})",
                    service.id, value
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostFrequency, SelectedService, StaffAssignment};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn employee(id: &str, base_salary: &str, active: bool) -> Employee {
        Employee {
            id: id.to_string(),
            name: id.to_string(),
            base_salary: dec(base_salary),
            compensation: Decimal::ZERO,
            insurance: Decimal::ZERO,
            ticket_value: Decimal::ZERO,
            visa_cost: Decimal::ZERO,
            vacation_days: 0,
            active,
        }
    }

    fn team() -> Vec<Employee> {
        // 12000 + 1000 accrual = 13000/month; + 2000 overhead share = 15000;
        // 180000/yr / 260 days / 8h = 86.538.. -> 86.54
        vec![
            employee("emp_001", "12000", true),
            employee("emp_002", "12000", true),
            employee("emp_old", "5000", false),
        ]
    }

    fn catalog() -> Vec<Service> {
        vec![
            Service {
                id: "svc_brand".to_string(),
                name: "Brand identity".to_string(),
                base_price: dec("15000"),
                estimated_hours: dec("40"),
                active: true,
            },
            Service {
                id: "svc_social".to_string(),
                name: "Social campaign".to_string(),
                base_price: dec("4000"),
                estimated_hours: dec("10"),
                active: true,
            },
            Service {
                id: "svc_retired".to_string(),
                name: "Retired".to_string(),
                base_price: dec("1"),
                estimated_hours: dec("1"),
                active: false,
            },
        ]
    }

    fn overhead() -> Vec<OverheadCost> {
        vec![OverheadCost {
            id: "rent".to_string(),
            name: "Rent".to_string(),
            amount: dec("4000"),
            frequency: CostFrequency::Monthly,
            active: true,
        }]
    }

    fn request(hours: &[(&str, &str)], services: &[(&str, u32)]) -> EstimateRequest {
        EstimateRequest {
            services: services
                .iter()
                .map(|(id, quantity)| SelectedService {
                    service_id: id.to_string(),
                    quantity: *quantity,
                })
                .collect(),
            staffing: hours
                .iter()
                .map(|(id, h)| StaffAssignment {
                    employee_id: id.to_string(),
                    hours: dec(h),
                })
                .collect(),
            overhead_percent: dec("10"),
            profit_margin: Some(dec("20")),
            discount_percent: dec("5"),
            vat_rate: Some(dec("5")),
        }
    }

    fn run(request: &EstimateRequest) -> EngineResult<EstimateCalculation> {
        let settings = CompanySettings::default();
        let employees = team();
        let services = catalog();
        let overhead = overhead();
        let context = EstimateContext {
            settings: &settings,
            employees: &employees,
            services: &services,
            assets: &[],
            overhead_costs: &overhead,
            holidays: &[],
            year: 2026,
        };
        calculate_estimate(request, &context, 1)
    }

    #[test]
    fn test_full_pricing_chain() {
        let req = request(&[("emp_001", "30"), ("emp_002", "20")], &[("svc_brand", 1), ("svc_social", 1)]);
        let calc = run(&req).unwrap();
        let result = calc.result;

        assert_eq!(result.required_hours, dec("50"));
        assert_eq!(result.assigned_hours, dec("50"));
        assert_eq!(result.staffing_state, StaffingState::Valid);
        assert_eq!(result.shortfall_hours, Decimal::ZERO);

        assert_eq!(result.lines[0].hourly_cost, dec("86.54"));
        assert_eq!(result.lines[0].labor_cost, dec("2596.20"));
        assert_eq!(result.lines[1].labor_cost, dec("1730.80"));

        let t = result.totals;
        assert_eq!(t.labor_cost, dec("4327.00"));
        assert_eq!(t.overhead_amount, dec("432.70"));
        assert_eq!(t.cost_with_overhead, dec("4759.70"));
        assert_eq!(t.profit_amount, dec("951.94"));
        assert_eq!(t.suggested_price, dec("5711.64"));
        assert_eq!(t.discount_amount, dec("285.58"));
        assert_eq!(t.final_price, dec("5426.06"));
        assert_eq!(t.profit_after_discount, dec("666.36"));
        assert_eq!(t.services_list_price, dec("19000"));
        assert_eq!(t.vat_amount, dec("271.30"));
        assert_eq!(t.total_with_vat, dec("5697.36"));
        assert!(calc.warnings.is_empty());
    }

    #[test]
    fn test_quantity_multiplies_required_hours() {
        let req = request(&[("emp_001", "100")], &[("svc_brand", 2), ("svc_social", 3)]);
        let result = run(&req).unwrap().result;
        assert_eq!(result.required_hours, dec("110"));
        assert_eq!(result.totals.services_list_price, dec("42000"));
    }

    #[test]
    fn test_insufficient_staffing_reports_shortfall() {
        let req = request(&[("emp_001", "30")], &[("svc_brand", 1)]);
        let calc = run(&req).unwrap();

        assert_eq!(calc.result.staffing_state, StaffingState::Insufficient);
        assert_eq!(calc.result.shortfall_hours, dec("10"));
        assert!(!calc.result.can_create_offer());
        assert_eq!(calc.warnings.len(), 1);
        assert_eq!(calc.warnings[0].code, "INSUFFICIENT_STAFFING");

        let last = calc.audit_steps.last().unwrap();
        assert_eq!(last.rule_id, "staffing_validation");
        assert_eq!(last.output["staffing_state"], "insufficient");
    }

    #[test]
    fn test_overstaffing_is_valid_with_negative_shortfall() {
        let req = request(&[("emp_001", "50")], &[("svc_brand", 1)]);
        let result = run(&req).unwrap().result;
        assert_eq!(result.staffing_state, StaffingState::Valid);
        assert_eq!(result.shortfall_hours, dec("-10"));
    }

    #[test]
    fn test_no_services_and_no_staff_is_valid_and_free() {
        let req = request(&[], &[]);
        let result = run(&req).unwrap().result;
        assert_eq!(result.staffing_state, StaffingState::Valid);
        assert_eq!(result.totals.final_price, Decimal::ZERO);
    }

    #[test]
    fn test_default_margin_and_vat_come_from_settings() {
        let mut req = request(&[("emp_001", "10")], &[]);
        req.profit_margin = None;
        req.vat_rate = None;

        let result = run(&req).unwrap().result;
        let defaults = CompanySettings::default();
        assert_eq!(result.totals.profit_margin, defaults.default_profit_margin);
        assert_eq!(result.totals.vat_rate, defaults.default_vat_rate);
    }

    #[test]
    fn test_discount_eats_into_profit() {
        let req = request(&[("emp_001", "30"), ("emp_002", "20")], &[("svc_brand", 1)]);
        let t = run(&req).unwrap().result.totals;
        assert_eq!(t.profit_after_discount, t.profit_amount - t.discount_amount);
        assert_eq!(t.final_price, t.suggested_price - t.discount_amount);
        assert_eq!(t.cost_with_overhead, t.final_price - t.profit_after_discount);
    }

    #[test]
    fn test_unknown_service_is_rejected() {
        let req = request(&[("emp_001", "10")], &[("svc_missing", 1)]);
        match run(&req) {
            Err(EngineError::ServiceNotFound { service_id }) => assert_eq!(service_id, "svc_missing"),
            other => panic!("Expected ServiceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_inactive_service_is_not_selectable() {
        let req = request(&[("emp_001", "10")], &[("svc_retired", 1)]);
        assert!(matches!(run(&req), Err(EngineError::ServiceNotFound { .. })));
    }

    #[test]
    fn test_unknown_employee_is_rejected() {
        let req = request(&[("emp_ghost", "10")], &[]);
        match run(&req) {
            Err(EngineError::EmployeeNotFound { employee_id }) => assert_eq!(employee_id, "emp_ghost"),
            other => panic!("Expected EmployeeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_inactive_employee_cannot_be_staffed() {
        let req = request(&[("emp_old", "10")], &[]);
        assert!(matches!(run(&req), Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_duplicate_staffing_is_rejected() {
        let req = request(&[("emp_001", "10"), ("emp_001", "5")], &[]);
        match run(&req) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "staffing"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_hours_are_rejected() {
        let req = request(&[("emp_001", "-1")], &[]);
        match run(&req) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "hours"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_discount_over_100_is_rejected() {
        let mut req = request(&[("emp_001", "10")], &[]);
        req.discount_percent = dec("100.01");
        match run(&req) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "discount_percent"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_overhead_percent_is_rejected() {
        let mut req = request(&[("emp_001", "10")], &[]);
        req.overhead_percent = dec("-1");
        assert!(matches!(run(&req), Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let req = request(&[("emp_001", "10")], &[("svc_brand", 0)]);
        match run(&req) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "quantity"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_audit_trail_order() {
        let req = request(&[("emp_001", "30"), ("emp_002", "20")], &[("svc_brand", 1)]);
        let calc = run(&req).unwrap();
        let rule_ids: Vec<&str> = calc.audit_steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rule_ids,
            vec![
                "required_hours",
                "staff_labor_cost",
                "staff_labor_cost",
                "pricing",
                "staffing_validation"
            ]
        );
        let numbers: Vec<u32> = calc.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_overflowing_labor_cost_is_rejected() {
        let req = request(&[("emp_001", "1000000000000000000000000000")], &[]);
        match run(&req) {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "labor_cost");
                assert_eq!(message, "amount out of range");
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_markup_is_rejected() {
        let mut req = request(&[("emp_001", "100000000000000000000000")], &[]);
        req.overhead_percent = dec("1000000000");
        match run(&req) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "overhead_amount"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}

//! Employee cost calculation.
//!
//! This module layers one employee's costs from raw compensation inputs to
//! an hourly billing rate:
//!
//! 1. overhead share = total monthly overhead / active employee count
//! 2. monthly cost = base salary + compensation + insurance / 12
//!    + ticket / 12 + visa / 24 + base salary / 12 + asset depreciation / 12
//! 3. full monthly cost = monthly cost + overhead share
//! 4. yearly cost = full monthly cost x 12
//! 5. working days from the working calendar
//! 6. daily cost = yearly cost / working days
//! 7. hourly cost = daily cost / working hours per day
//!
//! Only base salary accrues the 13th month; compensation does not.
//!
//! Cost components are summed at full precision. The monthly cost and the
//! overhead share are then rounded to cents, and the full monthly and
//! yearly figures are built from those rounded values so the published
//! layers add up exactly. Daily and hourly costs divide the yearly cost
//! at full precision and are rounded on output.

use rust_decimal::Decimal;

use crate::config::CompanySettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{Asset, AuditStep, Employee, EmployeeCostBreakdown, Holiday, OverheadCost};

use super::asset_depreciation::resolve_asset_depreciation;
use super::overhead::aggregate_overhead;
use super::rounding::{checked_add, checked_div, checked_mul, checked_sum, round_money};
use super::working_calendar::calculate_working_days;

/// A consistent snapshot of everything an employee's cost depends on
/// besides the employee record itself.
///
/// `active_employee_count` is passed explicitly rather than derived here so
/// the caller controls which snapshot the overhead split is taken against.
#[derive(Debug, Clone, Copy)]
pub struct CostContext<'a> {
    /// Company working time settings.
    pub settings: &'a CompanySettings,
    /// All overhead costs; inactive ones are skipped.
    pub overhead_costs: &'a [OverheadCost],
    /// All assets; only those assigned to the employee count.
    pub assets: &'a [Asset],
    /// The holiday calendar; only holidays in `year` count.
    pub holidays: &'a [Holiday],
    /// Number of active employees sharing overhead.
    pub active_employee_count: usize,
    /// The calendar year for the working-day calendar.
    pub year: i32,
}

/// The result of an employee cost calculation, including audit steps.
#[derive(Debug, Clone)]
pub struct EmployeeCostResult {
    /// The layered cost breakdown.
    pub breakdown: EmployeeCostBreakdown,
    /// The audit steps recording each layer, in order.
    pub audit_steps: Vec<AuditStep>,
}

/// Computes an employee's cost breakdown.
///
/// This is [`calculate_employee_cost`] without the audit trail. Calling it
/// twice with the same inputs gives the same breakdown.
///
/// # Examples
///
/// ```
/// use agency_cost_engine::calculation::{CostContext, compute_employee_cost_breakdown};
/// use agency_cost_engine::config::CompanySettings;
/// use agency_cost_engine::models::{CostFrequency, Employee, OverheadCost};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Dana".to_string(),
///     base_salary: Decimal::new(12000, 0),
///     compensation: Decimal::ZERO,
///     insurance: Decimal::new(5000, 0),
///     ticket_value: Decimal::new(3500, 0),
///     visa_cost: Decimal::new(4000, 0),
///     vacation_days: 30,
///     active: true,
/// };
/// let overhead = vec![OverheadCost {
///     id: "rent".to_string(),
///     name: "Rent".to_string(),
///     amount: Decimal::new(46500, 0),
///     frequency: CostFrequency::Monthly,
///     active: true,
/// }];
/// let settings = CompanySettings::default();
/// let context = CostContext {
///     settings: &settings,
///     overhead_costs: &overhead,
///     assets: &[],
///     holidays: &[],
///     active_employee_count: 10,
///     year: 2026,
/// };
///
/// let breakdown = compute_employee_cost_breakdown(&employee, &context).unwrap();
/// assert_eq!(breakdown.overhead_share, Decimal::new(4650, 0));
/// assert_eq!(breakdown.working_days_per_year, 230);
/// ```
pub fn compute_employee_cost_breakdown(
    employee: &Employee,
    context: &CostContext<'_>,
) -> EngineResult<EmployeeCostBreakdown> {
    calculate_employee_cost(employee, context, 1).map(|result| result.breakdown)
}

/// Calculates an employee's layered cost breakdown with an audit trail.
///
/// # Arguments
///
/// * `employee` - The employee; must be active
/// * `context` - Settings, overhead, assets, holidays, active count and year
/// * `step_number` - The step number of the first audit step
///
/// # Errors
///
/// * [`EngineError::InvalidInput`] for invalid employee, settings, asset or
///   overhead data, an inactive employee, or an amount too large to
///   represent
/// * [`EngineError::DivisionByZero`] when there are no active employees or
///   the employee has no working days left in the year
pub fn calculate_employee_cost(
    employee: &Employee,
    context: &CostContext<'_>,
    step_number: u32,
) -> EngineResult<EmployeeCostResult> {
    employee.validate()?;
    if !employee.active {
        return Err(EngineError::InvalidInput {
            field: "active".to_string(),
            message: format!(
                "employee '{}' is inactive and carries no allocated cost",
                employee.id
            ),
        });
    }
    context.settings.validate()?;

    let mut step = step_number;
    let mut audit_steps = Vec::with_capacity(6);

    // Overhead share
    let overhead = aggregate_overhead(context.overhead_costs, step)?;
    audit_steps.push(overhead.audit_step);
    step += 1;

    if context.active_employee_count == 0 {
        return Err(EngineError::DivisionByZero {
            context: "no active employees to share overhead".to_string(),
        });
    }
    let total_monthly_overhead = overhead.total_monthly_overhead;
    let overhead_share =
        round_money(total_monthly_overhead / Decimal::from(context.active_employee_count));
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "overhead_share".to_string(),
        rule_name: "Overhead Share".to_string(),
        formula: "total_monthly_overhead / active_employee_count".to_string(),
        input: serde_json::json!({
            "total_monthly_overhead": total_monthly_overhead.normalize().to_string(),
            "active_employee_count": context.active_employee_count
        }),
        output: serde_json::json!({
            "overhead_share": overhead_share.to_string()
        }),
        reasoning: format!(
            "${} / {} active employees = ${}",
            total_monthly_overhead.normalize(),
            context.active_employee_count,
            overhead_share
        ),
    });
    step += 1;

    // Assets
    let depreciation = resolve_asset_depreciation(&employee.id, context.assets, step)?;
    audit_steps.push(depreciation.audit_step);
    step += 1;

    // Monthly cost
    let twelve = Decimal::from(12);
    let insurance_monthly = employee.insurance / twelve;
    let ticket_monthly = employee.ticket_value / twelve;
    let visa_monthly = employee.visa_cost / Decimal::from(24);
    let thirteenth_month_accrual = employee.base_salary / twelve;

    let monthly_cost = round_money(checked_sum(
        "monthly_cost",
        [
            employee.base_salary,
            employee.compensation,
            insurance_monthly,
            ticket_monthly,
            visa_monthly,
            thirteenth_month_accrual,
            depreciation.monthly,
        ],
    )?);
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "monthly_cost".to_string(),
        rule_name: "Monthly Cost".to_string(),
        formula: "base_salary + compensation + insurance/12 + ticket_value/12 + visa_cost/24 + base_salary/12 + asset_depreciation_monthly".to_string(),
        input: serde_json::json!({
            "base_salary": employee.base_salary.normalize().to_string(),
            "compensation": employee.compensation.normalize().to_string(),
            "insurance": employee.insurance.normalize().to_string(),
            "ticket_value": employee.ticket_value.normalize().to_string(),
            "visa_cost": employee.visa_cost.normalize().to_string(),
            "asset_depreciation_monthly": round_money(depreciation.monthly).to_string()
        }),
        output: serde_json::json!({
            "monthly_cost": monthly_cost.to_string()
        }),
        reasoning: format!(
            "${} + ${} + ${} + ${} + ${} + ${} (13th month) + ${} (assets) = ${}",
            employee.base_salary.normalize(),
            employee.compensation.normalize(),
            round_money(insurance_monthly),
            round_money(ticket_monthly),
            round_money(visa_monthly),
            round_money(thirteenth_month_accrual),
            round_money(depreciation.monthly),
            monthly_cost
        ),
    });
    step += 1;

    // Full monthly and yearly
    let full_monthly_cost = checked_add("full_monthly_cost", monthly_cost, overhead_share)?;
    let yearly_cost = checked_mul("yearly_cost", full_monthly_cost, twelve)?;
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "yearly_cost".to_string(),
        rule_name: "Full Monthly And Yearly Cost".to_string(),
        formula: "(monthly_cost + overhead_share) * 12".to_string(),
        input: serde_json::json!({
            "monthly_cost": monthly_cost.to_string(),
            "overhead_share": overhead_share.to_string()
        }),
        output: serde_json::json!({
            "full_monthly_cost": full_monthly_cost.to_string(),
            "yearly_cost": yearly_cost.to_string()
        }),
        reasoning: format!(
            "(${} + ${}) x 12 = ${}",
            monthly_cost, overhead_share, yearly_cost
        ),
    });
    step += 1;

    // Daily and hourly
    let working_days = calculate_working_days(
        employee.vacation_days,
        context.holidays,
        context.year,
        context.settings,
        step,
    );
    audit_steps.push(working_days.audit_step);
    step += 1;

    let working_days_per_year = working_days.working_days_per_year;
    if working_days_per_year <= 0 {
        return Err(EngineError::DivisionByZero {
            context: format!(
                "employee '{}' has {} working days in {}",
                employee.id, working_days_per_year, context.year
            ),
        });
    }

    let daily_exact = yearly_cost / Decimal::from(working_days_per_year);
    let hourly_exact = checked_div(
        "hourly_cost",
        daily_exact,
        context.settings.working_hours_per_day,
    )?;
    let daily_cost = round_money(daily_exact);
    let hourly_cost = round_money(hourly_exact);
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "daily_hourly_cost".to_string(),
        rule_name: "Daily And Hourly Cost".to_string(),
        formula: "yearly_cost / working_days_per_year / working_hours_per_day".to_string(),
        input: serde_json::json!({
            "yearly_cost": yearly_cost.to_string(),
            "working_days_per_year": working_days_per_year,
            "working_hours_per_day": context.settings.working_hours_per_day.normalize().to_string()
        }),
        output: serde_json::json!({
            "daily_cost": daily_cost.to_string(),
            "hourly_cost": hourly_cost.to_string()
        }),
        reasoning: format!(
            "${} / {} days = ${} per day; / {} hours = ${} per hour",
            yearly_cost,
            working_days_per_year,
            daily_cost,
            context.settings.working_hours_per_day.normalize(),
            hourly_cost
        ),
    });

    let breakdown = EmployeeCostBreakdown {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        year: context.year,
        base_salary: round_money(employee.base_salary),
        compensation: round_money(employee.compensation),
        insurance_monthly: round_money(insurance_monthly),
        ticket_monthly: round_money(ticket_monthly),
        visa_monthly: round_money(visa_monthly),
        thirteenth_month_accrual: round_money(thirteenth_month_accrual),
        asset_depreciation_yearly: round_money(depreciation.yearly),
        asset_depreciation_monthly: round_money(depreciation.monthly),
        total_monthly_overhead: round_money(total_monthly_overhead),
        active_employee_count: context.active_employee_count,
        overhead_share,
        monthly_cost,
        full_monthly_cost,
        yearly_cost,
        working_days_per_year,
        daily_cost,
        hourly_cost,
    };

    Ok(EmployeeCostResult {
        breakdown,
        audit_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CostFrequency;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn reference_employee() -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Dana Haddad".to_string(),
            base_salary: dec("12000"),
            compensation: dec("0"),
            insurance: dec("5000"),
            ticket_value: dec("3500"),
            visa_cost: dec("4000"),
            vacation_days: 30,
            active: true,
        }
    }

    fn reference_overhead() -> Vec<OverheadCost> {
        vec![
            OverheadCost {
                id: "rent".to_string(),
                name: "Office rent".to_string(),
                amount: dec("40000"),
                frequency: CostFrequency::Monthly,
                active: true,
            },
            OverheadCost {
                id: "licences".to_string(),
                name: "Software licences".to_string(),
                amount: dec("78000"),
                frequency: CostFrequency::Yearly,
                active: true,
            },
        ]
    }

    fn holidays(count: u32) -> Vec<Holiday> {
        (1..=count)
            .map(|day| Holiday::new(NaiveDate::from_ymd_opt(2026, 2, day).unwrap(), "Holiday"))
            .collect()
    }

    fn context<'a>(
        settings: &'a CompanySettings,
        overhead: &'a [OverheadCost],
        assets: &'a [Asset],
        holidays: &'a [Holiday],
        active_employee_count: usize,
    ) -> CostContext<'a> {
        CostContext {
            settings,
            overhead_costs: overhead,
            assets,
            holidays,
            active_employee_count,
            year: 2026,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let settings = CompanySettings::default();
        let overhead = reference_overhead();
        let holidays = holidays(13);
        let ctx = context(&settings, &overhead, &[], &holidays, 10);

        let breakdown = compute_employee_cost_breakdown(&reference_employee(), &ctx).unwrap();

        // Components are summed at full precision before rounding, so the
        // monthly cost is 13875.00 rather than the 13875.01 obtained by
        // rounding each component first. Daily and hourly follow from the
        // exact yearly figure: 222300 / 217 = 1024.42, / 8 = 128.05.
        assert_eq!(breakdown.insurance_monthly, dec("416.67"));
        assert_eq!(breakdown.ticket_monthly, dec("291.67"));
        assert_eq!(breakdown.visa_monthly, dec("166.67"));
        assert_eq!(breakdown.thirteenth_month_accrual, dec("1000"));
        assert_eq!(breakdown.total_monthly_overhead, dec("46500"));
        assert_eq!(breakdown.monthly_cost, dec("13875.00"));
        assert_eq!(breakdown.overhead_share, dec("4650"));
        assert_eq!(breakdown.full_monthly_cost, dec("18525.00"));
        assert_eq!(breakdown.yearly_cost, dec("222300.00"));
        assert_eq!(breakdown.working_days_per_year, 217);
        assert_eq!(breakdown.daily_cost, dec("1024.42"));
        assert_eq!(breakdown.hourly_cost, dec("128.05"));
    }

    #[test]
    fn test_audit_steps_are_sequenced() {
        let settings = CompanySettings::default();
        let overhead = reference_overhead();
        let ctx = context(&settings, &overhead, &[], &[], 10);

        let result = calculate_employee_cost(&reference_employee(), &ctx, 5).unwrap();
        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![5, 6, 7, 8, 9, 10, 11]);

        let rule_ids: Vec<&str> = result.audit_steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rule_ids,
            vec![
                "overhead_aggregation",
                "overhead_share",
                "asset_depreciation",
                "monthly_cost",
                "yearly_cost",
                "working_days",
                "daily_hourly_cost"
            ]
        );
    }

    #[test]
    fn test_compensation_has_no_thirteenth_month() {
        let settings = CompanySettings::default();
        let ctx = context(&settings, &[], &[], &[], 1);

        let mut employee = reference_employee();
        employee.insurance = Decimal::ZERO;
        employee.ticket_value = Decimal::ZERO;
        employee.visa_cost = Decimal::ZERO;
        employee.base_salary = dec("12000");
        employee.compensation = dec("1200");

        let breakdown = compute_employee_cost_breakdown(&employee, &ctx).unwrap();
        // 12000 + 1200 + 12000 / 12; the 1200 earns no accrual
        assert_eq!(breakdown.monthly_cost, dec("14200"));
        assert_eq!(breakdown.thirteenth_month_accrual, dec("1000"));
    }

    #[test]
    fn test_assigned_assets_raise_monthly_cost() {
        let settings = CompanySettings::default();
        let assets = vec![
            Asset::new("laptop", "Laptop", dec("7200"), 3)
                .unwrap()
                .assigned(Some("emp_001".to_string())),
            Asset::new("car", "Car", dec("90000"), 5)
                .unwrap()
                .assigned(Some("emp_999".to_string())),
        ];
        let ctx = context(&settings, &[], &assets, &[], 1);

        let breakdown = compute_employee_cost_breakdown(&reference_employee(), &ctx).unwrap();
        assert_eq!(breakdown.asset_depreciation_yearly, dec("2400"));
        assert_eq!(breakdown.asset_depreciation_monthly, dec("200"));
        assert_eq!(breakdown.monthly_cost, dec("14075.00"));
    }

    #[test]
    fn test_zero_active_employees_is_division_by_zero() {
        let settings = CompanySettings::default();
        let overhead = reference_overhead();
        let ctx = context(&settings, &overhead, &[], &[], 0);

        match compute_employee_cost_breakdown(&reference_employee(), &ctx) {
            Err(EngineError::DivisionByZero { context }) => {
                assert!(context.contains("no active employees"))
            }
            other => panic!("Expected DivisionByZero, got {:?}", other),
        }
    }

    #[test]
    fn test_no_working_days_is_division_by_zero() {
        let settings = CompanySettings {
            working_days_per_week: 1,
            ..CompanySettings::default()
        };
        let mut employee = reference_employee();
        employee.vacation_days = 52;
        let ctx = context(&settings, &[], &[], &[], 1);

        match compute_employee_cost_breakdown(&employee, &ctx) {
            Err(EngineError::DivisionByZero { context }) => {
                assert!(context.contains("0 working days"))
            }
            other => panic!("Expected DivisionByZero, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_working_days_is_division_by_zero() {
        let settings = CompanySettings {
            working_days_per_week: 1,
            ..CompanySettings::default()
        };
        let mut employee = reference_employee();
        employee.vacation_days = 60;
        let ctx = context(&settings, &[], &[], &[], 1);

        assert!(matches!(
            compute_employee_cost_breakdown(&employee, &ctx),
            Err(EngineError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_inactive_employee_is_rejected() {
        let settings = CompanySettings::default();
        let ctx = context(&settings, &[], &[], &[], 1);
        let mut employee = reference_employee();
        employee.active = false;

        match compute_employee_cost_breakdown(&employee, &ctx) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "active"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_employee_is_rejected_before_calculation() {
        let settings = CompanySettings::default();
        let ctx = context(&settings, &[], &[], &[], 0);
        let mut employee = reference_employee();
        employee.insurance = dec("-10");

        // Input validation wins over the zero-divisor check
        assert!(matches!(
            compute_employee_cost_breakdown(&employee, &ctx),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_overhead_share_changes_with_active_count() {
        let settings = CompanySettings::default();
        let overhead = reference_overhead();

        let ten = compute_employee_cost_breakdown(
            &reference_employee(),
            &context(&settings, &overhead, &[], &[], 10),
        )
        .unwrap();
        let twelve = compute_employee_cost_breakdown(
            &reference_employee(),
            &context(&settings, &overhead, &[], &[], 12),
        )
        .unwrap();

        assert_eq!(ten.overhead_share, dec("4650"));
        assert_eq!(twelve.overhead_share, dec("3875"));
        assert_eq!(ten.monthly_cost, twelve.monthly_cost);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let settings = CompanySettings::default();
        let overhead = reference_overhead();
        let holidays = holidays(5);
        let ctx = context(&settings, &overhead, &[], &holidays, 7);

        let first = calculate_employee_cost(&reference_employee(), &ctx, 1).unwrap();
        let second = calculate_employee_cost(&reference_employee(), &ctx, 1).unwrap();
        assert_eq!(first.breakdown, second.breakdown);
        assert_eq!(first.audit_steps, second.audit_steps);
    }

    #[test]
    fn test_layers_are_consistent() {
        let settings = CompanySettings::default();
        let overhead = reference_overhead();
        let ctx = context(&settings, &overhead, &[], &[], 3);

        let b = compute_employee_cost_breakdown(&reference_employee(), &ctx).unwrap();
        assert_eq!(b.full_monthly_cost - b.monthly_cost, b.overhead_share);
        assert_eq!(b.yearly_cost, b.full_monthly_cost * Decimal::from(12));
        // Each rounded hour may be off by a cent
        let tolerance = dec("0.01") * settings.working_hours_per_day;
        assert!((b.hourly_cost * settings.working_hours_per_day - b.daily_cost).abs() <= tolerance);
    }

    #[test]
    fn test_overflowing_yearly_cost_is_rejected() {
        let settings = CompanySettings::default();
        let ctx = context(&settings, &[], &[], &[], 1);
        let mut employee = reference_employee();
        employee.base_salary = dec("10000000000000000000000000000");
        employee.insurance = Decimal::ZERO;
        employee.ticket_value = Decimal::ZERO;
        employee.visa_cost = Decimal::ZERO;

        match compute_employee_cost_breakdown(&employee, &ctx) {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "yearly_cost");
                assert_eq!(message, "amount out of range");
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_monthly_sum_is_rejected() {
        let settings = CompanySettings::default();
        let ctx = context(&settings, &[], &[], &[], 1);
        let mut employee = reference_employee();
        employee.base_salary = dec("70000000000000000000000000000");
        employee.compensation = dec("70000000000000000000000000000");

        match compute_employee_cost_breakdown(&employee, &ctx) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "monthly_cost"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}

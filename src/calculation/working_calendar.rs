//! Working-calendar calculation.
//!
//! Derives the number of days an employee is available to bill in a year.
//! Every holiday is assumed to fall on an otherwise working day: holidays on
//! weekends are not netted out.

use crate::config::CompanySettings;
use crate::models::{AuditStep, Holiday, holidays_in_year};

/// Weeks counted in a working year.
pub const WEEKS_PER_YEAR: i64 = 52;

/// The result of a working-days calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct WorkingDaysResult {
    /// Effective working days. May be zero or negative when vacation and
    /// holidays exceed the working weeks; callers dividing by it must check.
    pub working_days_per_year: i64,
    /// Holidays counted against the year.
    pub holiday_count: usize,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates effective working days in `year` for an employee.
///
/// `working_days_per_week * 52 - vacation_days - holidays in year`
///
/// # Arguments
///
/// * `vacation_days` - The employee's annual vacation allotment
/// * `holidays` - The holiday calendar (any years; filtered to `year`)
/// * `year` - The calendar year
/// * `settings` - Company settings providing working days per week
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use agency_cost_engine::calculation::calculate_working_days;
/// use agency_cost_engine::config::CompanySettings;
///
/// let result = calculate_working_days(30, &[], 2026, &CompanySettings::default(), 1);
/// assert_eq!(result.working_days_per_year, 230);
/// ```
pub fn calculate_working_days(
    vacation_days: u32,
    holidays: &[Holiday],
    year: i32,
    settings: &CompanySettings,
    step_number: u32,
) -> WorkingDaysResult {
    let holiday_count = holidays_in_year(holidays, year).count();
    let gross_days = i64::from(settings.working_days_per_week) * WEEKS_PER_YEAR;
    let working_days_per_year = gross_days - i64::from(vacation_days) - holiday_count as i64;

    let audit_step = AuditStep {
        step_number,
        rule_id: "working_days".to_string(),
        rule_name: "Working Days Per Year".to_string(),
        formula: "working_days_per_week * 52 - vacation_days - holidays".to_string(),
        input: serde_json::json!({
            "working_days_per_week": settings.working_days_per_week,
            "vacation_days": vacation_days,
            "year": year,
            "holiday_count": holiday_count
        }),
        output: serde_json::json!({
            "working_days_per_year": working_days_per_year
        }),
        reasoning: format!(
            "{} x {} - {} vacation - {} holidays = {} working days in {}",
            settings.working_days_per_week,
            WEEKS_PER_YEAR,
            vacation_days,
            holiday_count,
            working_days_per_year,
            year
        ),
    };

    WorkingDaysResult {
        working_days_per_year,
        holiday_count,
        audit_step,
    }
}

//! Month-by-month repayment schedule for a priced loan

use super::amortization::{emi, monthly_rate};
use crate::error::PricingError;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Longest schedule that will be materialised row by row (100 years)
pub const MAX_SCHEDULE_MONTHS: u32 = 1_200;

/// A single installment of the schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentRow {
    /// 1-based installment number
    pub installment: u32,

    /// Due date, when the disbursement date is known
    pub due_date: Option<NaiveDate>,

    pub opening_balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub closing_balance: f64,
}

/// Full repayment schedule at the unrounded EMI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentSchedule {
    pub principal: f64,
    pub annual_rate_pct: f64,
    pub rows: Vec<InstallmentRow>,
}

impl RepaymentSchedule {
    /// Build the schedule; the first installment falls one month after `disbursed_on`
    pub fn build(
        principal: f64,
        annual_rate_pct: f64,
        tenure_months: u32,
        disbursed_on: Option<NaiveDate>,
    ) -> Result<Self, PricingError> {
        if tenure_months > MAX_SCHEDULE_MONTHS {
            return Err(PricingError::invalid_argument(
                "tenure_months",
                format!("schedules are limited to {} months, got {}", MAX_SCHEDULE_MONTHS, tenure_months),
            ));
        }
        let payment = emi(principal, annual_rate_pct, tenure_months)?;
        let r = monthly_rate(annual_rate_pct);

        let mut rows = Vec::with_capacity(tenure_months as usize);
        let mut balance = principal;

        for installment in 1..=tenure_months {
            let interest = balance * r;
            // Last installment clears the floating-point residue
            let principal_paid = if installment == tenure_months {
                balance
            } else {
                payment - interest
            };
            let closing = balance - principal_paid;

            rows.push(InstallmentRow {
                installment,
                due_date: disbursed_on.and_then(|d| d.checked_add_months(Months::new(installment))),
                opening_balance: balance,
                payment: interest + principal_paid,
                interest,
                principal: principal_paid,
                closing_balance: closing,
            });

            balance = closing;
        }

        Ok(Self { principal, annual_rate_pct, rows })
    }

    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }

    pub fn total_paid(&self) -> f64 {
        self.rows.iter().map(|r| r.payment).sum()
    }

    /// First installment due after `date`
    pub fn next_due(&self, date: NaiveDate) -> Option<&InstallmentRow> {
        self.rows
            .iter()
            .find(|r| r.due_date.is_some_and(|due| due > date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_three_month_schedule() {
        let schedule = RepaymentSchedule::build(50_000.0, 18.0, 3, None).unwrap();
        assert_eq!(schedule.rows.len(), 3);

        let first = &schedule.rows[0];
        assert_abs_diff_eq!(first.interest, 750.0, epsilon = 1e-9);
        assert_abs_diff_eq!(first.principal, 16_419.148, epsilon = 1e-3);
        assert_abs_diff_eq!(first.closing_balance, 33_580.852, epsilon = 1e-3);

        let last = schedule.rows.last().unwrap();
        assert_eq!(last.closing_balance, 0.0);
        assert_abs_diff_eq!(last.payment, 17_169.148, epsilon = 1e-3);
    }

    #[test]
    fn test_totals_match_amortization() {
        let schedule = RepaymentSchedule::build(50_000.0, 18.0, 12, None).unwrap();
        assert_abs_diff_eq!(schedule.total_paid(), 55_008.0, epsilon = 0.5);
        assert_abs_diff_eq!(schedule.total_interest(), schedule.total_paid() - 50_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_due_dates_step_monthly() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let schedule = RepaymentSchedule::build(12_000.0, 12.0, 3, Some(start)).unwrap();

        let dues: Vec<_> = schedule.rows.iter().map(|r| r.due_date.unwrap()).collect();
        assert_eq!(dues[0], NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(dues[1], NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());
        assert_eq!(dues[2], NaiveDate::from_ymd_opt(2026, 4, 30).unwrap());

        let next = schedule.next_due(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()).unwrap();
        assert_eq!(next.installment, 2);
    }

    #[test]
    fn test_zero_tenure_rejected() {
        assert!(RepaymentSchedule::build(50_000.0, 18.0, 0, None).is_err());
    }

    #[test]
    fn test_oversized_tenure_rejected_before_allocating() {
        let err = RepaymentSchedule::build(50_000.0, 18.0, 4_000_000_000, None).unwrap_err();
        assert!(matches!(err, PricingError::InvalidArgument { param: "tenure_months", .. }));

        let longest = RepaymentSchedule::build(50_000.0, 18.0, MAX_SCHEDULE_MONTHS, None).unwrap();
        assert_eq!(longest.rows.len(), MAX_SCHEDULE_MONTHS as usize);
        assert_eq!(longest.rows.last().unwrap().closing_balance, 0.0);
    }
}

use chrono::{DateTime, Datelike, Duration, Utc};

use crate::decimal::{Money, Rate};
use crate::errors::{DeskError, Result};
use crate::financing::calculator;

/// one row of an amortization schedule
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub payment_date: DateTime<Utc>,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// month-by-month breakdown of an equal-installment loan
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    pub loan_amount: Money,
    pub interest_rate: Rate,
    pub term_months: u32,
    pub first_payment_date: DateTime<Utc>,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// generate the payment breakdown for a financed amount
    pub fn generate(
        loan_amount: Money,
        annual_rate: Rate,
        term_months: u32,
        first_payment_date: DateTime<Utc>,
    ) -> Result<Self> {
        if loan_amount.is_negative() {
            return Err(DeskError::InvalidInput {
                field: "loanAmount",
                amount: loan_amount,
            });
        }

        // the installment the customer is actually charged each month
        let installment = calculator::calculate(loan_amount, Money::ZERO, annual_rate, term_months)?
            .monthly_payment;
        let monthly_rate = annual_rate.monthly().as_decimal();

        let mut payments = Vec::with_capacity(term_months as usize);
        let mut balance = loan_amount;
        let mut cumulative_interest = Money::ZERO;
        let mut cumulative_principal = Money::ZERO;

        for i in 1..=term_months {
            let payment_date = add_months(first_payment_date, i - 1);
            let interest_portion = Money::from_decimal(balance.as_decimal() * monthly_rate);

            // cent rounding on the installment drifts the balance a few cents
            // either way; the final payment settles whatever remains exactly
            let principal_portion = if i == term_months {
                balance
            } else {
                (installment - interest_portion).min(balance)
            };
            let payment_amount = principal_portion + interest_portion;

            cumulative_interest += interest_portion;
            cumulative_principal += principal_portion;

            let ending_balance = balance - principal_portion;

            payments.push(ScheduledPayment {
                payment_number: i,
                payment_date,
                beginning_balance: balance,
                payment_amount,
                principal_portion,
                interest_portion,
                ending_balance,
                cumulative_interest,
                cumulative_principal,
            });

            balance = ending_balance;
        }

        let total_interest = payments
            .iter()
            .map(|p| p.interest_portion)
            .fold(Money::ZERO, |acc, x| acc + x);

        let total_payment = payments
            .iter()
            .map(|p| p.payment_amount)
            .fold(Money::ZERO, |acc, x| acc + x);

        Ok(Self {
            loan_amount,
            interest_rate: annual_rate,
            term_months,
            first_payment_date,
            payments,
            total_interest,
            total_payment,
        })
    }

    /// get the row for a specific installment, 1-based
    pub fn payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        self.payments.get(payment_number.checked_sub(1)? as usize)
    }

    /// remaining balance after a given installment
    pub fn balance_after(&self, payment_number: u32) -> Money {
        self.payment(payment_number)
            .map(|p| p.ending_balance)
            .unwrap_or(self.loan_amount)
    }
}

/// step forward by calendar months
fn add_months(date: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    let mut result = date;
    for _ in 0..months {
        let days = days_in_month(result.year(), result.month());
        result = result + Duration::days(days as i64);
    }
    result
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{DeskError, Result};

/// financing calculation input, field names matching the desk wire shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingRequest {
    /// net price to finance, before the down payment is subtracted
    pub principal: Money,
    pub down_payment: Money,
    /// annual percentage rate (4.9 means 4.9% per year)
    pub annual_interest_rate_percent: Decimal,
    pub term_months: u32,
}

impl FinancingRequest {
    pub fn calculate(&self) -> Result<FinancingResult> {
        calculate(
            self.principal,
            self.down_payment,
            Rate::from_percent(self.annual_interest_rate_percent),
            self.term_months,
        )
    }
}

/// financing calculation output, all figures rounded to whole cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingResult {
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
}

/// compute amortized-loan figures for a fixed-rate, fixed-term loan
///
/// total interest is measured against the net price, not the financed amount:
/// the down payment counts as already paid
pub fn calculate(
    principal: Money,
    down_payment: Money,
    annual_rate: Rate,
    term_months: u32,
) -> Result<FinancingResult> {
    if principal.is_negative() {
        return Err(DeskError::InvalidInput {
            field: "principal",
            amount: principal,
        });
    }
    if down_payment.is_negative() {
        return Err(DeskError::InvalidInput {
            field: "downPayment",
            amount: down_payment,
        });
    }
    if annual_rate.is_negative() {
        return Err(DeskError::InvalidRate { rate: annual_rate });
    }
    if term_months == 0 {
        return Err(DeskError::InvalidTerm { months: 0 });
    }

    let loan_amount = (principal - down_payment).max(Money::ZERO);

    // nothing financed, nothing amortized
    if loan_amount.is_zero() {
        return Ok(FinancingResult {
            loan_amount: Money::ZERO,
            monthly_payment: Money::ZERO,
            total_interest: Money::ZERO,
            total_payment: down_payment.round_cents(),
        });
    }

    let monthly_rate = annual_rate.monthly().as_decimal();
    let term = Decimal::from(term_months);

    // intermediates stay in raw decimal until the final cent rounding
    let monthly_raw = if monthly_rate.is_zero() {
        // straight-line division; the compound formula is 0/0 at rate zero
        loan_amount.as_decimal() / term
    } else {
        // EMI = L * r * (1 + r)^n / ((1 + r)^n - 1)
        let compound = compound_factor(monthly_rate, term_months)?;
        let numerator = loan_amount
            .as_decimal()
            .checked_mul(monthly_rate)
            .and_then(|x| x.checked_mul(compound))
            .ok_or(DeskError::NumericOverflow {
                context: "monthly payment",
            })?;
        numerator / (compound - Decimal::ONE)
    };

    let total_raw = monthly_raw
        .checked_mul(term)
        .and_then(|x| x.checked_add(down_payment.as_decimal()))
        .ok_or(DeskError::NumericOverflow {
            context: "total payment",
        })?;
    let interest_raw = total_raw - principal.as_decimal();

    Ok(FinancingResult {
        loan_amount: loan_amount.round_cents(),
        monthly_payment: to_cents(monthly_raw),
        total_interest: to_cents(interest_raw),
        total_payment: to_cents(total_raw),
    })
}

/// round a raw intermediate straight to whole cents, half away from zero
fn to_cents(d: Decimal) -> Money {
    Money::from_decimal(d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// (1 + r)^n by checked iterative multiplication
fn compound_factor(monthly_rate: Decimal, term_months: u32) -> Result<Decimal> {
    let base = Decimal::ONE + monthly_rate;
    let mut compound = Decimal::ONE;
    for _ in 0..term_months {
        compound = compound
            .checked_mul(base)
            .ok_or(DeskError::NumericOverflow {
                context: "compound factor",
            })?;
    }
    Ok(compound)
}

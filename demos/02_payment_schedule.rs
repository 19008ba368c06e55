/// amortization breakdown for a financed amount
use deal_desk_rs::chrono::{TimeZone, Utc};
use deal_desk_rs::{AmortizationSchedule, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let first_payment = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();

    let schedule = AmortizationSchedule::generate(
        Money::from_major(22_000),
        Rate::from_percent(dec!(4.9)),
        60,
        first_payment,
    )?;

    println!(
        "{:>3}  {:>12}  {:>10}  {:>10}  {:>12}",
        "#", "payment", "interest", "principal", "balance"
    );
    for row in &schedule.payments {
        println!(
            "{:>3}  {:>12}  {:>10}  {:>10}  {:>12}",
            row.payment_number,
            row.payment_amount.round_cents().to_string(),
            row.interest_portion.round_cents().to_string(),
            row.principal_portion.round_cents().to_string(),
            row.ending_balance.round_cents().to_string(),
        );
    }

    println!();
    println!("total interest: {}", schedule.total_interest.round_cents());
    println!("total payment:  {}", schedule.total_payment.round_cents());

    Ok(())
}

/// quick start - compute financing for a deal worksheet
use deal_desk_rs::{calculate, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // $25,000 sale with $3,000 down at 4.9% over 60 months
    let result = calculate(
        Money::from_major(25_000),
        Money::from_major(3_000),
        Rate::from_percent(dec!(4.9)),
        60,
    )?;

    println!("loan amount:     {}", result.loan_amount);
    println!("monthly payment: {}", result.monthly_payment);
    println!("total interest:  {}", result.total_interest);
    println!("total payment:   {}", result.total_payment);

    Ok(())
}

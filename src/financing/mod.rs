pub mod calculator;
pub mod schedule;

pub use calculator::{calculate, FinancingRequest, FinancingResult};
pub use schedule::{AmortizationSchedule, ScheduledPayment};

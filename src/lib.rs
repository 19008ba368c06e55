pub mod config;
pub mod decimal;
pub mod desk;
pub mod errors;
pub mod events;
pub mod financing;
pub mod reports;
pub mod store;
pub mod types;

// re-export key types
pub use config::DeskConfig;
pub use decimal::{Money, Rate};
pub use desk::{DealDesk, NewDeal};
pub use errors::{DeskError, Result};
pub use events::{DeskEvent, EventStore};
pub use financing::{calculate, AmortizationSchedule, FinancingRequest, FinancingResult};
pub use reports::{aging_buckets, leads_by_source, top_deals_by_margin, AgingBuckets, DashboardStats};
pub use store::{MemoryStore, RecordStore};
pub use types::{
    Deal, DealDocument, DealStatus, FinancingTerms, Lead, LeadStatus, Record, RecordId,
    Vehicle, VehicleStatus,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;

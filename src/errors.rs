use thiserror::Error;
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::types::{DealStatus, RecordId};

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("invalid input: {field} must not be negative, got {amount}")]
    InvalidInput {
        field: &'static str,
        amount: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidRate {
        rate: Rate,
    },

    #[error("invalid term: {months} months")]
    InvalidTerm {
        months: u32,
    },

    #[error("numeric overflow: {context}")]
    NumericOverflow {
        context: &'static str,
    },

    #[error("{entity} not found: {id}")]
    RecordNotFound {
        entity: &'static str,
        id: RecordId,
    },

    #[error("document not found: {id}")]
    DocumentNotFound {
        id: Uuid,
    },

    #[error("invalid status transition: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        from: DealStatus,
        to: DealStatus,
    },

    #[error("vehicle not available for sale: {id}")]
    VehicleNotAvailable {
        id: RecordId,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl DeskError {
    /// stable error code for callers that surface validation messages
    pub fn code(&self) -> &'static str {
        match self {
            DeskError::InvalidInput { .. } => "InvalidInputError",
            DeskError::InvalidRate { .. } => "InvalidInputError",
            DeskError::InvalidTerm { .. } => "InvalidTermError",
            DeskError::NumericOverflow { .. } => "NumericOverflowError",
            DeskError::RecordNotFound { .. } => "RecordNotFoundError",
            DeskError::DocumentNotFound { .. } => "RecordNotFoundError",
            DeskError::InvalidStatusTransition { .. } => "InvalidStatusError",
            DeskError::VehicleNotAvailable { .. } => "InvalidStatusError",
            DeskError::InvalidConfiguration { .. } => "InvalidConfigurationError",
        }
    }
}

pub type Result<T> = std::result::Result<T, DeskError>;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{DealStatus, RecordId};

/// all events emitted by desk operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeskEvent {
    DealCreated {
        deal_id: RecordId,
        vehicle_id: RecordId,
        customer_id: RecordId,
        loan_amount: Money,
        timestamp: DateTime<Utc>,
    },
    DealStatusChanged {
        deal_id: RecordId,
        old_status: DealStatus,
        new_status: DealStatus,
        timestamp: DateTime<Utc>,
    },
    VehicleSold {
        vehicle_id: RecordId,
        deal_id: RecordId,
        sale_price: Money,
        timestamp: DateTime<Utc>,
    },
    DocumentAttached {
        deal_id: RecordId,
        document_id: Uuid,
        name: String,
        timestamp: DateTime<Utc>,
    },
    DocumentRemoved {
        deal_id: RecordId,
        document_id: Uuid,
        timestamp: DateTime<Utc>,
    },
}

/// event collector for desk operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<DeskEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: DeskEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<DeskEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[DeskEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};

/// sequential record identifier assigned by a store
pub type RecordId = i64;

/// a record that can be persisted in a [`crate::store::RecordStore`]
pub trait Record {
    fn id(&self) -> RecordId;
    fn assign_id(&mut self, id: RecordId);
}

/// vehicle inventory status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    /// on the lot, can be desked
    Available,
    /// reserved by an open deal
    Pending,
    /// delivered to a customer
    Sold,
}

/// lead temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    Hot,
    Warm,
    Cold,
}

/// deal lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealStatus {
    /// created, ready for customer presentation
    Draft,
    /// terms under discussion
    Negotiating,
    /// paperwork and financing underway
    InProgress,
    /// funded and delivered
    Completed,
}

/// inventory vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: RecordId,
    pub vin: String,
    pub year: u16,
    pub make: String,
    pub model: String,
    pub mileage: u32,
    pub purchase_price: Money,
    pub asking_price: Money,
    pub status: VehicleStatus,
    pub days_in_inventory: u32,
}

impl Record for Vehicle {
    fn id(&self) -> RecordId {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// sales lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: RecordId,
    pub customer_name: String,
    pub phone: String,
    pub email: String,
    pub source: String,
    pub status: LeadStatus,
    pub lead_score: u32,
    pub budget: Option<Money>,
}

impl Record for Lead {
    fn id(&self) -> RecordId {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// financing terms persisted with a deal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingTerms {
    /// net price financed, before down payment
    pub amount: Money,
    pub down_payment: Money,
    pub loan_amount: Money,
    pub interest_rate: Rate,
    pub term_months: u32,
    pub monthly_payment: Money,
}

/// document attached to a deal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealDocument {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub uploaded_at: DateTime<Utc>,
}

/// deal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: RecordId,
    pub vehicle_id: RecordId,
    pub customer_id: RecordId,
    pub customer_name: String,
    pub sale_price: Money,
    pub trade_in_value: Money,
    /// sale price less trade-in
    pub net_price: Money,
    /// sale price less the vehicle's purchase price
    pub margin: Money,
    pub status: DealStatus,
    pub deal_date: DateTime<Utc>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub salesperson: String,
    pub finance_manager: String,
    pub financing: Option<FinancingTerms>,
    pub documents: Vec<DealDocument>,
}

impl Record for Deal {
    fn id(&self) -> RecordId {
        self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Deal {
    /// pretty-printed JSON snapshot
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

use hourglass_rs::SafeTimeProvider;
use uuid::Uuid;

use crate::config::DeskConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{DeskError, Result};
use crate::events::{DeskEvent, EventStore};
use crate::financing::{calculate, FinancingResult};
use crate::store::RecordStore;
use crate::types::{
    Deal, DealDocument, DealStatus, FinancingTerms, Lead, RecordId, Vehicle, VehicleStatus,
};

/// worksheet input for a new deal
#[derive(Debug, Clone)]
pub struct NewDeal {
    pub vehicle_id: RecordId,
    pub customer_id: RecordId,
    pub sale_price: Money,
    pub trade_in_value: Money,
    pub down_payment: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
}

impl NewDeal {
    /// start a worksheet with the desk's configured rate and term
    pub fn with_defaults(
        config: &DeskConfig,
        vehicle_id: RecordId,
        customer_id: RecordId,
        sale_price: Money,
    ) -> Self {
        Self {
            vehicle_id,
            customer_id,
            sale_price,
            trade_in_value: Money::ZERO,
            down_payment: Money::ZERO,
            annual_rate: config.default_rate,
            term_months: config.default_term_months,
        }
    }
}

/// deal-desk workflow over injected record stores
///
/// the financing preview and the persisted deal both go through
/// [`crate::financing::calculate`], so the worksheet figures and the stored
/// terms can never diverge
pub struct DealDesk<D, V, L>
where
    D: RecordStore<Deal>,
    V: RecordStore<Vehicle>,
    L: RecordStore<Lead>,
{
    deals: D,
    vehicles: V,
    leads: L,
    config: DeskConfig,
    events: EventStore,
}

impl<D, V, L> DealDesk<D, V, L>
where
    D: RecordStore<Deal>,
    V: RecordStore<Vehicle>,
    L: RecordStore<Lead>,
{
    pub fn new(deals: D, vehicles: V, leads: L, config: DeskConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            deals,
            vehicles,
            leads,
            config,
            events: EventStore::new(),
        })
    }

    /// financing figures for the worksheet, without persisting anything
    pub fn preview_financing(
        &self,
        sale_price: Money,
        trade_in_value: Money,
        down_payment: Money,
        annual_rate: Rate,
        term_months: u32,
    ) -> Result<FinancingResult> {
        let net_price = sale_price - trade_in_value;
        calculate(net_price, down_payment, annual_rate, term_months)
    }

    /// persist a new draft deal with computed financing terms
    ///
    /// the vehicle must be available; it moves to pending while the deal is open
    pub fn create_deal(&mut self, new_deal: NewDeal, time: &SafeTimeProvider) -> Result<Deal> {
        let mut vehicle = self.vehicles.get(new_deal.vehicle_id)?;
        let lead = self.leads.get(new_deal.customer_id)?;

        if vehicle.status != VehicleStatus::Available {
            return Err(DeskError::VehicleNotAvailable { id: vehicle.id });
        }

        let net_price = new_deal.sale_price - new_deal.trade_in_value;
        let financing = calculate(
            net_price,
            new_deal.down_payment,
            new_deal.annual_rate,
            new_deal.term_months,
        )?;
        let margin = new_deal.sale_price - vehicle.purchase_price;

        let deal = self.deals.create(Deal {
            id: 0,
            vehicle_id: vehicle.id,
            customer_id: lead.id,
            customer_name: lead.customer_name.clone(),
            sale_price: new_deal.sale_price,
            trade_in_value: new_deal.trade_in_value,
            net_price,
            margin,
            status: DealStatus::Draft,
            deal_date: time.now(),
            delivery_date: None,
            salesperson: self.config.salesperson.clone(),
            finance_manager: self.config.finance_manager.clone(),
            financing: Some(FinancingTerms {
                amount: net_price,
                down_payment: new_deal.down_payment,
                loan_amount: financing.loan_amount,
                interest_rate: new_deal.annual_rate,
                term_months: new_deal.term_months,
                monthly_payment: financing.monthly_payment,
            }),
            documents: Vec::new(),
        })?;

        vehicle.status = VehicleStatus::Pending;
        self.vehicles.update(vehicle)?;

        self.events.emit(DeskEvent::DealCreated {
            deal_id: deal.id,
            vehicle_id: deal.vehicle_id,
            customer_id: deal.customer_id,
            loan_amount: financing.loan_amount,
            timestamp: time.now(),
        });

        Ok(deal)
    }

    /// move a deal forward through its lifecycle
    ///
    /// completing a deal stamps the delivery date and marks the vehicle sold
    pub fn advance_status(
        &mut self,
        deal_id: RecordId,
        new_status: DealStatus,
        time: &SafeTimeProvider,
    ) -> Result<Deal> {
        let mut deal = self.deals.get(deal_id)?;
        let old_status = deal.status;

        if status_rank(new_status) <= status_rank(old_status) {
            return Err(DeskError::InvalidStatusTransition {
                from: old_status,
                to: new_status,
            });
        }

        deal.status = new_status;

        if new_status == DealStatus::Completed {
            deal.delivery_date = Some(time.now());

            let mut vehicle = self.vehicles.get(deal.vehicle_id)?;
            vehicle.status = VehicleStatus::Sold;
            self.vehicles.update(vehicle)?;

            self.events.emit(DeskEvent::VehicleSold {
                vehicle_id: deal.vehicle_id,
                deal_id: deal.id,
                sale_price: deal.sale_price,
                timestamp: time.now(),
            });
        }

        let deal = self.deals.update(deal)?;

        self.events.emit(DeskEvent::DealStatusChanged {
            deal_id,
            old_status,
            new_status,
            timestamp: time.now(),
        });

        Ok(deal)
    }

    /// attach a document to a deal
    pub fn attach_document(
        &mut self,
        deal_id: RecordId,
        name: &str,
        kind: &str,
        time: &SafeTimeProvider,
    ) -> Result<DealDocument> {
        let mut deal = self.deals.get(deal_id)?;

        let document = DealDocument {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind: kind.to_string(),
            uploaded_at: time.now(),
        };
        deal.documents.push(document.clone());
        self.deals.update(deal)?;

        self.events.emit(DeskEvent::DocumentAttached {
            deal_id,
            document_id: document.id,
            name: document.name.clone(),
            timestamp: document.uploaded_at,
        });

        Ok(document)
    }

    /// remove a document from a deal, returning it
    pub fn remove_document(
        &mut self,
        deal_id: RecordId,
        document_id: Uuid,
        time: &SafeTimeProvider,
    ) -> Result<DealDocument> {
        let mut deal = self.deals.get(deal_id)?;

        let position = deal
            .documents
            .iter()
            .position(|d| d.id == document_id)
            .ok_or(DeskError::DocumentNotFound { id: document_id })?;
        let removed = deal.documents.remove(position);
        self.deals.update(deal)?;

        self.events.emit(DeskEvent::DocumentRemoved {
            deal_id,
            document_id,
            timestamp: time.now(),
        });

        Ok(removed)
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    pub fn deals(&self) -> &D {
        &self.deals
    }

    pub fn vehicles(&self) -> &V {
        &self.vehicles
    }

    pub fn leads(&self) -> &L {
        &self.leads
    }

    pub fn events(&self) -> &[DeskEvent] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<DeskEvent> {
        self.events.take_events()
    }
}

fn status_rank(status: DealStatus) -> u8 {
    match status {
        DealStatus::Draft => 0,
        DealStatus::Negotiating => 1,
        DealStatus::InProgress => 2,
        DealStatus::Completed => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::LeadStatus;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn sample_vehicle() -> Vehicle {
        Vehicle {
            id: 0,
            vin: "1HGCV1F34LA012345".to_string(),
            year: 2023,
            make: "Honda".to_string(),
            model: "Accord".to_string(),
            mileage: 18_500,
            purchase_price: Money::from_major(22_000),
            asking_price: Money::from_major(25_500),
            status: VehicleStatus::Available,
            days_in_inventory: 12,
        }
    }

    fn sample_lead() -> Lead {
        Lead {
            id: 0,
            customer_name: "Sarah Chen".to_string(),
            phone: "555-0142".to_string(),
            email: "sarah.chen@example.com".to_string(),
            source: "Website".to_string(),
            status: LeadStatus::Hot,
            lead_score: 87,
            budget: Some(Money::from_major(28_000)),
        }
    }

    fn desk_with_inventory() -> DealDesk<MemoryStore<Deal>, MemoryStore<Vehicle>, MemoryStore<Lead>>
    {
        let mut vehicles = MemoryStore::new("vehicle");
        vehicles.create(sample_vehicle()).unwrap();
        let mut leads = MemoryStore::new("lead");
        leads.create(sample_lead()).unwrap();

        DealDesk::new(
            MemoryStore::new("deal"),
            vehicles,
            leads,
            DeskConfig::default(),
        )
        .unwrap()
    }

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        ))
    }

    fn worksheet(desk: &DealDesk<MemoryStore<Deal>, MemoryStore<Vehicle>, MemoryStore<Lead>>) -> NewDeal {
        let mut new_deal = NewDeal::with_defaults(desk.config(), 1, 1, Money::from_major(25_000));
        new_deal.down_payment = Money::from_major(3_000);
        new_deal
    }

    #[test]
    fn test_create_deal_computes_financing() {
        let mut desk = desk_with_inventory();
        let time = test_time();

        let deal = desk.create_deal(worksheet(&desk), &time).unwrap();

        assert_eq!(deal.id, 1);
        assert_eq!(deal.status, DealStatus::Draft);
        assert_eq!(deal.customer_name, "Sarah Chen");
        assert_eq!(deal.net_price, Money::from_major(25_000));
        assert_eq!(deal.margin, Money::from_major(3_000));
        assert_eq!(deal.deal_date, time.now());

        let financing = deal.financing.as_ref().unwrap();
        assert_eq!(financing.loan_amount, Money::from_major(22_000));
        assert_eq!(financing.monthly_payment, Money::from_cents(41_416));
        assert_eq!(financing.term_months, 60);

        // vehicle is reserved while the deal is open
        let vehicle = desk.vehicles().get(1).unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Pending);

        let events = desk.events();
        assert!(matches!(
            events[0],
            DeskEvent::DealCreated { deal_id: 1, vehicle_id: 1, .. }
        ));
    }

    #[test]
    fn test_preview_matches_persisted_terms() {
        let mut desk = desk_with_inventory();
        let time = test_time();

        let preview = desk
            .preview_financing(
                Money::from_major(25_000),
                Money::ZERO,
                Money::from_major(3_000),
                Rate::from_percent(dec!(4.9)),
                60,
            )
            .unwrap();

        let deal = desk.create_deal(worksheet(&desk), &time).unwrap();
        let terms = deal.financing.unwrap();

        assert_eq!(preview.loan_amount, terms.loan_amount);
        assert_eq!(preview.monthly_payment, terms.monthly_payment);
    }

    #[test]
    fn test_trade_in_reduces_net_price() {
        let mut desk = desk_with_inventory();
        let time = test_time();

        let mut new_deal = worksheet(&desk);
        new_deal.trade_in_value = Money::from_major(5_000);
        let deal = desk.create_deal(new_deal, &time).unwrap();

        assert_eq!(deal.net_price, Money::from_major(20_000));
        assert_eq!(
            deal.financing.unwrap().loan_amount,
            Money::from_major(17_000)
        );
        // margin is against the sale price, not the net price
        assert_eq!(deal.margin, Money::from_major(3_000));
    }

    #[test]
    fn test_unknown_records_rejected() {
        let mut desk = desk_with_inventory();
        let time = test_time();

        let mut new_deal = worksheet(&desk);
        new_deal.vehicle_id = 42;
        let err = desk.create_deal(new_deal, &time).unwrap_err();
        assert!(matches!(
            err,
            DeskError::RecordNotFound { entity: "vehicle", id: 42 }
        ));

        let mut new_deal = worksheet(&desk);
        new_deal.customer_id = 42;
        let err = desk.create_deal(new_deal, &time).unwrap_err();
        assert!(matches!(
            err,
            DeskError::RecordNotFound { entity: "lead", id: 42 }
        ));
    }

    #[test]
    fn test_vehicle_cannot_be_double_desked() {
        let mut desk = desk_with_inventory();
        let time = test_time();

        desk.create_deal(worksheet(&desk), &time).unwrap();
        let err = desk.create_deal(worksheet(&desk), &time).unwrap_err();
        assert!(matches!(err, DeskError::VehicleNotAvailable { id: 1 }));
    }

    #[test]
    fn test_status_walk_to_completed() {
        let mut desk = desk_with_inventory();
        let time = test_time();

        let deal = desk.create_deal(worksheet(&desk), &time).unwrap();
        desk.advance_status(deal.id, DealStatus::Negotiating, &time)
            .unwrap();
        desk.advance_status(deal.id, DealStatus::InProgress, &time)
            .unwrap();
        let completed = desk
            .advance_status(deal.id, DealStatus::Completed, &time)
            .unwrap();

        assert_eq!(completed.status, DealStatus::Completed);
        assert_eq!(completed.delivery_date, Some(time.now()));
        assert_eq!(desk.vehicles().get(1).unwrap().status, VehicleStatus::Sold);

        let sold_events: Vec<_> = desk
            .events()
            .iter()
            .filter(|e| matches!(e, DeskEvent::VehicleSold { .. }))
            .collect();
        assert_eq!(sold_events.len(), 1);
    }

    #[test]
    fn test_backward_transition_rejected() {
        let mut desk = desk_with_inventory();
        let time = test_time();

        let deal = desk.create_deal(worksheet(&desk), &time).unwrap();
        desk.advance_status(deal.id, DealStatus::InProgress, &time)
            .unwrap();

        let err = desk
            .advance_status(deal.id, DealStatus::Draft, &time)
            .unwrap_err();
        assert!(matches!(
            err,
            DeskError::InvalidStatusTransition {
                from: DealStatus::InProgress,
                to: DealStatus::Draft,
            }
        ));
    }

    #[test]
    fn test_document_lifecycle() {
        let mut desk = desk_with_inventory();
        let time = test_time();

        let deal = desk.create_deal(worksheet(&desk), &time).unwrap();
        let document = desk
            .attach_document(deal.id, "purchase_agreement.pdf", "Contract", &time)
            .unwrap();

        let stored = desk.deals().get(deal.id).unwrap();
        assert_eq!(stored.documents.len(), 1);
        assert_eq!(stored.documents[0].uploaded_at, time.now());

        let removed = desk.remove_document(deal.id, document.id, &time).unwrap();
        assert_eq!(removed.id, document.id);
        assert!(desk.deals().get(deal.id).unwrap().documents.is_empty());

        let err = desk.remove_document(deal.id, document.id, &time).unwrap_err();
        assert!(matches!(err, DeskError::DocumentNotFound { .. }));
    }
}

/// full deal workflow - stores, desk, documents, events
use deal_desk_rs::{
    DealDesk, DealStatus, DeskConfig, Lead, LeadStatus, MemoryStore, Money, NewDeal, RecordStore,
    SafeTimeProvider, TimeSource, Vehicle, VehicleStatus,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    // seed inventory and a lead
    let mut vehicles = MemoryStore::new("vehicle");
    let vehicle = vehicles.create(Vehicle {
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
    })?;

    let mut leads = MemoryStore::new("lead");
    let lead = leads.create(Lead {
        id: 0,
        customer_name: "Sarah Chen".to_string(),
        phone: "555-0142".to_string(),
        email: "sarah.chen@example.com".to_string(),
        source: "Website".to_string(),
        status: LeadStatus::Hot,
        lead_score: 87,
        budget: Some(Money::from_major(28_000)),
    })?;

    let mut desk = DealDesk::new(
        MemoryStore::new("deal"),
        vehicles,
        leads,
        DeskConfig::default(),
    )?;

    // desk the deal with the configured rate and term
    let mut worksheet = NewDeal::with_defaults(
        desk.config(),
        vehicle.id,
        lead.id,
        Money::from_major(25_000),
    );
    worksheet.down_payment = Money::from_major(3_000);

    let deal = desk.create_deal(worksheet, &time)?;
    println!("{}", deal.to_json_pretty());

    // attach paperwork and walk the deal to completion
    desk.attach_document(deal.id, "purchase_agreement.pdf", "Contract", &time)?;
    desk.advance_status(deal.id, DealStatus::Negotiating, &time)?;
    desk.advance_status(deal.id, DealStatus::InProgress, &time)?;
    desk.advance_status(deal.id, DealStatus::Completed, &time)?;

    for event in desk.take_events() {
        println!("{:?}", event);
    }

    Ok(())
}

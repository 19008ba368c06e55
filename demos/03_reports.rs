/// dashboard metrics over store snapshots
use deal_desk_rs::{
    aging_buckets, leads_by_source, top_deals_by_margin, DashboardStats, Deal, DealStatus, Lead,
    LeadStatus, Money, Vehicle, VehicleStatus,
};
use deal_desk_rs::chrono::Utc;

fn vehicle(id: i64, days: u32, status: VehicleStatus, asking: i64) -> Vehicle {
    Vehicle {
        id,
        vin: format!("VIN{:05}", id),
        year: 2022,
        make: "Toyota".to_string(),
        model: "Camry".to_string(),
        mileage: 30_000,
        purchase_price: Money::from_major(asking - 2_500),
        asking_price: Money::from_major(asking),
        status,
        days_in_inventory: days,
    }
}

fn main() {
    let vehicles = vec![
        vehicle(1, 12, VehicleStatus::Available, 25_500),
        vehicle(2, 45, VehicleStatus::Available, 18_900),
        vehicle(3, 95, VehicleStatus::Available, 31_000),
        vehicle(4, 30, VehicleStatus::Sold, 21_500),
    ];

    let leads = vec![
        Lead {
            id: 1,
            customer_name: "Sarah Chen".to_string(),
            phone: "555-0142".to_string(),
            email: "sarah.chen@example.com".to_string(),
            source: "Website".to_string(),
            status: LeadStatus::Hot,
            lead_score: 87,
            budget: Some(Money::from_major(28_000)),
        },
        Lead {
            id: 2,
            customer_name: "Marcus Webb".to_string(),
            phone: "555-0187".to_string(),
            email: "marcus.webb@example.com".to_string(),
            source: "Walk-in".to_string(),
            status: LeadStatus::Warm,
            lead_score: 55,
            budget: None,
        },
    ];

    let deals = vec![Deal {
        id: 1,
        vehicle_id: 4,
        customer_id: 2,
        customer_name: "Marcus Webb".to_string(),
        sale_price: Money::from_major(21_500),
        trade_in_value: Money::ZERO,
        net_price: Money::from_major(21_500),
        margin: Money::from_major(2_500),
        status: DealStatus::Completed,
        deal_date: Utc::now(),
        delivery_date: Some(Utc::now()),
        salesperson: "Current User".to_string(),
        finance_manager: "Jennifer Lopez".to_string(),
        financing: None,
        documents: Vec::new(),
    }];

    let stats = DashboardStats::compute(&vehicles, &leads, &deals);
    println!("{}", serde_json::to_string_pretty(&stats).unwrap());

    println!("aging: {:?}", aging_buckets(&vehicles));
    println!("by source: {:?}", leads_by_source(&leads));
    for deal in top_deals_by_margin(&deals, 3) {
        println!("top deal #{}: margin {}", deal.id, deal.margin);
    }
}

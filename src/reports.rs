use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::decimal::Money;
use crate::types::{Deal, DealStatus, Lead, LeadStatus, Vehicle, VehicleStatus};

/// inventory aging counts by days-in-stock bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AgingBuckets {
    /// 0-30 days
    pub fresh: usize,
    /// 31-60 days
    pub aging: usize,
    /// 61-90 days
    pub stale: usize,
    /// over 90 days
    pub overaged: usize,
}

/// bucket vehicles by how long they have sat on the lot
pub fn aging_buckets(vehicles: &[Vehicle]) -> AgingBuckets {
    let mut buckets = AgingBuckets::default();
    for vehicle in vehicles {
        match vehicle.days_in_inventory {
            0..=30 => buckets.fresh += 1,
            31..=60 => buckets.aging += 1,
            61..=90 => buckets.stale += 1,
            _ => buckets.overaged += 1,
        }
    }
    buckets
}

/// headline dashboard figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_inventory: usize,
    pub available_vehicles: usize,
    pub sold_vehicles: usize,
    /// sum of asking prices across the whole inventory
    pub total_inventory_value: Money,
    pub hot_leads: usize,
    pub total_leads: usize,
    /// mean days in stock, rounded to the nearest day
    pub avg_days_in_inventory: u32,
    /// completed sale prices summed
    pub total_sales: Money,
    /// completed margins summed
    pub total_margin: Money,
    /// deals per lead as a percentage, one decimal place
    pub conversion_rate: Decimal,
}

impl DashboardStats {
    pub fn compute(vehicles: &[Vehicle], leads: &[Lead], deals: &[Deal]) -> Self {
        let completed: Vec<&Deal> = deals
            .iter()
            .filter(|d| d.status == DealStatus::Completed)
            .collect();

        let avg_days_in_inventory = if vehicles.is_empty() {
            0
        } else {
            let total_days: u64 = vehicles.iter().map(|v| v.days_in_inventory as u64).sum();
            (Decimal::from(total_days) / Decimal::from(vehicles.len() as u64))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u32()
                .unwrap_or(0)
        };

        let conversion_rate = if leads.is_empty() {
            Decimal::ZERO
        } else {
            (Decimal::from(deals.len()) * Decimal::from(100) / Decimal::from(leads.len()))
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        };

        Self {
            total_inventory: vehicles.len(),
            available_vehicles: vehicles
                .iter()
                .filter(|v| v.status == VehicleStatus::Available)
                .count(),
            sold_vehicles: vehicles
                .iter()
                .filter(|v| v.status == VehicleStatus::Sold)
                .count(),
            total_inventory_value: vehicles
                .iter()
                .map(|v| v.asking_price)
                .fold(Money::ZERO, |acc, x| acc + x),
            hot_leads: leads.iter().filter(|l| l.status == LeadStatus::Hot).count(),
            total_leads: leads.len(),
            avg_days_in_inventory,
            total_sales: completed
                .iter()
                .map(|d| d.sale_price)
                .fold(Money::ZERO, |acc, x| acc + x),
            total_margin: completed
                .iter()
                .map(|d| d.margin)
                .fold(Money::ZERO, |acc, x| acc + x),
            conversion_rate,
        }
    }
}

/// completed deals ranked by margin, best first
pub fn top_deals_by_margin(deals: &[Deal], limit: usize) -> Vec<&Deal> {
    let mut completed: Vec<&Deal> = deals
        .iter()
        .filter(|d| d.status == DealStatus::Completed)
        .collect();
    completed.sort_by(|a, b| b.margin.cmp(&a.margin));
    completed.truncate(limit);
    completed
}

/// lead counts per acquisition source
pub fn leads_by_source(leads: &[Lead]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for lead in leads {
        *counts.entry(lead.source.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn vehicle(days: u32, status: VehicleStatus, asking: i64) -> Vehicle {
        Vehicle {
            id: 0,
            vin: "VIN".to_string(),
            year: 2022,
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            mileage: 30_000,
            purchase_price: Money::from_major(asking - 2_000),
            asking_price: Money::from_major(asking),
            status,
            days_in_inventory: days,
        }
    }

    fn lead(source: &str, status: LeadStatus) -> Lead {
        Lead {
            id: 0,
            customer_name: "A Customer".to_string(),
            phone: "555-0100".to_string(),
            email: "customer@example.com".to_string(),
            source: source.to_string(),
            status,
            lead_score: 50,
            budget: None,
        }
    }

    fn deal(status: DealStatus, sale: i64, margin: i64) -> Deal {
        Deal {
            id: 0,
            vehicle_id: 1,
            customer_id: 1,
            customer_name: "A Customer".to_string(),
            sale_price: Money::from_major(sale),
            trade_in_value: Money::ZERO,
            net_price: Money::from_major(sale),
            margin: Money::from_major(margin),
            status,
            deal_date: Utc::now(),
            delivery_date: None,
            salesperson: "Current User".to_string(),
            finance_manager: "Jennifer Lopez".to_string(),
            financing: None,
            documents: Vec::new(),
        }
    }

    #[test]
    fn test_aging_buckets_boundaries() {
        let vehicles = vec![
            vehicle(0, VehicleStatus::Available, 20_000),
            vehicle(30, VehicleStatus::Available, 20_000),
            vehicle(31, VehicleStatus::Available, 20_000),
            vehicle(60, VehicleStatus::Available, 20_000),
            vehicle(61, VehicleStatus::Available, 20_000),
            vehicle(90, VehicleStatus::Available, 20_000),
            vehicle(91, VehicleStatus::Available, 20_000),
        ];

        let buckets = aging_buckets(&vehicles);
        assert_eq!(buckets.fresh, 2);
        assert_eq!(buckets.aging, 2);
        assert_eq!(buckets.stale, 2);
        assert_eq!(buckets.overaged, 1);
    }

    #[test]
    fn test_dashboard_stats() {
        let vehicles = vec![
            vehicle(10, VehicleStatus::Available, 25_000),
            vehicle(50, VehicleStatus::Sold, 18_000),
            vehicle(30, VehicleStatus::Pending, 32_000),
        ];
        let leads = vec![
            lead("Website", LeadStatus::Hot),
            lead("Walk-in", LeadStatus::Warm),
            lead("Referral", LeadStatus::Cold),
            lead("Website", LeadStatus::Hot),
        ];
        let deals = vec![
            deal(DealStatus::Completed, 18_000, 2_500),
            deal(DealStatus::Draft, 25_000, 3_000),
        ];

        let stats = DashboardStats::compute(&vehicles, &leads, &deals);
        assert_eq!(stats.total_inventory, 3);
        assert_eq!(stats.available_vehicles, 1);
        assert_eq!(stats.sold_vehicles, 1);
        assert_eq!(stats.total_inventory_value, Money::from_major(75_000));
        assert_eq!(stats.hot_leads, 2);
        assert_eq!(stats.avg_days_in_inventory, 30);
        assert_eq!(stats.total_sales, Money::from_major(18_000));
        assert_eq!(stats.total_margin, Money::from_major(2_500));
        assert_eq!(stats.conversion_rate, dec!(50.0));
    }

    #[test]
    fn test_empty_inputs() {
        let stats = DashboardStats::compute(&[], &[], &[]);
        assert_eq!(stats.avg_days_in_inventory, 0);
        assert_eq!(stats.conversion_rate, Decimal::ZERO);
        assert_eq!(stats.total_inventory_value, Money::ZERO);
    }

    #[test]
    fn test_top_deals_by_margin() {
        let deals = vec![
            deal(DealStatus::Completed, 18_000, 1_500),
            deal(DealStatus::Completed, 25_000, 4_000),
            deal(DealStatus::Draft, 30_000, 9_000),
            deal(DealStatus::Completed, 21_000, 2_800),
        ];

        let top = top_deals_by_margin(&deals, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].margin, Money::from_major(4_000));
        assert_eq!(top[1].margin, Money::from_major(2_800));
    }

    #[test]
    fn test_leads_by_source() {
        let leads = vec![
            lead("Website", LeadStatus::Hot),
            lead("Website", LeadStatus::Cold),
            lead("Walk-in", LeadStatus::Warm),
        ];

        let counts = leads_by_source(&leads);
        assert_eq!(counts["Website"], 2);
        assert_eq!(counts["Walk-in"], 1);
    }
}

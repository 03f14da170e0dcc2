use crate::entities::price_snapshot::PriceSnapshot;
use serde::Serialize;
use std::fmt;

pub const NO_LISTING_FOR_ANY_COMPANY: &str =
    "THERE DOES NOT APPEAR TO BE A STOCK VALUE LISTING FOR ANY COMPANY";

/// Price used for a company that is listed at the start of an interval but
/// missing from the end snapshot. Such a company reports a -100% change.
pub const MISSING_END_PRICE: f64 = 0.0;

pub fn percentage_change(start_price: f64, end_price: f64) -> f64 {
    (end_price - start_price) * 100.0 / start_price
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceWinner {
    pub company: String,
    pub start_price: f64,
    pub end_price: f64,
    pub change_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BestPerformance {
    NoListing,
    Winner(PerformanceWinner),
}

impl fmt::Display for BestPerformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BestPerformance::NoListing => f.write_str(NO_LISTING_FOR_ANY_COMPANY),
            BestPerformance::Winner(winner) => write!(
                f,
                "{} GAINED THE MOST BETWEEN THESE TIMES, CHANGING FROM {:.2} TO {:.2}, A CHANGE OF {:.2}%",
                winner.company, winner.start_price, winner.end_price, winner.change_pct
            ),
        }
    }
}

/// Picks the company with the strictly greatest percentage change between
/// two snapshots. Companies are visited in snapshot order, so the first one
/// seen keeps a tie.
pub fn best_performer(start: &PriceSnapshot, end: &PriceSnapshot) -> BestPerformance {
    if start.is_empty() || end.is_empty() {
        return BestPerformance::NoListing;
    }

    let mut best: Option<PerformanceWinner> = None;
    for (company, start_price) in start.iter() {
        let end_price = end.get(company).unwrap_or(MISSING_END_PRICE);
        let change_pct = percentage_change(start_price, end_price);
        let improves = best
            .as_ref()
            .map_or(true, |current| change_pct > current.change_pct);
        if improves {
            best = Some(PerformanceWinner {
                company: company.to_string(),
                start_price,
                end_price,
                change_pct,
            });
        }
    }

    best.map_or(BestPerformance::NoListing, BestPerformance::Winner)
}

/// Companies listed in `start` that have no price in `end`.
pub fn missing_at_end(start: &PriceSnapshot, end: &PriceSnapshot) -> Vec<String> {
    start
        .companies()
        .filter(|company| !end.contains(company))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceChange {
    pub company: String,
    pub start_price: f64,
    pub end_price: f64,
    pub change_pct: f64,
}

impl PriceChange {
    pub fn between(company: impl Into<String>, start_price: f64, end_price: f64) -> Self {
        Self {
            company: company.into(),
            start_price,
            end_price,
            change_pct: percentage_change(start_price, end_price),
        }
    }
}

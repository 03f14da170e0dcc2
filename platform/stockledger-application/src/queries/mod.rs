//! Point-in-time and interval queries over a transaction ledger.
//!
//! Each call reopens the source and rescans it from the first record; nothing
//! is cached between calls.

use std::time::Instant;
use stockledger_domain::entities::price_snapshot::PriceSnapshot;
use stockledger_domain::repositories::transactions::{SourceError, TransactionSource};
use stockledger_domain::services::performance::{self, BestPerformance, PriceChange};
use stockledger_domain::services::snapshot::{build_snapshot, effective_cutoff};
use stockledger_domain::value_objects::transaction::Transaction;
use tracing::{debug, info_span, warn};

/// Legacy "not found" value for callers that still want a bare number.
/// Real prices are always positive.
pub const PRICE_NOT_FOUND: f64 = -1.0;

/// Latest price per company at or before `time`. An unavailable source
/// yields an empty snapshot.
pub fn snapshot_at(source: &dyn TransactionSource, time: i64) -> PriceSnapshot {
    let _span = info_span!("snapshot_at", source = %source.describe(), time).entered();
    metrics::counter!("stockledger.queries", "kind" => "snapshot").increment(1);
    load_snapshot(source, time)
}

pub fn price_of(source: &dyn TransactionSource, company: &str, time: i64) -> Option<f64> {
    let _span = info_span!("price_of", source = %source.describe(), company, time).entered();
    metrics::counter!("stockledger.queries", "kind" => "price").increment(1);
    load_snapshot(source, time).get(company)
}

pub fn price_of_or_sentinel(source: &dyn TransactionSource, company: &str, time: i64) -> f64 {
    price_of(source, company, time).unwrap_or(PRICE_NOT_FOUND)
}

/// Company with the greatest percentage gain between `t1` and `t2`.
///
/// A company listed at `t1` but absent at `t2` is scored with an end price of
/// zero. That case is logged so it can be spotted in real ledgers.
pub fn best_performer(source: &dyn TransactionSource, t1: i64, t2: i64) -> BestPerformance {
    let _span = info_span!("best_performer", source = %source.describe(), t1, t2).entered();
    metrics::counter!("stockledger.queries", "kind" => "best_performer").increment(1);

    let start = load_snapshot(source, t1);
    let end = load_snapshot(source, t2);
    if start.is_empty() || end.is_empty() {
        debug!(
            start_companies = start.len(),
            end_companies = end.len(),
            "no listing at one end of the interval"
        );
        return BestPerformance::NoListing;
    }

    for company in performance::missing_at_end(&start, &end) {
        warn!(
            company = %company,
            t1,
            t2,
            "company listed at start but missing at end, scoring end price as 0"
        );
    }

    performance::best_performer(&start, &end)
}

/// Price movement of one company between `t1` and `t2`, if it is listed at
/// both times.
pub fn price_change(
    source: &dyn TransactionSource,
    company: &str,
    t1: i64,
    t2: i64,
) -> Option<PriceChange> {
    let _span =
        info_span!("price_change", source = %source.describe(), company, t1, t2).entered();
    metrics::counter!("stockledger.queries", "kind" => "price_change").increment(1);

    let start_price = load_snapshot(source, t1).get(company)?;
    let end_price = load_snapshot(source, t2).get(company)?;
    Some(PriceChange::between(company, start_price, end_price))
}

/// Every readable record for `company`, in ledger order. Unlike the snapshot
/// queries, an unavailable source is reported to the caller.
pub fn transactions_for(
    source: &dyn TransactionSource,
    company: &str,
) -> Result<Vec<Transaction>, SourceError> {
    let _span = info_span!("transactions_for", source = %source.describe(), company).entered();
    metrics::counter!("stockledger.queries", "kind" => "transactions").increment(1);

    let records = source.open()?;
    Ok(records.filter(|record| record.company == company).collect())
}

fn load_snapshot(source: &dyn TransactionSource, time: i64) -> PriceSnapshot {
    let started = Instant::now();
    let records = match source.open() {
        Ok(records) => records,
        Err(err) => {
            metrics::counter!("stockledger.source.open_failures").increment(1);
            warn!(error = %err, "transaction source unavailable, using empty snapshot");
            return PriceSnapshot::empty(effective_cutoff(time));
        }
    };

    let snapshot = build_snapshot(records, time);
    metrics::histogram!("stockledger.snapshot.build_ms")
        .record(started.elapsed().as_secs_f64() * 1000.0);
    debug!(
        cutoff = snapshot.cutoff(),
        companies = snapshot.len(),
        "snapshot built"
    );
    snapshot
}

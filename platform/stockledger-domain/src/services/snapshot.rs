use crate::entities::price_snapshot::PriceSnapshot;
use crate::value_objects::transaction::Transaction;

/// Negative times behave like time zero.
pub fn effective_cutoff(time: i64) -> i64 {
    time.max(0)
}

/// Folds records (ascending by time) into a snapshot, stopping at the first
/// record strictly after the cutoff. Records at the cutoff are included.
pub fn build_snapshot<I>(records: I, time: i64) -> PriceSnapshot
where
    I: IntoIterator<Item = Transaction>,
{
    let cutoff = effective_cutoff(time);
    let mut snapshot = PriceSnapshot::empty(cutoff);
    for record in records {
        if record.time > cutoff {
            break;
        }
        snapshot.upsert(record.company, record.price);
    }
    snapshot
}

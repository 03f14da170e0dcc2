use serde::Serialize;
use std::collections::BTreeMap;

/// Latest known price per ticker as of an inclusive cutoff time.
///
/// Tickers iterate in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSnapshot {
    cutoff: i64,
    prices: BTreeMap<String, f64>,
}

impl PriceSnapshot {
    pub fn empty(cutoff: i64) -> Self {
        Self {
            cutoff,
            prices: BTreeMap::new(),
        }
    }

    pub fn cutoff(&self) -> i64 {
        self.cutoff
    }

    /// Inserts or overwrites the price for `company`.
    pub fn upsert(&mut self, company: impl Into<String>, price: f64) {
        self.prices.insert(company.into(), price);
    }

    pub fn get(&self, company: &str) -> Option<f64> {
        self.prices.get(company).copied()
    }

    pub fn contains(&self, company: &str) -> bool {
        self.prices.contains_key(company)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.prices
            .iter()
            .map(|(company, price)| (company.as_str(), *price))
    }

    pub fn companies(&self) -> impl Iterator<Item = &str> + '_ {
        self.prices.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::PriceSnapshot;

    #[test]
    fn upsert_overwrites_existing_price() {
        let mut snapshot = PriceSnapshot::empty(3);
        snapshot.upsert("AAPL", 100.0);
        snapshot.upsert("AAPL", 101.5);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("AAPL"), Some(101.5));
        assert_eq!(snapshot.cutoff(), 3);
    }

    #[test]
    fn iteration_is_lexicographic() {
        let mut snapshot = PriceSnapshot::empty(0);
        snapshot.upsert("MSFT", 1.0);
        snapshot.upsert("AAPL", 2.0);
        snapshot.upsert("BRK.B", 3.0);
        let companies: Vec<&str> = snapshot.companies().collect();
        assert_eq!(companies, vec!["AAPL", "BRK.B", "MSFT"]);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut snapshot = PriceSnapshot::empty(0);
        snapshot.upsert("AAPL", 2.0);
        assert!(snapshot.contains("AAPL"));
        assert!(!snapshot.contains("aapl"));
        assert_eq!(snapshot.get("aapl"), None);
    }
}

/// Tickers are stored upper-case and compared exactly, so user input has to
/// go through here before it reaches a lookup.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

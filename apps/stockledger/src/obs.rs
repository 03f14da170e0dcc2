use metrics::{describe_counter, describe_histogram, Unit};
use std::net::{SocketAddr, ToSocketAddrs};
use stockledger_application::config::LogFormat;

/// Logs go to stderr; stdout belongs to the menu and query results.
pub fn init_tracing(log_level: &str, log_format: LogFormat) -> Result<(), String> {
    let filter = std::env::var("STOCKLEDGER_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| log_level.to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(filter)
        .map_err(|err| format!("invalid log filter: {err}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match log_format {
        LogFormat::Json => builder
            .json()
            .try_init()
            .map_err(|err| format!("failed to install tracing subscriber: {err}")),
        LogFormat::Text => builder
            .try_init()
            .map_err(|err| format!("failed to install tracing subscriber: {err}")),
    }
}

/// Starts the Prometheus listener when an address is configured and
/// registers descriptions for every stockledger metric.
pub fn init_metrics(metrics_addr: Option<&str>) -> Result<Option<SocketAddr>, String> {
    let Some(raw) = metrics_addr else {
        return Ok(None);
    };
    let addr = resolve_metrics_addr(raw)?;
    install_exporter(addr)?;
    describe_metrics();

    tracing::info!(metrics_addr = %addr, "prometheus metrics exporter enabled");
    Ok(Some(addr))
}

fn resolve_metrics_addr(raw: &str) -> Result<SocketAddr, String> {
    raw.trim()
        .to_socket_addrs()
        .map_err(|err| format!("invalid metrics addr {raw:?} (expected host:port): {err}"))?
        .next()
        .ok_or_else(|| format!("metrics addr {raw:?} did not resolve to any address"))
}

#[cfg(feature = "prometheus")]
fn install_exporter(addr: SocketAddr) -> Result<(), String> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|err| format!("failed to start metrics listener on {addr}: {err}"))
}

#[cfg(not(feature = "prometheus"))]
fn install_exporter(_addr: SocketAddr) -> Result<(), String> {
    Err("metrics exporter requires stockledger feature `prometheus`".to_string())
}

fn describe_metrics() {
    describe_counter!("stockledger.queries", "Ledger queries served, by kind.");
    describe_counter!(
        "stockledger.source.open_failures",
        "Ledger opens that failed and fell back to an empty snapshot."
    );
    describe_counter!(
        "stockledger.scanner.malformed_records",
        "Ledger scans ended early by an unreadable field."
    );
    describe_counter!(
        "stockledger.menu.selections",
        "Interactive menu choices, by option."
    );
    describe_histogram!(
        "stockledger.snapshot.build_ms",
        Unit::Milliseconds,
        "Time spent building one price snapshot."
    );
}

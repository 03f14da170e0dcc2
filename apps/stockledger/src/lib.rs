pub mod commands;
pub mod menu;
pub mod obs;
pub mod output;

use std::path::{Path, PathBuf};
use stockledger_application::config::{self, Config, MetricsConfig};

/// Config from `path` when given, built-in defaults otherwise.
pub fn load_runtime_config(path: Option<&Path>) -> Result<Config, String> {
    match path {
        Some(path) => config::load_config(path),
        None => Ok(Config::default()),
    }
}

/// Command-line values win over whatever the config file says.
pub fn apply_overrides(
    mut config: Config,
    data: Option<PathBuf>,
    metrics_addr: Option<String>,
) -> Config {
    if let Some(data) = data {
        config.data.transactions_path = data.display().to_string();
    }
    if let Some(addr) = metrics_addr.filter(|addr| !addr.trim().is_empty()) {
        config.metrics = Some(MetricsConfig { addr: Some(addr) });
    }
    config
}

#[cfg(test)]
mod tests {
    use super::{apply_overrides, load_runtime_config};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_tmp_path(name: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!(
            "stockledger_{name}_{}_{}",
            std::process::id(),
            now
        ))
    }

    #[test]
    fn runtime_config_defaults_without_path() {
        let config = load_runtime_config(None).expect("defaults");
        assert_eq!(config.data.transactions_path, "stocks.txt");
    }

    #[test]
    fn runtime_config_reads_file() {
        let path = unique_tmp_path("config.toml");
        fs::write(&path, "[data]\ntransactions_path = \"ledger.txt\"\n").expect("write config");
        let config = load_runtime_config(Some(path.as_path())).expect("config");
        assert_eq!(config.data.transactions_path, "ledger.txt");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn runtime_config_reports_bad_file() {
        let err = load_runtime_config(Some(unique_tmp_path("absent.toml").as_path()))
            .expect_err("missing config");
        assert!(err.contains("failed to read config"));
    }

    #[test]
    fn overrides_replace_data_path_and_metrics_addr() {
        let config = load_runtime_config(None).expect("defaults");
        let config = apply_overrides(
            config,
            Some(PathBuf::from("other.txt")),
            Some("127.0.0.1:9100".to_string()),
        );
        assert_eq!(config.data.transactions_path, "other.txt");
        assert_eq!(config.metrics_addr(), Some("127.0.0.1:9100"));
    }

    #[test]
    fn blank_metrics_override_is_ignored() {
        let config = apply_overrides(
            load_runtime_config(None).expect("defaults"),
            None,
            Some(" ".to_string()),
        );
        assert!(config.metrics.is_none());
        assert_eq!(config.data.transactions_path, "stocks.txt");
    }
}

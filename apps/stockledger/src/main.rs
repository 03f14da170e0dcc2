use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use stockledger::commands::{self, Command};
use stockledger::{menu, obs};
use stockledger_domain::repositories::transactions::TransactionSource;
use stockledger_infrastructure::market_data::transactions_file::FileTransactionSource;

#[derive(Parser, Debug)]
#[command(name = "stockledger")]
#[command(
    about = "Point-in-time and interval price queries over a stock transaction ledger.",
    version
)]
#[command(
    after_help = "Examples:\n  stockledger\n  stockledger --data stocks.txt price --company aapl --time 12\n  stockledger best --start 0 --end 30 --json\n"
)]
struct Cli {
    /// Config file path (TOML).
    #[arg(long, global = true, env = "STOCKLEDGER_CONFIG")]
    config: Option<PathBuf>,

    /// Transaction ledger to read. Overrides data.transactions_path.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Serve Prometheus metrics on host:port.
    #[arg(long, global = true, env = "STOCKLEDGER_METRICS_ADDR")]
    metrics_addr: Option<String>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Interactive menu (default when no subcommand is given).
    Menu,
    /// Print every transaction of one company.
    List {
        #[arg(long)]
        company: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Price of one company at a point in time.
    Price {
        #[arg(long)]
        company: String,
        #[arg(long, allow_negative_numbers = true)]
        time: i64,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Price movement of one company between two times.
    Change {
        #[arg(long)]
        company: String,
        #[arg(long, allow_negative_numbers = true)]
        start: i64,
        #[arg(long, allow_negative_numbers = true)]
        end: i64,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Company with the greatest percentage gain between two times.
    Best {
        #[arg(long, allow_negative_numbers = true)]
        start: i64,
        #[arg(long, allow_negative_numbers = true)]
        end: i64,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Latest price of every company at a point in time.
    Snapshot {
        #[arg(long, allow_negative_numbers = true)]
        time: i64,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the effective configuration.
    ShowConfig,
}

fn main() {
    let cli = Cli::parse();

    let config = match stockledger::load_runtime_config(cli.config.as_deref()) {
        Ok(config) => stockledger::apply_overrides(config, cli.data, cli.metrics_addr),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = obs::init_tracing(&config.logging.level, config.logging.format) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
    if let Err(err) = obs::init_metrics(config.metrics_addr()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let source = FileTransactionSource::new(&config.data.transactions_path);
    tracing::info!(ledger = %source.describe(), "stock ledger ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match cli.command.unwrap_or(CliCommand::Menu) {
        CliCommand::Menu => menu::run_menu(&source, io::stdin().lock(), &mut out),
        CliCommand::ShowConfig => commands::run_show_config(&config, &mut out),
        CliCommand::List { company, json } => {
            commands::run(Command::List { company, json }, &source, &mut out)
        }
        CliCommand::Price {
            company,
            time,
            json,
        } => commands::run(
            Command::Price {
                company,
                time,
                json,
            },
            &source,
            &mut out,
        ),
        CliCommand::Change {
            company,
            start,
            end,
            json,
        } => commands::run(
            Command::Change {
                company,
                start,
                end,
                json,
            },
            &source,
            &mut out,
        ),
        CliCommand::Best { start, end, json } => {
            commands::run(Command::Best { start, end, json }, &source, &mut out)
        }
        CliCommand::Snapshot { time, json } => {
            commands::run(Command::Snapshot { time, json }, &source, &mut out)
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, CliCommand};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["stockledger", "--data", "stocks.txt"]).expect("parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.data.as_deref(), Some(std::path::Path::new("stocks.txt")));
    }

    #[test]
    fn negative_times_are_accepted() {
        let cli = Cli::try_parse_from(["stockledger", "price", "--company", "aapl", "--time", "-4"])
            .expect("parse");
        match cli.command {
            Some(CliCommand::Price { company, time, json }) => {
                assert_eq!(company, "aapl");
                assert_eq!(time, -4);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn best_accepts_json_flag() {
        let cli = Cli::try_parse_from(["stockledger", "best", "--start", "0", "--end", "9", "--json"])
            .expect("parse");
        assert!(matches!(
            cli.command,
            Some(CliCommand::Best {
                start: 0,
                end: 9,
                json: true
            })
        ));
    }
}

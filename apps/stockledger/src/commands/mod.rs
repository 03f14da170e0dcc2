use crate::output;
use std::io::Write;
use stockledger_application::config::{self, Config};
use stockledger_application::queries;
use stockledger_domain::repositories::transactions::TransactionSource;
use stockledger_domain::value_objects::ticker::normalize_ticker;

/// Non-interactive queries. Each one writes a human-readable answer, or a
/// single JSON line when `json` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List {
        company: String,
        json: bool,
    },
    Price {
        company: String,
        time: i64,
        json: bool,
    },
    Change {
        company: String,
        start: i64,
        end: i64,
        json: bool,
    },
    Best {
        start: i64,
        end: i64,
        json: bool,
    },
    Snapshot {
        time: i64,
        json: bool,
    },
}

pub fn run(
    command: Command,
    source: &dyn TransactionSource,
    out: &mut dyn Write,
) -> Result<(), String> {
    match command {
        Command::List { company, json } => run_list(source, &normalize_ticker(&company), json, out),
        Command::Price {
            company,
            time,
            json,
        } => run_price(source, &normalize_ticker(&company), time, json, out),
        Command::Change {
            company,
            start,
            end,
            json,
        } => run_change(source, &normalize_ticker(&company), start, end, json, out),
        Command::Best { start, end, json } => run_best(source, start, end, json, out),
        Command::Snapshot { time, json } => run_snapshot(source, time, json, out),
    }
}

/// Prints the effective configuration as TOML.
pub fn run_show_config(config: &Config, out: &mut dyn Write) -> Result<(), String> {
    let rendered = config::to_toml_pretty(config)?;
    write_line(out, rendered.trim_end())
}

fn write_line(out: &mut dyn Write, text: &str) -> Result<(), String> {
    writeln!(out, "{text}").map_err(|err| format!("failed to write output: {err}"))
}

fn write_json(out: &mut dyn Write, value: &serde_json::Value) -> Result<(), String> {
    let line = serde_json::to_string(value)
        .map_err(|err| format!("failed to serialize result: {err}"))?;
    write_line(out, &line)
}

fn run_list(
    source: &dyn TransactionSource,
    company: &str,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), String> {
    let records = queries::transactions_for(source, company).map_err(|err| {
        tracing::warn!(error = %err, "cannot list transactions");
        output::missing_file(&source.describe())
    })?;

    if json {
        return write_json(
            out,
            &serde_json::json!({ "company": company, "transactions": records }),
        );
    }
    write_line(out, output::transaction_listing(&records).trim_end())
}

fn run_price(
    source: &dyn TransactionSource,
    company: &str,
    time: i64,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), String> {
    let price = queries::price_of(source, company, time);
    if json {
        return write_json(
            out,
            &serde_json::json!({ "company": company, "time": time, "price": price }),
        );
    }
    write_line(out, &output::price_at_time(price))
}

fn run_change(
    source: &dyn TransactionSource,
    company: &str,
    start: i64,
    end: i64,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), String> {
    let change = queries::price_change(source, company, start, end);
    if json {
        return write_json(
            out,
            &serde_json::json!({
                "company": company,
                "start": start,
                "end": end,
                "change": change,
            }),
        );
    }
    write_line(out, &output::price_change(change.as_ref()))
}

fn run_best(
    source: &dyn TransactionSource,
    start: i64,
    end: i64,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), String> {
    let result = queries::best_performer(source, start, end);
    if json {
        let value = serde_json::to_value(&result)
            .map_err(|err| format!("failed to serialize result: {err}"))?;
        return write_json(out, &value);
    }
    write_line(out, &result.to_string())
}

fn run_snapshot(
    source: &dyn TransactionSource,
    time: i64,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), String> {
    let snapshot = queries::snapshot_at(source, time);
    if json {
        let value = serde_json::to_value(&snapshot)
            .map_err(|err| format!("failed to serialize snapshot: {err}"))?;
        return write_json(out, &value);
    }

    let mut text = format!(
        "SNAPSHOT AT TIME {} ({} COMPANIES)",
        snapshot.cutoff(),
        snapshot.len()
    );
    for (company, price) in snapshot.iter() {
        text.push_str(&format!("\n{company:<7}{price:>10.2}"));
    }
    write_line(out, &text)
}

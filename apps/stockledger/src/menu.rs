use crate::output;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use stockledger_application::queries;
use stockledger_domain::repositories::transactions::TransactionSource;
use stockledger_domain::value_objects::ticker::normalize_ticker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    ListTransactions,
    PriceAtTime,
    PriceChange,
    BestPerformer,
    Exit,
}

impl MenuChoice {
    fn from_number(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::ListTransactions),
            2 => Some(Self::PriceAtTime),
            3 => Some(Self::PriceChange),
            4 => Some(Self::BestPerformer),
            5 => Some(Self::Exit),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::ListTransactions => "list",
            Self::PriceAtTime => "price",
            Self::PriceChange => "change",
            Self::BestPerformer => "best",
            Self::Exit => "exit",
        }
    }
}

/// Whitespace-separated answers, read the same way the ledger is: a line may
/// carry several answers and blank lines are skipped.
struct Answers<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Answers<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    fn next(&mut self) -> Result<Option<String>, String> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|err| format!("failed to read input: {err}"))?;
            if read == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}

/// Runs the interactive menu until the user picks exit or input runs out.
pub fn run_menu<R: BufRead, W: Write>(
    source: &dyn TransactionSource,
    input: R,
    mut out: W,
) -> Result<(), String> {
    let mut answers = Answers::new(input);
    loop {
        let Some(choice) = ask_choice(&mut answers, &mut out)? else {
            return Ok(());
        };
        metrics::counter!("stockledger.menu.selections", "choice" => choice.label()).increment(1);
        tracing::debug!(choice = choice.label(), "menu selection");

        let answered = match choice {
            MenuChoice::ListTransactions => list_transactions(source, &mut answers, &mut out)?,
            MenuChoice::PriceAtTime => price_at_time(source, &mut answers, &mut out)?,
            MenuChoice::PriceChange => price_change(source, &mut answers, &mut out)?,
            MenuChoice::BestPerformer => best_performer(source, &mut answers, &mut out)?,
            MenuChoice::Exit => return Ok(()),
        };
        if !answered {
            return Ok(());
        }
    }
}

fn emit(out: &mut dyn Write, text: &str) -> Result<(), String> {
    out.write_all(text.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|err| format!("failed to write output: {err}"))
}

fn ask_choice<R: BufRead>(
    answers: &mut Answers<R>,
    out: &mut dyn Write,
) -> Result<Option<MenuChoice>, String> {
    emit(out, output::MAIN_MENU)?;
    emit(out, "\n")?;
    loop {
        emit(out, "CHOICE? ")?;
        let Some(token) = answers.next()? else {
            return Ok(None);
        };
        if let Some(choice) = token.parse().ok().and_then(MenuChoice::from_number) {
            return Ok(Some(choice));
        }
    }
}

fn ask_company<R: BufRead>(
    prompt: &str,
    answers: &mut Answers<R>,
    out: &mut dyn Write,
) -> Result<Option<String>, String> {
    emit(out, prompt)?;
    Ok(answers.next()?.map(|raw| normalize_ticker(&raw)))
}

fn ask_time<R: BufRead>(
    prompt: &str,
    answers: &mut Answers<R>,
    out: &mut dyn Write,
) -> Result<Option<i64>, String> {
    loop {
        emit(out, prompt)?;
        let Some(token) = answers.next()? else {
            return Ok(None);
        };
        if let Ok(time) = token.parse::<i64>() {
            return Ok(Some(time));
        }
    }
}

fn list_transactions<R: BufRead>(
    source: &dyn TransactionSource,
    answers: &mut Answers<R>,
    out: &mut dyn Write,
) -> Result<bool, String> {
    let Some(company) = ask_company("\nWHICH COMPANY? ", answers, out)? else {
        return Ok(false);
    };

    emit(out, "\n")?;
    match queries::transactions_for(source, &company) {
        Ok(records) => emit(out, &output::transaction_listing(&records))?,
        Err(err) => {
            tracing::warn!(error = %err, "cannot list transactions");
            emit(out, &output::missing_file(&source.describe()))?;
            emit(out, "\n")?;
        }
    }
    emit(out, "\n")?;
    Ok(true)
}

fn price_at_time<R: BufRead>(
    source: &dyn TransactionSource,
    answers: &mut Answers<R>,
    out: &mut dyn Write,
) -> Result<bool, String> {
    let Some(company) = ask_company("\nWHICH COMPANY? ", answers, out)? else {
        return Ok(false);
    };
    let Some(time) = ask_time("AT WHAT TIME?  ", answers, out)? else {
        return Ok(false);
    };

    let price = queries::price_of(source, &company, time);
    emit(out, &format!("\n{}\n\n", output::price_at_time(price)))?;
    Ok(true)
}

fn price_change<R: BufRead>(
    source: &dyn TransactionSource,
    answers: &mut Answers<R>,
    out: &mut dyn Write,
) -> Result<bool, String> {
    let Some(company) = ask_company("\nWHICH COMPANY? ", answers, out)? else {
        return Ok(false);
    };
    let Some(t1) = ask_time("AT WHAT START TIME? ", answers, out)? else {
        return Ok(false);
    };
    let Some(t2) = ask_time("AT WHAT END TIME?   ", answers, out)? else {
        return Ok(false);
    };

    let change = queries::price_change(source, &company, t1, t2);
    emit(
        out,
        &format!("\n{}\n\n", output::price_change(change.as_ref())),
    )?;
    Ok(true)
}

fn best_performer<R: BufRead>(
    source: &dyn TransactionSource,
    answers: &mut Answers<R>,
    out: &mut dyn Write,
) -> Result<bool, String> {
    let Some(t1) = ask_time("\nAT WHAT START TIME? ", answers, out)? else {
        return Ok(false);
    };
    let Some(t2) = ask_time("AT WHAT END TIME?   ", answers, out)? else {
        return Ok(false);
    };

    let result = queries::best_performer(source, t1, t2);
    emit(out, &format!("\n{result}\n\n"))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::run_menu;
    use std::io::Cursor;
    use stockledger_domain::services::transaction_source::VecTransactionSource;
    use stockledger_domain::value_objects::transaction::Transaction;
    use stockledger_infrastructure::market_data::transactions_file::FileTransactionSource;

    fn ledger() -> VecTransactionSource {
        VecTransactionSource::new(vec![
            Transaction::new(0, "AAPL", 100.0),
            Transaction::new(0, "AMZN", 200.0),
            Transaction::new(5, "AAPL", 150.0),
            Transaction::new(6, "AMZN", 210.0),
        ])
        .with_label("stocks.txt")
    }

    fn run(script: &str) -> String {
        let mut out = Vec::new();
        run_menu(&ledger(), Cursor::new(script.to_string()), &mut out).expect("menu");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn exit_choice_ends_the_session() {
        let text = run("5\n");
        assert!(text.contains("       MAIN MENU"));
        assert_eq!(text.matches("CHOICE? ").count(), 1);
    }

    #[test]
    fn end_of_input_ends_the_session() {
        let text = run("");
        assert!(text.ends_with("CHOICE? "));
    }

    #[test]
    fn invalid_choices_prompt_again() {
        let text = run("0\nsix\n9\n5\n");
        assert_eq!(text.matches("CHOICE? ").count(), 4);
    }

    #[test]
    fn price_lookup_normalizes_ticker() {
        let text = run("2\naapl\n3\n5\n");
        assert!(text.contains("WHICH COMPANY? AT WHAT TIME?  \nTHE STOCK VALUE AT THAT TIME IS: $100.00\n\n"));
    }

    #[test]
    fn price_lookup_for_unknown_ticker() {
        let text = run("2 zzzz 100 5");
        assert!(text.contains("THERE DOES NOT APPEAR TO BE A STOCK VALUE LISTING FOR THAT COMPANY"));
    }

    #[test]
    fn non_numeric_time_is_asked_again() {
        let text = run("2\nAAPL\nsoon\n5\n5\n");
        assert_eq!(text.matches("AT WHAT TIME?  ").count(), 2);
        assert!(text.contains("$150.00"));
    }

    #[test]
    fn price_change_over_time() {
        let text = run("3\naapl\n0\n5\n5\n");
        assert!(text.contains("THE STARTING STOCK VALUE IS: $100.00"));
        assert!(text.contains("THE ENDING STOCK VALUE IS:   $150.00"));
        assert!(text.contains("THE DIFFERENCE IN PRICE IS:  50.00%"));
    }

    #[test]
    fn best_performer_over_time() {
        let text = run("4\n0\n6\n5\n");
        assert!(text.contains(
            "\nAAPL GAINED THE MOST BETWEEN THESE TIMES, CHANGING FROM 100.00 TO 150.00, A CHANGE OF 50.00%\n\n"
        ));
    }

    #[test]
    fn negative_times_behave_like_time_zero() {
        let text = run("4\n-3\n-1\n5\n");
        assert!(text.contains(
            "AAPL GAINED THE MOST BETWEEN THESE TIMES, CHANGING FROM 100.00 TO 100.00, A CHANGE OF 0.00%"
        ));
    }

    #[test]
    fn missing_ledger_is_reported_by_listing_and_best_performer() {
        let source = FileTransactionSource::new("/tmp/stockledger-menu-missing-ledger.txt");
        let mut out = Vec::new();
        run_menu(&source, Cursor::new("1 aapl 4 0 9 5"), &mut out).expect("menu");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains(
            "/tmp/stockledger-menu-missing-ledger.txt FILE DOES NOT EXIST - PLEASE CHECK YOUR WORKING FOLDER\n"
        ));
        assert!(text.contains("THERE DOES NOT APPEAR TO BE A STOCK VALUE LISTING FOR ANY COMPANY"));
    }

    #[test]
    fn list_transactions_for_company() {
        let text = run("1\namzn\n5\n");
        assert!(text.contains("COMPANY   TIME    VALUE\n-------   ----    -----\n"));
        assert!(text.contains("AMZN         0   200.00\n"));
        assert!(text.contains("AMZN         6   210.00\n"));
        assert!(!text.contains("AAPL         0"));
    }
}

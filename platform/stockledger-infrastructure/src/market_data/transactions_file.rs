use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::str::FromStr;
use stockledger_domain::repositories::transactions::{
    SourceError, TransactionSource, TransactionStream,
};
use stockledger_domain::value_objects::transaction::Transaction;
use tracing::{debug, warn};

/// Plain-text ledger with one `<time> <ticker> <price>` record per line.
#[derive(Debug, Clone)]
pub struct FileTransactionSource {
    path: PathBuf,
}

impl FileTransactionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TransactionSource for FileTransactionSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> Result<TransactionStream<'_>, SourceError> {
        let file = File::open(&self.path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound {
                path: self.path.clone(),
            },
            _ => SourceError::Io {
                path: self.path.clone(),
                source: err,
            },
        })?;
        debug!(path = %self.path.display(), "opened transaction ledger");
        Ok(Box::new(TransactionScanner::new(
            BufReader::new(file),
            self.describe(),
        )))
    }
}

/// Whitespace-token reader over a ledger. Line breaks carry no meaning.
///
/// Numeric fields take the leading number of their token and hand the rest
/// of it to the next field, so `200.0xyz` yields a price of 200.0 and leaves
/// `xyz` to be read as the next time. The scan ends for good at EOF, at a
/// truncated trailing record, or at the first token with no number where one
/// is expected. Prices must be finite and positive.
pub struct TransactionScanner<R> {
    reader: R,
    origin: String,
    pending: VecDeque<String>,
    line_no: usize,
    finished: bool,
}

impl<R: BufRead> TransactionScanner<R> {
    pub fn new(reader: R, origin: impl Into<String>) -> Self {
        Self {
            reader,
            origin: origin.into(),
            pending: VecDeque::new(),
            line_no: 0,
            finished: false,
        }
    }

    fn next_token(&mut self) -> Option<String> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }

            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_no += 1;
                    self.pending
                        .extend(line.split_whitespace().map(str::to_string));
                }
                Err(err) => {
                    warn!(
                        origin = %self.origin,
                        line = self.line_no + 1,
                        error = %err,
                        "failed to read transaction ledger, ending scan"
                    );
                    return None;
                }
            }
        }
    }

    fn scan_record(&mut self) -> Option<Transaction> {
        let time_token = self.next_token()?;
        let Some(time) = self.leading_number::<i64>(&time_token, false) else {
            return self.malformed("time", &time_token);
        };
        let Some(company) = self.next_token() else {
            return self.truncated();
        };
        let Some(price_token) = self.next_token() else {
            return self.truncated();
        };
        let Some(price) = self
            .leading_number::<f64>(&price_token, true)
            .filter(|price| price.is_finite() && *price > 0.0)
        else {
            return self.malformed("price", &price_token);
        };

        Some(Transaction {
            time,
            company,
            price,
        })
    }

    fn leading_number<T: FromStr>(&mut self, token: &str, fraction: bool) -> Option<T> {
        let (number, rest) = split_number(token, fraction)?;
        let value = number.parse().ok()?;
        if !rest.is_empty() {
            self.pending.push_front(rest.to_string());
        }
        Some(value)
    }

    fn malformed(&self, field: &str, token: &str) -> Option<Transaction> {
        metrics::counter!("stockledger.scanner.malformed_records").increment(1);
        debug!(
            origin = %self.origin,
            line = self.line_no,
            field,
            token,
            "unparseable ledger field, ending scan"
        );
        None
    }

    fn truncated(&self) -> Option<Transaction> {
        debug!(
            origin = %self.origin,
            line = self.line_no,
            "truncated trailing ledger record, ending scan"
        );
        None
    }
}

/// Splits `token` after its leading number: an optional sign and digits, plus
/// a fractional part and exponent when `fraction` is set.
fn split_number(token: &str, fraction: bool) -> Option<(&str, &str)> {
    let bytes = token.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut digits = digits_from(end);
    end += digits;

    if fraction {
        if bytes.get(end) == Some(&b'.') {
            let fractional = digits_from(end + 1);
            digits += fractional;
            end += 1 + fractional;
        }
        if digits > 0 && matches!(bytes.get(end), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
            let exponent = digits_from(end + 1 + sign);
            if exponent > 0 {
                end += 1 + sign + exponent;
            }
        }
    }

    (digits > 0).then(|| token.split_at(end))
}

impl<R: BufRead> Iterator for TransactionScanner<R> {
    type Item = Transaction;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let record = self.scan_record();
        if record.is_none() {
            self.finished = true;
        }
        record
    }
}

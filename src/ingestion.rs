use std::io::Read;
use std::pin::Pin;
use std::str::FromStr;

use futures::stream::{self, Stream};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::traits::CommandStream;
use crate::domain::{AccountClass, AccountId, Amount, Command, CommandKind, Error};

pub struct CsvReader<R: Read> {
    reader: Option<csv::Reader<R>>,
}

impl<R: Read> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        Self { reader: Some(rdr) }
    }
}

/// Internal shape used only for CSV deserialization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "type")]
    kind: String,
    account: u32,
    class: Option<String>,
    amount: Option<String>,
}

impl TryFrom<CsvRow> for Command {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        let amount = row.amount.as_deref().unwrap_or("");

        let kind = match row.kind.to_ascii_lowercase().as_str() {
            "open" => {
                let class = row
                    .class
                    .as_deref()
                    .ok_or_else(|| Error::Ingestion("open requires an account class".to_string()))?
                    .parse::<AccountClass>()?;
                let opening_balance = if amount.is_empty() {
                    Decimal::ZERO
                } else {
                    Decimal::from_str(amount).map_err(|e| {
                        Error::Ingestion(format!("Invalid opening balance {:?}: {}", amount, e))
                    })?
                };
                CommandKind::Open {
                    class,
                    opening_balance,
                }
            }
            "deposit" => CommandKind::Deposit {
                amount: Amount::from_decimal_str(amount)?,
            },
            "withdrawal" => CommandKind::Withdrawal {
                amount: Amount::from_decimal_str(amount)?,
            },
            other => {
                return Err(Error::Ingestion(format!(
                    "Invalid command type: {}",
                    other
                )));
            }
        };

        Ok(Command {
            kind,
            account_id: AccountId(row.account),
        })
    }
}

impl<R: Read + Send + 'static> CommandStream for CsvReader<R> {
    type CmdStream = Pin<Box<dyn Stream<Item = Result<Command, Error>> + Send>>;

    fn stream(&mut self) -> Self::CmdStream {
        // Already consumed readers yield nothing.
        let reader = match self.reader.take() {
            Some(r) => r,
            None => return Box::pin(stream::empty::<Result<Command, Error>>()),
        };

        let iter = reader
            .into_deserialize::<CsvRow>()
            .map(|row_res| match row_res {
                Ok(row) => Command::try_from(row),
                Err(e) => Err(Error::Ingestion(format!(
                    "CSV deserialization error: {}",
                    e
                ))),
            });

        Box::pin(stream::iter(iter))
    }
}

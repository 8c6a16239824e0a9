use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::Error;

/// A strictly positive monetary amount requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, Error> {
        if value <= Decimal::ZERO {
            return Err(Error::InvalidAmount(format!(
                "{} is not a positive amount",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn from_decimal_str(s: &str) -> Result<Self, Error> {
        let s = s.trim();

        if s.is_empty() {
            return Err(Error::InvalidAmount("missing amount".to_string()));
        }
        let value = Decimal::from_str(s)
            .map_err(|e| Error::InvalidAmount(format!("{:?}: {}", s, e)))?;
        Self::new(value)
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

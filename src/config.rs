use std::{env, str::FromStr};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::Error;

pub const LIMIT_VAR: &str = "OVERDRAFT_LIMIT";
pub const FEE_VAR: &str = "OVERDRAFT_FEE";

/// Overdraft terms handed to the balance authority at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverdraftPolicy {
    /// Deepest a premium checking balance may go, inclusive, before the fee.
    pub limit: Decimal,
    /// Flat charge taken once when a withdrawal first drives a balance negative.
    pub fee: Decimal,
}

impl Default for OverdraftPolicy {
    fn default() -> Self {
        Self {
            limit: dec!(500.00),
            fee: dec!(35.00),
        }
    }
}

impl OverdraftPolicy {
    pub fn new(limit: Decimal, fee: Decimal) -> Result<Self, Error> {
        if limit < Decimal::ZERO {
            return Err(Error::Config(format!(
                "overdraft limit must not be negative, got {}",
                limit
            )));
        }
        if fee < Decimal::ZERO {
            return Err(Error::Config(format!(
                "overdraft fee must not be negative, got {}",
                fee
            )));
        }
        Ok(Self { limit, fee })
    }

    /// Reads `OVERDRAFT_LIMIT` and `OVERDRAFT_FEE`, keeping the default for unset variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let limit = read_decimal(&lookup, LIMIT_VAR)?.unwrap_or(defaults.limit);
        let fee = read_decimal(&lookup, FEE_VAR)?.unwrap_or(defaults.fee);
        Self::new(limit, fee)
    }
}

fn read_decimal<F>(lookup: &F, key: &str) -> Result<Option<Decimal>, Error>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => Decimal::from_str(raw.trim())
            .map(Some)
            .map_err(|e| Error::Config(format!("{}={:?}: {}", key, raw, e))),
    }
}

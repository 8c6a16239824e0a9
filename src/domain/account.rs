use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(pub u32);

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product line of an account. Only premium checking carries an overdraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountClass {
    Standard,
    Checking,
    PremiumChecking,
    Savings,
}

impl AccountClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountClass::Standard => "STANDARD",
            AccountClass::Checking => "CHECKING",
            AccountClass::PremiumChecking => "PREMIUM_CHECKING",
            AccountClass::Savings => "SAVINGS",
        }
    }
}

impl core::fmt::Display for AccountClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STANDARD" => Ok(AccountClass::Standard),
            "CHECKING" => Ok(AccountClass::Checking),
            "PREMIUM_CHECKING" => Ok(AccountClass::PremiumChecking),
            "SAVINGS" => Ok(AccountClass::Savings),
            other => Err(Error::Ingestion(format!("Unknown account class: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub balance: Decimal,
    pub class: AccountClass,
}

impl Account {
    pub fn new(id: AccountId, balance: Decimal, class: AccountClass) -> Self {
        Self { id, balance, class }
    }

    /// Same account, different balance. Snapshots are replaced, never patched in place.
    pub fn with_balance(&self, balance: Decimal) -> Self {
        Self {
            balance,
            ..self.clone()
        }
    }
}

use rust_decimal::Decimal;

use crate::domain::{AccountClass, AccountId, Amount};

#[derive(Debug, Clone, Copy)]
pub enum CommandKind {
    Open {
        class: AccountClass,
        opening_balance: Decimal,
    },
    Deposit {
        amount: Amount,
    },
    Withdrawal {
        amount: Amount,
    },
}

#[derive(Debug, Clone)]
pub struct Command {
    pub kind: CommandKind,
    pub account_id: AccountId,
}

impl core::fmt::Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            CommandKind::Open {
                class,
                opening_balance,
            } => write!(
                f,
                "open,account={},class={},balance={}",
                self.account_id, class, opening_balance
            ),
            CommandKind::Deposit { amount } => {
                write!(f, "deposit,account={},amount={}", self.account_id, amount)
            }
            CommandKind::Withdrawal { amount } => {
                write!(f, "withdrawal,account={},amount={}", self.account_id, amount)
            }
        }
    }
}

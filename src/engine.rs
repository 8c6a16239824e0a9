use std::io::Write;

use rust_decimal::Decimal;

use crate::domain::{
    Account, AccountId, Amount, BalanceAuthority, Command, CommandKind, Error,
    traits::{AccountStore, CommandStream, DeadLetterQueue},
};

use futures::StreamExt;

/// Account service: every operation is a fetch, a pure evaluation and a persist.
///
/// Mutating methods take `&mut self`, so no two read-modify-write cycles on the
/// store can interleave.
#[derive(Debug)]
pub struct Engine<I, S, D>
where
    I: CommandStream,
    S: AccountStore,
    D: DeadLetterQueue,
{
    ingestion: I,
    store: S,
    authority: BalanceAuthority,
    dlq: D,
}

impl<I, S, D> Engine<I, S, D>
where
    I: CommandStream,
    S: AccountStore,
    D: DeadLetterQueue,
{
    pub fn new(ingestion: I, store: S, authority: BalanceAuthority, dlq: D) -> Self {
        Self {
            ingestion,
            store,
            authority,
            dlq,
        }
    }

    pub async fn process(&mut self) -> Result<(), Error> {
        let mut res = self.ingestion.stream();

        while let Some(cmd) = res.next().await {
            match cmd {
                Ok(cmd) => match self.apply_command(&cmd) {
                    Ok(account) => {
                        tracing::debug!(
                            command = %cmd,
                            balance = %account.balance,
                            "command applied"
                        )
                    }
                    Err(e) => self.dlq.report(&e),
                },
                Err(e) => self.dlq.report(&e),
            }
        }

        Ok(())
    }

    fn apply_command(&mut self, cmd: &Command) -> Result<Account, Error> {
        match cmd.kind {
            CommandKind::Open {
                class,
                opening_balance,
            } => self.open(Account::new(cmd.account_id, opening_balance, class)),
            CommandKind::Deposit { amount } => self.deposit(cmd.account_id, amount),
            CommandKind::Withdrawal { amount } => self.withdraw(cmd.account_id, amount),
        }
    }

    pub fn open(&mut self, account: Account) -> Result<Account, Error> {
        let account = self.store.open(account)?;
        tracing::info!(
            account = %account.id,
            class = %account.class,
            balance = %account.balance,
            "account opened"
        );
        Ok(account)
    }

    pub fn withdraw(&mut self, id: AccountId, amount: Amount) -> Result<Account, Error> {
        let account = self.store.fetch(id)?;
        let outcome = self.authority.evaluate_withdrawal(&account, amount)?;

        if let Some(fee) = outcome.fee {
            tracing::info!(account = %id, %fee, "overdraft fee charged");
        }

        let persisted = self.store.persist(outcome.account);
        tracing::info!(account = %id, %amount, balance = %persisted.balance, "withdrawal applied");
        Ok(persisted)
    }

    pub fn deposit(&mut self, id: AccountId, amount: Amount) -> Result<Account, Error> {
        let account = self.store.fetch(id)?;
        let updated = self.authority.evaluate_deposit(&account, amount)?;

        let persisted = self.store.persist(updated);
        tracing::info!(account = %id, %amount, balance = %persisted.balance, "deposit applied");
        Ok(persisted)
    }

    pub fn get_account(&self, id: AccountId) -> Result<Account, Error> {
        self.store.fetch(id)
    }

    pub fn overdraft_limit(&self, id: AccountId) -> Result<Decimal, Error> {
        let account = self.store.fetch(id)?;
        Ok(self.authority.overdraft_limit(&account))
    }

    /// Writes `account,class,balance,overdraft_limit` rows in account order.
    pub fn flush<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        writeln!(out, "account,class,balance,overdraft_limit")?;
        for account in self.store.accounts() {
            writeln!(
                out,
                "{},{},{},{}",
                account.id,
                account.class,
                Cents(account.balance),
                Cents(self.authority.overdraft_limit(&account))
            )?;
        }
        Ok(())
    }
}

/// At least two decimal places, never rounded.
struct Cents(Decimal);

impl core::fmt::Display for Cents {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.0.scale() < 2 {
            // Padding only, the value is unchanged.
            write!(f, "{:.2}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

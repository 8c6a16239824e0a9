use futures::Stream;

use crate::domain::{Account, AccountId, Command, Error};

pub trait CommandStream {
    type CmdStream: Stream<Item = Result<Command, Error>> + Send + Unpin + 'static;
    fn stream(&mut self) -> Self::CmdStream;
}

pub trait DeadLetterQueue {
    fn report(&self, error: &Error);
}

/// Snapshot storage for accounts.
///
/// Callers serialize fetch/persist pairs per account; implementations only
/// need to make each call atomic on its own.
pub trait AccountStore {
    fn fetch(&self, id: AccountId) -> Result<Account, Error>;

    fn persist(&mut self, account: Account) -> Account;

    fn open(&mut self, account: Account) -> Result<Account, Error>;

    fn accounts(&self) -> Vec<Account>;
}

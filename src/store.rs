use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::domain::{Account, AccountId, AccountStore, Error};

#[derive(Default, Debug)]
pub struct InMemoryAccountStore {
    accounts: BTreeMap<AccountId, Account>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
        }
    }
}

impl AccountStore for InMemoryAccountStore {
    fn fetch(&self, id: AccountId) -> Result<Account, Error> {
        self.accounts
            .get(&id)
            .cloned()
            .ok_or(Error::AccountNotFound(id))
    }

    fn persist(&mut self, account: Account) -> Account {
        self.accounts.insert(account.id, account.clone());
        account
    }

    fn open(&mut self, account: Account) -> Result<Account, Error> {
        match self.accounts.entry(account.id) {
            Entry::Vacant(e) => Ok(e.insert(account).clone()),
            Entry::Occupied(_) => Err(Error::AccountExists(account.id)),
        }
    }

    fn accounts(&self) -> Vec<Account> {
        self.accounts.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::AccountClass;

    #[test]
    fn fetch_unknown_account_is_not_found() {
        let store = InMemoryAccountStore::new();
        let err = store.fetch(AccountId(7)).unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(AccountId(7))));
    }

    #[test]
    fn persist_replaces_snapshot() {
        let mut store = InMemoryAccountStore::new();
        let acc = Account::new(AccountId(1), dec!(10.00), AccountClass::Standard);
        store.open(acc.clone()).unwrap();

        store.persist(acc.with_balance(dec!(4.50)));

        assert_eq!(store.fetch(AccountId(1)).unwrap().balance, dec!(4.50));
    }

    #[test]
    fn open_twice_is_rejected_and_keeps_first_snapshot() {
        let mut store = InMemoryAccountStore::new();
        store
            .open(Account::new(AccountId(1), dec!(10.00), AccountClass::Standard))
            .unwrap();

        let err = store
            .open(Account::new(AccountId(1), dec!(99.00), AccountClass::Savings))
            .unwrap_err();

        assert!(matches!(err, Error::AccountExists(AccountId(1))));
        assert_eq!(store.fetch(AccountId(1)).unwrap().balance, dec!(10.00));
    }

    #[test]
    fn accounts_are_listed_in_id_order() {
        let mut store = InMemoryAccountStore::new();
        for id in [3, 1, 2] {
            store
                .open(Account::new(AccountId(id), dec!(0), AccountClass::Checking))
                .unwrap();
        }
        let ids: Vec<_> = store.accounts().into_iter().map(|a| a.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}

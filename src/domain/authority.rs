use rust_decimal::Decimal;

use crate::config::OverdraftPolicy;
use crate::domain::{Account, AccountClass, Amount, Rejection};

/// Result of a permitted withdrawal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    pub account: Account,
    /// Overdraft fee taken on top of the amount, if any.
    pub fee: Option<Decimal>,
}

/// Decides withdrawals and deposits against an account snapshot.
///
/// Holds no state besides the policy: every call is a pure function of the
/// snapshot and the requested amount, and the caller persists the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceAuthority {
    policy: OverdraftPolicy,
}

impl BalanceAuthority {
    pub fn new(policy: OverdraftPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &OverdraftPolicy {
        &self.policy
    }

    pub fn evaluate_withdrawal(
        &self,
        account: &Account,
        amount: Amount,
    ) -> Result<Withdrawal, Rejection> {
        let new_balance = account
            .balance
            .checked_sub(amount.value())
            .ok_or(Rejection::BalanceOverflow {
                balance: account.balance,
                requested: amount.value(),
            })?;

        let permitted = match account.class {
            // Inclusive: landing exactly on -limit is allowed.
            AccountClass::PremiumChecking => new_balance >= -self.policy.limit,
            AccountClass::Standard | AccountClass::Checking | AccountClass::Savings => {
                new_balance >= Decimal::ZERO
            }
        };

        if !permitted {
            return Err(match account.class {
                AccountClass::PremiumChecking => Rejection::OverdraftLimitExceeded {
                    limit: self.policy.limit,
                    requested: amount.value(),
                },
                _ => Rejection::InsufficientFunds {
                    balance: account.balance,
                    requested: amount.value(),
                },
            });
        }

        if !self.fee_applies(new_balance) {
            return Ok(Withdrawal {
                account: account.with_balance(new_balance),
                fee: None,
            });
        }

        // The fee is a penalty and may land below -limit.
        let final_balance =
            new_balance
                .checked_sub(self.policy.fee)
                .ok_or(Rejection::BalanceOverflow {
                    balance: account.balance,
                    requested: amount.value(),
                })?;

        Ok(Withdrawal {
            account: account.with_balance(final_balance),
            fee: Some(self.policy.fee),
        })
    }

    /// Deposits carry no fee and no business rejection; only leaving the
    /// representable decimal range fails.
    pub fn evaluate_deposit(
        &self,
        account: &Account,
        amount: Amount,
    ) -> Result<Account, Rejection> {
        account
            .balance
            .checked_add(amount.value())
            .map(|balance| account.with_balance(balance))
            .ok_or(Rejection::BalanceOverflow {
                balance: account.balance,
                requested: amount.value(),
            })
    }

    pub fn overdraft_limit(&self, account: &Account) -> Decimal {
        match account.class {
            AccountClass::PremiumChecking => self.policy.limit,
            AccountClass::Standard | AccountClass::Checking | AccountClass::Savings => {
                Decimal::ZERO
            }
        }
    }

    /// A permitted withdrawal that leaves the balance negative is charged the fee,
    /// whether or not the account was already overdrawn.
    pub fn fee_applies(&self, new_balance: Decimal) -> bool {
        new_balance < Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::AccountId;

    fn account(balance: Decimal, class: AccountClass) -> Account {
        Account::new(AccountId(1), balance, class)
    }

    fn amount(value: Decimal) -> Amount {
        Amount::new(value).unwrap()
    }

    #[test]
    fn premium_withdrawal_to_exact_limit_succeeds_and_charges_fee() {
        let authority = BalanceAuthority::default();
        let acc = account(dec!(1000.00), AccountClass::PremiumChecking);

        let outcome = authority
            .evaluate_withdrawal(&acc, amount(dec!(1500.00)))
            .unwrap();

        assert_eq!(outcome.account.balance, dec!(-535.00));
        assert_eq!(outcome.fee, Some(dec!(35.00)));
        assert_eq!(outcome.account.id, acc.id);
        assert_eq!(outcome.account.class, AccountClass::PremiumChecking);
    }

    #[test]
    fn premium_withdrawal_one_cent_past_limit_is_rejected() {
        let authority = BalanceAuthority::default();
        let acc = account(dec!(1000.00), AccountClass::PremiumChecking);

        let err = authority
            .evaluate_withdrawal(&acc, amount(dec!(1500.01)))
            .unwrap_err();

        assert_eq!(
            err,
            Rejection::OverdraftLimitExceeded {
                limit: dec!(500.00),
                requested: dec!(1500.01),
            }
        );
        assert!(err.to_string().contains("overdraft limit of 500.00"));
        assert_eq!(acc.balance, dec!(1000.00));
    }

    #[test]
    fn standard_withdrawal_into_negative_is_insufficient_funds() {
        let authority = BalanceAuthority::default();
        let acc = account(dec!(1000.00), AccountClass::Standard);

        let err = authority
            .evaluate_withdrawal(&acc, amount(dec!(1500.00)))
            .unwrap_err();

        assert!(matches!(err, Rejection::InsufficientFunds { .. }));
        assert!(err.to_string().contains("Insufficient funds"));
    }

    #[test]
    fn standard_withdrawal_within_balance_has_no_fee() {
        let authority = BalanceAuthority::default();
        let acc = account(dec!(1000.00), AccountClass::Standard);

        let outcome = authority
            .evaluate_withdrawal(&acc, amount(dec!(500.00)))
            .unwrap();

        assert_eq!(outcome.account.balance, dec!(500.00));
        assert_eq!(outcome.fee, None);
    }

    #[test]
    fn withdrawal_to_exactly_zero_succeeds_without_fee_for_every_class() {
        let authority = BalanceAuthority::default();
        for class in [
            AccountClass::Standard,
            AccountClass::Checking,
            AccountClass::PremiumChecking,
            AccountClass::Savings,
        ] {
            let acc = account(dec!(200.00), class);
            let outcome = authority
                .evaluate_withdrawal(&acc, amount(dec!(200.00)))
                .unwrap();
            assert_eq!(outcome.account.balance, Decimal::ZERO, "{class}");
            assert_eq!(outcome.fee, None, "{class}");
        }
    }

    #[test]
    fn savings_and_checking_never_overdraw() {
        let authority = BalanceAuthority::default();
        for class in [AccountClass::Savings, AccountClass::Checking] {
            let acc = account(dec!(10.00), class);
            let err = authority
                .evaluate_withdrawal(&acc, amount(dec!(10.01)))
                .unwrap_err();
            assert!(matches!(err, Rejection::InsufficientFunds { .. }), "{class}");
        }
    }

    #[test]
    fn going_into_overdraft_charges_fee_once() {
        let authority = BalanceAuthority::default();
        let acc = account(dec!(0.00), AccountClass::PremiumChecking);

        let outcome = authority
            .evaluate_withdrawal(&acc, amount(dec!(0.01)))
            .unwrap();

        assert_eq!(outcome.account.balance, dec!(-35.01));
    }

    #[test]
    fn every_withdrawal_ending_negative_is_charged() {
        let authority = BalanceAuthority::default();
        let acc = account(dec!(-100.00), AccountClass::PremiumChecking);

        let outcome = authority
            .evaluate_withdrawal(&acc, amount(dec!(50.00)))
            .unwrap();

        assert_eq!(outcome.account.balance, dec!(-185.00));
        assert_eq!(outcome.fee, Some(dec!(35.00)));
    }

    #[test]
    fn consecutive_overdrawn_withdrawals_are_each_charged() {
        let authority = BalanceAuthority::default();
        let acc = account(dec!(0), AccountClass::PremiumChecking);

        let first = authority
            .evaluate_withdrawal(&acc, amount(dec!(10)))
            .unwrap()
            .account;
        let second = authority
            .evaluate_withdrawal(&first, amount(dec!(10)))
            .unwrap()
            .account;

        assert_eq!(first.balance, dec!(-45.00));
        assert_eq!(second.balance, dec!(-90.00));
    }

    #[test]
    fn fee_may_push_balance_below_limit() {
        let authority = BalanceAuthority::default();
        let acc = account(dec!(0.00), AccountClass::PremiumChecking);

        let outcome = authority
            .evaluate_withdrawal(&acc, amount(dec!(500.00)))
            .unwrap();

        assert_eq!(outcome.account.balance, dec!(-535.00));
        assert!(outcome.account.balance < -authority.overdraft_limit(&acc));
    }

    #[test]
    fn deposits_add_exactly_and_never_charge() {
        let authority = BalanceAuthority::default();
        let acc = account(dec!(-535.00), AccountClass::PremiumChecking);

        let updated = authority
            .evaluate_deposit(&acc, amount(dec!(35.01)))
            .unwrap();

        assert_eq!(updated.balance, dec!(-499.99));
    }

    #[test]
    fn deposit_past_decimal_range_is_rejected_not_panicking() {
        let authority = BalanceAuthority::default();
        let acc = account(Decimal::MAX, AccountClass::Standard);

        let err = authority.evaluate_deposit(&acc, amount(dec!(1))).unwrap_err();

        assert!(matches!(err, Rejection::BalanceOverflow { .. }));
    }

    #[test]
    fn withdrawal_past_decimal_range_is_rejected_not_panicking() {
        let authority = BalanceAuthority::default();
        let acc = account(Decimal::MIN, AccountClass::PremiumChecking);

        let err = authority
            .evaluate_withdrawal(&acc, amount(dec!(1)))
            .unwrap_err();

        assert!(matches!(err, Rejection::BalanceOverflow { .. }));
    }

    #[test]
    fn overdraft_limit_is_only_granted_to_premium_checking() {
        let authority = BalanceAuthority::default();

        assert_eq!(
            authority.overdraft_limit(&account(dec!(1000.00), AccountClass::PremiumChecking)),
            dec!(500.00)
        );
        for class in [AccountClass::Standard, AccountClass::Checking, AccountClass::Savings] {
            assert_eq!(authority.overdraft_limit(&account(dec!(2000.00), class)), dec!(0.00));
        }
    }

    #[test]
    fn alternate_policy_moves_the_boundary() {
        let policy = OverdraftPolicy::new(dec!(100.00), dec!(10.00)).unwrap();
        let authority = BalanceAuthority::new(policy);
        let acc = account(dec!(50.00), AccountClass::PremiumChecking);

        let outcome = authority
            .evaluate_withdrawal(&acc, amount(dec!(150.00)))
            .unwrap();
        assert_eq!(outcome.account.balance, dec!(-110.00));

        let err = authority
            .evaluate_withdrawal(&acc, amount(dec!(150.01)))
            .unwrap_err();
        assert!(matches!(
            err,
            Rejection::OverdraftLimitExceeded { limit, .. } if limit == dec!(100.00)
        ));
    }
}

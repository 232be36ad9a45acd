use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::{
    account::Account,
    error::{Error, Result},
};

pub type AccountId = u32;

/// The ledger: an id-keyed collection that exclusively owns every [`Account`].
///
/// Every mutating operation takes `&mut self`, so single-writer access per
/// bank value is enforced by the borrow checker; callers that need to share a
/// bank across threads wrap it in a `Mutex`. [`Bank::transfer`] runs both of
/// its legs inside one exclusive borrow, so no intermediate state is ever
/// observable and no lock-ordering rule is needed.
#[derive(Debug, Default)]
pub struct Bank {
    accounts: HashMap<AccountId, Account>,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new account under `id`.
    ///
    /// An id already in use is never reassigned; the existing account is left
    /// untouched. Name, password and initial balance are accepted verbatim,
    /// a negative opening balance included.
    pub fn create_account(
        &mut self,
        id: AccountId,
        name: impl Into<String>,
        password: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<()> {
        if self.accounts.contains_key(&id) {
            return Err(Error::DuplicateId { id });
        }

        self.accounts
            .insert(id, Account::new(name, password, initial_balance));
        info!(id, "account created");
        Ok(())
    }

    /// Deposits require no password.
    pub fn deposit(&mut self, id: AccountId, amount: Decimal) -> Result<()> {
        let account = self.accounts.get_mut(&id).ok_or(Error::NotFound { id })?;

        account.deposit(amount);
        debug!(id, %amount, "deposit applied");
        Ok(())
    }

    pub fn withdraw(&mut self, id: AccountId, amount: Decimal, password: &str) -> Result<()> {
        let account = self.authenticated(id, password)?;

        account.withdraw(amount)?;
        debug!(id, %amount, "withdrawal applied");
        Ok(())
    }

    /// Move `amount` from `source` to `target`, authenticated against the
    /// source account.
    ///
    /// Both accounts must exist before either is touched. The source is
    /// verified and debited first; the target deposit cannot fail, so the
    /// pair either fully applies or leaves both balances unchanged.
    pub fn transfer(
        &mut self,
        source: AccountId,
        target: AccountId,
        amount: Decimal,
        password: &str,
    ) -> Result<()> {
        if !self.accounts.contains_key(&target) {
            return Err(Error::NotFound { id: target });
        }

        self.authenticated(source, password)?.withdraw(amount)?;

        // presence was checked before the source leg committed
        let receiver = self
            .accounts
            .get_mut(&target)
            .ok_or(Error::NotFound { id: target })?;
        receiver.deposit(amount);

        debug!(source, target, %amount, "transfer applied");
        Ok(())
    }

    pub fn change_account_name(
        &mut self,
        id: AccountId,
        new_name: impl Into<String>,
        password: &str,
    ) -> Result<()> {
        self.authenticated(id, password)?.change_name(new_name);
        debug!(id, "account renamed");
        Ok(())
    }

    pub fn change_account_password(
        &mut self,
        id: AccountId,
        new_password: impl Into<String>,
        current_password: &str,
    ) -> Result<()> {
        self.authenticated(id, current_password)?
            .change_password(new_password);
        debug!(id, "account password changed");
        Ok(())
    }

    /// Status lookup. Unlike the mutating operations, a miss here is the one
    /// failure callers are expected to report distinctly.
    pub fn account(&self, id: AccountId) -> Result<&Account> {
        self.accounts.get(&id).ok_or(Error::NotFound { id })
    }

    fn authenticated(&mut self, id: AccountId, password: &str) -> Result<&mut Account> {
        let account = self.accounts.get_mut(&id).ok_or(Error::NotFound { id })?;

        if !account.verify_password(password) {
            warn!(id, "password mismatch");
            return Err(Error::AuthFailed { id });
        }

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn bank_with_ana() -> Bank {
        let mut bank = Bank::new();
        bank.create_account(1, "Ana", "pw1", dec!(100)).unwrap();
        bank
    }

    #[test]
    fn duplicate_id_leaves_existing_account_untouched() {
        let mut bank = bank_with_ana();

        let err = bank.create_account(1, "Bob", "pw2", dec!(50)).unwrap_err();
        assert_eq!(err, Error::DuplicateId { id: 1 });

        let account = bank.account(1).unwrap();
        assert_eq!(account.name(), "Ana");
        assert_eq!(account.balance(), dec!(100));
    }

    #[test]
    fn negative_opening_balances_are_accepted_verbatim() {
        let mut bank = Bank::new();

        bank.create_account(1, "Ana", "pw", dec!(-25)).unwrap();
        assert_eq!(bank.account(1).unwrap().balance(), dec!(-25));

        // negative deposits keep driving the balance down
        bank.deposit(1, dec!(-5)).unwrap();
        assert_eq!(bank.account(1).unwrap().balance(), dec!(-30));
    }

    #[test]
    fn deposit_needs_no_password() {
        let mut bank = bank_with_ana();

        bank.deposit(1, dec!(50)).unwrap();
        assert_eq!(bank.account(1).unwrap().balance(), dec!(150));

        assert_eq!(
            bank.deposit(99, dec!(1)).unwrap_err(),
            Error::NotFound { id: 99 }
        );
    }

    #[test]
    fn withdraw_checks_id_password_and_funds() {
        let mut bank = bank_with_ana();

        assert_eq!(
            bank.withdraw(99, dec!(10), "pw1").unwrap_err(),
            Error::NotFound { id: 99 }
        );
        assert_eq!(
            bank.withdraw(1, dec!(10), "wrong").unwrap_err(),
            Error::AuthFailed { id: 1 }
        );
        assert_eq!(
            bank.withdraw(1, dec!(200), "pw1").unwrap_err(),
            Error::InsufficientFunds {
                requested: dec!(200),
                available: dec!(100),
            }
        );
        assert_eq!(bank.account(1).unwrap().balance(), dec!(100));

        bank.withdraw(1, dec!(100), "pw1").unwrap();
        assert_eq!(bank.account(1).unwrap().balance(), Decimal::ZERO);
    }

    #[test]
    fn transfer_moves_funds_and_conserves_the_total() {
        let mut bank = bank_with_ana();
        bank.create_account(2, "Carl", "pw3", dec!(0)).unwrap();

        bank.transfer(1, 2, dec!(100), "pw1").unwrap();
        assert_eq!(bank.account(1).unwrap().balance(), Decimal::ZERO);
        assert_eq!(bank.account(2).unwrap().balance(), dec!(100));
    }

    #[test]
    fn failed_transfer_changes_neither_balance() {
        let mut bank = bank_with_ana();
        bank.create_account(2, "Carl", "pw3", dec!(20)).unwrap();

        assert_eq!(
            bank.transfer(1, 99, dec!(10), "pw1").unwrap_err(),
            Error::NotFound { id: 99 }
        );
        assert_eq!(
            bank.transfer(99, 2, dec!(10), "pw1").unwrap_err(),
            Error::NotFound { id: 99 }
        );
        assert_eq!(
            bank.transfer(1, 2, dec!(10), "wrongpw").unwrap_err(),
            Error::AuthFailed { id: 1 }
        );
        assert_eq!(
            bank.transfer(1, 2, dec!(500), "pw1").unwrap_err(),
            Error::InsufficientFunds {
                requested: dec!(500),
                available: dec!(100),
            }
        );

        assert_eq!(bank.account(1).unwrap().balance(), dec!(100));
        assert_eq!(bank.account(2).unwrap().balance(), dec!(20));
    }

    #[test]
    fn metadata_changes_require_the_current_password() {
        let mut bank = bank_with_ana();

        assert_eq!(
            bank.change_account_name(1, "Anna", "nope").unwrap_err(),
            Error::AuthFailed { id: 1 }
        );
        assert_eq!(bank.account(1).unwrap().name(), "Ana");

        bank.change_account_name(1, "Anna", "pw1").unwrap();
        assert_eq!(bank.account(1).unwrap().name(), "Anna");

        bank.change_account_password(1, "pw2", "pw1").unwrap();
        assert_eq!(
            bank.withdraw(1, dec!(10), "pw1").unwrap_err(),
            Error::AuthFailed { id: 1 }
        );
        bank.withdraw(1, dec!(10), "pw2").unwrap();
    }

    #[test]
    fn status_lookup_distinguishes_not_found() {
        let bank = bank_with_ana();

        assert_eq!(bank.account(99).unwrap_err(), Error::NotFound { id: 99 });

        let account = bank.account(1).unwrap();
        assert_eq!(account.name(), "Ana");
        assert_eq!(account.balance(), dec!(100));
    }

    // the walk-through scenario: create, deposit, failed withdrawal,
    // transfer, failed transfer, status miss
    #[test]
    fn full_session_walkthrough() {
        let mut bank = Bank::new();

        bank.create_account(1, "Ana", "pw1", dec!(100.0)).unwrap();
        assert!(bank.create_account(1, "Bob", "pw2", dec!(50.0)).is_err());

        bank.deposit(1, dec!(50.0)).unwrap();
        assert_eq!(bank.account(1).unwrap().balance(), dec!(150.0));

        assert!(bank.withdraw(1, dec!(200.0), "pw1").is_err());
        assert_eq!(bank.account(1).unwrap().balance(), dec!(150.0));

        bank.create_account(2, "Carl", "pw3", dec!(0.0)).unwrap();
        bank.transfer(1, 2, dec!(100.0), "pw1").unwrap();
        assert_eq!(bank.account(1).unwrap().balance(), dec!(50.0));
        assert_eq!(bank.account(2).unwrap().balance(), dec!(100.0));

        assert!(bank.transfer(1, 2, dec!(10.0), "wrongpw").is_err());
        assert_eq!(bank.account(1).unwrap().balance(), dec!(50.0));
        assert_eq!(bank.account(2).unwrap().balance(), dec!(100.0));

        assert_eq!(bank.account(99).unwrap_err(), Error::NotFound { id: 99 });
    }
}

use rust_decimal::Decimal;

use super::error::{Error, Result};

/// A single named, password-protected balance record.
///
/// The account id lives in the [`Bank`](super::bank::Bank) map key, not here.
/// Passwords are stored and compared as plaintext, which is the historical
/// contract of this system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    name: String,
    password: String,
    balance: Decimal,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        password: impl Into<String>,
        initial_balance: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            balance: initial_balance,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Exact string equality, nothing more.
    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// Unconditional overwrite, empty names included.
    pub fn change_name(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
    }

    /// Unconditional overwrite, no strength requirements.
    pub fn change_password(&mut self, new_password: impl Into<String>) {
        self.password = new_password.into();
    }

    /// Adds `amount` to the balance regardless of sign: a negative deposit
    /// reduces the balance.
    pub fn deposit(&mut self, amount: Decimal) {
        self.balance += amount;
    }

    /// Removes `amount` from the balance iff it is fully covered; withdrawing
    /// the exact balance leaves zero. The balance is untouched on failure.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<()> {
        if amount > self.balance {
            return Err(Error::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }

        self.balance -= amount;
        Ok(())
    }
}

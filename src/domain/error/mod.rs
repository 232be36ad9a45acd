use rust_decimal::Decimal;
use thiserror::Error;

use super::bank::AccountId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("account id {id} is already in use")]
    DuplicateId { id: AccountId },
    #[error("no account with id {id}")]
    NotFound { id: AccountId },
    #[error("password does not match for account {id}")]
    AuthFailed { id: AccountId },
    #[error("requested {requested} but only {available} is available")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

use std::fmt;

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Unique, non-empty name identifying an account
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub fn parse(raw: impl Into<String>) -> AccountResult<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(AccountError::EmptyUsername);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = AccountError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse classification of ledger failures, for callers that map them onto
/// transport-level responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    AlreadyExists,
    NotFound,
    InsufficientFunds,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("Username {0} already exists")]
    AlreadyExists(Username),

    #[error("Account {0} not found")]
    NotFound(Username),

    #[error("Destination user {0} not found")]
    DestinationNotFound(Username),

    #[error(
        "You cannot transfer {requested}. It is more than {available} available in your account"
    )]
    InsufficientFund {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Account {username} cannot hold {balance} plus {amount}")]
    BalanceOverflow {
        username: Username,
        balance: Decimal,
        amount: Decimal,
    },
}

impl AccountError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::EmptyUsername | AccountError::BalanceOverflow { .. } => {
                ErrorKind::InvalidArgument
            }
            AccountError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            AccountError::NotFound(_) | AccountError::DestinationNotFound(_) => {
                ErrorKind::NotFound
            }
            AccountError::InsufficientFund { .. } => ErrorKind::InsufficientFunds,
        }
    }
}

pub type AccountResult<T> = anyhow::Result<T, AccountError>;

/// Snapshot of a user's wallet
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    username: Username,

    /// Never negative. Equals the sum of top-ups plus transfers in, minus transfers out
    #[serde(serialize_with = "round_serialize")]
    balance: Decimal,
}

fn round_serialize<S>(amount: &Decimal, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    // Serialize to 4 decimal, as a float like every other amount
    rust_decimal::serde::float::serialize(&amount.round_dp(4), s)
}

impl Account {
    pub(crate) fn new(username: Username) -> Self {
        Self {
            username,
            balance: dec!(0),
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Leaves the balance untouched when the sum does not fit.
    pub(crate) fn deposit(&mut self, amount: Decimal) -> AccountResult<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| AccountError::BalanceOverflow {
                username: self.username.clone(),
                balance: self.balance,
                amount,
            })?;
        Ok(())
    }

    /// Leaves the balance untouched when it cannot cover `amount`.
    pub(crate) fn withdraw(&mut self, amount: Decimal) -> AccountResult<()> {
        if amount > self.balance {
            return Err(AccountError::InsufficientFund {
                requested: amount,
                available: self.balance,
            });
        }

        self.balance -= amount;
        Ok(())
    }
}

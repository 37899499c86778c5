use super::account::{AccountError, ErrorKind, Username};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction of a movement, seen from the owner of the history it is recorded in
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// Money leaving the owner: a transfer sent out. Top-ups are recorded with this flow too.
    Debit,

    /// Money arriving at the owner from another account
    Credit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Invalid transaction - {0}")]
    AccountError(#[from] AccountError),

    #[error("Invalid input - {0}")]
    InvalidAmount(Decimal),
}

impl TransactionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransactionError::AccountError(e) => e.kind(),
            TransactionError::InvalidAmount(_) => ErrorKind::InvalidArgument,
        }
    }
}

pub type TransactionResult<T> = anyhow::Result<T, TransactionError>;

pub(crate) fn validate_amount(amount: Decimal) -> TransactionResult<Decimal> {
    if amount <= dec!(0) {
        return Err(TransactionError::InvalidAmount(amount));
    }
    Ok(amount)
}

/// One immutable history entry
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// The other side of a transfer, or the owner itself for a top-up
    counterparty: Username,

    /// Always positive, the direction lives in `flow`
    amount: Decimal,

    flow: Flow,

    timestamp: DateTime<Utc>,
}

impl TransactionRecord {
    pub(crate) fn new(
        counterparty: Username,
        amount: Decimal,
        flow: Flow,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            counterparty,
            amount,
            flow,
            timestamp,
        }
    }

    pub fn counterparty(&self) -> &Username {
        &self.counterparty
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Negative for money out, positive for money in.
    pub fn signed_amount(&self) -> Decimal {
        match self.flow {
            Flow::Debit => -self.amount,
            Flow::Credit => self.amount,
        }
    }
}

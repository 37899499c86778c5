mod account;
mod config;
mod ledger;
mod ranking;
mod store;
mod transaction;

pub use self::{
    account::{Account, AccountError, AccountResult, ErrorKind, Username},
    config::{ConfigError, LedgerConfig, DEFAULT_TOP_TRANSACTION_LIMIT},
    ledger::Ledger,
    ranking::{OverallTopTransaction, TopTransaction},
    store::Store,
    transaction::{Flow, TransactionError, TransactionRecord, TransactionResult},
};

#[macro_use]
extern crate log;

mod features;

pub use features::{
    Account, AccountError, AccountResult, ConfigError, ErrorKind, Flow, Ledger, LedgerConfig,
    OverallTopTransaction, Store, TopTransaction, TransactionError, TransactionRecord,
    TransactionResult, Username, DEFAULT_TOP_TRANSACTION_LIMIT,
};

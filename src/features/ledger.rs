use super::account::{Account, AccountResult};
use super::ranking::{OverallTopTransaction, TopTransaction};
use super::transaction::{TransactionRecord, TransactionResult};
use rust_decimal::prelude::*;

/// Everything a caller can do with wallet balances and their history.
///
/// Usernames are taken as already authenticated. Every call either applies
/// in full or leaves the ledger unchanged.
pub trait Ledger: Send + Sync {
    /// Registers `username` with a zero balance.
    fn create_account(&self, username: &str) -> AccountResult<Account>;

    fn get_account(&self, username: &str) -> AccountResult<Account>;

    fn read_balance(&self, username: &str) -> AccountResult<Decimal>;

    /// Credits an external deposit and records it in the top-up history.
    fn top_up(&self, username: &str, amount: Decimal) -> TransactionResult<Account>;

    /// Moves `amount` between two accounts, returning the sender afterwards.
    fn transfer(
        &self,
        from_username: &str,
        to_username: &str,
        amount: Decimal,
    ) -> TransactionResult<Account>;

    fn top_transactions_by_amount(&self, username: &str) -> AccountResult<Vec<TopTransaction>>;

    fn top_transactions_by_sum_amount(
        &self,
        username: &str,
    ) -> AccountResult<Vec<OverallTopTransaction>>;

    fn topup_history(&self, username: &str) -> AccountResult<Vec<TransactionRecord>>;

    fn transfer_history(&self, username: &str) -> AccountResult<Vec<TransactionRecord>>;
}

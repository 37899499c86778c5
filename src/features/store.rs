use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{
    account::{Account, AccountError, AccountResult, Username},
    config::LedgerConfig,
    ledger::Ledger,
    ranking::{self, OverallTopTransaction, TopTransaction},
    transaction::{validate_amount, Flow, TransactionRecord, TransactionResult},
};
use chrono::Utc;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// This keeps track of users' balances, top-ups and transfers behind a single lock
#[derive(Debug, Default)]
pub struct Store {
    config: LedgerConfig,
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    accounts: BTreeMap<Username, Account>,
    topups: BTreeMap<Username, Vec<TransactionRecord>>,
    transfers: BTreeMap<Username, Vec<TransactionRecord>>,
}

impl Tables {
    fn account(&self, username: &Username) -> AccountResult<&Account> {
        self.accounts
            .get(username)
            .ok_or_else(|| AccountError::NotFound(username.clone()))
    }

    fn transfers_of(&self, username: &Username) -> &[TransactionRecord] {
        self.transfers
            .get(username)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            config,
            tables: RwLock::default(),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn account_count(&self) -> usize {
        self.read().accounts.len()
    }

    /// Sum of every balance, `None` when it does not fit in a `Decimal`.
    /// Transfers never change it.
    pub fn total_balance(&self) -> Option<Decimal> {
        self.read()
            .accounts
            .values()
            .try_fold(dec!(0), |total, account| total.checked_add(account.balance()))
    }

    // Mutations run all of their checks before the first write, so a
    // poisoned lock still guards a consistent state.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Ledger for Store {
    fn create_account(&self, username: &str) -> AccountResult<Account> {
        let username = Username::parse(username)?;

        let mut tables = self.write();
        if tables.accounts.contains_key(&username) {
            return Err(AccountError::AlreadyExists(username));
        }

        let account = Account::new(username.clone());
        tables.accounts.insert(username, account.clone());
        debug!("created account {}", account.username());
        Ok(account)
    }

    fn get_account(&self, username: &str) -> AccountResult<Account> {
        let username = Username::parse(username)?;
        self.read().account(&username).cloned()
    }

    fn read_balance(&self, username: &str) -> AccountResult<Decimal> {
        let username = Username::parse(username)?;
        self.read().account(&username).map(Account::balance)
    }

    fn top_up(&self, username: &str, amount: Decimal) -> TransactionResult<Account> {
        let username = Username::parse(username)?;
        let amount = validate_amount(amount)?;

        let mut tables = self.write();
        let account = tables
            .accounts
            .get_mut(&username)
            .ok_or_else(|| AccountError::NotFound(username.clone()))?;
        account.deposit(amount)?;
        let snapshot = account.clone();

        let record = TransactionRecord::new(username.clone(), amount, Flow::Debit, Utc::now());
        tables.topups.entry(username).or_default().push(record);

        debug!("topped up {} with {amount}", snapshot.username());
        Ok(snapshot)
    }

    fn transfer(
        &self,
        from_username: &str,
        to_username: &str,
        amount: Decimal,
    ) -> TransactionResult<Account> {
        let from = Username::parse(from_username)?;
        let to = Username::parse(to_username)?;
        let amount = validate_amount(amount)?;

        let mut tables = self.write();
        let Tables {
            accounts,
            transfers,
            ..
        } = &mut *tables;

        let sender = accounts
            .get(&from)
            .ok_or_else(|| AccountError::NotFound(from.clone()))?;
        let receiver = accounts
            .get(&to)
            .ok_or_else(|| AccountError::DestinationNotFound(to.clone()))?;

        // Both sides are settled on copies so nothing is written unless both fit
        let mut debited = sender.clone();
        debited.withdraw(amount)?;
        let credited = if from == to {
            debited.deposit(amount)?;
            None
        } else {
            let mut credited = receiver.clone();
            credited.deposit(amount)?;
            Some(credited)
        };

        if let Some(credited) = credited {
            accounts.insert(to.clone(), credited);
        }
        accounts.insert(from.clone(), debited.clone());

        let timestamp = Utc::now();
        let debit = TransactionRecord::new(to.clone(), amount, Flow::Debit, timestamp);
        let credit = TransactionRecord::new(from.clone(), amount, Flow::Credit, timestamp);
        transfers.entry(from.clone()).or_default().push(debit);
        transfers.entry(to.clone()).or_default().push(credit);

        debug!("transferred {amount} from {from} to {to}");
        Ok(debited)
    }

    fn top_transactions_by_amount(&self, username: &str) -> AccountResult<Vec<TopTransaction>> {
        let username = Username::parse(username)?;

        let tables = self.read();
        tables.account(&username)?;
        let ranked = ranking::top_by_amount(
            tables.transfers_of(&username),
            self.config.top_transaction_limit,
        );
        trace!("ranked {} transfers of {username} by amount", ranked.len());
        Ok(ranked)
    }

    fn top_transactions_by_sum_amount(
        &self,
        username: &str,
    ) -> AccountResult<Vec<OverallTopTransaction>> {
        let username = Username::parse(username)?;

        let tables = self.read();
        tables.account(&username)?;
        let ranked = ranking::top_by_sum_amount(
            tables.transfers_of(&username),
            self.config.top_transaction_limit,
        );
        trace!("ranked {} counterparties of {username} by sum", ranked.len());
        Ok(ranked)
    }

    fn topup_history(&self, username: &str) -> AccountResult<Vec<TransactionRecord>> {
        let username = Username::parse(username)?;

        let tables = self.read();
        tables.account(&username)?;
        Ok(tables.topups.get(&username).cloned().unwrap_or_default())
    }

    fn transfer_history(&self, username: &str) -> AccountResult<Vec<TransactionRecord>> {
        let username = Username::parse(username)?;

        let tables = self.read();
        tables.account(&username)?;
        Ok(tables.transfers_of(&username).to_vec())
    }
}

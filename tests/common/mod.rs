// Shared by test files that are compiled separately
#![allow(dead_code)]

use std::thread;

use anyhow::Result;
use rust_decimal::Decimal;
use wallet_ledger::{Ledger, Store};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Store with the given accounts, each funded through a single top-up
pub fn seeded_store(balances: &[(&str, Decimal)]) -> Result<Store> {
    init_logger();
    let store = Store::new();
    for (username, balance) in balances {
        store.create_account(username)?;
        if !balance.is_zero() {
            store.top_up(username, *balance)?;
        }
    }
    Ok(store)
}

/// Runs `task` on `count` threads at once and collects what each returned
pub fn run_concurrently<T, F>(count: usize, task: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync,
{
    thread::scope(|scope| {
        let handles: Vec<_> = (0..count)
            .map(|i| {
                let task = &task;
                scope.spawn(move || task(i))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker thread panicked"))
            .collect()
    })
}

use std::collections::BTreeMap;

use super::account::Username;
use super::transaction::{Flow, TransactionRecord};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Serialize;

/// A single transfer ranked by its size
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TopTransaction {
    pub username: Username,

    /// Negative when the money went out
    #[serde(rename = "amount")]
    pub transaction_value: Decimal,
}

/// Everything sent to one counterparty, summed
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OverallTopTransaction {
    pub username: Username,

    #[serde(rename = "transacted_value")]
    pub transaction_value: Decimal,
}

/// Largest transfers first, by absolute value. Equal magnitudes keep their history order.
pub(crate) fn top_by_amount(history: &[TransactionRecord], limit: usize) -> Vec<TopTransaction> {
    let mut ranked: Vec<&TransactionRecord> = history.iter().collect();
    // `sort_by` is stable
    ranked.sort_by(|a, b| b.amount().abs().cmp(&a.amount().abs()));

    ranked
        .into_iter()
        .take(limit)
        .map(|record| TopTransaction {
            username: record.counterparty().clone(),
            transaction_value: record.signed_amount(),
        })
        .collect()
}

/// Counterparties that received the most money, ties ordered by username.
/// Credits are ignored. A sum that would pass `Decimal::MAX` stays at `Decimal::MAX`.
pub(crate) fn top_by_sum_amount(
    history: &[TransactionRecord],
    limit: usize,
) -> Vec<OverallTopTransaction> {
    let mut sums: BTreeMap<&Username, Decimal> = BTreeMap::new();
    for record in history.iter().filter(|r| r.flow() == Flow::Debit) {
        let sum = sums.entry(record.counterparty()).or_insert(dec!(0));
        *sum = sum.saturating_add(record.amount());
    }

    // BTreeMap yields usernames ascending and the sort below is stable
    let mut ranked: Vec<OverallTopTransaction> = sums
        .into_iter()
        .filter(|(_, sum)| *sum > dec!(0))
        .map(|(username, sum)| OverallTopTransaction {
            username: username.clone(),
            transaction_value: sum,
        })
        .collect();
    ranked.sort_by(|a, b| b.transaction_value.cmp(&a.transaction_value));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(counterparty: &str, amount: Decimal, flow: Flow) -> TransactionRecord {
        TransactionRecord::new(
            Username::parse(counterparty).unwrap(),
            amount,
            flow,
            Utc::now(),
        )
    }

    fn top(username: &str, value: Decimal) -> TopTransaction {
        TopTransaction {
            username: Username::parse(username).unwrap(),
            transaction_value: value,
        }
    }

    fn overall(username: &str, value: Decimal) -> OverallTopTransaction {
        OverallTopTransaction {
            username: Username::parse(username).unwrap(),
            transaction_value: value,
        }
    }

    #[test]
    fn ranks_by_absolute_value_with_flow_sign() {
        let history: Vec<_> = (0..100)
            .map(|i| {
                let flow = if i % 2 == 0 { Flow::Debit } else { Flow::Credit };
                record(&format!("user-{i:04}"), Decimal::from((i + 1) * 10), flow)
            })
            .collect();

        let expected: Vec<_> = (90..100)
            .rev()
            .map(|i| {
                let value = Decimal::from((i + 1) * 10);
                let value = if i % 2 == 0 { -value } else { value };
                top(&format!("user-{i:04}"), value)
            })
            .collect();

        let result = top_by_amount(&history, 10);
        assert_eq!(result, expected);
        assert_eq!(result[0], top("user-0099", dec!(1000)));
        assert_eq!(result[1], top("user-0098", dec!(-990)));
    }

    #[test]
    fn equal_magnitudes_keep_history_order() {
        let history = vec![
            record("a", dec!(5), Flow::Credit),
            record("b", dec!(50), Flow::Debit),
            record("c", dec!(5), Flow::Debit),
            record("d", dec!(50), Flow::Credit),
        ];

        assert_eq!(
            top_by_amount(&history, 10),
            vec![
                top("b", dec!(-50)),
                top("d", dec!(50)),
                top("a", dec!(5)),
                top("c", dec!(-5)),
            ]
        );
    }

    #[test]
    fn limit_applies_to_both_rankings() {
        let history: Vec<_> = (0..300)
            .map(|i| record(&format!("user-{i:03}"), Decimal::from(i + 1), Flow::Debit))
            .collect();

        assert_eq!(top_by_amount(&history, 10).len(), 10);
        assert_eq!(top_by_sum_amount(&history, 10).len(), 10);
        assert_eq!(top_by_amount(&history, 3).len(), 3);
    }

    #[test]
    fn empty_history_ranks_nothing() {
        assert!(top_by_amount(&[], 10).is_empty());
        assert!(top_by_sum_amount(&[], 10).is_empty());
    }

    #[test]
    fn sums_only_debits_per_counterparty() {
        let mut history = Vec::new();
        let mut valid_amount = dec!(0);
        for i in 0..100 {
            if i % 2 == 0 {
                let amount = Decimal::from((i + 1) * 10);
                valid_amount += amount;
                history.push(record("user-02", amount, Flow::Debit));
            } else {
                history.push(record("user-01", Decimal::from((i + 1) * 20), Flow::Credit));
            }
        }

        assert_eq!(
            top_by_sum_amount(&history, 10),
            vec![overall("user-02", valid_amount)]
        );
    }

    #[test]
    fn equal_sums_are_ordered_by_username() {
        let history = vec![
            record("zed", dec!(30), Flow::Debit),
            record("amy", dec!(10), Flow::Debit),
            record("bob", dec!(30), Flow::Debit),
            record("amy", dec!(20), Flow::Debit),
            record("cat", dec!(100), Flow::Credit),
        ];

        assert_eq!(
            top_by_sum_amount(&history, 10),
            vec![
                overall("amy", dec!(30)),
                overall("bob", dec!(30)),
                overall("zed", dec!(30)),
            ]
        );
    }

    #[test]
    fn sum_saturates_at_max() {
        let history = vec![
            record("wati", Decimal::MAX, Flow::Debit),
            record("wati", Decimal::MAX, Flow::Debit),
            record("fira", dec!(1), Flow::Debit),
        ];

        assert_eq!(
            top_by_sum_amount(&history, 10),
            vec![overall("wati", Decimal::MAX), overall("fira", dec!(1))]
        );
    }

    #[test]
    fn serializes_with_response_field_names() {
        let json = serde_json::to_value(top("wati", dec!(-10))).unwrap();
        assert_eq!(json["username"], "wati");
        assert!(json.get("amount").is_some());

        let json = serde_json::to_value(overall("wati", dec!(10))).unwrap();
        assert!(json.get("transacted_value").is_some());
    }
}

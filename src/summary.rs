// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Aggregates over resolved transactions
//!
//! Debits are negative amounts. Spending figures are reported as positive
//! magnitudes; income sums the positive amounts only.

use std::collections::{BTreeMap, HashMap};

use bigdecimal::BigDecimal;
use serde::Serialize;

use crate::config::constants::UNCATEGORIZED;
use crate::types::date::DateBound;
use crate::types::transaction::Transaction;

/// Spending attributed to one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpend {
    /// Category name, or `"Uncategorized"`
    pub category: String,
    /// Total spent, as a positive magnitude
    pub amount: BigDecimal,
}

/// Sum of the magnitudes of all debits
///
/// # Examples
///
/// ```
/// use bigdecimal::BigDecimal;
/// use txrange::{total_spending, Transaction};
///
/// let txs = vec![
///     Transaction::new(1, "2024-01-01".parse().unwrap(), "-12.50".parse().unwrap()),
///     Transaction::new(2, "2024-01-02".parse().unwrap(), "100".parse().unwrap()),
///     Transaction::new(3, "2024-01-03".parse().unwrap(), "-7.50".parse().unwrap()),
/// ];
/// assert_eq!(total_spending(&txs), "20".parse::<BigDecimal>().unwrap());
/// ```
pub fn total_spending(transactions: &[Transaction]) -> BigDecimal {
    transactions
        .iter()
        .filter(|tx| tx.is_expense())
        .map(|tx| tx.amount.abs())
        .sum()
}

/// Sum of all credits
pub fn total_income(transactions: &[Transaction]) -> BigDecimal {
    transactions
        .iter()
        .filter(|tx| tx.is_income())
        .map(|tx| tx.amount.clone())
        .sum()
}

/// Transactions grouped by posting date, dates ascending
pub fn group_by_date(transactions: &[Transaction]) -> BTreeMap<DateBound, Vec<&Transaction>> {
    let mut groups: BTreeMap<DateBound, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        groups.entry(tx.date).or_default().push(tx);
    }
    groups
}

/// Spending per category name, largest first
///
/// Debits without a category, or whose category id is absent from
/// `categories`, are attributed to `"Uncategorized"`. Equal amounts are
/// ordered by name.
pub fn spending_by_category(
    transactions: &[Transaction],
    categories: &HashMap<u64, String>,
) -> Vec<CategorySpend> {
    let mut totals: HashMap<&str, BigDecimal> = HashMap::new();

    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        let name = tx
            .category_id
            .and_then(|id| categories.get(&id))
            .map(String::as_str)
            .unwrap_or(UNCATEGORIZED);
        *totals.entry(name).or_default() += tx.amount.abs();
    }

    let mut spends: Vec<CategorySpend> = totals
        .into_iter()
        .map(|(category, amount)| CategorySpend {
            category: category.to_string(),
            amount,
        })
        .collect();
    spends.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    spends
}

/// The `limit` categories with the highest spending
pub fn top_spending_categories(
    transactions: &[Transaction],
    categories: &HashMap<u64, String>,
    limit: usize,
) -> Vec<CategorySpend> {
    let mut spends = spending_by_category(transactions, categories);
    spends.truncate(limit);
    spends
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn tx(id: u64, date: &str, amount: &str, category: Option<u64>) -> Transaction {
        let tx = Transaction::new(id, date.parse().unwrap(), amount.parse().unwrap());
        match category {
            Some(category) => tx.with_category(category),
            None => tx,
        }
    }

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, "2024-01-02", "-40.00", Some(10)),
            tx(2, "2024-01-02", "-15.25", Some(11)),
            tx(3, "2024-01-05", "2500", None),
            tx(4, "2024-01-09", "-9.75", Some(10)),
            tx(5, "2024-01-12", "-3", None),
            tx(6, "2024-01-12", "-1", Some(99)),
        ]
    }

    fn categories() -> HashMap<u64, String> {
        HashMap::from([
            (10, "Groceries".to_string()),
            (11, "Transport".to_string()),
        ])
    }

    #[test]
    fn test_totals() {
        assert_eq!(total_spending(&sample()), dec("69"));
        assert_eq!(total_income(&sample()), dec("2500"));
        assert_eq!(total_spending(&[]), dec("0"));
    }

    #[test]
    fn test_spending_by_category_sorted_descending() {
        let spends = spending_by_category(&sample(), &categories());

        let summary: Vec<(&str, BigDecimal)> = spends
            .iter()
            .map(|s| (s.category.as_str(), s.amount.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Groceries", dec("49.75")),
                ("Transport", dec("15.25")),
                ("Uncategorized", dec("4")),
            ]
        );
    }

    #[test]
    fn test_top_spending_categories_truncates() {
        let top = top_spending_categories(&sample(), &categories(), 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].category, "Groceries");
    }

    #[test]
    fn test_group_by_date() {
        let txs = sample();
        let groups = group_by_date(&txs);

        assert_eq!(groups.len(), 4);
        let key: DateBound = "2024-01-12".parse().unwrap();
        let jan_12: Vec<u64> = groups[&key]
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(jan_12, vec![5, 6]);
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transaction records as delivered by the provider

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::date::DateBound;
use super::record::DatedRecord;

/// Provider-assigned transaction identifier
pub type TransactionId = u64;

/// A single financial transaction
///
/// Debits are negative and credits positive. Fields the cache does not need
/// are kept verbatim in [`extra`](Transaction::extra) so that a record
/// survives a serialize/deserialize cycle unchanged.
///
/// # Examples
///
/// ```
/// use txrange::Transaction;
///
/// let tx: Transaction = serde_json::from_str(
///     r#"{"id": 7, "date": "2024-01-03", "payee": "Grocer", "amount": "-42.10", "status": "cleared"}"#,
/// ).unwrap();
/// assert_eq!(tx.id, 7);
/// assert!(tx.is_expense());
/// assert_eq!(tx.extra["status"], "cleared");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Provider identifier
    pub id: TransactionId,
    /// Posting date
    pub date: DateBound,
    /// Counterparty name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    /// Signed amount; negative for expenses
    pub amount: BigDecimal,
    /// ISO currency code, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Category identifier, if categorized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    /// Remaining provider fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// Create a transaction with no optional fields
    pub fn new(id: TransactionId, date: DateBound, amount: BigDecimal) -> Self {
        Self {
            id,
            date,
            payee: None,
            amount,
            currency: None,
            category_id: None,
            extra: Map::new(),
        }
    }

    /// Set the payee
    pub fn with_payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = Some(payee.into());
        self
    }

    /// Set the category
    pub fn with_category(mut self, category_id: u64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Whether this is a debit
    pub fn is_expense(&self) -> bool {
        self.amount < BigDecimal::from(0)
    }

    /// Whether this is a credit
    pub fn is_income(&self) -> bool {
        self.amount > BigDecimal::from(0)
    }
}

impl DatedRecord for Transaction {
    type Id = TransactionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn date(&self) -> DateBound {
        self.date
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Row ID assigned by the store.
pub type TransactionId = i64;

/// Passing this ID to the delete command removes every transaction.
pub const ALL_TRANSACTIONS: TransactionId = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::InvalidTransactionType(other.to_string())),
        }
    }
}

/// A stored income or expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// The mutable fields of a transaction, i.e. everything except the ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl NewTransaction {
    /// Create the fields for a new transaction, filling in the default
    /// description (`"other <type>"`) and category (`"other"`) when they are
    /// missing or blank.
    pub fn new(
        date: NaiveDate,
        description: Option<String>,
        category: Option<String>,
        amount: Decimal,
        transaction_type: TransactionType,
    ) -> Self {
        let description = description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| format!("other {transaction_type}"));
        let category = category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "other".to_string());

        Self {
            date,
            description,
            category,
            amount,
            transaction_type,
        }
    }

    /// Check the invariants the store enforces at write time.
    ///
    /// # Errors
    /// Returns [Error::NegativeAmount] if the amount is below zero.
    pub fn validate(&self) -> Result<(), Error> {
        if self.amount < Decimal::ZERO {
            return Err(Error::NegativeAmount(self.amount));
        }
        Ok(())
    }

    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            date: self.date,
            description: self.description,
            category: self.category,
            amount: self.amount,
            transaction_type: self.transaction_type,
        }
    }
}

impl From<Transaction> for NewTransaction {
    fn from(transaction: Transaction) -> Self {
        Self {
            date: transaction.date,
            description: transaction.description,
            category: transaction.category,
            amount: transaction.amount,
            transaction_type: transaction.transaction_type,
        }
    }
}

/// A partial update. Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub transaction_type: Option<TransactionType>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.transaction_type.is_none()
    }

    pub fn apply(self, existing: Transaction) -> NewTransaction {
        NewTransaction {
            date: self.date.unwrap_or(existing.date),
            description: self.description.unwrap_or(existing.description),
            category: self.category.unwrap_or(existing.category),
            amount: self.amount.unwrap_or(existing.amount),
            transaction_type: self.transaction_type.unwrap_or(existing.transaction_type),
        }
    }
}

use chrono::NaiveDate;
use rusqlite::types::Value;

use crate::models::transaction::TransactionType;

/// A single condition on a transaction. A list of predicates is combined with
/// `AND`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `date >= start`, inclusive.
    DateFrom(NaiveDate),
    /// `date <= end`, inclusive.
    DateTo(NaiveDate),
    /// The date falls in the given calendar month.
    Month { year: i32, month: u32 },
    /// The date falls in the given year.
    Year(i32),
    Category(String),
    Type(TransactionType),
}

impl Predicate {
    fn sql(&self) -> &'static str {
        match self {
            Predicate::DateFrom(_) => "date >= ?",
            Predicate::DateTo(_) => "date <= ?",
            Predicate::Month { .. } => "strftime('%Y-%m', date) = ?",
            Predicate::Year(_) => "strftime('%Y', date) = ?",
            Predicate::Category(_) => "category = ?",
            Predicate::Type(_) => "type = ?",
        }
    }

    // Dates are stored as ISO 8601 text, which sorts in calendar order, so the
    // range predicates compare strings.
    fn value(&self) -> Value {
        match self {
            Predicate::DateFrom(date) | Predicate::DateTo(date) => Value::Text(date.to_string()),
            Predicate::Month { year, month } => Value::Text(format!("{year:04}-{month:02}")),
            Predicate::Year(year) => Value::Text(format!("{year:04}")),
            Predicate::Category(category) => Value::Text(category.clone()),
            Predicate::Type(transaction_type) => Value::Text(transaction_type.to_string()),
        }
    }

    /// Evaluate the predicate against a transaction in memory.
    pub fn matches(&self, transaction: &crate::Transaction) -> bool {
        use chrono::Datelike;

        match self {
            Predicate::DateFrom(start) => transaction.date >= *start,
            Predicate::DateTo(end) => transaction.date <= *end,
            Predicate::Month { year, month } => {
                transaction.date.year() == *year && transaction.date.month() == *month
            }
            Predicate::Year(year) => transaction.date.year() == *year,
            Predicate::Category(category) => transaction.category == *category,
            Predicate::Type(transaction_type) => transaction.transaction_type == *transaction_type,
        }
    }
}

/// A `WHERE` clause and the values bound to its placeholders, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<Value>,
}

impl WhereClause {
    /// Compile `predicates` into a clause. An empty list gives an empty clause
    /// which matches every row.
    pub fn build(predicates: &[Predicate]) -> Self {
        if predicates.is_empty() {
            return Self::default();
        }

        let conditions: Vec<&str> = predicates.iter().map(Predicate::sql).collect();
        Self {
            sql: format!(" WHERE {}", conditions.join(" AND ")),
            params: predicates.iter().map(Predicate::value).collect(),
        }
    }
}

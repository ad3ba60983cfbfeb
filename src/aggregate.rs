//! Pure reductions over a list of transactions.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::summary::Summary;
use crate::models::transaction::{Transaction, TransactionType};

/// Total income, total expenses and their difference. Empty input gives all
/// zeros.
pub fn totals(transactions: &[Transaction]) -> Summary {
    let (income, expenses) = transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expenses), transaction| match transaction.transaction_type {
            TransactionType::Income => (income + transaction.amount, expenses),
            TransactionType::Expense => (income, expenses + transaction.amount),
        },
    );

    Summary::new(income, expenses)
}

/// Sum the amounts of one transaction type per category, keyed in ascending
/// category order.
pub fn by_category(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();

    for transaction in transactions
        .iter()
        .filter(|t| t.transaction_type == transaction_type)
    {
        *totals
            .entry(transaction.category.clone())
            .or_insert(Decimal::ZERO) += transaction.amount;
    }

    totals
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn transaction(
        id: i64,
        category: &str,
        amount: Decimal,
        transaction_type: TransactionType,
    ) -> Transaction {
        Transaction {
            id,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            description: "Test Description".to_string(),
            category: category.to_string(),
            amount,
            transaction_type,
        }
    }

    #[test]
    fn test_totals_of_nothing_is_zero() {
        assert_eq!(totals(&[]), Summary::default());
    }

    #[test]
    fn test_totals_nets_income_against_expenses() {
        let transactions = vec![
            transaction(1, "Salary", Decimal::from(1000), TransactionType::Income),
            transaction(2, "Rent", Decimal::from(400), TransactionType::Expense),
        ];

        let summary = totals(&transactions);
        assert_eq!(summary.total_income, Decimal::from(1000));
        assert_eq!(summary.total_expenses, Decimal::from(400));
        assert_eq!(summary.net_balance, Decimal::from(600));
    }

    #[test]
    fn test_totals_is_additive_over_partitions() {
        let a = vec![
            transaction(1, "Salary", Decimal::new(150050, 2), TransactionType::Income),
            transaction(2, "Food", Decimal::new(1299, 2), TransactionType::Expense),
        ];
        let b = vec![
            transaction(3, "Rent", Decimal::from(700), TransactionType::Expense),
            transaction(4, "Gift", Decimal::new(25, 1), TransactionType::Income),
        ];
        let all: Vec<Transaction> = a.iter().chain(b.iter()).cloned().collect();

        assert_eq!(totals(&all), totals(&a) + totals(&b));
    }

    #[test]
    fn test_decimal_amounts_do_not_drift() {
        let transactions: Vec<Transaction> = (0..10)
            .map(|i| transaction(i, "Food", Decimal::new(1, 1), TransactionType::Expense))
            .collect();

        assert_eq!(totals(&transactions).total_expenses, Decimal::ONE);
    }

    #[test]
    fn test_by_category_filters_type_and_sorts_keys() {
        let transactions = vec![
            transaction(1, "Rent", Decimal::from(400), TransactionType::Expense),
            transaction(2, "Food", Decimal::from(20), TransactionType::Expense),
            transaction(3, "Food", Decimal::from(5), TransactionType::Expense),
            transaction(4, "Salary", Decimal::from(1000), TransactionType::Income),
        ];

        let expenses = by_category(&transactions, TransactionType::Expense);
        let keys: Vec<&str> = expenses.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["Food", "Rent"]);
        assert_eq!(expenses["Food"], Decimal::from(25));
        assert_eq!(expenses["Rent"], Decimal::from(400));
        assert!(!expenses.contains_key("Salary"));
    }
}

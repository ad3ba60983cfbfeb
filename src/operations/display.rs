//! Plain text rendering of transactions and summaries for the terminal.

use std::collections::BTreeMap;
use std::fmt::Write;

use rust_decimal::Decimal;

use super::summary::SummaryReport;
use crate::models::transaction::{Transaction, TransactionType};

pub fn format_amount(currency_symbol: &str, amount: Decimal) -> String {
    format!("{currency_symbol}{amount:.2}")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_transaction(transaction: &Transaction, currency_symbol: &str) -> String {
    format!(
        "--- Transaction ID {} ---\n\
         Date: {}\n\
         Description: {}\n\
         Category: {}\n\
         Amount: {}\n\
         Type: {}",
        transaction.id,
        transaction.date,
        transaction.description,
        transaction.category,
        format_amount(currency_symbol, transaction.amount),
        capitalize(transaction.transaction_type.as_str()),
    )
}

/// Render `transactions` as an aligned table with a header row.
pub fn format_table(transactions: &[Transaction], currency_symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions to display.".to_string();
    }

    let amounts: Vec<String> = transactions
        .iter()
        .map(|t| format_amount(currency_symbol, t.amount))
        .collect();

    let id_len = transactions
        .iter()
        .map(|t| t.id.to_string().len())
        .max()
        .unwrap_or(0)
        .max(2);
    let date_len = 10;
    let desc_len = transactions
        .iter()
        .map(|t| t.description.chars().count())
        .max()
        .unwrap_or(0)
        .max("Description".len());
    let cat_len = transactions
        .iter()
        .map(|t| t.category.chars().count())
        .max()
        .unwrap_or(0)
        .max("Category".len());
    let amount_len = amounts
        .iter()
        .map(|a| a.chars().count())
        .max()
        .unwrap_or(0)
        .max("Amount".len());

    let header = format!(
        " {:>id_len$} | {:<date_len$} | {:<desc_len$} | {:<cat_len$} | {:>amount_len$} | {:<7}",
        "ID", "Date", "Description", "Category", "Amount", "Type"
    );
    let rule = "-".repeat(header.chars().count());

    let mut table = String::new();
    let _ = writeln!(table, "{rule}\n{header}\n{rule}");
    for (transaction, amount) in transactions.iter().zip(&amounts) {
        let _ = writeln!(
            table,
            " {:>id_len$} | {:<date_len$} | {:<desc_len$} | {:<cat_len$} | {:>amount_len$} | {:<7}",
            transaction.id,
            transaction.date.to_string(),
            transaction.description,
            transaction.category,
            amount,
            capitalize(transaction.transaction_type.as_str()),
        );
    }
    table.trim_end().to_string()
}

fn format_breakdown(
    totals: &BTreeMap<String, Decimal>,
    transaction_type: TransactionType,
    currency_symbol: &str,
) -> String {
    let mut text = format!("--- {} by Category ---", capitalize(transaction_type.as_str()));
    if totals.is_empty() {
        text.push_str("\nNone");
        return text;
    }

    let cat_len = totals.keys().map(|c| c.chars().count()).max().unwrap_or(0);
    let _ = write!(text, "\n{}", "-".repeat(cat_len + 15));
    for (category, amount) in totals {
        let _ = write!(
            text,
            "\n {category:<cat_len$}  {:>12}",
            format_amount(currency_symbol, *amount)
        );
    }
    text
}

/// Render the summary view. The per-category breakdowns are only included
/// when asked for.
pub fn format_summary(
    report: &SummaryReport,
    currency_symbol: &str,
    show_expenses: bool,
    show_income: bool,
) -> String {
    let mut text = format!("--- Transaction Summary ({}) ---", report.description);

    if report.transaction_count == 0 {
        text.push('\n');
        text.push_str(if report.filtered {
            "No transactions found for the specified filters."
        } else {
            "No transactions found."
        });
        return text;
    }

    let summary = &report.summary;
    let _ = write!(
        text,
        "\nTotal Income: {}\nTotal Expenses: {}\nNet Balance: {}",
        format_amount(currency_symbol, summary.total_income),
        format_amount(currency_symbol, summary.total_expenses),
        format_amount(currency_symbol, summary.net_balance),
    );

    if show_expenses {
        text.push_str("\n\n");
        text.push_str(&format_breakdown(
            &report.expenses_by_category,
            TransactionType::Expense,
            currency_symbol,
        ));
    }
    if show_income {
        text.push_str("\n\n");
        text.push_str(&format_breakdown(
            &report.income_by_category,
            TransactionType::Income,
            currency_symbol,
        ));
    }
    text
}

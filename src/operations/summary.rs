use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::aggregate::{by_category, totals};
use crate::models::summary::Summary;
use crate::models::transaction::TransactionType;
use crate::query::{FilterInput, list_transactions, resolve_filter};
use crate::{Database, Error};

/// Everything the summary view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    /// e.g. `"for March 2024, category 'Rent'"` or `"Overall"`.
    pub description: String,
    /// Whether any filter was applied.
    pub filtered: bool,
    pub transaction_count: usize,
    pub summary: Summary,
    pub expenses_by_category: BTreeMap<String, Decimal>,
    pub income_by_category: BTreeMap<String, Decimal>,
}

pub fn build_summary(database: &Database, filter: &FilterInput) -> Result<SummaryReport, Error> {
    let resolved = resolve_filter(filter)?;
    let transactions = list_transactions(database, &resolved.predicates, None)?;

    Ok(SummaryReport {
        filtered: !resolved.is_empty(),
        description: resolved.description,
        transaction_count: transactions.len(),
        summary: totals(&transactions),
        expenses_by_category: by_category(&transactions, TransactionType::Expense),
        income_by_category: by_category(&transactions, TransactionType::Income),
    })
}

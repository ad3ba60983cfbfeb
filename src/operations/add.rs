use crate::db::repository;
use crate::models::transaction::{NewTransaction, Transaction, TransactionType};
use crate::{Database, Error};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Raw values for a new transaction as typed on the command line.
#[derive(Debug, Clone, Default)]
pub struct TransactionInput {
    pub date: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: String,
}

pub fn parse_date(input: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(input.trim().to_string()))
}

pub fn parse_amount(input: &str) -> Result<Decimal, Error> {
    let amount = Decimal::from_str(input.trim()).map_err(|_| {
        Error::InvalidArgument(format!(
            "invalid amount format '{}', please provide a valid decimal number",
            input.trim()
        ))
    })?;
    if amount < Decimal::ZERO {
        return Err(Error::NegativeAmount(amount));
    }
    Ok(amount)
}

/// Validate `input` and build the transaction fields. The date defaults to
/// today in local time.
pub fn create_transaction(
    input: &TransactionInput,
    transaction_type: TransactionType,
) -> Result<NewTransaction, Error> {
    let date = match input.date.as_deref() {
        Some(date) => parse_date(date)?,
        None => Local::now().date_naive(),
    };
    let amount = parse_amount(&input.amount)?;

    Ok(NewTransaction::new(
        date,
        input.description.clone(),
        input.category.clone(),
        amount,
        transaction_type,
    ))
}

/// Validate and store a new transaction, returning the stored record.
pub fn add_transaction_to_db(
    database: &Database,
    input: &TransactionInput,
    transaction_type: TransactionType,
) -> Result<Transaction, Error> {
    let transaction = create_transaction(input, transaction_type)?;
    let id = repository::create_transaction(database, &transaction)?;
    Ok(transaction.with_id(id))
}

use super::add::{parse_amount, parse_date};
use crate::db::repository;
use crate::models::transaction::{Transaction, TransactionId, TransactionPatch};
use crate::{Database, Error};

/// Raw replacement values for an existing transaction. `None` or a blank
/// string keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct EditInput {
    pub date: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Option<String>,
    pub transaction_type: Option<String>,
}

fn given(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.trim().is_empty())
}

pub fn parse_patch(input: &EditInput) -> Result<TransactionPatch, Error> {
    Ok(TransactionPatch {
        date: given(&input.date).map(parse_date).transpose()?,
        description: given(&input.description).map(str::to_string),
        category: given(&input.category).map(str::to_string),
        amount: given(&input.amount).map(parse_amount).transpose()?,
        transaction_type: given(&input.transaction_type)
            .map(|t| t.trim().parse())
            .transpose()?,
    })
}

/// Change the given fields of transaction `id` and return the updated record.
///
/// # Errors
/// - [Error::NoChanges] if no field was given.
/// - [Error::NotFound] if there is no transaction with that ID.
/// - A validation error if a field cannot be parsed.
pub fn edit_transaction_in_db(
    database: &Database,
    id: TransactionId,
    input: &EditInput,
) -> Result<Transaction, Error> {
    let patch = parse_patch(input)?;
    repository::edit_transaction(database, id, patch)
}

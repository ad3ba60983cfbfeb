use crate::db::repository;
use crate::models::transaction::{ALL_TRANSACTIONS, TransactionId};
use crate::{Database, Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Every transaction was deleted and the ID sequence reset.
    All,
    Removed(TransactionId),
    NotFound(TransactionId),
}

/// Delete transaction `id`, or every transaction if `id` is
/// [ALL_TRANSACTIONS].
pub fn remove_transaction_from_db(
    database: &Database,
    id: TransactionId,
) -> Result<RemoveOutcome, Error> {
    if id == ALL_TRANSACTIONS {
        repository::delete_all_transactions(database)?;
        return Ok(RemoveOutcome::All);
    }

    if repository::delete_transaction(database, id)? {
        Ok(RemoveOutcome::Removed(id))
    } else {
        Ok(RemoveOutcome::NotFound(id))
    }
}

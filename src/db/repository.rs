use crate::models::transaction::{
    NewTransaction, Transaction, TransactionId, TransactionPatch, TransactionType,
};
use crate::{Database, Error};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use rust_decimal::Decimal;
use std::str::FromStr;

pub(crate) const SELECT_TRANSACTIONS: &str =
    "SELECT id, date, description, category, amount, type FROM transactions";

const INSERT_TRANSACTION: &str =
    "INSERT INTO transactions (date, description, category, amount, type)
    VALUES (?1, ?2, ?3, ?4, ?5)";

const UPDATE_TRANSACTION: &str = "UPDATE transactions
    SET date = ?1, description = ?2, category = ?3, amount = ?4, type = ?5
    WHERE id = ?6";

/// Map a row selected with [SELECT_TRANSACTIONS] to a [Transaction].
pub(crate) fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let date_str: String = row.get(1)?;
    let amount_str: String = row.get(4)?;
    let type_str: String = row.get(5)?;

    Ok(Transaction {
        id: row.get(0)?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?,
        description: row.get(2)?,
        category: row.get(3)?,
        amount: Decimal::from_str(&amount_str)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?,
        transaction_type: TransactionType::from_str(&type_str)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?,
    })
}

fn insert(conn: &Connection, transaction: &NewTransaction) -> Result<TransactionId, Error> {
    conn.execute(
        INSERT_TRANSACTION,
        params![
            transaction.date.to_string(),
            &transaction.description,
            &transaction.category,
            transaction.amount.to_string(),
            transaction.transaction_type.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn select_one(conn: &Connection, id: TransactionId) -> Result<Option<Transaction>, Error> {
    let transaction = conn
        .query_row(&format!("{SELECT_TRANSACTIONS} WHERE id = ?1"), [id], map_row)
        .optional()?;
    Ok(transaction)
}

fn write(
    conn: &Connection,
    id: TransactionId,
    transaction: &NewTransaction,
) -> Result<bool, Error> {
    let rows_affected = conn.execute(
        UPDATE_TRANSACTION,
        params![
            transaction.date.to_string(),
            &transaction.description,
            &transaction.category,
            transaction.amount.to_string(),
            transaction.transaction_type.as_str(),
            id,
        ],
    )?;
    Ok(rows_affected > 0)
}

/// Insert a new transaction and return the ID the database assigned to it.
///
/// # Errors
/// Returns [Error::NegativeAmount] before touching the database if the amount
/// is negative, or [Error::SqlError] if the insert fails. A failed insert
/// leaves the table unchanged.
pub fn create_transaction(
    database: &Database,
    transaction: &NewTransaction,
) -> Result<TransactionId, Error> {
    transaction.validate()?;

    let conn = database.connect()?;
    let id = insert(&conn, transaction)?;
    tracing::info!("created {} transaction {id}", transaction.transaction_type);
    Ok(id)
}

/// Look up a single transaction. A missing ID is `Ok(None)`, not an error.
pub fn get_transaction(
    database: &Database,
    id: TransactionId,
) -> Result<Option<Transaction>, Error> {
    let conn = database.connect()?;
    select_one(&conn, id)
}

/// Replace every field of transaction `id` except the ID.
///
/// Returns `false` if no row has that ID.
pub fn update_transaction(
    database: &Database,
    id: TransactionId,
    transaction: &NewTransaction,
) -> Result<bool, Error> {
    transaction.validate()?;

    let conn = database.connect()?;
    let updated = write(&conn, id, transaction)?;
    if updated {
        tracing::info!("updated transaction {id}");
    } else {
        tracing::debug!("update matched no transaction with ID {id}");
    }
    Ok(updated)
}

/// Apply `patch` to transaction `id` and return the stored result.
///
/// The read, merge and write happen inside one immediate transaction so a
/// concurrent writer cannot slip in between the read and the write.
///
/// # Errors
/// - [Error::NoChanges] if the patch is empty.
/// - [Error::NotFound] if there is no transaction with that ID.
/// - [Error::NegativeAmount] if the merged amount is negative.
pub fn edit_transaction(
    database: &Database,
    id: TransactionId,
    patch: TransactionPatch,
) -> Result<Transaction, Error> {
    if patch.is_empty() {
        return Err(Error::NoChanges);
    }

    let mut conn = database.connect()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let existing = select_one(&tx, id)?.ok_or(Error::NotFound(id))?;
    let merged = patch.apply(existing);
    merged.validate()?;

    if !write(&tx, id, &merged)? {
        return Err(Error::NotFound(id));
    }
    tx.commit()?;

    tracing::info!("edited transaction {id}");
    Ok(merged.with_id(id))
}

/// Returns whether a row was actually removed.
pub fn delete_transaction(database: &Database, id: TransactionId) -> Result<bool, Error> {
    let conn = database.connect()?;
    let rows_affected = conn.execute("DELETE FROM transactions WHERE id = ?1", [id])?;

    if rows_affected > 0 {
        tracing::info!("deleted transaction {id}");
    }
    Ok(rows_affected > 0)
}

/// Delete every transaction and reset the ID sequence, so the next insert is
/// assigned ID 1.
pub fn delete_all_transactions(database: &Database) -> Result<bool, Error> {
    let mut conn = database.connect()?;
    let tx = conn.transaction()?;

    let rows_affected = tx.execute("DELETE FROM transactions", [])?;
    tx.execute("DELETE FROM sqlite_sequence WHERE name = 'transactions'", [])?;
    tx.commit()?;

    tracing::info!("deleted all {rows_affected} transactions");
    Ok(true)
}

/// Insert many transactions in a single database transaction.
///
/// Either every record is inserted or, on error, none are.
pub fn insert_transactions(
    database: &Database,
    transactions: &[NewTransaction],
) -> Result<usize, Error> {
    for transaction in transactions {
        transaction.validate()?;
    }

    let mut conn = database.connect()?;
    let tx = conn.transaction()?;
    for transaction in transactions {
        insert(&tx, transaction)?;
    }
    tx.commit()?;

    tracing::info!("inserted {} transactions", transactions.len());
    Ok(transactions.len())
}

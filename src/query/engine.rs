use rusqlite::params_from_iter;

use crate::db::repository::{SELECT_TRANSACTIONS, map_row};
use crate::models::transaction::Transaction;
use crate::{Database, Error};

use super::order::Ordering;
use super::predicate::{Predicate, WhereClause};

/// Get every transaction matching all of `predicates`, sorted by `ordering`
/// (insertion order if `None`).
///
/// An empty predicate list returns the whole table. The full result is loaded
/// into memory.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails or a row cannot be decoded.
pub fn list_transactions(
    database: &Database,
    predicates: &[Predicate],
    ordering: Option<&Ordering>,
) -> Result<Vec<Transaction>, Error> {
    let where_clause = WhereClause::build(predicates);
    let query = format!(
        "{SELECT_TRANSACTIONS}{}{}",
        where_clause.sql,
        Ordering::sql(ordering)
    );
    tracing::debug!("listing transactions: {query} {:?}", where_clause.params);

    let conn = database.connect()?;
    let mut stmt = conn.prepare(&query)?;
    let transactions = stmt
        .query_map(params_from_iter(where_clause.params.iter()), map_row)?
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("found {} transactions", transactions.len());
    Ok(transactions)
}

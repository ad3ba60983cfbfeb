use crate::models::transaction::Transaction;
use crate::query::{FilterInput, Ordering, ResolvedFilter, list_transactions, resolve_filter};
use crate::{Database, Error};

/// Raw arguments of the listing and export commands.
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub filter: FilterInput,
    pub order_by: Option<String>,
    pub order_direction: Option<String>,
}

/// Resolve the filter and ordering, then query the store.
///
/// The arguments are validated before the database is opened, so a bad filter
/// never turns into an empty result.
pub fn list_transactions_from_db(
    database: &Database,
    args: &ListArgs,
) -> Result<(ResolvedFilter, Vec<Transaction>), Error> {
    let filter = resolve_filter(&args.filter)?;
    let ordering = Ordering::parse(args.order_by.as_deref(), args.order_direction.as_deref())?;

    let transactions = list_transactions(database, &filter.predicates, ordering.as_ref())?;
    Ok((filter, transactions))
}

//! Filtering and ordering of stored transactions.
//!
//! User supplied filter tokens are turned into typed [Predicate]s by
//! [resolve_filter], the predicates are compiled into a parameterised `WHERE`
//! clause, and [list_transactions] runs the query.

pub mod engine;
pub mod filter;
pub mod order;
pub mod predicate;

pub use engine::list_transactions;
pub use filter::{FilterInput, ResolvedFilter, month_bounds, month_name, resolve_filter};
pub use order::{OrderBy, OrderDirection, Ordering};
pub use predicate::{Predicate, WhereClause};

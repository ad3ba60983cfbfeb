//! Personal income and expense tracking backed by SQLite.
//!
//! Transactions are stored by [db], selected with the typed filters in
//! [query], totalled by [aggregate] and driven from the command line through
//! [operations].

pub mod aggregate;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod operations;
pub mod query;

pub use config::Config;
pub use db::Database;
pub use error::{Error, ErrorKind};
pub use models::summary::Summary;
pub use models::transaction::{
    ALL_TRANSACTIONS, NewTransaction, Transaction, TransactionId, TransactionPatch,
    TransactionType,
};

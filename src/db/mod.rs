pub mod connection;
pub mod repository;

pub use connection::Database;

//! The user facing commands, each validating its raw input before touching
//! the store.

pub mod add;
pub mod display;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod plot;
pub mod remove;
pub mod summary;

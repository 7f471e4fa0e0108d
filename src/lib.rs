//! Trading journal core: accounts, trades, journal entries, and the
//! dashboard analytics computed over them.
//!
//! Persistence is an embedded SQLite store ([`db::Database`]); the
//! [`service`] layer keeps each account's balance reconciled with its
//! trade history, and [`stats`] turns trade snapshots into the summary,
//! series, and calendar views the presentation layer renders.

pub mod backup;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod service;
pub mod stats;

pub use db::Database;
pub use error::StoreError;

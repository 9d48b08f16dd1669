//! Exports the token transfers of a single Tron wallet as a CSV file
//! importable by CoinTracking.info.
//!
//! Transfers are fetched from the TronScan API, optionally collapsed into
//! aggregates by the grouping engine, classified with configurable
//! transaction-type rules and rendered as accounting rows.

pub mod config;
pub mod engine;
pub mod exporter;
pub mod ledger;
pub mod models;
pub mod report;

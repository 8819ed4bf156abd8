//! Storage layer for the bot
//!
//! The points ledger is the only persisted state.

/// Database storage module
pub mod database;

pub use database::Ledger;

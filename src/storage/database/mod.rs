//! Points ledger storage using SeaORM
//!
//! Tables for group members, daily sign-ins and point changes. Every mutation
//! runs inside a single database transaction.

/// Database entities module
pub mod entities;
/// Ledger operations
pub mod ledger;
/// Database migration module
pub mod migration;

pub use ledger::{
    BACKFILL_COST, BackfillOutcome, LeaderboardEntry, Ledger, PointsChange, SignInOutcome,
    SignInReceipt,
};

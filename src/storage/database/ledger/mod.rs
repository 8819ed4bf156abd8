//! Ledger operations

mod connection;
mod query_ops;
mod sign_ops;
mod types;


pub use types::{
    BACKFILL_COST, BackfillOutcome, LeaderboardEntry, Ledger, PointsChange, SignInOutcome,
    SignInReceipt,
};

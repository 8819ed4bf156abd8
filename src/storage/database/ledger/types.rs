use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;

/// Points for any sign-in
pub const SIGN_BASE_POINTS: i32 = 10;
/// Cap on the streak bonus
pub const MAX_STREAK_BONUS: i32 = 5;
/// Price of one backfilled day
pub const BACKFILL_COST: i32 = 15;
/// Rows returned when the caller gives no limit
pub const DEFAULT_LIST_LIMIT: u64 = 10;
/// Upper bound on leaderboard and history lengths
pub const MAX_LIST_LIMIT: u64 = 20;

/// Points ledger backed by SeaORM
#[derive(Debug, Clone)]
pub struct Ledger {
    pub(super) db: DatabaseConnection,
}

/// Result of a successful daily sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInReceipt {
    pub earned: i32,
    /// Consecutive days including today
    pub streak: i32,
    /// Days signed in this group, backfills included
    pub total_days: u64,
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    Signed(SignInReceipt),
    AlreadySigned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackfillOutcome {
    Backfilled {
        date: NaiveDate,
        cost: i32,
        balance: i64,
    },
    InsufficientPoints {
        required: i32,
        balance: i64,
    },
    /// The day after the latest record is today or later
    NothingToBackfill,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub username: String,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsChange {
    pub change: i32,
    pub reason: String,
    pub at: DateTimeWithTimeZone,
}

/// Streak bonus rule: base points plus one per extra streak day, capped
pub(super) fn points_for_streak(streak: i32) -> i32 {
    SIGN_BASE_POINTS + (streak - 1).clamp(0, MAX_STREAK_BONUS)
}

/// Default to 10 rows, never more than 20
pub(super) fn clamp_limit(limit: Option<u64>) -> u64 {
    limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT)
}

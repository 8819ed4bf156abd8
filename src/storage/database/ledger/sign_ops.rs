use crate::utils::error::{BotError, Result};
use chrono::NaiveDate;
use sea_orm::prelude::{DateTimeWithTimeZone, Expr};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, ledger_user, points_history, sign_record};
use super::types::{
    BACKFILL_COST, BackfillOutcome, Ledger, SignInOutcome, SignInReceipt, points_for_streak,
};

fn now() -> DateTimeWithTimeZone {
    chrono::Utc::now().into()
}

impl Ledger {
    /// Record today's sign-in and grant points
    pub async fn sign_in(
        &self,
        user_id: &str,
        group_id: &str,
        username: &str,
        today: NaiveDate,
    ) -> Result<SignInOutcome> {
        debug!(user_id, group_id, "Signing in for {}", today);
        let txn = self.db.begin().await?;

        ensure_user(&txn, user_id, group_id, username).await?;

        if find_record(&txn, user_id, group_id, today).await?.is_some() {
            return Ok(SignInOutcome::AlreadySigned);
        }

        let streak = match today.pred_opt() {
            Some(yesterday) => find_record(&txn, user_id, group_id, yesterday)
                .await?
                .map(|r| r.continuous_days + 1)
                .unwrap_or(1),
            None => 1,
        };
        let earned = points_for_streak(streak);

        insert_record(&txn, user_id, group_id, today, earned, streak).await?;
        let balance = change_points(
            &txn,
            user_id,
            group_id,
            earned,
            &format!("Daily sign-in ({} day streak)", streak),
        )
        .await?;

        let total_days = entities::SignRecord::find()
            .filter(sign_record::Column::UserId.eq(user_id))
            .filter(sign_record::Column::GroupId.eq(group_id))
            .count(&txn)
            .await?;

        txn.commit().await?;

        Ok(SignInOutcome::Signed(SignInReceipt {
            earned,
            streak,
            total_days,
            balance,
        }))
    }

    /// Spend points to fill the day after the latest sign-in
    ///
    /// A member who never signed in backfills yesterday. Backfilled days earn
    /// nothing and start a new streak.
    pub async fn backfill(
        &self,
        user_id: &str,
        group_id: &str,
        username: &str,
        today: NaiveDate,
    ) -> Result<BackfillOutcome> {
        let txn = self.db.begin().await?;

        let balance = ensure_user(&txn, user_id, group_id, username)
            .await?
            .total_points;
        if balance < i64::from(BACKFILL_COST) {
            return Ok(BackfillOutcome::InsufficientPoints {
                required: BACKFILL_COST,
                balance,
            });
        }

        let latest = entities::SignRecord::find()
            .filter(sign_record::Column::UserId.eq(user_id))
            .filter(sign_record::Column::GroupId.eq(group_id))
            .order_by_desc(sign_record::Column::SignDate)
            .one(&txn)
            .await?;

        let missed = match latest {
            Some(record) => record.sign_date.succ_opt(),
            None => today.pred_opt(),
        };
        let Some(date) = missed.filter(|d| *d < today) else {
            return Ok(BackfillOutcome::NothingToBackfill);
        };

        let balance = change_points(
            &txn,
            user_id,
            group_id,
            -BACKFILL_COST,
            &format!("Backfill {}", date),
        )
        .await?;
        insert_record(&txn, user_id, group_id, date, 0, 1).await?;

        txn.commit().await?;
        debug!(user_id, group_id, "Backfilled {}", date);

        Ok(BackfillOutcome::Backfilled {
            date,
            cost: BACKFILL_COST,
            balance,
        })
    }
}

/// Fetch the member row, creating it with a zero balance on first use
pub(super) async fn ensure_user<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    group_id: &str,
    username: &str,
) -> Result<ledger_user::Model> {
    let key = (user_id.to_string(), group_id.to_string());
    if let Some(user) = entities::LedgerUser::find_by_id(key).one(conn).await? {
        return Ok(user);
    }

    let user = ledger_user::ActiveModel {
        user_id: Set(user_id.to_string()),
        group_id: Set(group_id.to_string()),
        username: Set(username.to_string()),
        total_points: Set(0),
        created_at: Set(now()),
    }
    .insert(conn)
    .await?;
    Ok(user)
}

async fn find_record<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    group_id: &str,
    date: NaiveDate,
) -> Result<Option<sign_record::Model>> {
    Ok(entities::SignRecord::find()
        .filter(sign_record::Column::UserId.eq(user_id))
        .filter(sign_record::Column::GroupId.eq(group_id))
        .filter(sign_record::Column::SignDate.eq(date))
        .one(conn)
        .await?)
}

async fn insert_record<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    group_id: &str,
    date: NaiveDate,
    points_earned: i32,
    continuous_days: i32,
) -> Result<()> {
    sign_record::ActiveModel {
        user_id: Set(user_id.to_string()),
        group_id: Set(group_id.to_string()),
        sign_date: Set(date),
        points_earned: Set(points_earned),
        continuous_days: Set(continuous_days),
        created_at: Set(now()),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    Ok(())
}

/// Adjust the balance and log the change; returns the new balance
async fn change_points<C: ConnectionTrait>(
    conn: &C,
    user_id: &str,
    group_id: &str,
    change: i32,
    reason: &str,
) -> Result<i64> {
    let updated = entities::LedgerUser::update_many()
        .col_expr(
            ledger_user::Column::TotalPoints,
            Expr::col(ledger_user::Column::TotalPoints).add(change),
        )
        .filter(ledger_user::Column::UserId.eq(user_id))
        .filter(ledger_user::Column::GroupId.eq(group_id))
        .exec(conn)
        .await?;
    if updated.rows_affected == 0 {
        return Err(BotError::Internal(format!(
            "Ledger row missing for {} in {}",
            user_id, group_id
        )));
    }

    points_history::ActiveModel {
        user_id: Set(user_id.to_string()),
        group_id: Set(group_id.to_string()),
        points_change: Set(change),
        reason: Set(reason.to_string()),
        created_at: Set(now()),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    let key = (user_id.to_string(), group_id.to_string());
    entities::LedgerUser::find_by_id(key)
        .one(conn)
        .await?
        .map(|user| user.total_points)
        .ok_or_else(|| BotError::Internal(format!("Ledger row vanished for {}", user_id)))
}

use crate::utils::error::Result;
use sea_orm::*;

use super::super::entities::{self, ledger_user, points_history};
use super::types::{LeaderboardEntry, Ledger, PointsChange, clamp_limit};

impl Ledger {
    /// Current balance; zero for members without a row
    pub async fn balance(&self, user_id: &str, group_id: &str) -> Result<i64> {
        let key = (user_id.to_string(), group_id.to_string());
        Ok(entities::LedgerUser::find_by_id(key)
            .one(&self.db)
            .await?
            .map(|user| user.total_points)
            .unwrap_or(0))
    }

    /// Top balances in a group
    pub async fn leaderboard(
        &self,
        group_id: &str,
        limit: Option<u64>,
    ) -> Result<Vec<LeaderboardEntry>> {
        let rows = entities::LedgerUser::find()
            .filter(ledger_user::Column::GroupId.eq(group_id))
            .order_by_desc(ledger_user::Column::TotalPoints)
            .order_by_asc(ledger_user::Column::UserId)
            .limit(clamp_limit(limit))
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|user| LeaderboardEntry {
                user_id: user.user_id,
                username: user.username,
                points: user.total_points,
            })
            .collect())
    }

    /// Latest point changes, newest first
    pub async fn history(
        &self,
        user_id: &str,
        group_id: &str,
        limit: Option<u64>,
    ) -> Result<Vec<PointsChange>> {
        let rows = entities::PointsHistory::find()
            .filter(points_history::Column::UserId.eq(user_id))
            .filter(points_history::Column::GroupId.eq(group_id))
            .order_by_desc(points_history::Column::CreatedAt)
            .order_by_desc(points_history::Column::Id)
            .limit(clamp_limit(limit))
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| PointsChange {
                change: row.points_change,
                reason: row.reason,
                at: row.created_at,
            })
            .collect())
    }
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One sign-in (or backfilled) day
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sign_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: String,

    pub group_id: String,

    pub sign_date: Date,

    /// Points granted for the day, zero for backfilled days
    pub points_earned: i32,

    /// Streak length including this day
    pub continuous_days: i32,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

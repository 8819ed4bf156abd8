use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::UserId).string().not_null())
                    .col(ColumnDef::new(Users::GroupId).string().not_null())
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(
                        ColumnDef::new(Users::TotalPoints)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(Index::create().col(Users::UserId).col(Users::GroupId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_group_points")
                    .table(Users::Table)
                    .col(Users::GroupId)
                    .col(Users::TotalPoints)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SignRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SignRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SignRecords::UserId).string().not_null())
                    .col(ColumnDef::new(SignRecords::GroupId).string().not_null())
                    .col(ColumnDef::new(SignRecords::SignDate).date().not_null())
                    .col(
                        ColumnDef::new(SignRecords::PointsEarned)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SignRecords::ContinuousDays)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(SignRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One record per member per day
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sign_records_user_day")
                    .table(SignRecords::Table)
                    .col(SignRecords::UserId)
                    .col(SignRecords::GroupId)
                    .col(SignRecords::SignDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PointsHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PointsHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PointsHistory::UserId).string().not_null())
                    .col(ColumnDef::new(PointsHistory::GroupId).string().not_null())
                    .col(
                        ColumnDef::new(PointsHistory::PointsChange)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PointsHistory::Reason).string().not_null())
                    .col(
                        ColumnDef::new(PointsHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_points_history_user")
                    .table(PointsHistory::Table)
                    .col(PointsHistory::UserId)
                    .col(PointsHistory::GroupId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PointsHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SignRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
    GroupId,
    Username,
    TotalPoints,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SignRecords {
    Table,
    Id,
    UserId,
    GroupId,
    SignDate,
    PointsEarned,
    ContinuousDays,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PointsHistory {
    Table,
    Id,
    UserId,
    GroupId,
    PointsChange,
    Reason,
    CreatedAt,
}

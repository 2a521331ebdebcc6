use sea_orm_migration::{prelude::*, schema::*};

static IDX_NOTIFICATIONS_USER_ID: &str = "idx_notifications_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(pk_auto(Notifications::NotificationId))
                    .col(integer(Notifications::UserId))
                    .col(string_len(Notifications::Type, 32))
                    .col(string(Notifications::Title))
                    .col(text(Notifications::Message))
                    .col(json(Notifications::Data))
                    .col(boolean(Notifications::IsRead).default(false))
                    .col(boolean(Notifications::IsDeleted).default(false))
                    .col(timestamp(Notifications::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_NOTIFICATIONS_USER_ID)
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_NOTIFICATIONS_USER_ID)
                    .table(Notifications::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    NotificationId,
    UserId,
    Type,
    Title,
    Message,
    Data,
    IsRead,
    IsDeleted,
    CreatedAt,
}

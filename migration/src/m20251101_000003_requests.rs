use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_users::Users, m20251101_000002_donations::Donations};

static IDX_REQUESTS_DONATION_ID: &str = "idx_requests_donation_id";
static IDX_REQUESTS_USER_ID: &str = "idx_requests_user_id";
static FK_REQUESTS_DONATION_ID: &str = "fk_requests_donation_id";
static FK_REQUESTS_USER_ID: &str = "fk_requests_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Requests::Table)
                    .if_not_exists()
                    .col(pk_auto(Requests::RequestId))
                    .col(integer(Requests::UserId))
                    .col(integer(Requests::DonationId))
                    .col(string_len(Requests::RequestedQuantity, 50))
                    .col(timestamp(Requests::PickupTime))
                    .col(text(Requests::Note))
                    .col(string_len(Requests::RequestStatus, 16))
                    .col(timestamp(Requests::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_REQUESTS_DONATION_ID)
                    .table(Requests::Table)
                    .col(Requests::DonationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_REQUESTS_USER_ID)
                    .table(Requests::Table)
                    .col(Requests::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REQUESTS_DONATION_ID)
                    .from_tbl(Requests::Table)
                    .from_col(Requests::DonationId)
                    .to_tbl(Donations::Table)
                    .to_col(Donations::DonationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REQUESTS_USER_ID)
                    .from_tbl(Requests::Table)
                    .from_col(Requests::UserId)
                    .to_tbl(Users::Table)
                    .to_col(Users::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_REQUESTS_USER_ID)
                    .table(Requests::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_REQUESTS_DONATION_ID)
                    .table(Requests::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_REQUESTS_USER_ID)
                    .table(Requests::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_REQUESTS_DONATION_ID)
                    .table(Requests::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Requests::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Requests {
    Table,
    RequestId,
    UserId,
    DonationId,
    RequestedQuantity,
    PickupTime,
    Note,
    RequestStatus,
    CreatedAt,
}

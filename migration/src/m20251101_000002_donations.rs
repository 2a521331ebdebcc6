use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_users::Users;

static IDX_DONATIONS_USER_ID: &str = "idx_donations_user_id";
static IDX_DONATIONS_STATUS: &str = "idx_donations_donation_status";
static FK_DONATIONS_USER_ID: &str = "fk_donations_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Donations::Table)
                    .if_not_exists()
                    .col(pk_auto(Donations::DonationId))
                    .col(integer(Donations::UserId))
                    .col(string_len(Donations::Title, 255))
                    .col(text(Donations::Description))
                    .col(string(Donations::Location))
                    .col(double(Donations::QuantityValue))
                    .col(string_len(Donations::QuantityUnit, 8))
                    .col(date(Donations::ExpiryDate))
                    .col(string_len(Donations::Category, 32))
                    .col(string_len(Donations::DonationStatus, 16))
                    .col(string_null(Donations::DonationPicture))
                    .col(timestamp(Donations::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DONATIONS_USER_ID)
                    .table(Donations::Table)
                    .col(Donations::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DONATIONS_STATUS)
                    .table(Donations::Table)
                    .col(Donations::DonationStatus)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DONATIONS_USER_ID)
                    .from_tbl(Donations::Table)
                    .from_col(Donations::UserId)
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
                    .name(FK_DONATIONS_USER_ID)
                    .table(Donations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DONATIONS_STATUS)
                    .table(Donations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DONATIONS_USER_ID)
                    .table(Donations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Donations::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Donations {
    Table,
    DonationId,
    UserId,
    Title,
    Description,
    Location,
    QuantityValue,
    QuantityUnit,
    ExpiryDate,
    Category,
    DonationStatus,
    DonationPicture,
    CreatedAt,
}

use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_users::Users, m20251101_000002_donations::Donations};

static IDX_RATINGS_DONATION_USER: &str = "idx_ratings_donation_id_user_id";
static FK_RATINGS_DONATION_ID: &str = "fk_ratings_donation_id";
static FK_RATINGS_USER_ID: &str = "fk_ratings_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(pk_auto(Ratings::RatingId))
                    .col(integer(Ratings::DonationId))
                    .col(integer(Ratings::UserId))
                    .col(integer(Ratings::Rate))
                    .col(text_null(Ratings::Review))
                    .col(timestamp(Ratings::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // One rating per (donation, rater)
        manager
            .create_index(
                Index::create()
                    .name(IDX_RATINGS_DONATION_USER)
                    .table(Ratings::Table)
                    .col(Ratings::DonationId)
                    .col(Ratings::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RATINGS_DONATION_ID)
                    .from_tbl(Ratings::Table)
                    .from_col(Ratings::DonationId)
                    .to_tbl(Donations::Table)
                    .to_col(Donations::DonationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RATINGS_USER_ID)
                    .from_tbl(Ratings::Table)
                    .from_col(Ratings::UserId)
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
                    .name(FK_RATINGS_USER_ID)
                    .table(Ratings::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_RATINGS_DONATION_ID)
                    .table(Ratings::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_RATINGS_DONATION_USER)
                    .table(Ratings::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Ratings::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Ratings {
    Table,
    RatingId,
    DonationId,
    UserId,
    Rate,
    Review,
    CreatedAt,
}

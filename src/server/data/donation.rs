use chrono::{NaiveDate, Utc};
use entity::donation::{Category, DonationStatus, QuantityUnit};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::data::for_update;

/// Validated fields of a new donation, quantity already in its canonical unit.
#[derive(Clone, Debug)]
pub struct NewDonation {
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub quantity_value: f64,
    pub quantity_unit: QuantityUnit,
    pub expiry_date: NaiveDate,
    pub category: Category,
    pub donation_picture: Option<String>,
}

pub struct DonationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DonationRepository<'a, C> {
    /// Creates a new instance of [`DonationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a donation in `available` status
    pub async fn create(&self, donation: NewDonation) -> Result<entity::donation::Model, DbErr> {
        let donation = entity::donation::ActiveModel {
            user_id: ActiveValue::Set(donation.user_id),
            title: ActiveValue::Set(donation.title),
            description: ActiveValue::Set(donation.description),
            location: ActiveValue::Set(donation.location),
            quantity_value: ActiveValue::Set(donation.quantity_value),
            quantity_unit: ActiveValue::Set(donation.quantity_unit),
            expiry_date: ActiveValue::Set(donation.expiry_date),
            category: ActiveValue::Set(donation.category),
            donation_status: ActiveValue::Set(DonationStatus::Available),
            donation_picture: ActiveValue::Set(donation.donation_picture),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        donation.insert(self.db).await
    }

    pub async fn get(&self, donation_id: i32) -> Result<Option<entity::donation::Model>, DbErr> {
        entity::prelude::Donation::find_by_id(donation_id)
            .one(self.db)
            .await
    }

    /// Reads a donation and locks its row until the surrounding transaction ends
    pub async fn get_for_update(
        &self,
        donation_id: i32,
    ) -> Result<Option<entity::donation::Model>, DbErr> {
        for_update(entity::prelude::Donation::find_by_id(donation_id), self.db)
            .one(self.db)
            .await
    }

    /// Lists donations newest first, optionally filtered by status
    pub async fn list(
        &self,
        status: Option<DonationStatus>,
    ) -> Result<Vec<entity::donation::Model>, DbErr> {
        let mut query = entity::prelude::Donation::find();

        if let Some(status) = status {
            query = query.filter(entity::donation::Column::DonationStatus.eq(status));
        }

        query
            .order_by_desc(entity::donation::Column::CreatedAt)
            .order_by_desc(entity::donation::Column::DonationId)
            .all(self.db)
            .await
    }

    /// Writes status and quantity only if the row still holds the values in `expected`.
    ///
    /// Returns `false` when another writer changed the donation since it was read.
    pub async fn compare_and_set(
        &self,
        expected: &entity::donation::Model,
        status: DonationStatus,
        quantity_value: f64,
    ) -> Result<bool, DbErr> {
        let update = entity::donation::ActiveModel {
            donation_status: ActiveValue::Set(status),
            quantity_value: ActiveValue::Set(quantity_value),
            ..Default::default()
        };

        let result = entity::prelude::Donation::update_many()
            .set(update)
            .filter(entity::donation::Column::DonationId.eq(expected.donation_id))
            .filter(entity::donation::Column::DonationStatus.eq(expected.donation_status))
            .filter(entity::donation::Column::QuantityValue.eq(expected.quantity_value))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Replaces the donation picture URL, returns `false` if the donation does not exist
    pub async fn set_picture(&self, donation_id: i32, url: String) -> Result<bool, DbErr> {
        let update = entity::donation::ActiveModel {
            donation_picture: ActiveValue::Set(Some(url)),
            ..Default::default()
        };

        let result = entity::prelude::Donation::update_many()
            .set(update)
            .filter(entity::donation::Column::DonationId.eq(donation_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}

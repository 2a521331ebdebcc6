use chrono::{Duration, Utc};
use entity::donation::{Category, DonationStatus, QuantityUnit};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn donation<'a>(&'a mut self) -> DonationFixtures<'a> {
        DonationFixtures { setup: self }
    }
}

pub struct DonationFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> DonationFixtures<'a> {
    /// Inserts an `available` donation of `quantity_value` kg owned by `owner_id`.
    pub async fn insert_donation(
        &self,
        owner_id: i32,
        quantity_value: f64,
    ) -> Result<entity::donation::Model, TestError> {
        self.insert_donation_with_status(owner_id, quantity_value, DonationStatus::Available)
            .await
    }

    /// Inserts a donation in an arbitrary status, bypassing the lifecycle rules.
    pub async fn insert_donation_with_status(
        &self,
        owner_id: i32,
        quantity_value: f64,
        status: DonationStatus,
    ) -> Result<entity::donation::Model, TestError> {
        let now = Utc::now();

        Ok(
            entity::prelude::Donation::insert(entity::donation::ActiveModel {
                user_id: ActiveValue::Set(owner_id),
                title: ActiveValue::Set("Fresh bread".to_string()),
                description: ActiveValue::Set("Leftover loaves from today".to_string()),
                location: ActiveValue::Set("Main street 1".to_string()),
                quantity_value: ActiveValue::Set(quantity_value),
                quantity_unit: ActiveValue::Set(QuantityUnit::Kg),
                expiry_date: ActiveValue::Set((now + Duration::days(3)).date_naive()),
                category: ActiveValue::Set(Category::Bakery),
                donation_status: ActiveValue::Set(status),
                donation_picture: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now.naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}

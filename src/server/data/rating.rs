use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct RatingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RatingRepository<'a, C> {
    /// Creates a new instance of [`RatingRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        donation_id: i32,
        user_id: i32,
        rate: i32,
        review: Option<String>,
    ) -> Result<entity::rating::Model, DbErr> {
        let rating = entity::rating::ActiveModel {
            donation_id: ActiveValue::Set(donation_id),
            user_id: ActiveValue::Set(user_id),
            rate: ActiveValue::Set(rate),
            review: ActiveValue::Set(review),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        rating.insert(self.db).await
    }

    pub async fn find_by_donation_and_user(
        &self,
        donation_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::rating::Model>, DbErr> {
        entity::prelude::Rating::find()
            .filter(entity::rating::Column::DonationId.eq(donation_id))
            .filter(entity::rating::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    /// Lists the ratings of a donation newest first
    pub async fn list_by_donation(
        &self,
        donation_id: i32,
    ) -> Result<Vec<entity::rating::Model>, DbErr> {
        entity::prelude::Rating::find()
            .filter(entity::rating::Column::DonationId.eq(donation_id))
            .order_by_desc(entity::rating::Column::CreatedAt)
            .order_by_desc(entity::rating::Column::RatingId)
            .all(self.db)
            .await
    }
}

use chrono::{Duration, Utc};
use entity::request::RequestStatus;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn request<'a>(&'a mut self) -> RequestFixtures<'a> {
        RequestFixtures { setup: self }
    }
}

pub struct RequestFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> RequestFixtures<'a> {
    /// Inserts a `waiting` request by `requester_id`.
    pub async fn insert_request(
        &self,
        requester_id: i32,
        donation_id: i32,
        requested_quantity: &str,
    ) -> Result<entity::request::Model, TestError> {
        self.insert_request_with_status(
            requester_id,
            donation_id,
            requested_quantity,
            RequestStatus::Waiting,
        )
        .await
    }

    /// Inserts a request in an arbitrary status, bypassing the lifecycle rules.
    pub async fn insert_request_with_status(
        &self,
        requester_id: i32,
        donation_id: i32,
        requested_quantity: &str,
        status: RequestStatus,
    ) -> Result<entity::request::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Request::insert(entity::request::ActiveModel {
                user_id: ActiveValue::Set(requester_id),
                donation_id: ActiveValue::Set(donation_id),
                requested_quantity: ActiveValue::Set(requested_quantity.to_string()),
                pickup_time: ActiveValue::Set(now + Duration::hours(2)),
                note: ActiveValue::Set("I can pick up after work".to_string()),
                request_status: ActiveValue::Set(status),
                created_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}

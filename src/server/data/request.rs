use chrono::{NaiveDateTime, Utc};
use entity::request::RequestStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::data::for_update;

/// Validated fields of a new request.
#[derive(Clone, Debug)]
pub struct NewRequest {
    pub user_id: i32,
    pub donation_id: i32,
    pub requested_quantity: String,
    pub pickup_time: NaiveDateTime,
    pub note: String,
}

pub struct RequestRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RequestRepository<'a, C> {
    /// Creates a new instance of [`RequestRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a request in `waiting` status
    pub async fn create(&self, request: NewRequest) -> Result<entity::request::Model, DbErr> {
        let request = entity::request::ActiveModel {
            user_id: ActiveValue::Set(request.user_id),
            donation_id: ActiveValue::Set(request.donation_id),
            requested_quantity: ActiveValue::Set(request.requested_quantity),
            pickup_time: ActiveValue::Set(request.pickup_time),
            note: ActiveValue::Set(request.note),
            request_status: ActiveValue::Set(RequestStatus::Waiting),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        request.insert(self.db).await
    }

    pub async fn get(&self, request_id: i32) -> Result<Option<entity::request::Model>, DbErr> {
        entity::prelude::Request::find_by_id(request_id)
            .one(self.db)
            .await
    }

    /// Reads a request and locks its row until the surrounding transaction ends
    pub async fn get_for_update(
        &self,
        request_id: i32,
    ) -> Result<Option<entity::request::Model>, DbErr> {
        for_update(entity::prelude::Request::find_by_id(request_id), self.db)
            .one(self.db)
            .await
    }

    /// Lists the requests of a donation oldest first
    pub async fn list_by_donation(
        &self,
        donation_id: i32,
    ) -> Result<Vec<entity::request::Model>, DbErr> {
        entity::prelude::Request::find()
            .filter(entity::request::Column::DonationId.eq(donation_id))
            .order_by_asc(entity::request::Column::CreatedAt)
            .order_by_asc(entity::request::Column::RequestId)
            .all(self.db)
            .await
    }

    /// Moves a request from `expected` to `status`.
    ///
    /// Returns `false` when the request is no longer in `expected`.
    pub async fn compare_and_set_status(
        &self,
        request_id: i32,
        expected: RequestStatus,
        status: RequestStatus,
    ) -> Result<bool, DbErr> {
        let update = entity::request::ActiveModel {
            request_status: ActiveValue::Set(status),
            ..Default::default()
        };

        let result = entity::prelude::Request::update_many()
            .set(update)
            .filter(entity::request::Column::RequestId.eq(request_id))
            .filter(entity::request::Column::RequestStatus.eq(expected))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Finds an `approved` request of a donation other than `request_id`
    pub async fn find_other_approved(
        &self,
        donation_id: i32,
        request_id: i32,
    ) -> Result<Option<entity::request::Model>, DbErr> {
        entity::prelude::Request::find()
            .filter(entity::request::Column::DonationId.eq(donation_id))
            .filter(entity::request::Column::RequestStatus.eq(RequestStatus::Approved))
            .filter(entity::request::Column::RequestId.ne(request_id))
            .one(self.db)
            .await
    }

    /// Rejects every `waiting` request of a donation except `keep_request_id`.
    ///
    /// Returns the rejected requests with their new status.
    pub async fn reject_waiting_for_donation(
        &self,
        donation_id: i32,
        keep_request_id: i32,
    ) -> Result<Vec<entity::request::Model>, DbErr> {
        let waiting = entity::prelude::Request::find()
            .filter(entity::request::Column::DonationId.eq(donation_id))
            .filter(entity::request::Column::RequestStatus.eq(RequestStatus::Waiting))
            .filter(entity::request::Column::RequestId.ne(keep_request_id))
            .all(self.db)
            .await?;

        if waiting.is_empty() {
            return Ok(waiting);
        }

        let ids: Vec<i32> = waiting.iter().map(|r| r.request_id).collect();
        let update = entity::request::ActiveModel {
            request_status: ActiveValue::Set(RequestStatus::Rejected),
            ..Default::default()
        };

        entity::prelude::Request::update_many()
            .set(update)
            .filter(entity::request::Column::RequestId.is_in(ids))
            .filter(entity::request::Column::RequestStatus.eq(RequestStatus::Waiting))
            .exec(self.db)
            .await?;

        Ok(waiting
            .into_iter()
            .map(|mut request| {
                request.request_status = RequestStatus::Rejected;
                request
            })
            .collect())
    }
}

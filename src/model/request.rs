use chrono::NaiveDateTime;
use entity::request::RequestStatus;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/requests`
///
/// Fields are optional on the wire so that a missing field is reported as a
/// validation error instead of a deserialization rejection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreateRequestDto {
    pub donation_id: Option<i32>,
    /// Free text such as `"2 kg"`, the leading token must be numeric
    pub requested_quantity: Option<String>,
    /// RFC 3339 timestamp, or one without offset which is taken as UTC
    pub pickup_time: Option<String>,
    pub note: Option<String>,
}

/// Body of `PATCH /api/requests/{id}/status`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateRequestStatusDto {
    pub status: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RequestDto {
    pub request_id: i32,
    pub user_id: i32,
    pub donation_id: i32,
    pub requested_quantity: String,
    pub pickup_time: NaiveDateTime,
    pub note: String,
    pub request_status: RequestStatus,
    pub created_at: NaiveDateTime,
}

impl From<entity::request::Model> for RequestDto {
    fn from(model: entity::request::Model) -> Self {
        Self {
            request_id: model.request_id,
            user_id: model.user_id,
            donation_id: model.donation_id,
            requested_quantity: model.requested_quantity,
            pickup_time: model.pickup_time,
            note: model.note,
            request_status: model.request_status,
            created_at: model.created_at,
        }
    }
}

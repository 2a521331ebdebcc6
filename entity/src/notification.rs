use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    #[sea_orm(string_value = "donation_created")]
    DonationCreated,
    #[sea_orm(string_value = "donation_confirmed")]
    DonationConfirmed,
    #[sea_orm(string_value = "donation_completed")]
    DonationCompleted,
    #[sea_orm(string_value = "request_approved")]
    RequestApproved,
    #[sea_orm(string_value = "request_rejected")]
    RequestRejected,
    #[sea_orm(string_value = "request_canceled")]
    RequestCanceled,
    #[sea_orm(string_value = "request_completed")]
    RequestCompleted,
    #[sea_orm(string_value = "rating")]
    Rating,
}

/// Notifications are not tied to user rows by a foreign key, delivery is best-effort.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub notification_id: i32,
    /// Recipient
    pub user_id: i32,
    #[sea_orm(column_name = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    #[sea_orm(column_type = "Json")]
    pub data: Json,
    #[sea_orm(default_value = false)]
    pub is_read: bool,
    #[sea_orm(default_value = false)]
    pub is_deleted: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

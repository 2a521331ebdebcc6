use chrono::Utc;
use entity::notification::NotificationType;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    /// Creates a new instance of [`NotificationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores an unread notification
    pub async fn create(
        &self,
        user_id: i32,
        notification_type: NotificationType,
        title: String,
        message: String,
        data: serde_json::Value,
    ) -> Result<entity::notification::Model, DbErr> {
        let notification = entity::notification::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            notification_type: ActiveValue::Set(notification_type),
            title: ActiveValue::Set(title),
            message: ActiveValue::Set(message),
            data: ActiveValue::Set(data),
            is_read: ActiveValue::Set(false),
            is_deleted: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        notification.insert(self.db).await
    }

    /// Lists a user's notifications that are not soft-deleted, oldest first
    pub async fn get_many_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Vec<entity::notification::Model>, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::IsDeleted.eq(false))
            .order_by_asc(entity::notification::Column::NotificationId)
            .all(self.db)
            .await
    }
}

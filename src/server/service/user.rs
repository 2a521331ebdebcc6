//! Read access to the identity provider's user mirror.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository, error::Error, model::db::UserModel, service::retry::RetryPolicy,
};

/// Display name used when the rater's user record is missing.
const UNKNOWN_USER_NAME: &str = "A ShareFood user";

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user, retrying transient database failures.
    ///
    /// # Returns
    /// - `Ok(Some(UserModel))` - User found
    /// - `Ok(None)` - User not found in database
    /// - `Err(Error::DbErr)` - Database operation failed after retries
    pub async fn get_user(&self, user_id: i32) -> Result<Option<UserModel>, Error> {
        let db = self.db.clone();

        RetryPolicy::default()
            .execute_with_retry(&format!("get user ID {}", user_id), || {
                let db = db.clone();

                async move {
                    let user = UserRepository::new(&db).get(user_id).await?;

                    Ok::<_, Error>(user)
                }
            })
            .await
    }

    /// Name shown to other users in notification text.
    pub async fn get_display_name(&self, user_id: i32) -> Result<String, Error> {
        Ok(self
            .get_user(user_id)
            .await?
            .map(|user| user.name)
            .unwrap_or_else(|| UNKNOWN_USER_NAME.to_string()))
    }
}

use sea_orm::DatabaseConnection;

use crate::server::service::image_host::ImageHostClient;

/// Behaviour switches for the request lifecycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct LifecycleSettings {
    /// Reject every other waiting request of a donation once one of them is approved.
    pub auto_reject_on_approve: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub image_host: ImageHostClient,
    pub jwt_secret: String,
    pub settings: LifecycleSettings,
}

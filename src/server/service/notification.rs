//! Best-effort notification sink.
//!
//! Lifecycle services emit [`NotificationEvent`]s after their transaction commits. A
//! failed insert is logged and dropped, it never fails or rolls back the transition that
//! produced it.

use entity::notification::NotificationType;
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::server::{
    data::notification::NotificationRepository,
    model::db::{DonationModel, RatingModel, RequestModel},
};

#[derive(Clone, Debug, PartialEq)]
pub struct NotificationEvent {
    pub user_id: i32,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub data: serde_json::Value,
}

impl NotificationEvent {
    /// Tells the donor their posting is live.
    pub fn donation_created(donation: &DonationModel) -> Self {
        Self {
            user_id: donation.user_id,
            notification_type: NotificationType::DonationCreated,
            title: "Donation posted".to_string(),
            message: format!("Your donation \"{}\" is now available.", donation.title),
            data: json!({ "donation_id": donation.donation_id }),
        }
    }

    /// Tells the donor a pickup has been arranged.
    pub fn donation_confirmed(donation: &DonationModel, request: &RequestModel) -> Self {
        Self {
            user_id: donation.user_id,
            notification_type: NotificationType::DonationConfirmed,
            title: "Donation confirmed".to_string(),
            message: format!(
                "Your donation \"{}\" is reserved for pickup.",
                donation.title
            ),
            data: json!({
                "donation_id": donation.donation_id,
                "request_id": request.request_id,
            }),
        }
    }

    /// Tells the donor the donation is finished and open for ratings.
    pub fn donation_completed(donation: &DonationModel) -> Self {
        Self {
            user_id: donation.user_id,
            notification_type: NotificationType::DonationCompleted,
            title: "Donation completed".to_string(),
            message: format!("Your donation \"{}\" has been completed.", donation.title),
            data: json!({
                "donation_id": donation.donation_id,
                "quantity_value": donation.quantity_value,
            }),
        }
    }

    pub fn request_approved(request: &RequestModel, donation: &DonationModel) -> Self {
        Self {
            user_id: request.user_id,
            notification_type: NotificationType::RequestApproved,
            title: "Request approved".to_string(),
            message: format!(
                "Your request for \"{}\" was approved, pickup at {}.",
                donation.title, request.pickup_time
            ),
            data: request_data(request),
        }
    }

    pub fn request_rejected(request: &RequestModel, donation: &DonationModel) -> Self {
        Self {
            user_id: request.user_id,
            notification_type: NotificationType::RequestRejected,
            title: "Request rejected".to_string(),
            message: format!("Your request for \"{}\" was rejected.", donation.title),
            data: request_data(request),
        }
    }

    /// Tells `recipient_id`, the party that did not cancel, about the cancellation.
    pub fn request_canceled(
        recipient_id: i32,
        request: &RequestModel,
        donation: &DonationModel,
    ) -> Self {
        Self {
            user_id: recipient_id,
            notification_type: NotificationType::RequestCanceled,
            title: "Request canceled".to_string(),
            message: format!("A request for \"{}\" was canceled.", donation.title),
            data: request_data(request),
        }
    }

    /// Tells the donor the requester picked up their share.
    pub fn request_completed(request: &RequestModel, donation: &DonationModel) -> Self {
        Self {
            user_id: donation.user_id,
            notification_type: NotificationType::RequestCompleted,
            title: "Pickup completed".to_string(),
            message: format!(
                "{} of \"{}\" was picked up.",
                request.requested_quantity, donation.title
            ),
            data: request_data(request),
        }
    }

    pub fn rating(donation: &DonationModel, rating: &RatingModel, rater_name: &str) -> Self {
        Self {
            user_id: donation.user_id,
            notification_type: NotificationType::Rating,
            title: "New rating".to_string(),
            message: format!(
                "{} rated your donation \"{}\" {}/5.",
                rater_name, donation.title, rating.rate
            ),
            data: json!({
                "donation_id": donation.donation_id,
                "rating_id": rating.rating_id,
                "rate": rating.rate,
            }),
        }
    }
}

fn request_data(request: &RequestModel) -> serde_json::Value {
    json!({
        "request_id": request.request_id,
        "donation_id": request.donation_id,
        "request_status": request.request_status,
    })
}

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    /// Creates a new instance of [`NotificationService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores `event` for its recipient, logging instead of failing on error.
    pub async fn notify(&self, event: NotificationEvent) {
        let user_id = event.user_id;
        let notification_type = event.notification_type;

        let result = NotificationRepository::new(self.db)
            .create(
                event.user_id,
                event.notification_type,
                event.title,
                event.message,
                event.data,
            )
            .await;

        if let Err(e) = result {
            tracing::warn!(
                user_id,
                ?notification_type,
                "Failed to store notification: {}",
                e
            );
        }
    }

    /// Emits every event in order.
    pub async fn notify_all(&self, events: Vec<NotificationEvent>) {
        for event in events {
            self.notify(event).await;
        }
    }
}

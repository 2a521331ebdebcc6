//! Donation service layer.
//!
//! Creation, reads and donor edits of donations. Status and quantity changes go through
//! [`lifecycle::DonationLifecycle`], which the request service shares.

pub mod lifecycle;

use entity::donation::DonationStatus;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::donation::{DonationRepository, NewDonation},
    error::{auth::AuthError, conflict::ConflictError, not_found::NotFoundError, Error},
    model::db::DonationModel,
    service::{
        donation::lifecycle::{DonationLifecycle, DonationTransition},
        image_host::{ImageHostClient, ImageUpload},
        notification::{NotificationEvent, NotificationService},
        retry::RetryPolicy,
    },
    util::{
        parse::{parse_category, parse_date, required_text},
        quantity::normalize_donation_quantity,
    },
};

pub const TITLE_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const LOCATION_MAX_LEN: usize = 255;

/// Raw donation fields as submitted by the donor.
#[derive(Clone, Debug, Default)]
pub struct CreateDonationInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub quantity_value: Option<String>,
    pub quantity_unit: Option<String>,
    pub expiry_date: Option<String>,
    pub category: Option<String>,
    pub picture: Option<ImageUpload>,
}

/// Donor edits, every field optional.
#[derive(Clone, Debug, Default)]
pub struct UpdateDonationInput {
    pub status: Option<DonationStatus>,
    pub picture: Option<ImageUpload>,
}

pub struct DonationService<'a> {
    db: &'a DatabaseConnection,
    image_host: &'a ImageHostClient,
}

impl<'a> DonationService<'a> {
    /// Creates a new instance of [`DonationService`]
    pub fn new(db: &'a DatabaseConnection, image_host: &'a ImageHostClient) -> Self {
        Self { db, image_host }
    }

    /// Validates and stores a new donation in `available` status.
    ///
    /// The quantity is normalized to its canonical unit. The picture, if any, is uploaded
    /// after validation and before the insert, so a failed upload stores nothing.
    ///
    /// # Returns
    /// - `Ok(DonationModel)` - The stored donation
    /// - `Err(Error::ValidationError)` - Missing or malformed field
    /// - `Err(Error::ImageHostError)` - The picture could not be uploaded
    pub async fn create(
        &self,
        donor_id: i32,
        input: CreateDonationInput,
    ) -> Result<DonationModel, Error> {
        let title = required_text(input.title, "title", TITLE_MAX_LEN)?;
        let description = required_text(input.description, "description", DESCRIPTION_MAX_LEN)?;
        let location = required_text(input.location, "location", LOCATION_MAX_LEN)?;

        let quantity_value = required_text(input.quantity_value, "quantity_value", 32)?;
        let quantity_unit = required_text(input.quantity_unit, "quantity_unit", 16)?;
        let (quantity_value, quantity_unit) =
            normalize_donation_quantity(&quantity_value, &quantity_unit)?;

        let category = parse_category(&required_text(input.category, "category", 32)?)?;
        let expiry_date = parse_date(
            "expiry_date",
            &required_text(input.expiry_date, "expiry_date", 64)?,
        )?;

        let donation_picture = match input.picture {
            Some(picture) => Some(self.image_host.upload(picture).await?),
            None => None,
        };

        let new_donation = NewDonation {
            user_id: donor_id,
            title,
            description,
            location,
            quantity_value,
            quantity_unit,
            expiry_date,
            category,
            donation_picture,
        };

        let donation = DonationRepository::new(self.db).create(new_donation).await?;

        tracing::info!(
            donation_id = donation.donation_id,
            donor_id,
            quantity_value,
            "Donation created"
        );

        NotificationService::new(self.db)
            .notify(NotificationEvent::donation_created(&donation))
            .await;

        Ok(donation)
    }

    pub async fn get(&self, donation_id: i32) -> Result<DonationModel, Error> {
        let db = self.db.clone();

        RetryPolicy::default()
            .execute_with_retry(&format!("get donation {}", donation_id), || {
                let db = db.clone();

                async move {
                    let donation = DonationRepository::new(&db)
                        .get(donation_id)
                        .await?
                        .ok_or(NotFoundError::Donation(donation_id))?;

                    Ok::<_, Error>(donation)
                }
            })
            .await
    }

    /// Lists donations newest first, optionally only those in `status`.
    pub async fn list(&self, status: Option<DonationStatus>) -> Result<Vec<DonationModel>, Error> {
        let db = self.db.clone();

        RetryPolicy::default()
            .execute_with_retry("list donations", || {
                let db = db.clone();

                async move {
                    let donations = DonationRepository::new(&db).list(status).await?;

                    Ok::<_, Error>(donations)
                }
            })
            .await
    }

    /// Applies a donor's edits to their donation.
    ///
    /// The only status edit a donor may make is `available -> canceled`, confirmation and
    /// completion follow from requests. The picture can be replaced at any time. Both edits
    /// are written in one transaction.
    ///
    /// # Returns
    /// - `Ok(DonationModel)` - The donation after the edit
    /// - `Err(Error::NotFoundError)` - The donation does not exist
    /// - `Err(Error::AuthError)` - `actor_id` does not own the donation
    /// - `Err(Error::ConflictError)` - Status other than `canceled`, or a status edit on a
    ///   donation that is no longer available
    pub async fn update(
        &self,
        actor_id: i32,
        donation_id: i32,
        input: UpdateDonationInput,
    ) -> Result<DonationModel, Error> {
        let donation = self.get(donation_id).await?;

        if donation.user_id != actor_id {
            return Err(AuthError::Forbidden(
                "only the donor can edit this donation".to_string(),
            )
            .into());
        }

        if let Some(to) = input.status.filter(|status| *status != DonationStatus::Canceled) {
            return Err(ConflictError::DonorTransitionNotAllowed { donation_id, to }.into());
        }

        let picture_url = match input.picture {
            Some(picture) => Some(self.image_host.upload(picture).await?),
            None => None,
        };

        let status = input.status;
        let db = self.db.clone();

        let (transition, donation) = RetryPolicy::default()
            .execute_with_retry(&format!("update donation {}", donation_id), || {
                let db = db.clone();
                let picture_url = picture_url.clone();

                async move { apply_donor_edit(&db, donation_id, status, picture_url).await }
            })
            .await?;

        if let Some(transition) = transition {
            if transition.entered(DonationStatus::Completed) {
                NotificationService::new(self.db)
                    .notify(NotificationEvent::donation_completed(&transition.after))
                    .await;
            }
        }

        Ok(donation)
    }
}

async fn apply_donor_edit(
    db: &DatabaseConnection,
    donation_id: i32,
    status: Option<DonationStatus>,
    picture_url: Option<String>,
) -> Result<(Option<DonationTransition>, DonationModel), Error> {
    let txn = db.begin().await?;
    let repo = DonationRepository::new(&txn);

    let current = repo
        .get_for_update(donation_id)
        .await?
        .ok_or(NotFoundError::Donation(donation_id))?;

    let transition = match status {
        Some(status) => {
            if current.donation_status != DonationStatus::Available {
                return Err(ConflictError::DonationNotEditable {
                    donation_id,
                    status: current.donation_status,
                }
                .into());
            }

            Some(
                DonationLifecycle::new(&txn)
                    .update_status(donation_id, status)
                    .await?,
            )
        }
        None => None,
    };

    if let Some(url) = picture_url {
        repo.set_picture(donation_id, url).await?;
    }

    let donation = repo
        .get(donation_id)
        .await?
        .ok_or(NotFoundError::Donation(donation_id))?;

    txn.commit().await?;

    Ok((transition, donation))
}

//! Rating submission.
//!
//! A donation can be rated once per user, and only after it reached `completed`.

use entity::donation::DonationStatus;
use sea_orm::{DatabaseConnection, SqlErr, TransactionTrait};

use crate::{
    model::rating::SubmitRatingDto,
    server::{
        data::{donation::DonationRepository, rating::RatingRepository},
        error::{
            auth::AuthError, conflict::ConflictError, not_found::NotFoundError,
            validation::ValidationError, Error,
        },
        model::db::RatingModel,
        service::{
            notification::{NotificationEvent, NotificationService},
            retry::RetryPolicy,
            user::UserService,
        },
    },
};

pub const MIN_RATE: i32 = 1;
pub const MAX_RATE: i32 = 5;
pub const REVIEW_MAX_LEN: usize = 1000;

pub struct RatingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RatingService<'a> {
    /// Creates a new instance of [`RatingService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records `rater_id`'s rating of a completed donation and notifies the donor.
    ///
    /// # Returns
    /// - `Ok(RatingModel)` - The stored rating
    /// - `Err(Error::ValidationError)` - Unknown donation, donation not completed, rate
    ///   outside 1-5 or review too long
    /// - `Err(Error::AuthError)` - The donor rated their own donation
    /// - `Err(Error::ConflictError)` - The rater already rated this donation
    pub async fn submit(
        &self,
        rater_id: i32,
        input: SubmitRatingDto,
    ) -> Result<RatingModel, Error> {
        let donation_id = input
            .donation_id
            .ok_or(ValidationError::MissingField("donation_id"))?;
        let rate = input.rate.ok_or(ValidationError::MissingField("rate"))?;
        if !(MIN_RATE..=MAX_RATE).contains(&rate) {
            return Err(ValidationError::RateOutOfRange(rate).into());
        }

        let review = input
            .review
            .map(|review| review.trim().to_string())
            .filter(|review| !review.is_empty());
        if review
            .as_ref()
            .is_some_and(|review| review.chars().count() > REVIEW_MAX_LEN)
        {
            return Err(ValidationError::TooLong {
                field: "review",
                max: REVIEW_MAX_LEN,
            }
            .into());
        }

        let txn = self.db.begin().await?;

        let donation = DonationRepository::new(&txn)
            .get(donation_id)
            .await?
            .ok_or(ValidationError::UnknownDonation(donation_id))?;

        if donation.donation_status != DonationStatus::Completed {
            return Err(ValidationError::RatingBeforeCompletion.into());
        }
        if donation.user_id == rater_id {
            return Err(
                AuthError::Forbidden("donors cannot rate their own donation".to_string()).into(),
            );
        }

        let ratings = RatingRepository::new(&txn);
        if ratings
            .find_by_donation_and_user(donation_id, rater_id)
            .await?
            .is_some()
        {
            return Err(already_rated(donation_id, rater_id));
        }

        let rating = match ratings.create(donation_id, rater_id, rate, review).await {
            Ok(rating) => rating,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(already_rated(donation_id, rater_id));
            }
            Err(e) => return Err(e.into()),
        };

        txn.commit().await?;

        tracing::info!(
            rating_id = rating.rating_id,
            donation_id,
            rater_id,
            rate,
            "Rating submitted"
        );

        let rater_name = match UserService::new(self.db).get_display_name(rater_id).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(rater_id, "Failed to look up rater name: {}", e);
                return Ok(rating);
            }
        };

        NotificationService::new(self.db)
            .notify(NotificationEvent::rating(&donation, &rating, &rater_name))
            .await;

        Ok(rating)
    }

    /// Lists a donation's ratings newest first.
    pub async fn list_for_donation(&self, donation_id: i32) -> Result<Vec<RatingModel>, Error> {
        let db = self.db.clone();

        RetryPolicy::default()
            .execute_with_retry(&format!("list ratings of donation {}", donation_id), || {
                let db = db.clone();

                async move {
                    DonationRepository::new(&db)
                        .get(donation_id)
                        .await?
                        .ok_or(NotFoundError::Donation(donation_id))?;

                    let ratings = RatingRepository::new(&db)
                        .list_by_donation(donation_id)
                        .await?;

                    Ok::<_, Error>(ratings)
                }
            })
            .await
    }
}

fn already_rated(donation_id: i32, user_id: i32) -> Error {
    ConflictError::AlreadyRated {
        donation_id,
        user_id,
    }
    .into()
}

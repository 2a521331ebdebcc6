//! Tests for RatingService::submit.

use entity::{donation::DonationStatus, notification::NotificationType};
use sea_orm::EntityTrait;
use sharefood::server::{
    error::{auth::AuthError, conflict::ConflictError, validation::ValidationError, Error},
    service::rating::RatingService,
};
use sharefood_test_utils::prelude::*;

use super::rating_input;

const DONOR: i32 = 1;
const RATER: i32 = 2;

async fn setup() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_core_tables()
        .with_user(DONOR)
        .with_user(RATER)
        .build()
        .await
}

/// Expect a rating on a completed donation to be stored and the donor notified by name
#[tokio::test]
async fn rates_completed_donation() -> Result<(), TestError> {
    let mut test = setup().await?;
    let donation = test
        .donation()
        .insert_donation_with_status(DONOR, 0.0, DonationStatus::Completed)
        .await?;

    let rating = RatingService::new(&test.db)
        .submit(RATER, rating_input(donation.donation_id, 5))
        .await
        .unwrap();

    assert_eq!(rating.rate, 5);
    assert_eq!(rating.user_id, RATER);

    let notifications = entity::prelude::Notification::find().all(&test.db).await?;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].user_id, DONOR);
    assert_eq!(notifications[0].notification_type, NotificationType::Rating);
    assert!(notifications[0].message.contains("user 2"));

    Ok(())
}

/// Expect every status other than completed to be refused
#[tokio::test]
async fn refuses_before_completion() -> Result<(), TestError> {
    let mut test = setup().await?;

    for status in [
        DonationStatus::Available,
        DonationStatus::Confirmed,
        DonationStatus::Canceled,
    ] {
        let donation = test
            .donation()
            .insert_donation_with_status(DONOR, 1.0, status)
            .await?;

        let result = RatingService::new(&test.db)
            .submit(RATER, rating_input(donation.donation_id, 4))
            .await;

        assert!(
            matches!(
                result,
                Err(Error::ValidationError(ValidationError::RatingBeforeCompletion))
            ),
            "{status:?}"
        );
    }

    assert!(entity::prelude::Rating::find().all(&test.db).await?.is_empty());

    Ok(())
}

/// Expect rates outside 1 to 5 to be refused
#[tokio::test]
async fn refuses_out_of_range_rate() -> Result<(), TestError> {
    let mut test = setup().await?;
    let donation = test
        .donation()
        .insert_donation_with_status(DONOR, 0.0, DonationStatus::Completed)
        .await?;
    let service = RatingService::new(&test.db);

    for rate in [0, 6, -1] {
        let result = service
            .submit(RATER, rating_input(donation.donation_id, rate))
            .await;

        assert!(matches!(
            result,
            Err(Error::ValidationError(ValidationError::RateOutOfRange(r))) if r == rate
        ));
    }

    Ok(())
}

/// Expect a second rating by the same user to conflict
#[tokio::test]
async fn refuses_duplicate() -> Result<(), TestError> {
    let mut test = setup().await?;
    let donation = test
        .donation()
        .insert_donation_with_status(DONOR, 0.0, DonationStatus::Completed)
        .await?;
    let service = RatingService::new(&test.db);

    service
        .submit(RATER, rating_input(donation.donation_id, 5))
        .await
        .unwrap();
    let result = service
        .submit(RATER, rating_input(donation.donation_id, 3))
        .await;

    assert!(matches!(
        result,
        Err(Error::ConflictError(ConflictError::AlreadyRated { .. }))
    ));

    Ok(())
}

/// Expect the donor to be forbidden from rating their own donation
#[tokio::test]
async fn forbids_donor() -> Result<(), TestError> {
    let mut test = setup().await?;
    let donation = test
        .donation()
        .insert_donation_with_status(DONOR, 0.0, DonationStatus::Completed)
        .await?;

    let result = RatingService::new(&test.db)
        .submit(DONOR, rating_input(donation.donation_id, 5))
        .await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::Forbidden(_)))
    ));

    Ok(())
}

/// Expect a rating on a missing donation to be a validation error
#[tokio::test]
async fn refuses_unknown_donation() -> Result<(), TestError> {
    let test = setup().await?;

    let result = RatingService::new(&test.db)
        .submit(RATER, rating_input(99, 5))
        .await;

    assert!(matches!(
        result,
        Err(Error::ValidationError(ValidationError::UnknownDonation(99)))
    ));

    Ok(())
}

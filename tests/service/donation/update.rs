//! Tests for DonationService::update.

use entity::{donation::DonationStatus, notification::NotificationType};
use sea_orm::EntityTrait;
use sharefood::server::{
    error::{auth::AuthError, conflict::ConflictError, Error},
    service::donation::{DonationService, UpdateDonationInput},
};
use sharefood_test_utils::prelude::*;

use super::{picture, status_edit};
use crate::util::TestContextExt;

/// Expect the donor to cancel an available donation
#[tokio::test]
async fn donor_cancels_available_donation() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_core_tables().with_user(1).build().await?;
    let donation = test.donation().insert_donation(1, 2.0).await?;
    let state = test.into_app_state();

    let updated = DonationService::new(&state.db, &state.image_host)
        .update(1, donation.donation_id, status_edit(DonationStatus::Canceled))
        .await
        .unwrap();

    assert_eq!(updated.donation_status, DonationStatus::Canceled);

    Ok(())
}

/// Expect a status edit on a confirmed donation to conflict and change nothing
#[tokio::test]
async fn refuses_status_edit_once_confirmed() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_core_tables().with_user(1).build().await?;
    let donation = test
        .donation()
        .insert_donation_with_status(1, 2.0, DonationStatus::Confirmed)
        .await?;
    let state = test.into_app_state();

    let result = DonationService::new(&state.db, &state.image_host)
        .update(1, donation.donation_id, status_edit(DonationStatus::Canceled))
        .await;

    assert!(matches!(
        result,
        Err(Error::ConflictError(ConflictError::DonationNotEditable { .. }))
    ));

    let stored = entity::prelude::Donation::find_by_id(donation.donation_id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(stored.donation_status, DonationStatus::Confirmed);

    Ok(())
}

/// Expect someone other than the donor to be forbidden
#[tokio::test]
async fn forbids_non_owner() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_user(2)
        .build()
        .await?;
    let donation = test.donation().insert_donation(1, 2.0).await?;
    let state = test.into_app_state();

    let result = DonationService::new(&state.db, &state.image_host)
        .update(2, donation.donation_id, status_edit(DonationStatus::Canceled))
        .await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::Forbidden(_)))
    ));

    Ok(())
}

/// Expect confirming, completing or reopening by hand to be refused
#[tokio::test]
async fn refuses_transitions_other_than_cancel() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_core_tables().with_user(1).build().await?;
    let donation = test.donation().insert_donation(1, 2.0).await?;
    let state = test.into_app_state();
    let service = DonationService::new(&state.db, &state.image_host);

    for status in [
        DonationStatus::Confirmed,
        DonationStatus::Completed,
        DonationStatus::Available,
    ] {
        let result = service
            .update(1, donation.donation_id, status_edit(status))
            .await;

        assert!(
            matches!(
                result,
                Err(Error::ConflictError(ConflictError::DonorTransitionNotAllowed { .. }))
            ),
            "{status:?}"
        );
    }

    let stored = entity::prelude::Donation::find_by_id(donation.donation_id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(stored.donation_status, DonationStatus::Available);

    Ok(())
}

/// Expect canceling an emptied donation to complete it instead and notify the donor
#[tokio::test]
async fn cancel_of_empty_donation_completes() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_core_tables().with_user(1).build().await?;
    let donation = test.donation().insert_donation(1, 0.0).await?;
    let state = test.into_app_state();

    let updated = DonationService::new(&state.db, &state.image_host)
        .update(1, donation.donation_id, status_edit(DonationStatus::Canceled))
        .await
        .unwrap();

    assert_eq!(updated.donation_status, DonationStatus::Completed);

    let notifications = entity::prelude::Notification::find().all(&test.db).await?;
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0].notification_type,
        NotificationType::DonationCompleted
    );

    Ok(())
}

/// Expect a picture to be replaceable even after the donation is confirmed
#[tokio::test]
async fn replaces_picture_on_confirmed_donation() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_upload_endpoint(TEST_PICTURE_URL, 1)
        .build()
        .await?;
    let donation = test
        .donation()
        .insert_donation_with_status(1, 2.0, DonationStatus::Confirmed)
        .await?;
    let state = test.into_app_state();

    let updated = DonationService::new(&state.db, &state.image_host)
        .update(
            1,
            donation.donation_id,
            UpdateDonationInput {
                status: None,
                picture: Some(picture()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.donation_picture.as_deref(), Some(TEST_PICTURE_URL));
    assert_eq!(updated.donation_status, DonationStatus::Confirmed);
    test.assert_mocks();

    Ok(())
}

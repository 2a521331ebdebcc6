//! Tests for RequestService::create.

use entity::{donation::DonationStatus, request::RequestStatus};
use sharefood::server::{
    error::{auth::AuthError, conflict::ConflictError, validation::ValidationError, Error},
    model::app::LifecycleSettings,
    service::request::RequestService,
};
use sharefood_test_utils::prelude::*;

use super::request_input;

/// Expect a new request to start out waiting
#[tokio::test]
async fn creates_waiting_request() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_user(2)
        .build()
        .await?;
    let donation = test.donation().insert_donation(1, 2.0).await?;

    let request = RequestService::new(&test.db, LifecycleSettings::default())
        .create(2, request_input(donation.donation_id, "2 kg"))
        .await
        .unwrap();

    assert_eq!(request.request_status, RequestStatus::Waiting);
    assert_eq!(request.requested_quantity, "2 kg");
    assert_eq!(request.user_id, 2);

    Ok(())
}

/// Expect a volume to be rejected against a donation measured by mass
#[tokio::test]
async fn rejects_unit_of_other_dimension() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_user(2)
        .build()
        .await?;
    let donation = test.donation().insert_donation(1, 2.0).await?;
    let service = RequestService::new(&test.db, LifecycleSettings::default());

    let result = service
        .create(2, request_input(donation.donation_id, "500 ml"))
        .await;

    assert!(matches!(
        result,
        Err(Error::ValidationError(ValidationError::UnitMismatch { .. }))
    ));

    let accepted = service
        .create(2, request_input(donation.donation_id, "500 g"))
        .await;
    assert!(accepted.is_ok());

    Ok(())
}

/// Expect a quantity without a leading number to be rejected
#[tokio::test]
async fn rejects_unparseable_quantity() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_user(2)
        .build()
        .await?;
    let donation = test.donation().insert_donation(1, 2.0).await?;

    let result = RequestService::new(&test.db, LifecycleSettings::default())
        .create(2, request_input(donation.donation_id, "some bread"))
        .await;

    assert!(matches!(
        result,
        Err(Error::ValidationError(
            ValidationError::UnparseableRequestedQuantity(_)
        ))
    ));

    Ok(())
}

/// Expect a request on a missing donation to be a validation error
#[tokio::test]
async fn rejects_unknown_donation() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().with_user(2).build().await?;

    let result = RequestService::new(&test.db, LifecycleSettings::default())
        .create(2, request_input(42, "1 kg"))
        .await;

    assert!(matches!(
        result,
        Err(Error::ValidationError(ValidationError::UnknownDonation(42)))
    ));

    Ok(())
}

/// Expect donors to be forbidden from requesting their own donation
#[tokio::test]
async fn forbids_own_donation() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_core_tables().with_user(1).build().await?;
    let donation = test.donation().insert_donation(1, 2.0).await?;

    let result = RequestService::new(&test.db, LifecycleSettings::default())
        .create(1, request_input(donation.donation_id, "1 kg"))
        .await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::Forbidden(_)))
    ));

    Ok(())
}

/// Expect a completed donation to refuse new requests
#[tokio::test]
async fn refuses_completed_donation() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_user(2)
        .build()
        .await?;
    let donation = test
        .donation()
        .insert_donation_with_status(1, 0.0, DonationStatus::Completed)
        .await?;

    let result = RequestService::new(&test.db, LifecycleSettings::default())
        .create(2, request_input(donation.donation_id, "1 kg"))
        .await;

    assert!(matches!(
        result,
        Err(Error::ConflictError(ConflictError::DonationUnavailable { .. }))
    ));

    Ok(())
}

//! Tests for the donation endpoints.

use entity::donation::DonationStatus;

use super::*;

const DONATION_FIELDS: &[(&str, &str)] = &[
    ("title", "Vegetable soup"),
    ("description", "Two pots of soup"),
    ("location", "Community kitchen"),
    ("quantity_value", "2000"),
    ("quantity_unit", "ml"),
    ("expiry_date", "2030-01-15"),
    ("category", "cooked_meals"),
];

/// Expect 401 without a bearer token
#[tokio::test]
async fn list_requires_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;

    let (status, body) = send(
        app(&test),
        empty_request(Method::GET, "/api/donations", None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    Ok(())
}

/// Expect 401 for a valid token whose user is unknown
#[tokio::test]
async fn unknown_user_is_unauthorized() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().build().await?;
    let token = test.token_for(7)?;

    let (status, _) = send(
        app(&test),
        empty_request(Method::GET, "/api/donations", Some(&token)),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect a multipart post with a picture to return 201 with a normalized quantity
#[tokio::test]
async fn create_with_picture() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_upload_endpoint(TEST_PICTURE_URL, 1)
        .build()
        .await?;
    let token = test.token_for(1)?;

    let (status, body) = send(
        app(&test),
        multipart_request(
            Method::POST,
            "/api/donations",
            &token,
            DONATION_FIELDS,
            Some(&[0xFF, 0xD8, 0xFF]),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["quantity_value"], 2.0);
    assert_eq!(body["quantity_unit"], "liter");
    assert_eq!(body["donation_status"], "available");
    assert_eq!(body["donation_picture"], TEST_PICTURE_URL);
    test.assert_mocks();

    Ok(())
}

/// Expect 400 for an unknown category
#[tokio::test]
async fn create_rejects_unknown_category() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().with_user(1).build().await?;
    let token = test.token_for(1)?;

    let fields: Vec<(&str, &str)> = DONATION_FIELDS
        .iter()
        .map(|&(name, value)| if name == "category" { (name, "toys") } else { (name, value) })
        .collect();

    let (status, _) = send(
        app(&test),
        multipart_request(Method::POST, "/api/donations", &token, &fields, None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect the status filter to only return matching donations
#[tokio::test]
async fn list_filters_by_status() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_core_tables().with_user(1).build().await?;
    test.donation().insert_donation(1, 1.0).await?;
    test.donation()
        .insert_donation_with_status(1, 1.0, DonationStatus::Confirmed)
        .await?;
    let token = test.token_for(1)?;

    let (status, body) = send(
        app(&test),
        empty_request(Method::GET, "/api/donations?status=confirmed", Some(&token)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let donations = body.as_array().unwrap();
    assert_eq!(donations.len(), 1);
    assert_eq!(donations[0]["donation_status"], "confirmed");

    let (status, _) = send(
        app(&test),
        empty_request(Method::GET, "/api/donations?status=lost", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 404 for a missing donation
#[tokio::test]
async fn get_missing_donation() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().with_user(1).build().await?;
    let token = test.token_for(1)?;

    let (status, _) = send(
        app(&test),
        empty_request(Method::GET, "/api/donations/12", Some(&token)),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect a status edit on a confirmed donation to be a 409
#[tokio::test]
async fn update_confirmed_conflicts() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_core_tables().with_user(1).build().await?;
    let donation = test
        .donation()
        .insert_donation_with_status(1, 1.0, DonationStatus::Confirmed)
        .await?;
    let token = test.token_for(1)?;

    let (status, _) = send(
        app(&test),
        multipart_request(
            Method::PATCH,
            &format!("/api/donations/{}", donation.donation_id),
            &token,
            &[("status", "canceled")],
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);

    Ok(())
}

/// Expect another user's edit to be a 403
#[tokio::test]
async fn update_by_stranger_forbidden() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_user(2)
        .build()
        .await?;
    let donation = test.donation().insert_donation(1, 1.0).await?;
    let token = test.token_for(2)?;

    let (status, _) = send(
        app(&test),
        multipart_request(
            Method::PATCH,
            &format!("/api/donations/{}", donation.donation_id),
            &token,
            &[("status", "canceled")],
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect a donation's requests to be listed oldest first
#[tokio::test]
async fn list_requests_oldest_first() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_user(2)
        .with_user(3)
        .build()
        .await?;
    let donation = test.donation().insert_donation(1, 3.0).await?;
    let first = test
        .request()
        .insert_request(2, donation.donation_id, "1 kg")
        .await?;
    let second = test
        .request()
        .insert_request(3, donation.donation_id, "1 kg")
        .await?;
    let token = test.token_for(1)?;

    let (status, body) = send(
        app(&test),
        empty_request(
            Method::GET,
            &format!("/api/donations/{}/requests", donation.donation_id),
            Some(&token),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["request_id"].as_i64().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![first.request_id as i64, second.request_id as i64]
    );

    Ok(())
}

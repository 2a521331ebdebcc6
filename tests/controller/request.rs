//! Tests for the request endpoints.

use chrono::{Duration, Utc};
use entity::{donation::DonationStatus, request::RequestStatus};

use super::*;

/// Expect 201 with a waiting request
#[tokio::test]
async fn create_returns_created() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_user(2)
        .build()
        .await?;
    let donation = test.donation().insert_donation(1, 2.0).await?;
    let token = test.token_for(2)?;

    let payload = serde_json::json!({
        "donation_id": donation.donation_id,
        "requested_quantity": "1 kg",
        "pickup_time": (Utc::now().naive_utc() + Duration::hours(3)),
        "note": "After 6pm",
    });

    let (status, body) = send(
        app(&test),
        json_request(Method::POST, "/api/requests", Some(&token), payload),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["request_status"], "waiting");
    assert_eq!(body["user_id"], 2);

    Ok(())
}

/// Expect 400 when the note is missing
#[tokio::test]
async fn create_requires_note() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_user(2)
        .build()
        .await?;
    let donation = test.donation().insert_donation(1, 2.0).await?;
    let token = test.token_for(2)?;

    let payload = serde_json::json!({
        "donation_id": donation.donation_id,
        "requested_quantity": "1 kg",
        "pickup_time": (Utc::now().naive_utc() + Duration::hours(3)),
    });

    let (status, body) = send(
        app(&test),
        json_request(Method::POST, "/api/requests", Some(&token), payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("note"));

    Ok(())
}

/// Expect 400 with a JSON error when the donation is not named
#[tokio::test]
async fn create_requires_donation_id() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_user(2)
        .build()
        .await?;
    let token = test.token_for(2)?;

    let payload = serde_json::json!({
        "requested_quantity": "1 kg",
        "pickup_time": (Utc::now() + Duration::hours(3)).to_rfc3339(),
        "note": "After 6pm",
    });

    let (status, body) = send(
        app(&test),
        json_request(Method::POST, "/api/requests", Some(&token), payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("donation_id"));

    Ok(())
}

/// Expect 400 with a JSON error for a body that is not valid JSON or has wrong types
#[tokio::test]
async fn create_rejects_malformed_body() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_user(2)
        .build()
        .await?;
    let token = test.token_for(2)?;

    for raw in [r#"{"donation_id": 1,"#, r#"{"donation_id": "one"}"#] {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/requests")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(raw))
            .unwrap();

        let (status, body) = send(app(&test), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {raw}");
        assert!(body["error"].is_string(), "body {raw}");
    }

    Ok(())
}

/// Expect 400 when the status field is missing
#[tokio::test]
async fn update_status_requires_status() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_user(2)
        .build()
        .await?;
    let donation = test.donation().insert_donation(1, 2.0).await?;
    let request = test
        .request()
        .insert_request(2, donation.donation_id, "1 kg")
        .await?;
    let token = test.token_for(1)?;

    let (status, body) = send(
        app(&test),
        json_request(
            Method::PATCH,
            &format!("/api/requests/{}/status", request.request_id),
            Some(&token),
            serde_json::json!({}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("status"));

    Ok(())
}

/// Expect approval then completion over HTTP to complete the donation
#[tokio::test]
async fn approve_then_complete() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_user(2)
        .build()
        .await?;
    let donation = test.donation().insert_donation(1, 2.0).await?;
    let request = test
        .request()
        .insert_request(2, donation.donation_id, "2 kg")
        .await?;
    let donor_token = test.token_for(1)?;
    let requester_token = test.token_for(2)?;
    let uri = format!("/api/requests/{}/status", request.request_id);

    let (status, body) = send(
        app(&test),
        json_request(
            Method::PATCH,
            &uri,
            Some(&donor_token),
            serde_json::json!({ "status": "approved" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request_status"], "approved");

    let (status, body) = send(
        app(&test),
        json_request(
            Method::PATCH,
            &uri,
            Some(&requester_token),
            serde_json::json!({ "status": "completed" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["request_status"], "completed");

    let (_, body) = send(
        app(&test),
        empty_request(
            Method::GET,
            &format!("/api/donations/{}", donation.donation_id),
            Some(&requester_token),
        ),
    )
    .await;
    assert_eq!(body["quantity_value"], 0.0);
    assert_eq!(body["donation_status"], "completed");

    Ok(())
}

/// Expect an unknown status to be a 400 and an illegal transition a 409
#[tokio::test]
async fn update_status_errors() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_core_tables()
        .with_user(1)
        .with_user(2)
        .build()
        .await?;
    let donation = test
        .donation()
        .insert_donation_with_status(1, 2.0, DonationStatus::Available)
        .await?;
    let request = test
        .request()
        .insert_request_with_status(2, donation.donation_id, "1 kg", RequestStatus::Rejected)
        .await?;
    let token = test.token_for(1)?;
    let uri = format!("/api/requests/{}/status", request.request_id);

    let (status, _) = send(
        app(&test),
        json_request(
            Method::PATCH,
            &uri,
            Some(&token),
            serde_json::json!({ "status": "finished" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        app(&test),
        json_request(
            Method::PATCH,
            &uri,
            Some(&token),
            serde_json::json!({ "status": "approved" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    Ok(())
}

/// Expect 404 for a missing request
#[tokio::test]
async fn get_missing_request() -> Result<(), TestError> {
    let test = TestBuilder::new().with_core_tables().with_user(1).build().await?;
    let token = test.token_for(1)?;

    let (status, _) = send(
        app(&test),
        empty_request(Method::GET, "/api/requests/5", Some(&token)),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

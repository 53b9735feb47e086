mod common;

use anyhow::Result;
use axum::http::StatusCode;
use chrono::Utc;
use quickflex_admin::config::DEFAULT_PENDING_STATUS;
use serde_json::json;

#[tokio::test]
async fn status_update_requires_id_and_status() -> Result<()> {
    let (_store, router) = common::memory_app();

    let (status, body) = common::post_json(&router, "/drivers/update-status", json!({ "status": "Approved" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"].get("driver_id").is_some());

    let (status, body) = common::post_json(&router, "/drivers/update-status", json!({ "driver_id": 1 })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"].get("status").is_some());
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_rejected_in_envelope() -> Result<()> {
    let (_store, router) = common::memory_app();

    let (status, body) = common::post_json(&router, "/drivers/update-status", json!({ "driver_id": "seven" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn vehicle_upsert_is_idempotent_per_vin() -> Result<()> {
    let (store, router) = common::memory_app();
    let driver = store.add_driver("Val", "Vin", DEFAULT_PENDING_STATUS, Utc::now());

    for color in ["White", "Green"] {
        let (status, _) = common::post_json(
            &router,
            "/drivers/vehicle",
            json!({
                "driver_id": driver,
                "vin": "2T1BURHE5JC123456",
                "make": "Toyota",
                "model": "Corolla",
                "year": 2018,
                "color": color,
                "inspection_date": "2024-04-09"
            }),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(store.vehicle_count_for_vin("2T1BURHE5JC123456"), 1);

    let (status, body) = common::get_json(&router, &format!("/drivers/{}/vehicles", driver)).await?;
    assert_eq!(status, StatusCode::OK);
    let vehicles = body["data"].as_array().unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0]["color"], "Green");
    assert_eq!(vehicles[0]["inspection_date"], "04-09-2024");
    Ok(())
}

#[tokio::test]
async fn insurance_requires_policy_number() -> Result<()> {
    let (store, router) = common::memory_app();
    let driver = store.add_driver("Pol", "Icy", DEFAULT_PENDING_STATUS, Utc::now());

    let (status, body) = common::post_json(
        &router,
        "/drivers/insurance",
        json!({ "driver_id": driver, "provider": "Acme" }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"].get("policy_number").is_some());

    let (status, body) = common::post_json(
        &router,
        "/drivers/insurance",
        json!({
            "driver_id": driver,
            "provider": "Acme",
            "policy_number": "ACM-778",
            "coverage_amount": "250000.00",
            "start_date": "03-15-2024"
        }),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["start_date"], "03-15-2024");
    Ok(())
}

#[tokio::test]
async fn background_checks_accumulate() -> Result<()> {
    let (store, router) = common::memory_app();
    let driver = store.add_driver("Bea", "Check", DEFAULT_PENDING_STATUS, Utc::now());

    for (date, result) in [("2023-01-10", "consider"), ("2024-01-10", "clear")] {
        let (status, _) = common::post_json(
            &router,
            "/drivers/background-check",
            json!({ "driver_id": driver, "check_date": date, "status": result }),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, history) = common::get_json(&router, &format!("/drivers/{}/background-checks", driver)).await?;
    let history = history["data"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["status"], "clear");
    Ok(())
}

#[tokio::test]
async fn banking_upserts_by_driver_and_rejects_unknown_drivers() -> Result<()> {
    let (store, router) = common::memory_app();
    let driver = store.add_driver("Bank", "Able", DEFAULT_PENDING_STATUS, Utc::now());

    let (status, body) = common::get_json(&router, &format!("/drivers/{}/banking", driver)).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null(), "expected null banking: {}", body);

    for bank in ["First Bank", "Second Bank"] {
        let (status, _) = common::post_json(
            &router,
            "/drivers/banking",
            json!({ "driver_id": driver, "bank_name": bank, "routing_number": "021000021" }),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = common::get_json(&router, &format!("/drivers/{}/banking", driver)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["bank_name"], "Second Bank");

    let (status, _) = common::post_json(&router, "/drivers/banking", json!({ "driver_id": 424242 })).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn per_kind_reads_of_unknown_driver_are_404() -> Result<()> {
    let (_store, router) = common::memory_app();

    for route in ["vehicles", "background-checks", "insurance", "banking"] {
        let (status, body) = common::get_json(&router, &format!("/drivers/9999/{}", route)).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "route {}: {}", route, body);
        assert_eq!(body["code"], "NOT_FOUND");
    }
    Ok(())
}

#[tokio::test]
async fn per_kind_reads_of_driver_without_records_are_empty() -> Result<()> {
    let (store, router) = common::memory_app();
    let driver = store.add_driver("Fresh", "Start", DEFAULT_PENDING_STATUS, Utc::now());

    for route in ["vehicles", "background-checks", "insurance"] {
        let (status, body) = common::get_json(&router, &format!("/drivers/{}/{}", driver, route)).await?;
        assert_eq!(status, StatusCode::OK, "route {}: {}", route, body);
        assert_eq!(body["data"], serde_json::json!([]));
    }

    let (status, body) = common::get_json(&router, &format!("/drivers/{}/banking", driver)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["data"].is_null());
    Ok(())
}

//! HTTP-level integration tests for the `/forms` endpoints.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{body_json, build_test_app, post_json};
use serde_json::{json, Value};

async fn transition(form: Value, event: Value) -> (StatusCode, Value) {
    let response = post_json(
        build_test_app(),
        "/api/v1/forms/transition",
        json!({ "form": form, "event": event }),
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

/// Apply events in order, failing the test on any non-200 response.
async fn apply_all(events: Vec<Value>) -> Value {
    let mut form = json!({});
    for event in events {
        let (status, json) = transition(form, event.clone()).await;
        assert_eq!(status, StatusCode::OK, "event {event} failed: {json}");
        form = json["data"].clone();
    }
    form
}

#[tokio::test]
async fn test_selecting_metal_and_purities_regenerates() {
    let form = apply_all(vec![
        json!({ "type": "base_sku_changed", "base_sku": "band" }),
        json!({ "type": "metal_toggled", "metal_id": 1 }),
        json!({ "type": "purities_changed", "metal_id": 1, "purity_ids": [2, 3] }),
    ])
    .await;

    let variants = form["variants"].as_array().unwrap();
    assert_eq!(variants.len(), 2);
    assert_eq!(variants[0]["sku"], "BAND-V01");
    assert_eq!(variants[1]["label"], "Gold 18K");
}

#[tokio::test]
async fn test_variant_edit_survives_mode_change() {
    let form = apply_all(vec![
        json!({ "type": "metal_toggled", "metal_id": 1 }),
        json!({ "type": "purities_changed", "metal_id": 1, "purity_ids": [3] }),
        json!({ "type": "tones_changed", "metal_id": 1, "tone_ids": [1, 2] }),
        json!({
            "type": "variant_edited",
            "index": 1,
            "edit": { "field": "sku", "sku": "WHITE-18" }
        }),
        json!({ "type": "metal_mix_mode_changed", "metal_id": 1, "mode": "separate" }),
    ])
    .await;
    assert_eq!(form["variants"][1]["sku"], "WHITE-18");
}

#[tokio::test]
async fn test_purities_before_metal_is_rejected() {
    let (status, json) = transition(
        json!({}),
        json!({ "type": "purities_changed", "metal_id": 1, "purity_ids": [3] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_toggle_unknown_metal_is_not_found() {
    let (status, json) =
        transition(json!({}), json!({ "type": "metal_toggled", "metal_id": 77 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_matches!(json["error"].as_str(), Some(msg) if msg.contains("77"));
}

#[tokio::test]
async fn test_unknown_event_type_is_rejected() {
    // Axum's Json rejection body is plain text, so read only the status.
    let response = post_json(
        build_test_app(),
        "/api/v1/forms/transition",
        json!({ "form": {}, "event": { "type": "polish" } }),
    )
    .await;
    let status = response.status();
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_form_from_record() {
    let record = json!({
        "base_sku": "RING",
        "metal_ids": [1, 2, 99],
        "purity_ids": [3, 6, 8],
        "tone_ids": [1],
        "metal_mix_modes": { "1": "combine_purities_per_tone", "abc": "separate" },
        "diamond_mixing_mode": "bogus",
        "size_enabled": true,
        "size_unit": "CM",
        "size_values": [5.5, 6.0]
    });
    let response = post_json(build_test_app(), "/api/v1/forms/from-record", record).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let selection = &json["data"]["selection"];
    let metals = selection["metals"].as_array().unwrap();
    assert_eq!(metals.len(), 2);
    assert_eq!(metals[0]["purity_ids"], json!([3]));
    assert_eq!(metals[0]["mix_mode"], "combine_purities_per_tone");
    assert_eq!(metals[1]["purity_ids"], json!([6]));
    assert_eq!(selection["diamond_mixing_mode"], "shared");
    assert_eq!(selection["sizes"]["unit"], "cm");
    assert_eq!(json["data"]["variants"], json!([]));
}

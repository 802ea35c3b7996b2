//! Shared helpers for the mock-server tests.

#![allow(dead_code)]

use orb_billing_client::{ClientOptions, OrbClient};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";

/// Start a mock server and a client pointed at it.
pub async fn setup() -> (MockServer, OrbClient) {
    let server = MockServer::start().await;
    let options = ClientOptions::default().with_base_url(server.uri());
    let client = OrbClient::with_options(API_KEY, options).expect("client should build");
    (server, client)
}

/// A complete coupon response.
pub fn coupon_json(id: &str) -> Value {
    json!({
        "id": id,
        "redemption_code": format!("CODE_{id}"),
        "discount": {"discount_type": "percentage", "percentage_discount": 0.5},
        "times_redeemed": 0,
        "duration_in_months": null,
        "max_redemptions": null,
        "archived_at": null
    })
}

/// A list response wrapping `data`.
pub fn list_json(data: Vec<Value>, has_more: bool, next_cursor: Option<&str>) -> Value {
    json!({
        "data": data,
        "pagination_metadata": {"has_more": has_more, "next_cursor": next_cursor}
    })
}

/// A problem-details error body.
pub fn error_json(status: u16, title: &str) -> Value {
    json!({
        "type": format!("https://docs.withorb.com/reference/error-responses#{status}"),
        "status": status,
        "title": title,
        "detail": null
    })
}

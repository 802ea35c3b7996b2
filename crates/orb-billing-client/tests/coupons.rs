//! Coupon endpoint tests against a mock server.

mod common;

use common::{coupon_json, error_json, setup, API_KEY};
use orb_billing_client::{
    AmountDiscount, ClientError, CouponCreateParams, Discount, Model, Validate,
};
use serde_json::{json, Value};
use wiremock::matchers::{bearer_token, body_json, header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

// ============================================================================
// Fetch
// ============================================================================

#[tokio::test]
async fn test_fetch_coupon_without_archived_at() {
    let (server, client) = setup().await;
    let body = r#"{"id":"cpn_1","redemption_code":"HALFOFF","duration_in_months":12,"max_redemptions":1}"#;

    Mock::given(method("GET"))
        .and(path("/coupons/cpn_1"))
        .and(bearer_token(API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let coupon = client.coupons().fetch("cpn_1").await.unwrap();

    assert_eq!(coupon.archived_at().unwrap(), None);
    assert!(!coupon.has("archived_at"));
    assert_eq!(coupon.redemption_code().unwrap(), "HALFOFF");
    assert_eq!(coupon.duration_in_months().unwrap(), Some(12));
    assert_eq!(coupon.to_json_string().unwrap(), body);
}

#[tokio::test]
async fn test_fetch_coupon_preserves_unknown_fields() {
    let (server, client) = setup().await;
    let mut body = coupon_json("cpn_2");
    body["discount"]["applies_to_items"] = json!(["item_1"]);
    body["plan_ids"] = json!(["plan_1", "plan_2"]);

    Mock::given(method("GET"))
        .and(path("/coupons/cpn_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let coupon = client.coupons().fetch("cpn_2").await.unwrap();
    coupon.validate().unwrap();

    let encoded: Value = serde_json::from_str(&coupon.to_json_string().unwrap()).unwrap();
    assert_eq!(encoded, body);
}

#[tokio::test]
async fn test_fetch_missing_coupon() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/coupons/cpn_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_json(404, "Coupon not found")))
        .mount(&server)
        .await;

    let err = client.coupons().fetch("cpn_missing").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { ref title, .. } if title == "Coupon not found"));
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_error_without_problem_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/coupons/cpn_1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = client.coupons().fetch("cpn_1").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 502, .. }));
}

#[tokio::test]
async fn test_non_object_body_is_model_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/coupons/cpn_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["not", "an", "object"])))
        .mount(&server)
        .await;

    let err = client.coupons().fetch("cpn_1").await.unwrap_err();
    assert!(matches!(err, ClientError::Model(_)));
}

// ============================================================================
// Create and archive
// ============================================================================

#[tokio::test]
async fn test_create_coupon_sends_explicit_null() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/coupons"))
        .and(header_exists("Idempotency-Key"))
        .and(body_json(json!({
            "discount": {"amount_discount": "5.00", "discount_type": "amount"},
            "redemption_code": "FIVEOFF",
            "duration_in_months": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(coupon_json("cpn_new")))
        .expect(1)
        .mount(&server)
        .await;

    let mut discount = AmountDiscount::new();
    discount.set_amount_discount("5.00").unwrap();
    let mut params = CouponCreateParams::new();
    params.set_discount(discount).unwrap();
    params.set_redemption_code("FIVEOFF").unwrap();
    params.set_duration_in_months(None).unwrap();

    let coupon = client.coupons().create(&params).await.unwrap();
    assert_eq!(coupon.id().unwrap(), "cpn_new");

    let requests = server.received_requests().await.unwrap();
    let sent: Value = requests[0].body_json().unwrap();
    let object = sent.as_object().unwrap();
    assert!(object.contains_key("duration_in_months"));
    assert_eq!(object["duration_in_months"], Value::Null);
    assert!(!object.contains_key("max_redemptions"));
}

#[tokio::test]
async fn test_each_post_gets_a_fresh_idempotency_key() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/coupons/cpn_1/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coupon_json("cpn_1")))
        .expect(2)
        .mount(&server)
        .await;

    client.coupons().archive("cpn_1").await.unwrap();
    client.coupons().archive("cpn_1").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let keys: Vec<String> = requests
        .iter()
        .map(|r| {
            r.headers
                .get("Idempotency-Key")
                .unwrap()
                .to_str()
                .unwrap()
                .to_string()
        })
        .collect();
    assert_eq!(keys.len(), 2);
    assert_ne!(keys[0], keys[1]);
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_archive_coupon() {
    let (server, client) = setup().await;
    let mut body = coupon_json("cpn_1");
    body["archived_at"] = json!("2024-06-01T00:00:00Z");

    Mock::given(method("POST"))
        .and(path("/coupons/cpn_1/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let coupon = client.coupons().archive("cpn_1").await.unwrap();
    let archived_at = coupon.archived_at().unwrap().unwrap();
    assert_eq!(archived_at.to_rfc3339(), "2024-06-01T00:00:00+00:00");
    assert!(matches!(coupon.discount().unwrap(), Discount::Percentage(_)));
}

#[tokio::test]
async fn test_conflict_maps_to_typed_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/coupons"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(error_json(409, "Redemption code taken")),
        )
        .mount(&server)
        .await;

    let mut params = CouponCreateParams::new();
    params.set_redemption_code("TAKEN").unwrap();
    let err = client.coupons().create(&params).await.unwrap_err();
    assert!(matches!(err, ClientError::Conflict { .. }));
}

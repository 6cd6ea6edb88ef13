//! Live API smoke tests.
//!
//! Run against a deployed instance with:
//! cargo test --test live_api_test -- --ignored

use reqwest::Client;
use serde_json::json;

fn base_url() -> String {
    std::env::var("DISPATCH_TEST_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

#[tokio::test]
#[ignore]
async fn distance_endpoint_round_trips() {
    let client = Client::new();
    let base = base_url();

    let resp = client
        .post(format!("{}/distanceTo", base))
        .json(&json!({
            "position1": { "lng": 0.0, "lat": 0.0 },
            "position2": { "lng": 3.0, "lat": 4.0 }
        }))
        .send()
        .await
        .expect("send distanceTo");

    assert!(resp.status().is_success());
    let distance: f64 = resp.json().await.expect("numeric body");
    assert!((distance - 5.0).abs() < 1e-9);
}

#[tokio::test]
#[ignore]
async fn empty_batch_yields_an_empty_linestring() {
    let client = Client::new();
    let base = base_url();

    let resp = client
        .post(format!("{}/calcDeliveryPathAsGeoJson", base))
        .json(&json!([]))
        .send()
        .await
        .expect("send calcDeliveryPathAsGeoJson");

    assert!(resp.status().is_success());
    let body = resp.text().await.expect("text body");
    assert_eq!(body, "{\"type\":\"LineString\",\"coordinates\":[]}");
}

#[tokio::test]
#[ignore]
async fn health_endpoint_is_up() {
    let client = Client::new();
    let resp = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("send health");
    assert!(resp.status().is_success());
}

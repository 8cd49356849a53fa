//! End-to-end admin order management against a running admin API.
//!
//! Requires `VIETLONG_E2E=1`, an admin on `ADMIN_BASE_URL` (default
//! http://localhost:3001), and the bootstrap admin seeded with the
//! password in `VIETLONG_E2E_ADMIN_PASSWORD`.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};

use vietlong_integration_tests::{admin_base_url, client, e2e_enabled};

fn admin_password() -> Option<String> {
    std::env::var("VIETLONG_E2E_ADMIN_PASSWORD").ok()
}

#[tokio::test]
async fn test_admin_routes_require_a_session() {
    if !e2e_enabled() {
        return;
    }

    let base = admin_base_url();
    let resp = client()
        .get(format!("{base}/orders"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_admin_login_and_order_listing() {
    if !e2e_enabled() {
        return;
    }
    let Some(password) = admin_password() else {
        return;
    };

    let base = admin_base_url();
    let client = client();

    let resp = client
        .post(format!("{base}/auth/login"))
        .json(&json!({ "email": "admin@vietlong.com", "password": password }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    // Listing works and every non-cancelled order has a progress index.
    let orders: Vec<Value> = client
        .get(format!("{base}/orders"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    for order in &orders {
        if order["status"] != "CANCELLED" {
            assert!(order["progress"].is_number());
        }
    }

    // Dashboard summary is consistent with the listing.
    let summary: Value = client
        .get(format!("{base}/dashboard"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary["orderCount"].as_u64().unwrap() as usize, orders.len());
}

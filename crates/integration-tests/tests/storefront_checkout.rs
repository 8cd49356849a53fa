//! End-to-end checkout flow against a running storefront.
//!
//! Requires `VIETLONG_E2E=1` and a storefront on `STOREFRONT_BASE_URL`
//! (default http://localhost:3000) backed by a writable store.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};

use vietlong_integration_tests::{client, e2e_enabled, random_email, storefront_base_url};

#[tokio::test]
async fn test_register_shop_and_checkout() {
    if !e2e_enabled() {
        return;
    }

    let base = storefront_base_url();
    let client = client();

    // Register a throwaway customer; the session cookie carries on.
    let email = random_email();
    let resp = client
        .post(format!("{base}/auth/register"))
        .json(&json!({
            "email": email,
            "password": "mat-khau-e2e",
            "name": "E2E Customer",
        }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    // Pick the first product from the catalog.
    let products: Vec<Value> = client
        .get(format!("{base}/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!products.is_empty(), "catalog should be seeded");
    let product_id = products[0]["id"].as_str().unwrap().to_owned();
    let price = products[0]["price"].as_u64().unwrap();

    // Add it twice: one line, quantity 2.
    for _ in 0..2 {
        let resp = client
            .post(format!("{base}/cart/add"))
            .json(&json!({ "productId": product_id }))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
    }
    let cart: Value = client
        .get(format!("{base}/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["quantity"], 2);

    // Checkout.
    let checkout: Value = client
        .post(format!("{base}/checkout"))
        .json(&json!({ "address": "Hanoi", "phone": "0900000000" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let order = &checkout["order"];
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["total"].as_u64().unwrap(), price * 2);

    // The cart is empty afterwards.
    let cart: Value = client
        .get(format!("{base}/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(cart["items"].as_array().unwrap().is_empty());

    // And the order shows up in the history with a progress index.
    let orders: Vec<Value> = client
        .get(format!("{base}/account/orders"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let placed = orders
        .iter()
        .find(|o| o["id"] == order["id"])
        .expect("placed order in history");
    assert_eq!(placed["progress"], 0);
}

#[tokio::test]
async fn test_checkout_without_login_is_a_no_op() {
    if !e2e_enabled() {
        return;
    }

    let base = storefront_base_url();
    let client = client();

    let checkout: serde_json::Value = client
        .post(format!("{base}/checkout"))
        .json(&json!({ "address": "Hanoi", "phone": "0900000000" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(checkout["order"].is_null());
}

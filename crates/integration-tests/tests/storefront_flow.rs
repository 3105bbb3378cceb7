//! Shopper flows against a running storefront.
//!
//! Ignored by default; see the crate docs for how to run them.

#![allow(clippy::unwrap_used)]

use comforty_integration_tests::{Shopper, product_slug, valid_shipping_form};

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_health() {
    let shopper = Shopper::new().unwrap();
    let response = shopper.get("/health").await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
#[ignore = "requires a running storefront and database"]
async fn test_readiness() {
    let shopper = Shopper::new().unwrap();
    let response = shopper.get("/health/ready").await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore = "requires a running storefront with content"]
async fn test_add_to_cart_then_checkout() {
    let shopper = Shopper::new().unwrap();
    let slug = product_slug();

    let response = shopper
        .htmx_post(&format!("/products/{slug}/cart"), &[])
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers().get("HX-Trigger").unwrap(), "cart-updated");
    assert!(response.text().await.unwrap().contains("Item added to cart!"));
    assert_eq!(shopper.cart_count().await.unwrap(), Some(1));

    let response = shopper
        .post_form("/checkout", &valid_shipping_form())
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers().get("location").unwrap(), "/thankyou");

    let body = shopper.get("/thankyou").await.unwrap().text().await.unwrap();
    assert!(body.contains("Order placed successfully!"));

    // The flash is shown once
    let body = shopper.get("/thankyou").await.unwrap().text().await.unwrap();
    assert!(!body.contains("Order placed successfully!"));

    assert_eq!(shopper.cart_count().await.unwrap(), Some(0));
}

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_checkout_rejects_short_phone() {
    let shopper = Shopper::new().unwrap();
    let form: Vec<_> = valid_shipping_form()
        .into_iter()
        .map(|(k, v)| if k == "phone" { (k, "555") } else { (k, v) })
        .collect();

    let response = shopper.post_form("/checkout", &form).await.unwrap();
    assert_eq!(response.status(), 422);
    let body = response.text().await.unwrap();
    assert!(body.contains("Phone number must be at least 10 digits"));
    assert!(body.contains("value=\"Ada Lovelace\""));
}

#[tokio::test]
#[ignore = "requires a running storefront with content"]
async fn test_wishlist_add_is_idempotent() {
    let shopper = Shopper::new().unwrap();
    let path = format!("/products/{}/wishlist", product_slug());

    let body = shopper.htmx_post(&path, &[]).await.unwrap().text().await.unwrap();
    assert!(body.contains("Item added to wishlist!"));

    let body = shopper.htmx_post(&path, &[]).await.unwrap().text().await.unwrap();
    assert!(body.contains("Item already in wishlist!"));
}

#[tokio::test]
#[ignore = "requires a running storefront"]
async fn test_unknown_product_shows_loading_state() {
    let shopper = Shopper::new().unwrap();
    let response = shopper.get("/products/no-such-product-slug").await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains("loading-spinner"));
}

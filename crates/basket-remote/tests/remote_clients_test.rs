//! Integration tests for the HTTP product and stock clients.

use std::time::Duration;

use basket_core::basket::ProductId;
use basket_core::error::RemoteError;
use basket_core::product::ProductClient;
use basket_core::stock::StockClient;
use basket_remote::{HttpProductClient, HttpStockClient, build_client};
use httpmock::prelude::*;
use serde_json::json;

fn product_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("Product {id}"),
        "code": format!("CODE-{id}"),
        "color": "red",
        "price": 9.99,
        "image_url": format!("https://img.example.com/{id}.png"),
        "type": "apparel",
        "created_at": "2026-01-15T10:00:00Z",
        "updated_at": "2026-01-15T10:00:00Z"
    })
}

fn client() -> reqwest::Client {
    build_client(Duration::from_secs(5)).unwrap()
}

// --- products ---

#[tokio::test]
async fn test_get_product_by_id_decodes_product() {
    // Arrange
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/products/p1");
            then.status(200).json_body(product_json("p1"));
        })
        .await;
    let products = HttpProductClient::new(client(), server.base_url());

    // Act
    let product = products.get_by_id(&ProductId::from("p1")).await.unwrap();

    // Assert
    mock.assert_async().await;
    assert_eq!(product.id, ProductId::from("p1"));
    assert_eq!(product.product_type, "apparel");
    assert!((product.price - 9.99).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_get_product_by_id_maps_error_bag_to_status_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/products/missing");
            then.status(400)
                .json_body(json!({ "code": 20001, "message": "Product not found." }));
        })
        .await;
    let products = HttpProductClient::new(client(), server.base_url());

    let result = products.get_by_id(&ProductId::from("missing")).await;

    match result {
        Err(RemoteError::Status {
            status,
            code,
            message,
        }) => {
            assert_eq!(status, 400);
            assert_eq!(code, Some(20001));
            assert_eq!(message, "Product not found.");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_products_by_ids_posts_ids_in_one_call() {
    // Arrange
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/products/bulk")
                .json_body(json!({ "ids": ["p1", "p2"] }));
            then.status(200)
                .json_body(json!({ "products": [product_json("p1"), product_json("p2")] }));
        })
        .await;
    let products = HttpProductClient::new(client(), format!("{}/", server.base_url()));

    // Act
    let resolved = products
        .get_by_ids(&[ProductId::from("p1"), ProductId::from("p2")])
        .await
        .unwrap();

    // Assert
    mock.assert_hits_async(1).await;
    let ids: Vec<&str> = resolved.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
}

#[tokio::test]
async fn test_get_products_by_ids_rejects_malformed_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/products/bulk");
            then.status(200).body("not json");
        })
        .await;
    let products = HttpProductClient::new(client(), server.base_url());

    let result = products.get_by_ids(&[ProductId::from("p1")]).await;

    assert!(matches!(result, Err(RemoteError::Decode(_))));
}

#[tokio::test]
async fn test_get_products_by_ids_accepts_camel_case_products() {
    // Arrange
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/products/bulk");
            then.status(200).json_body(json!({
                "products": [
                    {
                        "id": "p1",
                        "name": "Product p1",
                        "code": "CODE-p1",
                        "color": "red",
                        "createdAt": "2026-01-15T10:00:00Z",
                        "updatedAt": "2026-01-16T10:00:00Z",
                        "price": 9.99,
                        "imageURL": "https://img.example.com/p1.png",
                        "type": "apparel"
                    },
                    { "id": "p2", "name": "Product p2" }
                ]
            }));
        })
        .await;
    let products = HttpProductClient::new(client(), server.base_url());

    // Act
    let resolved = products
        .get_by_ids(&[ProductId::from("p1"), ProductId::from("p2")])
        .await
        .unwrap();

    // Assert
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].image_url, "https://img.example.com/p1.png");
    assert_eq!(
        resolved[0].updated_at.to_rfc3339(),
        "2026-01-16T10:00:00+00:00"
    );
    assert_eq!(resolved[1].created_at.timestamp(), 0);
}

// --- stock ---

#[tokio::test]
async fn test_is_available_posts_product_and_quantity() {
    // Arrange
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/stocks/availability")
                .json_body(json!({ "product_id": "p1", "quantity": 2 }));
            then.status(200).json_body(json!({ "is_available": false }));
        })
        .await;
    let stock = HttpStockClient::new(client(), server.base_url());

    // Act
    let available = stock.is_available(&ProductId::from("p1"), 2).await.unwrap();

    // Assert
    mock.assert_async().await;
    assert!(!available);
}

#[tokio::test]
async fn test_is_available_treats_missing_flag_as_unavailable() {
    // Arrange
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/stocks/availability");
            then.status(200).json_body(json!({}));
        })
        .await;
    let stock = HttpStockClient::new(client(), server.base_url());

    // Act
    let available = stock.is_available(&ProductId::from("p1"), 2).await;

    // Assert
    assert!(matches!(available, Ok(false)));
}

#[tokio::test]
async fn test_reserve_puts_and_decodes_stock() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/v1/stocks/reserve")
                .json_body(json!({ "product_id": "p1", "quantity": 2 }));
            then.status(200).json_body(json!({
                "id": "s-1",
                "product_id": "p1",
                "quantity": 10,
                "reserved_quantity": 2,
                "created_at": "2026-01-15T10:00:00Z",
                "updated_at": "2026-01-15T10:00:00Z"
            }));
        })
        .await;
    let stock = HttpStockClient::new(client(), server.base_url());

    let reserved = stock.reserve(&ProductId::from("p1"), 2).await.unwrap();

    mock.assert_async().await;
    assert_eq!(reserved.reserved_quantity, 2);
    assert_eq!(reserved.product_id, ProductId::from("p1"));
}

#[tokio::test]
async fn test_reserve_without_error_bag_uses_status_reason() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/v1/stocks/reserve");
            then.status(503);
        })
        .await;
    let stock = HttpStockClient::new(client(), server.base_url());

    let result = stock.reserve(&ProductId::from("p1"), 1).await;

    assert!(matches!(
        result,
        Err(RemoteError::Status { status: 503, code: None, ref message }) if message == "Service Unavailable"
    ));
}

#[tokio::test]
async fn test_slow_service_is_a_transport_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/stocks/availability");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({ "is_available": true }));
        })
        .await;
    let stock = HttpStockClient::new(
        build_client(Duration::from_millis(50)).unwrap(),
        server.base_url(),
    );

    let result = stock.is_available(&ProductId::from("p1"), 1).await;

    assert!(matches!(result, Err(RemoteError::Transport(_))));
}

#[tokio::test]
async fn test_unreachable_service_is_a_transport_error() {
    let products = HttpProductClient::new(client(), "http://127.0.0.1:1");

    let result = products.get_by_id(&ProductId::from("p1")).await;

    assert!(matches!(result, Err(RemoteError::Transport(_))));
}

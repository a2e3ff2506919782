//! Catalog wrappers: path building and typed decoding.

use crate::helpers::{client_for, data, page, route};

use api_client::ApiError;
use models::{Brand, ProductFinder};

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_brands_page_when_listed_then_items_and_metadata_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("brands")))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .respond_with(page(json!([{"id": 1, "name": "Acme"}, {"id": 2, "name": "Globex"}]), 2))
        .expect(1)
        .mount(&server)
        .await;

    let brands = client_for(&server).catalog().brands(0, 10).await.unwrap();

    assert_eq!(brands.items.len(), 2);
    assert_eq!(brands.items[0].name, "Acme");
    assert_eq!(brands.page.total_items, 2);
}

#[tokio::test]
async fn given_search_term_with_spaces_when_searching_brands_then_term_sent_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("brands/search")))
        .and(query_param("searchTerm", "acme & sons"))
        .respond_with(page(json!([]), 0))
        .expect(1)
        .mount(&server)
        .await;

    let brands = client_for(&server)
        .catalog()
        .search_brands("acme & sons", 0, 5)
        .await
        .unwrap();

    assert!(brands.items.is_empty());
}

#[tokio::test]
async fn given_new_brand_when_created_then_server_record_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route("brands")))
        .respond_with(data(json!({"id": 9, "name": "Initech"})))
        .mount(&server)
        .await;

    let brand = client_for(&server)
        .catalog()
        .create_brand(&Brand::new("Initech"))
        .await
        .unwrap();

    assert_eq!(brand.id, Some(9));
}

#[tokio::test]
async fn given_name_finder_when_listing_products_then_first_page_of_twenty_requested() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("products/search")))
        .and(query_param("name", "kettle"))
        .and(query_param("page", "0"))
        .and(query_param("size", "20"))
        .respond_with(page(
            json!([{"uuid": "p-1", "name": "Kettle", "price": 19.5}]),
            1,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let products = client_for(&server)
        .catalog()
        .products(&ProductFinder::Name("kettle".to_string()))
        .await
        .unwrap();

    assert_eq!(products.items[0].uuid, "p-1");
    assert_eq!(products.items[0].price, 19.5);
}

/// **VALUE**: The rating endpoint's `item` is a bare number, not an object.
#[tokio::test]
async fn given_rating_endpoint_when_average_requested_then_number_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("reviews/byProduct/p-1/rating")))
        .respond_with(data(json!(4.25)))
        .mount(&server)
        .await;

    let rating = client_for(&server)
        .catalog()
        .average_rating("p-1")
        .await
        .unwrap();

    assert_eq!(rating, 4.25);
}

#[tokio::test]
async fn given_image_uuid_when_image_fetched_then_bytes_and_metadata_combined() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("images/uuid/i-1")))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![1, 2, 3], "image/jpeg"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(route("images/uuid/i-1/metadata")))
        .respond_with(data(json!({
            "uuid": "i-1",
            "name": "kettle.jpg",
            "mimeType": "image/jpeg",
            "width": 640,
            "height": 480
        })))
        .expect(1)
        .mount(&server)
        .await;

    let image = client_for(&server).catalog().image("i-1").await.unwrap();

    assert_eq!(image.blob.bytes, vec![1, 2, 3]);
    assert_eq!(image.blob.mime_type(), "image/jpeg");
    assert_eq!(image.metadata.width, 640);
}

#[tokio::test]
async fn given_missing_image_when_image_fetched_then_not_found_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("images/uuid/gone")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(route("images/uuid/gone/metadata")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .catalog()
        .image("gone")
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), Some(404));
}

/// **VALUE**: A lookup value of `..` is refused before anything is sent.
///
/// **BUG THIS CATCHES**: `products/uuid/..` normalizes to `products/`, so an
/// unchecked value would silently fetch a different resource.
#[tokio::test]
async fn given_dot_dot_uuid_when_product_fetched_then_invalid_path_and_nothing_sent() {
    let server = MockServer::start().await;

    let error = client_for(&server)
        .catalog()
        .product("..")
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::InvalidPath { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

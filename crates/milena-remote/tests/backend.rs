//! Backend client against a mocked hosted backend.

use chrono::{TimeZone, Utc};
use milena_core::{LocalImage, ProductRecord};
use milena_remote::{Backend, BackendConfig, RemoteError, ShopStore};
use serde_json::json;
use wiremock::matchers::{
    body_json, body_string_contains, header, method, path, path_regex, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "anon-test-key";

async fn setup() -> (MockServer, Backend) {
    let server = MockServer::start().await;
    let backend = Backend::new(BackendConfig::new(server.uri(), KEY)).unwrap();
    (server, backend)
}

fn record() -> ProductRecord {
    ProductRecord {
        name: "Bufanda Roja".to_string(),
        category_id: 2,
        description: "Lana de alpaca".to_string(),
        images: vec!["https://cdn/a.jpg".to_string()],
    }
}

#[tokio::test]
async fn test_list_products_with_category_newest_first() {
    let (server, backend) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("select", "*,categories(id,name)"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", KEY))
        .and(header("authorization", "Bearer anon-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 2, "name": "Bufanda Roja", "description": null,
                "images": ["https://cdn/a.jpg"], "idcategory": 2,
                "categories": { "id": 2, "name": "Tejido" },
                "created_at": "2024-06-01T12:00:00+00:00"
            },
            { "id": 1, "name": "Llavero", "idcategory": null, "categories": null }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let products = backend.list_products().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].category_name(), Some("Tejido"));
    assert_eq!(products[1].resolved_category(), "Varios");
}

#[tokio::test]
async fn test_list_categories() {
    let (server, backend) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .and(query_param("select", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Pintura" },
            { "id": 2, "name": "Tejido" }
        ])))
        .mount(&server)
        .await;

    let categories = backend.list_categories().await.unwrap();
    assert_eq!(categories[1].name, "Tejido");
}

#[tokio::test]
async fn test_insert_product_sends_wire_names() {
    let (server, backend) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/products"))
        .and(header("prefer", "return=minimal"))
        .and(body_json(json!([{
            "name": "Bufanda Roja",
            "idcategory": 2,
            "description": "Lana de alpaca",
            "images": ["https://cdn/a.jpg"]
        }])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    backend.insert_product(&record()).await.unwrap();
}

#[tokio::test]
async fn test_update_product_filters_by_id() {
    let (server, backend) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/products"))
        .and(query_param("id", "eq.14"))
        .and(body_json(json!({
            "name": "Bufanda Roja",
            "idcategory": 2,
            "description": "Lana de alpaca",
            "images": ["https://cdn/a.jpg"]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    backend.update_product(14, &record()).await.unwrap();
}

#[tokio::test]
async fn test_create_category_returns_stored_row() {
    let (server, backend) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/categories"))
        .and(header("prefer", "return=representation"))
        .and(body_json(json!([{ "name": "Resina" }])))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!([{ "id": 6, "name": "Resina" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = backend.create_category("Resina").await.unwrap();
    assert_eq!(created.id, 6);
}

#[tokio::test]
async fn test_create_category_empty_response() {
    let (server, backend) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = backend.create_category("Resina").await.unwrap_err();
    assert!(matches!(err, RemoteError::EmptyResponse { .. }));
}

#[tokio::test]
async fn test_rename_category() {
    let (server, backend) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/categories"))
        .and(query_param("id", "eq.3"))
        .and(body_json(json!({ "name": "Bordados" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    backend.rename_category(3, "Bordados").await.unwrap();
}

#[tokio::test]
async fn test_delete_referenced_category_is_foreign_key_violation() {
    let (server, backend) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/categories"))
        .and(query_param("id", "eq.2"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23503",
            "details": "Key (id)=(2) is still referenced from table \"products\".",
            "hint": null,
            "message": "update or delete on table \"categories\" violates foreign key constraint \"products_idcategory_fkey\" on table \"products\""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = backend.delete_category(2).await.unwrap_err();
    assert!(err.is_foreign_key_violation());
}

#[tokio::test]
async fn test_delete_product() {
    let (server, backend) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/products"))
        .and(query_param("id", "eq.9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    backend.delete_product(9).await.unwrap();
}

#[tokio::test]
async fn test_upload_image_returns_public_url() {
    let (server, backend) = setup().await;
    let now = Utc.timestamp_millis_opt(1_718_000_000_000).unwrap();

    Mock::given(method("POST"))
        .and(path("/storage/v1/object/products/1718000000000_jarr_n_jpg.jpg"))
        .and(header("x-upsert", "false"))
        .and(header("apikey", KEY))
        .and(body_string_contains("3600"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "Key": "products/1718000000000_jarr_n_jpg.jpg" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let image = LocalImage::new("jarrón.jpg", "image/jpeg", b"fake-jpeg-bytes".to_vec());
    let url = backend.images().upload_at(&image, now).await.unwrap();

    assert_eq!(
        url,
        format!(
            "{}/storage/v1/object/public/products/1718000000000_jarr_n_jpg.jpg",
            server.uri()
        )
    );
}

#[tokio::test]
async fn test_upload_failure_is_reported() {
    let (server, backend) = setup().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/products/\d+_a_png\.png$"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "statusCode": "404",
            "error": "Bucket not found",
            "message": "Bucket not found"
        })))
        .mount(&server)
        .await;

    let image = LocalImage::new("a.png", "image/png", vec![1]);
    let err = backend.upload_image(&image).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_server_error_is_unparsed() {
    let (server, backend) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = backend.list_categories().await.unwrap_err();
    assert!(matches!(err, RemoteError::Unparsed { status: 503, .. }));
    assert!(!backend.health_check().await);
}

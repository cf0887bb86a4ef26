use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use leadsheet::app::{router, rows_to_leads};
use leadsheet::store::SheetStore;

fn test_router() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SheetStore::open(dir.path().join("leads.bin.gz")).unwrap());
    (router(store), dir)
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn assert_cors(response: &Response<Body>) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET, POST, PUT, DELETE, OPTIONS"
    );
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "Content-Type, Authorization"
    );
}

#[tokio::test]
async fn preflight_carries_the_full_cors_header_set() {
    let (app, _dir) = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_MAX_AGE], "86400");
}

#[tokio::test]
async fn create_then_list_round_trips() {
    let (app, _dir) = test_router();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"name": "Jane", "email": "j@x.com", "phone": "555", "message": "hi"})
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Data saved successfully"));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    let leads = body_json(response).await;
    let leads = leads.as_array().unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["name"], json!("Jane"));
    assert_eq!(leads[0]["email"], json!("j@x.com"));
    assert_eq!(leads[0]["phone"], json!("555"));
    assert_eq!(leads[0]["message"], json!("hi"));
    assert!(!leads[0]["date"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_missing_and_null_fields_default_to_empty() {
    let (app, _dir) = test_router();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"name": "OnlyName", "email": null, "unexpected": "ignored"})
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let leads = body_json(response).await;
    assert_eq!(leads[0]["name"], json!("OnlyName"));
    assert_eq!(leads[0]["email"], json!(""));
    assert_eq!(leads[0]["phone"], json!(""));
    assert!(leads[0].get("unexpected").is_none());
}

#[tokio::test]
async fn listing_an_empty_grid_returns_an_empty_array() {
    let (app, _dir) = test_router();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn malformed_bodies_fail_shaped_with_cors_headers() {
    let (app, _dir) = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("this is not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors(&response);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[test]
fn blank_rows_are_dropped_from_listings() {
    let rows = vec![
        vec!["name", "email", "phone", "message", "date"],
        vec!["", "", "", "", ""],
        vec!["Jane", "", "", "", ""],
    ]
    .into_iter()
    .map(|row| row.into_iter().map(String::from).collect())
    .collect::<Vec<Vec<String>>>();

    let leads = rows_to_leads(&rows);
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["name"], json!("Jane"));
}

#[test]
fn capitalized_headers_are_lowercased() {
    let rows = vec![
        vec!["Name", "Email", "Phone", "Message", "Date"],
        vec!["Jane", "j@x.com", "555", "hi", "2024-05-01"],
    ]
    .into_iter()
    .map(|row| row.into_iter().map(String::from).collect())
    .collect::<Vec<Vec<String>>>();

    let leads = rows_to_leads(&rows);
    assert_eq!(leads[0]["name"], json!("Jane"));
    assert!(leads[0].get("Name").is_none());
}

#[test]
fn absent_cells_become_empty_strings() {
    let rows = vec![
        vec!["name", "email", "phone", "message", "date"],
        vec!["Jane"],
    ]
    .into_iter()
    .map(|row| row.into_iter().map(String::from).collect())
    .collect::<Vec<Vec<String>>>();

    let leads = rows_to_leads(&rows);
    assert_eq!(leads[0]["email"], json!(""));
    assert_eq!(leads[0]["date"], json!(""));
}

#[test]
fn header_only_grids_list_nothing() {
    let rows = vec![
        vec!["name", "email", "phone", "message", "date"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<String>>(),
    ];
    assert!(rows_to_leads(&rows).is_empty());
}

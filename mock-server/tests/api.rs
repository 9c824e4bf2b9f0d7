use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, EchoedRequest};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- get ---

#[tokio::test]
async fn echoes_get_path_and_query() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/endpoint?q=search")
                .header(http::header::ACCEPT, "application/json")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echoed: EchoedRequest = body_json(resp).await;
    assert_eq!(echoed.method, "GET");
    assert_eq!(echoed.path, "/endpoint");
    assert_eq!(echoed.query.as_deref(), Some("q=search"));
    assert_eq!(echoed.headers["accept"], "application/json");
    assert!(echoed.body.is_null());
}

#[tokio::test]
async fn echoes_missing_query_as_none() {
    let resp = app()
        .oneshot(Request::builder().uri("/endpoint").body(String::new()).unwrap())
        .await
        .unwrap();

    let echoed: EchoedRequest = body_json(resp).await;
    assert!(echoed.query.is_none());
}

// --- write ---

#[tokio::test]
async fn echoes_json_body() {
    let resp = app()
        .oneshot(json_request("POST", "/post-endpoint", r#"{"name":"Somebody"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echoed: EchoedRequest = body_json(resp).await;
    assert_eq!(echoed.method, "POST");
    assert_eq!(echoed.headers["content-type"], "application/json");
    assert_eq!(echoed.body, serde_json::json!({"name": "Somebody"}));
}

#[tokio::test]
async fn echoes_patch_and_put() {
    for method in ["PUT", "PATCH"] {
        let resp = app()
            .oneshot(json_request(method, "/items/1", r#"{"done":true}"#))
            .await
            .unwrap();
        let echoed: EchoedRequest = body_json(resp).await;
        assert_eq!(echoed.method, method);
        assert_eq!(echoed.path, "/items/1");
    }
}

#[tokio::test]
async fn non_json_body_echoes_as_null() {
    let resp = app()
        .oneshot(json_request("POST", "/raw", "not json"))
        .await
        .unwrap();

    let echoed: EchoedRequest = body_json(resp).await;
    assert!(echoed.body.is_null());
}

// --- delete ---

#[tokio::test]
async fn echoes_delete() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/delete-path")
                .header(http::header::AUTHORIZATION, "auth")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    let echoed: EchoedRequest = body_json(resp).await;
    assert_eq!(echoed.method, "DELETE");
    assert_eq!(echoed.path, "/delete-path");
    assert_eq!(echoed.headers["authorization"], "auth");
}

// --- delay ---

#[tokio::test]
async fn delay_route_responds_after_sleeping() {
    let resp = app()
        .oneshot(Request::builder().uri("/delay/10").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"done");
}

#[tokio::test]
async fn delay_route_rejects_non_numeric_duration() {
    let resp = app()
        .oneshot(Request::builder().uri("/delay/soon").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

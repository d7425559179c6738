use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tweetboard_http::{HttpClient, HttpError, RequestOpts};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Echo {
    value: String,
}

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(&format!("{}/", server.uri())).expect("valid base url")
}

#[tokio::test]
async fn get_json_decodes_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/echo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": "hi"})))
        .expect(1)
        .mount(&server)
        .await;

    let got: Echo = client_for(&server)
        .get_json("api/echo", RequestOpts::default())
        .await
        .unwrap();
    assert_eq!(got.value, "hi");
}

#[tokio::test]
async fn post_json_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/echo"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"value": "ping"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"value": "pong"})))
        .expect(1)
        .mount(&server)
        .await;

    let got: Echo = client_for(&server)
        .post_json(
            "api/echo",
            &Echo {
                value: "ping".into(),
            },
            RequestOpts::default(),
        )
        .await
        .unwrap();
    assert_eq!(got.value, "pong");
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(
            ResponseTemplate::new(503)
                .insert_header("x-request-id", "req-42")
                .set_body_json(json!({"message": "overloaded"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_json::<Echo>("api/flaky", RequestOpts::default())
        .await
        .unwrap_err();

    match err {
        HttpError::Api {
            status,
            message,
            request_id,
        } => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(message, "overloaded");
            assert_eq!(request_id, "req-42");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/echo"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_json::<Echo>("api/echo", RequestOpts::default())
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Decode(_, ref snippet) if snippet == "not json"));
}

#[tokio::test]
async fn slow_responses_hit_the_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"value": "late"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_json::<Echo>(
            "api/slow",
            RequestOpts {
                timeout: Some(Duration::from_millis(50)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Network(_)));
}

//! API client tests against a mock UseResponse server.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use useresponse::api::{Api, Transport};
use useresponse::config::Config;
use useresponse::error::UseresponseError;
use useresponse::models::{
    CommentQuery, CommentSort, NewObject, ObjectOwnership, ObjectType, TicketQuery, TicketSort,
    TicketStatus,
};

const API_KEY: &str = "test-key-123";

fn api_for(server: &MockServer) -> Api {
    let config = Config::new(server.uri(), API_KEY).unwrap();
    Api::new(&config).unwrap()
}

#[tokio::test]
async fn get_user_sends_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/4.0/users/42.json"))
        .and(query_param("apiKey", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": {"id": 42, "full_name": "John Doe"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = assert_ok!(api_for(&server).users().get(42).await);
    assert_eq!(user["success"]["full_name"], "John Doe");
}

#[tokio::test]
async fn get_tickets_sends_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/4.0/tickets.json"))
        .and(query_param("page", "2"))
        .and(query_param("count", "50"))
        .and(query_param("status", "1"))
        .and(query_param("sort", "1"))
        .and(query_param("custom_fields[department]", "billing"))
        .and(query_param("apiKey", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": []})))
        .expect(1)
        .mount(&server)
        .await;

    let query = TicketQuery::new()
        .with_status(TicketStatus::Opened)
        .with_sort(TicketSort::Updated)
        .with_custom_field("department", "billing")
        .with_page(2)
        .with_count(50);
    let tickets = assert_ok!(api_for(&server).tickets().get(&query).await);
    assert_eq!(tickets, json!({"success": []}));
}

#[tokio::test]
async fn invalid_ticket_query_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = api_for(&server)
        .tickets()
        .get(&TicketQuery::new().with_count(51))
        .await;
    let err = assert_err!(result);
    assert!(matches!(err, UseresponseError::Validation(_)));
}

#[tokio::test]
async fn create_object_posts_form_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/4.0/objects.json"))
        .and(body_string_contains("ownership=knowledge-base"))
        .and(body_string_contains("object_type=article"))
        .and(body_string_contains("title=Reset+your+password"))
        .and(body_string_contains("apiKey=test-key-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": {"id": 5}})))
        .expect(1)
        .mount(&server)
        .await;

    let object = NewObject::new(
        ObjectOwnership::KnowledgeBase,
        ObjectType::Article,
        "Reset your password",
        "[b]Step 1[/b]",
    );
    let created = assert_ok!(api_for(&server).objects().create(&object).await);
    assert_eq!(created, Some(json!({"id": 5})));
}

#[tokio::test]
async fn create_object_without_success_returns_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/4.0/objects.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let object = NewObject::new(ObjectOwnership::Feedback, ObjectType::Idea, "Dark mode", "");
    let created = assert_ok!(api_for(&server).objects().create(&object).await);
    assert_eq!(created, None);
}

#[tokio::test]
async fn get_object_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/4.0/objects/9.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": {"id": 9}})))
        .expect(1)
        .mount(&server)
        .await;

    let object = assert_ok!(api_for(&server).objects().get(9).await);
    assert_eq!(object["success"]["id"], 9);
}

#[tokio::test]
async fn search_comments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/4.0/objects/7/comments.json"))
        .and(query_param("is_private", "0"))
        .and(query_param("sort", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": []})))
        .expect(1)
        .mount(&server)
        .await;

    let query = CommentQuery::new(7).with_sort(CommentSort::Asc);
    assert_ok!(api_for(&server).comments().search(&query).await);
}

#[tokio::test]
async fn empty_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/4.0/users/1.json"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let user = assert_ok!(api_for(&server).users().get(1).await);
    assert!(user.is_null());
}

#[tokio::test]
async fn status_codes_map_to_errors() {
    for status in [400u16, 401, 403, 404, 409, 500] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&server)
            .await;

        let err = assert_err!(api_for(&server).users().get(42).await);
        let mapped = match status {
            400 => matches!(err, UseresponseError::InvalidRequest { .. }),
            401 => matches!(err, UseresponseError::Unauthenticated),
            403 => matches!(err, UseresponseError::Unauthorized),
            404 => {
                matches!(&err, UseresponseError::NotFound { path } if path == "/users/42.json")
            }
            409 => matches!(err, UseresponseError::OperationConflict { .. }),
            _ => matches!(err, UseresponseError::InternalServer { .. }),
        };
        assert!(mapped, "status {status} mapped to {err:?}");
        assert_eq!(err.status().map(|s| s.as_u16()), Some(status));
    }
}

#[tokio::test]
async fn error_body_is_sanitized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(format!("bad request apiKey={}", API_KEY)),
        )
        .mount(&server)
        .await;

    let err = assert_err!(api_for(&server).users().get(1).await);
    let message = err.to_string();
    assert!(!message.contains(API_KEY));
    assert!(message.contains("[REDACTED]"));
}

#[tokio::test]
async fn service_unavailable_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/4.0/users/1.json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/4.0/users/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": {"id": 1}})))
        .expect(1)
        .mount(&server)
        .await;

    let user = assert_ok!(api_for(&server).users().get(1).await);
    assert_eq!(user["success"]["id"], 1);
}

#[tokio::test]
async fn rate_limit_gives_up_after_max_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .expect(3)
        .mount(&server)
        .await;

    let err = assert_err!(api_for(&server).users().get(1).await);
    assert!(err.is_rate_limit());
    assert!(err.is_client_error());
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&server)
        .await;

    let err = assert_err!(api_for(&server).users().get(1).await);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn transport_put_and_delete() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/4.0/objects/9.json"))
        .and(body_string_contains("title=Renamed"))
        .and(body_string_contains("apiKey=test-key-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/4.0/objects/9.json"))
        .and(query_param("apiKey", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = Transport::new(&Config::new(server.uri(), API_KEY).unwrap()).unwrap();
    let body = vec![("title".to_string(), "Renamed".to_string())];
    assert_eq!(
        assert_ok!(transport.put("/objects/9.json", &body).await),
        json!({"success": true})
    );
    assert_eq!(
        assert_ok!(transport.delete("/objects/9.json").await),
        json!({"success": true})
    );
}

fn article() -> NewObject {
    NewObject::new(
        ObjectOwnership::KnowledgeBase,
        ObjectType::Article,
        "Reset your password",
        "",
    )
}

#[tokio::test]
async fn create_object_is_not_retried_after_gateway_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/4.0/objects.json"))
        .respond_with(ResponseTemplate::new(504))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/4.0/objects.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": {"id": 5}})))
        .expect(0)
        .mount(&server)
        .await;

    let err = assert_err!(api_for(&server).objects().create(&article()).await);
    assert!(matches!(err, UseresponseError::ServiceUnavailable { .. }));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn create_object_is_retried_when_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/4.0/objects.json"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/4.0/objects.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": {"id": 5}})))
        .expect(1)
        .mount(&server)
        .await;

    let created = assert_ok!(api_for(&server).objects().create(&article()).await);
    assert_eq!(created, Some(json!({"id": 5})));
}

#[tokio::test]
async fn create_object_is_not_retried_after_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/4.0/objects.json"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::new(server.uri(), API_KEY).unwrap();
    let transport = Transport::with_timeout(&config, Duration::from_millis(50)).unwrap();
    let body = article().to_params().unwrap();
    let err = assert_err!(transport.post("/objects.json", &body).await);
    assert!(matches!(err, UseresponseError::Timeout { .. }));
}

#[tokio::test]
async fn timeout_is_mapped_and_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/4.0/users/1.json"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .expect(3)
        .mount(&server)
        .await;

    let config = Config::new(server.uri(), API_KEY).unwrap();
    let timeout = Duration::from_millis(50);
    let transport = Transport::with_timeout(&config, timeout).unwrap();
    let err = assert_err!(transport.get("/users/1.json", &[]).await);
    match &err {
        UseresponseError::Timeout {
            duration,
            operation,
        } => {
            assert_eq!(*duration, timeout);
            assert_eq!(operation, "GET /users/1.json");
        }
        other => panic!("expected timeout, got {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn gateway_errors_map_to_service_unavailable() {
    for status in [502u16, 504] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .expect(3)
            .mount(&server)
            .await;

        let err = assert_err!(api_for(&server).users().get(1).await);
        assert!(
            matches!(err, UseresponseError::ServiceUnavailable { .. }),
            "status {status} mapped to {err:?}"
        );
        assert_eq!(err.status().map(|s| s.as_u16()), Some(status));
        assert!(err.is_server_error());
    }
}

#[tokio::test]
async fn other_statuses_map_to_http_status() {
    for status in [418u16, 422] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
            .expect(1)
            .mount(&server)
            .await;

        let err = assert_err!(api_for(&server).users().get(1).await);
        match &err {
            UseresponseError::HttpStatus { status: s, body } => {
                assert_eq!(s.as_u16(), status);
                assert_eq!(body, "nope");
            }
            other => panic!("status {status} mapped to {other:?}"),
        }
        assert!(err.is_client_error());
        assert!(!err.is_retryable());
    }
}

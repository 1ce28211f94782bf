//! End-to-end HTTP tests for the users API over an in-memory repository.
//!
//! The full pipeline runs for real: CORS and trace middleware, handlers,
//! transport validation, the domain service and the repository contract. Only
//! the database is swapped out.

use std::sync::Arc;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
};
use actix_web::http::{Method, StatusCode};
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, Utc};
use rstest::rstest;
use serde_json::{Value, json};

use user_service::middleware::{CorsOrigins, Trace, cors};
use user_service::domain::UserService;
use user_service::inbound::http::api_scope;
use user_service::inbound::http::health::health;
use user_service::inbound::http::state::HttpState;
use user_service::test_support::InMemoryUserRepository;

async fn init_app(
    repository: Arc<InMemoryUserRepository>,
) -> impl Service<actix_http::Request, Response = ServiceResponse<EitherBody<BoxBody>>, Error = actix_web::Error> {
    let service = Arc::new(UserService::new(repository, Arc::new(mockable::DefaultClock)));
    let state = HttpState::new(service.clone(), service);
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(cors(&CorsOrigins::Any))
            .wrap(Trace)
            .service(api_scope())
            .service(health),
    )
    .await
}

async fn json_body(response: ServiceResponse<EitherBody<BoxBody>>) -> Value {
    actix_test::read_body_json(response).await
}

fn field<'a>(body: &'a Value, name: &str) -> &'a str {
    body.get(name)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("missing string field {name} in {body}"))
}

#[actix_web::test]
async fn create_get_delete_lifecycle() {
    let repository = Arc::new(InMemoryUserRepository::new());
    let app = init_app(repository.clone()).await;

    let create = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({"name": "Alice", "email": "alice@example.com"}))
        .to_request();
    let response = actix_test::call_service(&app, create).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key("trace-id"));
    let created = json_body(response).await;
    assert_eq!(field(&created, "name"), "Alice");
    assert_eq!(field(&created, "email"), "alice@example.com");
    assert_eq!(field(&created, "created_at"), field(&created, "updated_at"));
    field(&created, "created_at")
        .parse::<DateTime<Utc>>()
        .expect("timestamp in RFC 3339 form");
    let id = field(&created, "id").to_owned();
    assert_eq!(repository.len(), 1);

    let fetch = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/users/{id}"))
        .to_request();
    let response = actix_test::call_service(&app, fetch).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, created);

    let remove = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{id}"))
        .to_request();
    let response = actix_test::call_service(&app, remove).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"message": "User deleted successfully"})
    );
    assert!(repository.is_empty());

    let refetch = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/users/{id}"))
        .to_request();
    let response = actix_test::call_service(&app, refetch).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(
        field(&body, "error"),
        format!("failed to get user: user {id} not found")
    );
}

#[actix_web::test]
async fn users_created_in_sequence_get_ascending_ids() {
    let app = init_app(Arc::new(InMemoryUserRepository::new())).await;
    let mut ids = Vec::new();

    for name in ["Ada", "Grace", "Edsger"] {
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"name": name, "email": "someone@example.com"}))
            .to_request();
        let body = json_body(actix_test::call_service(&app, request).await).await;
        ids.push(field(&body, "id").to_owned());
    }

    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    sorted.dedup();
    assert_eq!(sorted.len(), ids.len());
}

#[rstest]
#[case::empty_name(json!({"name": "", "email": "alice@example.com"}))]
#[case::missing_email(json!({"name": "Alice"}))]
#[case::invalid_email(json!({"name": "Alice", "email": "not-an-email"}))]
#[case::not_an_object(json!(["Alice", "alice@example.com"]))]
#[actix_web::test]
async fn invalid_create_requests_never_reach_storage(#[case] payload: Value) {
    let repository = Arc::new(InMemoryUserRepository::new());
    let app = init_app(repository.clone()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body.as_object().map(serde_json::Map::len), Some(1));
    assert!(!field(&body, "error").is_empty());
    assert!(repository.is_empty());
}

#[actix_web::test]
async fn deleting_unknown_user_is_not_found() {
    let app = init_app(Arc::new(InMemoryUserRepository::new())).await;

    let request = actix_test::TestRequest::delete()
        .uri("/api/v1/users/0190b6a4-5f3c-7d2e-9a41-8c1f2e3d4b5a")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key("trace-id"));
}

#[rstest]
#[case::get(actix_test::TestRequest::get())]
#[case::delete(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn malformed_ids_are_bad_requests(#[case] request: actix_test::TestRequest) {
    let app = init_app(Arc::new(InMemoryUserRepository::new())).await;

    let response =
        actix_test::call_service(&app, request.uri("/api/v1/users/not-a-uuid").to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({"error": "invalid user id"}));
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = init_app(Arc::new(InMemoryUserRepository::new())).await;

    let request = actix_test::TestRequest::get().uri("/health").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "ok"}));
}

#[rstest]
#[case::create("/api/v1/users", "POST")]
#[case::delete("/api/v1/users/0190b6a4-5f3c-7d2e-9a41-8c1f2e3d4b5a", "DELETE")]
#[actix_web::test]
async fn browser_preflight_allows_any_origin(#[case] uri: &str, #[case] method: &str) {
    let repository = Arc::new(InMemoryUserRepository::new());
    let app = init_app(repository.clone()).await;

    let request = actix_test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri(uri)
        .insert_header((ORIGIN, "http://localhost:3000"))
        .insert_header((ACCESS_CONTROL_REQUEST_METHOD, method))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
    assert!(repository.is_empty());
}

#[actix_web::test]
async fn cross_origin_responses_carry_allow_origin() {
    let app = init_app(Arc::new(InMemoryUserRepository::new())).await;

    let request = actix_test::TestRequest::get()
        .uri("/health")
        .insert_header((ORIGIN, "https://app.example.com"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}

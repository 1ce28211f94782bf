//! Tests for HTTP error mapping.

use actix_web::body::to_bytes;
use actix_web::{App, HttpResponse, test as actix_test, web};
use rstest::rstest;
use serde::Deserialize;

use super::*;

#[rstest]
#[case(DomainError::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(DomainError::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: DomainError, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[case(DomainError::not_found("failed to get user: user 42 not found"))]
#[case(DomainError::internal("failed to create user: user repository query failed: boom"))]
#[actix_web::test]
async fn error_body_has_single_error_field(#[case] error: DomainError) {
    let response = ResponseError::error_response(&error);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("JSON body");

    let object = value.as_object().expect("object body");
    assert_eq!(object.len(), 1);
    assert_eq!(
        object.get("error").and_then(serde_json::Value::as_str),
        Some(error.message())
    );
}

#[derive(Deserialize)]
struct NamedBody {
    #[expect(dead_code, reason = "only extraction is exercised")]
    name: String,
}

async fn accept_named(_body: web::Json<NamedBody>) -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[rstest]
#[case::malformed("{not json", "application/json")]
#[case::wrong_shape(r#"{"name": 7}"#, "application/json")]
#[case::wrong_content_type(r#"{"name": "x"}"#, "text/plain")]
#[actix_web::test]
async fn json_extraction_failures_render_as_invalid_payload(
    #[case] payload: &'static str,
    #[case] content_type: &'static str,
) {
    let app = actix_test::init_service(
        App::new()
            .app_data(json_config())
            .route("/", web::post().to(accept_named)),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", content_type))
        .set_payload(payload)
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = actix_test::read_body_json(response).await;
    assert_eq!(body.error, INVALID_PAYLOAD_MESSAGE);
}

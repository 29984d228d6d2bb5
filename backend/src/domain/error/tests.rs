//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000042";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n\t")]
fn try_new_rejects_blank_messages(#[case] message: &str) {
    let result = DomainError::try_new(ErrorCode::InvalidRequest, message);
    assert_eq!(result, Err(DomainErrorValidationError::EmptyMessage));
}

#[rstest]
fn try_with_trace_id_rejects_blank_identifier() {
    let result = DomainError::invalid_request("bad").try_with_trace_id("  ");
    assert_eq!(result, Err(DomainErrorValidationError::EmptyTraceId));
}

#[rstest]
#[case(DomainError::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(DomainError::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(DomainError::forbidden("x"), ErrorCode::Forbidden)]
#[case(DomainError::not_found("x"), ErrorCode::NotFound)]
#[case(DomainError::conflict("x"), ErrorCode::Conflict)]
#[case(DomainError::internal("x"), ErrorCode::InternalError)]
fn convenience_constructors_set_code(#[case] error: DomainError, #[case] code: ErrorCode) {
    assert_eq!(error.code(), code);
    assert_eq!(error.message(), "x");
}

#[rstest]
fn serialises_with_camel_case_envelope(expected_trace_id: String) {
    let error = DomainError::conflict("account already exists")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "field": "account" }));

    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(
        value,
        json!({
            "code": "conflict",
            "message": "account already exists",
            "traceId": expected_trace_id,
            "details": { "field": "account" },
        })
    );
}

#[rstest]
fn omits_absent_optional_fields() {
    let value = serde_json::to_value(DomainError::not_found("nope")).expect("error serialises");
    assert_eq!(value, json!({ "code": "not_found", "message": "nope" }));
}

#[rstest]
fn deserialising_blank_message_fails() {
    let result =
        serde_json::from_value::<DomainError>(json!({ "code": "not_found", "message": " " }));
    assert!(result.is_err());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { DomainError::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn try_from_dto_does_not_pick_up_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let dto = ErrorDto {
        code: ErrorCode::InvalidRequest,
        message: "bad".to_owned(),
        trace_id: None,
        details: None,
    };

    let error = TraceId::scope(trace_id, async move {
        DomainError::try_from(dto).expect("conversion succeeds for valid payload")
    })
    .await;

    assert!(error.trace_id().is_none());
}

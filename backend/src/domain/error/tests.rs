//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn conflict_with_details() -> DomainError {
    DomainError::conflict("vocab with learning lang ser and id 4 already exists")
        .with_details(json!({"existingId": 4}))
}

#[rstest]
#[case(DomainError::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(DomainError::not_found("missing"), ErrorCode::NotFound)]
#[case(DomainError::conflict("clash"), ErrorCode::Conflict)]
#[case(DomainError::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(DomainError::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = DomainError::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(DomainErrorValidationError::EmptyMessage)));
}

#[rstest]
fn display_renders_message_only() {
    let error = DomainError::not_found("vocab 12 not found");
    assert_eq!(error.to_string(), "vocab 12 not found");
}

#[rstest]
fn serialises_code_in_snake_case(conflict_with_details: DomainError) {
    let value = serde_json::to_value(&conflict_with_details).expect("error serialises");
    assert_eq!(value["code"], json!("conflict"));
    assert_eq!(value["details"], json!({"existingId": 4}));
}

#[rstest]
fn round_trips_through_json(conflict_with_details: DomainError) {
    let encoded = serde_json::to_string(&conflict_with_details).expect("error serialises");
    let decoded: DomainError = serde_json::from_str(&encoded).expect("error deserialises");
    assert_eq!(decoded, conflict_with_details);
}

#[rstest]
fn deserialising_blank_message_fails() {
    let payload = json!({"code": "not_found", "message": "  "});
    let result = serde_json::from_value::<DomainError>(payload);
    assert!(result.is_err());
}

use super::*;

#[test]
fn not_found_status_maps_to_not_found() {
    let err = ClientError::from_response(StatusCode::NOT_FOUND, r#"{"message":"no blog 7"}"#);
    assert_eq!(err, ClientError::NotFound);
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.describe("Failed to load blog"), "Blog not found");
}

#[test]
fn structured_body_maps_to_server_message() {
    let err = ClientError::from_response(
        StatusCode::BAD_REQUEST,
        r#"{"status":400,"error":"Bad Request","message":"titulo is too long"}"#,
    );
    assert_eq!(
        err,
        ClientError::ServerMessage {
            status: 400,
            message: "titulo is too long".into(),
        }
    );
    assert_eq!(err.describe("Failed to save blog"), "titulo is too long");
}

#[test]
fn blank_server_message_falls_back_to_generic() {
    let err = ClientError::from_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"  "}"#);
    assert!(matches!(err, ClientError::Generic(_)));
}

#[test]
fn unstructured_body_is_generic_with_context() {
    let err = ClientError::from_response(StatusCode::BAD_GATEWAY, "upstream down");
    assert_eq!(
        err.describe("Failed to load blogs"),
        "Failed to load blogs: HTTP 502 Bad Gateway: upstream down"
    );
    assert_eq!(err.status(), None);
}

#[test]
fn network_failure_message_mentions_backend() {
    let err = ClientError::NetworkUnreachable("connection refused".into());
    assert!(err.is_network_unreachable());
    assert!(err
        .describe("Failed to load blogs")
        .starts_with("Cannot connect to the server"));
}

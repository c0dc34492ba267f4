use super::*;

#[test]
fn endpoints_format_expected_paths() {
    assert_eq!(conversations_endpoint("/chat"), "/chat/conversations");
    assert_eq!(messages_endpoint("/chat", &EntityId::Int(7)).as_deref(), Some("/chat/conversations/7/messages"));
    assert_eq!(
        messages_endpoint("/chat", &EntityId::Text("c-1".to_owned())).as_deref(),
        Some("/chat/conversations/c-1/messages")
    );
    assert_eq!(send_endpoint("/chat"), "/chat/messages");
    assert_eq!(unread_endpoint("/chat"), "/chat/unread-count");
}

#[test]
fn text_ids_stay_inside_one_path_segment() {
    assert_eq!(
        messages_endpoint("/chat", &EntityId::Text("../x?y#z".to_owned())).as_deref(),
        Some("/chat/conversations/..%2Fx%3Fy%23z/messages")
    );
    assert_eq!(
        messages_endpoint("/chat", &EntityId::Text("a b".to_owned())).as_deref(),
        Some("/chat/conversations/a%20b/messages")
    );
}

#[test]
fn dot_and_blank_ids_have_no_endpoint() {
    for id in ["", ".", ".."] {
        assert_eq!(messages_endpoint("/chat", &EntityId::Text(id.to_owned())), None, "id {id:?}");
    }
    assert_eq!(
        ApiError::InvalidId("..".to_owned()).to_string(),
        "invalid conversation id: \"..\""
    );
}

#[test]
fn http_chat_api_trims_trailing_slash_from_base() {
    let api = HttpChatApi::new("/api/chat/");
    assert_eq!(api.base(), "/api/chat");
    assert_eq!(conversations_endpoint(api.base()), "/api/chat/conversations");
}

#[test]
fn server_error_message_reads_error_field() {
    assert_eq!(
        server_error_message(r#"{"error": "Cannot send message to yourself"}"#).as_deref(),
        Some("Cannot send message to yourself")
    );
}

#[test]
fn server_error_message_ignores_blank_or_foreign_bodies() {
    assert!(server_error_message(r#"{"error": "  "}"#).is_none());
    assert!(server_error_message("<html>502</html>").is_none());
    assert!(server_error_message(r#"{"detail": "x"}"#).is_none());
}

#[test]
fn status_error_display_includes_server_reason() {
    let plain = ApiError::Status { status: 500, message: None };
    let reason = ApiError::Status { status: 404, message: Some("Recipient not found".to_owned()) };
    assert_eq!(plain.to_string(), "request failed: 500");
    assert_eq!(reason.to_string(), "request failed: 404 (Recipient not found)");
    assert_eq!(reason.server_message(), Some("Recipient not found"));
    assert_eq!(ApiError::Network("offline".to_owned()).server_message(), None);
}

#[cfg(not(feature = "csr"))]
#[test]
fn native_build_reports_unavailable() {
    let api = HttpChatApi::new("/chat");
    let result = futures::executor::block_on(api.unread_count());
    assert_eq!(result, Err(ApiError::Unavailable));
}

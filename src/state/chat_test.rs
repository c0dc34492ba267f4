use super::*;

fn id(n: i64) -> EntityId {
    EntityId::Int(n)
}

fn message(sender: &str, content: &str) -> Message {
    Message {
        id: None,
        sender_id: None,
        sender_email: Some(sender.to_owned()),
        content: content.to_owned(),
        timestamp: "2026-03-20 12:00:00".to_owned(),
        is_read: None,
    }
}

fn in_conversation() -> ChatState {
    let mut state = ChatState::default();
    state.open_modal();
    state.enter_conversation(id(1), id(7), "seller@example.com".to_owned());
    state
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn chat_state_default_is_closed_list_view() {
    let state = ChatState::default();
    assert!(!state.modal_open);
    assert_eq!(state.view, ChatView::ConversationList);
    assert_eq!(state.conversations, ConversationListState::Idle);
    assert!(state.current_conversation_id.is_none());
    assert!(!state.message_poll.is_active());
    assert!(!state.unread_poll.is_active());
    assert_eq!(state.title(), DEFAULT_TITLE);
}

// =============================================================
// View transitions
// =============================================================

#[test]
fn enter_conversation_switches_view_and_title() {
    let state = in_conversation();
    assert_eq!(state.view, ChatView::MessageView);
    assert_eq!(state.title(), "seller@example.com");
    assert!(state.is_viewing(&id(1)));
    assert!(!state.is_new_conversation());
}

#[test]
fn enter_other_conversation_clears_previous_messages() {
    let mut state = in_conversation();
    state.messages.push(message("a@example.com", "old"));
    state.enter_conversation(id(2), id(8), "other@example.com".to_owned());
    assert!(state.messages.is_empty());
}

#[test]
fn reentering_same_conversation_keeps_messages() {
    let mut state = in_conversation();
    state.messages.push(message("a@example.com", "kept"));
    state.enter_conversation(id(1), id(7), "seller@example.com".to_owned());
    assert_eq!(state.messages.len(), 1);
}

#[test]
fn back_to_conversations_resets_selection_and_stops_message_poll() {
    let mut state = in_conversation();
    let token = state.message_poll.start();
    state.back_to_conversations();
    assert_eq!(state.view, ChatView::ConversationList);
    assert!(state.current_conversation_id.is_none());
    assert!(state.current_recipient_id.is_none());
    assert!(state.current_recipient_email.is_none());
    assert!(!state.message_poll.is_current(token));
    assert_eq!(state.title(), DEFAULT_TITLE);
    assert!(state.modal_open);
}

#[test]
fn close_modal_leaves_only_unread_poll_active() {
    let mut state = in_conversation();
    let unread = state.unread_poll.start();
    state.message_poll.start();
    state.close_modal();
    assert!(!state.modal_open);
    assert!(!state.message_poll.is_active());
    assert!(state.unread_poll.is_current(unread));
}

#[test]
fn start_new_conversation_opens_compose_view_without_id() {
    let mut state = ChatState::default();
    let before = state.focus_rev;
    state.start_new_conversation(id(9), "new@example.com".to_owned());
    assert!(state.modal_open);
    assert!(state.is_new_conversation());
    assert_eq!(state.current_recipient_id, Some(id(9)));
    assert_eq!(state.title(), "new@example.com");
    assert!(state.focus_rev > before);
}

// =============================================================
// Conversation list
// =============================================================

#[test]
fn conversation_list_load_states() {
    let mut state = ChatState::default();
    state.begin_conversations_load();
    assert_eq!(state.conversations, ConversationListState::Loading);
    state.apply_conversations(Vec::new());
    assert_eq!(state.conversations, ConversationListState::Ready(Vec::new()));
    state.fail_conversations();
    assert_eq!(state.conversations, ConversationListState::Failed);
}

// =============================================================
// Message loads
// =============================================================

#[test]
fn begin_message_load_requires_active_conversation() {
    let mut state = ChatState::default();
    assert!(state.begin_message_load().is_none());
}

#[test]
fn apply_messages_replaces_list() {
    let mut state = in_conversation();
    let load = state.begin_message_load().unwrap();
    assert!(state.apply_messages(&load, vec![message("a@example.com", "hi")]));
    assert_eq!(state.messages.len(), 1);
}

#[test]
fn older_response_arriving_late_is_dropped() {
    let mut state = in_conversation();
    let first = state.begin_message_load().unwrap();
    let second = state.begin_message_load().unwrap();
    assert!(state.apply_messages(&second, vec![message("a@example.com", "new")]));
    assert!(!state.apply_messages(&first, vec![message("a@example.com", "old")]));
    assert_eq!(state.messages[0].content, "new");
}

#[test]
fn response_for_previous_conversation_is_dropped() {
    let mut state = in_conversation();
    let load = state.begin_message_load().unwrap();
    state.enter_conversation(id(2), id(8), "other@example.com".to_owned());
    assert!(!state.apply_messages(&load, vec![message("a@example.com", "wrong thread")]));
    assert!(state.messages.is_empty());
}

#[test]
fn request_seq_rejects_unissued_sequence() {
    let mut seq = RequestSeq::default();
    assert!(!seq.accept(1));
    let issued = seq.issue();
    assert!(seq.accept(issued));
    assert!(!seq.accept(issued));
}

// =============================================================
// Sending
// =============================================================

#[test]
fn plan_send_skips_empty_or_whitespace_draft() {
    let mut state = in_conversation();
    state.draft = "   \n ".to_owned();
    assert_eq!(state.plan_send(false), SendPlan::Skip);
    assert!(!state.send_pending);
}

#[test]
fn plan_send_skips_without_recipient() {
    let mut state = ChatState { draft: "hello".to_owned(), ..ChatState::default() };
    assert_eq!(state.plan_send(false), SendPlan::Skip);
    assert!(!state.send_pending);
}

#[test]
fn plan_send_skips_while_send_pending() {
    let mut state = in_conversation();
    state.draft = "hello".to_owned();
    state.send_pending = true;
    assert_eq!(state.plan_send(false), SendPlan::Skip);
}

#[test]
fn plan_send_builds_trimmed_request_and_marks_pending() {
    let mut state = in_conversation();
    state.draft = "  hello  ".to_owned();
    let plan = state.plan_send(false);
    assert_eq!(
        plan,
        SendPlan::Send(SendMessageRequest { recipient_id: id(7), content: "hello".to_owned() })
    );
    assert!(state.send_pending);
}

#[test]
fn plan_send_applies_content_filter_only_when_enabled() {
    let mut state = in_conversation();
    state.draft = "call me on 0821234567".to_owned();
    assert_eq!(state.plan_send(true), SendPlan::Reject(MessageRejection::PhoneNumber));
    assert!(!state.send_pending);
    assert!(matches!(state.plan_send(false), SendPlan::Send(_)));
}

#[test]
fn adopt_conversation_only_for_new_conversation_with_same_recipient() {
    let mut state = ChatState::default();
    state.start_new_conversation(id(9), "new@example.com".to_owned());
    assert!(!state.adopt_conversation(&id(10), id(50)));
    assert!(state.adopt_conversation(&id(9), id(50)));
    assert_eq!(state.current_conversation_id, Some(id(50)));
    assert!(!state.adopt_conversation(&id(9), id(51)));
    assert_eq!(state.current_conversation_id, Some(id(50)));
}

#[test]
fn clear_sent_draft_keeps_newer_typing() {
    let mut state = ChatState { draft: " hello ".to_owned(), ..ChatState::default() };
    state.clear_sent_draft("hello");
    assert!(state.draft.is_empty());

    state.draft = "typed more".to_owned();
    state.clear_sent_draft("hello");
    assert_eq!(state.draft, "typed more");
}

#[test]
fn finish_send_reenables_and_requests_focus() {
    let mut state = ChatState { send_pending: true, ..ChatState::default() };
    let before = state.focus_rev;
    state.finish_send();
    assert!(!state.send_pending);
    assert_eq!(state.focus_rev, before + 1);
}

// =============================================================
// Unread badge
// =============================================================

#[test]
fn badge_follows_unread_count() {
    let mut state = ChatState::default();
    assert_eq!(state.badge(), None);
    state.set_unread_count(5);
    assert_eq!(state.badge().as_deref(), Some("5"));
    state.set_unread_count(150);
    assert_eq!(state.badge().as_deref(), Some("99+"));
}

#[test]
fn compose_placeholder_names_recipient() {
    assert_eq!(compose_placeholder("new@example.com"), "Start a conversation with new@example.com");
}

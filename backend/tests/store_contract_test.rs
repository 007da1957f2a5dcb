//! Behavioral contract of the application store

use code_studio_backend::state::{
    ActiveView, Agent, AgentPatch, AgentStatus, AppState, ConnectionStatus, LlmProvider,
    McpConnectionPatch, Message, StoreAction,
};
use code_studio_backend::StoreError;
use serde_json::json;

fn agent(id: &str) -> Agent {
    Agent::new(id.to_string(), format!("Agent {}", id), LlmProvider::Llama3)
}

fn ids(state: &AppState) -> Vec<String> {
    state.agents().iter().map(|a| a.id.clone()).collect()
}

#[test]
fn test_add_remove_replay_keeps_survivors_in_order() {
    let mut state = AppState::empty();
    for id in ["a", "b", "c", "d", "e"] {
        state.add_agent(agent(id));
    }
    state.remove_agent("b").unwrap();
    state.add_agent(agent("f"));
    state.remove_agent("e").unwrap();
    state.remove_agent("a").unwrap();
    state.add_agent(agent("g"));

    assert_eq!(ids(&state), ["c", "d", "f", "g"]);
}

#[test]
fn test_status_update_is_a_merge() {
    let mut state = AppState::new();
    let before = state.agent("2").cloned().unwrap();

    state
        .update_agent("2", &AgentPatch::status(AgentStatus::Thinking))
        .unwrap();

    let mut expected = before;
    expected.status = AgentStatus::Thinking;
    assert_eq!(state.agent("2"), Some(&expected));
}

#[test]
fn test_active_pointer_follows_removal() {
    let mut state = AppState::new();
    state.set_active_agent(Some("3")).unwrap();

    state.remove_agent("1").unwrap();
    assert_eq!(state.active_agent_id(), Some("3"));

    state.remove_agent("3").unwrap();
    assert_eq!(state.active_agent_id(), None);
    assert_eq!(ids(&state), ["2"]);
}

#[test]
fn test_messages_are_append_only() {
    let mut state = AppState::new();
    let mut seen: Vec<Message> = Vec::new();
    for text in ["first", "second", "third"] {
        let message = Message::from_user(text);
        state.add_message(message.clone());
        seen.push(message);
        assert_eq!(state.messages(), seen.as_slice());
    }
}

#[test]
fn test_view_round_trip() {
    let mut state = AppState::new();
    for view in ActiveView::ALL {
        state.set_active_view(view);
        assert_eq!(state.active_view(), view);
    }
}

#[test]
fn test_activate_then_change_provider() {
    let mut state = AppState::new();
    state.set_active_agent(Some("2")).unwrap();
    state
        .update_agent_from_json("2", &json!({"llm": "llama-3"}))
        .unwrap();

    let devops = state.agent("2").unwrap();
    assert_eq!(devops.llm, LlmProvider::Llama3);
    assert!(!devops.is_active);
    assert_eq!(state.active_agent_id(), Some("2"));
}

#[test]
fn test_remove_seed_connection() {
    let mut state = AppState::new();
    state.remove_mcp_connection("2").unwrap();

    let ids: Vec<_> = state
        .mcp_connections()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, ["1", "3"]);
}

#[test]
fn test_failed_mutations_leave_state_untouched() {
    let mut state = AppState::new();
    state.add_message(Message::from_user("keep me"));
    let snapshot = state.clone();
    let revision = state.revision();

    let failures = vec![
        state.dispatch(StoreAction::RemoveAgent { id: "9".to_string() }),
        state.dispatch(StoreAction::UpdateAgent {
            id: "9".to_string(),
            patch: json!({"name": "ghost"}),
        }),
        state.dispatch(StoreAction::UpdateAgent {
            id: "1".to_string(),
            patch: json!({"llm": "gpt-5"}),
        }),
        state.dispatch(StoreAction::SetActiveAgent {
            id: Some("9".to_string()),
        }),
        state.dispatch(StoreAction::UpdateMcpConnection {
            id: "1".to_string(),
            patch: json!({"type": "ftp"}),
        }),
        state.dispatch(StoreAction::RemoveMcpConnection { id: "9".to_string() }),
        state.dispatch(StoreAction::UpdateMcpConnection {
            id: "9".to_string(),
            patch: json!({"name": "ghost"}),
        }),
    ];

    assert!(failures.iter().all(Result::is_err));
    assert_eq!(
        state.update_mcp_connection("9", &McpConnectionPatch::status(ConnectionStatus::Error)),
        Err(StoreError::ConnectionNotFound("9".to_string()))
    );
    assert_eq!(state, snapshot);
    assert_eq!(state.revision(), revision);
}

#[test]
fn test_error_kinds() {
    let mut state = AppState::new();
    assert_eq!(
        state.remove_agent("x"),
        Err(StoreError::AgentNotFound("x".to_string()))
    );
    assert_eq!(
        state.set_active_agent(Some("x")),
        Err(StoreError::InvalidActiveReference("x".to_string()))
    );
    assert_eq!(
        state.update_agent_from_json("1", &json!({"status": "asleep"})),
        Err(StoreError::InvalidEnumValue {
            kind: "agent status",
            value: "asleep".to_string(),
        })
    );
}

#[test]
fn test_dispatch_replay_from_json() {
    let actions: Vec<StoreAction> = serde_json::from_value(json!([
        {"type": "toggle_sidebar"},
        {"type": "set_active_view", "view": "agents"},
        {"type": "toggle_agent_power", "id": "3"},
        {"type": "toggle_connection", "id": "3"},
        {"type": "set_active_agent", "id": null}
    ]))
    .unwrap();

    let mut state = AppState::new();
    for action in actions {
        state.dispatch(action).unwrap();
    }

    assert!(state.sidebar_open());
    assert_eq!(state.active_view(), ActiveView::Agents);
    assert!(state.agent("3").unwrap().is_active);
    assert_eq!(state.connected_count(), 2);
    assert!(state.active_agent().is_none());
}

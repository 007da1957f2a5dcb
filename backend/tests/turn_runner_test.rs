//! Timer-driven behavior of simulated chat turns
//!
//! All tests run on a paused tokio clock, so sleeps complete instantly and in
//! deadline order.

use code_studio_backend::config::SimulationConfig;
use code_studio_backend::simulation::{TurnPolicy, TurnRunner};
use code_studio_backend::state::{AgentStatus, AppState, MessageType};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

fn runner(policy: TurnPolicy) -> TurnRunner {
    let config = SimulationConfig {
        turn_policy: policy,
        ..Default::default()
    };
    TurnRunner::new(Handle::current(), &config)
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    tokio::task::yield_now().await;
}

fn types(state: &AppState) -> Vec<MessageType> {
    state.messages().iter().map(|m| m.message_type).collect()
}

#[tokio::test(start_paused = true)]
async fn test_turn_plays_back_on_schedule() {
    let mut state = AppState::new();
    let mut runner = runner(TurnPolicy::CancelPrevious);
    runner.submit(&mut state, "search the repo").unwrap();

    advance(799).await;
    assert_eq!(runner.drain(&mut state), 0);
    assert_eq!(state.agent("1").unwrap().status, AgentStatus::Thinking);

    advance(2).await; // t = 801
    assert_eq!(runner.drain(&mut state), 1);
    assert_eq!(state.agent("1").unwrap().status, AgentStatus::Executing);

    advance(1000).await; // t = 1801
    assert_eq!(runner.drain(&mut state), 1);
    let tool_call = state.messages().last().unwrap();
    assert_eq!(tool_call.message_type, MessageType::ToolCall);
    assert_eq!(tool_call.tool_name.as_deref(), Some("file-search"));

    advance(1500).await; // t = 3301
    assert_eq!(runner.drain(&mut state), 1);
    assert_eq!(
        types(&state),
        [
            MessageType::Message,
            MessageType::Message,
            MessageType::ToolCall,
            MessageType::Result
        ]
    );
    assert!(state.messages()[1..].iter().all(|m| m.agent_id == "1"));
    assert_eq!(state.agent("1").unwrap().status, AgentStatus::Idle);
    assert!(!runner.is_processing());
}

#[tokio::test(start_paused = true)]
async fn test_new_message_cancels_previous_turn() {
    let mut state = AppState::new();
    let mut runner = runner(TurnPolicy::CancelPrevious);
    let first = runner.submit(&mut state, "first").unwrap();

    advance(900).await;
    assert_eq!(runner.drain(&mut state), 1);

    let second = runner.submit(&mut state, "second").unwrap();
    assert_ne!(first, second);
    assert_eq!(runner.in_flight_count(), 1);

    advance(5000).await;
    runner.drain(&mut state);

    // user, reply(first), user, reply, tool-call, result
    assert_eq!(state.messages().len(), 6);
    assert_eq!(state.messages()[2].content, "second");
    assert_eq!(
        types(&state)[3..],
        [MessageType::Message, MessageType::ToolCall, MessageType::Result]
    );
    assert!(!runner.is_processing());
}

#[tokio::test(start_paused = true)]
async fn test_overlap_policy_interleaves_turns() {
    let mut state = AppState::new();
    let mut runner = runner(TurnPolicy::Overlap);
    runner.submit(&mut state, "first").unwrap();

    advance(500).await;
    runner.drain(&mut state);
    runner.submit(&mut state, "second").unwrap();
    assert_eq!(runner.in_flight_count(), 2);

    advance(5000).await;
    assert_eq!(runner.drain(&mut state), 6);
    assert!(!runner.is_processing());

    // first reply at 800, second reply at 1300, first tool-call at 1800 ...
    assert_eq!(
        types(&state),
        [
            MessageType::Message,
            MessageType::Message,
            MessageType::Message,
            MessageType::Message,
            MessageType::ToolCall,
            MessageType::ToolCall,
            MessageType::Result,
            MessageType::Result
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_turns_keep_agent_busy() {
    let mut state = AppState::new();
    let mut runner = runner(TurnPolicy::Overlap);
    runner.submit(&mut state, "first").unwrap();

    advance(500).await;
    runner.drain(&mut state);
    runner.submit(&mut state, "second").unwrap();

    // First turn finished at 3300; second has sent its tool call at 2300
    advance(2850).await; // t = 3350
    runner.drain(&mut state);
    assert_eq!(runner.in_flight_count(), 1);
    assert_eq!(state.agent("1").unwrap().status, AgentStatus::Executing);

    advance(500).await; // t = 3850
    runner.drain(&mut state);
    assert!(!runner.is_processing());
    assert_eq!(state.agent("1").unwrap().status, AgentStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_second_turn_keeps_executing_status() {
    let mut state = AppState::new();
    let mut runner = runner(TurnPolicy::Overlap);
    runner.submit(&mut state, "first").unwrap();

    advance(900).await;
    runner.drain(&mut state);
    assert_eq!(state.agent("1").unwrap().status, AgentStatus::Executing);

    // A newly started turn does not drop the agent back to thinking
    runner.submit(&mut state, "second").unwrap();
    assert_eq!(state.agent("1").unwrap().status, AgentStatus::Executing);
}

#[tokio::test(start_paused = true)]
async fn test_turn_survives_agent_removal() {
    let mut state = AppState::new();
    let mut runner = runner(TurnPolicy::CancelPrevious);
    runner.submit(&mut state, "hello").unwrap();
    state.remove_agent("1").unwrap();

    advance(4000).await;
    assert_eq!(runner.drain(&mut state), 3);
    assert_eq!(state.messages().len(), 4);
    assert!(!runner.is_processing());
}

#[tokio::test(start_paused = true)]
async fn test_notifier_called_per_event() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut state = AppState::new();
    let mut runner = runner(TurnPolicy::CancelPrevious).with_notifier(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    runner.submit(&mut state, "ping").unwrap();

    advance(4000).await;
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_all_discards_pending_events() {
    let mut state = AppState::new();
    let mut runner = runner(TurnPolicy::Overlap);
    runner.submit(&mut state, "one").unwrap();
    runner.submit(&mut state, "two").unwrap();

    advance(801).await;
    // Both replies are already queued; cancelling must drop them
    assert_eq!(runner.cancel_all(&mut state), 2);
    assert_eq!(runner.drain(&mut state), 0);
    assert_eq!(state.messages().len(), 2);
    assert_eq!(state.agent("1").unwrap().status, AgentStatus::Idle);
}

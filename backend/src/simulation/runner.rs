//! Turn runner
//!
//! Spawns one tokio task per submitted chat turn. Tasks only sleep and send
//! [`TurnEvent`]s over a channel; the owner of the store calls
//! [`TurnRunner::drain`] to apply them, so every mutation stays on one thread.

use super::error::TurnError;
use super::script::ResponseScript;
use crate::config::SimulationConfig;
use crate::state::{AgentId, AgentStatus, AppState, Message};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Identifier of a submitted turn, increasing per runner
pub type TurnId = u64;

/// Callback invoked whenever a turn task has sent an event
pub type EventNotifier = Arc<dyn Fn() + Send + Sync>;

/// What to do with in-flight turns when a new message is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPolicy {
    /// Abort in-flight turns and reset their agents to idle
    #[default]
    CancelPrevious,
    /// Let turns run side by side; their messages interleave
    Overlap,
}

impl TurnPolicy {
    /// Config name of the policy
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnPolicy::CancelPrevious => "cancel",
            TurnPolicy::Overlap => "overlap",
        }
    }
}

impl fmt::Display for TurnPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TurnPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cancel" | "cancel-previous" => Ok(TurnPolicy::CancelPrevious),
            "overlap" => Ok(TurnPolicy::Overlap),
            other => Err(format!(
                "unknown turn policy {:?}, expected \"cancel\" or \"overlap\"",
                other
            )),
        }
    }
}

/// A message released by a turn task
#[derive(Debug, Clone)]
pub struct TurnEvent {
    /// Turn that produced the message
    pub turn_id: TurnId,
    /// Agent the turn was addressed to
    pub agent_id: AgentId,
    /// Message to append
    pub message: Message,
    /// Agent status after the message
    pub status: AgentStatus,
    /// Whether this is the turn's last message
    pub is_final: bool,
}

struct InFlightTurn {
    agent_id: AgentId,
    status: AgentStatus,
    handle: JoinHandle<()>,
}

// Executing outranks Thinking outranks Idle when turns share an agent
fn busy_rank(status: AgentStatus) -> u8 {
    match status {
        AgentStatus::Idle => 0,
        AgentStatus::Thinking => 1,
        AgentStatus::Executing => 2,
    }
}

/// Drives simulated chat turns
pub struct TurnRunner {
    runtime: Handle,
    script: Arc<ResponseScript>,
    policy: TurnPolicy,
    tx: UnboundedSender<TurnEvent>,
    rx: UnboundedReceiver<TurnEvent>,
    in_flight: BTreeMap<TurnId, InFlightTurn>,
    next_turn: TurnId,
    notifier: Option<EventNotifier>,
}

impl TurnRunner {
    /// Create a runner that spawns turn tasks on `runtime`
    pub fn new(runtime: Handle, config: &SimulationConfig) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            runtime,
            script: Arc::new(ResponseScript::from_config(config)),
            policy: config.turn_policy,
            tx,
            rx,
            in_flight: BTreeMap::new(),
            next_turn: 1,
            notifier: None,
        }
    }

    /// Replace the response script used for new turns
    pub fn with_script(mut self, script: ResponseScript) -> Self {
        self.script = Arc::new(script);
        self
    }

    /// Call `notifier` after every event a turn task sends
    pub fn with_notifier(mut self, notifier: EventNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// The configured turn policy
    pub fn policy(&self) -> TurnPolicy {
        self.policy
    }

    /// Whether any turn is still producing messages
    pub fn is_processing(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Number of turns still producing messages
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Send a user message to the active agent and start its scripted reply
    ///
    /// Appends the (trimmed) user message and marks the agent as thinking.
    /// Under [`TurnPolicy::CancelPrevious`] in-flight turns are cancelled first.
    pub fn submit(&mut self, state: &mut AppState, input: &str) -> Result<TurnId, TurnError> {
        let content = input.trim();
        if content.is_empty() {
            return Err(TurnError::EmptyInput);
        }
        let agent_id = state
            .active_agent()
            .map(|agent| agent.id.clone())
            .ok_or(TurnError::NoActiveAgent)?;

        if self.policy == TurnPolicy::CancelPrevious {
            self.cancel_all(state);
        }

        let turn_id = self.next_turn;
        self.next_turn += 1;

        state.add_message(Message::from_user(content));

        if self.script.is_empty() {
            debug!(turn_id, "Empty response script, nothing to play back");
            return Ok(turn_id);
        }

        let handle = self.runtime.spawn(play_turn(
            turn_id,
            agent_id.clone(),
            Arc::clone(&self.script),
            self.tx.clone(),
            self.notifier.clone(),
        ));
        info!(
            turn_id,
            agent_id = %agent_id,
            policy = %self.policy,
            in_flight = self.in_flight.len() + 1,
            "Started simulated turn"
        );
        self.in_flight.insert(
            turn_id,
            InFlightTurn {
                agent_id: agent_id.clone(),
                status: AgentStatus::Thinking,
                handle,
            },
        );
        let status = self.agent_status(&agent_id);
        set_status(state, turn_id, &agent_id, status);
        Ok(turn_id)
    }

    /// Apply every event received so far, in arrival order
    ///
    /// Events from cancelled turns are discarded. Returns the number of
    /// messages appended.
    pub fn drain(&mut self, state: &mut AppState) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            let Some(turn) = self.in_flight.get_mut(&event.turn_id) else {
                debug!(turn_id = event.turn_id, "Discarding event from cancelled turn");
                continue;
            };
            turn.status = event.status;

            state.add_message(event.message);
            applied += 1;

            if event.is_final {
                self.in_flight.remove(&event.turn_id);
                info!(turn_id = event.turn_id, agent_id = %event.agent_id, "Turn finished");
            }
            let status = self.agent_status(&event.agent_id);
            set_status(state, event.turn_id, &event.agent_id, status);
        }
        applied
    }

    /// Abort every in-flight turn and reset its agent to idle
    ///
    /// Returns the number of turns cancelled.
    pub fn cancel_all(&mut self, state: &mut AppState) -> usize {
        let turns = std::mem::take(&mut self.in_flight);
        let count = turns.len();
        for (turn_id, turn) in turns {
            turn.handle.abort();
            let status = self.agent_status(&turn.agent_id);
            set_status(state, turn_id, &turn.agent_id, status);
            info!(turn_id, agent_id = %turn.agent_id, "Cancelled turn");
        }
        count
    }

    /// Status an agent should show given every turn still in flight for it
    ///
    /// Idle only once no in-flight turn targets the agent.
    fn agent_status(&self, agent_id: &str) -> AgentStatus {
        self.in_flight
            .values()
            .filter(|turn| turn.agent_id == agent_id)
            .map(|turn| turn.status)
            .max_by_key(|status| busy_rank(*status))
            .unwrap_or(AgentStatus::Idle)
    }
}

impl Drop for TurnRunner {
    fn drop(&mut self) {
        for turn in self.in_flight.values() {
            turn.handle.abort();
        }
    }
}

// The agent may have been removed mid-turn; its messages are still appended.
fn set_status(state: &mut AppState, turn_id: TurnId, agent_id: &str, status: AgentStatus) {
    if let Err(err) = state.set_agent_status(agent_id, status) {
        warn!(turn_id, agent_id = %agent_id, error = %err, "Skipping agent status update");
    }
}

async fn play_turn(
    turn_id: TurnId,
    agent_id: AgentId,
    script: Arc<ResponseScript>,
    tx: UnboundedSender<TurnEvent>,
    notifier: Option<EventNotifier>,
) {
    let last = script.steps().len().saturating_sub(1);
    for (index, step) in script.steps().iter().enumerate() {
        tokio::time::sleep(step.delay).await;

        let event = TurnEvent {
            turn_id,
            agent_id: agent_id.clone(),
            message: step.to_message(&agent_id),
            status: step.status_after,
            is_final: index == last,
        };
        if tx.send(event).is_err() {
            debug!(turn_id, "Turn receiver dropped, stopping playback");
            return;
        }
        if let Some(notifier) = &notifier {
            notifier();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MessageType;

    fn runner() -> TurnRunner {
        TurnRunner::new(Handle::current(), &SimulationConfig::default())
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("cancel".parse::<TurnPolicy>().unwrap(), TurnPolicy::CancelPrevious);
        assert_eq!("overlap".parse::<TurnPolicy>().unwrap(), TurnPolicy::Overlap);
        let err = "queue".parse::<TurnPolicy>().unwrap_err();
        assert!(err.contains("queue"));
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_input() {
        let mut state = AppState::new();
        let mut runner = runner();
        assert_eq!(runner.submit(&mut state, "   \n"), Err(TurnError::EmptyInput));
        assert!(state.messages().is_empty());
        assert!(!runner.is_processing());
    }

    #[tokio::test]
    async fn test_submit_requires_active_agent() {
        let mut state = AppState::new();
        state.set_active_agent(None).unwrap();
        let mut runner = runner();
        assert_eq!(runner.submit(&mut state, "hello"), Err(TurnError::NoActiveAgent));
        assert!(state.messages().is_empty());
    }

    #[tokio::test]
    async fn test_submit_appends_trimmed_user_message() {
        let mut state = AppState::new();
        let mut runner = runner();
        let turn = runner.submit(&mut state, "  find the header  ").unwrap();
        assert_eq!(turn, 1);

        let message = &state.messages()[0];
        assert!(message.is_from_user());
        assert_eq!(message.content, "find the header");
        assert_eq!(message.message_type, MessageType::Message);
        assert_eq!(state.agent("1").unwrap().status, AgentStatus::Thinking);
        assert!(runner.is_processing());
    }

    #[tokio::test]
    async fn test_empty_script_finishes_immediately() {
        let mut state = AppState::new();
        let mut runner = runner().with_script(ResponseScript::new(Vec::new()));
        runner.submit(&mut state, "hi").unwrap();
        assert_eq!(state.messages().len(), 1);
        assert!(!runner.is_processing());
        assert_eq!(state.agent("1").unwrap().status, AgentStatus::Idle);
    }

    #[tokio::test]
    async fn test_cancel_all_resets_status() {
        let mut state = AppState::new();
        let mut runner = runner();
        runner.submit(&mut state, "hi").unwrap();
        assert_eq!(runner.cancel_all(&mut state), 1);
        assert!(!runner.is_processing());
        assert_eq!(state.agent("1").unwrap().status, AgentStatus::Idle);
    }
}

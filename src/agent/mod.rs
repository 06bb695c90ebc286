//! Bridge between the voice agent runtime and the card browser.
//!
//! The agent runtime lives elsewhere; it hands us connection lifecycle
//! events and tool calls over a channel, and we hand back the text reply
//! the agent should speak.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cards::Color;
use crate::scryfall::{CardBrowser, ColorFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentMode {
    #[default]
    Idle,
    Listening,
    Speaking,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardSearchParams {
    pub query: String,
}

/// Raw filter values as the agent's tool schema delivers them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub mana_cost: Option<f64>,
    #[serde(default)]
    pub color_identity: Option<Vec<String>>,
    #[serde(default)]
    pub set_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardFilterParams {
    pub filters: FilterParams,
}

#[derive(Debug, Clone)]
pub enum ToolInvocation {
    CardSearch(CardSearchParams),
    CardFilter(CardFilterParams),
}

#[derive(Debug, Clone)]
pub enum AgentEvent {
    Connected,
    Disconnected,
    StatusChange(ConnectionStatus),
    ModeChange { speaking: bool },
    Error(String),
    ToolCall(ToolInvocation),
}

/// The two tool functions the agent can call.
#[async_trait]
pub trait ToolHandler: Send {
    async fn card_search(&mut self, params: CardSearchParams) -> String;
    async fn card_filter(&mut self, params: CardFilterParams) -> String;
}

/// Tracks the agent connection and dispatches its tool calls.
pub struct AgentBridge<H> {
    handler: H,
    pub status: ConnectionStatus,
    pub mode: AgentMode,
    pub error: Option<String>,
}

impl<H: ToolHandler> AgentBridge<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            status: ConnectionStatus::default(),
            mode: AgentMode::default(),
            error: None,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Apply one event. Tool calls return the reply the agent speaks.
    pub async fn handle_event(&mut self, event: AgentEvent) -> Option<String> {
        match event {
            AgentEvent::Connected => {
                info!("agent connected");
                self.status = ConnectionStatus::Connected;
                self.mode = AgentMode::Listening;
                self.error = None;
                None
            }
            AgentEvent::Disconnected => {
                info!("agent disconnected");
                self.status = ConnectionStatus::Disconnected;
                self.mode = AgentMode::Idle;
                None
            }
            AgentEvent::StatusChange(status) => {
                debug!(?status, "agent status change");
                self.status = status;
                None
            }
            AgentEvent::ModeChange { speaking } => {
                self.mode = if speaking {
                    AgentMode::Speaking
                } else {
                    AgentMode::Listening
                };
                None
            }
            AgentEvent::Error(message) => {
                warn!(error = %message, "agent error");
                self.status = ConnectionStatus::Disconnected;
                self.mode = AgentMode::Idle;
                self.error = Some(message);
                None
            }
            AgentEvent::ToolCall(invocation) => Some(self.dispatch(invocation).await),
        }
    }

    async fn dispatch(&mut self, invocation: ToolInvocation) -> String {
        match invocation {
            ToolInvocation::CardSearch(params) => {
                debug!(query = %params.query, "tool call: card search");
                self.handler.card_search(params).await
            }
            ToolInvocation::CardFilter(params) => {
                debug!("tool call: card filter");
                self.handler.card_filter(params).await
            }
        }
    }

    /// Consume events until the channel closes, forwarding tool replies.
    pub async fn run(
        &mut self,
        mut events: mpsc::Receiver<AgentEvent>,
        replies: mpsc::Sender<String>,
    ) {
        while let Some(event) = events.recv().await {
            if let Some(reply) = self.handle_event(event).await {
                if replies.send(reply).await.is_err() {
                    break;
                }
            }
        }
    }
}

/// Map the tool schema's color names onto filter values.
///
/// Unrecognized names are logged and skipped rather than failing the call.
pub fn map_color_identity(names: &[String]) -> Vec<ColorFilter> {
    names
        .iter()
        .filter_map(|name| match name.to_ascii_lowercase().as_str() {
            "white" => Some(ColorFilter::Color(Color::W)),
            "blue" => Some(ColorFilter::Color(Color::U)),
            "black" => Some(ColorFilter::Color(Color::B)),
            "red" => Some(ColorFilter::Color(Color::R)),
            "green" => Some(ColorFilter::Color(Color::G)),
            "colorless" => Some(ColorFilter::Colorless),
            other => {
                warn!(color = other, "unknown color identity in filter");
                None
            }
        })
        .collect()
}

#[async_trait]
impl ToolHandler for CardBrowser {
    async fn card_search(&mut self, params: CardSearchParams) -> String {
        self.search(&params.query).await
    }

    async fn card_filter(&mut self, params: CardFilterParams) -> String {
        let FilterParams {
            mana_cost,
            color_identity,
            set_name,
        } = params.filters;

        // Only provided fields change; the rest of the active filters stay.
        if let Some(cmc) = mana_cost {
            self.filters.cmc = Some(cmc);
        }
        if let Some(names) = color_identity {
            self.filters.colors = map_color_identity(&names);
        }
        if let Some(name) = set_name {
            self.filters.set_name = Some(name);
        }

        let matching = self.filtered().len();
        let total = self.cards().len();
        format!("Filters applied. {} of {} cards match.", matching, total)
    }
}

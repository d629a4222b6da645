//! JSON envelopes exchanged with table clients.
//!
//! Every message is `{"type": ..., "payload": {...}}`. A request produces one
//! reply to its sender and, when it changed a table, a `gameState` for each
//! seated player showing only what that player may see.

use crate::registry::{Lobby, LobbyError, SeatView};
use holdem_engine::errors::GameError;
use holdem_engine::game::GameId;
use holdem_engine::player::{PlayerAction, PlayerId};
use holdem_engine::snapshot::GameSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ClientMessage {
    CreateGame(CreateGame),
    JoinGame(JoinGame),
    StartGame(StartGame),
    Action(ActionRequest),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGame {
    pub player_name: String,
    #[serde(default)]
    pub game_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGame {
    pub game_id: GameId,
    pub player_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGame {
    pub game_id: GameId,
    pub player_id: PlayerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Fold,
    Check,
    Bet,
    NextRound,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub game_id: GameId,
    /// Not needed for `nextRound`
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    pub action: ActionKind,
    #[serde(default)]
    pub amount: Option<i64>,
}

impl ActionRequest {
    pub fn to_player_action(&self) -> Result<PlayerAction, GameError> {
        match self.action {
            ActionKind::Fold => Ok(PlayerAction::Fold),
            ActionKind::Check => Ok(PlayerAction::Check),
            ActionKind::NextRound => Ok(PlayerAction::NextRound),
            ActionKind::Bet => {
                let amount = self.amount.ok_or_else(|| {
                    GameError::MalformedRequest("bet requires an amount".to_string())
                })?;
                match u32::try_from(amount) {
                    Ok(n) => Ok(PlayerAction::Bet(n)),
                    // above any stack, so the table rejects it as over-betting
                    Err(_) if amount > 0 => Ok(PlayerAction::Bet(u32::MAX)),
                    Err(_) => Err(GameError::InvalidAction(format!(
                        "invalid bet amount {}",
                        amount
                    ))),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    GameCreated { game_id: GameId, player_id: PlayerId },
    GameState(Box<GameSnapshot>),
    Error { code: String, message: String },
}

impl From<&LobbyError> for ServerMessage {
    fn from(err: &LobbyError) -> Self {
        ServerMessage::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// A reply addressed to the sender of the request (`to == None`) or to one
/// seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<PlayerId>,
    pub message: ServerMessage,
}

impl Envelope {
    pub fn reply(message: ServerMessage) -> Self {
        Self { to: None, message }
    }

    pub fn to_player(player_id: impl Into<PlayerId>, message: ServerMessage) -> Self {
        Self {
            to: Some(player_id.into()),
            message,
        }
    }
}

/// Parses one raw request. Anything that is not a well-formed request of a
/// known type is `MalformedRequest`.
pub fn parse(raw: &str) -> Result<ClientMessage, GameError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| GameError::MalformedRequest(format!("invalid JSON: {}", e)))?;
    match value.get("payload") {
        None | Some(serde_json::Value::Null) => {
            return Err(GameError::MalformedRequest(
                "Missing payload in request".to_string(),
            ))
        }
        Some(_) => {}
    }
    serde_json::from_value(value).map_err(|e| GameError::MalformedRequest(e.to_string()))
}

/// Handles one raw request against `lobby` and returns every message it
/// produces, in delivery order.
pub fn handle(lobby: &Lobby, raw: &str) -> Vec<Envelope> {
    let request = match parse(raw) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(code = err.code(), error = %err, "malformed request");
            return vec![Envelope::reply((&LobbyError::from(err)).into())];
        }
    };
    match dispatch(lobby, request) {
        Ok(envelopes) => envelopes,
        Err(err) => vec![Envelope::reply((&err).into())],
    }
}

fn dispatch(lobby: &Lobby, request: ClientMessage) -> Result<Vec<Envelope>, LobbyError> {
    match request {
        ClientMessage::CreateGame(req) => {
            let seated = lobby.create_game(&req.player_name, req.game_type)?;
            Ok(vec![Envelope::reply(ServerMessage::GameCreated {
                game_id: seated.game_id,
                player_id: seated.player_id,
            })])
        }
        ClientMessage::JoinGame(req) => {
            let (seated, views) = lobby.join_game(&req.game_id, &req.player_name)?;
            let mut out = vec![Envelope::reply(ServerMessage::GameCreated {
                game_id: seated.game_id,
                player_id: seated.player_id,
            })];
            out.extend(broadcast(views));
            Ok(out)
        }
        ClientMessage::StartGame(req) => {
            let views = lobby.start_game(&req.game_id, &req.player_id)?;
            Ok(broadcast(views))
        }
        ClientMessage::Action(req) => {
            let action = req.to_player_action()?;
            let player_id = match (&req.player_id, action) {
                (Some(id), _) => id.as_str(),
                (None, PlayerAction::NextRound) => "",
                (None, _) => {
                    return Err(GameError::MalformedRequest("playerId is required".to_string()).into())
                }
            };
            let views = lobby.action(&req.game_id, player_id, action)?;
            Ok(broadcast(views))
        }
    }
}

fn broadcast(views: Vec<SeatView>) -> Vec<Envelope> {
    views
        .into_iter()
        .map(|view| {
            Envelope::to_player(view.player_id, ServerMessage::GameState(Box::new(view.snapshot)))
        })
        .collect()
}

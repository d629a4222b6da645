use thiserror::Error;

/// Every way a table command can be refused.
///
/// All variants are recoverable: a command that returns an error has not
/// touched the session it was aimed at.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Game not found: {0}")]
    GameNotFound(String),
    #[error("Game is full")]
    GameFull,
    #[error("Only host can start the game")]
    NotHost,
    #[error("Player not found: {0}")]
    PlayerNotFound(String),
    #[error("Not your turn (seat {expected} to act, got seat {actual})")]
    NotYourTurn { expected: usize, actual: usize },
    #[error("Invalid action: {0}")]
    InvalidAction(String),
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    #[error("Deck exhausted")]
    DeckExhausted,
}

impl GameError {
    /// Stable machine-readable code sent to clients alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::GameNotFound(_) => "game_not_found",
            GameError::GameFull => "game_full",
            GameError::NotHost => "not_host",
            GameError::PlayerNotFound(_) => "player_not_found",
            GameError::NotYourTurn { .. } => "not_your_turn",
            GameError::InvalidAction(_) => "invalid_action",
            GameError::MalformedRequest(_) => "malformed_request",
            GameError::DeckExhausted => "deck_exhausted",
        }
    }
}

use chrono::{DateTime, Utc};
use holdem_engine::config::TableConfig;
use holdem_engine::errors::GameError;
use holdem_engine::game::{GameId, GameSession};
use holdem_engine::phase::Phase;
use holdem_engine::player::{PlayerAction, PlayerId};
use holdem_engine::snapshot::GameSnapshot;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum LobbyError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Game storage poisoned")]
    StoragePoisoned,
}

impl LobbyError {
    pub fn code(&self) -> &'static str {
        match self {
            LobbyError::Game(err) => err.code(),
            LobbyError::StoragePoisoned => "storage_error",
        }
    }
}

/// Identifiers handed back to a player who just took a seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seated {
    pub game_id: GameId,
    pub player_id: PlayerId,
}

/// Table state as one seated player is allowed to see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatView {
    pub player_id: PlayerId,
    pub snapshot: GameSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub game_id: GameId,
    pub game_type: Option<String>,
    pub players: usize,
    pub phase: Phase,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Table {
    session: Mutex<GameSession>,
    created_at: DateTime<Utc>,
}

/// Directory of live tables.
///
/// The map is only write-locked to add or drop a table; commands lock the one
/// session they touch, so separate tables never wait on each other.
#[derive(Debug)]
pub struct Lobby {
    games: RwLock<HashMap<GameId, Arc<Table>>>,
    table_config: TableConfig,
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}

impl Lobby {
    pub fn new(table_config: TableConfig) -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
            table_config,
        }
    }

    pub fn table_config(&self) -> &TableConfig {
        &self.table_config
    }

    /// Opens a table with `player_name` as host in seat 0.
    pub fn create_game(
        &self,
        player_name: &str,
        game_type: Option<String>,
    ) -> Result<Seated, LobbyError> {
        let game_id = Uuid::new_v4().to_string();
        let player_id = Uuid::new_v4().to_string();

        let mut session = GameSession::new(
            game_id.clone(),
            player_id.clone(),
            player_name,
            self.table_config.clone(),
        );
        if let Some(kind) = game_type {
            session = session.with_game_type(kind);
        }

        let table = Arc::new(Table {
            session: Mutex::new(session),
            created_at: Utc::now(),
        });
        {
            let mut guard = self
                .games
                .write()
                .map_err(|_| LobbyError::StoragePoisoned)?;
            guard.insert(game_id.clone(), table);
        }

        tracing::info!(game_id = %game_id, player = %player_name, "game created");
        Ok(Seated { game_id, player_id })
    }

    pub fn join_game(
        &self,
        game_id: &str,
        player_name: &str,
    ) -> Result<(Seated, Vec<SeatView>), LobbyError> {
        let player_id = Uuid::new_v4().to_string();
        let views = self.with_session(game_id, |session| {
            let seat = session.join(player_id.clone(), player_name)?;
            tracing::info!(game_id = %game_id, player = %player_name, seat, "player joined");
            Ok(())
        })?;
        let seated = Seated {
            game_id: game_id.to_string(),
            player_id,
        };
        Ok((seated, views))
    }

    pub fn start_game(&self, game_id: &str, player_id: &str) -> Result<Vec<SeatView>, LobbyError> {
        self.with_session(game_id, |session| session.start(player_id))
    }

    pub fn action(
        &self,
        game_id: &str,
        player_id: &str,
        action: PlayerAction,
    ) -> Result<Vec<SeatView>, LobbyError> {
        self.with_session(game_id, |session| session.act(player_id, action))
    }

    /// Current state of a table; `viewer` limits which hole cards are shown.
    pub fn snapshot(&self, game_id: &str, viewer: Option<&str>) -> Result<GameSnapshot, LobbyError> {
        let table = self.table(game_id)?;
        let session = table
            .session
            .lock()
            .map_err(|_| LobbyError::StoragePoisoned)?;
        Ok(session.snapshot_for(viewer))
    }

    pub fn remove_game(&self, game_id: &str) -> Result<(), LobbyError> {
        let removed = self
            .games
            .write()
            .map_err(|_| LobbyError::StoragePoisoned)?
            .remove(game_id);
        match removed {
            Some(_) => {
                tracing::info!(game_id = %game_id, "game removed");
                Ok(())
            }
            None => Err(GameError::GameNotFound(game_id.to_string()).into()),
        }
    }

    /// Every live table, oldest first.
    pub fn active_games(&self) -> Vec<GameSummary> {
        let tables: Vec<(GameId, Arc<Table>)> = match self.games.read() {
            Ok(guard) => guard
                .iter()
                .map(|(id, table)| (id.clone(), Arc::clone(table)))
                .collect(),
            Err(_) => return Vec::new(),
        };

        let mut summaries: Vec<GameSummary> = tables
            .into_iter()
            .filter_map(|(game_id, table)| {
                let session = table.session.lock().ok()?;
                Some(GameSummary {
                    game_id,
                    game_type: session.game_type().map(str::to_string),
                    players: session.players().len(),
                    phase: session.phase(),
                    created_at: table.created_at,
                })
            })
            .collect();
        summaries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.game_id.cmp(&b.game_id))
        });
        summaries
    }

    fn table(&self, game_id: &str) -> Result<Arc<Table>, LobbyError> {
        let guard = self
            .games
            .read()
            .map_err(|_| LobbyError::StoragePoisoned)?;
        guard
            .get(game_id)
            .cloned()
            .ok_or_else(|| GameError::GameNotFound(game_id.to_string()).into())
    }

    /// Runs one command against a table and, on success, renders the table
    /// for every seated player while the session is still locked.
    fn with_session<F>(&self, game_id: &str, command: F) -> Result<Vec<SeatView>, LobbyError>
    where
        F: FnOnce(&mut GameSession) -> Result<(), GameError>,
    {
        let table = self.table(game_id)?;
        let mut session = table
            .session
            .lock()
            .map_err(|_| LobbyError::StoragePoisoned)?;

        if let Err(err) = command(&mut *session) {
            tracing::warn!(game_id = %game_id, code = err.code(), error = %err, "command rejected");
            return Err(err.into());
        }

        Ok(session
            .players()
            .iter()
            .map(|p| SeatView {
                player_id: p.id().to_string(),
                snapshot: session.snapshot_for(Some(p.id())),
            })
            .collect())
    }
}

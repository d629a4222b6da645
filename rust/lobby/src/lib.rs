//! Session directory and request protocol for heads-up hold'em tables.
//!
//! [`registry::Lobby`] owns every live [`holdem_engine::game::GameSession`];
//! [`protocol::handle`] turns one JSON request into the replies each client
//! should receive.

pub mod logging;
pub mod protocol;
pub mod registry;
pub mod settings;

pub use logging::{init_logging, LogEntry, LoggingError, TestLogSubscriber};
pub use protocol::{handle, ClientMessage, Envelope, ServerMessage};
pub use registry::{GameSummary, Lobby, LobbyError, SeatView, Seated};
pub use settings::{LobbySettings, SettingsError, SettingsResolved, SettingsSources, ValueSource};

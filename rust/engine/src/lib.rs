//! # holdem-engine: Heads-Up Hold'em Rules Engine
//!
//! The authoritative rules for a two-player Texas Hold'em table: chip stacks,
//! betting rounds, community-card reveals and showdown resolution. Commands go
//! in, a serializable [`snapshot::GameSnapshot`] comes out; rendering,
//! transport and identity are left to the caller.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card)
//! - [`deck`] - Shuffled single-hand deck on ChaCha20
//! - [`hand`] - Banded hand scoring and categories
//! - [`rules`] - Validation of fold/check/bet against the high bet
//! - [`betting`] - Round tracker: high bet, turn order, round completion
//! - [`phase`] - Phase state machine and street dealing
//! - [`showdown`] - Winner selection and result records
//! - [`game`] - The per-table [`game::GameSession`]
//! - [`snapshot`] - Serializable, per-viewer table state
//! - [`config`] - Table stakes and seeding
//! - [`errors`] - Error taxonomy
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::config::TableConfig;
//! use holdem_engine::game::GameSession;
//! use holdem_engine::phase::Phase;
//! use holdem_engine::player::PlayerAction;
//!
//! let config = TableConfig { seed: Some(7), ..Default::default() };
//! let mut game = GameSession::new("table-1", "alice", "Alice", config);
//! game.join("bob", "Bob").unwrap();
//! game.start("alice").unwrap();
//!
//! game.act("alice", PlayerAction::Bet(20)).unwrap();
//! game.act("bob", PlayerAction::Bet(20)).unwrap();
//!
//! assert_eq!(game.phase(), Phase::Betting2);
//! assert_eq!(game.community().len(), 3);
//! assert_eq!(game.pot(), 40);
//! ```
//!
//! ## Hand Scoring
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_engine::hand::{evaluate, Category};
//!
//! let hole = [Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Ace, Suit::Hearts)];
//! let board = [Card::new(Rank::Two, Suit::Clubs), Card::new(Rank::Nine, Suit::Diamonds), Card::new(Rank::King, Suit::Clubs)];
//!
//! let value = evaluate(&hole, &board);
//! assert_eq!(value.category, Category::Pair);
//! assert_eq!(value.score, 200_014);
//! ```

pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod errors;
pub mod game;
pub mod hand;
pub mod phase;
pub mod player;
pub mod rules;
pub mod showdown;
pub mod snapshot;

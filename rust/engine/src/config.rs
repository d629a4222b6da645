use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::game::MAX_SEATS;
use crate::player::STARTING_STACK;

/// Table minimum bet. Advisory: shown to clients, not enforced on bets.
pub const DEFAULT_MIN_BET: u32 = 20;

/// Largest starting stack for which every seat's chips fit in one pot.
pub const MAX_STARTING_STACK: u32 = u32::MAX / MAX_SEATS as u32;

/// Stakes and dealing options for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Chips each player sits down with and is rebought to when broke
    pub starting_stack: u32,
    pub min_bet: u32,
    /// Base seed for reproducible shuffles; hand `n` uses `seed + n`
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_stack: STARTING_STACK,
            min_bet: DEFAULT_MIN_BET,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.starting_stack == 0 || self.starting_stack > MAX_STARTING_STACK {
            return Err(GameError::InvalidAction(format!(
                "starting_stack must be between 1 and {}",
                MAX_STARTING_STACK
            )));
        }
        if self.min_bet == 0 || self.min_bet > self.starting_stack {
            return Err(GameError::InvalidAction(format!(
                "min_bet must be between 1 and starting_stack ({})",
                self.starting_stack
            )));
        }
        Ok(())
    }

    /// Seed for the deck of hand number `hand`, if the table is seeded.
    pub fn deck_seed(&self, hand: u64) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(hand))
    }
}

//! The order of a hand and what happens on each transition.
//!
//! `flop`, `turn` and `river` are transient: entering one deals its
//! community cards and moves straight on to the following betting phase.

use serde::{Deserialize, Serialize};

use crate::betting::everyone_all_in;
use crate::errors::GameError;
use crate::game::GameSession;

/// Size of a complete board.
pub const BOARD_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Betting1,
    Flop,
    Betting2,
    Turn,
    Betting3,
    River,
    Betting4,
    Showdown,
}

impl Phase {
    pub fn next(self) -> Phase {
        match self {
            Phase::Idle => Phase::Betting1,
            Phase::Betting1 => Phase::Flop,
            Phase::Flop => Phase::Betting2,
            Phase::Betting2 => Phase::Turn,
            Phase::Turn => Phase::Betting3,
            Phase::Betting3 => Phase::River,
            Phase::River => Phase::Betting4,
            Phase::Betting4 => Phase::Showdown,
            Phase::Showdown => Phase::Idle,
        }
    }

    pub fn is_betting(self) -> bool {
        matches!(
            self,
            Phase::Betting1 | Phase::Betting2 | Phase::Betting3 | Phase::Betting4
        )
    }

    /// Community cards dealt when this phase is entered.
    pub fn cards_on_entry(self) -> usize {
        match self {
            Phase::Flop => 3,
            Phase::Turn | Phase::River => 1,
            _ => 0,
        }
    }

    /// Seat that opens a betting phase. Seat 0 leads every street; the turn
    /// does not rotate with the dealer chip.
    pub fn first_to_act(self) -> usize {
        0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Betting1 => "betting1",
            Phase::Flop => "flop",
            Phase::Betting2 => "betting2",
            Phase::Turn => "turn",
            Phase::Betting3 => "betting3",
            Phase::River => "river",
            Phase::Betting4 => "betting4",
            Phase::Showdown => "showdown",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GameSession {
    /// Moves the hand on after a betting round has completed.
    pub(crate) fn finish_round(&mut self) -> Result<(), GameError> {
        if everyone_all_in(&self.players) {
            return self.run_out_board();
        }

        let next = self.phase.next();
        tracing::debug!(game_id = %self.id, from = %self.phase, to = %next, "advancing phase");
        match next {
            Phase::Flop | Phase::Turn | Phase::River => self.deal_street(next),
            Phase::Showdown => {
                self.phase = Phase::Showdown;
                self.showdown()
            }
            _ => Ok(()),
        }
    }

    /// Deals a street's community cards and opens the betting phase after it.
    fn deal_street(&mut self, street: Phase) -> Result<(), GameError> {
        let cards = self.deck_mut()?.draw_n(street.cards_on_entry())?;
        self.community.extend(cards);
        tracing::debug!(
            game_id = %self.id,
            street = %street,
            community = self.community.len(),
            "community cards dealt"
        );

        self.phase = street.next();
        self.round
            .reset(&mut self.players, self.phase.first_to_act());
        tracing::debug!(
            game_id = %self.id,
            phase = %self.phase,
            active = self.round.active(),
            "betting round opened"
        );
        Ok(())
    }

    /// Nobody left in the hand can bet: complete the board and go to showdown,
    /// skipping every remaining betting phase.
    fn run_out_board(&mut self) -> Result<(), GameError> {
        let missing = BOARD_SIZE.saturating_sub(self.community.len());
        if missing > 0 {
            let cards = self.deck_mut()?.draw_n(missing)?;
            self.community.extend(cards);
        }
        tracing::info!(
            game_id = %self.id,
            from = %self.phase,
            dealt = missing,
            "all players all-in, running out the board"
        );
        self.phase = Phase::Showdown;
        self.showdown()
    }
}

//! Per-round betting bookkeeping: the table's high bet, whose turn it is,
//! and when a round is over.

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{Player, PlayerAction};
use crate::rules::{validate_action, ValidatedAction};

/// Table-wide state of the current betting round. Per-seat state
/// (`round_bet`, `acted_this_round`) lives on each [`Player`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BettingRound {
    high_bet: u32,
    active: usize,
}

impl BettingRound {
    pub fn high_bet(&self) -> u32 {
        self.high_bet
    }

    /// Seat index of the player who must act next.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Starts a fresh round: zero bets, nobody has acted, `first` to act.
    ///
    /// If `first` cannot act (folded or all-in) the turn goes to the next
    /// seat that can.
    pub(crate) fn reset(&mut self, players: &mut [Player], first: usize) {
        for p in players.iter_mut() {
            p.reset_round();
        }
        self.high_bet = 0;
        self.active = first;
        if players.get(first).is_some_and(|p| !p.can_act()) {
            self.advance_turn(players);
        }
    }

    /// Applies a fold, check or bet for `seat`.
    ///
    /// Returns the validated action; its [`ValidatedAction::amount`] is what
    /// the caller must add to the pot. Nothing is mutated on error.
    pub(crate) fn apply(
        &mut self,
        players: &mut [Player],
        seat: usize,
        action: PlayerAction,
    ) -> Result<ValidatedAction, GameError> {
        let player = players
            .get(seat)
            .ok_or_else(|| GameError::PlayerNotFound(format!("seat {}", seat)))?;
        let validated = validate_action(player.chips, player.round_bet, self.high_bet, action)?;

        match validated {
            ValidatedAction::Fold => {
                players[seat].folded = true;
            }
            ValidatedAction::Check => {
                players[seat].acted_this_round = true;
            }
            _ => {
                players[seat].commit(validated.amount())?;
                let previous = self.high_bet;
                self.high_bet = high_bet_of(players);
                if self.high_bet > previous {
                    for (i, p) in players.iter_mut().enumerate() {
                        if i != seat && !p.folded {
                            p.acted_this_round = false;
                        }
                    }
                }
            }
        }
        Ok(validated)
    }

    /// Passes the turn to the next seat, wrapping, that is neither folded
    /// nor all-in. Returns false when no such seat exists, in which case the
    /// turn stays where it is and no further action is possible.
    pub(crate) fn advance_turn(&mut self, players: &[Player]) -> bool {
        if players.iter().filter(|p| !p.folded).count() <= 1 {
            return false;
        }
        let n = players.len();
        for step in 1..=n {
            let next = (self.active + step) % n;
            if !players[next].folded && !players[next].is_all_in() {
                self.active = next;
                return true;
            }
        }
        false
    }
}

/// Largest contribution this round among players still in the hand.
pub fn high_bet_of(players: &[Player]) -> u32 {
    players
        .iter()
        .filter(|p| p.is_contending())
        .map(|p| p.round_bet)
        .max()
        .unwrap_or(0)
}

/// True once no more betting can happen this round: one contender left,
/// everyone with chips has acted and matched, or nobody has chips.
pub fn is_round_complete(players: &[Player]) -> bool {
    let contenders: Vec<&Player> = players.iter().filter(|p| p.is_contending()).collect();
    if contenders.len() <= 1 {
        return true;
    }
    let with_chips: Vec<&Player> = contenders.into_iter().filter(|p| !p.is_all_in()).collect();
    let Some(first) = with_chips.first() else {
        return true;
    };
    with_chips
        .iter()
        .all(|p| p.acted_this_round && p.round_bet == first.round_bet)
}

/// Every player still in the hand has zero chips.
pub fn everyone_all_in(players: &[Player]) -> bool {
    players
        .iter()
        .filter(|p| p.is_contending())
        .all(|p| p.is_all_in())
}

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::game::GameSession;
use crate::hand::{evaluate, Category, HandValue};
use crate::phase::Phase;
use crate::player::{Player, PlayerId};

pub const REASON_BEST_HAND: &str = "Best hand";
pub const REASON_OTHERS_FOLDED: &str = "Everyone else folded";

/// One contender's hand as revealed at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandSummary {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<Card>,
    pub score: u32,
    pub hand_type: Category,
}

/// Outcome of a hand decided at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowdownResult {
    pub id: PlayerId,
    pub name: String,
    /// Winner's stack after the award
    pub chips: u32,
    pub pot_won: u32,
    pub reason: String,
    pub hand: Vec<Card>,
    pub hand_type: Category,
    /// Every non-folded hand, in seat order
    pub all_hands: Vec<HandSummary>,
}

/// Outcome of a hand that ended because all but one player folded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldResult {
    pub id: PlayerId,
    pub name: String,
    pub chips: u32,
    pub pot_won: u32,
    pub folded_player_id: PlayerId,
    pub folded_player_name: String,
}

/// Picks the showdown winner among non-folded players.
///
/// Returns the winning seat and the reason. The strictly highest score wins;
/// on equal scores the earlier seat keeps the pot.
pub fn determine_winner(players: &[Player], community: &[Card]) -> Option<(usize, &'static str)> {
    let contenders: Vec<usize> = (0..players.len()).filter(|&i| !players[i].folded).collect();
    match contenders.as_slice() {
        [] => None,
        [only] => Some((*only, REASON_OTHERS_FOLDED)),
        [first, rest @ ..] => {
            let mut best = *first;
            let mut best_value = evaluate(&players[best].hand, community);
            for &seat in rest {
                let value = evaluate(&players[seat].hand, community);
                if value.score > best_value.score {
                    best = seat;
                    best_value = value;
                }
            }
            Some((best, REASON_BEST_HAND))
        }
    }
}

fn summarize(player: &Player, value: HandValue) -> HandSummary {
    HandSummary {
        id: player.id.clone(),
        name: player.name.clone(),
        hand: player.hand.clone(),
        score: value.score,
        hand_type: value.category,
    }
}

impl GameSession {
    /// Awards the pot at showdown and records the result.
    pub(crate) fn showdown(&mut self) -> Result<(), GameError> {
        let (seat, reason) = determine_winner(&self.players, &self.community)
            .ok_or_else(|| GameError::InvalidAction("no players left for showdown".into()))?;

        let all_hands: Vec<HandSummary> = self
            .players
            .iter()
            .filter(|p| !p.folded)
            .map(|p| summarize(p, evaluate(&p.hand, &self.community)))
            .collect();

        let pot = self.pot;
        let winner = &mut self.players[seat];
        winner.add_chips(pot)?;
        let hand_type = evaluate(&winner.hand, &self.community).category;
        self.pot = 0;

        tracing::info!(
            game_id = %self.id,
            winner = %winner.name,
            pot,
            hand_type = %hand_type,
            reason,
            "showdown resolved"
        );

        self.winner = Some(ShowdownResult {
            id: winner.id.clone(),
            name: winner.name.clone(),
            chips: winner.chips,
            pot_won: pot,
            reason: reason.to_string(),
            hand: winner.hand.clone(),
            hand_type,
            all_hands,
        });
        Ok(())
    }

    /// Ends the hand the moment a fold leaves one player: award the pot,
    /// clear the hand and return to idle without visiting later phases.
    pub(crate) fn award_fold(
        &mut self,
        winner_seat: usize,
        folded_seat: usize,
    ) -> Result<(), GameError> {
        let pot = self.pot;
        self.players[winner_seat].add_chips(pot)?;
        self.pot = 0;

        let winner = &self.players[winner_seat];
        let folder = &self.players[folded_seat];
        tracing::info!(
            game_id = %self.id,
            winner = %winner.name,
            folded = %folder.name,
            pot,
            "pot awarded after fold"
        );
        self.fold_winner = Some(FoldResult {
            id: winner.id.clone(),
            name: winner.name.clone(),
            chips: winner.chips,
            pot_won: pot,
            folded_player_id: folder.id.clone(),
            folded_player_name: folder.name.clone(),
        });

        self.phase = Phase::Idle;
        self.community.clear();
        for p in self.players.iter_mut() {
            p.reset_hand();
        }
        self.round.reset(&mut self.players, 0);
        Ok(())
    }
}

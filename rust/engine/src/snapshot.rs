use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::phase::Phase;
use crate::player::{Player, PlayerId};
use crate::showdown::{FoldResult, ShowdownResult};

/// A seat as shown to one viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub chips: u32,
    pub round_bet: u32,
    /// Empty when hidden from the viewer
    pub hand: Vec<Card>,
    /// Number of hole cards held, visible or not
    pub card_count: usize,
    pub folded: bool,
    pub acted_this_round: bool,
    pub is_active: bool,
    pub has_dealer_chip: bool,
}

impl PlayerView {
    pub(crate) fn from_player(p: &Player, show_hand: bool) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            chips: p.chips,
            round_bet: p.round_bet,
            hand: if show_hand { p.hand.clone() } else { Vec::new() },
            card_count: p.hand.len(),
            folded: p.folded,
            acted_this_round: p.acted_this_round,
            is_active: p.is_active,
            has_dealer_chip: p.has_dealer_chip,
        }
    }
}

/// Serializable state of a table, handed to whatever delivers it to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub game_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_type: Option<String>,
    pub players: Vec<PlayerView>,
    pub community: Vec<Card>,
    pub pot: u32,
    pub high_bet: u32,
    pub phase: Phase,
    pub active_player_index: usize,
    pub min_bet: u32,
    pub winner: Option<ShowdownResult>,
    pub fold_winner: Option<FoldResult>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Chips on the table: every stack plus the pot.
    pub fn total_chips(&self) -> u64 {
        self.players.iter().map(|p| u64::from(p.chips)).sum::<u64>() + u64::from(self.pot)
    }
}

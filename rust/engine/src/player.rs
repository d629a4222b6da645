use crate::cards::Card;
use crate::errors::GameError;
use serde::{Deserialize, Serialize};

pub type PlayerId = String;

/// A command a seated player sends to the table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayerAction {
    /// Give up the hand
    Fold,
    /// Pass without adding chips; only legal once the current bet is matched
    Check,
    /// Put chips in: opens, calls or raises depending on the table's high bet
    Bet(u32),
    /// Clear the finished hand and return the table to idle
    NextRound,
}

/// Stack every player sits down with, and the amount a broke player is
/// rebought to between hands.
pub const STARTING_STACK: u32 = 1_000;

/// One seat at a heads-up table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) name: String,
    pub(crate) chips: u32,
    pub(crate) hand: Vec<Card>,
    pub(crate) round_bet: u32,
    pub(crate) folded: bool,
    pub(crate) acted_this_round: bool,
    pub(crate) is_active: bool,
    pub(crate) has_dealer_chip: bool,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, chips: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            chips,
            hand: Vec::with_capacity(2),
            round_bet: 0,
            folded: false,
            acted_this_round: false,
            is_active: true,
            has_dealer_chip: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }
    pub fn round_bet(&self) -> u32 {
        self.round_bet
    }
    pub fn folded(&self) -> bool {
        self.folded
    }
    pub fn acted_this_round(&self) -> bool {
        self.acted_this_round
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }
    pub fn has_dealer_chip(&self) -> bool {
        self.has_dealer_chip
    }

    /// Zero chips left: cannot act, still eligible for the pot.
    pub fn is_all_in(&self) -> bool {
        self.chips == 0
    }

    /// Still holding a claim on the pot.
    pub fn is_contending(&self) -> bool {
        !self.folded && self.is_active
    }

    /// Able to take a turn in the current betting round.
    pub fn can_act(&self) -> bool {
        self.is_contending() && !self.is_all_in()
    }

    pub(crate) fn give_cards(&mut self, cards: [Card; 2]) -> Result<(), GameError> {
        if !self.hand.is_empty() {
            return Err(GameError::InvalidAction("hole cards already dealt".into()));
        }
        self.hand.extend(cards);
        Ok(())
    }

    /// Moves `amount` from the stack into this round's contribution.
    pub(crate) fn commit(&mut self, amount: u32) -> Result<(), GameError> {
        if amount == 0 || amount > self.chips {
            return Err(GameError::InvalidAction(format!(
                "invalid bet amount {} (available: {})",
                amount, self.chips
            )));
        }
        self.chips -= amount;
        self.round_bet += amount;
        self.acted_this_round = true;
        Ok(())
    }

    pub(crate) fn add_chips(&mut self, amount: u32) -> Result<(), GameError> {
        self.chips = self.chips.checked_add(amount).ok_or_else(|| {
            GameError::InvalidAction(format!(
                "awarding {} chips would overflow a stack of {}",
                amount, self.chips
            ))
        })?;
        Ok(())
    }

    pub(crate) fn reset_round(&mut self) {
        self.round_bet = 0;
        self.acted_this_round = false;
    }

    /// Clears everything scoped to a single hand.
    pub(crate) fn reset_hand(&mut self) {
        self.reset_round();
        self.hand.clear();
        self.folded = false;
    }

    /// Tops a broke player back up. Returns true if a rebuy happened.
    pub(crate) fn rebuy_if_broke(&mut self, stack: u32) -> bool {
        if self.chips == 0 {
            self.chips = stack;
            true
        } else {
            false
        }
    }
}

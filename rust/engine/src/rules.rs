use crate::errors::GameError;
use crate::player::PlayerAction as A;

/// A betting action that has passed validation, classified against the
/// table's current high bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips that do not lift the player above the high bet (includes short calls)
    Call(u32),
    /// Opening bet on an unbet street
    Bet(u32),
    /// Chips that lift the player above a non-zero high bet
    Raise(u32),
    /// The player's whole remaining stack
    AllIn(u32),
}

impl ValidatedAction {
    /// Chips this action moves into the pot.
    pub fn amount(&self) -> u32 {
        match *self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(n)
            | ValidatedAction::Bet(n)
            | ValidatedAction::Raise(n)
            | ValidatedAction::AllIn(n) => n,
        }
    }
}

/// Validates a betting action for a player holding `chips`, who has put
/// `round_bet` in this round, against the table's `high_bet`.
///
/// # Errors
///
/// - [`GameError::InvalidAction`] when checking while behind the high bet
///   ("must match bet of N"), betting zero or more than the stack, or
///   sending `NextRound` as a betting action.
///
/// # Examples
///
/// ```
/// use holdem_engine::player::PlayerAction;
/// use holdem_engine::rules::{validate_action, ValidatedAction};
///
/// // Calling a 20 bet from a 1000 stack
/// let v = validate_action(1000, 0, 20, PlayerAction::Bet(20));
/// assert_eq!(v, Ok(ValidatedAction::Call(20)));
///
/// // Checking is refused while behind
/// assert!(validate_action(1000, 0, 20, PlayerAction::Check).is_err());
/// ```
pub fn validate_action(
    chips: u32,
    round_bet: u32,
    high_bet: u32,
    action: A,
) -> Result<ValidatedAction, GameError> {
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if high_bet == 0 || round_bet >= high_bet {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::InvalidAction(format!(
                    "must match bet of {}",
                    high_bet
                )))
            }
        }
        A::Bet(amount) => {
            if amount == 0 || amount > chips {
                return Err(GameError::InvalidAction(format!(
                    "invalid bet amount {} (available: {})",
                    amount, chips
                )));
            }
            let total = round_bet + amount;
            if amount == chips {
                Ok(ValidatedAction::AllIn(amount))
            } else if total <= high_bet {
                Ok(ValidatedAction::Call(amount))
            } else if high_bet == 0 {
                Ok(ValidatedAction::Bet(amount))
            } else {
                Ok(ValidatedAction::Raise(amount))
            }
        }
        A::NextRound => Err(GameError::InvalidAction(
            "nextRound is not a betting action".into(),
        )),
    }
}

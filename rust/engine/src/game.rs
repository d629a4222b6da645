use crate::betting::{is_round_complete, BettingRound};
use crate::cards::Card;
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::phase::Phase;
use crate::player::{Player, PlayerAction, PlayerId};
use crate::rules::ValidatedAction;
use crate::showdown::{FoldResult, ShowdownResult};
use crate::snapshot::{GameSnapshot, PlayerView};

pub type GameId = String;

/// Seats at a table. Heads-up only.
pub const MAX_SEATS: usize = 2;

/// All state of one heads-up table.
///
/// Every command either succeeds completely or returns an error with the
/// session untouched. Sessions share nothing, so separate tables can be
/// driven from separate threads.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) id: GameId,
    pub(crate) game_type: Option<String>,
    pub(crate) config: TableConfig,
    pub(crate) players: Vec<Player>,
    pub(crate) community: Vec<Card>,
    pub(crate) pot: u32,
    pub(crate) round: BettingRound,
    pub(crate) phase: Phase,
    pub(crate) deck: Option<Deck>,
    pub(crate) hands_started: u64,
    pub(crate) winner: Option<ShowdownResult>,
    pub(crate) fold_winner: Option<FoldResult>,
}

impl GameSession {
    /// Opens a table with its host in seat 0, holding the dealer chip.
    pub fn new(
        id: impl Into<GameId>,
        host_id: impl Into<PlayerId>,
        host_name: impl Into<String>,
        config: TableConfig,
    ) -> Self {
        let mut host = Player::new(host_id, host_name, config.starting_stack);
        host.has_dealer_chip = true;
        let id = id.into();
        tracing::debug!(game_id = %id, host = %host.name, "game session created");
        Self {
            id,
            game_type: None,
            config,
            players: vec![host],
            community: Vec::with_capacity(5),
            pot: 0,
            round: BettingRound::default(),
            phase: Phase::Idle,
            deck: None,
            hands_started: 0,
            winner: None,
            fold_winner: None,
        }
    }

    pub fn with_game_type(mut self, game_type: impl Into<String>) -> Self {
        self.game_type = Some(game_type.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn game_type(&self) -> Option<&str> {
        self.game_type.as_deref()
    }
    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn community(&self) -> &[Card] {
        &self.community
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn high_bet(&self) -> u32 {
        self.round.high_bet()
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn active_player_index(&self) -> usize {
        self.round.active()
    }
    pub fn min_bet(&self) -> u32 {
        self.config.min_bet
    }
    pub fn winner(&self) -> Option<&ShowdownResult> {
        self.winner.as_ref()
    }
    pub fn fold_winner(&self) -> Option<&FoldResult> {
        self.fold_winner.as_ref()
    }
    pub fn deck_remaining(&self) -> Option<usize> {
        self.deck.as_ref().map(Deck::remaining)
    }

    pub fn seat_of(&self, player_id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    pub fn is_host(&self, player_id: &str) -> bool {
        self.players.first().is_some_and(|p| p.id == player_id)
    }

    /// Seats a second player. Returns their seat index.
    pub fn join(
        &mut self,
        player_id: impl Into<PlayerId>,
        name: impl Into<String>,
    ) -> Result<usize, GameError> {
        if self.players.len() >= MAX_SEATS {
            return Err(GameError::GameFull);
        }
        let player = Player::new(player_id, name, self.config.starting_stack);
        tracing::debug!(game_id = %self.id, player = %player.name, "player joined");
        self.players.push(player);
        Ok(self.players.len() - 1)
    }

    /// Host starts a hand with a freshly shuffled deck.
    pub fn start(&mut self, player_id: &str) -> Result<(), GameError> {
        let deck = match self.config.deck_seed(self.hands_started) {
            Some(seed) => Deck::new_with_seed(seed),
            None => Deck::new(),
        };
        self.start_with_deck(player_id, deck)
    }

    /// Host starts a hand dealing from `deck`: two cards to seat 0, two to
    /// seat 1, then the board in order.
    pub fn start_with_deck(&mut self, player_id: &str, mut deck: Deck) -> Result<(), GameError> {
        if !self.is_host(player_id) {
            return Err(GameError::NotHost);
        }
        if self.players.len() < MAX_SEATS {
            return Err(GameError::InvalidAction(
                "waiting for a second player".into(),
            ));
        }
        if self.phase.is_betting() {
            return Err(GameError::InvalidAction("hand already in progress".into()));
        }

        let mut holes = Vec::with_capacity(self.players.len());
        for _ in 0..self.players.len() {
            holes.push([deck.draw()?, deck.draw()?]);
        }

        self.clear_hand();
        for (player, cards) in self.players.iter_mut().zip(holes) {
            player.give_cards(cards)?;
        }
        self.deck = Some(deck);
        self.hands_started += 1;
        self.phase = Phase::Betting1;
        self.round
            .reset(&mut self.players, Phase::Betting1.first_to_act());

        tracing::info!(
            game_id = %self.id,
            hand = self.hands_started,
            active = self.round.active(),
            "hand started"
        );
        Ok(())
    }

    /// Applies one player command. On error the session is unchanged.
    pub fn act(&mut self, player_id: &str, action: PlayerAction) -> Result<(), GameError> {
        if action == PlayerAction::NextRound {
            return self.next_round();
        }
        let seat = self
            .seat_of(player_id)
            .ok_or_else(|| GameError::PlayerNotFound(player_id.to_string()))?;
        if !self.phase.is_betting() {
            return Err(GameError::InvalidAction(format!(
                "no betting round in progress (phase {})",
                self.phase
            )));
        }
        if seat != self.round.active() {
            return Err(GameError::NotYourTurn {
                expected: self.round.active(),
                actual: seat,
            });
        }

        let mut next = self.clone();
        next.apply_turn(seat, action)?;
        *self = next;
        Ok(())
    }

    fn apply_turn(&mut self, seat: usize, action: PlayerAction) -> Result<(), GameError> {
        let validated = self.round.apply(&mut self.players, seat, action)?;
        self.pot = self.pot.checked_add(validated.amount()).ok_or_else(|| {
            GameError::InvalidAction(format!(
                "bet of {} would overflow the pot of {}",
                validated.amount(),
                self.pot
            ))
        })?;
        tracing::debug!(
            game_id = %self.id,
            player = %self.players[seat].name,
            phase = %self.phase,
            action = ?validated,
            pot = self.pot,
            high_bet = self.round.high_bet(),
            "action applied"
        );

        if validated == ValidatedAction::Fold {
            let remaining: Vec<usize> = (0..self.players.len())
                .filter(|&i| !self.players[i].folded)
                .collect();
            if let [winner] = remaining.as_slice() {
                return self.award_fold(*winner, seat);
            }
        }

        self.round.advance_turn(&self.players);
        if is_round_complete(&self.players) {
            self.finish_round()?;
        }
        Ok(())
    }

    /// Clears the finished hand and returns the table to idle. Broke players
    /// are rebought to the starting stack.
    pub fn next_round(&mut self) -> Result<(), GameError> {
        if self.phase.is_betting() {
            return Err(GameError::InvalidAction(
                "cannot start a new round while a hand is in progress".into(),
            ));
        }
        self.clear_hand();
        self.phase = Phase::Idle;
        tracing::debug!(game_id = %self.id, "table reset for next round");
        Ok(())
    }

    fn clear_hand(&mut self) {
        self.pot = 0;
        self.community.clear();
        self.winner = None;
        self.fold_winner = None;
        self.deck = None;
        let stack = self.config.starting_stack;
        for p in self.players.iter_mut() {
            p.reset_hand();
            if p.rebuy_if_broke(stack) {
                tracing::info!(game_id = %self.id, player = %p.name, stack, "player rebuys");
            }
        }
        self.round.reset(&mut self.players, 0);
    }

    pub(crate) fn deck_mut(&mut self) -> Result<&mut Deck, GameError> {
        self.deck.as_mut().ok_or(GameError::DeckExhausted)
    }

    /// State as seen by `viewer`. Opponents' hole cards are hidden until
    /// showdown; `None` sees every hand.
    pub fn snapshot_for(&self, viewer: Option<&str>) -> GameSnapshot {
        let reveal_all = viewer.is_none() || self.phase == Phase::Showdown;
        let players = self
            .players
            .iter()
            .map(|p| {
                let visible = reveal_all || viewer == Some(p.id.as_str());
                PlayerView::from_player(p, visible)
            })
            .collect();
        GameSnapshot {
            game_id: self.id.clone(),
            game_type: self.game_type.clone(),
            players,
            community: self.community.clone(),
            pot: self.pot,
            high_bet: self.round.high_bet(),
            phase: self.phase,
            active_player_index: self.round.active(),
            min_bet: self.config.min_bet,
            winner: self.winner.clone(),
            fold_winner: self.fold_winner.clone(),
        }
    }

    /// Unredacted state with every hand visible.
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot_for(None)
    }
}

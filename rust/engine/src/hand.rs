use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};

/// Width of one category band in a [`HandValue::score`].
pub const CATEGORY_BAND: u32 = 100_000;

/// Made-hand categories, weakest first.
///
/// There is no separate straight flush: a suited straight scores as a
/// [`Category::Flush`], since flush outranks straight in the band ordering.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "High Card")]
    HighCard = 1,
    #[serde(rename = "Pair")]
    Pair = 2,
    #[serde(rename = "Two Pair")]
    TwoPair = 3,
    #[serde(rename = "Three of a Kind")]
    ThreeOfAKind = 4,
    #[serde(rename = "Straight")]
    Straight = 5,
    #[serde(rename = "Flush")]
    Flush = 6,
    #[serde(rename = "Full House")]
    FullHouse = 7,
    #[serde(rename = "Four of a Kind")]
    FourOfAKind = 8,
}

impl Category {
    /// Lower bound of this category's score band.
    pub fn band(self) -> u32 {
        self as u32 * CATEGORY_BAND
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strength of a pooled hand.
///
/// `score` is the category band plus the value of the highest card in the
/// pool. Two hands of the same category compare only on that single card;
/// kickers beyond it are not considered and exact ties are left to the caller.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HandValue {
    pub score: u32,
    pub category: Category,
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.cmp(&other.score)
    }
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Evaluates a player's hole cards together with the community cards.
pub fn evaluate(hole: &[Card], community: &[Card]) -> HandValue {
    let pool: Vec<Card> = hole.iter().chain(community).copied().collect();
    evaluate_cards(&pool)
}

/// Evaluates an arbitrary pool of 2 to 7 cards.
///
/// The result depends only on the multiset of cards, never on their order.
pub fn evaluate_cards(cards: &[Card]) -> HandValue {
    let mut rank_counts = [0u8; 15]; // 2..=14 used
    let mut suit_counts = [0u8; 4];
    for c in cards {
        rank_counts[c.rank.value() as usize] += 1;
        suit_counts[suit_index(c.suit)] += 1;
    }

    let mut counts: Vec<u8> = rank_counts.iter().copied().filter(|&n| n > 0).collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    let top = counts.first().copied().unwrap_or(0);
    let second = counts.get(1).copied().unwrap_or(0);

    let is_flush = suit_counts.iter().any(|&n| n >= 5);
    let is_straight = has_straight(&rank_counts);

    let category = if top == 4 {
        Category::FourOfAKind
    } else if top == 3 && second == 2 {
        Category::FullHouse
    } else if is_flush {
        Category::Flush
    } else if is_straight {
        Category::Straight
    } else if top == 3 {
        Category::ThreeOfAKind
    } else if top == 2 && second == 2 {
        Category::TwoPair
    } else if top == 2 {
        Category::Pair
    } else {
        Category::HighCard
    };

    let high = cards.iter().map(|c| c.rank.value()).max().unwrap_or(0);
    HandValue {
        score: category.band() + high,
        category,
    }
}

pub fn compare_hands(a: &HandValue, b: &HandValue) -> Ordering {
    a.cmp(b)
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Hearts => 0,
        Suit::Diamonds => 1,
        Suit::Clubs => 2,
        Suit::Spades => 3,
    }
}

/// Five consecutive distinct ranks; the Ace also plays low for A-2-3-4-5.
fn has_straight(rank_counts: &[u8; 15]) -> bool {
    let ace = Rank::Ace.value() as usize;
    let present = |v: usize| {
        let idx = if v == 1 { ace } else { v };
        rank_counts[idx] > 0
    };
    (1..=10).any(|low| (low..low + 5).all(|v| present(v)))
}

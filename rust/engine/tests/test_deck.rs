use std::collections::HashSet;

use holdem_engine::cards::{full_deck, Card, Rank, Suit};
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;

#[test]
fn new_deck_has_52_unique_cards() {
    let mut deck = Deck::new();
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = deck.draw().expect("should have 52 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert_eq!(deck.remaining(), 0);
    assert_eq!(deck.draw(), Err(GameError::DeckExhausted));
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new_with_seed(12345);
    let mut d2 = Deck::new_with_seed(12345);
    let a = d1.draw_n(10).unwrap();
    let b = d2.draw_n(10).unwrap();
    assert_eq!(a, b, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new_with_seed(1);
    let mut d2 = Deck::new_with_seed(2);
    let a = d1.draw_n(10).unwrap();
    let b = d2.draw_n(10).unwrap();
    assert_ne!(
        a, b,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn shuffled_deck_is_not_in_factory_order() {
    let mut deck = Deck::new_with_seed(99);
    let drawn = deck.draw_n(52).unwrap();
    assert_ne!(drawn, full_deck());
    let sorted: HashSet<Card> = drawn.into_iter().collect();
    assert_eq!(sorted, full_deck().into_iter().collect());
}

#[test]
fn draw_n_refuses_partial_draws() {
    let mut deck = Deck::stacked(vec![
        Card::new(Rank::Ace, Suit::Spades),
        Card::new(Rank::King, Suit::Spades),
    ]);
    assert_eq!(deck.draw_n(3), Err(GameError::DeckExhausted));
    assert_eq!(deck.remaining(), 2, "failed draw must not consume cards");
    assert_eq!(deck.draw().unwrap(), Card::new(Rank::Ace, Suit::Spades));
}

#[test]
fn card_serializes_with_face_labels() {
    let c = Card::new(Rank::Ten, Suit::Hearts);
    let json = serde_json::to_value(c).expect("serialize");
    assert_eq!(json, serde_json::json!({"suit": "hearts", "rank": "10"}));

    let back: Card = serde_json::from_str(r#"{"suit":"spades","rank":"A"}"#).expect("deserialize");
    assert_eq!(back, Card::new(Rank::Ace, Suit::Spades));
    assert_eq!(back.to_string(), "A♠");
}

use holdem_engine::config::TableConfig;
use holdem_engine::errors::GameError;
use holdem_engine::game::GameSession;
use holdem_engine::phase::Phase;
use holdem_engine::player::PlayerAction as A;

fn table() -> GameSession {
    GameSession::new("g1", "host", "Alice", TableConfig::default())
}

#[test]
fn new_table_seats_host_with_dealer_chip() {
    let game = table();
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.players().len(), 1);
    let host = &game.players()[0];
    assert_eq!(host.chips(), 1000);
    assert!(host.has_dealer_chip());
    assert!(host.is_active());
    assert!(game.is_host("host"));
    assert_eq!(game.min_bet(), 20);
}

#[test]
fn third_player_is_turned_away() {
    let mut game = table();
    assert_eq!(game.join("guest", "Bob"), Ok(1));
    assert!(!game.players()[1].has_dealer_chip());
    assert_eq!(game.join("late", "Carol"), Err(GameError::GameFull));
    assert_eq!(game.players().len(), 2);
}

#[test]
fn only_the_host_can_start() {
    let mut game = table();
    game.join("guest", "Bob").expect("join");
    assert_eq!(game.start("guest"), Err(GameError::NotHost));
    assert_eq!(game.start("nobody"), Err(GameError::NotHost));
    assert_eq!(game.phase(), Phase::Idle);
}

#[test]
fn start_needs_a_second_player() {
    let mut game = table();
    assert!(matches!(game.start("host"), Err(GameError::InvalidAction(_))));
    assert_eq!(game.phase(), Phase::Idle);
}

#[test]
fn start_is_refused_mid_hand() {
    let mut game = table();
    game.join("guest", "Bob").expect("join");
    game.start("host").expect("start");
    game.act("host", A::Bet(20)).expect("bet");
    let before = game.snapshot();
    assert!(game.start("host").is_err());
    assert_eq!(game.snapshot(), before);
}

#[test]
fn start_after_a_fold_clears_the_previous_result() {
    let mut game = table();
    game.join("guest", "Bob").expect("join");
    game.start("host").expect("start");
    game.act("host", A::Fold).expect("fold");
    assert!(game.fold_winner().is_some());

    game.start("host").expect("restart");
    assert!(game.fold_winner().is_none());
    assert_eq!(game.phase(), Phase::Betting1);
}

#[test]
fn snapshot_serializes_with_wire_field_names() {
    let mut game = table().with_game_type("holdem");
    game.join("guest", "Bob").expect("join");
    game.start("host").expect("start");
    game.act("host", A::Bet(20)).expect("bet");

    let json = game.snapshot_for(Some("guest")).to_json().expect("json");
    assert_eq!(json["gameId"], "g1");
    assert_eq!(json["gameType"], "holdem");
    assert_eq!(json["phase"], "betting1");
    assert_eq!(json["pot"], 20);
    assert_eq!(json["highBet"], 20);
    assert_eq!(json["activePlayerIndex"], 1);
    assert_eq!(json["minBet"], 20);
    assert!(json["winner"].is_null());
    assert!(json["foldWinner"].is_null());

    let host = &json["players"][0];
    assert_eq!(host["roundBet"], 20);
    assert_eq!(host["actedThisRound"], true);
    assert_eq!(host["hasDealerChip"], true);
    assert_eq!(host["hand"].as_array().map(Vec::len), Some(0), "hidden from guest");
    assert_eq!(host["cardCount"], 2);
    assert_eq!(json["players"][1]["hand"].as_array().map(Vec::len), Some(2));
}

#[test]
fn snapshot_conserves_chips() {
    let mut game = table();
    game.join("guest", "Bob").expect("join");
    game.start("host").expect("start");
    game.act("host", A::Bet(75)).expect("bet");
    game.act("guest", A::Bet(200)).expect("raise");
    assert_eq!(game.snapshot().total_chips(), 2000);
}

use holdem_engine::config::TableConfig;
use holdem_engine::errors::GameError;
use holdem_engine::phase::Phase;
use holdem_engine::player::PlayerAction as A;
use holdem_lobby::{Lobby, LobbyError, Seated, TestLogSubscriber};
use std::sync::Arc;
use std::thread;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

fn seeded_lobby() -> Lobby {
    Lobby::new(TableConfig {
        seed: Some(11),
        ..Default::default()
    })
}

fn game_error(result: Result<impl std::fmt::Debug, LobbyError>) -> GameError {
    match result {
        Err(LobbyError::Game(err)) => err,
        other => panic!("expected a game error, got {:?}", other),
    }
}

/// Host and guest seated at a fresh table.
fn seated_pair(lobby: &Lobby) -> (Seated, Seated) {
    let host = lobby.create_game("Alice", None).expect("create");
    let (guest, _) = lobby.join_game(&host.game_id, "Bob").expect("join");
    (host, guest)
}

#[test]
fn create_game_seats_the_host_idle() {
    let lobby = Lobby::default();
    let host = lobby.create_game("Alice", Some("holdem".into())).expect("create");
    assert!(!host.game_id.is_empty());
    assert_ne!(host.game_id, host.player_id);

    let snapshot = lobby.snapshot(&host.game_id, None).expect("snapshot");
    assert_eq!(snapshot.phase, Phase::Idle);
    assert_eq!(snapshot.players.len(), 1);
    assert_eq!(snapshot.players[0].id, host.player_id);
    assert_eq!(snapshot.players[0].chips, 1000);
    assert_eq!(snapshot.min_bet, 20);
    assert_eq!(snapshot.game_type.as_deref(), Some("holdem"));
}

#[test]
fn join_returns_ids_and_a_view_per_seat() {
    let lobby = Lobby::default();
    let host = lobby.create_game("Alice", None).expect("create");
    let (guest, views) = lobby.join_game(&host.game_id, "Bob").expect("join");

    assert_eq!(guest.game_id, host.game_id);
    assert_ne!(guest.player_id, host.player_id);
    let recipients: Vec<&str> = views.iter().map(|v| v.player_id.as_str()).collect();
    assert_eq!(recipients, vec![host.player_id.as_str(), guest.player_id.as_str()]);
    assert!(views.iter().all(|v| v.snapshot.phase == Phase::Idle));
}

#[test]
fn unknown_game_is_reported_for_every_command() {
    let lobby = Lobby::default();
    let missing = GameError::GameNotFound("nope".into());
    assert_eq!(game_error(lobby.join_game("nope", "Bob")), missing);
    assert_eq!(game_error(lobby.start_game("nope", "p")), missing);
    assert_eq!(game_error(lobby.action("nope", "p", A::Check)), missing);
    assert_eq!(game_error(lobby.action("nope", "", A::NextRound)), missing);
    assert_eq!(game_error(lobby.snapshot("nope", None)), missing);
    assert_eq!(game_error(lobby.remove_game("nope")), missing);
}

#[test]
fn third_join_is_game_full() {
    let lobby = Lobby::default();
    let (host, _) = seated_pair(&lobby);
    assert_eq!(
        game_error(lobby.join_game(&host.game_id, "Carol")),
        GameError::GameFull
    );
}

#[test]
fn only_the_host_starts_and_views_are_redacted() {
    let lobby = seeded_lobby();
    let (host, guest) = seated_pair(&lobby);
    assert_eq!(
        game_error(lobby.start_game(&host.game_id, &guest.player_id)),
        GameError::NotHost
    );

    let views = lobby.start_game(&host.game_id, &host.player_id).expect("start");
    assert_eq!(views.len(), 2);
    for view in &views {
        assert_eq!(view.snapshot.phase, Phase::Betting1);
        for player in &view.snapshot.players {
            let expected = if player.id == view.player_id { 2 } else { 0 };
            assert_eq!(player.hand.len(), expected);
            assert_eq!(player.card_count, 2);
        }
    }
}

#[test]
fn actions_flow_through_to_the_session() {
    let lobby = seeded_lobby();
    let (host, guest) = seated_pair(&lobby);
    lobby.start_game(&host.game_id, &host.player_id).expect("start");

    assert!(matches!(
        game_error(lobby.action(&host.game_id, &guest.player_id, A::Bet(20))),
        GameError::NotYourTurn { expected: 0, actual: 1 }
    ));
    assert_eq!(
        game_error(lobby.action(&host.game_id, "stranger", A::Fold)),
        GameError::PlayerNotFound("stranger".into())
    );

    lobby.action(&host.game_id, &host.player_id, A::Bet(20)).expect("bet");
    let views = lobby
        .action(&host.game_id, &guest.player_id, A::Bet(20))
        .expect("call");
    let state = &views[0].snapshot;
    assert_eq!(state.phase, Phase::Betting2);
    assert_eq!(state.community.len(), 3);
    assert_eq!(state.pot, 40);

    lobby.action(&host.game_id, &host.player_id, A::Fold).expect("fold");
    let state = lobby.snapshot(&host.game_id, None).expect("snapshot");
    assert_eq!(state.phase, Phase::Idle);
    let fold = state.fold_winner.expect("fold record");
    assert_eq!(fold.id, guest.player_id);
    assert_eq!(fold.pot_won, 40);

    // nextRound needs no seated player
    lobby.action(&host.game_id, "", A::NextRound).expect("next round");
    let state = lobby.snapshot(&host.game_id, None).expect("snapshot");
    assert!(state.fold_winner.is_none());
}

#[test]
fn removed_games_disappear_from_the_listing() {
    let lobby = Lobby::default();
    let first = lobby.create_game("Alice", None).expect("create");
    let second = lobby.create_game("Carol", Some("holdem".into())).expect("create");

    let listed: Vec<String> = lobby.active_games().into_iter().map(|g| g.game_id).collect();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&first.game_id));
    assert!(listed.contains(&second.game_id));

    lobby.remove_game(&first.game_id).expect("remove");
    let listed = lobby.active_games();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].game_id, second.game_id);
    assert_eq!(listed[0].players, 1);
    assert_eq!(listed[0].phase, Phase::Idle);
    assert!(lobby.snapshot(&first.game_id, None).is_err());
}

#[test]
fn separate_tables_play_concurrently() {
    let lobby = Arc::new(seeded_lobby());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let lobby = Arc::clone(&lobby);
            thread::spawn(move || {
                let host = lobby.create_game(&format!("host-{}", i), None).expect("create");
                let (guest, _) = lobby.join_game(&host.game_id, "guest").expect("join");
                lobby.start_game(&host.game_id, &host.player_id).expect("start");
                for _ in 0..4 {
                    lobby.action(&host.game_id, &host.player_id, A::Check).expect("check");
                    lobby.action(&host.game_id, &guest.player_id, A::Check).expect("check");
                }
                lobby.snapshot(&host.game_id, None).expect("snapshot")
            })
        })
        .collect();

    for handle in handles {
        let state = handle.join().expect("thread");
        assert_eq!(state.phase, Phase::Showdown);
        assert!(state.winner.is_some());
        assert_eq!(state.total_chips(), 2000);
    }
    assert_eq!(lobby.active_games().len(), 8);
}

#[test]
fn rejected_commands_are_logged_with_their_code() {
    let logs = TestLogSubscriber::new();
    let registry = Registry::default().with(logs.clone().into_layer::<Registry>());
    let lobby = Lobby::default();

    tracing::subscriber::with_default(registry, || {
        let (host, _) = seated_pair(&lobby);
        let _ = lobby.join_game(&host.game_id, "Carol");
    });

    let rejected = logs.with_message("command rejected");
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].level, tracing::Level::WARN);
    assert_eq!(rejected[0].field("code"), Some("game_full"));
    assert!(!logs.with_message("game created").is_empty());
}

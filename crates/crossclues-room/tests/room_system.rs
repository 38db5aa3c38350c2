//! Integration tests for the room registry: lifecycle, error routing, and
//! behavior under concurrent requests.

use std::collections::HashSet;
use std::sync::Arc;

use crossclues_protocol::{Card, PlayerName, RoomCode};
use crossclues_room::{GridSize, RoomError, RoomRegistry, WordCatalog};

// =========================================================================
// Helpers
// =========================================================================

fn code(s: &str) -> RoomCode {
    RoomCode::new(s)
}

fn name(s: &str) -> PlayerName {
    PlayerName::new(s)
}

fn size(n: usize) -> GridSize {
    GridSize::new(n).unwrap()
}

/// Deck, hands, and settled cells together hold every coordinate once.
async fn assert_conserved(registry: &RoomRegistry, room_code: &RoomCode) {
    let shared = registry.find(room_code).await.unwrap();
    let room = shared.read().await;
    let n = room.grid_size().get();

    let mut seen: HashSet<Card> = HashSet::new();
    for card in room.deck().iter() {
        assert!(seen.insert(*card), "duplicate {card}");
    }
    for player in room.players() {
        let hand = room.hand(player.as_str()).expect("every player has a hand");
        assert!(hand.len() <= 2);
        for card in hand.cards() {
            assert!(seen.insert(*card), "duplicate {card}");
        }
    }
    for r in 0..n {
        for c in 0..n {
            if room.grid().cell(r, c).unwrap().is_resolved() {
                assert!(seen.insert(Card::new(r, c)), "played card redealt");
            }
        }
    }
    assert_eq!(seen.len(), n * n);
}

// =========================================================================
// Lifecycle
// =========================================================================

#[tokio::test]
async fn test_create_room_returns_summary() {
    let registry = RoomRegistry::new();
    let info = registry
        .create_room(code("R1"), size(5), name("Ana"))
        .await
        .unwrap();

    assert_eq!(info.room_code, code("R1"));
    assert_eq!(info.grid_size, 5);
    assert_eq!(info.players, vec![name("Ana")]);
    assert!(!info.game_started);
    assert!(!info.game_over);
    assert_eq!(registry.room_count().await, 1);
}

#[tokio::test]
async fn test_create_duplicate_room_fails() {
    let registry = RoomRegistry::new();
    registry
        .create_room(code("R1"), size(5), name("Ana"))
        .await
        .unwrap();

    let err = registry
        .create_room(code("R1"), size(3), name("Bo"))
        .await
        .unwrap_err();
    assert!(matches!(err, RoomError::AlreadyExists(c) if c == code("R1")));

    let info = registry.room_info(&code("R1")).await.unwrap();
    assert_eq!(info.grid_size, 5, "original room untouched");
}

#[tokio::test]
async fn test_create_with_small_catalog_registers_nothing() {
    let registry = RoomRegistry::with_catalog(WordCatalog::new(["A", "B", "C"]));
    let err = registry
        .create_room(code("R1"), size(3), name("Ana"))
        .await
        .unwrap_err();
    assert!(matches!(err, RoomError::CatalogTooSmall { .. }));
    assert_eq!(registry.room_count().await, 0);
}

#[tokio::test]
async fn test_operations_on_missing_room_fail_with_not_found() {
    let registry = RoomRegistry::new();
    let missing = code("NOPE");

    assert!(matches!(
        registry.join_room(&missing, name("Ana")).await,
        Err(RoomError::NotFound(_))
    ));
    assert!(matches!(
        registry.leave_room(&missing, &name("Ana")).await,
        Err(RoomError::NotFound(_))
    ));
    assert!(matches!(
        registry.start_game(&missing).await,
        Err(RoomError::NotFound(_))
    ));
    assert!(matches!(
        registry.submit_guess(&missing, &name("Ana"), 0, 0, true).await,
        Err(RoomError::NotFound(_))
    ));
    assert!(matches!(
        registry.get_state(&missing, &name("Ana")).await,
        Err(RoomError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_scenario_three_by_three() {
    let registry = RoomRegistry::new();
    let r1 = code("R1");
    registry
        .create_room(r1.clone(), size(3), name("A"))
        .await
        .unwrap();

    let a = registry.get_state(&r1, &name("A")).await.unwrap();
    assert_eq!(a.player_cards.len(), 2);
    assert_eq!(registry.find(&r1).await.unwrap().read().await.deck().len(), 7);

    assert_eq!(registry.join_room(&r1, name("B")).await.unwrap(), 2);
    assert_eq!(registry.find(&r1).await.unwrap().read().await.deck().len(), 5);

    registry.start_game(&r1).await.unwrap();
    let a = registry.get_state(&r1, &name("A")).await.unwrap();
    let b = registry.get_state(&r1, &name("B")).await.unwrap();
    assert_eq!(a.player_cards.len(), 2);
    assert_eq!(b.player_cards.len(), 2);
    assert!(a.game_started);
    assert_eq!(registry.find(&r1).await.unwrap().read().await.deck().len(), 5);
    assert_conserved(&registry, &r1).await;

    let held: HashSet<Card> = a.player_cards.iter().copied().collect();
    let unheld = (0..3)
        .flat_map(|r| (0..3).map(move |c| Card::new(r, c)))
        .find(|c| !held.contains(c))
        .unwrap();
    let err = registry
        .submit_guess(&r1, &name("A"), unheld.row, unheld.column, true)
        .await
        .unwrap_err();
    assert!(matches!(err, RoomError::NoCardForCell { .. }));

    let after = registry.get_state(&r1, &name("A")).await.unwrap();
    assert_eq!(after.player_cards, a.player_cards);
    assert_eq!(after.grid, a.grid);
}

#[tokio::test]
async fn test_start_twice_succeeds_and_resets() {
    let registry = RoomRegistry::new();
    let r = code("R");
    registry.create_room(r.clone(), size(4), name("A")).await.unwrap();
    registry.join_room(&r, name("B")).await.unwrap();

    registry.start_game(&r).await.unwrap();
    let card = registry.get_state(&r, &name("A")).await.unwrap().player_cards[0];
    registry
        .submit_guess(&r, &name("A"), card.row, card.column, true)
        .await
        .unwrap();

    registry.start_game(&r).await.unwrap();
    let view = registry.get_state(&r, &name("A")).await.unwrap();
    assert!(view.game_started);
    assert!(!view.game_over);
    assert_eq!(view.correct_guesses, 0);
    assert_eq!(view.total_cells, 16);
    assert_conserved(&registry, &r).await;
}

#[tokio::test]
async fn test_start_with_one_player_fails() {
    let registry = RoomRegistry::new();
    let r = code("R");
    registry.create_room(r.clone(), size(3), name("A")).await.unwrap();
    assert!(matches!(
        registry.start_game(&r).await,
        Err(RoomError::NotEnoughPlayers { players: 1, .. })
    ));
}

#[tokio::test]
async fn test_full_game_to_completion_through_registry() {
    let registry = RoomRegistry::new();
    let r = code("R");
    registry.create_room(r.clone(), size(3), name("A")).await.unwrap();
    registry.join_room(&r, name("B")).await.unwrap();
    registry.start_game(&r).await.unwrap();

    let mut over = false;
    let mut turns = 0;
    while !over {
        for p in ["A", "B"] {
            let view = registry.get_state(&r, &name(p)).await.unwrap();
            if let Some(card) = view.player_cards.first() {
                over = registry
                    .submit_guess(&r, &name(p), card.row, card.column, p == "A")
                    .await
                    .unwrap();
                turns += 1;
                break;
            }
        }
    }
    assert_eq!(turns, 9);

    // A always reports correct, B always discards.
    let for_b = registry.get_state(&r, &name("B")).await.unwrap();
    assert!(for_b.game_over);
    assert!(for_b.player_cards.is_empty());
    assert!(
        for_b
            .grid
            .iter()
            .flatten()
            .all(|c| c.guessed_correctly || c.discarded_by_me)
    );

    let for_a = registry.get_state(&r, &name("A")).await.unwrap();
    let hidden = for_a
        .grid
        .iter()
        .flatten()
        .filter(|c| !c.guessed_correctly && !c.discarded_by_me)
        .count();
    assert_eq!(for_a.correct_guesses + hidden, 9);
    assert!(matches!(
        registry.submit_guess(&r, &name("A"), 0, 0, true).await,
        Err(RoomError::GameOver(_))
    ));
}

#[tokio::test]
async fn test_leave_then_rejoin() {
    let registry = RoomRegistry::new();
    let r = code("R");
    registry.create_room(r.clone(), size(3), name("A")).await.unwrap();
    registry.join_room(&r, name("B")).await.unwrap();

    registry.leave_room(&r, &name("B")).await.unwrap();
    assert!(matches!(
        registry.get_state(&r, &name("B")).await,
        Err(RoomError::PlayerNotInRoom(..))
    ));
    assert!(matches!(
        registry.leave_room(&r, &name("B")).await,
        Err(RoomError::PlayerNotInRoom(..))
    ));
    assert_conserved(&registry, &r).await;

    assert_eq!(registry.join_room(&r, name("B")).await.unwrap(), 2);
    assert_conserved(&registry, &r).await;
}

#[tokio::test]
async fn test_clear_all_drops_every_room() {
    let registry = RoomRegistry::new();
    for c in ["A1", "B2", "C3"] {
        registry.create_room(code(c), size(3), name("p")).await.unwrap();
    }
    assert_eq!(
        registry.room_codes().await,
        vec![code("A1"), code("B2"), code("C3")]
    );

    registry.clear_all().await;
    assert_eq!(registry.room_count().await, 0);
    assert!(registry.find(&code("A1")).await.is_err());
}

#[tokio::test]
async fn test_registries_are_independent() {
    let first = RoomRegistry::new();
    let second = RoomRegistry::new();
    first.create_room(code("R"), size(3), name("A")).await.unwrap();

    assert!(second.find(&code("R")).await.is_err());
    second.create_room(code("R"), size(5), name("Z")).await.unwrap();
    assert_eq!(first.room_info(&code("R")).await.unwrap().grid_size, 3);
}

// =========================================================================
// Concurrency
// =========================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_of_same_code_admit_exactly_one() {
    let registry = Arc::new(RoomRegistry::new());
    let mut tasks = Vec::new();
    for i in 0..16 {
        let registry = Arc::clone(&registry);
        tasks.push(tokio::spawn(async move {
            registry
                .create_room(code("SAME"), size(5), name(&format!("p{i}")))
                .await
        }));
    }

    let mut created = 0;
    let mut rejected = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => created += 1,
            Err(RoomError::AlreadyExists(_)) => rejected += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(rejected, 15);
    assert_eq!(registry.room_count().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_keep_cards_conserved() {
    let registry = Arc::new(RoomRegistry::new());
    let r = code("BUSY");
    registry.create_room(r.clone(), size(7), name("host")).await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let registry = Arc::clone(&registry);
        let r = r.clone();
        tasks.push(tokio::spawn(async move {
            registry.join_room(&r, name(&format!("p{i}"))).await
        }));
    }
    let dealt: usize = {
        let mut total = 0;
        for task in tasks {
            total += task.await.unwrap().unwrap();
        }
        total
    };

    let info = registry.room_info(&r).await.unwrap();
    assert_eq!(info.players.len(), 21);
    let deck_len = registry.find(&r).await.unwrap().read().await.deck().len();
    assert_eq!(deck_len + dealt + 2, 49);
    assert_conserved(&registry, &r).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_joins_admit_one() {
    let registry = Arc::new(RoomRegistry::new());
    let r = code("R");
    registry.create_room(r.clone(), size(5), name("host")).await.unwrap();

    let mut tasks = Vec::new();
    for _ in 0..10 {
        let registry = Arc::clone(&registry);
        let r = r.clone();
        tasks.push(tokio::spawn(async move {
            registry.join_room(&r, name("twin")).await
        }));
    }
    let mut ok = 0;
    for task in tasks {
        if task.await.unwrap().is_ok() {
            ok += 1;
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(registry.room_info(&r).await.unwrap().players.len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_play_and_reads_across_rooms() {
    let registry = Arc::new(RoomRegistry::new());
    let rooms: Vec<RoomCode> = (0..4).map(|i| code(&format!("R{i}"))).collect();
    for r in &rooms {
        registry.create_room(r.clone(), size(4), name("A")).await.unwrap();
        registry.join_room(r, name("B")).await.unwrap();
        registry.join_room(r, name("C")).await.unwrap();
        registry.start_game(r).await.unwrap();
    }

    let mut tasks = Vec::new();
    for r in &rooms {
        for p in ["A", "B", "C"] {
            let registry = Arc::clone(&registry);
            let r = r.clone();
            tasks.push(tokio::spawn(async move {
                loop {
                    let view = registry.get_state(&r, &name(p)).await.unwrap();
                    if view.game_over {
                        return;
                    }
                    let Some(card) = view.player_cards.first().copied() else {
                        tokio::task::yield_now().await;
                        continue;
                    };
                    match registry
                        .submit_guess(&r, &name(p), card.row, card.column, true)
                        .await
                    {
                        Ok(_) | Err(RoomError::GameOver(_)) => {}
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
            }));
        }
    }
    for task in tasks {
        task.await.unwrap();
    }

    for r in &rooms {
        let view = registry.get_state(r, &name("A")).await.unwrap();
        assert!(view.game_over);
        assert_eq!(view.correct_guesses, 16);
        assert_conserved(&registry, r).await;
    }
}

//! Integration tests for the game controller

use tui_memory::core::{ordered_deck, Game, GameConfig, GameEvent, IgnoreReason, Palette, SelectOutcome};
use tui_memory::types::{GameAction, Phase, Symbol, TileId, CLOCK_TICK_MS, MISMATCH_REVEAL_MS};

fn config(palette: &str, seed: u64) -> GameConfig {
    GameConfig::default()
        .with_palette(Palette::parse(palette).unwrap())
        .with_seed(seed)
}

/// Unshuffled board: the palette twice, ids in board order.
fn ordered_game(palette: &str) -> Game {
    let config = config(palette, 1);
    let deck = ordered_deck(&config.palette);
    Game::with_deck(&config, deck)
}

/// Board `[A, B, A, B]` with ids 0..3.
fn abab_game() -> Game {
    ordered_game("A,B")
}

fn flipped(game: &Game, id: u32) -> bool {
    game.session().tile(TileId(id)).unwrap().is_flipped
}

fn matched(game: &Game, id: u32) -> bool {
    game.session().tile(TileId(id)).unwrap().is_matched
}

/// Pick every pair of a shuffled board by looking at the symbols.
fn solve(game: &mut Game) {
    let tiles = game.session().tiles().to_vec();
    for (i, a) in tiles.iter().enumerate() {
        if a.is_matched {
            continue;
        }
        if let Some(b) = tiles[i + 1..].iter().find(|b| b.symbol == a.symbol) {
            assert!(game.select_tile(a.unique_id).accepted());
            assert!(game.select_tile(b.unique_id).accepted());
            game.advance(250);
        }
    }
}

#[test]
fn test_two_symbol_scenario() {
    let mut game = abab_game();

    // select(0): one face-up tile, no move yet.
    assert!(matches!(game.select_tile(TileId(0)), SelectOutcome::Revealed(_)));
    assert!(flipped(&game, 0));
    assert_eq!(game.session().selection().len(), 1);
    assert_eq!(game.session().move_count(), 0);

    // select(1): A vs B mismatch, counted, board locked.
    assert!(matches!(game.select_tile(TileId(1)), SelectOutcome::Mismatched(_)));
    assert!(flipped(&game, 1));
    assert_eq!(game.session().move_count(), 1);
    assert!(game.session().input_locked());
    assert_eq!(game.session().phase(), Phase::Resolving);

    // Both flip back after the delay.
    game.advance(MISMATCH_REVEAL_MS);
    assert!(!flipped(&game, 0));
    assert!(!flipped(&game, 1));
    assert!(!game.session().input_locked());

    // select(0), select(2): A vs A.
    game.select_tile(TileId(0));
    assert!(matches!(
        game.select_tile(TileId(2)),
        SelectOutcome::Matched { won: false, .. }
    ));
    assert_eq!(game.session().matches_found(), 1);
    assert_eq!(game.session().move_count(), 2);
    assert!(matched(&game, 0) && matched(&game, 2));

    // select(1), select(3): B vs B wins.
    game.select_tile(TileId(1));
    assert!(matches!(
        game.select_tile(TileId(3)),
        SelectOutcome::Matched { won: true, .. }
    ));
    assert_eq!(game.session().matches_found(), game.session().total_pairs());
    assert!(game.session().is_won());
    assert_eq!(game.session().phase(), Phase::Won);
}

#[test]
fn test_move_count_only_on_pairs() {
    let mut game = abab_game();
    game.select_tile(TileId(0));
    assert_eq!(game.session().move_count(), 0);
    game.select_tile(TileId(1));
    assert_eq!(game.session().move_count(), 1);

    // Rejected while locked: no change.
    game.select_tile(TileId(2));
    assert_eq!(game.session().move_count(), 1);
}

#[test]
fn test_matched_tile_is_inert() {
    let mut game = abab_game();
    game.select_tile(TileId(0));
    game.select_tile(TileId(2));
    let before = game.snapshot();

    assert_eq!(
        game.select_tile(TileId(0)),
        SelectOutcome::Ignored(IgnoreReason::AlreadyMatched)
    );
    let after = game.snapshot();
    assert_eq!(before.tiles, after.tiles);
    assert_eq!(before.move_count, after.move_count);
    assert_eq!(game.session().selection().len(), 0);
}

#[test]
fn test_unknown_tile_is_ignored() {
    let mut game = abab_game();
    assert_eq!(
        game.select_tile(TileId(99)),
        SelectOutcome::Ignored(IgnoreReason::UnknownTile)
    );
    assert!(!game.session().started());
}

#[test]
fn test_win_stops_clock_and_input() {
    let mut game = Game::new(&config("A,B,C,D", 42));
    let first = game.session().tiles()[0].unique_id;
    game.select_tile(first);
    game.advance(CLOCK_TICK_MS * 3);
    assert_eq!(game.session().elapsed_seconds(), 3);

    // Finish the open pair, then the rest of the board.
    let open = game.session().tiles()[0];
    let mate = game
        .session()
        .tiles()
        .iter()
        .find(|t| t.symbol == open.symbol && t.unique_id != open.unique_id)
        .copied()
        .unwrap();
    game.select_tile(mate.unique_id);
    solve(&mut game);
    assert!(game.session().is_won());

    let elapsed = game.session().elapsed_seconds();
    game.advance(CLOCK_TICK_MS * 10);
    assert_eq!(game.session().elapsed_seconds(), elapsed);
    assert_eq!(game.pending_timers(), 0);

    let id = game.session().tiles()[1].unique_id;
    assert_eq!(game.select_tile(id), SelectOutcome::Ignored(IgnoreReason::GameWon));
    assert!(game.can_reset());
}

#[test]
fn test_reset_is_complete() {
    // [A, B, C, A, B, C]
    let mut game = ordered_game("A,B,C");
    game.select_tile(TileId(0));
    game.select_tile(TileId(3));
    game.advance(CLOCK_TICK_MS * 2 + 10);
    game.select_tile(TileId(1));
    game.select_tile(TileId(2));
    assert!(!game.can_reset());

    // A mismatch is on display; the controller resets anyway.
    assert!(game.apply_action(GameAction::Reset));

    let s = game.session();
    assert_eq!(s.move_count(), 0);
    assert_eq!(s.matches_found(), 0);
    assert_eq!(s.elapsed_seconds(), 0);
    assert!(!s.started());
    assert!(!s.input_locked());
    assert!(s.tiles().iter().all(|t| !t.is_flipped && !t.is_matched));
    assert_eq!(s.epoch(), 1);

    // Nothing scheduled under the old epoch can reach the new board.
    let before = game.snapshot();
    game.advance(MISMATCH_REVEAL_MS * 5);
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_reset_after_mismatch_does_not_conceal_new_selection() {
    let mut game = Game::new(&config("A,B,C", 9));
    let tiles = game.session().tiles().to_vec();
    let a = tiles[0];
    let b = tiles.iter().find(|t| t.symbol != a.symbol).copied().unwrap();
    game.select_tile(a.unique_id);
    game.select_tile(b.unique_id);
    game.advance(MISMATCH_REVEAL_MS / 2);

    game.request_reset();
    let first = game.session().tiles()[0].unique_id;
    game.select_tile(first);

    // The old reveal would have been due here.
    game.advance(MISMATCH_REVEAL_MS);
    assert!(game.session().tile(first).unwrap().is_flipped);
}

#[test]
fn test_same_seed_same_games() {
    let mut a = Game::new(&config("☾,★,◉,▲", 77));
    let mut b = Game::new(&config("☾,★,◉,▲", 77));
    assert_eq!(a.snapshot(), b.snapshot());

    a.request_reset();
    b.request_reset();
    assert_eq!(a.snapshot().tiles, b.snapshot().tiles);
}

#[test]
fn test_event_stream_for_full_game() {
    let mut game = abab_game();
    game.select_tile(TileId(0));
    game.select_tile(TileId(1));
    game.advance(MISMATCH_REVEAL_MS);
    game.select_tile(TileId(0));
    game.select_tile(TileId(2));
    game.select_tile(TileId(1));
    game.select_tile(TileId(3));

    let kinds: Vec<&'static str> = game
        .drain_events()
        .map(|e| match e {
            GameEvent::Dealt { .. } => "dealt",
            GameEvent::Selected { .. } => "selected",
            GameEvent::Ignored { .. } => "ignored",
            GameEvent::Matched { .. } => "matched",
            GameEvent::Mismatched { .. } => "mismatched",
            GameEvent::Concealed { .. } => "concealed",
            GameEvent::Won { .. } => "won",
            GameEvent::Reset { .. } => "reset",
            GameEvent::StaleTimer { .. } => "staleTimer",
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            "dealt",
            "selected",
            "selected",
            "mismatched",
            "concealed",
            "selected",
            "selected",
            "matched",
            "selected",
            "selected",
            "matched",
            "won",
        ]
    );
    assert_eq!(game.drain_events().count(), 0);
}

#[test]
fn test_action_strings_drive_game() {
    let mut game = abab_game();
    for line in ["select:0", "SELECT:2"] {
        let action = GameAction::from_str(line).unwrap();
        game.apply_action(action);
    }
    assert_eq!(game.session().matches_found(), 1);
    assert_eq!(game.session().tile(TileId(0)).unwrap().symbol, Symbol::new('A'));
}

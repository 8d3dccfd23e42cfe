//! Integration tests for the engine through the facade crate

use blockdrop::core::{Engine, EngineConfig, FrameInput, Grid, StepOutcome};
use blockdrop::input::InputHandler;
use blockdrop::types::{Cell, GameAction, GameStatus, PieceKind, TopOut, TICK_MS};

fn engine_with_piece(kind: PieceKind) -> Engine {
    let config = EngineConfig::default();
    let grid = Grid::new(config.grid_width, config.grid_height).unwrap();
    Engine::with_first_kind(config, grid, 12345, kind).unwrap()
}

fn drop_until_locked(engine: &mut Engine) -> StepOutcome {
    loop {
        match engine.gravity_step() {
            StepOutcome::Advanced => continue,
            other => return other,
        }
    }
}

#[test]
fn test_game_lifecycle() {
    let mut engine = Engine::new(EngineConfig::default(), 12345).unwrap();
    assert_eq!(engine.status(), GameStatus::Playing);
    assert_eq!(engine.pieces_spawned(), 1);

    engine.apply_action(GameAction::Restart);
    assert_eq!(engine.status(), GameStatus::Playing);
    assert_eq!(engine.session_id(), 1);
}

#[test]
fn test_square_reaches_floor_in_21_steps() {
    let mut engine = engine_with_piece(PieceKind::O);
    assert_eq!((engine.active().x, engine.active().y), (6, 0));
    assert_eq!(engine.pieces_spawned(), 1);

    for _ in 0..21 {
        assert_eq!(engine.gravity_step(), StepOutcome::Advanced);
    }
    assert_eq!(engine.active().y, 21);
    assert!(!engine.collides());

    assert!(matches!(engine.gravity_step(), StepOutcome::Locked(_)));
    assert_eq!(engine.grid().cell(5, 21), Some(Cell::Locked(PieceKind::O)));
    assert_eq!(engine.grid().cell(6, 20), Some(Cell::Locked(PieceKind::O)));
}

#[test]
fn test_filling_last_gap_clears_row_and_shifts() {
    let mut grid = Grid::new(12, 22).unwrap();
    for x in 1..11 {
        if x != 6 {
            grid.place(x, 21, PieceKind::L);
        }
    }
    grid.place(2, 20, PieceKind::S);
    // T points down at the pivot column: its stem fills (6, 21).
    let mut engine =
        Engine::with_first_kind(EngineConfig::default(), grid, 9, PieceKind::T).unwrap();
    let before = engine.grid().filled_interior_count();

    let outcome = drop_until_locked(&mut engine);
    assert!(
        matches!(outcome, StepOutcome::Locked(ev) if ev.lines_cleared == 1),
        "{:?}",
        outcome
    );

    assert_eq!(engine.grid().filled_interior_count(), before + 4 - 10);
    // S cell shifted down from row 20 to 21.
    assert_eq!(engine.grid().cell(2, 21), Some(Cell::Locked(PieceKind::S)));
    // The T's bar (was row 20) is now on row 21.
    for x in 5..=7 {
        assert_eq!(engine.grid().cell(x, 21), Some(Cell::Locked(PieceKind::T)));
    }
}

#[test]
fn test_move_left_at_wall_keeps_position() {
    let mut engine = engine_with_piece(PieceKind::T);
    while engine.move_left() {}
    let before = *engine.active();
    let min_x = before.cells().iter().map(|&(x, _)| x).min().unwrap();
    assert_eq!(min_x, 1);

    assert!(!engine.move_left());
    assert_eq!(*engine.active(), before);
}

#[test]
fn test_stacking_ends_in_game_over() {
    let mut engine = Engine::new(EngineConfig::default(), 4242).unwrap();
    let mut steps = 0;
    while !engine.is_over() {
        engine.gravity_step();
        steps += 1;
        assert!(steps < 10_000, "stacking in one column must top out");
    }
    assert!(matches!(
        engine.status(),
        GameStatus::GameOver(TopOut::BlockOut) | GameStatus::GameOver(TopOut::LockOut)
    ));

    // Dead engine ignores everything until reset.
    let before = engine.snapshot();
    assert!(!engine.apply_action(GameAction::MoveLeft));
    assert!(!engine.apply_action(GameAction::SoftDrop));
    assert_eq!(engine.snapshot(), before);

    assert!(engine.apply_action(GameAction::Restart));
    assert!(!engine.is_over());
    assert_eq!(engine.grid().filled_interior_count(), 0);
}

#[test]
fn test_same_seed_replays_identically() {
    let run = |seed| {
        let mut engine = Engine::new(EngineConfig::default(), seed).unwrap();
        let mut kinds = Vec::new();
        for i in 0..2_000u32 {
            let input = FrameInput {
                move_left: i % 7 == 0,
                move_right: i % 11 == 0,
                rotate: i % 5 == 0,
                soft_drop: i % 3 == 0,
            };
            engine.frame(TICK_MS, input);
            if let Some(ev) = engine.take_last_event() {
                kinds.push(ev.kind);
            }
        }
        (kinds, engine.snapshot())
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn test_input_handler_drives_engine() {
    use crossterm::event::{KeyCode, KeyEvent};

    let mut engine = engine_with_piece(PieceKind::T);
    let mut input = InputHandler::new();
    let start_x = engine.active().x;

    input.handle_key_event(KeyEvent::from(KeyCode::Left));
    engine.frame(TICK_MS, input.take_frame(TICK_MS));
    assert_eq!(engine.active().x, start_x - 1);

    // Held soft drop switches the engine to the fast interval.
    input.handle_key_event(KeyEvent::from(KeyCode::Down));
    let y = engine.active().y;
    for _ in 0..4 {
        engine.frame(TICK_MS, input.take_frame(TICK_MS));
    }
    assert!(engine.soft_drop());
    assert!(engine.active().y > y);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = EngineConfig {
        fast_drop_ms: 0,
        ..EngineConfig::default()
    };
    assert!(Engine::new(config, 1).is_err());
}

//! Terminal blockdrop runner (default binary).
//!
//! Reads `BLOCKDROP_*` configuration from the environment, then runs the
//! fixed-timestep loop: poll input until the next tick, advance the engine
//! one frame, render the snapshot. `BLOCKDROP_SEED` pins the piece sequence;
//! otherwise the wall clock seeds it.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use blockdrop::core::{Engine, EngineConfig, EngineSnapshot};
use blockdrop::event_log::{EventLog, EventRecord};
use blockdrop::input::{should_quit, InputHandler};
use blockdrop::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockdrop::types::{GameAction, GameStatus, TICK_MS};

const ENV_SEED: &str = "BLOCKDROP_SEED";

fn main() -> Result<()> {
    let config = EngineConfig::from_env().context("invalid configuration")?;
    let seed = seed_from_env()?;
    let mut log = EventLog::from_env().context("cannot open event log")?;

    eprintln!(
        "[Game] grid {}x{}, drop {}ms (fast {}ms), rotate cooldown {}ms, seed {}",
        config.grid_width,
        config.grid_height,
        config.drop_ms,
        config.fast_drop_ms,
        config.rotate_cooldown_ms,
        seed
    );

    let mut engine = Engine::new(config, seed)?;
    log.record(&EventRecord::Start {
        seed,
        width: config.grid_width,
        height: config.grid_height,
    });

    let mut term = TerminalRenderer::new();
    let result = term
        .enter()
        .and_then(|()| run(&mut term, &mut engine, &mut log));

    // Always try to restore terminal state.
    let _ = term.exit();

    log.flush();
    if let Some(err) = log.take_error() {
        eprintln!("[Game] event log disabled after write error: {}", err);
    }
    eprintln!(
        "[Game] exit: {}, {} pieces, {} lines",
        match engine.status() {
            GameStatus::Playing => "playing",
            GameStatus::GameOver(reason) => reason.as_str(),
        },
        engine.pieces_spawned(),
        engine.lines_cleared()
    );
    result
}

fn seed_from_env() -> Result<u32> {
    match std::env::var(ENV_SEED) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value {:?} for {}", raw, ENV_SEED)),
        _ => Ok(clock_seed()),
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, engine: &mut Engine, log: &mut EventLog) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = EngineSnapshot::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        engine.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        return Ok(());
                    }
                    if let Some(GameAction::Restart) = input.handle_key_event(key) {
                        engine.reset();
                        input.reset();
                        log.record(&EventRecord::Reset {
                            session: engine.session_id(),
                        });
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            let was_over = engine.is_over();
            let frame = input.take_frame(TICK_MS);
            engine.frame(TICK_MS, frame);

            if let Some(lock) = engine.take_last_event() {
                log.record(&EventRecord::lock(engine, lock));
            }
            if let (false, GameStatus::GameOver(reason)) = (was_over, engine.status()) {
                log.record(&EventRecord::game_over(engine, reason));
                log.flush();
            }
        }
    }
}

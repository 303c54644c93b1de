//! Terminal memory game runner (default binary).
//!
//! Reads configuration from the environment, then runs the game loop:
//! poll input until the next frame, advance the controller by the elapsed
//! time, journal the drained events and redraw when the frame changed.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_memory::core::{Game, GameConfig, GameSnapshot};
use tui_memory::input::{handle_key_event, should_quit, BoardCursor, UiCommand};
use tui_memory::journal::Journal;
use tui_memory::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use tui_memory::types::{GameAction, CLOCK_TICK_MS, FRAME_MS};

fn main() -> Result<()> {
    // Configuration errors are reported before the terminal is taken over.
    let config = GameConfig::from_env().context("invalid configuration")?;
    let mut journal = Journal::start_from_env()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, journal.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(journal) = journal {
        journal.shutdown()?;
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &GameConfig, mut journal: Option<&mut Journal>) -> Result<()> {
    let mut game = Game::new(config);
    let view = GameView::new(config.columns);
    let mut cursor = BoardCursor::new(config.columns);
    let mut throttle = RenderThrottle::new(u64::from(CLOCK_TICK_MS));

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);
    let mut snap = GameSnapshot::default();

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let frame = Duration::from_millis(u64::from(FRAME_MS));

    loop {
        let now_ms = started.elapsed().as_millis() as u64;

        // Journal.
        let events = game.drain_events();
        match journal.as_deref_mut() {
            Some(journal) => journal.record_all(now_ms, events),
            None => drop(events),
        }

        // Render.
        game.snapshot_into(&mut snap);
        cursor.clamp(snap.tiles.len());
        if throttle.should_render(now_ms, &snap, cursor.index()) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, Some(cursor.index()), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next frame.
        let timeout = frame.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }

                    match handle_key_event(key) {
                        Some(UiCommand::Cursor(dir)) => cursor.step(dir, snap.tiles.len()),
                        Some(UiCommand::Confirm) => {
                            if let Some(action) = cursor.confirm(&snap) {
                                game.apply_action(action);
                            }
                        }
                        Some(UiCommand::Reset) => {
                            // The reset control is disabled while a mismatch is on display.
                            if game.can_reset() {
                                game.apply_action(GameAction::Reset);
                            }
                        }
                        None => {}
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
        }

        // Tick. Only whole milliseconds are consumed so the clock does not drift.
        let elapsed_ms = last_tick.elapsed().as_millis() as u32;
        if elapsed_ms >= FRAME_MS {
            last_tick += Duration::from_millis(u64::from(elapsed_ms));
            game.advance(elapsed_ms);
        }
    }
}

//! DAS/ARR input handler for terminal environments.
//!
//! Key presses are folded into a per-frame [`FrameInput`]. A first press moves
//! at once, a held direction repeats after the DAS delay at the ARR rate, and
//! soft drop stays held while presses keep arriving. Terminals that never send
//! key-release events are handled with a release timeout.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::core::FrameInput;
use crate::map::handle_key_event;
use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_GRACE_MS};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    pending_left: bool,
    pending_right: bool,
    pending_rotate: bool,
    /// Time since the last movement or soft-drop press.
    since_last_key_ms: u32,
    das_timer: u32,
    arr_accumulator: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            pending_left: false,
            pending_right: false,
            pending_rotate: false,
            since_last_key_ms: 0,
            das_timer: 0,
            arr_accumulator: 0,
            das_delay,
            arr_rate: arr_rate.max(1),
            key_release_timeout_ms: SOFT_DROP_GRACE_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    pub fn soft_drop_held(&self) -> bool {
        self.down_held
    }

    /// Route a key event. Release events clear held state; press and repeat
    /// events are absorbed into the next frame. Actions the handler does not
    /// own (restart) are returned to the caller.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<GameAction> {
        if key.kind == KeyEventKind::Release {
            if let Some(action) = handle_key_event(key) {
                self.handle_release(action);
            }
            return None;
        }
        self.handle_press(handle_key_event(key)?)
    }

    pub fn handle_press(&mut self, action: GameAction) -> Option<GameAction> {
        match action {
            GameAction::MoveLeft => {
                self.since_last_key_ms = 0;
                if self.horizontal != HorizontalDirection::Left {
                    self.horizontal = HorizontalDirection::Left;
                    self.das_timer = 0;
                    self.arr_accumulator = 0;
                    self.pending_left = true;
                }
                None
            }
            GameAction::MoveRight => {
                self.since_last_key_ms = 0;
                if self.horizontal != HorizontalDirection::Right {
                    self.horizontal = HorizontalDirection::Right;
                    self.das_timer = 0;
                    self.arr_accumulator = 0;
                    self.pending_right = true;
                }
                None
            }
            GameAction::SoftDrop => {
                self.since_last_key_ms = 0;
                self.down_held = true;
                None
            }
            GameAction::RotateCw => {
                self.pending_rotate = true;
                None
            }
            GameAction::Restart => Some(GameAction::Restart),
        }
    }

    pub fn handle_release(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft if self.horizontal == HorizontalDirection::Left => {
                self.release_horizontal();
            }
            GameAction::MoveRight if self.horizontal == HorizontalDirection::Right => {
                self.release_horizontal();
            }
            GameAction::SoftDrop => self.down_held = false,
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    /// Drain the input for one frame of `elapsed_ms`.
    pub fn take_frame(&mut self, elapsed_ms: u32) -> FrameInput {
        self.since_last_key_ms = self.since_last_key_ms.saturating_add(elapsed_ms);

        // Auto-release when the terminal does not emit release events.
        if self.since_last_key_ms > self.key_release_timeout_ms {
            if self.horizontal != HorizontalDirection::None {
                self.release_horizontal();
            }
            self.down_held = false;
        }

        let mut input = FrameInput {
            move_left: std::mem::take(&mut self.pending_left),
            move_right: std::mem::take(&mut self.pending_right),
            rotate: std::mem::take(&mut self.pending_rotate),
            soft_drop: self.down_held,
        };

        if self.horizontal != HorizontalDirection::None && self.repeat_due(elapsed_ms) {
            match self.horizontal {
                HorizontalDirection::Left => input.move_left = true,
                HorizontalDirection::Right => input.move_right = true,
                HorizontalDirection::None => {}
            }
        }

        input
    }

    /// Advance DAS/ARR timers; true when a repeat fires this frame.
    fn repeat_due(&mut self, elapsed_ms: u32) -> bool {
        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < self.das_delay {
            return false;
        }

        let excess = if prev_das < self.das_delay {
            self.das_timer - self.das_delay
        } else {
            elapsed_ms
        };
        self.arr_accumulator += excess;
        if self.arr_accumulator < self.arr_rate {
            return false;
        }
        // The engine applies at most one move per frame, so drop any backlog.
        self.arr_accumulator %= self.arr_rate;
        true
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.down_held = false;
        self.pending_left = false;
        self.pending_right = false;
        self.pending_rotate = false;
        self.since_last_key_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

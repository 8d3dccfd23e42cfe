//! Append-only JSON-lines event log.
//!
//! Enabled by `BLOCKDROP_LOG_PATH`. One object per line, tagged by `event`:
//!
//! ```text
//! {"event":"start","seed":42,"width":12,"height":22}
//! {"event":"lock","session":0,"piece":3,"kind":"t","lines_cleared":1}
//! {"event":"game_over","session":0,"reason":"lockOut","pieces":57,"lines":12}
//! {"event":"reset","session":1}
//! ```
//!
//! The log never interrupts the game: the first write error disables it and
//! is kept for the caller to report after the terminal is restored.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};

use serde::Serialize;

use crate::core::{Engine, LockEvent};
use crate::types::TopOut;

pub const ENV_LOG_PATH: &str = "BLOCKDROP_LOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventRecord {
    Start {
        seed: u32,
        width: u16,
        height: u16,
    },
    Lock {
        session: u32,
        piece: u32,
        kind: &'static str,
        lines_cleared: usize,
    },
    GameOver {
        session: u32,
        reason: &'static str,
        pieces: u32,
        lines: u32,
    },
    Reset {
        session: u32,
    },
}

impl EventRecord {
    pub fn lock(engine: &Engine, event: LockEvent) -> Self {
        EventRecord::Lock {
            session: engine.session_id(),
            piece: event.piece,
            kind: event.kind.as_str(),
            lines_cleared: event.lines_cleared,
        }
    }

    pub fn game_over(engine: &Engine, reason: TopOut) -> Self {
        EventRecord::GameOver {
            session: engine.session_id(),
            reason: reason.as_str(),
            pieces: engine.pieces_spawned(),
            lines: engine.lines_cleared(),
        }
    }
}

pub struct EventLog<W: Write = BufWriter<File>> {
    sink: Option<W>,
    buf: Vec<u8>,
    error: Option<io::Error>,
}

impl EventLog<BufWriter<File>> {
    /// Open the file named by `BLOCKDROP_LOG_PATH`, if set and non-empty.
    pub fn from_env() -> io::Result<Self> {
        let path = std::env::var(ENV_LOG_PATH)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        match path {
            Some(path) => Self::open(&path),
            None => Ok(Self::disabled()),
        }
    }

    pub fn open(path: &str) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::with_writer(BufWriter::new(file)))
    }

    pub fn disabled() -> Self {
        Self {
            sink: None,
            buf: Vec::new(),
            error: None,
        }
    }
}

impl<W: Write> EventLog<W> {
    pub fn with_writer(sink: W) -> Self {
        Self {
            sink: Some(sink),
            buf: Vec::with_capacity(256),
            error: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn record(&mut self, record: &EventRecord) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        self.buf.clear();
        if let Err(e) = serde_json::to_writer(&mut self.buf, record) {
            self.error = Some(e.into());
            self.sink = None;
            return;
        }
        self.buf.push(b'\n');
        if let Err(e) = sink.write_all(&self.buf) {
            self.error = Some(e);
            self.sink = None;
        }
    }

    /// Flush buffered lines; errors disable the log like write errors do.
    pub fn flush(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            if let Err(e) = sink.flush() {
                self.error = Some(e);
                self.sink = None;
            }
        }
    }

    /// The write error that disabled the log, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> Option<W> {
        self.sink
    }
}

//! Logging utilities and structured logging support
//!
//! Output goes through the `log` facade (`env_logger` backend). On top of
//! that, [`Logger`] provides named, maskable sinks with the engine's five
//! levels. Emitting at the error level raises the shared [`FatalFlag`],
//! which the frame loop checks once per iteration; error is a "stop the
//! world" channel, not a recoverable error path.

use std::cell::Cell;
use std::rc::Rc;

use bitflags::bitflags;

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging backend.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let _ = env_logger::try_init();
}

bitflags! {
    /// Which levels a [`Logger`] actually emits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LevelMask: u32 {
        /// Diagnostic chatter
        const DEBUG = 1;
        /// Plain progress messages
        const LOG = 1 << 1;
        /// Something looks wrong but the frame can continue
        const WARNING = 1 << 2;
        /// Something is badly wrong but the frame can continue
        const CRITICAL = 1 << 3;
        /// Fatal; raises the shared fatal flag
        const ERROR = 1 << 4;
    }
}

impl Default for LevelMask {
    fn default() -> Self {
        Self::all()
    }
}

/// Shared "stop the world" flag raised by error-level log emission.
///
/// Cheap to clone; all clones observe the same state. Single-threaded by
/// design, like the rest of the engine.
#[derive(Debug, Clone, Default)]
pub struct FatalFlag(Rc<Cell<bool>>);

impl FatalFlag {
    /// Create a new, lowered flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request termination of the frame loop
    pub fn raise(&self) {
        self.0.set(true);
    }

    /// Whether termination has been requested
    pub fn is_raised(&self) -> bool {
        self.0.get()
    }
}

/// A named, leveled log sink
///
/// Levels map onto the `log` facade: debug → `debug!`, log → `info!`,
/// warning → `warn!`, critical and error → `error!`. Messages whose level
/// is masked out are dropped; [`Logger::error`] raises the fatal flag even
/// when masked.
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    mask: LevelMask,
    fatal: FatalFlag,
}

impl Logger {
    /// Create a logger emitting every level
    pub fn new(name: impl Into<String>, fatal: FatalFlag) -> Self {
        Self::with_mask(name, LevelMask::all(), fatal)
    }

    /// Create a logger with an explicit level mask
    pub fn with_mask(name: impl Into<String>, mask: LevelMask, fatal: FatalFlag) -> Self {
        Self {
            name: name.into(),
            mask,
            fatal,
        }
    }

    /// The sink's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current level mask
    pub fn mask(&self) -> LevelMask {
        self.mask
    }

    /// Replace the level mask
    pub fn set_mask(&mut self, mask: LevelMask) {
        self.mask = mask;
    }

    /// Emit a debug message
    pub fn debug(&self, msg: &str) {
        if self.mask.contains(LevelMask::DEBUG) {
            log::debug!("[{}] {}", self.name, msg);
        }
    }

    /// Emit a plain message
    pub fn log(&self, msg: &str) {
        if self.mask.contains(LevelMask::LOG) {
            log::info!("[{}] {}", self.name, msg);
        }
    }

    /// Emit a warning
    pub fn warn(&self, msg: &str) {
        if self.mask.contains(LevelMask::WARNING) {
            log::warn!("[{}] <WARNING> {}", self.name, msg);
        }
    }

    /// Emit a critical message
    pub fn crit(&self, msg: &str) {
        if self.mask.contains(LevelMask::CRITICAL) {
            log::error!("[{}] <CRITICAL> {}", self.name, msg);
        }
    }

    /// Emit an error and request termination of the frame loop
    pub fn error(&self, msg: &str) {
        if self.mask.contains(LevelMask::ERROR) {
            log::error!("[{}] <ERROR> {}", self.name, msg);
        }
        self.fatal.raise();
    }
}

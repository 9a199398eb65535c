//! Boot level taxonomy.
//!
//! Levels form a closed, totally ordered set. The order is fixed here and
//! every collection backend dispatches in exactly this order; call sites only
//! choose which level a function belongs to.

use core::fmt;

/// A stage of the boot sequence.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Basic setup, such as bringing up the log backend.
    Setup = 0,
    /// Board bring-up: clocks, heap, system services.
    Board = 1,
    /// Pre-initialization of abstraction layers (HAL and friends).
    PreComponent = 2,
    /// Undo setup-only work the application does not need.
    Cleanup = 3,
    /// Peripheral devices.
    Device = 4,
    /// External components.
    Component = 5,
    /// Environment, e.g. file systems.
    Environment = 6,
    /// Application entry points.
    Application = 7,
}

impl Level {
    pub const COUNT: usize = 8;

    /// Every level in dispatch order.
    pub const ALL: [Level; Level::COUNT] = [
        Level::Setup,
        Level::Board,
        Level::PreComponent,
        Level::Cleanup,
        Level::Device,
        Level::Component,
        Level::Environment,
        Level::Application,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Level> {
        if index < Level::COUNT {
            Some(Level::ALL[index])
        } else {
            None
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Level::Setup => "setup",
            Level::Board => "board",
            Level::PreComponent => "pre_component",
            Level::Cleanup => "cleanup",
            Level::Device => "device",
            Level::Component => "component",
            Level::Environment => "environment",
            Level::Application => "application",
        }
    }

    /// The level dispatched after this one, `None` for the last level.
    pub const fn next(self) -> Option<Level> {
        Level::from_index(self.index() + 1)
    }

    pub const fn is_last(self) -> bool {
        self.index() + 1 == Level::COUNT
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

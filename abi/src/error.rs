//! Errors shared by the registry and the backends

use crate::level::Level;

/// Errors raised while linking a step into a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    /// The node is already in a level list. Registering the same call site
    /// twice is a caller bug; the first registration stays in effect.
    #[error("`{name}` is already registered, ignored second registration at level {level}")]
    AlreadyRegistered { level: Level, name: &'static str },
}

pub type RegisterResult = Result<(), RegisterError>;

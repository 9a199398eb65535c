//! Bootstage shared types
//!
//! This crate holds the definitions every other bootstage crate agrees on:
//! the fixed level taxonomy, the initializer descriptor and the error and
//! status conventions. Keeping them here lets call sites and the dispatcher
//! share one vocabulary without either depending on the other.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod error;
pub mod level;
pub mod step;

pub use error::*;
pub use level::*;
pub use step::*;

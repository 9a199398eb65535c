//! Staged boot initialization.
//!
//! Initializers are exported at one of eight [`Level`]s with the
//! `export_*!` macros and run exactly once per pass, level by level, by a
//! [`Dispatcher`]. How the exported initializers are found is decided when
//! this crate is built (`BOOTSTAGE_BACKEND`), see [`config`].

#![cfg_attr(not(test), no_std)]

#[cfg(not(any(
    bootstage_backend = "section",
    bootstage_backend = "load_time",
    bootstage_backend = "registry"
)))]
compile_error!("no bootstage backend selected; build through cargo so build.rs can run");

pub mod backend;
pub mod config;
pub mod dispatcher;
pub mod export;
pub mod registry;

pub use bootstage_abi::{
    INIT_OK, InitFn, InitStep, Level, RegisterError, RegisterResult, StepOutcome,
};

pub use backend::StepSource;
pub use config::{ACTIVE_BACKEND, BackendKind};
pub use dispatcher::{BootHooks, DispatchState, Dispatcher, LevelSummary, RunSummary};
pub use export::ActiveBackend;
pub use registry::{LevelSteps, StepNode, StepRegistry};

#[doc(hidden)]
pub mod __private {
    pub use bootstage_lib::paste;
    pub use ctor;
    pub use linkme;
    pub use linkme::distributed_slice;
}

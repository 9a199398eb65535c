//! Load-time constructor backend.
//!
//! Call sites expand to a constructor that runs before `main` and links its
//! node into [`LOAD_TIME_STEPS`]. The platform decides the order in which
//! constructors from different objects run, so the only promises are FIFO
//! within a level (in whatever order registration happened) and the fixed
//! level order across levels.

use bootstage_abi::{InitStep, Level};
use bootstage_lib::klog_error;

use super::StepSource;
use crate::config::BackendKind;
use crate::registry::{StepNode, StepRegistry};

/// Registry filled by load-time constructors.
pub static LOAD_TIME_STEPS: StepRegistry = StepRegistry::new();

/// Called from generated constructors. Linking cannot fail for a fresh node;
/// a node registered twice is reported and keeps its first position.
pub fn register(node: &'static StepNode, level: Level) {
    if let Err(err) = LOAD_TIME_STEPS.register(node, level) {
        klog_error!("[boot:load-time] {}", err);
    }
}

pub struct LoadTimeBackend {
    registry: &'static StepRegistry,
}

impl LoadTimeBackend {
    pub const fn new() -> Self {
        Self {
            registry: &LOAD_TIME_STEPS,
        }
    }

    /// Backend reading some other static registry.
    pub const fn with_registry(registry: &'static StepRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'static StepRegistry {
        self.registry
    }
}

impl Default for LoadTimeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StepSource for LoadTimeBackend {
    const KIND: BackendKind = BackendKind::LoadTime;

    fn level_steps(&self, level: Level) -> impl Iterator<Item = &'static InitStep> + '_ {
        self.registry.steps(level)
    }
}

/// Register `$func` at `$level` from a load-time constructor.
#[macro_export]
macro_rules! load_time_step {
    ($level:ident, $func:ident) => {
        $crate::__private::paste::paste! {
            #[$crate::__private::ctor::ctor(crate_path = $crate::__private::ctor)]
            #[doc(hidden)]
            unsafe fn [<__bootstage_load_time_ $func>]() {
                const STEP: $crate::InitStep =
                    $crate::InitStep::new($func, ::core::stringify!($func));
                static NODE: $crate::registry::StepNode = $crate::registry::StepNode::new(STEP);
                $crate::backend::load_time::register(&NODE, $crate::Level::$level);
            }
        }
    };
}

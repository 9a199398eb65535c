//! The boot dispatcher.
//!
//! A single pass walks every level in [`Level`] order and runs each step the
//! active backend reports for it. A step's status is logged and counted but
//! never stops the pass; a step that must halt the boot has to do so itself.

use bootstage_abi::{INIT_OK, InitStep, Level, StepOutcome};
use bootstage_lib::{klog_debug, klog_info, klog_trace, klog_warn};

use crate::backend::StepSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchState {
    NotStarted,
    Running,
    Complete,
}

/// Caller-supplied work that must happen strictly before and after all staged
/// initializers, such as bringing up and tearing down the log sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct BootHooks {
    pub pre: Option<fn()>,
    pub post: Option<fn()>,
}

impl BootHooks {
    pub const NONE: BootHooks = BootHooks {
        pre: None,
        post: None,
    };

    pub const fn new(pre: fn(), post: fn()) -> Self {
        Self {
            pre: Some(pre),
            post: Some(post),
        }
    }

    pub const fn with_pre(mut self, pre: fn()) -> Self {
        self.pre = Some(pre);
        self
    }

    pub const fn with_post(mut self, post: fn()) -> Self {
        self.post = Some(post);
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelSummary {
    /// Steps whose function ran, successful or not.
    pub invoked: usize,
    pub failed: usize,
    /// Null slots.
    pub skipped: usize,
}

impl LevelSummary {
    fn record(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Ok => self.invoked += 1,
            StepOutcome::Failed(_) => {
                self.invoked += 1;
                self.failed += 1;
            }
            StepOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Diagnostics for one full pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub levels: [LevelSummary; Level::COUNT],
}

impl RunSummary {
    /// Overall result of the pass. Always [`INIT_OK`]: individual failures
    /// are reported through the counters and the log only.
    pub fn status(&self) -> i32 {
        INIT_OK
    }

    pub fn level(&self, level: Level) -> &LevelSummary {
        &self.levels[level.index()]
    }

    pub fn invoked(&self) -> usize {
        self.levels.iter().map(|l| l.invoked).sum()
    }

    pub fn failed(&self) -> usize {
        self.levels.iter().map(|l| l.failed).sum()
    }

    pub fn skipped(&self) -> usize {
        self.levels.iter().map(|l| l.skipped).sum()
    }
}

/// Runs every registered step of a [`StepSource`], level by level.
pub struct Dispatcher<S> {
    source: S,
    state: DispatchState,
    runs: usize,
}

impl<S: StepSource> Dispatcher<S> {
    pub const fn new(source: S) -> Self {
        Self {
            source,
            state: DispatchState::NotStarted,
            runs: 0,
        }
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Completed passes so far.
    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Run every level in order, between the caller's hooks.
    ///
    /// Calling this again re-runs everything; nothing is remembered between
    /// passes apart from the pass counter.
    pub fn run(&mut self, hooks: &BootHooks) -> RunSummary {
        self.state = DispatchState::Running;
        self.source.prepare();

        if let Some(pre) = hooks.pre {
            pre();
        }

        klog_info!("[boot:init] dispatch start ({} backend)", S::KIND.name());

        let mut summary = RunSummary::default();
        for level in Level::ALL {
            summary.levels[level.index()] = self.dispatch_level(level);
        }

        klog_info!(
            "[boot:init] auto initialization is complete: {} run, {} failed, {} skipped",
            summary.invoked(),
            summary.failed(),
            summary.skipped()
        );

        if let Some(post) = hooks.post {
            post();
        }

        self.state = DispatchState::Complete;
        self.runs += 1;
        summary
    }

    /// Run a single level without hooks. Does not change the dispatch state.
    pub fn run_level(&mut self, level: Level) -> LevelSummary {
        self.source.prepare();
        self.dispatch_level(level)
    }

    fn dispatch_level(&self, level: Level) -> LevelSummary {
        klog_debug!("[boot:init] level start -> {}", level);

        let mut summary = LevelSummary::default();
        for step in self.source.level_steps(level) {
            summary.record(run_step(level, step));
        }

        klog_debug!(
            "[boot:init] level complete -> {} ({} run, {} failed)",
            level,
            summary.invoked,
            summary.failed
        );
        summary
    }
}

fn run_step(level: Level, step: &InitStep) -> StepOutcome {
    let Some(func) = step.func() else {
        klog_trace!("    skip null slot {}", step.name());
        return StepOutcome::Skipped;
    };

    let rc = func();
    klog_debug!("initialize [ret: {}] {} done.", rc, step.name());

    let outcome = StepOutcome::from_status(Some(rc));
    if outcome.is_failure() {
        klog_warn!(
            "[boot:init] FAILURE in {} -> {} (ret {})",
            level,
            step.name(),
            rc
        );
    }
    outcome
}

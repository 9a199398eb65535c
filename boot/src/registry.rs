//! Per-level step registry used by the list-based backends.
//!
//! Every registered initializer owns a static [`StepNode`] that carries its
//! own link, so a level list is just a head and a tail pointer and
//! registration never runs out of room. Registration appends to the tail of
//! the target level; dispatch walks each level head to tail.

use core::sync::atomic::{AtomicBool, Ordering};

use bootstage_abi::{InitStep, Level, RegisterError, RegisterResult};
use spin::Mutex;

/// A descriptor plus its link into exactly one level list.
///
/// Nodes live in statics generated at each call site. A node is in at most
/// one list at a time; registering a linked node again is rejected instead of
/// creating a cycle.
pub struct StepNode {
    step: InitStep,
    next: Mutex<Option<&'static StepNode>>,
    linked: AtomicBool,
}

impl StepNode {
    pub const fn new(step: InitStep) -> Self {
        Self {
            step,
            next: Mutex::new(None),
            linked: AtomicBool::new(false),
        }
    }

    #[inline]
    pub const fn step(&self) -> &InitStep {
        &self.step
    }

    pub fn is_linked(&self) -> bool {
        self.linked.load(Ordering::Acquire)
    }

    fn next(&self) -> Option<&'static StepNode> {
        *self.next.lock()
    }

    fn unlink(&self) -> Option<&'static StepNode> {
        let next = self.next.lock().take();
        self.linked.store(false, Ordering::Release);
        next
    }
}

impl core::fmt::Debug for StepNode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StepNode")
            .field("step", &self.step)
            .field("linked", &self.is_linked())
            .finish()
    }
}

#[derive(Clone, Copy)]
struct LevelList {
    head: Option<&'static StepNode>,
    tail: Option<&'static StepNode>,
    len: usize,
}

impl LevelList {
    const EMPTY: LevelList = LevelList {
        head: None,
        tail: None,
        len: 0,
    };
}

/// A registry owning one ordered list per level.
///
/// Construction is `const`, so a registry can live in a `static` and be
/// written to by load-time callbacks before `main` runs. Dropping a registry
/// unlinks its nodes so another registry can take them.
pub struct StepRegistry {
    levels: [Mutex<LevelList>; Level::COUNT],
}

impl StepRegistry {
    pub const fn new() -> Self {
        Self {
            levels: [const { Mutex::new(LevelList::EMPTY) }; Level::COUNT],
        }
    }

    /// Append `node` to the tail of `level`.
    pub fn register(&self, node: &'static StepNode, level: Level) -> RegisterResult {
        let mut list = self.levels[level.index()].lock();
        if node.linked.swap(true, Ordering::AcqRel) {
            return Err(RegisterError::AlreadyRegistered {
                level,
                name: node.step.name(),
            });
        }

        *node.next.lock() = None;
        match list.tail {
            Some(tail) => *tail.next.lock() = Some(node),
            None => list.head = Some(node),
        }
        list.tail = Some(node);
        list.len += 1;
        Ok(())
    }

    /// Iterate one level in registration order.
    ///
    /// The level lock is only held to read the head, so the caller can run
    /// the steps while iterating.
    pub fn steps(&self, level: Level) -> LevelSteps {
        LevelSteps {
            cursor: self.levels[level.index()].lock().head,
        }
    }

    pub fn len(&self, level: Level) -> usize {
        self.levels[level.index()].lock().len
    }

    pub fn total(&self) -> usize {
        Level::ALL.iter().map(|level| self.len(*level)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Unlink every node from every level.
    pub fn clear(&self) {
        for level in &self.levels {
            let mut list = level.lock();
            let mut cursor = list.head;
            while let Some(node) = cursor {
                cursor = node.unlink();
            }
            *list = LevelList::EMPTY;
        }
    }
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StepRegistry {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Walks one level list head to tail.
pub struct LevelSteps {
    cursor: Option<&'static StepNode>,
}

impl Iterator for LevelSteps {
    type Item = &'static InitStep;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor?;
        self.cursor = node.next();
        Some(&node.step)
    }
}

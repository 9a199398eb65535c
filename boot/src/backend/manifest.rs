//! Explicit manifest backend.
//!
//! Nothing runs automatically here. Each call site compiles to a plainly
//! named registration function (`<init>::register`) that links a static
//! [`StepNode`](crate::registry::StepNode), and a hand-maintained
//! manifest lists the initializers that exist. Building the manifest table is
//! the declare pass; [`ManifestBackend::load`] is the call pass, invoking
//! every registration function in manifest order against a registry the
//! backend owns.

use bootstage_abi::{InitStep, Level, RegisterResult};
use bootstage_lib::klog_error;

use super::StepSource;
use crate::config::BackendKind;
use crate::registry::StepRegistry;

/// Registration function generated for each exported initializer.
pub type RegisterFn = fn(&StepRegistry) -> RegisterResult;

/// One manifest line: the initializer's path and its registration function.
#[derive(Clone, Copy)]
pub struct ManifestEntry {
    name: &'static str,
    register: RegisterFn,
}

impl ManifestEntry {
    pub const fn new(name: &'static str, register: RegisterFn) -> Self {
        Self { name, register }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn register(&self, registry: &StepRegistry) -> RegisterResult {
        (self.register)(registry)
    }
}

impl core::fmt::Debug for ManifestEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("ManifestEntry").field(&self.name).finish()
    }
}

pub struct ManifestBackend {
    manifest: &'static [ManifestEntry],
    registry: StepRegistry,
}

impl ManifestBackend {
    pub const fn new(manifest: &'static [ManifestEntry]) -> Self {
        Self {
            manifest,
            registry: StepRegistry::new(),
        }
    }

    pub fn manifest(&self) -> &'static [ManifestEntry] {
        self.manifest
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// Rebuild the registry from the manifest.
    ///
    /// The registry is cleared first, so loading again yields the same
    /// contents rather than accumulating duplicates. Dropping the backend
    /// unlinks the nodes again.
    pub fn load(&mut self) {
        self.registry.clear();
        for entry in self.manifest {
            if let Err(err) = entry.register(&self.registry) {
                klog_error!("[boot:manifest] {}: {}", entry.name(), err);
            }
        }
    }
}

impl StepSource for ManifestBackend {
    const KIND: BackendKind = BackendKind::Registry;

    fn prepare(&mut self) {
        self.load();
    }

    fn level_steps(&self, level: Level) -> impl Iterator<Item = &'static InitStep> + '_ {
        self.registry.steps(level)
    }
}

/// Generate the registration function for `$func` at `$level`.
///
/// Expands to a module named after the initializer holding
/// `pub fn register(&StepRegistry)`; functions and modules live in different
/// namespaces, so the manifest can name the initializer itself.
#[macro_export]
macro_rules! registry_step {
    ($level:ident, $func:ident) => {
        #[doc(hidden)]
        #[allow(dead_code)]
        pub mod $func {
            pub fn register(registry: &$crate::registry::StepRegistry) -> $crate::RegisterResult {
                const STEP: $crate::InitStep =
                    $crate::InitStep::new(super::$func, ::core::stringify!($func));
                static NODE: $crate::registry::StepNode = $crate::registry::StepNode::new(STEP);
                registry.register(&NODE, $crate::Level::$level)
            }
        }
    };
}

/// Build a manifest table from initializer paths, in call order.
///
/// ```ignore
/// static MANIFEST: &[ManifestEntry] = bootstage_boot::manifest![
///     crate::board::board_init,
///     crate::fs::fs_mount,
/// ];
/// ```
#[macro_export]
macro_rules! manifest {
    ($($entry:path),* $(,)?) => {{
        const MANIFEST: &[$crate::backend::manifest::ManifestEntry] = &[$(
            $crate::backend::manifest::ManifestEntry::new(::core::stringify!($entry), {
                use $entry as entry;
                entry::register
            }),
        )*];
        MANIFEST
    }};
}

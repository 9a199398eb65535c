//! Export macros.
//!
//! `export_*!(func)` registers `func` at the named level through whichever
//! backend this crate was built with. The backend macros themselves
//! (`section_step!`, `load_time_step!`, `registry_step!`) stay available for
//! code that wants one backend regardless of the build setting.

#[cfg(bootstage_backend = "section")]
#[macro_export]
macro_rules! export_step {
    ($level:ident, $func:ident) => {
        $crate::section_step!($level, $func);
    };
}

#[cfg(bootstage_backend = "load_time")]
#[macro_export]
macro_rules! export_step {
    ($level:ident, $func:ident) => {
        $crate::load_time_step!($level, $func);
    };
}

#[cfg(bootstage_backend = "registry")]
#[macro_export]
macro_rules! export_step {
    ($level:ident, $func:ident) => {
        $crate::registry_step!($level, $func);
    };
}

#[macro_export]
macro_rules! export_setup {
    ($func:ident) => {
        $crate::export_step!(Setup, $func);
    };
}

#[macro_export]
macro_rules! export_board {
    ($func:ident) => {
        $crate::export_step!(Board, $func);
    };
}

#[macro_export]
macro_rules! export_pre_component {
    ($func:ident) => {
        $crate::export_step!(PreComponent, $func);
    };
}

#[macro_export]
macro_rules! export_cleanup {
    ($func:ident) => {
        $crate::export_step!(Cleanup, $func);
    };
}

#[macro_export]
macro_rules! export_device {
    ($func:ident) => {
        $crate::export_step!(Device, $func);
    };
}

#[macro_export]
macro_rules! export_component {
    ($func:ident) => {
        $crate::export_step!(Component, $func);
    };
}

#[macro_export]
macro_rules! export_env {
    ($func:ident) => {
        $crate::export_step!(Environment, $func);
    };
}

#[macro_export]
macro_rules! export_app {
    ($func:ident) => {
        $crate::export_step!(Application, $func);
    };
}

/// Dispatcher over the backend this crate was built with.
#[cfg(bootstage_backend = "section")]
pub type ActiveBackend = crate::backend::SectionBackend;
#[cfg(bootstage_backend = "load_time")]
pub type ActiveBackend = crate::backend::LoadTimeBackend;
#[cfg(bootstage_backend = "registry")]
pub type ActiveBackend = crate::backend::ManifestBackend;

/// Build the dispatcher for the active backend.
///
/// With the registry backend the manifest named by `BOOTSTAGE_MANIFEST` is
/// included at the call site, so paths inside it resolve in the caller's
/// crate.
#[cfg(bootstage_backend = "section")]
#[macro_export]
macro_rules! dispatcher {
    () => {
        $crate::Dispatcher::new($crate::backend::SectionBackend::new())
    };
}

#[cfg(bootstage_backend = "load_time")]
#[macro_export]
macro_rules! dispatcher {
    () => {
        $crate::Dispatcher::new($crate::backend::LoadTimeBackend::new())
    };
}

#[cfg(bootstage_backend = "registry")]
#[macro_export]
macro_rules! dispatcher {
    () => {
        $crate::Dispatcher::new($crate::backend::ManifestBackend::new(::core::include!(
            ::core::env!(
                "BOOTSTAGE_MANIFEST",
                "BOOTSTAGE_MANIFEST must name the manifest when the registry backend is selected"
            )
        )))
    };
}

/// Run every staged initializer once through the active backend.
///
/// The usual entry point: `bootstage_boot::run!(&hooks)` at the top of
/// `main`.
#[macro_export]
macro_rules! run {
    () => {
        $crate::run!(&$crate::BootHooks::NONE)
    };
    ($hooks:expr) => {
        $crate::dispatcher!().run($hooks)
    };
}

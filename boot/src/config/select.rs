//! Build-time backend selection.
//!
//! Shared between `build.rs`, which rejects a bad configuration before any
//! code is compiled, and the crate itself, which reports the outcome.

/// The collection strategy chosen for this build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// Descriptors placed in a link-time section.
    Section,
    /// Descriptors registered by load-time constructors.
    LoadTime,
    /// Descriptors registered from an explicit manifest.
    Registry,
}

impl BackendKind {
    pub const ALL: [BackendKind; 3] = [
        BackendKind::Section,
        BackendKind::LoadTime,
        BackendKind::Registry,
    ];

    /// Spelling accepted in `BOOTSTAGE_BACKEND`.
    pub const fn name(self) -> &'static str {
        match self {
            BackendKind::Section => "section",
            BackendKind::LoadTime => "load-time",
            BackendKind::Registry => "registry",
        }
    }

    /// Value of the `bootstage_backend` cfg emitted for this backend.
    pub const fn cfg_value(self) -> &'static str {
        match self {
            BackendKind::Section => "section",
            BackendKind::LoadTime => "load_time",
            BackendKind::Registry => "registry",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "section" => Some(BackendKind::Section),
            "load-time" | "load_time" => Some(BackendKind::LoadTime),
            "registry" => Some(BackendKind::Registry),
            _ => None,
        }
    }
}

pub const DEFAULT_BACKEND: BackendKind = BackendKind::Section;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError<'a> {
    #[error("unknown BOOTSTAGE_BACKEND `{0}`, expected one of: section, load-time, registry")]
    UnknownBackend(&'a str),
    #[error("BOOTSTAGE_MANIFEST must name the manifest file when BOOTSTAGE_BACKEND=registry")]
    MissingManifest,
    #[error("unknown BOOTSTAGE_LOG `{0}`, expected one of: error, warn, info, debug, trace")]
    UnknownLogLevel(&'a str),
}

/// Resolve the backend from the raw environment values. Unset or empty
/// variables count as absent.
pub fn select_backend<'a>(
    backend: Option<&'a str>,
    manifest: Option<&'a str>,
) -> Result<BackendKind, ConfigError<'a>> {
    let kind = match backend.filter(|raw| !raw.trim().is_empty()) {
        None => DEFAULT_BACKEND,
        Some(raw) => BackendKind::parse(raw).ok_or(ConfigError::UnknownBackend(raw))?,
    };

    let has_manifest = manifest.is_some_and(|path| !path.trim().is_empty());
    if kind == BackendKind::Registry && !has_manifest {
        return Err(ConfigError::MissingManifest);
    }
    Ok(kind)
}

pub fn select_log_level(raw: Option<&str>) -> Result<&str, ConfigError<'_>> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(DEFAULT_LOG_LEVEL),
        Some(level) if LOG_LEVELS.contains(&level) => Ok(level),
        Some(level) => Err(ConfigError::UnknownLogLevel(level)),
    }
}

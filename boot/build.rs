use std::env;
use std::path::Path;

#[allow(dead_code)]
#[path = "src/config/select.rs"]
mod select;

use select::{select_backend, select_log_level};

fn main() {
    println!("cargo:rerun-if-changed=src/config/select.rs");
    println!("cargo:rerun-if-env-changed=BOOTSTAGE_BACKEND");
    println!("cargo:rerun-if-env-changed=BOOTSTAGE_MANIFEST");
    println!("cargo:rerun-if-env-changed=BOOTSTAGE_LOG");
    println!(
        "cargo:rustc-check-cfg=cfg(bootstage_backend, values(\"section\", \"load_time\", \"registry\"))"
    );

    let backend = env::var("BOOTSTAGE_BACKEND").ok();
    let manifest = env::var("BOOTSTAGE_MANIFEST").ok();
    let log_level = env::var("BOOTSTAGE_LOG").ok();

    let kind = select_backend(backend.as_deref(), manifest.as_deref())
        .unwrap_or_else(|err| panic!("bootstage configuration error: {err}"));
    let level = select_log_level(log_level.as_deref())
        .unwrap_or_else(|err| panic!("bootstage configuration error: {err}"));

    if let Some(path) = manifest.as_deref().filter(|p| !p.trim().is_empty()) {
        if !Path::new(path).is_absolute() {
            println!(
                "cargo:warning=BOOTSTAGE_MANIFEST `{path}` is relative; include! resolves it against the expanding source file"
            );
        }
    }

    println!("cargo:rustc-cfg=bootstage_backend=\"{}\"", kind.cfg_value());
    println!("cargo:rustc-env=BOOTSTAGE_ACTIVE_BACKEND={}", kind.name());
    println!("cargo:rustc-env=BOOTSTAGE_LOG_LEVEL={level}");
}

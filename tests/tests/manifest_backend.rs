//! Explicit manifest backend. Nothing is registered until a dispatcher loads
//! the manifest.

use bootstage_boot::backend::{ManifestBackend, ManifestEntry};
use bootstage_boot::registry::{StepNode, StepRegistry};
use bootstage_boot::{
    BootHooks, Dispatcher, INIT_OK, InitStep, Level, RegisterResult, manifest, registry_step,
};
use bootstage_tests::{CallLog, recording_hooks};
use pretty_assertions::assert_eq;
use serial_test::serial;

static CALLS: CallLog = CallLog::new();

fn board_init() -> i32 {
    CALLS.record("board_init");
    0
}

fn uart_probe() -> i32 {
    CALLS.record("uart_probe");
    0
}

fn disk_probe() -> i32 {
    CALLS.record("disk_probe");
    -1
}

fn fs_mount() -> i32 {
    CALLS.record("fs_mount");
    0
}

fn app_start() -> i32 {
    CALLS.record("app_start");
    0
}

registry_step!(Board, board_init);
registry_step!(Device, uart_probe);
registry_step!(Device, disk_probe);
registry_step!(Environment, fs_mount);
registry_step!(Application, app_start);

static RESERVED: StepNode = StepNode::new(InitStep::null("reserved"));

fn register_reserved(registry: &StepRegistry) -> RegisterResult {
    registry.register(&RESERVED, Level::Component)
}

// Manifest order decides order inside a level: disk before uart.
static MANIFEST: &[ManifestEntry] = manifest![
    crate::app_start,
    crate::disk_probe,
    crate::fs_mount,
    crate::uart_probe,
    crate::board_init,
];

static WITH_RESERVED: [ManifestEntry; 2] = [
    ManifestEntry::new("reserved", register_reserved),
    ManifestEntry::new("board_init", board_init::register),
];

#[test]
fn manifest_lists_entries_in_call_order() {
    let names: Vec<_> = MANIFEST.iter().map(ManifestEntry::name).collect();
    assert_eq!(names.len(), 5);
    assert!(names[0].ends_with("app_start"));
    assert!(names[4].ends_with("board_init"));
}

#[test]
#[serial]
fn nothing_registered_until_loaded() {
    let mut backend = ManifestBackend::new(MANIFEST);
    assert!(backend.registry().is_empty());

    backend.load();
    assert_eq!(backend.registry().total(), 5);
    assert_eq!(backend.registry().len(Level::Device), 2);
}

#[test]
#[serial]
fn level_order_then_manifest_order() {
    CALLS.clear();
    let mut dispatcher = Dispatcher::new(ManifestBackend::new(MANIFEST));
    dispatcher.run(&recording_hooks!(CALLS));

    assert_eq!(
        CALLS.take(),
        [
            "pre",
            "board_init",
            "disk_probe",
            "uart_probe",
            "fs_mount",
            "app_start",
            "post"
        ]
    );
}

#[test]
#[serial]
fn failure_continues_with_later_steps() {
    CALLS.clear();
    let mut dispatcher = Dispatcher::new(ManifestBackend::new(MANIFEST));
    let summary = dispatcher.run(&BootHooks::NONE);

    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.level(Level::Device).invoked, 2);
    assert_eq!(CALLS.count("uart_probe"), 1);
    assert_eq!(CALLS.count("app_start"), 1);
    assert_eq!(summary.status(), INIT_OK);
}

#[test]
#[serial]
fn repeated_runs_invoke_each_step_once_per_run() {
    CALLS.clear();
    let mut dispatcher = Dispatcher::new(ManifestBackend::new(MANIFEST));
    for _ in 0..3 {
        let summary = dispatcher.run(&BootHooks::NONE);
        assert_eq!(summary.invoked(), 5);
    }

    assert_eq!(dispatcher.source().registry().total(), 5);
    assert_eq!(CALLS.count("board_init"), 3);
    assert_eq!(CALLS.count("fs_mount"), 3);
}

#[test]
#[serial]
fn null_entry_is_skipped() {
    CALLS.clear();
    let mut dispatcher = Dispatcher::new(ManifestBackend::new(&WITH_RESERVED));
    let summary = dispatcher.run(&BootHooks::NONE);

    assert_eq!(summary.skipped(), 1);
    assert_eq!(summary.invoked(), 1);
    assert_eq!(CALLS.take(), ["board_init"]);
}

static TWICE: [ManifestEntry; 3] = [
    ManifestEntry::new("board_init", board_init::register),
    ManifestEntry::new("fs_mount", fs_mount::register),
    ManifestEntry::new("board_init", board_init::register),
];

#[test]
#[serial]
fn listing_an_entry_twice_runs_it_once() {
    CALLS.clear();
    let mut dispatcher = Dispatcher::new(ManifestBackend::new(&TWICE));
    let summary = dispatcher.run(&BootHooks::NONE);

    assert_eq!(dispatcher.source().registry().total(), 2);
    assert_eq!(summary.invoked(), 2);
    assert_eq!(CALLS.take(), ["board_init", "fs_mount"]);
}

#[test]
#[serial]
fn dropped_dispatcher_hands_nodes_to_the_next_one() {
    CALLS.clear();
    {
        let mut first = Dispatcher::new(ManifestBackend::new(MANIFEST));
        first.run(&BootHooks::NONE);
    }

    let mut second = Dispatcher::new(ManifestBackend::new(&WITH_RESERVED));
    let summary = second.run(&BootHooks::NONE);
    assert_eq!(summary.invoked(), 1);
    assert_eq!(summary.skipped(), 1);
}

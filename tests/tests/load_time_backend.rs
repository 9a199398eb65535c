//! Load-time constructor backend. Everything below registers before `main`.

use bootstage_boot::backend::{LOAD_TIME_STEPS, LoadTimeBackend, load_time};
use bootstage_boot::{BootHooks, Dispatcher, INIT_OK, InitStep, Level, StepNode, load_time_step};
use bootstage_tests::{CallLog, recording_hooks};
use pretty_assertions::assert_eq;
use serial_test::serial;

static CALLS: CallLog = CallLog::new();

fn board_init() -> i32 {
    CALLS.record("board_init");
    0
}

fn fs_mount() -> i32 {
    CALLS.record("fs_mount");
    0
}

fn app_start() -> i32 {
    CALLS.record("app_start");
    0
}

fn bus_probe() -> i32 {
    CALLS.record("bus_probe");
    0
}

fn bus_bind() -> i32 {
    CALLS.record("bus_bind");
    7
}

fn bus_start() -> i32 {
    CALLS.record("bus_start");
    0
}

load_time_step!(Application, app_start);
load_time_step!(Environment, fs_mount);
load_time_step!(Board, board_init);

static BUS_PROBE: StepNode = StepNode::new(InitStep::new(bus_probe, "bus_probe"));
static BUS_BIND: StepNode = StepNode::new(InitStep::new(bus_bind, "bus_bind"));
static BUS_START: StepNode = StepNode::new(InitStep::new(bus_start, "bus_start"));
static RESERVED: StepNode = StepNode::new(InitStep::null("reserved"));

// One constructor so the registration order within the level is known.
#[ctor::ctor]
unsafe fn register_bus_chain() {
    load_time::register(&BUS_PROBE, Level::Device);
    load_time::register(&BUS_BIND, Level::Device);
    load_time::register(&BUS_START, Level::Device);
    load_time::register(&RESERVED, Level::Component);
}

fn dispatcher() -> Dispatcher<LoadTimeBackend> {
    Dispatcher::new(LoadTimeBackend::new())
}

#[test]
#[serial]
fn registration_happens_before_main() {
    assert_eq!(LOAD_TIME_STEPS.total(), 7);
    assert_eq!(LOAD_TIME_STEPS.len(Level::Device), 3);
    assert!(BUS_PROBE.is_linked());
    assert!(RESERVED.is_linked());
}

#[test]
#[serial]
fn registering_a_linked_node_again_is_ignored() {
    CALLS.clear();
    load_time::register(&BUS_PROBE, Level::Application);

    assert_eq!(LOAD_TIME_STEPS.total(), 7);
    assert_eq!(LOAD_TIME_STEPS.len(Level::Application), 1);
    dispatcher().run_level(Level::Application);
    assert_eq!(CALLS.take(), ["app_start"]);
}

#[test]
#[serial]
fn level_order_and_fifo_within_level() {
    CALLS.clear();
    dispatcher().run(&recording_hooks!(CALLS));

    assert_eq!(
        CALLS.take(),
        [
            "pre",
            "board_init",
            "bus_probe",
            "bus_bind",
            "bus_start",
            "fs_mount",
            "app_start",
            "post"
        ]
    );
}

#[test]
#[serial]
fn failure_and_null_slot_are_counted() {
    CALLS.clear();
    let summary = dispatcher().run(&BootHooks::NONE);

    assert_eq!(summary.invoked(), 6);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.skipped(), 1);
    assert_eq!(summary.level(Level::Device).failed, 1);
    assert_eq!(CALLS.count("app_start"), 1);
    assert_eq!(summary.status(), INIT_OK);
}

#[test]
#[serial]
fn rerun_does_not_duplicate_registrations() {
    CALLS.clear();
    let mut dispatcher = dispatcher();
    dispatcher.run(&BootHooks::NONE);
    dispatcher.run(&BootHooks::NONE);

    assert_eq!(LOAD_TIME_STEPS.total(), 7);
    assert_eq!(CALLS.count("bus_bind"), 2);
    assert_eq!(CALLS.count("board_init"), 2);
}

#[test]
#[serial]
fn run_level_dispatches_one_level() {
    CALLS.clear();
    let summary = dispatcher().run_level(Level::Device);

    assert_eq!(summary.invoked, 3);
    assert_eq!(CALLS.take(), ["bus_probe", "bus_bind", "bus_start"]);
}

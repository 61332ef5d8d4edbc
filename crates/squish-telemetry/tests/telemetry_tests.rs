//! Integration tests for squish-telemetry.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use squish_telemetry::bus::EventBus;
use squish_telemetry::events::{EventKind, SimulationEvent};
use squish_telemetry::sinks::{CaptureSink, EventSink, StatsSink};

/// Counts handled events through shared state, so dispatch can be
/// observed after the sink moves into the bus.
struct CountingSink {
    handled: Arc<AtomicU32>,
    finalized: Arc<AtomicBool>,
}

impl EventSink for CountingSink {
    fn handle(&mut self, _event: &SimulationEvent) {
        self.handled.fetch_add(1, Ordering::Relaxed);
    }

    fn finalize(&mut self) {
        self.finalized.store(true, Ordering::Relaxed);
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn step_end(frame: u32, wall_time: f64) -> SimulationEvent {
    SimulationEvent::new(
        frame,
        EventKind::StepEnd {
            wall_time,
            substeps: 10,
        },
    )
}

// ─── Bus Tests ────────────────────────────────────────────────

#[test]
fn bus_dispatches_to_every_sink() {
    let a = Arc::new(AtomicU32::new(0));
    let b = Arc::new(AtomicU32::new(0));
    let finalized = Arc::new(AtomicBool::new(false));

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(CountingSink {
        handled: a.clone(),
        finalized: finalized.clone(),
    }));
    bus.add_sink(Box::new(CountingSink {
        handled: b.clone(),
        finalized: finalized.clone(),
    }));
    assert_eq!(bus.sink_count(), 2);

    for frame in 0..3 {
        bus.emit(step_end(frame, 0.001));
    }
    assert_eq!(a.load(Ordering::Relaxed), 3);
    assert_eq!(b.load(Ordering::Relaxed), 3);

    bus.finalize();
    assert!(finalized.load(Ordering::Relaxed));
}

#[test]
fn disabled_bus_drops_events() {
    let handled = Arc::new(AtomicU32::new(0));
    let finalized = Arc::new(AtomicBool::new(false));

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(CountingSink {
        handled: handled.clone(),
        finalized: finalized.clone(),
    }));

    bus.set_enabled(false);
    assert!(!bus.is_enabled());
    bus.emit(step_end(0, 0.001));
    bus.finalize();
    assert_eq!(handled.load(Ordering::Relaxed), 0);
    assert!(!finalized.load(Ordering::Relaxed));

    bus.set_enabled(true);
    bus.emit(step_end(1, 0.001));
    assert_eq!(handled.load(Ordering::Relaxed), 1);
}

// ─── Sink Tests ───────────────────────────────────────────────

#[test]
fn capture_sink_records_in_order() {
    let mut sink = CaptureSink::new();
    for frame in 0..3 {
        sink.handle(&SimulationEvent::new(
            frame,
            EventKind::Energy {
                kinetic: frame as f64,
            },
        ));
    }
    assert_eq!(sink.events.len(), 3);
    assert_eq!(sink.events[2].frame, 2);
}

#[test]
fn capture_sink_reports_instability_frames() {
    let mut sink = CaptureSink::new();
    sink.handle(&step_end(0, 0.001));
    sink.handle(&SimulationEvent::new(
        1,
        EventKind::Instability {
            detail: "position of particle 7".into(),
        },
    ));
    sink.handle(&step_end(2, 0.001));
    sink.handle(&SimulationEvent::new(
        3,
        EventKind::Instability {
            detail: "velocity of particle 0".into(),
        },
    ));

    assert_eq!(sink.instability_frames(), vec![1, 3]);
}

#[test]
fn stats_sink_aggregates_run() {
    let mut stats = StatsSink::new();
    stats.handle(&SimulationEvent::new(
        0,
        EventKind::ConstraintBuild {
            edges: 24,
            tets: 12,
            degenerate_tets: 1,
        },
    ));
    stats.handle(&step_end(0, 0.002));
    stats.handle(&SimulationEvent::new(0, EventKind::Energy { kinetic: 1.5 }));
    stats.handle(&step_end(1, 0.004));
    stats.handle(&SimulationEvent::new(1, EventKind::Energy { kinetic: 0.5 }));
    stats.handle(&SimulationEvent::new(
        1,
        EventKind::Instability {
            detail: "nan".into(),
        },
    ));

    assert_eq!(stats.frames, 2);
    assert_eq!(stats.degenerate_tets, 1);
    assert_eq!(stats.instabilities, 1);
    assert!((stats.total_wall_time - 0.006).abs() < 1e-12);
    assert!((stats.avg_step_time() - 0.003).abs() < 1e-12);
    assert!((stats.peak_kinetic_energy - 1.5).abs() < 1e-12);
}

#[test]
fn stats_sink_empty_run_has_zero_average() {
    let stats = StatsSink::new();
    assert_eq!(stats.avg_step_time(), 0.0);
}

// ─── Event Tests ──────────────────────────────────────────────

#[test]
fn event_serialization() {
    let event = SimulationEvent::new(
        5,
        EventKind::ConstraintBuild {
            edges: 24,
            tets: 12,
            degenerate_tets: 1,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let recovered: SimulationEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.frame, 5);
}

#[test]
fn instability_event_carries_detail() {
    let event = SimulationEvent::new(
        10,
        EventKind::Instability {
            detail: "position of particle 7".into(),
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("particle 7"));
}

//! Event sinks.
//!
//! A sink consumes [`SimulationEvent`]s from the bus and turns them
//! into something useful: structured log lines, run-level statistics,
//! or an in-memory capture for tests.

use crate::events::{EventKind, SimulationEvent};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Processes a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called once when the run ends. Log summaries, flush buffers.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Logs events through `tracing`.
///
/// One-time build events log at info, per-frame data at debug, and
/// faults at warn, each under a `squish::*` target so subscribers can
/// separate construction noise from the frame loop.
pub struct TracingSink;

impl TracingSink {
    /// Creates a tracing sink.
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        let frame = event.frame;
        match &event.kind {
            EventKind::StepBegin { sim_time } => {
                tracing::debug!(target: "squish::step", frame, sim_time, "step begin");
            }
            EventKind::StepEnd { wall_time, substeps } => {
                tracing::debug!(target: "squish::step", frame, wall_time, substeps, "step end");
            }
            EventKind::ConstraintBuild {
                edges,
                tets,
                degenerate_tets,
            } => {
                if *degenerate_tets > 0 {
                    tracing::warn!(
                        target: "squish::build",
                        edges,
                        tets,
                        degenerate_tets,
                        "constraint build skipped degenerate tets"
                    );
                } else {
                    tracing::info!(target: "squish::build", edges, tets, "constraints built");
                }
            }
            EventKind::Coloring {
                kind,
                clusters,
                constraints,
            } => {
                tracing::info!(
                    target: "squish::build",
                    %kind,
                    clusters,
                    constraints,
                    "constraint graph colored"
                );
            }
            EventKind::BroadPhase {
                obstacles,
                overlapping,
            } => {
                tracing::debug!(
                    target: "squish::contact",
                    frame,
                    obstacles,
                    overlapping,
                    "broad phase"
                );
            }
            EventKind::Energy { kinetic } => {
                tracing::debug!(target: "squish::step", frame, kinetic, "kinetic energy");
            }
            EventKind::Instability { detail } => {
                tracing::warn!(target: "squish::step", frame, %detail, "numeric instability");
            }
        }
    }

    fn name(&self) -> &str {
        "tracing"
    }
}

/// Aggregates run-level statistics and logs one summary line when the
/// run finalizes.
#[derive(Debug, Default)]
pub struct StatsSink {
    /// Completed frames seen.
    pub frames: u32,
    /// Total wall-clock time across all steps (seconds).
    pub total_wall_time: f64,
    /// Highest kinetic energy observed in any frame.
    pub peak_kinetic_energy: f64,
    /// Degenerate tets reported at constraint build.
    pub degenerate_tets: u32,
    /// Numeric faults reported during the run.
    pub instabilities: u32,
}

impl StatsSink {
    /// Creates an empty stats sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mean wall-clock time per frame (seconds).
    pub fn avg_step_time(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.total_wall_time / self.frames as f64
        }
    }
}

impl EventSink for StatsSink {
    fn handle(&mut self, event: &SimulationEvent) {
        match &event.kind {
            EventKind::StepEnd { wall_time, .. } => {
                self.frames += 1;
                self.total_wall_time += *wall_time;
            }
            EventKind::Energy { kinetic } => {
                self.peak_kinetic_energy = self.peak_kinetic_energy.max(*kinetic);
            }
            EventKind::ConstraintBuild {
                degenerate_tets, ..
            } => {
                self.degenerate_tets += *degenerate_tets;
            }
            EventKind::Instability { .. } => {
                self.instabilities += 1;
            }
            _ => {}
        }
    }

    fn finalize(&mut self) {
        tracing::info!(
            target: "squish::stats",
            frames = self.frames,
            avg_step_ms = self.avg_step_time() * 1e3,
            peak_kinetic = self.peak_kinetic_energy,
            degenerate_tets = self.degenerate_tets,
            instabilities = self.instabilities,
            "run summary"
        );
    }

    fn name(&self) -> &str {
        "stats"
    }
}

/// Collects every event in memory, with helpers for interrogating a
/// finished run. Used by tests and diagnostics.
pub struct CaptureSink {
    /// Collected events, in emission order.
    pub events: Vec<SimulationEvent>,
}

impl CaptureSink {
    /// Creates an empty capture sink.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Frames that reported a numeric instability.
    pub fn instability_frames(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Instability { .. }))
            .map(|e| e.frame)
            .collect()
    }
}

impl Default for CaptureSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for CaptureSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.events.push(event.clone());
    }

    fn name(&self) -> &str {
        "capture"
    }
}

//! Rehearsal worker
//!
//! A single background thread walks the phase table and reports progress to
//! the UI thread over an mpsc channel. The worker owns the iteration; the
//! receiver owns the session. The only state crossing the thread boundary
//! besides events is a pair of atomic flags (pause, abort).
//!
//! Pacing is injectable so tests can run a full rehearsal instantly.

#![allow(dead_code)]

use crate::phase::InstallPhase;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

/// Granularity of the worker's sleep loop. Bounds how long pause and abort
/// requests can go unnoticed mid-delay.
const POLL_SLICE: Duration = Duration::from_millis(25);

/// Messages sent from the worker thread to the UI thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A phase has begun
    PhaseStarted { phase: InstallPhase },
    /// A sub-step of the current phase finished
    StepCompleted {
        phase: InstallPhase,
        index: usize,
        total: usize,
        label: &'static str,
    },
    /// The current phase finished all its sub-steps
    PhaseCompleted { phase: InstallPhase },
    /// The whole run finished successfully
    RunCompleted,
    /// The run failed at the given phase
    RunFailed { phase: InstallPhase, message: String },
}

/// Scales the phase table's base delays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    scale: f64,
}

impl Pacing {
    /// Base delays as written in the phase table (a full run takes ~50s)
    pub fn realtime() -> Self {
        Self { scale: 1.0 }
    }

    /// Base delays multiplied by `scale`; negative values clamp to zero
    pub fn scaled(scale: f64) -> Self {
        Self {
            scale: scale.max(0.0),
        }
    }

    /// No delays at all. Used by tests and `--speed 0`.
    pub fn instant() -> Self {
        Self { scale: 0.0 }
    }

    /// Returns true if all delays collapse to zero
    pub fn is_instant(self) -> bool {
        self.scale == 0.0
    }

    /// The scaled delay for one sub-step
    pub fn delay_for(self, base: Duration) -> Duration {
        base.mul_f64(self.scale)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::realtime()
    }
}

/// Options for one worker run
#[derive(Debug, Clone, Default)]
pub struct SimulatorOptions {
    /// Delay scaling for sub-steps
    pub pacing: Pacing,

    /// Inject a failure when this phase starts. Test hook; no production
    /// path sets it, which is what keeps Failed unreachable in practice.
    pub fail_at: Option<InstallPhase>,
}

/// Handle to a running worker thread.
///
/// Dropping the handle raises the abort flag and joins the thread, so a
/// worker never outlives the app that spawned it.
pub struct SimulatorHandle {
    thread: Option<JoinHandle<()>>,
    paused: Arc<AtomicBool>,
    abort: Arc<AtomicBool>,
}

impl SimulatorHandle {
    /// Set or clear the pause flag. The worker parks between sub-steps
    /// while it is set.
    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }

    /// Returns true if the pause flag is currently set
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Raise the abort flag. The worker exits at the next sub-step boundary.
    pub fn abort(&self) {
        self.abort.store(true, Ordering::SeqCst);
    }

    /// Returns true once the worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the worker thread to exit
    pub fn join(mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for SimulatorHandle {
    fn drop(&mut self) {
        self.abort.store(true, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Spawn the rehearsal worker.
///
/// Events arrive on `tx`'s receiving end in strict phase order; the channel
/// closes when the run completes, fails, or is aborted.
pub fn spawn(options: SimulatorOptions, tx: Sender<ProgressEvent>) -> io::Result<SimulatorHandle> {
    let paused = Arc::new(AtomicBool::new(false));
    let abort = Arc::new(AtomicBool::new(false));

    let thread = {
        let paused = Arc::clone(&paused);
        let abort = Arc::clone(&abort);
        thread::Builder::new()
            .name("archsim-worker".to_string())
            .spawn(move || run_worker(options, tx, &paused, &abort))?
    };

    Ok(SimulatorHandle {
        thread: Some(thread),
        paused,
        abort,
    })
}

fn run_worker(
    options: SimulatorOptions,
    tx: Sender<ProgressEvent>,
    paused: &AtomicBool,
    abort: &AtomicBool,
) {
    info!("rehearsal run started");

    for &phase in InstallPhase::sequence() {
        if abort.load(Ordering::SeqCst) {
            debug!(phase = %phase, "run aborted");
            return;
        }
        if tx.send(ProgressEvent::PhaseStarted { phase }).is_err() {
            return;
        }

        if options.fail_at == Some(phase) {
            let _ = tx.send(ProgressEvent::RunFailed {
                phase,
                message: format!("{} failed (injected)", phase),
            });
            return;
        }

        let steps = phase.steps();
        let total = steps.len();
        for (index, &label) in steps.iter().enumerate() {
            if !wait_step(options.pacing, phase.step_delay(), paused, abort) {
                debug!(phase = %phase, index, "run aborted mid-phase");
                return;
            }
            let event = ProgressEvent::StepCompleted {
                phase,
                index,
                total,
                label,
            };
            if tx.send(event).is_err() {
                return;
            }
        }

        if tx.send(ProgressEvent::PhaseCompleted { phase }).is_err() {
            return;
        }
        debug!(phase = %phase, "phase complete");
    }

    let _ = tx.send(ProgressEvent::RunCompleted);
    info!("rehearsal run complete");
}

/// Sleep out one sub-step delay, honoring pause and abort.
///
/// Returns false if the run was aborted while waiting.
fn wait_step(pacing: Pacing, base: Duration, paused: &AtomicBool, abort: &AtomicBool) -> bool {
    let mut remaining = pacing.delay_for(base);
    loop {
        if abort.load(Ordering::SeqCst) {
            return false;
        }
        if paused.load(Ordering::SeqCst) {
            thread::sleep(POLL_SLICE);
            continue;
        }
        if remaining.is_zero() {
            return true;
        }
        let slice = remaining.min(POLL_SLICE);
        thread::sleep(slice);
        remaining = remaining.saturating_sub(slice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_instant_run_sends_all_events_in_order() {
        let (tx, rx) = mpsc::channel();
        let options = SimulatorOptions {
            pacing: Pacing::instant(),
            fail_at: None,
        };
        let handle = spawn(options, tx).expect("worker should spawn");

        let events: Vec<ProgressEvent> = rx.iter().collect();
        handle.join();

        // 15 phase starts + 100 steps + 15 phase completions + 1 run completion
        assert_eq!(events.len(), 131);
        assert_eq!(
            events.first(),
            Some(&ProgressEvent::PhaseStarted {
                phase: InstallPhase::DetectHardware
            })
        );
        assert_eq!(events.last(), Some(&ProgressEvent::RunCompleted));
    }

    #[test]
    fn test_fault_injection_short_circuits_run() {
        let (tx, rx) = mpsc::channel();
        let options = SimulatorOptions {
            pacing: Pacing::instant(),
            fail_at: Some(InstallPhase::Partition),
        };
        let handle = spawn(options, tx).expect("worker should spawn");

        let events: Vec<ProgressEvent> = rx.iter().collect();
        handle.join();

        assert!(matches!(
            events.last(),
            Some(ProgressEvent::RunFailed {
                phase: InstallPhase::Partition,
                ..
            })
        ));
        assert!(!events.contains(&ProgressEvent::RunCompleted));
    }

    #[test]
    fn test_abort_prevents_completion() {
        let (tx, rx) = mpsc::channel();
        let options = SimulatorOptions {
            pacing: Pacing::realtime(),
            fail_at: None,
        };
        let handle = spawn(options, tx).expect("worker should spawn");
        handle.abort();
        handle.join();

        let events: Vec<ProgressEvent> = rx.iter().collect();
        assert!(!events.contains(&ProgressEvent::RunCompleted));
    }

    #[test]
    fn test_pacing_scales_delays() {
        let base = Duration::from_millis(400);
        assert_eq!(Pacing::realtime().delay_for(base), base);
        assert_eq!(Pacing::scaled(0.5).delay_for(base), Duration::from_millis(200));
        assert!(Pacing::instant().delay_for(base).is_zero());
        assert!(Pacing::scaled(-3.0).is_instant());
    }

    #[test]
    fn test_dropped_receiver_stops_worker() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let options = SimulatorOptions {
            pacing: Pacing::instant(),
            fail_at: None,
        };
        let handle = spawn(options, tx).expect("worker should spawn");
        handle.join();
    }
}

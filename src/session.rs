//! Install session state machine
//!
//! The session is the single record of rehearsal progress: current phase,
//! overall progress, status text, and a bounded log. It is owned by the UI
//! thread and mutated only by applying [`ProgressEvent`]s from the worker,
//! so no field is ever shared mutably across threads.
//!
//! Transitions are validated: phases advance one at a time, never backwards,
//! and never out of a terminal state.

// Library API - some accessors are exported for external use but not yet consumed by the binary
#![allow(dead_code)]

use crate::phase::InstallPhase;
use crate::simulator::ProgressEvent;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Maximum number of retained log lines; the oldest are evicted first.
pub const LOG_CAPACITY: usize = 256;

/// Errors that can occur during phase transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhaseTransitionError {
    /// Attempted to skip one or more phases
    #[error("cannot skip from {from} to {to} (phases advance one at a time)")]
    SkippedPhase { from: InstallPhase, to: InstallPhase },

    /// Attempted to go backwards (not allowed)
    #[error("cannot go backwards from {from} to {to} (a run is forward-only)")]
    BackwardTransition { from: InstallPhase, to: InstallPhase },

    /// Attempted to transition out of a terminal state
    #[error("cannot leave terminal phase {from}")]
    FromTerminalPhase { from: InstallPhase },

    /// Attempted to transition to the current phase
    #[error("already at phase {phase}")]
    AlreadyAtPhase { phase: InstallPhase },

    /// Attempted to start a run that is not at Idle
    #[error("cannot start a run from {from} (reset first)")]
    NotIdle { from: InstallPhase },
}

/// Shared state record for one rehearsal run.
///
/// Created at process start with phase = Idle, advanced by applying worker
/// events, and reset to Idle by user input after completion or failure.
#[derive(Debug, Clone)]
pub struct InstallSession {
    /// Current phase
    phase: InstallPhase,

    /// Overall progress, 0-100
    progress: u8,

    /// Human-readable status line
    status: String,

    /// Position within the current phase as (completed, total) sub-steps
    step: Option<(usize, usize)>,

    /// True between start() and reaching a terminal state
    running: bool,

    /// True while the user has paused the run
    paused: bool,

    /// Phase at which failure occurred, if any
    failed_at: Option<InstallPhase>,

    /// Wall-clock start of the current run
    started_at: Option<Instant>,

    /// Wall-clock end of the run, once it reaches a terminal state
    ended_at: Option<Instant>,

    /// Bounded log of status lines, oldest first
    log: VecDeque<String>,
}

impl Default for InstallSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InstallSession {
    /// Create a new session in the Idle state
    pub fn new() -> Self {
        Self {
            phase: InstallPhase::Idle,
            progress: 0,
            status: InstallPhase::Idle.status_text().to_string(),
            step: None,
            running: false,
            paused: false,
            failed_at: None,
            started_at: None,
            ended_at: None,
            log: VecDeque::with_capacity(LOG_CAPACITY),
        }
    }

    /// Returns the current phase
    #[inline]
    pub fn phase(&self) -> InstallPhase {
        self.phase
    }

    /// Returns the overall progress percentage (0-100)
    #[inline]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Returns the current status line
    #[inline]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns (completed, total) sub-steps of the current phase, if any
    #[inline]
    pub fn step(&self) -> Option<(usize, usize)> {
        self.step
    }

    /// Returns true while a run is active (started and not yet terminal)
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns true while the run is paused
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns true once the run has reached Complete
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.phase == InstallPhase::Complete
    }

    /// Returns true once the run has reached Failed
    #[inline]
    pub fn is_failed(&self) -> bool {
        self.phase == InstallPhase::Failed
    }

    /// Returns the phase at which the run failed, if it did
    #[inline]
    pub fn failed_at(&self) -> Option<InstallPhase> {
        self.failed_at
    }

    /// Elapsed wall-clock time of the run. Frozen once the run ends.
    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }

    /// Retained log lines, oldest first
    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    /// Number of retained log lines
    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    /// Mark the session as running. Valid only from Idle.
    pub fn start(&mut self) -> Result<(), PhaseTransitionError> {
        if self.phase != InstallPhase::Idle {
            return Err(PhaseTransitionError::NotIdle { from: self.phase });
        }
        self.running = true;
        self.paused = false;
        self.started_at = Some(Instant::now());
        self.ended_at = None;
        self.status = "Starting installation...".to_string();
        self.push_log("Run started");
        Ok(())
    }

    /// Toggle the paused flag. Has no effect outside a running run.
    pub fn toggle_pause(&mut self) {
        if !self.running {
            return;
        }
        self.paused = !self.paused;
        self.push_log(if self.paused { "Paused" } else { "Resumed" });
    }

    /// Reset to Idle, clearing progress, flags, and the log
    pub fn reset(&mut self) {
        self.phase = InstallPhase::Idle;
        self.progress = 0;
        self.status = InstallPhase::Idle.status_text().to_string();
        self.step = None;
        self.running = false;
        self.paused = false;
        self.failed_at = None;
        self.started_at = None;
        self.ended_at = None;
        self.log.clear();
    }

    /// Transition to a specific phase, which must be the immediate next one.
    pub fn transition_to(&mut self, target: InstallPhase) -> Result<(), PhaseTransitionError> {
        if self.phase.is_terminal() {
            return Err(PhaseTransitionError::FromTerminalPhase { from: self.phase });
        }
        if target == self.phase {
            return Err(PhaseTransitionError::AlreadyAtPhase { phase: target });
        }
        // Failed is entered via fail(), never by ordinary transition
        if target == InstallPhase::Failed {
            return Err(PhaseTransitionError::SkippedPhase {
                from: self.phase,
                to: target,
            });
        }
        if target.order() < self.phase.order() {
            return Err(PhaseTransitionError::BackwardTransition {
                from: self.phase,
                to: target,
            });
        }
        if self.phase.next() != Some(target) {
            return Err(PhaseTransitionError::SkippedPhase {
                from: self.phase,
                to: target,
            });
        }
        self.phase = target;
        Ok(())
    }

    /// Mark the run as failed at the given phase.
    pub fn fail(&mut self, phase: InstallPhase, message: &str) -> Result<(), PhaseTransitionError> {
        if self.phase.is_terminal() {
            return Err(PhaseTransitionError::FromTerminalPhase { from: self.phase });
        }
        self.failed_at = Some(phase);
        self.phase = InstallPhase::Failed;
        self.running = false;
        self.paused = false;
        self.ended_at = Some(Instant::now());
        self.status = InstallPhase::Failed.status_text().to_string();
        self.push_log(&format!("ERROR at {}: {}", phase, message));
        Ok(())
    }

    /// Apply a worker event to the session.
    ///
    /// The worker emits events strictly in phase order, so any transition
    /// error here indicates an internal bug rather than a user mistake.
    pub fn apply(&mut self, event: &ProgressEvent) -> Result<(), PhaseTransitionError> {
        match event {
            ProgressEvent::PhaseStarted { phase } => {
                self.transition_to(*phase)?;
                self.status = phase.status_text().to_string();
                self.step = Some((0, phase.steps().len()));
                let line = self.status.clone();
                self.push_log(&line);
            }
            ProgressEvent::StepCompleted {
                phase,
                index,
                total,
                label,
            } => {
                if *phase != self.phase {
                    return Err(PhaseTransitionError::SkippedPhase {
                        from: self.phase,
                        to: *phase,
                    });
                }
                self.progress = phase.progress_at(*index);
                self.step = Some((index + 1, *total));
                self.status = format!("{} {}/{}: {}", phase, index + 1, total, label);
                let line = self.status.clone();
                self.push_log(&line);
            }
            ProgressEvent::PhaseCompleted { phase } => {
                if *phase != self.phase {
                    return Err(PhaseTransitionError::SkippedPhase {
                        from: self.phase,
                        to: *phase,
                    });
                }
                self.progress = phase.milestone();
            }
            ProgressEvent::RunCompleted => {
                self.transition_to(InstallPhase::Complete)?;
                self.progress = 100;
                self.running = false;
                self.paused = false;
                self.step = None;
                self.ended_at = Some(Instant::now());
                self.status = InstallPhase::Complete.status_text().to_string();
                self.push_log("Installation complete!");
            }
            ProgressEvent::RunFailed { phase, message } => {
                self.fail(*phase, message)?;
            }
        }
        Ok(())
    }

    fn push_log(&mut self, line: &str) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(line.to_string());
    }
}

// Convert PhaseTransitionError to the main error type
impl From<PhaseTransitionError> for crate::error::ArchSimError {
    fn from(err: PhaseTransitionError) -> Self {
        crate::error::ArchSimError::PhaseTransition(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance_to(session: &mut InstallSession, target: InstallPhase) {
        while session.phase() != target {
            let next = session.phase().next().expect("chain should continue");
            session.transition_to(next).expect("transition should be valid");
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = InstallSession::new();
        assert_eq!(session.phase(), InstallPhase::Idle);
        assert_eq!(session.progress(), 0);
        assert!(!session.is_running());
        assert!(!session.is_paused());
        assert_eq!(session.status(), "Ready - press Enter to begin");
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut session = InstallSession::new();
        session.start().expect("start from Idle");
        assert!(session.is_running());

        session
            .transition_to(InstallPhase::DetectHardware)
            .expect("advance");
        let err = session.start().unwrap_err();
        assert!(matches!(err, PhaseTransitionError::NotIdle { .. }));
    }

    #[test]
    fn test_cannot_skip_phases() {
        let mut session = InstallSession::new();
        let err = session.transition_to(InstallPhase::Partition).unwrap_err();
        assert!(matches!(err, PhaseTransitionError::SkippedPhase { .. }));
    }

    #[test]
    fn test_cannot_go_backwards() {
        let mut session = InstallSession::new();
        advance_to(&mut session, InstallPhase::Format);

        let err = session.transition_to(InstallPhase::Partition).unwrap_err();
        assert!(matches!(err, PhaseTransitionError::BackwardTransition { .. }));
    }

    #[test]
    fn test_cannot_leave_terminal_phase() {
        let mut session = InstallSession::new();
        advance_to(&mut session, InstallPhase::Complete);

        let err = session.transition_to(InstallPhase::DetectHardware).unwrap_err();
        assert!(matches!(err, PhaseTransitionError::FromTerminalPhase { .. }));
    }

    #[test]
    fn test_fail_records_phase() {
        let mut session = InstallSession::new();
        session.start().expect("start");
        advance_to(&mut session, InstallPhase::Mount);

        session.fail(InstallPhase::Mount, "injected").expect("fail");
        assert!(session.is_failed());
        assert!(!session.is_running());
        assert_eq!(session.failed_at(), Some(InstallPhase::Mount));
        assert_eq!(session.status(), "ERROR: Check logs");
    }

    #[test]
    fn test_pause_toggle_requires_running() {
        let mut session = InstallSession::new();
        session.toggle_pause();
        assert!(!session.is_paused());

        session.start().expect("start");
        session.toggle_pause();
        assert!(session.is_paused());
        session.toggle_pause();
        assert!(!session.is_paused());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = InstallSession::new();
        session.start().expect("start");
        advance_to(&mut session, InstallPhase::Download);
        session.toggle_pause();

        session.reset();
        assert_eq!(session.phase(), InstallPhase::Idle);
        assert_eq!(session.progress(), 0);
        assert!(!session.is_running());
        assert!(!session.is_paused());
        assert_eq!(session.log_len(), 0);
        assert!(session.failed_at().is_none());
    }

    #[test]
    fn test_log_is_bounded() {
        let mut session = InstallSession::new();
        session.start().expect("start");
        for i in 0..(LOG_CAPACITY * 2) {
            session.push_log(&format!("line {}", i));
        }
        assert_eq!(session.log_len(), LOG_CAPACITY);
        // Oldest entries were evicted
        let first = session.log().next().expect("log should be non-empty");
        assert!(!first.contains("Run started"));
    }

    #[test]
    fn test_apply_step_updates_status_and_progress() {
        let mut session = InstallSession::new();
        session.start().expect("start");
        session
            .apply(&ProgressEvent::PhaseStarted {
                phase: InstallPhase::DetectHardware,
            })
            .expect("phase start");
        assert_eq!(session.status(), "Detecting hardware...");
        assert_eq!(session.step(), Some((0, 5)));

        session
            .apply(&ProgressEvent::StepCompleted {
                phase: InstallPhase::DetectHardware,
                index: 0,
                total: 5,
                label: "Probing CPU model and topology",
            })
            .expect("step");
        assert_eq!(session.step(), Some((1, 5)));
        assert_eq!(session.progress(), InstallPhase::DetectHardware.progress_at(0));
        assert!(session.status().contains("1/5"));
    }

    #[test]
    fn test_apply_rejects_step_for_wrong_phase() {
        let mut session = InstallSession::new();
        session.start().expect("start");
        let err = session
            .apply(&ProgressEvent::StepCompleted {
                phase: InstallPhase::Partition,
                index: 0,
                total: 9,
                label: "sgdisk --zap-all /dev/nvme0n1",
            })
            .unwrap_err();
        assert!(matches!(err, PhaseTransitionError::SkippedPhase { .. }));
    }
}

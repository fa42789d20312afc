//! Full-run simulator tests
//!
//! Spawns the real worker with instant pacing and checks the end-to-end
//! properties of a complete rehearsal: bounded termination, monotone
//! progress, correct status text, and the injected failure path.

use archsim::phase::InstallPhase;
use archsim::session::InstallSession;
use archsim::simulator::{self, Pacing, ProgressEvent, SimulatorOptions};
use std::sync::mpsc;

/// Run the worker to completion with instant pacing, returning all events.
fn run_to_end(options: SimulatorOptions) -> Vec<ProgressEvent> {
    let (tx, rx) = mpsc::channel();
    let handle = simulator::spawn(options, tx).expect("worker should spawn");
    let events: Vec<ProgressEvent> = rx.iter().collect();
    handle.join();
    events
}

fn instant() -> SimulatorOptions {
    SimulatorOptions {
        pacing: Pacing::instant(),
        fail_at: None,
    }
}

#[test]
fn run_terminates_within_bounded_event_count() {
    let events = run_to_end(instant());

    // 15 phase starts + 100 sub-steps + 15 phase completions + 1 terminal
    let expected = InstallPhase::sequence().len() * 2 + InstallPhase::total_steps() + 1;
    assert_eq!(events.len(), expected);
    assert_eq!(events.last(), Some(&ProgressEvent::RunCompleted));
}

#[test]
fn phases_are_emitted_in_sequence_order() {
    let events = run_to_end(instant());

    let started: Vec<InstallPhase> = events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::PhaseStarted { phase } => Some(*phase),
            _ => None,
        })
        .collect();

    assert_eq!(started, InstallPhase::sequence());
}

#[test]
fn applied_run_reaches_complete_with_monotone_progress() {
    let events = run_to_end(instant());

    let mut session = InstallSession::new();
    session.start().expect("start");

    let mut last_progress = 0u8;
    for event in &events {
        session.apply(event).expect("events apply in order");
        assert!(
            session.progress() >= last_progress,
            "progress regressed from {} to {} at {:?}",
            last_progress,
            session.progress(),
            event
        );
        last_progress = session.progress();
    }

    assert!(session.is_complete());
    assert_eq!(session.progress(), 100);
    assert!(!session.is_running());
}

#[test]
fn each_phase_start_updates_status_to_fixed_text() {
    let events = run_to_end(instant());

    let mut session = InstallSession::new();
    session.start().expect("start");

    for event in &events {
        session.apply(event).expect("events apply in order");
        if let ProgressEvent::PhaseStarted { phase } = event {
            assert_eq!(session.status(), phase.status_text());
        }
    }
}

#[test]
fn step_events_carry_table_labels() {
    let events = run_to_end(instant());

    for event in &events {
        if let ProgressEvent::StepCompleted {
            phase,
            index,
            total,
            label,
        } = event
        {
            let steps = phase.steps();
            assert_eq!(*total, steps.len());
            assert_eq!(steps[*index], *label);
        }
    }
}

#[test]
fn injected_failure_lands_session_in_failed() {
    let events = run_to_end(SimulatorOptions {
        pacing: Pacing::instant(),
        fail_at: Some(InstallPhase::Download),
    });

    let mut session = InstallSession::new();
    session.start().expect("start");
    for event in &events {
        session.apply(event).expect("events apply in order");
    }

    assert!(session.is_failed());
    assert_eq!(session.failed_at(), Some(InstallPhase::Download));
    assert_eq!(session.status(), "ERROR: Check logs");

    // Phases before the failure ran normally
    let started: Vec<InstallPhase> = events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::PhaseStarted { phase } => Some(*phase),
            _ => None,
        })
        .collect();
    assert_eq!(
        started.last(),
        Some(&InstallPhase::Download),
        "failure phase is still announced"
    );
    assert!(!events.contains(&ProgressEvent::RunCompleted));
}

#[test]
fn two_consecutive_runs_are_identical() {
    // The rehearsal is deterministic: no input varies behavior
    let first = run_to_end(instant());
    let second = run_to_end(instant());
    assert_eq!(first, second);
}

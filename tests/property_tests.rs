//! Property-based tests
//!
//! Uses proptest to check invariants that should hold for arbitrary
//! phases, step positions, config strings, and event-stream prefixes.

use proptest::prelude::*;

use archsim::phase::InstallPhase;
use archsim::session::InstallSession;
use archsim::simulator::ProgressEvent;
use archsim::types::{Filesystem, InstallType};

/// Strategy for generating any phase, including Idle and the terminals
fn phase_strategy() -> impl Strategy<Value = InstallPhase> {
    prop_oneof![
        Just(InstallPhase::Idle),
        Just(InstallPhase::DetectHardware),
        Just(InstallPhase::DetectDisks),
        Just(InstallPhase::DetectNetwork),
        Just(InstallPhase::Partition),
        Just(InstallPhase::Format),
        Just(InstallPhase::Mount),
        Just(InstallPhase::Download),
        Just(InstallPhase::Install),
        Just(InstallPhase::Configure),
        Just(InstallPhase::Bootloader),
        Just(InstallPhase::NetworkSetup),
        Just(InstallPhase::UserSetup),
        Just(InstallPhase::Services),
        Just(InstallPhase::Optimize),
        Just(InstallPhase::Cleanup),
        Just(InstallPhase::Complete),
        Just(InstallPhase::Failed),
    ]
}

/// Strategy for the active (work-performing) phases only
fn active_phase_strategy() -> impl Strategy<Value = InstallPhase> {
    prop::sample::select(InstallPhase::sequence())
}

/// Build the full ordered event stream of a successful run
fn full_event_stream() -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    for &phase in InstallPhase::sequence() {
        events.push(ProgressEvent::PhaseStarted { phase });
        let steps = phase.steps();
        for (index, &label) in steps.iter().enumerate() {
            events.push(ProgressEvent::StepCompleted {
                phase,
                index,
                total: steps.len(),
                label,
            });
        }
        events.push(ProgressEvent::PhaseCompleted { phase });
    }
    events.push(ProgressEvent::RunCompleted);
    events
}

proptest! {
    /// next() strictly increases phase order (away from terminals)
    #[test]
    fn next_increases_order(phase in phase_strategy()) {
        if let Some(next) = phase.next() {
            prop_assert!(next.order() > phase.order());
        } else {
            prop_assert!(phase.is_terminal());
        }
    }

    /// previous() is the inverse of next() along the chain
    #[test]
    fn previous_inverts_next(phase in phase_strategy()) {
        if let Some(next) = phase.next() {
            prop_assert_eq!(next.previous(), Some(phase));
        }
    }

    /// progress_at is monotone in the step index and bounded by the span
    #[test]
    fn progress_at_is_monotone_and_bounded(
        phase in active_phase_strategy(),
        a in 0usize..32,
        b in 0usize..32,
    ) {
        let total = phase.steps().len();
        let i = a % total;
        let j = b % total;
        let (lo, hi) = (i.min(j), i.max(j));
        let (start, end) = phase.progress_span();

        let p_lo = phase.progress_at(lo);
        let p_hi = phase.progress_at(hi);
        prop_assert!(p_lo <= p_hi);
        prop_assert!(p_lo >= start);
        prop_assert!(p_hi <= end);
    }

    /// Any prefix of the event stream keeps session progress monotone
    /// and within 0-100
    #[test]
    fn event_prefix_keeps_progress_monotone(prefix_len in 0usize..132) {
        let events = full_event_stream();
        let prefix_len = prefix_len.min(events.len());

        let mut session = InstallSession::new();
        session.start().expect("start");

        let mut last = 0u8;
        for event in &events[..prefix_len] {
            session.apply(event).expect("in-order event");
            prop_assert!(session.progress() >= last);
            prop_assert!(session.progress() <= 100);
            last = session.progress();
        }
    }

    /// InstallType: to_string -> parse round-trip is identity
    #[test]
    fn install_type_roundtrip(variant in prop_oneof![
        Just(InstallType::Minimal),
        Just(InstallType::Full),
        Just(InstallType::Developer),
        Just(InstallType::Hacker),
        Just(InstallType::Custom),
    ]) {
        let s = variant.to_string();
        let parsed: InstallType = s.parse().expect("should parse");
        prop_assert_eq!(variant, parsed);
    }

    /// Filesystem: to_string -> parse round-trip is identity
    #[test]
    fn filesystem_roundtrip(variant in prop_oneof![
        Just(Filesystem::Ext4),
        Just(Filesystem::Btrfs),
        Just(Filesystem::Xfs),
        Just(Filesystem::F2fs),
    ]) {
        let s = variant.to_string();
        let parsed: Filesystem = s.parse().expect("should parse");
        prop_assert_eq!(variant, parsed);
    }

    /// Arbitrary strings don't crash InstallType parsing
    #[test]
    fn install_type_parse_doesnt_crash(s in ".*") {
        let _ = s.parse::<InstallType>();
    }

    /// Arbitrary strings don't crash Filesystem parsing
    #[test]
    fn filesystem_parse_doesnt_crash(s in ".*") {
        let _ = s.parse::<Filesystem>();
    }

    /// Status text is fixed and non-empty for every phase
    #[test]
    fn status_text_non_empty(phase in phase_strategy()) {
        prop_assert!(!phase.status_text().is_empty());
        prop_assert_eq!(phase.status_text(), phase.status_text());
    }
}

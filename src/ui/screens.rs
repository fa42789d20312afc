//! Per-phase screens
//!
//! One screen per session mode: idle (profile + inventory), running
//! (progress + phase checklist + log), complete, and failed.

use super::header::{render_nav_hints, render_progress_bar, render_session_log, HeaderRenderer};
use crate::app::AppState;
use crate::hardware::format_size;
use crate::phase::InstallPhase;
use crate::theme::{Styles, Theme, UiConstants};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Render the screen for the current session phase
pub fn render(f: &mut Frame, state: &AppState, header: &HeaderRenderer) {
    let session = &state.session;
    if session.is_complete() {
        render_complete(f, state, header);
    } else if session.is_failed() {
        render_failed(f, state, header);
    } else if session.is_running() {
        render_running(f, state, header);
    } else {
        render_idle(f, state, header);
    }
}

fn base_layout(f: &Frame, middle: &[Constraint]) -> Vec<Rect> {
    let mut constraints = vec![
        Constraint::Length(UiConstants::HEADER_HEIGHT),
        Constraint::Length(UiConstants::TITLE_HEIGHT),
    ];
    constraints.extend_from_slice(middle);
    constraints.push(Constraint::Length(UiConstants::NAV_BAR_HEIGHT));

    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area())
        .to_vec()
}

/// Idle screen: profile summary, canned inventory, start hint
fn render_idle(f: &mut Frame, state: &AppState, header: &HeaderRenderer) {
    let chunks = base_layout(f, &[Constraint::Min(10)]);

    header.render_header(f, chunks[0]);
    header.render_title(f, chunks[1], "Arch Linux Installation Rehearsal");

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    render_profile_panel(f, content_chunks[0], state);
    render_inventory_panel(f, content_chunks[1], state);

    render_nav_hints(f, chunks[3], "Enter: start   Esc/q: quit");
}

/// Running screen: gauge, status, phase checklist, log
fn render_running(f: &mut Frame, state: &AppState, header: &HeaderRenderer) {
    let chunks = base_layout(
        f,
        &[
            Constraint::Length(UiConstants::GAUGE_HEIGHT),
            Constraint::Length(UiConstants::STATUS_HEIGHT),
            Constraint::Min(10),
        ],
    );

    header.render_header(f, chunks[0]);
    header.render_title(f, chunks[1], "Installation in Progress");
    render_progress_bar(f, chunks[2], u16::from(state.session.progress()));
    render_status_line(f, chunks[3], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[4]);

    render_phase_checklist(f, content_chunks[0], state);
    render_session_log(f, content_chunks[1], state.session.log());

    let hints = if state.session.is_paused() {
        "Enter/Esc: resume   q: quit"
    } else {
        "Esc: pause   q: quit"
    };
    render_nav_hints(f, chunks[5], hints);
}

/// Completion screen
fn render_complete(f: &mut Frame, state: &AppState, header: &HeaderRenderer) {
    let chunks = base_layout(f, &[Constraint::Min(6)]);

    header.render_header(f, chunks[0]);
    header.render_title(f, chunks[1], "Installation Complete");

    let elapsed = state.session.elapsed();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Installation complete!",
            Styles::success(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Rehearsed installing to {} in {}s",
                state.config.install_disk,
                elapsed.as_secs()
            ),
            Styles::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "No disks were written. This was a rehearsal.",
            Styles::text_muted(),
        )),
    ];

    let message = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(message, chunks[2]);

    render_nav_hints(f, chunks[3], "Esc: reset   q: quit");
}

/// Failure screen. Unreachable in ordinary runs; kept for fault-injected
/// sessions and future failure sources.
fn render_failed(f: &mut Frame, state: &AppState, header: &HeaderRenderer) {
    let chunks = base_layout(f, &[Constraint::Min(6)]);

    header.render_header(f, chunks[0]);
    header.render_title(f, chunks[1], "Installation Failed");

    let failed_at = state
        .session
        .failed_at()
        .map_or_else(|| "unknown phase".to_string(), |p| p.to_string());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("ERROR: Check logs", Styles::error())),
        Line::from(""),
        Line::from(Span::styled(
            format!("Failed during: {}", failed_at),
            Styles::text_secondary(),
        )),
    ];

    let message = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .alignment(Alignment::Center);
    f.render_widget(message, chunks[2]);

    render_nav_hints(f, chunks[3], "Esc: reset   q: quit");
}

/// Current status line with step position and pause indicator
fn render_status_line(f: &mut Frame, area: Rect, state: &AppState) {
    let session = &state.session;

    let mut spans = vec![Span::styled(session.status().to_string(), Styles::text())];
    if let Some((done, total)) = session.step() {
        spans.push(Span::styled(
            format!("  (step {}/{})", done, total),
            Styles::text_muted(),
        ));
    }
    if session.is_paused() {
        spans.push(Span::styled(
            "  [PAUSED - press Enter to continue]",
            Styles::text_secondary(),
        ));
    }

    let status = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, area);
}

/// Checklist of all phases with done/active/pending styling
fn render_phase_checklist(f: &mut Frame, area: Rect, state: &AppState) {
    let session = &state.session;
    let current = session.phase();

    let items: Vec<ListItem> = InstallPhase::sequence()
        .iter()
        .map(|&phase| {
            let completed = current.order() > phase.order() || session.is_complete();
            let active = current == phase;
            let failed = session.failed_at() == Some(phase);
            let marker = if failed {
                "✗"
            } else if completed {
                "✓"
            } else if active {
                "▶"
            } else {
                " "
            };
            let text = format!(" {} {}", marker, phase.label());
            ListItem::new(text).style(Theme::step_style(completed, active, failed))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Phases"));
    f.render_widget(list, area);
}

/// Profile summary panel for the idle screen
fn render_profile_panel(f: &mut Frame, area: Rect, state: &AppState) {
    let config = &state.config;
    let swap = if config.swap {
        config.swap_size.as_str()
    } else {
        "disabled"
    };

    let lines = vec![
        Line::from(""),
        profile_line("Hostname", &config.hostname),
        profile_line("Username", &config.username),
        profile_line("Locale", &config.locale),
        profile_line("Timezone", &config.timezone),
        profile_line("Keymap", &config.keymap),
        profile_line("Target disk", &config.install_disk),
        profile_line("Filesystem", &config.root_filesystem.to_string()),
        profile_line("Swap", swap),
        profile_line("Profile", &config.install_type.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Enter to rehearse this install",
            Styles::text_muted(),
        )),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Profile ")
            .title_style(Styles::title()),
    );
    f.render_widget(panel, area);
}

/// Canned hardware/disk panel for the idle screen
fn render_inventory_panel(f: &mut Frame, area: Rect, state: &AppState) {
    let hw = &state.hardware;

    let mut lines = vec![
        Line::from(""),
        profile_line("CPU", hw.cpu_model),
        profile_line("Cores", &format!("{} ({} threads)", hw.cpu_cores, hw.cpu_threads)),
        profile_line("Memory", &format_size(hw.memory_total)),
        profile_line("Firmware", &hw.firmware.to_string()),
        profile_line("Interfaces", &hw.interfaces.join(", ")),
        Line::from(""),
    ];
    for disk in &state.disks {
        lines.push(profile_line("Disk", &disk.to_string()));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Detected Hardware ")
            .title_style(Styles::title()),
    );
    f.render_widget(panel, area);
}

fn profile_line(name: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", name), Styles::text_secondary()),
        Span::styled(value.to_string(), Styles::text()),
    ])
}

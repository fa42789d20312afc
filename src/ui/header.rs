//! Header and common widget rendering
//!
//! ASCII art header, title rendering, the overall progress gauge, and the
//! session log panel.

use crate::theme::{Colors, Styles};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

/// Header renderer containing the ASCII art header
pub struct HeaderRenderer {
    /// ASCII art header lines
    header_lines: Vec<Line<'static>>,
}

impl Default for HeaderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRenderer {
    /// Create a new header renderer
    pub fn new() -> Self {
        Self {
            header_lines: Self::create_header(),
        }
    }

    /// Render the ASCII art header
    pub fn render_header(&self, f: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let header = Paragraph::new(self.header_lines.clone())
            .block(Block::default().borders(Borders::NONE))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// Render a title section
    pub fn render_title(&self, f: &mut Frame, area: Rect, title: &str) {
        let title_widget = Paragraph::new(title)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Colors::PRIMARY));
        f.render_widget(title_widget, area);
    }

    /// Create the ASCII art header
    fn create_header() -> Vec<Line<'static>> {
        [
            r"    _             _     ____  _           ",
            r"   / \   _ __ ___| |__ / ___|(_)_ __ ___  ",
            r"  / _ \ | '__/ __| '_ \\___ \| | '_ ` _ \ ",
            r" / ___ \| | | (__| | | |___) | | | | | | |",
            r"/_/   \_\_|  \___|_| |_|____/|_|_| |_| |_|",
        ]
        .iter()
        .map(|text| {
            Line::from(vec![Span::styled(
                *text,
                Style::default().fg(Colors::PRIMARY),
            )])
        })
        .collect()
    }
}

/// Render the overall progress gauge
pub fn render_progress_bar(f: &mut Frame, area: Rect, progress: u16) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Installation Progress"),
        )
        .gauge_style(Styles::progress())
        .percent(progress.min(100));
    f.render_widget(gauge, area);
}

/// Render the session log, newest lines at the bottom
pub fn render_session_log<'a, I>(f: &mut Frame, area: Rect, lines: I)
where
    I: Iterator<Item = &'a str>,
{
    let all: Vec<&str> = lines.collect();
    let visible = area.height.saturating_sub(2) as usize;
    let start = all.len().saturating_sub(visible);

    let items: Vec<ListItem> = all[start..]
        .iter()
        .map(|line| ListItem::new(*line).style(Styles::text_secondary()))
        .collect();

    let log_list = List::new(items).block(Block::default().borders(Borders::ALL).title("Log"));
    f.render_widget(log_list, area);
}

/// Render the navigation hint line
pub fn render_nav_hints(f: &mut Frame, area: Rect, text: &str) {
    let hints = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Styles::nav_hint());
    f.render_widget(hints, area);
}

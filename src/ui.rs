//! UI rendering for the roster screen.
//!
//! A thin consumer of [`select_view`]: every frame maps the current
//! machine and gate state to one view variant and draws it. Minimal dark
//! theme, one row per user, keybind hints in the footer.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::connectivity::ConnectivityState;
use crate::models::User;
use crate::view_state::{initial_badge, select_view, ViewVariant};

// ============================================================================
// Minimal Dark Color Theme
// ============================================================================

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color for highlights and the badge
pub const COLOR_ACCENT: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Healthy/connected elements
pub const COLOR_OK: Color = Color::LightGreen;

/// Probe-pending elements
pub const COLOR_PENDING: Color = Color::Yellow;

/// Failure elements
pub const COLOR_ERR: Color = Color::LightRed;

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

fn spinner_frame(tick: u64) -> char {
    SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()]
}

// ============================================================================
// Main UI Rendering
// ============================================================================

/// Render the whole screen for the current frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    let view = select_view(app.machine.state(), app.gate.state());
    match view {
        ViewVariant::Checking => render_checking(frame, chunks[1], app),
        ViewVariant::Disconnected => render_disconnected(frame, chunks[1]),
        ViewVariant::Loading => render_loading(frame, chunks[1], app),
        ViewVariant::Empty => render_empty(frame, chunks[1]),
        ViewVariant::Roster(users) => render_roster(frame, chunks[1], users),
        ViewVariant::Failed(message) => render_failed(frame, chunks[1], message),
    }

    render_footer(frame, chunks[2], app);
}

// ============================================================================
// Header
// ============================================================================

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)])
        .split(inner);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " ROSTER",
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  user directory", Style::default().fg(COLOR_DIM)),
    ]));
    frame.render_widget(title, columns[0]);

    let badge = connectivity_badge(app.gate.state(), app.tick_count);
    frame.render_widget(Paragraph::new(badge).alignment(Alignment::Right), columns[1]);
}

fn connectivity_badge(state: ConnectivityState, tick: u64) -> Line<'static> {
    match state {
        ConnectivityState::Unknown => Line::from(Span::styled(
            format!("{} checking… ", spinner_frame(tick)),
            Style::default().fg(COLOR_PENDING),
        )),
        ConnectivityState::Connected => Line::from(Span::styled(
            "● backend connected ",
            Style::default().fg(COLOR_OK),
        )),
        ConnectivityState::Disconnected => Line::from(Span::styled(
            "● backend unreachable ",
            Style::default().fg(COLOR_ERR),
        )),
    }
}

// ============================================================================
// Body Variants
// ============================================================================

fn render_checking(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Checking backend connection…", spinner_frame(app.tick_count)),
            Style::default().fg(COLOR_PENDING),
        ))
        .alignment(Alignment::Center),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_disconnected(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Cannot reach the backend service",
            Style::default()
                .fg(COLOR_ERR)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            "press r to reconnect",
            Style::default().fg(COLOR_DIM),
        ))
        .alignment(Alignment::Center),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_loading(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {} Loading users…", spinner_frame(app.tick_count)),
            Style::default().fg(COLOR_ACCENT),
        )),
        Line::from(""),
    ];
    // Three placeholder rows while the fetch is in flight.
    for _ in 0..3 {
        lines.push(Line::from(Span::styled(
            "  ░░░  ░░░░░░░░░░░░░░  ░░░░░░░░░░░░░░░░░░░░",
            Style::default().fg(COLOR_DIM),
        )));
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No users yet",
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            "The directory has no user records",
            Style::default().fg(COLOR_DIM),
        ))
        .alignment(Alignment::Center),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_roster(frame: &mut Frame, area: Rect, users: &[User]) {
    let mut lines = vec![Line::from("")];
    for user in users {
        lines.push(user_row(user));
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// One display row per user: badge, name, email, raw id.
fn user_row(user: &User) -> Line<'_> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(
            format!(" {} ", initial_badge(&user.name)),
            Style::default()
                .fg(Color::Black)
                .bg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{:<20}", user.name),
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{:<28}", user.email), Style::default().fg(Color::Gray)),
        Span::styled(format!("id {}", user.id), Style::default().fg(COLOR_DIM)),
    ])
}

fn render_failed(frame: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("⚠ {}", message),
            Style::default()
                .fg(COLOR_ERR)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            "press r to retry",
            Style::default().fg(COLOR_DIM),
        ))
        .alignment(Alignment::Center),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

// ============================================================================
// Footer
// ============================================================================

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(32)])
        .split(area);

    frame.render_widget(
        Paragraph::new(key_hints(app)).style(Style::default().fg(COLOR_DIM)),
        columns[0],
    );

    if let Some(summary) = roster_summary(app) {
        frame.render_widget(
            Paragraph::new(summary)
                .style(Style::default().fg(COLOR_DIM))
                .alignment(Alignment::Right),
            columns[1],
        );
    }
}

/// Keybind hints for the current view. The refresh hint disappears while
/// a fetch is outstanding, mirroring the guard in the machine.
fn key_hints(app: &App) -> Line<'static> {
    let hints = match app.gate.state() {
        ConnectivityState::Unknown => " q quit".to_string(),
        ConnectivityState::Disconnected => " r reconnect · q quit".to_string(),
        ConnectivityState::Connected => {
            if app.machine.is_loading() {
                " loading… · q quit".to_string()
            } else {
                " r refresh · q quit".to_string()
            }
        }
    };
    Line::from(hints)
}

/// Footer summary under a non-empty roster.
fn roster_summary(app: &App) -> Option<Line<'static>> {
    match select_view(app.machine.state(), app.gate.state()) {
        ViewVariant::Roster(users) => {
            let mut summary = format!("{} users", users.len());
            if let Some(updated_at) = app.updated_at {
                summary.push_str(&format!(" · updated {}", updated_at.format("%H:%M:%S")));
            }
            summary.push(' ');
            Some(Line::from(summary))
        }
        _ => None,
    }
}

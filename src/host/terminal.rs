//! Terminal preview host
//!
//! Draws the window layout with ratatui: one bordered block per pane showing
//! the address it would load. Useful on headless kiosks and for checking a
//! configuration before deploying it.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tracing::info;

use crate::constants::{APP_VERSION, WINDOW_TITLE};
use crate::host::{HostError, RenderHost};
use crate::layout::{Arrangement, Pane, PaneGeometry};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// What the preview shows
#[derive(Clone, Debug)]
pub struct PreviewState {
    pub mode: String,
    pub arrangement: Arrangement,
    pub panes: Vec<(Pane, PaneGeometry)>,
    pub placeholder: Option<String>,
    pub selected: usize,
}

impl PreviewState {
    fn select_next(&mut self) {
        if !self.panes.is_empty() {
            self.selected = (self.selected + 1) % self.panes.len();
        }
    }

    fn select_prev(&mut self) {
        if !self.panes.is_empty() {
            self.selected = (self.selected + self.panes.len() - 1) % self.panes.len();
        }
    }
}

pub struct TerminalHost {
    state: PreviewState,
}

impl TerminalHost {
    pub fn new(mode: impl Into<String>, arrangement: Arrangement) -> Self {
        TerminalHost {
            state: PreviewState {
                mode: mode.into(),
                arrangement,
                panes: Vec::new(),
                placeholder: None,
                selected: 0,
            },
        }
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }
}

impl RenderHost for TerminalHost {
    fn render_url(&mut self, pane: &Pane, geometry: PaneGeometry) -> Result<(), HostError> {
        self.state.panes.push((pane.clone(), geometry));
        Ok(())
    }

    fn show_placeholder(&mut self, message: &str) -> Result<(), HostError> {
        self.state.placeholder = Some(message.to_string());
        Ok(())
    }

    fn wait(&mut self) -> Result<(), HostError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let _guard = TerminalGuard;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        info!(panes = self.state.panes.len(), "Terminal preview started");

        loop {
            terminal.draw(|f| draw_preview(f, &self.state))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                        KeyCode::Tab | KeyCode::Right => self.state.select_next(),
                        KeyCode::BackTab | KeyCode::Left => self.state.select_prev(),
                        _ => {}
                    }
                }
            }
        }

        info!("Terminal preview closed");
        Ok(())
    }
}

/// Draw the whole preview into the frame
pub fn draw_preview(f: &mut Frame, state: &PreviewState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(0),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", WINDOW_TITLE),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::raw(" "),
        Span::styled(
            format!("mode: {}", state.mode),
            Style::default().fg(Color::Gray),
        ),
    ]);
    f.render_widget(Paragraph::new(title), chunks[0]);

    draw_panes(f, state, chunks[1]);

    let status = format!(
        " Tab/arrows:select pane | q:quit | {} pane(s) | v{} ",
        state.panes.len(),
        APP_VERSION
    );
    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}

fn draw_panes(f: &mut Frame, state: &PreviewState, area: Rect) {
    if state.panes.is_empty() {
        let message = state.placeholder.as_deref().unwrap_or("Nothing to display.");
        let block = Block::default().borders(Borders::ALL);
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let columns = match state.arrangement {
        Arrangement::Single => vec![area],
        Arrangement::Row => {
            let count = state.panes.len() as u32;
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, count); state.panes.len()])
                .split(area)
                .to_vec()
        }
    };

    for (i, ((pane, geometry), column)) in state.panes.iter().zip(columns).enumerate() {
        let border_style = if i == state.selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", pane.label));

        let lines = vec![
            Line::from(Span::styled(pane.url.clone(), Style::default().fg(Color::Green))),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "{}x{} at {},{}",
                    geometry.width, geometry.height, geometry.x, geometry.y
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, column);
    }
}

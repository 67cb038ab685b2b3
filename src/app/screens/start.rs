//! Start screen implementation
//!
//! Title card with the quiz name, the number of questions and a start prompt.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::quiz::SessionSnapshot;

/// Start screen component
#[derive(Debug, Default)]
pub struct StartScreen;

impl StartScreen {
    pub fn new() -> Self {
        Self
    }

    /// Subtitle shown under the title
    pub fn subtitle(total: usize) -> String {
        match total {
            1 => "1 question".to_string(),
            n => format!("{} questions", n),
        }
    }

    /// Render the start screen
    pub fn render(&self, f: &mut Frame, snapshot: &SessionSnapshot<'_>) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3), // Title
                Constraint::Length(2), // Subtitle
                Constraint::Length(3), // Start button
                Constraint::Min(0),
                Constraint::Length(3), // Help text
            ])
            .split(size);

        let title = Paragraph::new("Wizarding Quiz")
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        f.render_widget(title, chunks[1]);

        let subtitle = Paragraph::new(Self::subtitle(snapshot.total))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(subtitle, chunks[2]);

        self.render_start_button(f, centered(chunks[3], 30));
        render_help(f, chunks[5], &[("Enter", "Start quiz"), ("Q", "Quit")]);
    }

    fn render_start_button(&self, f: &mut Frame, area: Rect) {
        let button = Paragraph::new("Start quiz")
            .style(
                Style::default()
                    .fg(Color::Blue)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        f.render_widget(button, area);
    }
}

/// Horizontally centre a fixed-width column inside `area`
pub(crate) fn centered(area: Rect, width: u16) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(area)[1]
}

/// Key hint footer shared by all screens
pub(crate) fn render_help(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(key.to_string(), key_style),
                Span::raw(format!(" {}  ", label)),
            ]
        })
        .collect();

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(help, area);
}

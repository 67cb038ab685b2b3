//! Result screen implementation
//!
//! Final score, band feedback and the way back to the start screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::start::{centered, render_help};
use crate::quiz::{ResultBand, SessionSnapshot};

/// Result screen component
#[derive(Debug, Default)]
pub struct ResultScreen;

impl ResultScreen {
    pub fn new() -> Self {
        Self
    }

    /// Score summary line
    pub fn summary(score: usize, total: usize) -> String {
        format!("You got {} of {} right!", score, total)
    }

    fn band_color(band: ResultBand) -> Color {
        match band {
            ResultBand::Zero => Color::Red,
            ResultBand::Low => Color::Magenta,
            ResultBand::High => Color::Cyan,
            ResultBand::Perfect => Color::Green,
        }
    }

    /// Render the result screen
    pub fn render(&self, f: &mut Frame, snapshot: &SessionSnapshot<'_>) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3), // Title
                Constraint::Length(4), // Score and feedback
                Constraint::Length(3), // Restart button
                Constraint::Min(0),
                Constraint::Length(3), // Help text
            ])
            .split(size);

        let title = Paragraph::new("Quiz finished!")
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

        let mut lines = vec![
            Line::from(""),
            Line::from(Self::summary(snapshot.score, snapshot.total)),
        ];
        if let Some(band) = snapshot.band {
            lines.push(Line::styled(
                band.feedback(),
                Style::default().fg(Self::band_color(band)),
            ));
        }
        let body = Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(body, chunks[2]);

        let button = Paragraph::new("Back to start")
            .style(
                Style::default()
                    .fg(Color::Blue)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(button, centered(chunks[3], 30));

        render_help(f, chunks[5], &[("Enter", "Back to start"), ("Q", "Quit")]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        assert_eq!(ResultScreen::summary(7, 10), "You got 7 of 10 right!");
    }

    #[test]
    fn test_band_colors_distinct() {
        let colors: Vec<Color> = [
            ResultBand::Zero,
            ResultBand::Low,
            ResultBand::High,
            ResultBand::Perfect,
        ]
        .iter()
        .map(|b| ResultScreen::band_color(*b))
        .collect();
        for (i, a) in colors.iter().enumerate() {
            assert!(colors[i + 1..].iter().all(|b| b != a));
        }
    }
}

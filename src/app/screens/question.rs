//! Question screen implementation
//!
//! Shows the current question, its answers coloured by reveal state,
//! a selection cursor and the running score.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::start::render_help;
use crate::quiz::{AnswerVisual, Phase, SessionSnapshot};

/// Question screen component with answer cursor
#[derive(Debug)]
pub struct QuestionScreen {
    selected_index: usize,
    list_state: ListState,
}

impl QuestionScreen {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected_index: 0,
            list_state,
        }
    }

    /// Cursor back to the first answer, for a new question
    pub fn reset(&mut self) {
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Move cursor up, wrapping to the last of `answer_count`
    pub fn select_previous(&mut self, answer_count: usize) {
        if answer_count == 0 {
            return;
        }
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else {
            self.selected_index = answer_count - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Move cursor down, wrapping to the first
    pub fn select_next(&mut self, answer_count: usize) {
        if answer_count == 0 {
            return;
        }
        if self.selected_index + 1 < answer_count {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Style for an answer row
    pub fn answer_style(visual: AnswerVisual) -> Style {
        match visual {
            AnswerVisual::Neutral => Style::default().fg(Color::Yellow),
            AnswerVisual::Correct => Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
            AnswerVisual::SelectedWrong => Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Render the question screen
    pub fn render(&mut self, f: &mut Frame, snapshot: &SessionSnapshot<'_>) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Progress
                Constraint::Length(5), // Question
                Constraint::Min(6),    // Answers
                Constraint::Length(3), // Score
                Constraint::Length(3), // Help text
            ])
            .split(size);

        let progress = Paragraph::new(format!(
            "Question {} of {}",
            snapshot.position + 1,
            snapshot.total
        ))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(progress, chunks[0]);

        let question = Paragraph::new(snapshot.question.unwrap_or_default())
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(question, chunks[1]);

        self.render_answers(f, chunks[2], snapshot);

        let score = Paragraph::new(format!("Score: {}", snapshot.score))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(score, chunks[3]);

        render_help(
            f,
            chunks[4],
            &[("↑↓/1-9", "Choose"), ("Enter", "Answer"), ("Esc", "Start screen"), ("Q", "Quit")],
        );
    }

    fn render_answers(&mut self, f: &mut Frame, area: Rect, snapshot: &SessionSnapshot<'_>) {
        let items: Vec<ListItem> = snapshot
            .answers
            .iter()
            .enumerate()
            .map(|(i, answer)| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{}. ", i + 1)),
                    Span::raw(answer.text.to_string()),
                ]))
                .style(Self::answer_style(answer.visual))
            })
            .collect();

        // Cursor only while input is accepted
        let awaiting = snapshot.phase == Phase::AwaitingAnswer;
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .highlight_style(if awaiting {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            })
            .highlight_symbol(if awaiting { ">> " } else { "   " });

        let area = super::start::centered(area, area.width.saturating_mul(3) / 4);
        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl Default for QuestionScreen {
    fn default() -> Self {
        Self::new()
    }
}

//! Quiz controller
//!
//! Glue between input, the session state machine, the advance timer and
//! the audio loop. Holds no terminal, so it can be driven from tests.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{
    app::{
        input::InputAction,
        screens::{QuestionScreen, ResultScreen, StartScreen},
    },
    audio::{AudioBackend, AudioLoop},
    config::QuizConfig,
    quiz::{
        AdvanceOutcome, AdvanceTimer, AdvanceToken, QuestionBank, QuizSession, Screen,
        ScoreBands, SubmitOutcome,
    },
    Result,
};

/// Timer tokens that may queue up between two draws
const ADVANCE_CHANNEL_CAPACITY: usize = 8;

/// Drives one quiz session in response to input and timer events
pub struct Controller {
    session: QuizSession,
    timer: AdvanceTimer,
    advance_rx: mpsc::Receiver<AdvanceToken>,
    audio: AudioLoop,
    start_screen: StartScreen,
    question_screen: QuestionScreen,
    result_screen: ResultScreen,
    should_quit: bool,
}

impl Controller {
    /// Build from configuration: question bank, bands, delay and audio
    pub fn from_config(config: &QuizConfig) -> Result<Self> {
        let bank = config.load_question_bank()?;
        let bands = config.score_bands(bank.len())?;
        let backend = config.audio_backend()?;
        Ok(Self::new(
            Arc::new(bank),
            bands,
            config.advance_delay,
            backend,
        ))
    }

    pub fn new(
        bank: Arc<QuestionBank>,
        bands: ScoreBands,
        advance_delay: Duration,
        audio: Box<dyn AudioBackend>,
    ) -> Self {
        let (tx, advance_rx) = mpsc::channel(ADVANCE_CHANNEL_CAPACITY);
        Self {
            session: QuizSession::new(bank, bands),
            timer: AdvanceTimer::new(advance_delay, tx),
            advance_rx,
            audio: AudioLoop::new(audio),
            start_screen: StartScreen::new(),
            question_screen: QuestionScreen::new(),
            result_screen: ResultScreen::new(),
            should_quit: false,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_audio_active(&self) -> bool {
        self.audio.is_active()
    }

    pub fn is_advance_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn cursor(&self) -> usize {
        self.question_screen.selected_index()
    }

    /// Render whichever screen the session is on
    pub fn render(&mut self, f: &mut ratatui::Frame) {
        let snapshot = self.session.snapshot();
        match snapshot.screen {
            Screen::Start => self.start_screen.render(f, &snapshot),
            Screen::Question => self.question_screen.render(f, &snapshot),
            Screen::Result => self.result_screen.render(f, &snapshot),
        }
    }

    /// Apply every advance the timer has delivered so far
    pub fn drain_advances(&mut self) {
        while let Ok(token) = self.advance_rx.try_recv() {
            self.apply_advance(token);
        }
    }

    /// Wait for the next delivered advance and apply it
    pub async fn next_advance(&mut self) -> Option<AdvanceOutcome> {
        let token = self.advance_rx.recv().await?;
        Some(self.apply_advance(token))
    }

    fn apply_advance(&mut self, token: AdvanceToken) -> AdvanceOutcome {
        self.timer.settle(token);
        let outcome = self.session.advance_with(token);
        match outcome {
            AdvanceOutcome::NextQuestion(_) => self.question_screen.reset(),
            AdvanceOutcome::Finished => self.audio.deactivate(),
            AdvanceOutcome::Ignored => {}
        }
        outcome
    }

    /// Handle a user action on the active screen
    pub fn handle_action(&mut self, action: InputAction) {
        if action == InputAction::Quit {
            self.shutdown();
            return;
        }

        let screen = self.session.snapshot().screen;
        match screen {
            Screen::Start => self.handle_start_screen_events(action),
            Screen::Question => self.handle_question_screen_events(action),
            Screen::Result => self.handle_result_screen_events(action),
        }
    }

    fn handle_start_screen_events(&mut self, action: InputAction) {
        match action {
            InputAction::Select => self.start(),
            InputAction::Back => self.shutdown(),
            _ => {}
        }
    }

    fn handle_question_screen_events(&mut self, action: InputAction) {
        let answer_count = self
            .session
            .current_question()
            .map(|q| q.answers().len())
            .unwrap_or(0);

        match action {
            InputAction::Up => self.question_screen.select_previous(answer_count),
            InputAction::Down => self.question_screen.select_next(answer_count),
            InputAction::Select => self.submit(self.question_screen.selected_index()),
            InputAction::Choose(index) => self.submit(index),
            InputAction::Back => self.restart(),
            _ => {}
        }
    }

    fn handle_result_screen_events(&mut self, action: InputAction) {
        if matches!(action, InputAction::Select | InputAction::Back) {
            self.restart();
        }
    }

    /// Leave the start screen and begin the quiz
    pub fn start(&mut self) {
        if !self.session.begin() {
            return;
        }
        self.question_screen.reset();
        if let Err(e) = self.audio.activate() {
            warn!(error = %e, "background audio unavailable");
        }
    }

    /// Submit an answer; schedules the advance on success
    pub fn submit(&mut self, index: usize) {
        match self.session.submit_answer(index) {
            Ok(SubmitOutcome::Revealed { token, .. }) => self.timer.schedule(token),
            Ok(SubmitOutcome::Ignored) => {}
            Err(e) => debug!(error = %e, "answer rejected"),
        }
    }

    /// Back to the start screen with a fresh session
    pub fn restart(&mut self) {
        self.timer.cancel();
        self.audio.deactivate();
        self.session.restart();
        self.question_screen.reset();
    }

    /// Cancel pending work and release audio before exit
    pub fn shutdown(&mut self) {
        self.timer.cancel();
        self.audio.deactivate();
        self.should_quit = true;
    }
}

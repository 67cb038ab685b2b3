//! Quiz session state machine
//!
//! Owns position, per-question answer state and score. Screens read a
//! snapshot and forward user input; the advance timer feeds tokens back in.

use std::sync::Arc;

use tracing::{debug, info};

use super::bands::{ResultBand, ScoreBands};
use super::question::{Question, QuestionBank};
use crate::{QuizError, Result};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Start screen, nothing answered yet
    #[default]
    NotStarted,
    /// Current question accepts one answer
    AwaitingAnswer,
    /// Answer locked and revealed, waiting for the advance timer
    AnswerRevealed,
    /// Every question answered, score frozen
    Finished,
}

/// Mutable state of one run through the bank
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub phase: Phase,
    pub current_index: usize,
    /// Present only while the answer is revealed
    pub selected_answer: Option<usize>,
    pub score: usize,
}

/// Identifies the reveal that scheduled an advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceToken {
    pub epoch: u64,
    pub question_index: usize,
}

/// Outcome of `submit_answer`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Answer recorded; schedule `token` for the advance
    Revealed { token: AdvanceToken, correct: bool },
    /// Not awaiting an answer, nothing changed
    Ignored,
}

/// Outcome of an advance attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    NextQuestion(usize),
    Finished,
    /// Stale or out-of-phase advance, nothing changed
    Ignored,
}

/// Top-level screen implied by the phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Question,
    Result,
}

/// Visual state of one answer option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerVisual {
    Neutral,
    Correct,
    SelectedWrong,
}

/// One answer as a presenter should draw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerView<'a> {
    pub text: &'a str,
    pub visual: AnswerVisual,
}

/// Read-only view of the session for presenters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot<'a> {
    pub screen: Screen,
    pub phase: Phase,
    /// Zero-based position in the bank
    pub position: usize,
    pub total: usize,
    pub question: Option<&'a str>,
    pub answers: Vec<AnswerView<'a>>,
    pub score: usize,
    /// Set once the session is finished
    pub band: Option<ResultBand>,
}

/// The quiz session state machine
#[derive(Debug)]
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    bands: ScoreBands,
    state: SessionState,
    epoch: u64,
}

impl QuizSession {
    /// Create a session on the start screen
    pub fn new(bank: Arc<QuestionBank>, bands: ScoreBands) -> Self {
        Self {
            bank,
            bands,
            state: SessionState::default(),
            epoch: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Question at the current position, if the session is on one
    pub fn current_question(&self) -> Option<&Question> {
        match self.state.phase {
            Phase::AwaitingAnswer | Phase::AnswerRevealed => self.bank.get(self.state.current_index),
            Phase::NotStarted | Phase::Finished => None,
        }
    }

    /// Leave the start screen; returns false if already started
    pub fn begin(&mut self) -> bool {
        if self.state.phase != Phase::NotStarted {
            return false;
        }
        self.state = SessionState {
            phase: Phase::AwaitingAnswer,
            ..SessionState::default()
        };
        info!(epoch = self.epoch, questions = self.bank.len(), "quiz session started");
        true
    }

    /// Lock in an answer for the current question
    ///
    /// Out-of-range indices are rejected without touching state. A second
    /// submission before the advance is ignored.
    pub fn submit_answer(&mut self, index: usize) -> Result<SubmitOutcome> {
        if self.state.phase != Phase::AwaitingAnswer {
            debug!(index, phase = ?self.state.phase, "answer ignored");
            return Ok(SubmitOutcome::Ignored);
        }
        let question = self
            .bank
            .get(self.state.current_index)
            .ok_or_else(|| QuizError::InvalidContent("current question missing".to_string()))?;
        if index >= question.answers().len() {
            return Err(QuizError::InvalidAnswer {
                index,
                available: question.answers().len(),
            });
        }

        let correct = question.is_correct(index);
        if correct {
            self.state.score += 1;
        }
        self.state.selected_answer = Some(index);
        self.state.phase = Phase::AnswerRevealed;
        debug!(
            question = self.state.current_index,
            index,
            correct,
            score = self.state.score,
            "answer revealed"
        );

        Ok(SubmitOutcome::Revealed {
            token: self.token(),
            correct,
        })
    }

    /// Advance past the revealed answer at the current position
    pub fn advance(&mut self) -> AdvanceOutcome {
        self.advance_with(self.token())
    }

    /// Advance only if `token` still names the revealed question of this run
    pub fn advance_with(&mut self, token: AdvanceToken) -> AdvanceOutcome {
        if self.state.phase != Phase::AnswerRevealed || token != self.token() {
            debug!(?token, phase = ?self.state.phase, "stale advance ignored");
            return AdvanceOutcome::Ignored;
        }

        self.state.selected_answer = None;
        if self.state.current_index + 1 < self.bank.len() {
            self.state.current_index += 1;
            self.state.phase = Phase::AwaitingAnswer;
            debug!(question = self.state.current_index, "next question");
            AdvanceOutcome::NextQuestion(self.state.current_index)
        } else {
            self.state.phase = Phase::Finished;
            info!(
                score = self.state.score,
                total = self.bank.len(),
                band = ?self.band(),
                "quiz session finished"
            );
            AdvanceOutcome::Finished
        }
    }

    /// Discard the run and return to the start screen
    pub fn restart(&mut self) {
        self.epoch += 1;
        self.state = SessionState::default();
        debug!(epoch = self.epoch, "session restarted");
    }

    /// Result band, available once finished
    pub fn band(&self) -> Option<ResultBand> {
        match self.state.phase {
            Phase::Finished => Some(self.bands.band_for(self.state.score)),
            _ => None,
        }
    }

    /// Presenter view of the current state
    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        let screen = match self.state.phase {
            Phase::NotStarted => Screen::Start,
            Phase::AwaitingAnswer | Phase::AnswerRevealed => Screen::Question,
            Phase::Finished => Screen::Result,
        };

        let (question, answers) = match self.current_question() {
            Some(q) => {
                let answers = q
                    .answers()
                    .iter()
                    .enumerate()
                    .map(|(i, text)| AnswerView {
                        text: text.as_str(),
                        visual: self.answer_visual(q, i),
                    })
                    .collect();
                (Some(q.text()), answers)
            }
            None => (None, Vec::new()),
        };

        SessionSnapshot {
            screen,
            phase: self.state.phase,
            position: self.state.current_index,
            total: self.bank.len(),
            question,
            answers,
            score: self.state.score,
            band: self.band(),
        }
    }

    fn answer_visual(&self, question: &Question, index: usize) -> AnswerVisual {
        match self.state.selected_answer {
            None => AnswerVisual::Neutral,
            Some(_) if question.is_correct(index) => AnswerVisual::Correct,
            Some(selected) if selected == index => AnswerVisual::SelectedWrong,
            Some(_) => AnswerVisual::Neutral,
        }
    }

    fn token(&self) -> AdvanceToken {
        AdvanceToken {
            epoch: self.epoch,
            question_index: self.state.current_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(correct: &[usize]) -> Arc<QuestionBank> {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Question::new(
                    format!("Question {}", i),
                    vec!["a".to_string(), "b".to_string(), "c".to_string()],
                    c,
                )
                .unwrap()
            })
            .collect();
        Arc::new(QuestionBank::new(questions).unwrap())
    }

    fn session(correct: &[usize]) -> QuizSession {
        let bank = bank(correct);
        let bands = ScoreBands::for_total(bank.len());
        QuizSession::new(bank, bands)
    }

    #[test]
    fn test_new_session_is_not_started() {
        let s = session(&[0, 1]);
        assert_eq!(s.state(), &SessionState::default());
        assert_eq!(s.snapshot().screen, Screen::Start);
        assert!(s.current_question().is_none());
    }

    #[test]
    fn test_begin() {
        let mut s = session(&[0, 1]);
        assert!(s.begin());
        assert_eq!(s.state().phase, Phase::AwaitingAnswer);
        assert_eq!(s.state().current_index, 0);
        assert_eq!(s.state().score, 0);
        assert!(!s.begin());
    }

    #[test]
    fn test_submit_before_begin_ignored() {
        let mut s = session(&[0]);
        assert_eq!(s.submit_answer(0).unwrap(), SubmitOutcome::Ignored);
        assert_eq!(s.state().score, 0);
    }

    #[test]
    fn test_correct_answer_scores() {
        let mut s = session(&[1, 0]);
        s.begin();
        let outcome = s.submit_answer(1).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Revealed { correct: true, .. }));
        assert_eq!(s.state().score, 1);
        assert_eq!(s.state().phase, Phase::AnswerRevealed);
        assert_eq!(s.state().selected_answer, Some(1));
    }

    #[test]
    fn test_wrong_answer_does_not_score() {
        let mut s = session(&[1, 0]);
        s.begin();
        let outcome = s.submit_answer(2).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Revealed { correct: false, .. }));
        assert_eq!(s.state().score, 0);
    }

    #[test]
    fn test_double_submission_ignored() {
        let mut s = session(&[0, 0]);
        s.begin();
        s.submit_answer(0).unwrap();
        let before = s.state().clone();
        assert_eq!(s.submit_answer(1).unwrap(), SubmitOutcome::Ignored);
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn test_out_of_range_answer_rejected() {
        let mut s = session(&[0]);
        s.begin();
        let err = s.submit_answer(3).unwrap_err();
        assert!(matches!(err, QuizError::InvalidAnswer { index: 3, available: 3 }));
        assert_eq!(s.state().phase, Phase::AwaitingAnswer);
        assert_eq!(s.state().selected_answer, None);
    }

    #[test]
    fn test_advance_outside_reveal_is_noop() {
        let mut s = session(&[0, 0]);
        assert_eq!(s.advance(), AdvanceOutcome::Ignored);
        s.begin();
        let before = s.state().clone();
        assert_eq!(s.advance(), AdvanceOutcome::Ignored);
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn test_advance_moves_to_next_question() {
        let mut s = session(&[0, 0]);
        s.begin();
        s.submit_answer(0).unwrap();
        assert_eq!(s.advance(), AdvanceOutcome::NextQuestion(1));
        assert_eq!(s.state().phase, Phase::AwaitingAnswer);
        assert_eq!(s.state().selected_answer, None);
    }

    #[test]
    fn test_finish_freezes_score() {
        let mut s = session(&[0]);
        s.begin();
        s.submit_answer(0).unwrap();
        assert_eq!(s.advance(), AdvanceOutcome::Finished);
        assert_eq!(s.state().phase, Phase::Finished);

        assert_eq!(s.submit_answer(0).unwrap(), SubmitOutcome::Ignored);
        assert_eq!(s.advance(), AdvanceOutcome::Ignored);
        assert_eq!(s.state().score, 1);
        assert_eq!(s.band(), Some(ResultBand::Perfect));
    }

    #[test]
    fn test_stale_token_from_previous_question_ignored() {
        let mut s = session(&[0, 0, 0]);
        s.begin();
        let SubmitOutcome::Revealed { token: first, .. } = s.submit_answer(0).unwrap() else {
            panic!("expected reveal");
        };
        assert_eq!(s.advance_with(first), AdvanceOutcome::NextQuestion(1));
        s.submit_answer(0).unwrap();
        assert_eq!(s.advance_with(first), AdvanceOutcome::Ignored);
        assert_eq!(s.state().current_index, 1);
    }

    #[test]
    fn test_stale_token_after_fast_restart_ignored() {
        let mut s = session(&[0, 0]);
        s.begin();
        let SubmitOutcome::Revealed { token, .. } = s.submit_answer(0).unwrap() else {
            panic!("expected reveal");
        };
        s.restart();
        s.begin();
        s.submit_answer(1).unwrap();
        // Same question index, previous run
        assert_eq!(s.advance_with(token), AdvanceOutcome::Ignored);
        assert_eq!(s.state().phase, Phase::AnswerRevealed);
    }

    #[test]
    fn test_restart_resets_to_fresh_state() {
        let mut s = session(&[0, 0]);
        s.begin();
        s.submit_answer(0).unwrap();
        s.advance();
        s.submit_answer(0).unwrap();
        s.advance();
        assert_eq!(s.state().phase, Phase::Finished);

        s.restart();
        assert_eq!(s.state(), &SessionState::default());
        assert!(s.begin());
        assert_eq!(s.state().score, 0);
        assert_eq!(s.state().current_index, 0);
    }

    #[test]
    fn test_snapshot_answer_visuals() {
        let mut s = session(&[0]);
        s.begin();
        let snap = s.snapshot();
        assert_eq!(snap.screen, Screen::Question);
        assert_eq!(snap.question, Some("Question 0"));
        assert!(snap.answers.iter().all(|a| a.visual == AnswerVisual::Neutral));

        s.submit_answer(2).unwrap();
        let visuals: Vec<AnswerVisual> = s.snapshot().answers.iter().map(|a| a.visual).collect();
        assert_eq!(
            visuals,
            vec![AnswerVisual::Correct, AnswerVisual::Neutral, AnswerVisual::SelectedWrong]
        );
    }

    #[test]
    fn test_snapshot_result_screen() {
        let mut s = session(&[0]);
        s.begin();
        s.submit_answer(1).unwrap();
        s.advance();
        let snap = s.snapshot();
        assert_eq!(snap.screen, Screen::Result);
        assert_eq!(snap.band, Some(ResultBand::Zero));
        assert!(snap.question.is_none());
        assert_eq!(snap.total, 1);
    }
}

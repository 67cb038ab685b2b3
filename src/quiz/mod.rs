//! Quiz core
//!
//! Question bank, score bands, the session state machine and the
//! delayed auto-advance timer.

pub mod bands;
pub mod question;
pub mod session;
pub mod timer;

// Re-export commonly used types
pub use bands::{ResultBand, ScoreBands};
pub use question::{Question, QuestionBank};
pub use session::{
    AdvanceOutcome, AdvanceToken, AnswerView, AnswerVisual, Phase, QuizSession, Screen,
    SessionSnapshot, SessionState, SubmitOutcome,
};
pub use timer::{AdvanceTimer, DEFAULT_ADVANCE_DELAY};

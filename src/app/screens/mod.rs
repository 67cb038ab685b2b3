//! TUI screen components
//!
//! One component per top-level screen of the quiz.

pub mod question;
pub mod result;
pub mod start;

pub use question::QuestionScreen;
pub use result::ResultScreen;
pub use start::StartScreen;

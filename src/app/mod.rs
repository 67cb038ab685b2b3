//! TUI application module
//!
//! Terminal handling, input mapping, screens and the controller that
//! connects them to the quiz session.

pub mod app;
pub mod controller;
pub mod input;
pub mod screens;
pub mod tui;

pub use app::App;
pub use controller::Controller;
pub use input::InputAction;
pub use screens::{QuestionScreen, ResultScreen, StartScreen};
pub use tui::Tui;

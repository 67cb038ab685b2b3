//! Main application controller
//!
//! Owns the terminal and runs the draw / input loop around the
//! [`Controller`].

use tokio::time::sleep;

use crate::{
    app::{
        controller::Controller,
        input::InputAction,
        tui::{Tui, TICK_RATE},
    },
    config::QuizConfig,
    QuizError, Result,
};

/// TUI application
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Session, timer and audio glue
    controller: Controller,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &QuizConfig) -> Result<Self> {
        let controller = Controller::from_config(config)?;
        Ok(Self {
            tui: Tui::new()?,
            controller,
        })
    }

    /// Initialize the terminal
    pub fn init(&mut self) -> Result<()> {
        self.tui
            .init()
            .map_err(|e| QuizError::TuiError(format!("failed to initialize terminal: {}", e)))
    }

    /// Run the main application loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        let result = self.event_loop().await;
        // Every exit path releases audio and cancels the timer
        self.controller.shutdown();
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        while !self.controller.should_quit() {
            self.controller.drain_advances();
            self.draw()?;
            self.handle_events().await?;
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let controller = &mut self.controller;
        self.tui.draw(|f| controller.render(f))?;
        Ok(())
    }

    /// Apply a pending key, otherwise wait for a tick or a timer advance
    async fn handle_events(&mut self) -> Result<()> {
        if let Some(key) = self.tui.poll_key()? {
            self.controller.handle_action(InputAction::from_key(key));
            return Ok(());
        }

        tokio::select! {
            _ = sleep(TICK_RATE) => {}
            _ = self.controller.next_advance() => {}
        }
        Ok(())
    }

    /// Restore the terminal
    pub fn restore(&mut self) -> Result<()> {
        self.tui.restore()?;
        Ok(())
    }
}

//! Main application
//!
//! Ties the terminal to the exam view controller and runs the render loop.

use crate::{
    app::{controller::ExamController, routes::Route, screens, tui::Tui},
    config::ExamConfig,
    ExamError, Result,
};

/// TUI application
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Route the exam view is mounted at
    route: Route,
    /// Exam view
    controller: ExamController,
}

impl App {
    /// Create the application for a route. Must be called inside a tokio runtime.
    pub fn new(config: &ExamConfig, route: Route) -> Result<Self> {
        let controller = ExamController::from_config(config)?;
        let tui = Tui::new(config.tick_rate)
            .map_err(|e| ExamError::TuiError(format!("Failed to create terminal: {}", e)))?;

        Ok(Self {
            tui,
            route,
            controller,
        })
    }

    /// Take over the terminal
    pub fn init(&mut self) -> Result<()> {
        self.tui
            .init()
            .map_err(|e| ExamError::TuiError(format!("Failed to initialise terminal: {}", e)))
    }

    /// Run until the user quits
    pub async fn run(&mut self) -> Result<()> {
        log::info!("mounting exam view at {}", self.route.path());
        self.controller.mount();

        while !self.controller.should_quit() {
            self.controller.drain_scheduled();
            self.draw()?;
            if let Some(key) = self.tui.next_key()? {
                self.controller.handle_key(key);
            }
            tokio::task::yield_now().await;
        }

        self.controller.unmount();
        Ok(())
    }

    /// Give the terminal back
    pub fn restore(&mut self) -> Result<()> {
        self.tui.restore()?;
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let controller = &self.controller;
        self.tui.draw(|f| {
            screens::render(
                f,
                controller.session(),
                controller.paper(),
                controller.view(),
            )
        })?;
        Ok(())
    }
}

//! TUI application module
//!
//! Contains the terminal user interface, the exam view controller,
//! keyboard mapping, static routes and screen rendering.

pub mod app;
pub mod controller;
pub mod routes;
pub mod screens;
pub mod state;
pub mod tui;

pub use app::App;
pub use controller::{ExamController, Timing};
pub use routes::Route;
pub use state::{InputAction, ViewState};
pub use tui::Tui;

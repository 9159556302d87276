// Terminal UI module using ratatui

mod app;
mod dashboard;
mod widgets;

pub use app::{App, Route, Screen, ScreenState};
pub use dashboard::Dashboard;

//! TUI 状态模块

pub mod app;
pub mod selection;

pub use app::{AppState, Screen, StatusKind, StatusMessage, TuiResult};
pub use selection::{Selectable, SelectionState};

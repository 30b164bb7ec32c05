//! Ratatui 终端 UI 模块
//!
//! 提供基于 ratatui 的终端用户界面，以及非交互模式的文本输出。

pub mod app;
pub mod components;
pub mod display;
pub mod event;
pub mod screens;
pub mod state;
pub mod theme;
pub mod ui;

pub use app::TuiApp;
pub use display::{format_catalog, format_view, print_view, should_run_interactive};
pub use event::{EventPoll, TuiEvent};
pub use state::{AppState, Screen, Selectable, SelectionState, TuiResult};
pub use theme::{Theme, theme};
pub use ui::render;

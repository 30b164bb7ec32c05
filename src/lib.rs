//! Setup Advisor - guided business setup across jurisdictions
//!
//! This library provides:
//! - A reference catalog of categories, legal structures, features,
//!   legal requirements and contact routing, loaded from TOML
//! - A three-stage wizard state machine (selection, subtype, details)
//!   over explicit session values
//! - Contact deep-link construction with query percent-encoding
//! - A ratatui front end and plain-text/JSON output for one-shot use

pub mod catalog;
pub mod cli;
pub mod config;
pub mod contact;
pub mod error;
pub mod tui;
pub mod wizard;

pub use catalog::{CategoryEntry, ContactRoute, ReferenceCatalog};
pub use cli::Cli;
pub use config::{Config, ConfigError};
pub use contact::{ContactPayload, deep_link};
pub use error::{Error, Result};
pub use tui::{TuiApp, TuiResult, should_run_interactive};
pub use wizard::{DetailsBundle, Selections, Stage, ViewPayload, WizardController, WizardSession};

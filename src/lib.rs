pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use config::{ApiSettings, Environment, FileSessionStore, TomlConfig};
pub use crate::core::{
    client::HttpWeightApi, history::HistoryView, session::SessionManager, submission::WeightForm,
};
pub use domain::model::{CreateResponse, Exercise, NewWeightRecord, Session, WeightRecord};
pub use utils::error::{Result, TrackerError};

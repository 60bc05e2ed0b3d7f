pub mod client;
pub mod history;
pub mod plates;
pub mod render;
pub mod session;
pub mod submission;

pub use crate::domain::model::{CreateResponse, Exercise, NewWeightRecord, Session, WeightRecord};
pub use crate::domain::ports::{ConfigProvider, SessionStore, WeightApi};
pub use crate::utils::error::Result;

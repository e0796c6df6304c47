pub mod analytics;
pub mod domain_utils;
pub mod error;
pub mod features;
pub mod history;
pub mod result;
pub mod rubric_config;
pub mod settings;
pub mod templates;
pub mod text_utils;

pub use analytics::HistorySummary;
pub use error::QcError;
pub use features::{QcEngine, Rubric, RubricKind};
pub use history::{HistoryRecord, HistoryStore, InMemoryHistoryStore, JsonFileHistoryStore};
pub use result::{Details, ScoreBand, ValidationResult};
pub use rubric_config::RubricConfig;
pub use settings::Settings;

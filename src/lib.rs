pub mod alfred;
pub mod config;
pub mod dates;
pub mod db;
pub mod export;
pub mod graph;
pub mod journal;
pub mod models;
pub mod tags;
pub mod transcript;

pub use config::{Config, ConfigError};
pub use db::Database;
pub use export::{ExportError, Exporter};
pub use journal::{JournalError, JournalTag};
pub use models::{Edge, Graph, NoteRecord, NoteSummary, ShortId};

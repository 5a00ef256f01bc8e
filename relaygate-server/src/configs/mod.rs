mod schema;
mod settings;
mod storage;

pub use schema::SchemaManager;
pub use settings::{Auth, DEFAULT_SECRET, Database, Logger, Server, Settings};
pub use storage::Storage;

pub mod backend;

pub use backend::config::{AppConfig, StorageKind};
pub use backend::{create_router, initialize_backend, AppState};

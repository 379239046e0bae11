pub mod app;
pub mod clock;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod input;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{resolve_data_dir, FileStore, RecordStore};

use crate::clock::Clock;
use crate::storage::{FileStore, RecordStore};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore<FileStore>>,
    pub clock: Arc<dyn Clock>,
    /// Held across read-modify-write cycles so two saves never interleave.
    pub writes: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: RecordStore<FileStore>, clock: impl Clock) -> Self {
        Self {
            store: Arc::new(store),
            clock: Arc::new(clock),
            writes: Arc::new(Mutex::new(())),
        }
    }
}

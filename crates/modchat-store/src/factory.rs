//! Backend selection from configuration

use std::sync::Arc;

use modchat_common::{BackendKind, StorageConfig};
use modchat_core::gateway::Gateway;
use tracing::info;

use crate::backends::{FileStore, MemoryStore};

/// Open the configured gateway backend
pub fn open_gateway(config: &StorageConfig) -> Arc<dyn Gateway> {
    match config.backend {
        BackendKind::Memory => {
            info!("opening in-memory store");
            Arc::new(MemoryStore::new())
        }
        BackendKind::File => {
            info!(dir = %config.data_dir, "opening file store");
            Arc::new(FileStore::new(config.data_dir.clone()))
        }
    }
}

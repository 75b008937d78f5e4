//! In-process stores used for `memory://` runs and tests. Each store keeps its
//! rows behind a mutex and mirrors the constraints the SQL schema enforces.

mod access;
mod content;

pub use access::{
    AiGenerationStoreMemory, ApiKeyStoreMemory, WebhookDeliveryStoreMemory, WebhookStoreMemory,
};
pub use content::{CategoryStoreMemory, MediaStoreMemory, PostStoreMemory, TagStoreMemory};

use crate::infrastructure::db::stores::StoreError;
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex.lock().map_err(|_| StoreError::StorageUnavailable)
}

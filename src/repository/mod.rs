//! Repository layer for equipment persistence

pub mod equipment;
pub mod memory;
pub mod schema;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::equipment::{Equipment, NewEquipment},
};

pub use equipment::EquipmentRepository;
pub use memory::MemoryEquipmentStore;

/// Backing store for equipment records.
///
/// Implementations enforce the unique-code constraint themselves and report a
/// violation as a validation error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentStore: Send + Sync {
    /// Get equipment by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Equipment>>;

    /// Find the record holding `code`, ignoring `exclude_id` when given
    async fn find_by_code(&self, code: &str, exclude_id: Option<i32>) -> AppResult<Option<Equipment>>;

    /// List all equipment ordered by ID
    async fn list_all(&self) -> AppResult<Vec<Equipment>>;

    /// List equipment whose type matches, ignoring case
    async fn list_by_type(&self, equipment_type: &str) -> AppResult<Vec<Equipment>>;

    /// Insert a record and return it with its generated ID
    async fn insert(&self, data: NewEquipment) -> AppResult<Equipment>;

    /// Persist every field of an existing record; `None` if it vanished
    async fn update(&self, equipment: &Equipment) -> AppResult<Option<Equipment>>;

    /// Delete a record, returning whether it existed
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

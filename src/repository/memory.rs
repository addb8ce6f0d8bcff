//! In-process equipment store, selected with a `memory://` database URL

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::EquipmentStore;
use crate::{
    error::{AppError, AppResult},
    models::equipment::{Equipment, NewEquipment, ValidationFailure},
};

#[derive(Default)]
struct Inner {
    next_id: i32,
    rows: BTreeMap<i32, Equipment>,
}

impl Inner {
    fn code_taken(&self, code: &str, exclude_id: Option<i32>) -> Option<&Equipment> {
        self.rows
            .values()
            .find(|e| e.code == code && Some(e.id) != exclude_id)
    }
}

#[derive(Default)]
pub struct MemoryEquipmentStore {
    inner: RwLock<Inner>,
}

impl MemoryEquipmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a record in as-is, bypassing validation. Keeps IDs monotonic.
    pub async fn seed(&self, equipment: Equipment) {
        let mut inner = self.inner.write().await;
        inner.next_id = inner.next_id.max(equipment.id);
        inner.rows.insert(equipment.id, equipment);
    }
}

#[async_trait]
impl EquipmentStore for MemoryEquipmentStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Equipment>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str, exclude_id: Option<i32>) -> AppResult<Option<Equipment>> {
        Ok(self.inner.read().await.code_taken(code, exclude_id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Equipment>> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn list_by_type(&self, equipment_type: &str) -> AppResult<Vec<Equipment>> {
        let wanted = equipment_type.to_lowercase();
        Ok(self
            .inner
            .read()
            .await
            .rows
            .values()
            .filter(|e| e.equipment_type.to_lowercase() == wanted)
            .cloned()
            .collect())
    }

    async fn insert(&self, data: NewEquipment) -> AppResult<Equipment> {
        let mut inner = self.inner.write().await;
        if inner.code_taken(&data.code, None).is_some() {
            return Err(AppError::Validation(ValidationFailure::duplicate_code()));
        }
        inner.next_id += 1;
        let equipment = data.into_equipment(inner.next_id);
        inner.rows.insert(equipment.id, equipment.clone());
        Ok(equipment)
    }

    async fn update(&self, equipment: &Equipment) -> AppResult<Option<Equipment>> {
        let mut inner = self.inner.write().await;
        if !inner.rows.contains_key(&equipment.id) {
            return Ok(None);
        }
        if inner.code_taken(&equipment.code, Some(equipment.id)).is_some() {
            return Err(AppError::Validation(ValidationFailure::duplicate_code()));
        }
        inner.rows.insert(equipment.id, equipment.clone());
        Ok(Some(equipment.clone()))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

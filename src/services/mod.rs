//! Business logic services

pub mod equipment;

use std::sync::Arc;

use crate::repository::EquipmentStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
}

impl Services {
    /// Create all services on top of the given store
    pub fn new(store: Arc<dyn EquipmentStore>) -> Self {
        Self {
            equipment: equipment::EquipmentService::new(store),
        }
    }
}

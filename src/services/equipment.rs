//! Equipment service

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        validate_hour_meter, validate_location, Equipment, EquipmentRequest, StatusResponse,
        UpdateHourMeter, UpdateLocation, ValidationFailure,
    },
    repository::EquipmentStore,
};

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Equipment {} not found", id))
}

#[derive(Clone)]
pub struct EquipmentService {
    store: Arc<dyn EquipmentStore>,
}

impl EquipmentService {
    pub fn new(store: Arc<dyn EquipmentStore>) -> Self {
        Self { store }
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.store.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// List equipment, optionally restricted to one type
    pub async fn list(&self, equipment_type: Option<&str>) -> AppResult<Vec<Equipment>> {
        match equipment_type {
            Some(t) => self.store.list_by_type(t).await,
            None => self.store.list_all().await,
        }
    }

    pub async fn get_status(&self, id: i32) -> AppResult<StatusResponse> {
        let equipment = self.get_by_id(id).await?;
        Ok(StatusResponse {
            status: equipment.operational_status,
        })
    }

    /// Validate and insert a new record
    pub async fn create(&self, data: &EquipmentRequest) -> AppResult<Equipment> {
        let validated = data.validate(Self::today())?;
        if self.store.find_by_code(&validated.code, None).await?.is_some() {
            return Err(ValidationFailure::duplicate_code().into());
        }

        let equipment = self.store.insert(validated).await?;
        tracing::info!(id = equipment.id, code = %equipment.code, "Equipment created");
        Ok(equipment)
    }

    /// Replace every field of a record.
    ///
    /// The record may keep its own code; any other record's code is rejected.
    pub async fn update(&self, id: i32, data: &EquipmentRequest) -> AppResult<Equipment> {
        let mut equipment = self.get_by_id(id).await?;

        let validated = data.validate(Self::today())?;
        if self
            .store
            .find_by_code(&validated.code, Some(id))
            .await?
            .is_some()
        {
            return Err(ValidationFailure::duplicate_code().into());
        }

        equipment.apply(validated);
        let equipment = self.persist(equipment).await?;
        tracing::info!(id, "Equipment updated");
        Ok(equipment)
    }

    /// Move the record to the next status of the maintenance cycle
    pub async fn advance_status(&self, id: i32) -> AppResult<Equipment> {
        let mut equipment = self.get_by_id(id).await?;
        let previous = equipment.operational_status.clone();

        if !equipment.advance_status() {
            tracing::warn!(id, status = %previous, "Unknown status, not advancing");
            return Ok(equipment);
        }

        let equipment = self.persist(equipment).await?;
        tracing::info!(
            id,
            from = %previous,
            to = %equipment.operational_status,
            "Equipment status advanced"
        );
        Ok(equipment)
    }

    pub async fn update_hour_meter(&self, id: i32, data: &UpdateHourMeter) -> AppResult<Equipment> {
        let mut equipment = self.get_by_id(id).await?;
        equipment.hour_meter = validate_hour_meter(data.hour_meter)?;
        self.persist(equipment).await
    }

    pub async fn update_location(&self, id: i32, data: &UpdateLocation) -> AppResult<Equipment> {
        let mut equipment = self.get_by_id(id).await?;
        equipment.current_location = validate_location(&data.current_location)?;
        self.persist(equipment).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(id, "Equipment deleted");
        Ok(())
    }

    /// Readiness probe against the backing store
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }

    async fn persist(&self, equipment: Equipment) -> AppResult<Equipment> {
        let id = equipment.id;
        self.store.update(&equipment).await?.ok_or_else(|| not_found(id))
    }
}

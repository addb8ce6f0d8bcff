//! PostgreSQL equipment repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{schema::EQUIPMENT, EquipmentStore};
use crate::{
    error::{AppError, AppResult},
    models::equipment::{Equipment, NewEquipment, ValidationFailure},
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Turn a unique-index violation into the duplicate-code validation error
fn map_write_error(err: sqlx::Error) -> AppError {
    match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => {
            tracing::warn!("Unique constraint hit on write: {}", db_err.message());
            AppError::Validation(ValidationFailure::duplicate_code())
        }
        _ => AppError::Database(err),
    }
}

#[async_trait]
impl EquipmentStore for EquipmentRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Equipment>> {
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1",
            EQUIPMENT.select_list(),
            EQUIPMENT.qualified_name()
        );
        let row = sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_code(&self, code: &str, exclude_id: Option<i32>) -> AppResult<Option<Equipment>> {
        let query = format!(
            "SELECT {} FROM {} WHERE codigo = $1 AND ($2::INT IS NULL OR id <> $2) LIMIT 1",
            EQUIPMENT.select_list(),
            EQUIPMENT.qualified_name()
        );
        let row = sqlx::query_as::<_, Equipment>(&query)
            .bind(code)
            .bind(exclude_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_all(&self) -> AppResult<Vec<Equipment>> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY id",
            EQUIPMENT.select_list(),
            EQUIPMENT.qualified_name()
        );
        let rows = sqlx::query_as::<_, Equipment>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_by_type(&self, equipment_type: &str) -> AppResult<Vec<Equipment>> {
        let query = format!(
            "SELECT {} FROM {} WHERE LOWER(tipo) = LOWER($1) ORDER BY id",
            EQUIPMENT.select_list(),
            EQUIPMENT.qualified_name()
        );
        let rows = sqlx::query_as::<_, Equipment>(&query)
            .bind(equipment_type)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, data: NewEquipment) -> AppResult<Equipment> {
        let query = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            EQUIPMENT.qualified_name(),
            EQUIPMENT.insert_list(),
            EQUIPMENT.insert_placeholders(),
            EQUIPMENT.select_list()
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(&data.code)
            .bind(data.equipment_type.as_str())
            .bind(&data.model)
            .bind(data.hour_meter)
            .bind(data.operational_status.as_str())
            .bind(data.acquisition_date)
            .bind(&data.current_location)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn update(&self, equipment: &Equipment) -> AppResult<Option<Equipment>> {
        let query = format!(
            "UPDATE {} SET {} WHERE id = ${} RETURNING {}",
            EQUIPMENT.qualified_name(),
            EQUIPMENT.update_assignments(),
            EQUIPMENT.columns.len() + 1,
            EQUIPMENT.select_list()
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(&equipment.code)
            .bind(&equipment.equipment_type)
            .bind(&equipment.model)
            .bind(equipment.hour_meter)
            .bind(&equipment.operational_status)
            .bind(equipment.acquisition_date)
            .bind(&equipment.current_location)
            .bind(equipment.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let query = format!("DELETE FROM {} WHERE id = $1", EQUIPMENT.qualified_name());
        let result = sqlx::query(&query)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

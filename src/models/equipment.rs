//! Heavy equipment model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::repository::schema;

pub const DUPLICATE_CODE_MESSAGE: &str =
    "O campo 'Codigo' deve ser único. Já existe um equipamento com esse código.";

// ---------------------------------------------------------------------------
// EquipmentType
// ---------------------------------------------------------------------------

/// Kind of heavy machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentType {
    Excavator,
    Truck,
    Loader,
    BackhoeLoader,
    Tractor,
    Crane,
}

impl EquipmentType {
    pub const ALL: [EquipmentType; 6] = [
        EquipmentType::Excavator,
        EquipmentType::Truck,
        EquipmentType::Loader,
        EquipmentType::BackhoeLoader,
        EquipmentType::Tractor,
        EquipmentType::Crane,
    ];

    /// Name stored in the database and exposed on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::Excavator => "Escavadeira",
            EquipmentType::Truck => "Caminhao",
            EquipmentType::Loader => "Carregadeira",
            EquipmentType::BackhoeLoader => "Retroescavadeira",
            EquipmentType::Tractor => "Trator",
            EquipmentType::Crane => "Guindaste",
        }
    }

    /// Case-insensitive lookup by wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OperationalStatus
// ---------------------------------------------------------------------------

/// Operating status of a machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationalStatus {
    Operational,
    UnderMaintenance,
    OutOfService,
}

impl OperationalStatus {
    pub const ALL: [OperationalStatus; 3] = [
        OperationalStatus::Operational,
        OperationalStatus::UnderMaintenance,
        OperationalStatus::OutOfService,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationalStatus::Operational => "Operacional",
            OperationalStatus::UnderMaintenance => "EmManutencao",
            OperationalStatus::OutOfService => "ForaDeServico",
        }
    }

    /// Case-insensitive lookup by wire name, used when validating input
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Exact lookup, used on stored values
    pub fn from_stored(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Next state in the maintenance cycle.
    ///
    /// The cycle is Operational -> OutOfService -> UnderMaintenance -> Operational.
    pub fn next(self) -> Self {
        match self {
            OperationalStatus::Operational => OperationalStatus::OutOfService,
            OperationalStatus::OutOfService => OperationalStatus::UnderMaintenance,
            OperationalStatus::UnderMaintenance => OperationalStatus::Operational,
        }
    }
}

impl std::fmt::Display for OperationalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// Equipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Unique human-assigned code
    #[serde(rename = "codigo")]
    #[sqlx(rename = "codigo")]
    pub code: String,
    /// Equipment type (Escavadeira, Caminhao, ...)
    #[serde(rename = "tipo")]
    #[sqlx(rename = "tipo")]
    pub equipment_type: String,
    #[serde(rename = "modelo")]
    #[sqlx(rename = "modelo")]
    pub model: String,
    /// Cumulative operating hours
    #[serde(rename = "horimetro", with = "rust_decimal::serde::float")]
    #[sqlx(rename = "horimetro")]
    #[schema(value_type = f64)]
    pub hour_meter: Decimal,
    /// Operacional, EmManutencao or ForaDeServico
    #[serde(rename = "statusOperacional")]
    #[sqlx(rename = "status_operacional")]
    pub operational_status: String,
    #[serde(rename = "dataAquisicao")]
    #[sqlx(rename = "data_aquisicao")]
    pub acquisition_date: NaiveDate,
    #[serde(rename = "localizacaoAtual")]
    #[sqlx(rename = "localizacao_atual")]
    pub current_location: String,
}

impl Equipment {
    /// Replace every mutable field with validated values
    pub fn apply(&mut self, data: NewEquipment) {
        self.code = data.code;
        self.equipment_type = data.equipment_type.as_str().to_string();
        self.model = data.model;
        self.hour_meter = data.hour_meter;
        self.operational_status = data.operational_status.as_str().to_string();
        self.acquisition_date = data.acquisition_date;
        self.current_location = data.current_location;
    }

    /// Move the status one step along the maintenance cycle.
    ///
    /// Returns false and leaves the record untouched when the stored status
    /// is not a known one.
    pub fn advance_status(&mut self) -> bool {
        match OperationalStatus::from_stored(&self.operational_status) {
            Some(status) => {
                self.operational_status = status.next().as_str().to_string();
                true
            }
            None => false,
        }
    }
}

/// Validated equipment data ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewEquipment {
    pub code: String,
    pub equipment_type: EquipmentType,
    pub model: String,
    pub hour_meter: Decimal,
    pub operational_status: OperationalStatus,
    pub acquisition_date: NaiveDate,
    pub current_location: String,
}

impl NewEquipment {
    pub fn into_equipment(self, id: i32) -> Equipment {
        Equipment {
            id,
            code: self.code,
            equipment_type: self.equipment_type.as_str().to_string(),
            model: self.model,
            hour_meter: self.hour_meter,
            operational_status: self.operational_status.as_str().to_string(),
            acquisition_date: self.acquisition_date,
            current_location: self.current_location,
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Create or full-update equipment request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct EquipmentRequest {
    #[serde(rename = "codigo", deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(rename = "tipo", deserialize_with = "null_as_default")]
    pub equipment_type: String,
    #[serde(rename = "modelo", deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(rename = "horimetro", deserialize_with = "null_as_default")]
    #[schema(value_type = f64)]
    pub hour_meter: Decimal,
    #[serde(rename = "statusOperacional", deserialize_with = "null_as_default")]
    pub operational_status: String,
    #[serde(rename = "dataAquisicao")]
    pub acquisition_date: Option<NaiveDate>,
    #[serde(rename = "localizacaoAtual", deserialize_with = "null_as_default")]
    pub current_location: String,
}

/// Hour meter update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateHourMeter {
    #[serde(rename = "horimetro", deserialize_with = "null_as_default")]
    #[schema(value_type = f64)]
    pub hour_meter: Decimal,
}

/// Location update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateLocation {
    #[serde(rename = "localizacaoAtual", deserialize_with = "null_as_default")]
    pub current_location: String,
}

/// Filter for the equipment list
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EquipmentQuery {
    /// Case-insensitive equipment type
    pub tipo: Option<String>,
}

/// Status-only view of a record
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// First rule an input broke
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub field: &'static str,
    pub message: String,
}

impl ValidationFailure {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn required(field: &'static str) -> Self {
        Self::new(field, format!("O campo '{}' é obrigatório.", field))
    }

    fn too_long(field: &'static str, max: usize) -> Self {
        Self::new(
            field,
            format!("O campo '{}' deve ter no máximo {} caracteres.", field, max),
        )
    }

    pub fn duplicate_code() -> Self {
        Self::new("Codigo", DUPLICATE_CODE_MESSAGE)
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationFailure {}

pub type ValidationResult<T> = Result<T, ValidationFailure>;

/// Round to the column scale, then check the stored value is in range
pub fn validate_hour_meter(hour_meter: Decimal) -> ValidationResult<Decimal> {
    let hour_meter = hour_meter.round_dp(schema::HOUR_METER_SCALE);
    if hour_meter <= Decimal::ZERO {
        return Err(ValidationFailure::new(
            "Horimetro",
            "O campo 'Horimetro' deve ser um valor positivo.",
        ));
    }
    if hour_meter > schema::HOUR_METER_MAX {
        return Err(ValidationFailure::new(
            "Horimetro",
            format!(
                "O campo 'Horimetro' deve ser no máximo {}.",
                schema::HOUR_METER_MAX
            ),
        ));
    }
    Ok(hour_meter)
}

pub fn validate_location(location: &str) -> ValidationResult<String> {
    if location.trim().is_empty() {
        return Err(ValidationFailure::required("LocalizacaoAtual"));
    }
    if location.chars().count() > schema::LOCATION_MAX_LEN {
        return Err(ValidationFailure::too_long(
            "LocalizacaoAtual",
            schema::LOCATION_MAX_LEN,
        ));
    }
    Ok(location.to_string())
}

impl EquipmentRequest {
    /// Check every field rule in order and stop at the first failure.
    ///
    /// Code uniqueness needs the store and is checked by the service.
    pub fn validate(&self, today: NaiveDate) -> ValidationResult<NewEquipment> {
        if self.code.is_empty() {
            return Err(ValidationFailure::required("Codigo"));
        }
        if self.equipment_type.is_empty() {
            return Err(ValidationFailure::required("Tipo"));
        }
        if self.model.is_empty() {
            return Err(ValidationFailure::required("Modelo"));
        }
        if self.operational_status.is_empty() {
            return Err(ValidationFailure::required("StatusOperacional"));
        }
        let hour_meter = validate_hour_meter(self.hour_meter)?;
        let acquisition_date = self
            .acquisition_date
            .ok_or_else(|| ValidationFailure::required("DataAquisicao"))?;
        if acquisition_date > today {
            return Err(ValidationFailure::new(
                "DataAquisicao",
                "O campo 'DataAquisicao' não pode ser uma data futura.",
            ));
        }
        if self.current_location.is_empty() {
            return Err(ValidationFailure::required("LocalizacaoAtual"));
        }

        let operational_status = OperationalStatus::from_name(&self.operational_status)
            .ok_or_else(|| {
                ValidationFailure::new(
                    "StatusOperacional",
                    format!(
                        "O campo 'StatusOperacional' deve ser um dos seguintes valores: {}.",
                        join_names(OperationalStatus::ALL.iter().map(|s| s.as_str()))
                    ),
                )
            })?;
        let equipment_type = EquipmentType::from_name(&self.equipment_type).ok_or_else(|| {
            ValidationFailure::new(
                "Tipo",
                format!(
                    "O campo 'Tipo' deve ser um dos seguintes valores: {}.",
                    join_names(EquipmentType::ALL.iter().map(|t| t.as_str()))
                ),
            )
        })?;

        if self.code.chars().count() > schema::CODE_MAX_LEN {
            return Err(ValidationFailure::too_long("Codigo", schema::CODE_MAX_LEN));
        }
        if self.model.chars().count() > schema::MODEL_MAX_LEN {
            return Err(ValidationFailure::too_long("Modelo", schema::MODEL_MAX_LEN));
        }
        let current_location = validate_location(&self.current_location)?;

        Ok(NewEquipment {
            code: self.code.clone(),
            equipment_type,
            model: self.model.clone(),
            hour_meter,
            operational_status,
            acquisition_date,
            current_location,
        })
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

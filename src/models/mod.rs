//! Data models

pub mod equipment;

pub use equipment::{Equipment, EquipmentType, OperationalStatus};

//! Utility functions for the vendor form builder component.

use common::model::form::FormConfig;

/// Fresh field id. Generated at dispatch time and carried inside the command
/// so that replaying the command log stays deterministic.
pub fn fresh_field_id() -> String {
    format!("f_{}", uuid::Uuid::new_v4())
}

pub fn fresh_section_id() -> String {
    format!("sec_{}", uuid::Uuid::new_v4())
}

/// Database key assigned to user-added fields.
pub fn fresh_db_key() -> String {
    format!("custom_{}", uuid::Uuid::new_v4().simple())
}

/// MD5 hex digest of the serialized configuration, for dirty tracking.
pub fn config_md5(config: &FormConfig) -> String {
    let json = serde_json::to_string(config).unwrap_or_default();
    format!("{:x}", md5::compute(json))
}

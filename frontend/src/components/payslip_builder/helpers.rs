//! Utility functions for the payslip builder component.

use common::model::payslip::PayslipConfig;
use js_sys::Date;

/// Fresh block id. Generated at dispatch time and carried inside the command
/// so that replaying the command log stays deterministic.
pub fn fresh_block_id() -> String {
    format!("block_{}", uuid::Uuid::new_v4())
}

/// MD5 hex digest of the serialized configuration, for dirty tracking.
pub fn config_md5(config: &PayslipConfig) -> String {
    let json = serde_json::to_string(config).unwrap_or_default();
    format!("{:x}", md5::compute(json))
}

/// The current month as a `YYYY-MM` key, matching the payslip endpoint.
pub fn current_month() -> String {
    let now = Date::new_0();
    format!(
        "{:04}-{:02}",
        now.get_full_year(),
        now.get_month() + 1
    )
}

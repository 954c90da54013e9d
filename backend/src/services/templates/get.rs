//! # Template Retrieval Service
//!
//! Backend logic for the `GET /api/templates/{template_id}` endpoint.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: `process` receives the template id from the URL path
//!     along with the shared [`AppConfig`].
//! 2.  **Database Query**: the template row is looked up in
//!     `payslip_templates` and its `config` column deserialized into a
//!     [`PayslipConfig`].
//! 3.  **Default Fallback**: when the id is unknown, the handler answers with
//!     the tenant's default starter template (company header plus employee
//!     grid) rather than a 404, so a fresh installation opens straight into
//!     an editable canvas.
//! 4.  **HTTP Response**: the configuration is wrapped in the standard
//!     `{success, data}` envelope. Database failures return
//!     `503 Service Unavailable` with `{success: false, error}`.

use actix_web::web;
use common::builder::defaults::default_payslip_config;
use common::model::payslip::PayslipConfig;
use common::model::response::ApiResponse;
use rusqlite::{params, OptionalExtension};

use crate::config::AppConfig;
use crate::db;

/// Actix web handler for the `GET /api/templates/{template_id}` endpoint.
pub async fn process(
    template_id: web::Path<String>,
    app_config: web::Data<AppConfig>,
) -> impl actix_web::Responder {
    match get_template(&template_id, &app_config).await {
        Ok(config) => actix_web::HttpResponse::Ok().json(ApiResponse::ok(config)),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .json(ApiResponse::<PayslipConfig>::err(format!(
                "Error retrieving template: {}",
                e
            ))),
    }
}

/// Fetches a template configuration, falling back to the default starter
/// template when the id is unknown.
pub async fn get_template(
    template_id: &str,
    app_config: &AppConfig,
) -> Result<PayslipConfig, String> {
    let conn = db::open(&app_config.db_path)?;

    let stored: Option<String> = conn
        .query_row(
            "SELECT config FROM payslip_templates WHERE id = ?1",
            params![template_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| e.to_string())?;

    match stored {
        Some(json) => serde_json::from_str(&json).map_err(|e| e.to_string()),
        None => Ok(default_payslip_config(
            &app_config.company_name,
            &app_config.company_address,
        )),
    }
}

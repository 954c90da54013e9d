use actix_web::{web, Responder};
use chrono::Utc;
use common::builder::validate::validate_payslip;
use common::model::payslip::SaveTemplateRequest;
use common::model::response::ApiResponse;
use rusqlite::params;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::db;

pub async fn process(
    payload: web::Json<SaveTemplateRequest>,
    app_config: web::Data<AppConfig>,
) -> impl Responder {
    let violations = validate_payslip(&payload.config);
    if !violations.is_empty() {
        let message = violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return actix_web::HttpResponse::BadRequest().json(ApiResponse {
            success: false,
            data: Some(violations),
            error: Some(message),
        });
    }
    match save_template(&payload, &app_config).await {
        Ok(id) => actix_web::HttpResponse::Ok().json(ApiResponse::ok(id)),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .json(ApiResponse::<String>::err(format!("Error saving template: {}", e))),
    }
}

pub async fn save_template(
    payload: &SaveTemplateRequest,
    app_config: &AppConfig,
) -> Result<String, String> {
    let id = payload
        .id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let config_json = serde_json::to_string(&payload.config).map_err(|e| e.to_string())?;

    let conn = db::open(&app_config.db_path)?;
    conn.execute(
        "INSERT OR REPLACE INTO payslip_templates (id, name, config, updated_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            &id,
            &payload.config.name,
            &config_json,
            Utc::now().to_rfc3339()
        ],
    )
    .map_err(|e| e.to_string())?;
    Ok(id)
}

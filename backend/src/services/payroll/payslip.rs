use actix_web::web;
use common::model::record::PayslipRecord;
use common::model::response::ApiResponse;
use rusqlite::{params, OptionalExtension};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::db;

#[derive(Deserialize)]
pub struct PayslipQuery {
    month: Option<String>,
}

pub async fn process(
    employee_id: web::Path<String>,
    query: web::Query<PayslipQuery>,
    app_config: web::Data<AppConfig>,
) -> impl actix_web::Responder {
    let month = query.month.clone().unwrap_or_else(db::current_month);
    match get_payslip(&employee_id, &month, &app_config).await {
        Ok(Some(record)) => actix_web::HttpResponse::Ok().json(ApiResponse::ok(record)),
        Ok(None) => actix_web::HttpResponse::NotFound().json(ApiResponse::<PayslipRecord>::err(
            format!("No payslip for {} in {}", employee_id, month),
        )),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable().json(
            ApiResponse::<PayslipRecord>::err(format!("Error retrieving payslip: {}", e)),
        ),
    }
}

pub async fn get_payslip(
    employee_id: &str,
    month: &str,
    app_config: &AppConfig,
) -> Result<Option<PayslipRecord>, String> {
    let conn = db::open(&app_config.db_path)?;
    let stored: Option<String> = conn
        .query_row(
            "SELECT data FROM payslips WHERE employee_id = ?1 AND month = ?2",
            params![employee_id, month],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| e.to_string())?;
    match stored {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| e.to_string()),
        None => Ok(None),
    }
}

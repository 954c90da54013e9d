use actix_web::web;
use common::model::payslip::TemplateSummary;
use common::model::response::ApiResponse;

use crate::config::AppConfig;
use crate::db;

pub async fn process(app_config: web::Data<AppConfig>) -> impl actix_web::Responder {
    match list_templates(&app_config).await {
        Ok(templates) => actix_web::HttpResponse::Ok().json(ApiResponse::ok(templates)),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable().json(ApiResponse::<
            Vec<TemplateSummary>,
        >::err(format!(
            "Error listing templates: {}",
            e
        ))),
    }
}

pub async fn list_templates(app_config: &AppConfig) -> Result<Vec<TemplateSummary>, String> {
    let conn = db::open(&app_config.db_path)?;
    let mut stmt = conn
        .prepare("SELECT id, name, updated_at FROM payslip_templates ORDER BY updated_at DESC")
        .map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map([], |row| {
            Ok(TemplateSummary {
                id: row.get(0)?,
                name: row.get(1)?,
                updated_at: row.get(2)?,
            })
        })
        .map_err(|e| e.to_string())?;
    Ok(rows.filter_map(Result::ok).collect())
}

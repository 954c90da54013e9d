use actix_web::web;
use common::model::record::Employee;
use common::model::response::ApiResponse;

use crate::config::AppConfig;
use crate::db;

pub async fn process(app_config: web::Data<AppConfig>) -> impl actix_web::Responder {
    match list_employees(&app_config).await {
        Ok(employees) => actix_web::HttpResponse::Ok().json(ApiResponse::ok(employees)),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable().json(
            ApiResponse::<Vec<Employee>>::err(format!("Error listing employees: {}", e)),
        ),
    }
}

pub async fn list_employees(app_config: &AppConfig) -> Result<Vec<Employee>, String> {
    let conn = db::open(&app_config.db_path)?;
    let mut stmt = conn
        .prepare("SELECT data FROM employees ORDER BY id")
        .map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| e.to_string())?;
    let mut employees = Vec::new();
    for json in rows.filter_map(Result::ok) {
        // One corrupt row should not take down the whole directory.
        if let Ok(employee) = serde_json::from_str(&json) {
            employees.push(employee);
        }
    }
    Ok(employees)
}

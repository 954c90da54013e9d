use actix_web::{web, Responder};
use chrono::Utc;
use common::builder::validate::validate_form;
use common::model::form::FormConfig;
use common::model::response::ApiResponse;
use rusqlite::params;

use crate::config::AppConfig;
use crate::db;

pub async fn process(
    payload: web::Json<FormConfig>,
    app_config: web::Data<AppConfig>,
) -> impl Responder {
    if payload.form_type.trim().is_empty() {
        return actix_web::HttpResponse::BadRequest()
            .json(ApiResponse::<String>::err("formType must not be empty"));
    }
    let violations = validate_form(&payload);
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
    match save_form_config(&payload, &app_config).await {
        Ok(()) => actix_web::HttpResponse::Ok().json(ApiResponse::ok("saved".to_string())),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .json(ApiResponse::<String>::err(format!("Error saving form config: {}", e))),
    }
}

pub async fn save_form_config(config: &FormConfig, app_config: &AppConfig) -> Result<(), String> {
    let config_json = serde_json::to_string(config).map_err(|e| e.to_string())?;
    let conn = db::open(&app_config.db_path)?;
    conn.execute(
        "INSERT OR REPLACE INTO form_configs (form_type, config, updated_at) VALUES (?1, ?2, ?3)",
        params![&config.form_type, &config_json, Utc::now().to_rfc3339()],
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use common::builder::defaults::default_form_config;

    fn test_config(db_path: &str) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            db_path: db_path.into(),
            company_name: "Test Co".into(),
            company_address: "Test Lane".into(),
            open_browser: false,
        }
    }

    #[actix_web::test]
    async fn invalid_config_returns_structured_violations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forms.sqlite");
        let path = path.to_str().unwrap();
        crate::db::init(path).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_config(path)))
                .route("/api/vendor/form-config/save", web::post().to(process)),
        )
        .await;

        let mut config = default_form_config("step1");
        config.sections[0].title = "  ".into();
        let req = test::TestRequest::post()
            .uri("/api/vendor/form-config/save")
            .set_json(&config)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["data"][0]["kind"], "emptySectionTitle");
        assert!(body["error"].as_str().unwrap().contains("empty title"));
    }
}

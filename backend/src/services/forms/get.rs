use actix_web::web;
use common::builder::defaults::default_form_config;
use common::model::form::FormConfig;
use common::model::response::ApiResponse;
use rusqlite::{params, OptionalExtension};

use crate::config::AppConfig;
use crate::db;

pub async fn process(
    form_type: web::Path<String>,
    app_config: web::Data<AppConfig>,
) -> impl actix_web::Responder {
    match get_form_config(&form_type, &app_config).await {
        Ok(config) => actix_web::HttpResponse::Ok().json(ApiResponse::ok(config)),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable().json(
            ApiResponse::<FormConfig>::err(format!("Error retrieving form config: {}", e)),
        ),
    }
}

/// Fetches the stored configuration for one form step; tenants that never
/// saved that step get the seeded default layout.
pub async fn get_form_config(
    form_type: &str,
    app_config: &AppConfig,
) -> Result<FormConfig, String> {
    let conn = db::open(&app_config.db_path)?;
    let stored: Option<String> = conn
        .query_row(
            "SELECT config FROM form_configs WHERE form_type = ?1",
            params![form_type],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| e.to_string())?;
    match stored {
        Some(json) => serde_json::from_str(&json).map_err(|e| e.to_string()),
        None => Ok(default_form_config(form_type)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    async fn unknown_step_falls_back_to_default_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forms.sqlite");
        let path = path.to_str().unwrap();
        crate::db::init(path).unwrap();
        let config = get_form_config("step1", &test_config(path)).await.unwrap();
        assert_eq!(config.form_type, "step1");
        assert_eq!(config.sections.len(), 3);
        assert!(!config.fields.is_empty());
    }

    #[actix_web::test]
    async fn saved_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forms.sqlite");
        let path = path.to_str().unwrap();
        crate::db::init(path).unwrap();
        let app_config = test_config(path);
        let mut saved = default_form_config("step2");
        saved.sections[0].title = "Renamed".into();
        super::super::save::save_form_config(&saved, &app_config)
            .await
            .unwrap();
        let loaded = get_form_config("step2", &app_config).await.unwrap();
        assert_eq!(loaded, saved);
    }
}

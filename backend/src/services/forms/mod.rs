//! # Vendor Form Configuration Service Module
//!
//! Routes for persisting and retrieving the vendor onboarding form layouts
//! composed in the form builder, grouped under `/api/vendor/form-config`.
//!
//! ## Sub-modules:
//! - `get`: Returns the stored configuration for a form step, or the seeded
//!   default when the tenant has never customized that step.
//! - `save`: Validates and persists a form configuration.

mod get;
mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/vendor/form-config";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/save", post().to(save::process))
        .route("/{form_type}", get().to(get::process))
}

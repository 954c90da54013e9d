//! # Payslip Template Service Module
//!
//! This module aggregates all API endpoints related to the management of
//! payslip templates. It acts as a router, directing incoming HTTP requests
//! under the `/api/templates` path to the appropriate handler logic defined
//! in its sub-modules.
//!
//! ## Sub-modules:
//! - `get`: Handles the retrieval of a specific template's configuration.
//! - `list`: Lists every saved template for the picker screen.
//! - `save`: Validates and persists a template configuration.
//! - `pdf`: Projects a template plus a payroll record into a PDF document.

mod get;
mod list;
mod pdf;
mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for all template-related routes.
///
/// # Registered Routes:
///
/// *   **`POST /save`**:
///     - **Handler**: `save::process`
///     - **Description**: Creates a new template or updates an existing one.
///       The payload is validated before persisting; a configuration with
///       structural violations is rejected with the full list of problems.
///
/// *   **`GET /list`**:
///     - **Handler**: `list::process`
///     - **Description**: Returns id, name and last-modified timestamp of
///       every stored template.
///
/// *   **`GET /{template_id}`**:
///     - **Handler**: `get::process`
///     - **Description**: Retrieves the full configuration of one template.
///       An unknown id yields the tenant's default starter template instead
///       of an error, so the builder always has something to edit.
///
/// *   **`GET /pdf/{template_id}/{employee_id}`**:
///     - **Handler**: `pdf::process`
///     - **Description**: Renders the template against the employee's payslip
///       for the requested month (query parameter `month`, defaulting to the
///       current one) and returns the PDF inline.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/save", post().to(save::process))
        .route("/list", get().to(list::process))
        .route("/{template_id}", get().to(get::process))
        .route("/pdf/{template_id}/{employee_id}", get().to(pdf::process))
}

//! Update function for the payslip builder component.
//!
//! Elm-style architecture: `update` receives the current state, the
//! `Context`, and a `Msg`, mutates the state and returns whether the view
//! should re-render. Every structure edit flows through `Msg::Dispatch`,
//! which commits the command to the history; undo/redo only ever move the
//! history cursor.

use base64::{engine::general_purpose, Engine as _};
use gloo_file::futures::read_as_bytes;
use gloo_net::http::Request;
use js_sys::{Date, Reflect};
use wasm_bindgen::JsValue;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::builder::command::{BlockCommand, BlockPatch};
use common::model::payslip::{BlockContent, SaveTemplateRequest};
use common::model::record::PayslipRecord;
use common::model::response::ApiResponse;

use crate::components::toast::show_toast;

use super::helpers::config_md5;
use super::messages::Msg;
use super::state::PayslipBuilderComponent;

pub fn update(
    component: &mut PayslipBuilderComponent,
    ctx: &Context<PayslipBuilderComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::Dispatch(command) => {
            let selection = selection_after(&command, component);
            component.config = component.history.commit(command);
            component.selected_block_id = selection;
            set_window_dirty_flag(component);
            true
        }
        Msg::Undo => {
            if let Some(config) = component.history.undo() {
                component.config = config;
                prune_selection(component);
                set_window_dirty_flag(component);
            }
            true
        }
        Msg::Redo => {
            if let Some(config) = component.history.redo() {
                component.config = config;
                prune_selection(component);
                set_window_dirty_flag(component);
            }
            true
        }
        Msg::SelectBlock(id) => {
            component.selected_block_id = id;
            true
        }
        Msg::ConfigLoaded(config) => {
            component.history = common::builder::history::EditHistory::new(config.clone());
            component.config = config;
            component.selected_block_id = None;
            component.original_md5 = Some(config_md5(&component.config));
            set_window_dirty_flag(component);
            true
        }
        Msg::EmployeesLoaded(employees) => {
            let first_id = employees.first().map(|e| e.id.clone());
            component.employees = employees;
            if let Some(id) = first_id {
                ctx.link().send_message(Msg::SelectEmployee(id));
            }
            true
        }
        Msg::SelectEmployee(id) => {
            component.selected_employee_id = Some(id);
            fetch_preview(component, ctx);
            true
        }
        Msg::SetPreviewMonth(month) => {
            component.preview_month = month;
            fetch_preview(component, ctx);
            true
        }
        Msg::PreviewLoaded(record) => {
            component.preview_data = record;
            true
        }
        Msg::LogoSelected(file) => {
            // Read the chosen logo into a data URL and patch it into the
            // selected company header block.
            let Some(block_id) = component.selected_block_id.clone() else {
                return false;
            };
            let Some(block) = component.config.block(&block_id) else {
                return false;
            };
            let BlockContent::CompanyHeader(header) = &block.content else {
                return false;
            };
            let mut header = header.clone();
            let mime = file.type_();
            let link = ctx.link().clone();
            spawn_local(async move {
                let file = gloo_file::File::from(file);
                if let Ok(bytes) = read_as_bytes(&file).await {
                    let base64 = general_purpose::STANDARD.encode(&bytes);
                    header.logo_image = format!("data:{};base64,{}", mime, base64);
                    link.send_message(Msg::Dispatch(BlockCommand::UpdateBlock {
                        id: block_id,
                        patch: BlockPatch {
                            content: Some(BlockContent::CompanyHeader(header)),
                            styles: None,
                        },
                    }));
                }
            });
            false
        }
        Msg::Save => {
            let payload = SaveTemplateRequest {
                id: component.template_id.clone(),
                config: component.config.clone(),
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                match Request::post("/api/templates/save")
                    .json(&payload)
                    .unwrap()
                    .send()
                    .await
                {
                    Ok(response) if response.status() == 200 => {
                        if let Ok(body) = response.json::<ApiResponse<String>>().await {
                            if let Some(id) = body.data {
                                link.send_message(Msg::SaveSucceeded(id));
                            }
                        }
                        show_toast("Template saved.");
                    }
                    Ok(response) => {
                        // Rejected saves carry the violation list in `data`,
                        // so the body is parsed loosely and only the message
                        // is shown.
                        let body = response
                            .json::<ApiResponse<serde_json::Value>>()
                            .await
                            .ok()
                            .and_then(|b| b.error)
                            .unwrap_or_else(|| "unknown error".to_string());
                        show_toast(&format!("Could not save template: {}", body));
                    }
                    Err(err) => {
                        show_toast(&format!("Could not save template: {}", err));
                    }
                }
            });
            false
        }
        Msg::SaveSucceeded(id) => {
            component.template_id = Some(id);
            component.original_md5 = Some(config_md5(&component.config));
            set_window_dirty_flag(component);
            true
        }
        Msg::OpenPdf => {
            let Some(template_id) = component.template_id.clone() else {
                show_toast("Save the template before generating the PDF.");
                return true;
            };
            if component.is_dirty() {
                show_toast("Save the template before generating the PDF.");
                return true;
            }
            let Some(employee_id) = component.selected_employee_id.clone() else {
                show_toast("Pick an employee to preview first.");
                return true;
            };
            // Cache-busting timestamp.
            let ts = Date::now() as u64;
            component.pdf_url = Some(format!(
                "/api/templates/pdf/{}/{}?month={}&t={}",
                template_id, employee_id, component.preview_month, ts
            ));
            true
        }
        Msg::ClosePdf => {
            component.pdf_url = None;
            true
        }
    }
}

/// Where the selection should land after a committed edit: new blocks and
/// duplicates become selected, removals clear a dangling selection.
fn selection_after(
    command: &BlockCommand,
    component: &PayslipBuilderComponent,
) -> Option<String> {
    match command {
        BlockCommand::AddBlock { id, .. } => Some(id.clone()),
        BlockCommand::DuplicateBlock { new_id, .. } => Some(new_id.clone()),
        BlockCommand::RemoveBlock { id } => {
            if component.selected_block_id.as_deref() == Some(id) {
                None
            } else {
                component.selected_block_id.clone()
            }
        }
        _ => component.selected_block_id.clone(),
    }
}

/// Drop the selection if undo/redo removed the selected block.
fn prune_selection(component: &mut PayslipBuilderComponent) {
    if let Some(id) = &component.selected_block_id {
        if component.config.block(id).is_none() {
            component.selected_block_id = None;
        }
    }
}

fn fetch_preview(component: &PayslipBuilderComponent, ctx: &Context<PayslipBuilderComponent>) {
    let Some(employee_id) = component.selected_employee_id.clone() else {
        return;
    };
    let month = component.preview_month.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let response = Request::get(&format!(
            "/api/payroll/payslips/{}?month={}",
            employee_id, month
        ))
        .send()
        .await;
        let record = match response {
            Ok(resp) if resp.status() == 200 => resp
                .json::<ApiResponse<PayslipRecord>>()
                .await
                .ok()
                .and_then(|b| b.data),
            _ => None,
        };
        link.send_message(Msg::PreviewLoaded(record));
    });
}

/// Sets the global `app_dirty` flag based on whether the configuration
/// differs from the last saved one.
fn set_window_dirty_flag(component: &PayslipBuilderComponent) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(component.is_dirty()),
        );
    }
}

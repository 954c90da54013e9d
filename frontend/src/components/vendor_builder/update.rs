//! Update function for the vendor form builder component.

use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::builder::command::FormCommand;
use common::builder::reorder::{command_for, DragEnd};
use common::model::form::FormConfig;
use common::model::response::ApiResponse;

use crate::components::toast::show_toast;

use super::helpers::{config_md5, fresh_db_key, fresh_field_id, fresh_section_id};
use super::messages::Msg;
use super::state::VendorBuilderComponent;

pub fn update(
    component: &mut VendorBuilderComponent,
    ctx: &Context<VendorBuilderComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::Dispatch(command) => {
            component.config = component.history.commit(command);
            prune_selection(component);
            true
        }
        Msg::Undo => {
            if let Some(config) = component.history.undo() {
                component.config = config;
                prune_selection(component);
            }
            true
        }
        Msg::Redo => {
            if let Some(config) = component.history.redo() {
                component.config = config;
                prune_selection(component);
            }
            true
        }
        Msg::SetStep(step) => {
            if step == component.step {
                return false;
            }
            component.step = step.clone();
            component.selected_field_id = None;
            component.selected_section_id = None;
            fetch_config(step, ctx);
            true
        }
        Msg::ConfigLoaded(config) => {
            component.history = common::builder::history::EditHistory::new(config.clone());
            component.config = config;
            component.selected_field_id = None;
            component.selected_section_id = None;
            component.original_md5 = Some(config_md5(&component.config));
            true
        }
        Msg::SelectField(id) => {
            component.selected_field_id = id;
            if component.selected_field_id.is_some() {
                component.selected_section_id = None;
            }
            true
        }
        Msg::SelectSection(id) => {
            component.selected_section_id = id;
            if component.selected_section_id.is_some() {
                component.selected_field_id = None;
            }
            true
        }
        Msg::AddField(field_type) => {
            // Target the selected section, or the first one in display order.
            let section_id = component
                .selected_section_id
                .clone()
                .or_else(|| {
                    component
                        .selected_field_id
                        .as_ref()
                        .and_then(|id| component.config.field(id))
                        .map(|f| f.section.clone())
                })
                .or_else(|| {
                    component
                        .config
                        .ordered_sections()
                        .first()
                        .map(|s| s.id.clone())
                });
            let Some(section_id) = section_id else {
                show_toast("Add a section before adding fields.");
                return true;
            };
            let id = fresh_field_id();
            component.config = component.history.commit(FormCommand::AddField {
                id: id.clone(),
                db_key: fresh_db_key(),
                field_type,
                section_id,
            });
            component.selected_field_id = Some(id);
            true
        }
        Msg::AddSection => {
            let id = fresh_section_id();
            component.config = component
                .history
                .commit(FormCommand::AddSection { id: id.clone() });
            component.selected_section_id = Some(id);
            component.selected_field_id = None;
            true
        }
        Msg::DragStarted(kind, location) => {
            component.drag = Some((kind, location));
            false
        }
        Msg::DroppedOn(destination) => {
            let Some((kind, source)) = component.drag.take() else {
                return false;
            };
            let drag = DragEnd {
                kind,
                source,
                destination: Some(destination),
            };
            if let Some(command) = command_for(&drag) {
                component.config = component.history.commit(command);
            }
            true
        }
        Msg::DragEnded => {
            component.drag = None;
            false
        }
        Msg::Save => {
            let config = FormConfig {
                form_type: component.step.clone(),
                ..component.config.clone()
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                match Request::post("/api/vendor/form-config/save")
                    .json(&config)
                    .unwrap()
                    .send()
                    .await
                {
                    Ok(response) if response.status() == 200 => {
                        link.send_message(Msg::SaveSucceeded);
                        show_toast("Form layout saved.");
                    }
                    Ok(response) => {
                        // Rejected saves carry the violation list in `data`,
                        // so the body is parsed loosely and only the message
                        // is shown.
                        let error = response
                            .json::<ApiResponse<serde_json::Value>>()
                            .await
                            .ok()
                            .and_then(|b| b.error)
                            .unwrap_or_else(|| "unknown error".to_string());
                        show_toast(&format!("Could not save form layout: {}", error));
                    }
                    Err(err) => {
                        show_toast(&format!("Could not save form layout: {}", err));
                    }
                }
            });
            false
        }
        Msg::SaveSucceeded => {
            component.original_md5 = Some(config_md5(&component.config));
            true
        }
    }
}

/// Drop selections whose target no longer exists after an edit or undo.
fn prune_selection(component: &mut VendorBuilderComponent) {
    if let Some(id) = &component.selected_field_id {
        if component.config.field(id).is_none() {
            component.selected_field_id = None;
        }
    }
    if let Some(id) = &component.selected_section_id {
        if component.config.section(id).is_none() {
            component.selected_section_id = None;
        }
    }
}

pub fn fetch_config(step: String, ctx: &Context<VendorBuilderComponent>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        let response = Request::get(&format!("/api/vendor/form-config/{}", step))
            .send()
            .await;
        match response {
            Ok(resp) if resp.status() == 200 => {
                match resp.json::<ApiResponse<FormConfig>>().await {
                    Ok(body) => match body.data {
                        Some(config) => link.send_message(Msg::ConfigLoaded(config)),
                        None => show_toast("Form configuration response was empty."),
                    },
                    Err(_) => show_toast("Could not parse form configuration."),
                }
            }
            _ => show_toast("Could not load the form configuration."),
        }
    });
}

//! Payslip template builder: root module wiring the Yew `Component`
//! implementation with submodules for state, update logic, view rendering,
//! and helpers.
//!
//! Responsibilities
//! - Re-export selected types (`Msg`, `PayslipBuilderProps`,
//!   `PayslipBuilderComponent`).
//! - Provide the `Component` implementation that delegates to
//!   `update::update` and `view::view`.
//! - On first render, load the template configuration and the employee
//!   directory the preview binds against.

use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::payslip::PayslipConfig;
use common::model::record::Employee;
use common::model::response::ApiResponse;

use crate::components::toast::show_toast;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::PayslipBuilderProps;
pub use state::PayslipBuilderComponent;

impl Component for PayslipBuilderComponent {
    type Message = Msg;
    type Properties = PayslipBuilderProps;

    fn create(_ctx: &Context<Self>) -> Self {
        PayslipBuilderComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            let template_id = ctx
                .props()
                .template_id
                .clone()
                .unwrap_or_else(|| "default".to_string());
            self.template_id = ctx.props().template_id.clone();

            let link = ctx.link().clone();
            spawn_local(async move {
                let response = Request::get(&format!("/api/templates/{}", template_id))
                    .send()
                    .await;
                match response {
                    Ok(resp) if resp.status() == 200 => {
                        match resp.json::<ApiResponse<PayslipConfig>>().await {
                            Ok(body) => match body.data {
                                Some(config) => link.send_message(Msg::ConfigLoaded(config)),
                                None => show_toast("Template response was empty."),
                            },
                            Err(_) => show_toast("Could not parse template response."),
                        }
                    }
                    _ => show_toast("Could not load the template."),
                }
            });

            let link = ctx.link().clone();
            spawn_local(async move {
                match Request::get("/api/hr/employees").send().await {
                    Ok(resp) if resp.status() == 200 => {
                        if let Ok(body) = resp.json::<ApiResponse<Vec<Employee>>>().await {
                            link.send_message(Msg::EmployeesLoaded(body.data.unwrap_or_default()));
                        }
                    }
                    Ok(resp) => {
                        gloo_console::error!("employee directory request failed", resp.status());
                    }
                    Err(err) => {
                        gloo_console::error!("employee directory request failed", err.to_string());
                    }
                }
            });
        }
    }
}

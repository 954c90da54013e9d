//! Vendor onboarding form builder: root module wiring the Yew `Component`
//! implementation with submodules for state, update logic, view rendering,
//! and helpers.
//!
//! Responsibilities
//! - Re-export selected types (`Msg`, `VendorBuilderProps`,
//!   `VendorBuilderComponent`).
//! - Provide the `Component` implementation that delegates to
//!   `update::update` and `view::view`.
//! - On first render, load the form configuration for the starting step.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::VendorBuilderProps;
pub use state::VendorBuilderComponent;

impl Component for VendorBuilderComponent {
    type Message = Msg;
    type Properties = VendorBuilderProps;

    fn create(ctx: &Context<Self>) -> Self {
        VendorBuilderComponent::new(ctx.props().form_type.clone())
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
            update::fetch_config(self.step.clone(), ctx);
        }
    }
}

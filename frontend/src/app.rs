use yew::{classes, html, Component, Context, Html};

use crate::components::payslip_builder::PayslipBuilderComponent;
use crate::components::vendor_builder::VendorBuilderComponent;

/// Which builder screen is active.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Payslip,
    VendorForm,
}

pub enum Msg {
    SetScreen(Screen),
}

pub struct App {
    screen: Screen,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            screen: Screen::Payslip,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetScreen(screen) => {
                if self.screen != screen {
                    self.screen = screen;
                    return true;
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let tab = |screen: Screen, label: &str| {
            html! {
                <button
                    class={classes!("screen-tab", if self.screen == screen { "active" } else { "" })}
                    onclick={link.callback(move |_| Msg::SetScreen(screen))}
                >
                    { label }
                </button>
            }
        };
        html! {
            <div class="app-root">
                <div class="screen-tabs">
                    { tab(Screen::Payslip, "Payslip Builder") }
                    { tab(Screen::VendorForm, "Vendor Form Builder") }
                </div>
                {
                    match self.screen {
                        Screen::Payslip => html! { <PayslipBuilderComponent /> },
                        Screen::VendorForm => html! { <VendorBuilderComponent /> },
                    }
                }
            </div>
        }
    }
}

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct VendorBuilderProps {
    /// Onboarding step to start on; the builder can switch steps afterwards.
    #[prop_or("step1".to_string())]
    pub form_type: String,
}

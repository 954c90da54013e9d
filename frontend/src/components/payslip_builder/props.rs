//! Properties for the `PayslipBuilderComponent`.

use yew::prelude::*;

/// Properties for the payslip builder.
///
/// - If `template_id` is `Some(id)`, the component fetches that template on
///   first render; the backend answers with the default starter template when
///   the id is unknown, so the canvas is always editable.
/// - If `None`, the default starter template is fetched under a fresh id.
#[derive(Properties, PartialEq, Clone)]
pub struct PayslipBuilderProps {
    #[prop_or_default]
    pub template_id: Option<String>,
}

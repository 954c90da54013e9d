//! Component state for the vendor form builder. Same discipline as the
//! payslip builder: the configuration lives in the command log, `config` is a
//! cached copy, and selection/drag state stay outside the history.

use common::builder::command::FormCommand;
use common::builder::history::EditHistory;
use common::builder::reorder::{DragKind, DragLocation};
use common::model::form::FormConfig;

pub struct VendorBuilderComponent {
    pub history: EditHistory<FormConfig, FormCommand>,
    pub config: FormConfig,

    /// Onboarding step currently loaded.
    pub step: String,

    pub selected_field_id: Option<String>,
    pub selected_section_id: Option<String>,

    /// The item currently being dragged, if any.
    pub drag: Option<(DragKind, DragLocation)>,

    /// MD5 of the config JSON at last load/save, for dirty tracking.
    pub original_md5: Option<String>,

    pub loaded: bool,
}

impl VendorBuilderComponent {
    pub fn new(step: String) -> Self {
        let config = FormConfig::default();
        Self {
            history: EditHistory::new(config.clone()),
            config,
            step,
            selected_field_id: None,
            selected_section_id: None,
            drag: None,
            original_md5: None,
            loaded: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        match &self.original_md5 {
            Some(orig) => orig != &super::helpers::config_md5(&self.config),
            None => true,
        }
    }
}

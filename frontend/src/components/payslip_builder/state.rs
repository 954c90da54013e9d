//! Component state for the payslip builder.
//!
//! The configuration being edited lives inside an [`EditHistory`] command
//! log; `config` is a cached copy of `history.current()` so the view never
//! replays commands. Selection is deliberately outside the history: undo and
//! redo restore content, not navigation.

use common::builder::command::BlockCommand;
use common::builder::history::EditHistory;
use common::model::payslip::PayslipConfig;
use common::model::record::{Employee, PayslipRecord};

pub struct PayslipBuilderComponent {
    /// Command log backing undo/redo.
    pub history: EditHistory<PayslipConfig, BlockCommand>,

    /// Cached `history.current()`, refreshed after every commit/undo/redo.
    pub config: PayslipConfig,

    /// Block highlighted in the canvas and edited in the property panel.
    pub selected_block_id: Option<String>,

    /// Server id of the template, once saved or loaded.
    pub template_id: Option<String>,

    /// Employee directory for the preview picker.
    pub employees: Vec<Employee>,

    /// Employee the preview is bound to.
    pub selected_employee_id: Option<String>,

    /// Month key (`YYYY-MM`) the preview payslip is fetched for.
    pub preview_month: String,

    /// The bound record; `None` renders the canvas with literal tokens.
    pub preview_data: Option<PayslipRecord>,

    /// MD5 of the config JSON at last load/save, for dirty tracking.
    pub original_md5: Option<String>,

    /// URL shown in the PDF overlay iframe, when open.
    pub pdf_url: Option<String>,

    /// Guard to avoid running first-render initialization more than once.
    pub loaded: bool,
}

impl PayslipBuilderComponent {
    pub fn new() -> Self {
        let config = PayslipConfig::default();
        Self {
            history: EditHistory::new(config.clone()),
            config,
            selected_block_id: None,
            template_id: None,
            employees: Vec::new(),
            selected_employee_id: None,
            preview_month: super::helpers::current_month(),
            preview_data: None,
            original_md5: None,
            pdf_url: None,
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

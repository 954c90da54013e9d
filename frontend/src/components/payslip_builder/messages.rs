use common::builder::command::BlockCommand;
use common::model::payslip::PayslipConfig;
use common::model::record::{Employee, PayslipRecord};

pub enum Msg {
    /// Commit one structure edit to the history.
    Dispatch(BlockCommand),
    Undo,
    Redo,
    SelectBlock(Option<String>),
    ConfigLoaded(PayslipConfig),
    EmployeesLoaded(Vec<Employee>),
    SelectEmployee(String),
    SetPreviewMonth(String),
    PreviewLoaded(Option<PayslipRecord>),
    LogoSelected(web_sys::File),
    Save,
    SaveSucceeded(String),
    OpenPdf,
    ClosePdf,
}

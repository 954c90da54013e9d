pub mod form;
pub mod payslip;
pub mod record;
pub mod response;

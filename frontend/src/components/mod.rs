pub mod payslip_builder;
pub mod toast;
pub mod vendor_builder;

pub mod forms;
pub mod payroll;
pub mod templates;

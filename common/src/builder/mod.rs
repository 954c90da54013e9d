pub mod command;
pub mod defaults;
pub mod history;
pub mod render;
pub mod reorder;
pub mod validate;
pub mod words;

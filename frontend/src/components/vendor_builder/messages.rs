use common::builder::command::FormCommand;
use common::builder::reorder::{DragKind, DragLocation};
use common::model::form::{FieldType, FormConfig};

pub enum Msg {
    /// Commit one structure edit to the history.
    Dispatch(FormCommand),
    Undo,
    Redo,
    /// Switch to another onboarding step and reload its configuration.
    SetStep(String),
    ConfigLoaded(FormConfig),
    SelectField(Option<String>),
    SelectSection(Option<String>),
    /// Add a field of the given type to the selected (or first) section.
    AddField(FieldType),
    AddSection,
    DragStarted(DragKind, DragLocation),
    /// Drop on a slot; reduced to a command via the reorder rules.
    DroppedOn(DragLocation),
    DragEnded,
    Save,
    SaveSucceeded,
}

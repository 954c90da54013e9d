//! Drag-and-drop interpretation for the form builder. A finished drag is
//! reduced to at most one structure edit; dropping outside any container, or
//! back on the starting slot, produces nothing and therefore never pollutes
//! the undo history.

use serde::{Deserialize, Serialize};

use crate::builder::command::FormCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    Section,
    Field,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    /// Section id for field drags; ignored for section drags.
    pub container_id: String,
    pub index: usize,
}

/// A completed drag gesture as reported by the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEnd {
    pub kind: DragKind,
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

/// Reduce a drag to the command it implies, if any.
pub fn command_for(drag: &DragEnd) -> Option<FormCommand> {
    let destination = drag.destination.as_ref()?;
    if destination == &drag.source {
        return None;
    }
    match drag.kind {
        DragKind::Section => Some(FormCommand::ReorderSections {
            from: drag.source.index,
            to: destination.index,
        }),
        DragKind::Field if destination.container_id == drag.source.container_id => {
            Some(FormCommand::ReorderFields {
                section_id: drag.source.container_id.clone(),
                from: drag.source.index,
                to: destination.index,
            })
        }
        DragKind::Field => Some(FormCommand::MoveField {
            from_section: drag.source.container_id.clone(),
            from_index: drag.source.index,
            to_section: destination.container_id.clone(),
            to_index: destination.index,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::command::{EditCommand, SectionPatch};
    use crate::model::form::{FieldType, FormConfig};

    fn at(container: &str, index: usize) -> DragLocation {
        DragLocation {
            container_id: container.into(),
            index,
        }
    }

    #[test]
    fn dropped_outside_any_container_is_nothing() {
        let drag = DragEnd {
            kind: DragKind::Field,
            source: at("s1", 0),
            destination: None,
        };
        assert_eq!(command_for(&drag), None);
    }

    #[test]
    fn dropped_back_on_the_starting_slot_is_nothing() {
        let drag = DragEnd {
            kind: DragKind::Section,
            source: at("", 2),
            destination: Some(at("", 2)),
        };
        assert_eq!(command_for(&drag), None);
    }

    #[test]
    fn section_drag_reorders_sections() {
        let drag = DragEnd {
            kind: DragKind::Section,
            source: at("", 2),
            destination: Some(at("", 0)),
        };
        assert_eq!(
            command_for(&drag),
            Some(FormCommand::ReorderSections { from: 2, to: 0 })
        );
    }

    #[test]
    fn same_section_field_drag_reorders_within() {
        let drag = DragEnd {
            kind: DragKind::Field,
            source: at("s1", 0),
            destination: Some(at("s1", 2)),
        };
        assert_eq!(
            command_for(&drag),
            Some(FormCommand::ReorderFields {
                section_id: "s1".into(),
                from: 0,
                to: 2,
            })
        );
    }

    #[test]
    fn cross_section_drag_moves_and_renumbers_both_sides() {
        let mut cfg = FormConfig::default();
        for (section, title) in [("a", "A"), ("b", "B")] {
            cfg = FormCommand::AddSection { id: section.into() }.apply(&cfg);
            cfg = FormCommand::UpdateSection {
                id: section.into(),
                patch: SectionPatch {
                    title: Some(title.into()),
                },
            }
            .apply(&cfg);
        }
        for (field, section) in [("a1", "a"), ("a2", "a"), ("b1", "b")] {
            cfg = FormCommand::AddField {
                id: field.into(),
                db_key: format!("custom_{field}"),
                field_type: FieldType::Text,
                section_id: section.into(),
            }
            .apply(&cfg);
        }
        let drag = DragEnd {
            kind: DragKind::Field,
            source: at("a", 1),
            destination: Some(at("b", 0)),
        };
        let command = command_for(&drag).unwrap();
        let next = command.apply(&cfg);
        assert_eq!(next.field("a2").unwrap().section, "b");
        assert_eq!(next.field("a2").unwrap().order, 1);
        assert_eq!(next.field("b1").unwrap().order, 2);
        assert_eq!(next.field("a1").unwrap().order, 1);
    }
}

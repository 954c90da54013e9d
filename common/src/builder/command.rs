//! Structure editor for both builder variants, expressed as replayable
//! commands. Every mutation is a value: the fresh ids a mutation needs are
//! generated by the caller and carried inside the command, so applying the
//! same command to the same configuration always yields the same result.
//! That property is what lets the undo history store a command log instead of
//! a snapshot per edit.
//!
//! Application is total and permissive: an unknown id, an empty container, or
//! an out-of-range index makes the command a no-op that returns the input
//! configuration unchanged. Validation happens separately, at save time.
//!
//! Invariant maintained by every command: within each container (the section
//! list, the fields of one section, the block list) the sibling `order`
//! values are exactly `1..=n` after application.

use serde::{Deserialize, Serialize};

use crate::model::form::{DropdownOption, Field, FieldType, FieldWidth, FormConfig, Section};
use crate::model::payslip::{Block, BlockContent, BlockKind, BlockStyles, PageStyles, PayslipConfig};

/// A deterministic, replayable edit of a configuration.
pub trait EditCommand<C> {
    fn apply(&self, config: &C) -> C;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Partial update for a field; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub field_type: Option<FieldType>,
    pub required: Option<bool>,
    pub width: Option<FieldWidth>,
    pub db_key: Option<String>,
    pub dropdown_options: Option<Vec<DropdownOption>>,
}

impl FieldPatch {
    fn apply_to(&self, field: &mut Field) {
        if let Some(label) = &self.label {
            field.label = label.clone();
        }
        if let Some(placeholder) = &self.placeholder {
            field.placeholder = placeholder.clone();
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(width) = self.width {
            field.width = width;
        }
        if let Some(options) = &self.dropdown_options {
            field.dropdown_options = options.clone();
        }
        // System fields keep their db key locked; their type is locked too
        // unless the field is a select (option curation stays possible).
        if !field.is_system || field.field_type == FieldType::Select {
            if let Some(field_type) = self.field_type {
                field.field_type = field_type;
            }
        }
        if !field.is_system {
            if let Some(db_key) = &self.db_key {
                field.db_key = db_key.clone();
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionPatch {
    pub title: Option<String>,
}

/// Edits of the vendor form configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormCommand {
    AddSection {
        id: String,
    },
    AddField {
        id: String,
        db_key: String,
        field_type: FieldType,
        section_id: String,
    },
    UpdateSection {
        id: String,
        patch: SectionPatch,
    },
    UpdateField {
        id: String,
        patch: FieldPatch,
    },
    DeleteField {
        id: String,
    },
    DeleteSection {
        id: String,
    },
    ReorderSections {
        from: usize,
        to: usize,
    },
    ReorderFields {
        section_id: String,
        from: usize,
        to: usize,
    },
    MoveField {
        from_section: String,
        from_index: usize,
        to_section: String,
        to_index: usize,
    },
}

impl EditCommand<FormConfig> for FormCommand {
    fn apply(&self, config: &FormConfig) -> FormConfig {
        let mut next = config.clone();
        match self {
            FormCommand::AddSection { id } => {
                next.sections.push(Section {
                    id: id.clone(),
                    title: "New Section".into(),
                    order: next.sections.len() as u32 + 1,
                });
            }
            FormCommand::AddField {
                id,
                db_key,
                field_type,
                section_id,
            } => {
                if next.sections.is_empty() || next.section(section_id).is_none() {
                    return next;
                }
                let order = next.fields_in_section(section_id).len() as u32 + 1;
                next.fields.push(Field {
                    id: id.clone(),
                    label: "New Field".into(),
                    placeholder: "Enter detail...".into(),
                    field_type: *field_type,
                    required: false,
                    width: FieldWidth::Half,
                    section: section_id.clone(),
                    order,
                    db_key: db_key.clone(),
                    dropdown_options: vec![],
                    is_system: false,
                });
            }
            FormCommand::UpdateSection { id, patch } => {
                if let Some(section) = next.sections.iter_mut().find(|s| &s.id == id) {
                    if let Some(title) = &patch.title {
                        section.title = title.clone();
                    }
                }
            }
            FormCommand::UpdateField { id, patch } => {
                if let Some(field) = next.fields.iter_mut().find(|f| &f.id == id) {
                    patch.apply_to(field);
                }
            }
            FormCommand::DeleteField { id } => {
                let Some(section_id) = next.field(id).map(|f| f.section.clone()) else {
                    return next;
                };
                next.fields.retain(|f| &f.id != id);
                renumber_fields(&mut next, &section_id);
            }
            FormCommand::DeleteSection { id } => {
                let before = next.sections.len();
                next.sections.retain(|s| &s.id != id);
                if next.sections.len() == before {
                    return next;
                }
                next.fields.retain(|f| &f.section != id);
                renumber_sections(&mut next);
            }
            FormCommand::ReorderSections { from, to } => {
                let mut ordered: Vec<String> = ordered_section_ids(&next);
                if *from >= ordered.len() || *to >= ordered.len() {
                    return next;
                }
                let moved = ordered.remove(*from);
                ordered.insert(*to, moved);
                apply_section_order(&mut next, &ordered);
            }
            FormCommand::ReorderFields { section_id, from, to } => {
                let mut ordered: Vec<String> = next
                    .fields_in_section(section_id)
                    .iter()
                    .map(|f| f.id.clone())
                    .collect();
                if *from >= ordered.len() || *to >= ordered.len() {
                    return next;
                }
                let moved = ordered.remove(*from);
                ordered.insert(*to, moved);
                apply_field_order(&mut next, &ordered);
            }
            FormCommand::MoveField {
                from_section,
                from_index,
                to_section,
                to_index,
            } => {
                if next.section(to_section).is_none() {
                    return next;
                }
                let mut source: Vec<String> = next
                    .fields_in_section(from_section)
                    .iter()
                    .map(|f| f.id.clone())
                    .collect();
                if *from_index >= source.len() {
                    return next;
                }
                let moved = source.remove(*from_index);
                let mut dest: Vec<String> = next
                    .fields_in_section(to_section)
                    .iter()
                    .map(|f| f.id.clone())
                    .collect();
                dest.insert((*to_index).min(dest.len()), moved.clone());
                if let Some(field) = next.fields.iter_mut().find(|f| f.id == moved) {
                    field.section = to_section.clone();
                }
                apply_field_order(&mut next, &source);
                apply_field_order(&mut next, &dest);
            }
        }
        next
    }
}

/// Rewrite section `order` to match the current display order.
fn renumber_sections(config: &mut FormConfig) {
    let ordered = ordered_section_ids(config);
    apply_section_order(config, &ordered);
}

/// Rewrite field `order` within one section to match the display order.
fn renumber_fields(config: &mut FormConfig, section_id: &str) {
    let ordered: Vec<String> = config
        .fields_in_section(section_id)
        .iter()
        .map(|f| f.id.clone())
        .collect();
    apply_field_order(config, &ordered);
}

fn ordered_section_ids(config: &FormConfig) -> Vec<String> {
    config
        .ordered_sections()
        .iter()
        .map(|s| s.id.clone())
        .collect()
}

fn apply_section_order(config: &mut FormConfig, ordered_ids: &[String]) {
    for section in config.sections.iter_mut() {
        if let Some(pos) = ordered_ids.iter().position(|id| id == &section.id) {
            section.order = pos as u32 + 1;
        }
    }
}

fn apply_field_order(config: &mut FormConfig, ordered_ids: &[String]) {
    for field in config.fields.iter_mut() {
        if let Some(pos) = ordered_ids.iter().position(|id| id == &field.id) {
            field.order = pos as u32 + 1;
        }
    }
}

/// Partial update for a block. Content and styles are replaced wholesale when
/// present, mirroring how the property panel submits them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockPatch {
    pub content: Option<BlockContent>,
    pub styles: Option<BlockStyles>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStylesPatch {
    pub background_color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub color: Option<String>,
    pub padding: Option<String>,
}

impl PageStylesPatch {
    fn apply_to(&self, styles: &mut PageStyles) {
        if let Some(v) = &self.background_color {
            styles.background_color = v.clone();
        }
        if let Some(v) = &self.font_family {
            styles.font_family = v.clone();
        }
        if let Some(v) = &self.font_size {
            styles.font_size = v.clone();
        }
        if let Some(v) = &self.color {
            styles.color = v.clone();
        }
        if let Some(v) = &self.padding {
            styles.padding = v.clone();
        }
    }
}

/// Edits of the payslip template configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockCommand {
    AddBlock { id: String, kind: BlockKind },
    UpdateBlock { id: String, patch: BlockPatch },
    RemoveBlock { id: String },
    DuplicateBlock { source_id: String, new_id: String },
    MoveBlock { id: String, direction: MoveDirection },
    ReorderBlocks { from: usize, to: usize },
    SetName { name: String },
    UpdatePageStyles { patch: PageStylesPatch },
}

impl EditCommand<PayslipConfig> for BlockCommand {
    fn apply(&self, config: &PayslipConfig) -> PayslipConfig {
        let mut next = config.clone();
        next.sections.sort_by_key(|b| b.order);
        match self {
            BlockCommand::AddBlock { id, kind } => {
                next.sections.push(Block {
                    id: id.clone(),
                    order: next.sections.len() as u32 + 1,
                    content: kind.default_content(),
                    styles: BlockStyles::default(),
                });
            }
            BlockCommand::UpdateBlock { id, patch } => {
                if let Some(block) = next.sections.iter_mut().find(|b| &b.id == id) {
                    if let Some(content) = &patch.content {
                        block.content = content.clone();
                    }
                    if let Some(styles) = &patch.styles {
                        block.styles = styles.clone();
                    }
                }
            }
            BlockCommand::RemoveBlock { id } => {
                next.sections.retain(|b| &b.id != id);
                renumber_blocks(&mut next);
            }
            BlockCommand::DuplicateBlock { source_id, new_id } => {
                let Some(index) = next.sections.iter().position(|b| &b.id == source_id) else {
                    return next;
                };
                let mut copy = next.sections[index].clone();
                copy.id = new_id.clone();
                next.sections.insert(index + 1, copy);
                renumber_blocks(&mut next);
            }
            BlockCommand::MoveBlock { id, direction } => {
                let Some(index) = next.sections.iter().position(|b| &b.id == id) else {
                    return next;
                };
                let target = match direction {
                    MoveDirection::Up if index > 0 => index - 1,
                    MoveDirection::Down if index + 1 < next.sections.len() => index + 1,
                    _ => return next,
                };
                next.sections.swap(index, target);
                renumber_blocks(&mut next);
            }
            BlockCommand::ReorderBlocks { from, to } => {
                if *from >= next.sections.len() || *to >= next.sections.len() {
                    return next;
                }
                let moved = next.sections.remove(*from);
                next.sections.insert(*to, moved);
                renumber_blocks(&mut next);
            }
            BlockCommand::SetName { name } => {
                next.name = name.clone();
            }
            BlockCommand::UpdatePageStyles { patch } => {
                patch.apply_to(&mut next.styles);
            }
        }
        next
    }
}

fn renumber_blocks(config: &mut PayslipConfig) {
    for (pos, block) in config.sections.iter_mut().enumerate() {
        block.order = pos as u32 + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::payslip::TableContent;

    fn form_with(sections: &[&str], fields: &[(&str, &str)]) -> FormConfig {
        let mut cfg = FormConfig::default();
        for (i, id) in sections.iter().enumerate() {
            cfg = FormCommand::AddSection { id: id.to_string() }.apply(&cfg);
            cfg = FormCommand::UpdateSection {
                id: id.to_string(),
                patch: SectionPatch {
                    title: Some(format!("Section {}", i + 1)),
                },
            }
            .apply(&cfg);
        }
        for (id, section) in fields {
            cfg = FormCommand::AddField {
                id: id.to_string(),
                db_key: format!("custom_{id}"),
                field_type: FieldType::Text,
                section_id: section.to_string(),
            }
            .apply(&cfg);
        }
        cfg
    }

    fn orders_in(cfg: &FormConfig, section: &str) -> Vec<u32> {
        cfg.fields_in_section(section).iter().map(|f| f.order).collect()
    }

    #[test]
    fn add_field_appends_with_next_order() {
        let cfg = form_with(&["s1"], &[("f1", "s1"), ("f2", "s1")]);
        assert_eq!(orders_in(&cfg, "s1"), vec![1, 2]);
    }

    #[test]
    fn add_field_without_sections_is_noop() {
        let cfg = FormConfig::default();
        let next = FormCommand::AddField {
            id: "f1".into(),
            db_key: "k".into(),
            field_type: FieldType::Text,
            section_id: "missing".into(),
        }
        .apply(&cfg);
        assert_eq!(next, cfg);
    }

    #[test]
    fn update_with_unknown_id_is_noop() {
        let cfg = form_with(&["s1"], &[("f1", "s1")]);
        let next = FormCommand::UpdateField {
            id: "ghost".into(),
            patch: FieldPatch {
                label: Some("X".into()),
                ..Default::default()
            },
        }
        .apply(&cfg);
        assert_eq!(next, cfg);
    }

    #[test]
    fn system_field_keeps_db_key_and_type() {
        let mut cfg = form_with(&["s1"], &[("f1", "s1")]);
        cfg.fields[0].is_system = true;
        cfg.fields[0].db_key = "vendor_name".into();
        let next = FormCommand::UpdateField {
            id: "f1".into(),
            patch: FieldPatch {
                label: Some("Renamed".into()),
                db_key: Some("hacked".into()),
                field_type: Some(FieldType::Number),
                ..Default::default()
            },
        }
        .apply(&cfg);
        let field = next.field("f1").unwrap();
        assert_eq!(field.label, "Renamed");
        assert_eq!(field.db_key, "vendor_name");
        assert_eq!(field.field_type, FieldType::Text);
    }

    #[test]
    fn delete_field_renumbers_remaining_siblings() {
        let cfg = form_with(&["s1"], &[("f1", "s1"), ("f2", "s1"), ("f3", "s1")]);
        let next = FormCommand::DeleteField { id: "f2".into() }.apply(&cfg);
        assert_eq!(next.fields.len(), 2);
        assert_eq!(orders_in(&next, "s1"), vec![1, 2]);
    }

    #[test]
    fn delete_section_cascades_and_spares_others() {
        let cfg = form_with(
            &["s1", "s2"],
            &[("f1", "s1"), ("f2", "s1"), ("f3", "s2")],
        );
        let next = FormCommand::DeleteSection { id: "s1".into() }.apply(&cfg);
        assert!(next.section("s1").is_none());
        assert_eq!(next.fields.len(), 1);
        assert_eq!(next.fields[0].id, "f3");
        assert_eq!(next.sections[0].order, 1);
    }

    #[test]
    fn reorder_sections_renumbers_all() {
        let cfg = form_with(&["s1", "s2", "s3"], &[]);
        let next = FormCommand::ReorderSections { from: 2, to: 0 }.apply(&cfg);
        let ids: Vec<&str> = next.ordered_sections().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s3", "s1", "s2"]);
        let orders: Vec<u32> = next.ordered_sections().iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn reorder_fields_only_touches_that_section() {
        let cfg = form_with(
            &["s1", "s2"],
            &[("a", "s1"), ("b", "s1"), ("c", "s1"), ("x", "s2")],
        );
        let next = FormCommand::ReorderFields {
            section_id: "s1".into(),
            from: 0,
            to: 2,
        }
        .apply(&cfg);
        let ids: Vec<&str> = next
            .fields_in_section("s1")
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(orders_in(&next, "s1"), vec![1, 2, 3]);
        assert_eq!(next.field("x").unwrap().order, 1);
    }

    #[test]
    fn move_field_renumbers_both_sections() {
        let cfg = form_with(
            &["a", "b"],
            &[("a1", "a"), ("a2", "a"), ("a3", "a"), ("b1", "b"), ("b2", "b")],
        );
        // Move the second field of A to the front of B.
        let next = FormCommand::MoveField {
            from_section: "a".into(),
            from_index: 1,
            to_section: "b".into(),
            to_index: 0,
        }
        .apply(&cfg);
        let moved = next.field("a2").unwrap();
        assert_eq!(moved.section, "b");
        assert_eq!(moved.order, 1);
        assert_eq!(orders_in(&next, "a"), vec![1, 2]);
        assert_eq!(orders_in(&next, "b"), vec![1, 2, 3]);
        let b_ids: Vec<&str> = next
            .fields_in_section("b")
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(b_ids, vec!["a2", "b1", "b2"]);
    }

    fn payslip_with(ids: &[&str]) -> PayslipConfig {
        let mut cfg = PayslipConfig::default();
        for id in ids {
            cfg = BlockCommand::AddBlock {
                id: id.to_string(),
                kind: BlockKind::Text,
            }
            .apply(&cfg);
        }
        cfg
    }

    #[test]
    fn duplicate_block_is_a_deep_copy_inserted_after_original() {
        let mut cfg = payslip_with(&["b1", "b2"]);
        cfg.sections[0].content = BlockContent::EarningsTable(TableContent::titled("Earnings", true));
        let next = BlockCommand::DuplicateBlock {
            source_id: "b1".into(),
            new_id: "b1-copy".into(),
        }
        .apply(&cfg);
        assert_eq!(next.sections.len(), 3);
        assert_eq!(next.sections[1].id, "b1-copy");
        assert_eq!(next.sections[1].content, next.sections[0].content);
        let orders: Vec<u32> = next.sections.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);

        // Mutating the copy must not leak into the original.
        let mut mutated = next.clone();
        if let BlockContent::EarningsTable(table) = &mut mutated.sections[1].content {
            table.custom_rows.push(crate::model::payslip::CustomRow {
                id: "r".into(),
                name: "Bonus".into(),
                amount: 5000.0,
                ytd: 0.0,
            });
        }
        if let BlockContent::EarningsTable(table) = &mutated.sections[0].content {
            assert!(table.custom_rows.is_empty());
        }
    }

    #[test]
    fn move_block_is_noop_at_boundaries() {
        let cfg = payslip_with(&["b1", "b2", "b3"]);
        let up = BlockCommand::MoveBlock {
            id: "b1".into(),
            direction: MoveDirection::Up,
        }
        .apply(&cfg);
        assert_eq!(up, cfg);
        let down = BlockCommand::MoveBlock {
            id: "b3".into(),
            direction: MoveDirection::Down,
        }
        .apply(&cfg);
        assert_eq!(down, cfg);
    }

    #[test]
    fn move_block_swaps_neighbors_and_renumbers() {
        let cfg = payslip_with(&["b1", "b2", "b3"]);
        let next = BlockCommand::MoveBlock {
            id: "b3".into(),
            direction: MoveDirection::Up,
        }
        .apply(&cfg);
        let ids: Vec<&str> = next.sections.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b3", "b2"]);
        let orders: Vec<u32> = next.sections.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn remove_block_renumbers() {
        let cfg = payslip_with(&["b1", "b2", "b3"]);
        let next = BlockCommand::RemoveBlock { id: "b2".into() }.apply(&cfg);
        let orders: Vec<u32> = next.sections.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![1, 2]);
    }
}

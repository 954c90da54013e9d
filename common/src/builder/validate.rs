//! Save-time validation. Editing is deliberately permissive; this pass runs
//! once before a configuration is persisted and reports every problem at
//! once instead of failing on the first.

use std::collections::HashSet;
use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::builder::render::Variable;
use crate::model::form::FormConfig;
use crate::model::payslip::{BlockContent, PayslipConfig};

/// One problem found in a configuration. Serialized as
/// `{"kind": "duplicateId", "id": "..."}` so API clients get the
/// structured list, not just a flattened message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Violation {
    DuplicateId { id: String },
    UnknownSectionRef { field_id: String, section_id: String },
    NonContiguousOrder { container: String },
    EmptySectionTitle { section_id: String },
    UnknownVariable { block_id: String, token: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DuplicateId { id } => write!(f, "duplicate id '{id}'"),
            Violation::UnknownSectionRef {
                field_id,
                section_id,
            } => write!(f, "field '{field_id}' references missing section '{section_id}'"),
            Violation::NonContiguousOrder { container } => {
                write!(f, "orders in '{container}' are not contiguous from 1")
            }
            Violation::EmptySectionTitle { section_id } => {
                write!(f, "section '{section_id}' has an empty title")
            }
            Violation::UnknownVariable { block_id, token } => {
                write!(f, "block '{block_id}' uses unknown variable '{token}'")
            }
        }
    }
}

fn check_contiguous(container: &str, mut orders: Vec<u32>, out: &mut Vec<Violation>) {
    orders.sort_unstable();
    let expected: Vec<u32> = (1..=orders.len() as u32).collect();
    if orders != expected {
        out.push(Violation::NonContiguousOrder {
            container: container.to_string(),
        });
    }
}

pub fn validate_form(config: &FormConfig) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for id in config
        .sections
        .iter()
        .map(|s| s.id.as_str())
        .chain(config.fields.iter().map(|f| f.id.as_str()))
    {
        if !seen.insert(id) {
            violations.push(Violation::DuplicateId { id: id.to_string() });
        }
    }
    for section in &config.sections {
        if section.title.trim().is_empty() {
            violations.push(Violation::EmptySectionTitle {
                section_id: section.id.clone(),
            });
        }
    }
    for field in &config.fields {
        if config.section(&field.section).is_none() {
            violations.push(Violation::UnknownSectionRef {
                field_id: field.id.clone(),
                section_id: field.section.clone(),
            });
        }
    }
    check_contiguous(
        "sections",
        config.sections.iter().map(|s| s.order).collect(),
        &mut violations,
    );
    for section in &config.sections {
        check_contiguous(
            &section.id,
            config
                .fields_in_section(&section.id)
                .iter()
                .map(|f| f.order)
                .collect(),
            &mut violations,
        );
    }
    violations
}

pub fn validate_payslip(config: &PayslipConfig) -> Vec<Violation> {
    // The token pattern is fixed, so compilation cannot fail.
    let token = Regex::new(r"\{\{([A-Z_0-9]+)\}\}").unwrap();
    let mut violations = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for block in &config.sections {
        if !seen.insert(block.id.as_str()) {
            violations.push(Violation::DuplicateId {
                id: block.id.clone(),
            });
        }
        for text in block_texts(&block.content) {
            for capture in token.captures_iter(text) {
                let name = &capture[1];
                if Variable::parse(name).is_none() {
                    violations.push(Violation::UnknownVariable {
                        block_id: block.id.clone(),
                        token: name.to_string(),
                    });
                }
            }
        }
        // Grid fields are bare token names, checked without the brace syntax.
        if let BlockContent::EmployeeDetailsGrid(grid) = &block.content {
            for name in &grid.fields {
                if Variable::parse(name).is_none() {
                    violations.push(Violation::UnknownVariable {
                        block_id: block.id.clone(),
                        token: name.clone(),
                    });
                }
            }
        }
    }
    check_contiguous(
        "blocks",
        config.sections.iter().map(|b| b.order).collect(),
        &mut violations,
    );
    violations
}

/// Substitutable text carried by a block, if any.
fn block_texts(content: &BlockContent) -> Vec<&str> {
    match content {
        BlockContent::Text(text) => vec![text.text.as_str()],
        BlockContent::PayslipTitle(title) => vec![title.text.as_str()],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::command::{BlockCommand, EditCommand, FormCommand};
    use crate::model::form::FieldType;
    use crate::model::payslip::{BlockKind, TextContent};

    #[test]
    fn command_built_configs_validate_clean() {
        let mut cfg = FormConfig::default();
        cfg = FormCommand::AddSection { id: "s1".into() }.apply(&cfg);
        cfg = FormCommand::AddField {
            id: "f1".into(),
            db_key: "custom_f1".into(),
            field_type: FieldType::Text,
            section_id: "s1".into(),
        }
        .apply(&cfg);
        assert!(validate_form(&cfg).is_empty());
    }

    #[test]
    fn orphan_field_and_duplicate_id_are_reported_together() {
        let mut cfg = FormConfig::default();
        cfg = FormCommand::AddSection { id: "s1".into() }.apply(&cfg);
        for id in ["f1", "f1"] {
            cfg = FormCommand::AddField {
                id: id.into(),
                db_key: "k".into(),
                field_type: FieldType::Text,
                section_id: "s1".into(),
            }
            .apply(&cfg);
        }
        cfg.fields[1].section = "ghost".into();
        let violations = validate_form(&cfg);
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::DuplicateId { id } if id == "f1")));
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::UnknownSectionRef { section_id, .. } if section_id == "ghost")));
    }

    #[test]
    fn gapped_orders_are_reported() {
        let mut cfg = FormConfig::default();
        cfg = FormCommand::AddSection { id: "s1".into() }.apply(&cfg);
        cfg = FormCommand::AddSection { id: "s2".into() }.apply(&cfg);
        cfg.sections[1].order = 5;
        let violations = validate_form(&cfg);
        assert_eq!(
            violations,
            vec![Violation::NonContiguousOrder {
                container: "sections".into()
            }]
        );
    }

    #[test]
    fn violations_serialize_with_kind_and_camel_case_fields() {
        let violation = Violation::UnknownSectionRef {
            field_id: "f1".into(),
            section_id: "ghost".into(),
        };
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(json["kind"], "unknownSectionRef");
        assert_eq!(json["fieldId"], "f1");
        assert_eq!(json["sectionId"], "ghost");
    }

    #[test]
    fn unknown_token_in_text_block_is_reported() {
        let mut cfg = PayslipConfig::default();
        cfg = BlockCommand::AddBlock {
            id: "b1".into(),
            kind: BlockKind::Text,
        }
        .apply(&cfg);
        cfg.sections[0].content = crate::model::payslip::BlockContent::Text(TextContent {
            text: "Pay {{NET_PAY}} to {{EMPLOYEE_NAM}}".into(),
            ..Default::default()
        });
        let violations = validate_payslip(&cfg);
        assert_eq!(
            violations,
            vec![Violation::UnknownVariable {
                block_id: "b1".into(),
                token: "EMPLOYEE_NAM".into()
            }]
        );
    }
}

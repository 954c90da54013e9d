use serde::{Deserialize, Serialize};

/// Input affordance rendered for a vendor form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Email,
    Textarea,
    Select,
    Date,
    File,
    Checkbox,
    Phone,
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::Text
    }
}

/// Column span of a field on the rendered form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldWidth {
    Full,
    Half,
    Third,
    Quarter,
}

impl Default for FieldWidth {
    fn default() -> Self {
        FieldWidth::Half
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

/// A named grouping of fields. `order` is the explicit 1-based position
/// among all sections of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub order: u32,
}

/// A single typed input of the vendor form. Fields live in a flat list and
/// reference their parent section by id; `order` is the 1-based position
/// among the fields of that same section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    pub label: String,
    pub placeholder: String,
    pub field_type: FieldType,
    pub required: bool,
    pub width: FieldWidth,
    pub section: String,
    pub order: u32,
    pub db_key: String,
    #[serde(default)]
    pub dropdown_options: Vec<DropdownOption>,
    /// System fields ship with the tenant and keep their db key and (mostly)
    /// their type locked against edits.
    #[serde(default)]
    pub is_system: bool,
}

/// The persisted configuration of one vendor onboarding form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    #[serde(default)]
    pub form_type: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl FormConfig {
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Sections in display order.
    pub fn ordered_sections(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    /// Fields of one section in display order.
    pub fn fields_in_section(&self, section_id: &str) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self
            .fields
            .iter()
            .filter(|f| f.section == section_id)
            .collect();
        fields.sort_by_key(|f| f.order);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_json_shape_is_camel_case() {
        let field = Field {
            id: "f1".into(),
            label: "Vendor Name".into(),
            placeholder: "Enter detail...".into(),
            field_type: FieldType::Text,
            required: true,
            width: FieldWidth::Half,
            section: "s1".into(),
            order: 1,
            db_key: "vendor_name".into(),
            dropdown_options: vec![],
            is_system: true,
        };
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["fieldType"], "text");
        assert_eq!(json["dbKey"], "vendor_name");
        assert_eq!(json["isSystem"], true);
        assert_eq!(json["width"], "half");
    }

    #[test]
    fn fields_in_section_sorted_by_order() {
        let mut cfg = FormConfig::default();
        cfg.sections.push(Section {
            id: "s1".into(),
            title: "A".into(),
            order: 1,
        });
        for (id, order) in [("f2", 2), ("f1", 1), ("f3", 3)] {
            cfg.fields.push(Field {
                id: id.into(),
                label: String::new(),
                placeholder: String::new(),
                field_type: FieldType::Text,
                required: false,
                width: FieldWidth::Half,
                section: "s1".into(),
                order,
                db_key: id.into(),
                dropdown_options: vec![],
                is_system: false,
            });
        }
        let ids: Vec<&str> = cfg
            .fields_in_section("s1")
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(ids, vec!["f1", "f2", "f3"]);
    }
}

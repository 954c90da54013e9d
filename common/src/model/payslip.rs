//! Payslip template configuration: an ordered list of renderable blocks plus
//! page-level styling. Block content is a tagged union keyed by the block
//! `type`, so the render interpreters can match exhaustively instead of
//! probing loosely-typed maps. Unknown types deserialize into
//! [`BlockContent::Unknown`] and render as an inert placeholder.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_align")]
    pub align: String,
    #[serde(default = "default_text_size")]
    pub size: String,
    #[serde(default = "default_weight")]
    pub weight: String,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: "Enter your text here...".into(),
            align: default_align(),
            size: default_text_size(),
            weight: default_weight(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerContent {
    #[serde(default = "default_thickness")]
    pub thickness: String,
    #[serde(default = "default_divider_color")]
    pub color: String,
    #[serde(default = "default_divider_style")]
    pub style: String,
}

impl Default for DividerContent {
    fn default() -> Self {
        Self {
            thickness: default_thickness(),
            color: default_divider_color(),
            style: default_divider_style(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerContent {
    #[serde(default = "default_spacer_height")]
    pub height: String,
}

impl Default for SpacerContent {
    fn default() -> Self {
        Self {
            height: default_spacer_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_image_height")]
    pub height: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyHeaderContent {
    #[serde(default = "default_true")]
    pub show_logo: bool,
    #[serde(default = "default_align")]
    pub logo_align: String,
    #[serde(default = "default_logo_size")]
    pub logo_size: String,
    #[serde(default)]
    pub logo_image: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default = "default_company_name_size")]
    pub company_name_size: String,
    #[serde(default = "default_true")]
    pub show_address: bool,
    #[serde(default)]
    pub company_address: String,
}

impl Default for CompanyHeaderContent {
    fn default() -> Self {
        Self {
            show_logo: true,
            logo_align: default_align(),
            logo_size: default_logo_size(),
            logo_image: String::new(),
            company_name: String::new(),
            company_name_size: default_company_name_size(),
            show_address: true,
            company_address: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleContent {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_center")]
    pub align: String,
}

impl Default for TitleContent {
    fn default() -> Self {
        Self {
            text: "Payslip for the month of {{MONTH_YEAR}}".into(),
            align: default_center(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeGridContent {
    #[serde(default = "default_columns")]
    pub columns: u8,
    /// Variable token names (without braces) rendered as label/value pairs.
    #[serde(default)]
    pub fields: Vec<String>,
}

impl Default for EmployeeGridContent {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            fields: vec![
                "EMPLOYEE_NAME".into(),
                "EMPLOYEE_CODE".into(),
                "DEPARTMENT".into(),
                "DESIGNATION".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRow {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub ytd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableContent {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_true", rename = "showYTD")]
    pub show_ytd: bool,
    /// Manually entered rows; when non-empty they override the bound record.
    #[serde(default)]
    pub custom_rows: Vec<CustomRow>,
}

impl TableContent {
    pub fn titled(title: &str, show_ytd: bool) -> Self {
        Self {
            title: title.into(),
            show_ytd,
            custom_rows: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetPayContent {
    #[serde(default = "default_net_pay_title")]
    pub title: String,
    #[serde(default = "default_net_pay_bg")]
    pub bg_color: String,
    #[serde(default = "default_net_pay_fg")]
    pub text_color: String,
}

impl Default for NetPayContent {
    fn default() -> Self {
        Self {
            title: default_net_pay_title(),
            bg_color: default_net_pay_bg(),
            text_color: default_net_pay_fg(),
        }
    }
}

/// Block payload, adjacently tagged so the persisted JSON keeps the original
/// `{"type": ..., "content": {...}}` layout.
///
/// Deserialization is hand-written: an unrecognized tag maps to
/// [`BlockContent::Unknown`] no matter what its `content` holds, so one bad
/// block never poisons the rest of a stored configuration. A derived
/// `#[serde(other)]` cannot do this, it only tolerates the tag itself and
/// still chokes on the adjacent payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "kebab-case")]
pub enum BlockContent {
    Text(TextContent),
    Divider(DividerContent),
    Spacer(SpacerContent),
    Image(ImageContent),
    CompanyHeader(CompanyHeaderContent),
    PayslipTitle(TitleContent),
    EmployeeDetailsGrid(EmployeeGridContent),
    EarningsTable(TableContent),
    DeductionsTable(TableContent),
    ReimbursementsTable(TableContent),
    NetPayBox(NetPayContent),
    Unknown,
}

impl<'de> Deserialize<'de> for BlockContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Tagged {
            #[serde(rename = "type")]
            kind: String,
            #[serde(default)]
            content: serde_json::Value,
        }

        fn content<'de, T, D>(value: serde_json::Value) -> Result<T, D::Error>
        where
            T: serde::de::DeserializeOwned,
            D: serde::Deserializer<'de>,
        {
            // A missing payload is treated like an empty map so the field
            // defaults apply.
            let value = match value {
                serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
                value => value,
            };
            serde_json::from_value(value).map_err(serde::de::Error::custom)
        }

        let tagged = Tagged::deserialize(deserializer)?;
        Ok(match tagged.kind.as_str() {
            "text" => BlockContent::Text(content::<_, D>(tagged.content)?),
            "divider" => BlockContent::Divider(content::<_, D>(tagged.content)?),
            "spacer" => BlockContent::Spacer(content::<_, D>(tagged.content)?),
            "image" => BlockContent::Image(content::<_, D>(tagged.content)?),
            "company-header" => BlockContent::CompanyHeader(content::<_, D>(tagged.content)?),
            "payslip-title" => BlockContent::PayslipTitle(content::<_, D>(tagged.content)?),
            "employee-details-grid" => {
                BlockContent::EmployeeDetailsGrid(content::<_, D>(tagged.content)?)
            }
            "earnings-table" => BlockContent::EarningsTable(content::<_, D>(tagged.content)?),
            "deductions-table" => BlockContent::DeductionsTable(content::<_, D>(tagged.content)?),
            "reimbursements-table" => {
                BlockContent::ReimbursementsTable(content::<_, D>(tagged.content)?)
            }
            "net-pay-box" => BlockContent::NetPayBox(content::<_, D>(tagged.content)?),
            _ => BlockContent::Unknown,
        })
    }
}

impl BlockContent {
    /// Short label shown in the layer panel.
    pub fn kind_label(&self) -> &'static str {
        match self {
            BlockContent::Text(_) => "Text",
            BlockContent::Divider(_) => "Divider",
            BlockContent::Spacer(_) => "Spacer",
            BlockContent::Image(_) => "Image",
            BlockContent::CompanyHeader(_) => "Company Header",
            BlockContent::PayslipTitle(_) => "Payslip Title",
            BlockContent::EmployeeDetailsGrid(_) => "Employee Details",
            BlockContent::EarningsTable(_) => "Earnings Table",
            BlockContent::DeductionsTable(_) => "Deductions Table",
            BlockContent::ReimbursementsTable(_) => "Reimbursements Table",
            BlockContent::NetPayBox(_) => "Net Pay Box",
            BlockContent::Unknown => "Unknown",
        }
    }
}

/// Addable block kinds, in palette order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Text,
    Divider,
    Spacer,
    Image,
    CompanyHeader,
    PayslipTitle,
    EmployeeDetailsGrid,
    EarningsTable,
    DeductionsTable,
    ReimbursementsTable,
    NetPayBox,
}

impl BlockKind {
    pub const ALL: [BlockKind; 11] = [
        BlockKind::Text,
        BlockKind::Divider,
        BlockKind::Spacer,
        BlockKind::Image,
        BlockKind::CompanyHeader,
        BlockKind::PayslipTitle,
        BlockKind::EmployeeDetailsGrid,
        BlockKind::EarningsTable,
        BlockKind::DeductionsTable,
        BlockKind::ReimbursementsTable,
        BlockKind::NetPayBox,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Text => "Text",
            BlockKind::Divider => "Divider",
            BlockKind::Spacer => "Spacer",
            BlockKind::Image => "Image",
            BlockKind::CompanyHeader => "Company Header",
            BlockKind::PayslipTitle => "Payslip Title",
            BlockKind::EmployeeDetailsGrid => "Employee Details",
            BlockKind::EarningsTable => "Earnings Table",
            BlockKind::DeductionsTable => "Deductions Table",
            BlockKind::ReimbursementsTable => "Reimbursements Table",
            BlockKind::NetPayBox => "Net Pay Box",
        }
    }

    /// Fresh content for a block of this kind, matching the builder's
    /// "add block" defaults.
    pub fn default_content(self) -> BlockContent {
        match self {
            BlockKind::Text => BlockContent::Text(TextContent::default()),
            BlockKind::Divider => BlockContent::Divider(DividerContent::default()),
            BlockKind::Spacer => BlockContent::Spacer(SpacerContent::default()),
            BlockKind::Image => BlockContent::Image(ImageContent::default()),
            BlockKind::CompanyHeader => {
                BlockContent::CompanyHeader(CompanyHeaderContent::default())
            }
            BlockKind::PayslipTitle => BlockContent::PayslipTitle(TitleContent::default()),
            BlockKind::EmployeeDetailsGrid => {
                BlockContent::EmployeeDetailsGrid(EmployeeGridContent::default())
            }
            BlockKind::EarningsTable => {
                BlockContent::EarningsTable(TableContent::titled("Earnings", true))
            }
            BlockKind::DeductionsTable => {
                BlockContent::DeductionsTable(TableContent::titled("Deductions", true))
            }
            BlockKind::ReimbursementsTable => {
                BlockContent::ReimbursementsTable(TableContent::titled("Reimbursements", false))
            }
            BlockKind::NetPayBox => BlockContent::NetPayBox(NetPayContent::default()),
        }
    }
}

/// Spacing applied around a single block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyles {
    #[serde(default = "default_block_pad")]
    pub padding_top: String,
    #[serde(default = "default_block_pad")]
    pub padding_bottom: String,
    #[serde(default = "default_zero")]
    pub padding_left: String,
    #[serde(default = "default_zero")]
    pub padding_right: String,
    #[serde(default = "default_zero")]
    pub margin_top: String,
    #[serde(default = "default_zero")]
    pub margin_bottom: String,
}

impl Default for BlockStyles {
    fn default() -> Self {
        Self {
            padding_top: default_block_pad(),
            padding_bottom: default_block_pad(),
            padding_left: default_zero(),
            padding_right: default_zero(),
            margin_top: default_zero(),
            margin_bottom: default_zero(),
        }
    }
}

/// One renderable unit of the payslip template. `order` is the explicit
/// 1-based position among the template's blocks; both builders use the same
/// ordering discipline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub order: u32,
    #[serde(flatten)]
    pub content: BlockContent,
    #[serde(default)]
    pub styles: BlockStyles,
}

/// Page-level styling applied to the whole rendered payslip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStyles {
    #[serde(default = "default_page_bg")]
    pub background_color: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: String,
    #[serde(default = "default_page_fg")]
    pub color: String,
    #[serde(default = "default_page_padding")]
    pub padding: String,
}

impl Default for PageStyles {
    fn default() -> Self {
        Self {
            background_color: default_page_bg(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            color: default_page_fg(),
            padding: default_page_padding(),
        }
    }
}

/// Listing row for the saved-templates picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub updated_at: String,
}

/// Payload of the template save endpoint. A missing id means "create".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveTemplateRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub config: PayslipConfig,
}

/// The persisted configuration of one payslip template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sections: Vec<Block>,
    #[serde(default)]
    pub styles: PageStyles,
}

impl Default for PayslipConfig {
    fn default() -> Self {
        Self {
            name: "New Payslip Template".into(),
            sections: vec![],
            styles: PageStyles::default(),
        }
    }
}

impl PayslipConfig {
    pub fn block(&self, id: &str) -> Option<&Block> {
        self.sections.iter().find(|b| b.id == id)
    }

    /// Blocks in display order.
    pub fn ordered_blocks(&self) -> Vec<&Block> {
        let mut blocks: Vec<&Block> = self.sections.iter().collect();
        blocks.sort_by_key(|b| b.order);
        blocks
    }
}

fn default_true() -> bool {
    true
}
fn default_align() -> String {
    "left".into()
}
fn default_center() -> String {
    "center".into()
}
fn default_text_size() -> String {
    "14px".into()
}
fn default_weight() -> String {
    "normal".into()
}
fn default_thickness() -> String {
    "1px".into()
}
fn default_divider_color() -> String {
    "#e5e7eb".into()
}
fn default_divider_style() -> String {
    "solid".into()
}
fn default_spacer_height() -> String {
    "20px".into()
}
fn default_image_height() -> String {
    "120px".into()
}
fn default_logo_size() -> String {
    "80px".into()
}
fn default_company_name_size() -> String {
    "24px".into()
}
fn default_columns() -> u8 {
    2
}
fn default_net_pay_title() -> String {
    "Net Salary Payable".into()
}
fn default_net_pay_bg() -> String {
    "#f9fafb".into()
}
fn default_net_pay_fg() -> String {
    "#111827".into()
}
fn default_block_pad() -> String {
    "10px".into()
}
fn default_zero() -> String {
    "0px".into()
}
fn default_page_bg() -> String {
    "#ffffff".into()
}
fn default_font_family() -> String {
    "Inter".into()
}
fn default_font_size() -> String {
    "12px".into()
}
fn default_page_fg() -> String {
    "#000000".into()
}
fn default_page_padding() -> String {
    "30px".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_json_keeps_type_and_content_keys() {
        let block = Block {
            id: "b1".into(),
            order: 1,
            content: BlockContent::EarningsTable(TableContent::titled("Earnings", true)),
            styles: BlockStyles::default(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "earnings-table");
        assert_eq!(json["content"]["title"], "Earnings");
        assert_eq!(json["content"]["showYTD"], true);
        assert_eq!(json["id"], "b1");
    }

    #[test]
    fn unknown_block_type_deserializes_as_unknown() {
        let json = r#"{"id":"x","order":3,"type":"foo-bar","content":{"weird":1},"styles":{}}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.content, BlockContent::Unknown);
        assert_eq!(block.order, 3);
    }

    #[test]
    fn unknown_block_does_not_break_the_rest_of_a_config() {
        // A config saved by a newer build may carry block types this build
        // has never heard of. The stranger is kept as Unknown and every
        // sibling still loads.
        let json = r#"{
            "name": "Standard",
            "sections": [
                {"id": "t1", "order": 1, "type": "text",
                 "content": {"text": "Hello"}, "styles": {}},
                {"id": "x1", "order": 2, "type": "foo-bar",
                 "content": {"weird": 1}, "styles": {}}
            ],
            "styles": {}
        }"#;
        let cfg: PayslipConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.sections.len(), 2);
        assert_eq!(
            cfg.sections[0].content,
            BlockContent::Text(TextContent {
                text: "Hello".into(),
                ..Default::default()
            })
        );
        assert_eq!(cfg.sections[1].content, BlockContent::Unknown);
    }

    #[test]
    fn missing_content_falls_back_to_field_defaults() {
        let json = r#"{"id":"d1","order":1,"type":"divider","styles":{}}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(
            block.content,
            BlockContent::Divider(DividerContent::default())
        );
    }

    #[test]
    fn config_round_trips() {
        let mut cfg = PayslipConfig::default();
        cfg.sections.push(Block {
            id: "a".into(),
            order: 1,
            content: BlockKind::NetPayBox.default_content(),
            styles: BlockStyles::default(),
        });
        let json = serde_json::to_string(&cfg).unwrap();
        let back: PayslipConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}

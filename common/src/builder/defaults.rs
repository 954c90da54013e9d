//! Seed configurations served when a tenant has never saved one. Ids are
//! fixed strings rather than generated, so repeated fallbacks stay stable
//! across requests and undo history replays.

use crate::model::form::{DropdownOption, Field, FieldType, FieldWidth, FormConfig, Section};
use crate::model::payslip::{
    Block, BlockContent, BlockStyles, CompanyHeaderContent, EmployeeGridContent, PayslipConfig,
};

/// Starting payslip template: company header over an employee details grid.
pub fn default_payslip_config(company_name: &str, company_address: &str) -> PayslipConfig {
    let header_styles = BlockStyles {
        padding_top: "20px".into(),
        padding_bottom: "20px".into(),
        ..Default::default()
    };
    PayslipConfig {
        name: "New Payslip Template".into(),
        sections: vec![
            Block {
                id: "block_company_header".into(),
                order: 1,
                content: BlockContent::CompanyHeader(CompanyHeaderContent {
                    company_name: company_name.into(),
                    company_address: company_address.into(),
                    ..Default::default()
                }),
                styles: header_styles.clone(),
            },
            Block {
                id: "block_employee_grid".into(),
                order: 2,
                content: BlockContent::EmployeeDetailsGrid(EmployeeGridContent {
                    columns: 2,
                    fields: vec![
                        "EMPLOYEE_NAME".into(),
                        "EMPLOYEE_CODE".into(),
                        "DEPARTMENT".into(),
                        "DESIGNATION".into(),
                        "DATE_OF_JOINING".into(),
                        "PAN_NUMBER".into(),
                    ],
                }),
                styles: header_styles,
            },
        ],
        styles: Default::default(),
    }
}

fn section(id: &str, title: &str, order: u32) -> Section {
    Section {
        id: id.into(),
        title: title.into(),
        order,
    }
}

#[allow(clippy::too_many_arguments)]
fn field(
    id: &str,
    label: &str,
    placeholder: &str,
    field_type: FieldType,
    required: bool,
    width: FieldWidth,
    section: &str,
    order: u32,
    db_key: &str,
) -> Field {
    Field {
        id: id.into(),
        label: label.into(),
        placeholder: placeholder.into(),
        field_type,
        required,
        width,
        section: section.into(),
        order,
        db_key: db_key.into(),
        dropdown_options: vec![],
        is_system: false,
    }
}

fn options(pairs: &[(&str, &str)]) -> Vec<DropdownOption> {
    pairs
        .iter()
        .map(|(label, value)| DropdownOption {
            label: (*label).into(),
            value: (*value).into(),
        })
        .collect()
}

/// Default vendor onboarding form for the given step. Unknown step names get
/// an empty single-section shell rather than an error.
pub fn default_form_config(form_type: &str) -> FormConfig {
    match form_type {
        "step1" => step1_config(),
        "step2" => step2_config(),
        other => FormConfig {
            form_type: other.into(),
            sections: vec![section("sec_general", "General", 1)],
            fields: vec![],
        },
    }
}

fn step1_config() -> FormConfig {
    use FieldType::*;
    use FieldWidth::*;
    let mut fields = vec![
        field("f_vendorName", "Vendor Legal Name", "FULL LEGAL BUSINESS NAME AS PER PAN/GST", Text, true, Full, "sec_identity", 1, "vendorName"),
        field("f_city", "City Jurisdiction", "", Text, true, Quarter, "sec_identity", 2, "city"),
        field("f_state", "Region (STATE)", "", Text, true, Half, "sec_identity", 3, "regionState"),
        field("f_pin", "Postal PIN Code", "", Text, true, Quarter, "sec_identity", 4, "pinCode"),
        field("f_bankName", "Bank Institution Name", "", Text, true, Full, "sec_banking", 1, "bankName"),
        field("f_bankCountry", "Bank Country", "", Text, true, Full, "sec_banking", 2, "bankCountry"),
        field("f_accTitle", "Account Title Mode", "", Select, true, Full, "sec_banking", 3, "bankAccountTitle"),
        field("f_branch", "Branch Physical Address", "ENTER FULL BRANCH ADDRESS...", Textarea, true, Full, "sec_banking", 4, "bankBranchAndAddress"),
        field("f_accNo", "Registered Account Number", "", Text, true, Full, "sec_banking", 5, "accountNumber"),
        field("f_ifsc", "IFSC/SWIFT Code", "", Text, true, Full, "sec_banking", 6, "ifscCode"),
        field("f_micr", "MICR Code (9 Digital)", "", Text, false, Full, "sec_banking", 7, "micrCode"),
        field("f_beneName", "Beneficiary Name (Bank Recorded)", "EXACT NAME AS PER CHEQUE LEAF", Text, true, Half, "sec_banking", 8, "accountHolderName"),
        field("f_cheque", "Cancelled Cheque Leaf", "Upload Proof", File, true, Quarter, "sec_banking", 9, "cancelledChequeUrl"),
        field("f_msme", "MSME Registration Status", "", Select, true, Third, "sec_compliance", 1, "msmeStatus"),
        field("f_msmeCert", "MSME Certificate", "Choose Certificate", File, false, Third, "sec_compliance", 2, "msmeCertificateUrl"),
        field("f_contact", "Contact Person Liaison", "", Text, true, Half, "sec_compliance", 3, "contactPerson"),
        field("f_email", "Direct E-Mail ID", "", Email, true, Half, "sec_compliance", 4, "emailId"),
        field("f_mobile", "Official Mobile No.", "", Phone, true, Full, "sec_compliance", 5, "mobileNo"),
    ];
    set_options(&mut fields, "f_accTitle", options(&[
        ("Cash Credit", "Cash Credit"),
        ("Current", "Current"),
        ("Savings", "Saving"),
        ("Overdraft", "OD"),
    ]));
    set_options(&mut fields, "f_msme", options(&[
        ("REGISTERED MSME", "Yes"),
        ("NON-MSME / STANDARD", "No"),
    ]));
    // Identity fields map onto core vendor columns and stay locked.
    for id in ["f_vendorName", "f_accNo", "f_ifsc"] {
        if let Some(f) = fields.iter_mut().find(|f| f.id == id) {
            f.is_system = true;
        }
    }
    FormConfig {
        form_type: "step1".into(),
        sections: vec![
            section("sec_identity", "Part 1. Entity Identification & Geography", 1),
            section("sec_banking", "Part 2. Integrated Banking & Settlement Node", 2),
            section("sec_compliance", "Part 3. Regulatory Compliance & Direct Liaison", 3),
        ],
        fields,
    }
}

fn step2_config() -> FormConfig {
    use FieldType::*;
    use FieldWidth::*;
    let mut fields = vec![
        field("f_scode", "Vendor Code", "SYSTEM GENERATED", Text, false, Quarter, "sec_m_gen", 1, "vendorCode"),
        field("f_cocode", "Co Code", "", Text, false, Quarter, "sec_m_gen", 2, "coCode"),
        field("f_purorg", "Pur Org.", "", Text, false, Quarter, "sec_m_gen", 3, "purOrg"),
        field("f_vac", "Vendor Account", "", Text, false, Quarter, "sec_m_gen", 4, "vendorAccount"),
        field("f_title", "Vendor Title", "", Select, false, Quarter, "sec_m_gen", 5, "title"),
        field("f_vname", "Vendor Name", "", Text, false, Half, "sec_m_gen", 6, "vendorName"),
        field("f_add1", "Address Line 1", "", Text, false, Half, "sec_m_gen", 7, "address1"),
        field("f_add2", "Address Line 2", "", Text, false, Half, "sec_m_gen", 8, "address2"),
        field("f_add3", "Address Line 3", "", Text, false, Half, "sec_m_gen", 9, "address3"),
        field("f_house", "House No.", "", Text, false, Quarter, "sec_m_gen", 10, "houseNo"),
        field("f_spin", "Postal PIN code", "", Text, false, Quarter, "sec_m_gen", 11, "pinCode"),
        field("f_mbank", "Bank Name", "", Text, false, Third, "sec_m_bank", 1, "bankName"),
        field("f_macc", "Account Number", "", Text, false, Third, "sec_m_bank", 2, "accountNumber"),
        field("f_mhold", "Account Holder", "", Text, false, Third, "sec_m_bank", 3, "accountHolderName"),
        field("f_mifsc", "IFSC Code", "", Text, false, Third, "sec_m_bank", 4, "ifscCode"),
        field("f_mbranch", "Branch Name", "", Text, false, Third, "sec_m_bank", 5, "bankBranchName"),
        field("f_macctype", "Account Type", "", Select, false, Third, "sec_m_bank", 6, "accountType"),
        field("f_mpay", "Payment Method", "", Text, false, Third, "sec_m_bank", 7, "paymentMethod"),
        field("f_mterm", "Payment Terms", "", Text, false, Third, "sec_m_bank", 8, "paymentTerms"),
        field("f_mcurr", "Currency", "INR / USD", Text, false, Third, "sec_m_bank", 9, "currency"),
        field("f_ssi", "SSI REGISTRATION No.", "", Text, false, Full, "sec_m_tax", 1, "ssiRegistrationNo"),
        field("f_pan", "PAN No.", "", Text, false, Quarter, "sec_m_tax", 2, "panNo"),
        field("f_gst", "Permanent GST no.", "", Text, false, Quarter, "sec_m_tax", 3, "permanentGstNo"),
        field("f_vat", "VAT No.", "", Text, false, Quarter, "sec_m_tax", 4, "vat"),
        field("f_stax", "SERVICE TAX No.", "", Text, false, Quarter, "sec_m_tax", 5, "serviceTaxNo"),
        field("f_erex", "Excise Reg", "", Text, false, Quarter, "sec_m_tax", 6, "exciseReg"),
        field("f_eran", "Excise Range", "", Text, false, Quarter, "sec_m_tax", 7, "exciseRange"),
        field("f_ediv", "Excise Division", "", Text, false, Quarter, "sec_m_tax", 8, "exciseDivision"),
        field("f_ecom", "Commissionerate", "", Text, false, Quarter, "sec_m_tax", 9, "commissionerate"),
        field("f_ind", "Industry Category", "", Select, false, Quarter, "sec_m_erp", 1, "industryCategory"),
        field("f_inco1", "Inco Terms", "", Text, false, Quarter, "sec_m_erp", 2, "incoTerms"),
        field("f_inco2", "Inco Terms 2", "", Text, false, Quarter, "sec_m_erp", 3, "incoTerms2"),
        field("f_lang", "Language", "", Text, false, Quarter, "sec_m_erp", 4, "language"),
        field("f_esales", "Sales Email", "", Email, false, Quarter, "sec_m_erp", 5, "emailSales"),
        field("f_efin", "Finance Email", "", Email, false, Quarter, "sec_m_erp", 6, "emailFinance"),
        field("f_edes", "Despatch Email", "", Email, false, Quarter, "sec_m_erp", 7, "emailDespatch"),
        field("f_gstc", "GST Classification", "", Select, false, Quarter, "sec_m_erp", 8, "gstClassification"),
    ];
    set_options(&mut fields, "f_title", options(&[
        ("Mr.", "Mr."),
        ("Ms.", "Ms."),
        ("Company", "Company"),
    ]));
    set_options(&mut fields, "f_macctype", options(&[
        ("Current", "Current"),
        ("Savings", "Savings"),
    ]));
    set_options(&mut fields, "f_ind", options(&[
        ("IT Services", "IT"),
        ("Manufacturing", "Manufacturing"),
    ]));
    set_options(&mut fields, "f_gstc", options(&[
        ("Registered", "Registered"),
        ("Unregistered", "Unregistered"),
    ]));
    FormConfig {
        form_type: "step2".into(),
        sections: vec![
            section("sec_m_gen", "Part 1: Master General Data", 1),
            section("sec_m_bank", "Part 2: Master Settlement Node", 2),
            section("sec_m_tax", "Part 3: Compliance & Tax Configuration", 3),
            section("sec_m_erp", "Part 4: ERP Configuration Node", 4),
        ],
        fields,
    }
}

fn set_options(fields: &mut [Field], id: &str, opts: Vec<DropdownOption>) {
    if let Some(f) = fields.iter_mut().find(|f| f.id == id) {
        f.dropdown_options = opts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::validate::{validate_form, validate_payslip};

    #[test]
    fn seed_configs_validate_clean() {
        assert!(validate_form(&default_form_config("step1")).is_empty());
        assert!(validate_form(&default_form_config("step2")).is_empty());
        assert!(validate_form(&default_form_config("anything")).is_empty());
        let payslip = default_payslip_config("Acme Industries", "Pune, MH");
        assert!(validate_payslip(&payslip).is_empty());
    }

    #[test]
    fn step1_locks_core_identity_fields() {
        let cfg = default_form_config("step1");
        assert!(cfg.field("f_vendorName").unwrap().is_system);
        assert!(!cfg.field("f_city").unwrap().is_system);
    }
}

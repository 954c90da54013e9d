//! The bound record: a payroll snapshot for one employee and month, as served
//! by the payroll endpoint. Read-only to the builders; the render interpreter
//! substitutes its values into `{{TOKEN}}` placeholders and table rows. Every
//! field is defaulted so partial payloads still deserialize.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub ifsc_code: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetails {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub employee_code: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub joining_date: Option<NaiveDate>,
    #[serde(default)]
    pub pan_number: String,
    #[serde(default)]
    pub uan_number: String,
    #[serde(default)]
    pub pf_number: String,
    #[serde(default)]
    pub bank_details: BankDetails,
}

/// Directory entry returned by the employee listing endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    #[serde(flatten)]
    pub details: EmployeeDetails,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.details.first_name, self.details.last_name)
            .trim()
            .to_string()
    }
}

/// One earnings/deductions/reimbursements line of a payslip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub ytd: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipRecord {
    #[serde(default)]
    pub employee_details: EmployeeDetails,
    #[serde(default)]
    pub payslip_date: Option<NaiveDate>,
    #[serde(default)]
    pub net_pay: f64,
    #[serde(default)]
    pub gross_earnings: f64,
    #[serde(default)]
    pub total_deductions: f64,
    #[serde(default)]
    pub paid_days: u32,
    #[serde(default)]
    pub lop_days: u32,
    #[serde(default)]
    pub earnings: Vec<PayRow>,
    #[serde(default)]
    pub deductions: Vec<PayRow>,
    #[serde(default)]
    pub reimbursements: Vec<PayRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_payload_deserializes() {
        let json = r#"{"employeeDetails":{"firstName":"Asha","lastName":"Rao"},"netPay":52345.5}"#;
        let record: PayslipRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.employee_details.first_name, "Asha");
        assert_eq!(record.net_pay, 52345.5);
        assert!(record.earnings.is_empty());
        assert_eq!(record.payslip_date, None);
    }
}

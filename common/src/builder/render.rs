//! Render-time resolution: variable substitution, money/date formatting, and
//! table row resolution against an optionally bound payroll record. Both the
//! live preview and the PDF projection call into this module so the two
//! outputs cannot drift apart.

use num_format::{CustomFormat, Grouping, ToFormattedString};
use serde::{Deserialize, Serialize};

use crate::builder::words::number_to_words;
use crate::model::payslip::TableContent;
use crate::model::record::{PayRow, PayslipRecord};

/// The fixed set of substitutable tokens, written `{{NAME}}` in block text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variable {
    EmployeeName,
    EmployeeCode,
    Department,
    Designation,
    DateOfJoining,
    PanNumber,
    UanNo,
    PfNo,
    BankName,
    AccountNo,
    Ifsc,
    MonthYear,
    NetPay,
    GrossEarnings,
    TotalDeductions,
}

impl Variable {
    pub const ALL: [Variable; 15] = [
        Variable::EmployeeName,
        Variable::EmployeeCode,
        Variable::Department,
        Variable::Designation,
        Variable::DateOfJoining,
        Variable::PanNumber,
        Variable::UanNo,
        Variable::PfNo,
        Variable::BankName,
        Variable::AccountNo,
        Variable::Ifsc,
        Variable::MonthYear,
        Variable::NetPay,
        Variable::GrossEarnings,
        Variable::TotalDeductions,
    ];

    /// The bare token name, without braces.
    pub fn name(self) -> &'static str {
        match self {
            Variable::EmployeeName => "EMPLOYEE_NAME",
            Variable::EmployeeCode => "EMPLOYEE_CODE",
            Variable::Department => "DEPARTMENT",
            Variable::Designation => "DESIGNATION",
            Variable::DateOfJoining => "DATE_OF_JOINING",
            Variable::PanNumber => "PAN_NUMBER",
            Variable::UanNo => "UAN_NO",
            Variable::PfNo => "PF_NO",
            Variable::BankName => "BANK_NAME",
            Variable::AccountNo => "ACCOUNT_NO",
            Variable::Ifsc => "IFSC",
            Variable::MonthYear => "MONTH_YEAR",
            Variable::NetPay => "NET_PAY",
            Variable::GrossEarnings => "GROSS_EARNINGS",
            Variable::TotalDeductions => "TOTAL_DEDUCTIONS",
        }
    }

    /// The token as it appears inside block text.
    pub fn token(self) -> String {
        format!("{{{{{}}}}}", self.name())
    }

    pub fn parse(name: &str) -> Option<Variable> {
        Variable::ALL.into_iter().find(|v| v.name() == name)
    }

    /// Human label used for grid rows and the variable picker.
    pub fn label(self) -> &'static str {
        match self {
            Variable::EmployeeName => "Employee Name",
            Variable::EmployeeCode => "Employee Code",
            Variable::Department => "Department",
            Variable::Designation => "Designation",
            Variable::DateOfJoining => "Date of Joining",
            Variable::PanNumber => "PAN Number",
            Variable::UanNo => "UAN No",
            Variable::PfNo => "PF No",
            Variable::BankName => "Bank Name",
            Variable::AccountNo => "Account No",
            Variable::Ifsc => "IFSC",
            Variable::MonthYear => "Month & Year",
            Variable::NetPay => "Net Pay",
            Variable::GrossEarnings => "Gross Earnings",
            Variable::TotalDeductions => "Total Deductions",
        }
    }

    /// Value of this variable for the bound record.
    pub fn value(self, record: &PayslipRecord) -> String {
        let emp = &record.employee_details;
        match self {
            Variable::EmployeeName => {
                format!("{} {}", emp.first_name, emp.last_name).trim().to_string()
            }
            Variable::EmployeeCode => emp.employee_code.clone(),
            Variable::Department => emp.department.clone(),
            Variable::Designation => emp.designation.clone(),
            Variable::DateOfJoining => emp
                .joining_date
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
            Variable::PanNumber => emp.pan_number.clone(),
            Variable::UanNo => emp.uan_number.clone(),
            Variable::PfNo => emp.pf_number.clone(),
            Variable::BankName => emp.bank_details.bank_name.clone(),
            Variable::AccountNo => emp.bank_details.account_number.clone(),
            Variable::Ifsc => emp.bank_details.ifsc_code.clone(),
            Variable::MonthYear => record
                .payslip_date
                .map(|d| d.format("%B %Y").to_string())
                .unwrap_or_default(),
            Variable::NetPay => format!("₹ {}", format_money(record.net_pay)),
            Variable::GrossEarnings => format!("₹ {}", format_money(record.gross_earnings)),
            Variable::TotalDeductions => format!("₹ {}", format_money(record.total_deductions)),
        }
    }
}

/// Format a rupee amount with Indian digit grouping and two decimals,
/// e.g. `1234567.5` becomes `12,34,567.50`. No currency sign.
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let paise = (value.abs() * 100.0).round() as u64;
    // Grouping is fixed and the separator is a valid single grapheme, so the
    // builder cannot fail.
    let format = CustomFormat::builder()
        .grouping(Grouping::Indian)
        .separator(",")
        .build()
        .unwrap();
    let rupees = (paise / 100).to_formatted_string(&format);
    format!("{sign}{rupees}.{:02}", paise % 100)
}

/// Replace every `{{TOKEN}}` in `text` with the bound record's value. With no
/// record bound the text is returned untouched, tokens and all, so the
/// builder canvas shows what will be substituted.
pub fn substitute_variables(text: &str, record: Option<&PayslipRecord>) -> String {
    let Some(record) = record else {
        return text.to_string();
    };
    let mut result = text.to_string();
    for var in Variable::ALL {
        if result.contains(&var.token()) {
            result = result.replace(&var.token(), &var.value(record));
        }
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Earnings,
    Deductions,
    Reimbursements,
}

impl TableKind {
    fn rows_of<'a>(self, record: &'a PayslipRecord) -> &'a [PayRow] {
        match self {
            TableKind::Earnings => &record.earnings,
            TableKind::Deductions => &record.deductions,
            TableKind::Reimbursements => &record.reimbursements,
        }
    }

    fn placeholder(self) -> ResolvedRow {
        let name = match self {
            TableKind::Earnings => "Basic Salary",
            TableKind::Deductions => "EPF",
            TableKind::Reimbursements => "None",
        };
        ResolvedRow {
            name: name.into(),
            amount: 0.0,
            ytd: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRow {
    pub name: String,
    pub amount: f64,
    pub ytd: f64,
}

/// A table ready to draw: data rows plus derived totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTable {
    pub title: String,
    pub show_ytd: bool,
    pub rows: Vec<ResolvedRow>,
    pub total_amount: f64,
    pub total_ytd: f64,
}

/// Resolve a table block against the bound record. Custom rows, when present,
/// override the record entirely; without either, a single placeholder row is
/// shown. Totals are always recomputed from the rendered rows.
pub fn resolve_table(
    kind: TableKind,
    content: &TableContent,
    record: Option<&PayslipRecord>,
) -> ResolvedTable {
    let rows: Vec<ResolvedRow> = if !content.custom_rows.is_empty() {
        content
            .custom_rows
            .iter()
            .map(|r| ResolvedRow {
                name: r.name.clone(),
                amount: r.amount,
                ytd: r.ytd,
            })
            .collect()
    } else if let Some(record) = record.filter(|r| !kind.rows_of(r).is_empty()) {
        kind.rows_of(record)
            .iter()
            .map(|r| ResolvedRow {
                name: r.name.clone(),
                amount: r.amount,
                ytd: r.ytd.unwrap_or(0.0),
            })
            .collect()
    } else {
        vec![kind.placeholder()]
    };
    let total_amount = rows.iter().map(|r| r.amount).sum();
    let total_ytd = rows.iter().map(|r| r.ytd).sum();
    ResolvedTable {
        title: content.title.clone(),
        show_ytd: content.show_ytd,
        rows,
        total_amount,
        total_ytd,
    }
}

/// Label/value pairs for the employee details grid. With no record bound the
/// value cell shows the literal token.
pub fn employee_grid_rows(
    fields: &[String],
    record: Option<&PayslipRecord>,
) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|name| match Variable::parse(name) {
            Some(var) => {
                let value = match record {
                    Some(record) => var.value(record),
                    None => var.token(),
                };
                (var.label().to_string(), value)
            }
            None => (name.clone(), format!("[{name}]")),
        })
        .collect()
}

/// Net pay amount plus its spelled-out form, as shown in the net pay box.
pub fn net_pay_line(record: Option<&PayslipRecord>) -> (String, String) {
    let net_pay = record.map(|r| r.net_pay).unwrap_or(0.0);
    let amount = format!("₹ {}", format_money(net_pay));
    let words = number_to_words(net_pay.floor() as u64);
    (amount, words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::payslip::CustomRow;
    use crate::model::record::EmployeeDetails;

    fn record() -> PayslipRecord {
        PayslipRecord {
            employee_details: EmployeeDetails {
                first_name: "Asha".into(),
                last_name: "Rao".into(),
                ..Default::default()
            },
            net_pay: 52345.5,
            ..Default::default()
        }
    }

    #[test]
    fn substitutes_bound_values_with_currency_formatting() {
        let text = "Hello {{EMPLOYEE_NAME}}, net pay {{NET_PAY}}";
        assert_eq!(
            substitute_variables(text, Some(&record())),
            "Hello Asha Rao, net pay ₹ 52,345.50"
        );
    }

    #[test]
    fn date_tokens_render_in_display_formats() {
        let mut rec = record();
        rec.employee_details.joining_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 5);
        rec.payslip_date = chrono::NaiveDate::from_ymd_opt(2024, 2, 1);
        let text = "Payslip for {{MONTH_YEAR}}, joined {{DATE_OF_JOINING}}";
        assert_eq!(
            substitute_variables(text, Some(&rec)),
            "Payslip for February 2024, joined 05/01/2020"
        );
    }

    #[test]
    fn no_record_leaves_text_untouched() {
        let text = "Hello {{EMPLOYEE_NAME}}, net pay {{NET_PAY}}";
        assert_eq!(substitute_variables(text, None), text);
    }

    #[test]
    fn indian_grouping_kicks_in_above_a_lakh() {
        assert_eq!(format_money(1234567.5), "12,34,567.50");
        assert_eq!(format_money(30000.0), "30,000.00");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-999.9), "-999.90");
    }

    #[test]
    fn record_rows_used_when_custom_rows_empty() {
        let mut rec = record();
        rec.earnings.push(PayRow {
            name: "Basic".into(),
            amount: 30000.0,
            ytd: None,
        });
        let content = TableContent::titled("Earnings", true);
        let table = resolve_table(TableKind::Earnings, &content, Some(&rec));
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].name, "Basic");
        assert_eq!(table.total_amount, 30000.0);
    }

    #[test]
    fn custom_rows_override_record_rows() {
        let mut rec = record();
        rec.earnings.push(PayRow {
            name: "Basic".into(),
            amount: 30000.0,
            ytd: None,
        });
        let mut content = TableContent::titled("Earnings", true);
        content.custom_rows.push(CustomRow {
            id: "r1".into(),
            name: "Bonus".into(),
            amount: 5000.0,
            ytd: 5000.0,
        });
        let table = resolve_table(TableKind::Earnings, &content, Some(&rec));
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].name, "Bonus");
        assert_eq!(table.total_amount, 5000.0);
        assert_eq!(table.total_ytd, 5000.0);
    }

    #[test]
    fn placeholder_row_without_data() {
        let content = TableContent::titled("Deductions", true);
        let table = resolve_table(TableKind::Deductions, &content, None);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].name, "EPF");
        assert_eq!(table.total_amount, 0.0);
    }

    #[test]
    fn grid_rows_show_tokens_without_a_record() {
        let fields = vec!["EMPLOYEE_NAME".to_string(), "NOT_A_VAR".to_string()];
        let rows = employee_grid_rows(&fields, None);
        assert_eq!(rows[0], ("Employee Name".into(), "{{EMPLOYEE_NAME}}".into()));
        assert_eq!(rows[1], ("NOT_A_VAR".into(), "[NOT_A_VAR]".into()));
    }

    #[test]
    fn net_pay_line_spells_out_amount() {
        let (amount, words) = net_pay_line(Some(&record()));
        assert_eq!(amount, "₹ 52,345.50");
        assert_eq!(
            words,
            "Fifty Two Thousand Three Hundred Forty Five Rupees Only"
        );
    }
}

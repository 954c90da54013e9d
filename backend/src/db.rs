//! SQLite schema and demo seed data. Configurations are stored as JSON text
//! columns; the database only needs to key them, never to query inside them.

use chrono::{Datelike, NaiveDate, Utc};
use common::model::record::{
    BankDetails, Employee, EmployeeDetails, PayRow, PayslipRecord,
};
use log::info;
use rusqlite::{params, Connection};

pub fn open(db_path: &str) -> Result<Connection, String> {
    Connection::open(db_path).map_err(|e| e.to_string())
}

/// Create tables and seed demo payroll data on first run.
pub fn init(db_path: &str) -> Result<(), String> {
    let conn = open(db_path)?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS payslip_templates (
             id         TEXT PRIMARY KEY,
             name       TEXT NOT NULL,
             config     TEXT NOT NULL,
             updated_at TEXT NOT NULL
         );
         CREATE TABLE IF NOT EXISTS form_configs (
             form_type  TEXT PRIMARY KEY,
             config     TEXT NOT NULL,
             updated_at TEXT NOT NULL
         );
         CREATE TABLE IF NOT EXISTS employees (
             id   TEXT PRIMARY KEY,
             data TEXT NOT NULL
         );
         CREATE TABLE IF NOT EXISTS payslips (
             employee_id TEXT NOT NULL,
             month       TEXT NOT NULL,
             data        TEXT NOT NULL,
             PRIMARY KEY (employee_id, month)
         );",
    )
    .map_err(|e| e.to_string())?;

    let employee_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))
        .map_err(|e| e.to_string())?;
    if employee_count == 0 {
        seed(&conn)?;
        info!("seeded demo employees and payslips");
    }
    Ok(())
}

/// Month key used by the payslip lookup, e.g. `2026-08`.
pub fn current_month() -> String {
    let now = Utc::now();
    format!("{:04}-{:02}", now.year(), now.month())
}

fn seed(conn: &Connection) -> Result<(), String> {
    let month = current_month();
    for (employee, record) in demo_payroll() {
        conn.execute(
            "INSERT INTO employees (id, data) VALUES (?1, ?2)",
            params![
                &employee.id,
                serde_json::to_string(&employee).map_err(|e| e.to_string())?
            ],
        )
        .map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO payslips (employee_id, month, data) VALUES (?1, ?2, ?3)",
            params![
                &employee.id,
                &month,
                serde_json::to_string(&record).map_err(|e| e.to_string())?
            ],
        )
        .map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn demo_payroll() -> Vec<(Employee, PayslipRecord)> {
    let payslip_date = Utc::now().date_naive();
    vec![
        demo_record(
            "emp_1001",
            ("Asha", "Rao", "ACM-0042", "Engineering", "Senior Engineer"),
            NaiveDate::from_ymd_opt(2019, 7, 15),
            payslip_date,
            vec![("Basic Salary", 45000.0), ("HRA", 18000.0), ("Special Allowance", 9000.0)],
            vec![("EPF", 5400.0), ("Professional Tax", 200.0), ("TDS", 14054.5)],
        ),
        demo_record(
            "emp_1002",
            ("Vikram", "Mehta", "ACM-0077", "Finance", "Accounts Manager"),
            NaiveDate::from_ymd_opt(2021, 2, 1),
            payslip_date,
            vec![("Basic Salary", 38000.0), ("HRA", 15200.0)],
            vec![("EPF", 4560.0), ("Professional Tax", 200.0)],
        ),
    ]
}

fn demo_record(
    id: &str,
    (first, last, code, department, designation): (&str, &str, &str, &str, &str),
    joining_date: Option<NaiveDate>,
    payslip_date: NaiveDate,
    earnings: Vec<(&str, f64)>,
    deductions: Vec<(&str, f64)>,
) -> (Employee, PayslipRecord) {
    let details = EmployeeDetails {
        first_name: first.into(),
        last_name: last.into(),
        employee_code: code.into(),
        department: department.into(),
        designation: designation.into(),
        joining_date,
        pan_number: "ABCDE1234F".into(),
        uan_number: "100234567890".into(),
        pf_number: "MH/PUN/12345/678".into(),
        bank_details: BankDetails {
            bank_name: "State Bank of India".into(),
            account_number: "30112233445".into(),
            ifsc_code: "SBIN0001234".into(),
        },
    };
    let rows = |pairs: Vec<(&str, f64)>| -> Vec<PayRow> {
        pairs
            .into_iter()
            .map(|(name, amount)| PayRow {
                name: name.into(),
                amount,
                // YTD assumes a uniform run since April, the fiscal start.
                ytd: Some(amount * months_since_april(payslip_date) as f64),
            })
            .collect()
    };
    let earnings = rows(earnings);
    let deductions = rows(deductions);
    let gross: f64 = earnings.iter().map(|r| r.amount).sum();
    let total_deductions: f64 = deductions.iter().map(|r| r.amount).sum();
    let record = PayslipRecord {
        employee_details: details.clone(),
        payslip_date: Some(payslip_date),
        net_pay: gross - total_deductions,
        gross_earnings: gross,
        total_deductions,
        paid_days: 30,
        lop_days: 0,
        earnings,
        deductions,
        reimbursements: vec![],
    };
    (
        Employee {
            id: id.into(),
            details,
        },
        record,
    )
}

fn months_since_april(date: NaiveDate) -> u32 {
    let month = date.month();
    if month >= 4 {
        month - 3
    } else {
        month + 9
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent_and_seeds_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sqlite");
        let path = path.to_str().unwrap();
        init(path).unwrap();
        init(path).unwrap();
        let conn = open(path).unwrap();
        let employees: i64 = conn
            .query_row("SELECT COUNT(*) FROM employees", [], |r| r.get(0))
            .unwrap();
        assert_eq!(employees, 2);
        let payslips: i64 = conn
            .query_row("SELECT COUNT(*) FROM payslips", [], |r| r.get(0))
            .unwrap();
        assert_eq!(payslips, 2);
    }

    #[test]
    fn seeded_records_balance() {
        for (_, record) in demo_payroll() {
            let gross: f64 = record.earnings.iter().map(|r| r.amount).sum();
            let deductions: f64 = record.deductions.iter().map(|r| r.amount).sum();
            assert_eq!(record.gross_earnings, gross);
            assert_eq!(record.net_pay, gross - deductions);
        }
    }
}

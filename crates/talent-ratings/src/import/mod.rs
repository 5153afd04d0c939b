//! CSV adapter turning employee exports into [`EmployeeAttributes`].

mod parser;
mod tenure;

use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::ratings::{EmployeeAttributes, EmployeeId};
use parser::{EmployeeRow, EMPLOYEE_ID_COLUMN};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read employee export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid employee CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("employee export is missing the '{0}' column")]
    MissingColumn(&'static str),
    #[error("employee {employee_id} has an unreadable hire date '{value}'")]
    InvalidHireDate { employee_id: String, value: String },
}

pub struct EmployeeImporter;

impl EmployeeImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        as_of: NaiveDate,
    ) -> Result<Vec<EmployeeAttributes>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, as_of)
    }

    /// Read an export with canonical snake_case headers.
    ///
    /// `as_of` anchors tenure for rows that carry a hire date but no tenure.
    pub fn from_reader<R: Read>(
        reader: R,
        as_of: NaiveDate,
    ) -> Result<Vec<EmployeeAttributes>, ImportError> {
        let export = parser::parse_rows(reader)?;
        if !export.has_employee_id {
            return Err(ImportError::MissingColumn(EMPLOYEE_ID_COLUMN));
        }

        let mut employees = Vec::with_capacity(export.rows.len());
        for (line, row) in export.rows {
            if row.employee_id.trim().is_empty() {
                warn!(line, "skipping employee row without an employee_id");
                continue;
            }
            employees.push(into_attributes(row, as_of)?);
        }

        debug!(employees = employees.len(), "employee export parsed");
        Ok(employees)
    }
}

fn into_attributes(row: EmployeeRow, as_of: NaiveDate) -> Result<EmployeeAttributes, ImportError> {
    let hire_date = match row.hire_date.as_deref() {
        Some(raw) => Some(tenure::parse_hire_date(raw).ok_or_else(|| {
            ImportError::InvalidHireDate {
                employee_id: row.employee_id.clone(),
                value: raw.to_string(),
            }
        })?),
        None => None,
    };

    let tenure_years = row
        .tenure_years
        .or_else(|| hire_date.map(|hired| tenure::tenure_years(hired, as_of)));

    Ok(EmployeeAttributes {
        employee_id: EmployeeId(row.employee_id.trim().to_string()),
        name: row.name,
        department: row.department,
        job_title: row.job_title,
        level: row.level,
        status: row.status,
        manager_id: row.manager_id,
        hire_date,
        tenure_years,
        compensation_base: row.compensation_base,
        compensation_bonus: row.compensation_bonus,
        compensation_equity: row.compensation_equity,
        manager_rating: row.manager_rating,
        current_performance_rating: row.current_performance_rating,
        promotions: row.promotions,
        job_changes: row.job_changes,
        tenure_at_level: row.tenure_at_level,
        red_flags: row.red_flags,
    })
}

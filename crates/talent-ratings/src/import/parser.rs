use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) const EMPLOYEE_ID_COLUMN: &str = "employee_id";

/// One employee export row; every column except the identifier may be blank.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct EmployeeRow {
    pub(crate) employee_id: String,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub(crate) name: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub(crate) department: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub(crate) job_title: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub(crate) level: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub(crate) status: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub(crate) manager_id: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub(crate) hire_date: Option<String>,
    pub(crate) tenure_years: Option<f64>,
    pub(crate) compensation_base: Option<f64>,
    pub(crate) compensation_bonus: Option<f64>,
    pub(crate) compensation_equity: Option<f64>,
    pub(crate) manager_rating: Option<f64>,
    pub(crate) current_performance_rating: Option<f64>,
    pub(crate) promotions: Option<u32>,
    pub(crate) job_changes: Option<u32>,
    pub(crate) tenure_at_level: Option<f64>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub(crate) red_flags: Option<String>,
}

/// Parsed rows paired with their 1-based line number in the source file.
pub(crate) struct ParsedExport {
    pub(crate) has_employee_id: bool,
    pub(crate) rows: Vec<(u64, EmployeeRow)>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<ParsedExport, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let has_employee_id = headers.iter().any(|header| header == EMPLOYEE_ID_COLUMN);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|position| position.line()).unwrap_or(0);
        let row: EmployeeRow = record.deserialize(Some(&headers))?;
        rows.push((line, row));
    }

    Ok(ParsedExport {
        has_employee_id,
        rows,
    })
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

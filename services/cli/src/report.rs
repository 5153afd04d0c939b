use serde::Serialize;
use std::io::Write;
use talent_ratings::error::AppError;
use talent_ratings::ratings::{
    CohortGrouping, InflationBuckets, ManagerLeniency, RatingMap, RatingResult, TalentGrid,
};

#[derive(Debug, Serialize)]
struct RatingsReport<'a> {
    grouping: CohortGrouping,
    rated: usize,
    ratings: Vec<&'a RatingResult>,
}

/// Inputs for the inflation report, shared by the text and JSON renderers.
#[derive(Debug, Serialize)]
pub(crate) struct InflationSummary<'a> {
    pub(crate) threshold: f64,
    pub(crate) average_inflation: f64,
    pub(crate) buckets: &'a InflationBuckets,
    pub(crate) managers: &'a [ManagerLeniency],
}

fn write_json<W: Write, T: Serialize>(value: &T, out: &mut W) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn signed(value: f64) -> String {
    format!("{value:+.2}")
}

pub(crate) fn render_ratings<W: Write>(
    ratings: &RatingMap,
    grouping: CohortGrouping,
    json: bool,
    out: &mut W,
) -> Result<(), AppError> {
    if json {
        let report = RatingsReport {
            grouping,
            rated: ratings.len(),
            ratings: ratings.values().collect(),
        };
        return write_json(&report, out);
    }

    writeln!(
        out,
        "Employee ratings ({} employees, {} cohorts)",
        ratings.len(),
        grouping.label()
    )?;
    for rating in ratings.values() {
        let inflation = rating
            .rating_inflation
            .map(signed)
            .unwrap_or_else(|| "n/a".to_string());
        writeln!(
            out,
            "- {}: performance {:.2} | potential {:.2} | confidence {}% | inflation {}",
            rating.employee_id, rating.performance, rating.potential, rating.confidence, inflation
        )?;
        if !rating.factors.is_empty() {
            let labels: Vec<&str> = rating.factors.iter().map(|factor| factor.label()).collect();
            writeln!(out, "  factors: {}", labels.join(", "))?;
        }
    }

    Ok(())
}

fn write_bucket<W: Write>(out: &mut W, title: &str, bucket: &[RatingResult]) -> Result<(), AppError> {
    if bucket.is_empty() {
        writeln!(out, "\n{title}: none")?;
        return Ok(());
    }

    writeln!(out, "\n{title} ({})", bucket.len())?;
    for rating in bucket {
        let inflation = rating.rating_inflation.unwrap_or_default();
        writeln!(
            out,
            "- {}: {} (inferred performance {:.2})",
            rating.employee_id,
            signed(inflation),
            rating.performance
        )?;
    }
    Ok(())
}

pub(crate) fn render_inflation<W: Write>(
    summary: &InflationSummary<'_>,
    json: bool,
    out: &mut W,
) -> Result<(), AppError> {
    if json {
        return write_json(summary, out);
    }

    writeln!(
        out,
        "Rating inflation (threshold {:.2}, {} employees with a human rating)",
        summary.threshold,
        summary.buckets.classified()
    )?;
    writeln!(out, "Average inflation: {}", signed(summary.average_inflation))?;

    write_bucket(out, "Over-rated", &summary.buckets.over_rated)?;
    write_bucket(out, "Under-rated", &summary.buckets.under_rated)?;
    writeln!(out, "\nAligned: {}", summary.buckets.aligned.len())?;

    if summary.managers.is_empty() {
        writeln!(out, "\nManager leniency: no managers with rated reports")?;
        return Ok(());
    }

    writeln!(out, "\nManager leniency")?;
    for manager in summary.managers {
        writeln!(
            out,
            "- {}: {} | average {} across {} rated reports",
            manager.manager_id,
            manager.leniency.label(),
            signed(manager.average_inflation),
            manager.rated_reports
        )?;
    }

    Ok(())
}

pub(crate) fn render_grid<W: Write>(
    grid: &TalentGrid,
    json: bool,
    out: &mut W,
) -> Result<(), AppError> {
    if json {
        return write_json(grid, out);
    }

    writeln!(
        out,
        "Talent grid ({} active employees)",
        grid.summary.total_analyzed
    )?;
    for cell in &grid.cells {
        writeln!(
            out,
            "- {} [{} performance / {} potential]: {}",
            cell.category,
            cell.performance.label(),
            cell.potential.label(),
            cell.count
        )?;
        for entry in &cell.employees {
            let name = if entry.name.is_empty() {
                entry.employee_id.as_str()
            } else {
                entry.name.as_str()
            };
            writeln!(
                out,
                "    {} ({}) performance {:.2} potential {:.2}",
                name, entry.department, entry.performance, entry.potential
            )?;
        }
    }

    let summary = &grid.summary;
    writeln!(
        out,
        "\nSummary: {} high performers | {} core | {} development needed | average inflation {}",
        summary.high_performers,
        summary.core_employees,
        summary.development_needed,
        signed(summary.average_inflation)
    )?;

    Ok(())
}
